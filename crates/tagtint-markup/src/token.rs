//! Tokens produced by the [`Lexer`](crate::Lexer).

/// Kind of a lexed token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Literal text, with escapes already removed.
    Word,
    /// Opening tag: `<name>`
    TagOpen,
    /// Closing tag: `</name>`
    TagClose,
    /// End of input. Always the last token of a stream.
    Eof,
}

/// A single lexed token.
///
/// `value` holds the text for [`TokenKind::Word`], the tag name for
/// [`TokenKind::TagOpen`] and [`TokenKind::TagClose`], and is empty for
/// [`TokenKind::Eof`]. `position` is the byte offset where the token starts
/// in the source string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub position: usize,
}

impl Token {
    pub fn word(value: impl Into<String>, position: usize) -> Self {
        Self {
            kind: TokenKind::Word,
            value: value.into(),
            position,
        }
    }

    pub fn open(name: impl Into<String>, position: usize) -> Self {
        Self {
            kind: TokenKind::TagOpen,
            value: name.into(),
            position,
        }
    }

    pub fn close(name: impl Into<String>, position: usize) -> Self {
        Self {
            kind: TokenKind::TagClose,
            value: name.into(),
            position,
        }
    }

    pub fn eof(position: usize) -> Self {
        Self {
            kind: TokenKind::Eof,
            value: String::new(),
            position,
        }
    }

    /// Returns true for the end-of-input token.
    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}
