//! Lexer for `<tag>`-style markup.
//!
//! The lexer never fails. Anything that does not form a well-shaped tag is
//! folded into the surrounding [`TokenKind::Word`](crate::TokenKind::Word)
//! text, and a backslash right before `<` turns the `<` into literal text.
//!
//! # Tag Name Syntax
//!
//! - Start with an ASCII letter
//! - Followed by ASCII letters, digits, `-` or `:`
//! - Case-sensitive
//!
//! Pattern: `[A-Za-z][A-Za-z0-9:-]*`

use crate::token::Token;

/// The marker that forces a following `<` to be literal text.
pub const ESCAPE: char = '\\';

/// Converts markup into a token stream terminated by exactly one `Eof`.
///
/// ```rust
/// use tagtint_markup::{Lexer, TokenKind};
///
/// let kinds: Vec<_> = Lexer::new("a<b>c</b>").map(|t| t.kind).collect();
/// assert_eq!(
///     kinds,
///     vec![
///         TokenKind::Word,
///         TokenKind::TagOpen,
///         TokenKind::Word,
///         TokenKind::TagClose,
///         TokenKind::Eof,
///     ]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    finished: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            finished: false,
        }
    }

    /// Checks if a string is a valid tag name.
    pub fn is_valid_tag_name(s: &str) -> bool {
        let mut chars = s.chars();
        match chars.next() {
            Some(first) if first.is_ascii_alphabetic() => {}
            _ => return false,
        }
        chars.all(is_name_char)
    }

    /// Tries to read a tag starting at byte offset `at`.
    ///
    /// Returns the token and the number of bytes it spans.
    fn scan_tag(&self, at: usize) -> Option<(Token, usize)> {
        let rest = self.input[at..].strip_prefix('<')?;
        let (closing, body) = match rest.strip_prefix('/') {
            Some(body) => (true, body),
            None => (false, rest),
        };

        let mut chars = body.char_indices();
        match chars.next() {
            Some((_, first)) if first.is_ascii_alphabetic() => {}
            _ => return None,
        }
        // Names are ASCII, so the first non-name char ends the scan.
        let name_len = chars
            .find(|(_, c)| !is_name_char(*c))
            .map(|(i, _)| i)
            .unwrap_or(body.len());
        if !body[name_len..].starts_with('>') {
            return None;
        }

        let name = &body[..name_len];
        let prefix = if closing { 2 } else { 1 };
        let span = prefix + name_len + 1;
        let token = if closing {
            Token::close(name, at)
        } else {
            Token::open(name, at)
        };
        Some((token, span))
    }

    fn scan_word(&mut self) -> Token {
        let start = self.pos;
        let mut word = String::new();

        while let Some(ch) = self.input[self.pos..].chars().next() {
            let rest = &self.input[self.pos..];
            if ch == ESCAPE && rest[1..].starts_with('<') {
                word.push('<');
                self.pos += 2;
                continue;
            }
            if ch == '<' && self.scan_tag(self.pos).is_some() {
                break;
            }
            word.push(ch);
            self.pos += ch.len_utf8();
        }

        Token::word(word, start)
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == ':'
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        if self.pos >= self.input.len() {
            self.finished = true;
            return Some(Token::eof(self.input.len()));
        }

        if let Some((token, span)) = self.scan_tag(self.pos) {
            self.pos += span;
            return Some(token);
        }

        Some(self.scan_word())
    }
}

/// Lexes the whole input into a token vector ending with `Eof`.
pub fn lex(input: &str) -> Vec<Token> {
    Lexer::new(input).collect()
}
