//! Error types for the markup crate.

use thiserror::Error;

/// Errors that abort a parse or compile call.
///
/// Both variants carry byte positions into the source string so callers can
/// point at the offending markup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarkupError {
    /// A close tag does not match the innermost open tag.
    #[error("closing tag </{name}> at position {position} does not match the innermost open tag")]
    UnmatchedCloseTag { name: String, position: usize },

    /// Input ended with tags still open. `names` lists them outermost first;
    /// `position` is where the innermost one was opened.
    #[error("unclosed tag(s) {} (innermost opened at position {position})", format_names(.names))]
    UnclosedTag { names: Vec<String>, position: usize },
}

fn format_names(names: &[String]) -> String {
    names
        .iter()
        .map(|name| format!("<{}>", name))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Error type for stylesheet loading.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StylesheetError {
    /// The document is not valid YAML or not a mapping of names to styles.
    #[error("failed to parse stylesheet: {message}")]
    Parse { message: String },

    /// An entry has the wrong shape or an unknown attribute.
    #[error("invalid definition for element '{element}': {message}")]
    InvalidDefinition { element: String, message: String },

    /// A multi-word shorthand contains a word that is neither a color nor an effect.
    #[error("unknown shorthand '{word}' in element '{element}'")]
    UnknownShorthand { element: String, word: String },

    /// An alias names an element that exists nowhere.
    #[error("element '{from}' aliases non-existent element '{to}'")]
    UnresolvedAlias { from: String, to: String },

    /// Alias chain loops back on itself.
    #[error("cycle detected in element aliases: {}", .path.join(" -> "))]
    AliasCycle { path: Vec<String> },

    /// The stylesheet file could not be read.
    #[error("failed to load stylesheet: {message}")]
    Load { message: String },
}

/// Result type for markup operations.
pub type Result<T> = std::result::Result<T, MarkupError>;
