//! Tag-style markup for terminal output.
//!
//! This crate turns `<name>content</name>` markup into a terminal string.
//! Tag names are resolved against a [`Registry`] of named styles; the result
//! either carries ANSI escape codes or, when styling is off, plain text.
//!
//! The pipeline is: [`Lexer`] → tokens → [`parse`] → [`Node`] tree →
//! [`Compiler`] → string.
//!
//! # Example
//!
//! ```rust
//! use tagtint_markup::{compile, Color, Registry, Style};
//!
//! let mut registry = Registry::new();
//! registry.add("path", Style::new().fg(Color::Cyan).underline());
//!
//! // Apply ANSI codes
//! let output = compile("wrote <path>out.txt</path>", &registry, true).unwrap();
//! assert_eq!(output, "wrote \x1b[4;36mout.txt\x1b[0m");
//!
//! // Plain text
//! let output = compile("wrote <path>out.txt</path>", &registry, false).unwrap();
//! assert_eq!(output, "wrote out.txt");
//!
//! // A backslash keeps a tag literal
//! let output = compile("use \\<path> tags", &registry, true).unwrap();
//! assert_eq!(output, "use <path> tags");
//! ```
//!
//! # Rules
//!
//! - Tag names match `[A-Za-z][A-Za-z0-9:-]*`. Anything else that looks like
//!   a tag is ordinary text.
//! - Tags must nest properly. Unmatched or unclosed tags are a
//!   [`MarkupError`]; no partial output is returned.
//! - Unknown tag names are rendered literally, delimiters included.
//! - Closing a styled tag inside another styled tag resets the terminal and
//!   then re-applies the enclosing tag's style.

mod compiler;
mod error;
mod lexer;
mod parser;
mod registry;
mod style;
mod stylesheet;
mod token;

pub use compiler::{compile, validate, Compiler};
pub use error::{MarkupError, Result, StylesheetError};
pub use lexer::{lex, Lexer, ESCAPE};
pub use parser::{parse, Node};
pub use registry::{Element, Registry};
pub use style::{Color, Style, TextEffect, RESET};
pub use stylesheet::parse_stylesheet;
pub use token::{Token, TokenKind};
