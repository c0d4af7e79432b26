//! Styled terminal output from `<tag>` markup.
//!
//! `tagtint` builds on [`tagtint_markup`] with the pieces a command-line
//! program needs around it:
//!
//! - [`Output`] and [`StreamOutput`]: streams whose `write`/`writeln` compile
//!   markup against a [`Registry`] before writing
//! - [`OutputMode`]: whether escape codes are emitted (auto-detected by default)
//! - [`ProgressBar`]: an 80-column text progress bar drawn through an output
//!
//! # Example
//!
//! ```rust
//! use tagtint::{Output, OutputMode, StreamOutput};
//! use tagtint::{Color, Registry, Style};
//!
//! let registry = Registry::new().with("path", Style::new().fg(Color::Cyan));
//! let mut output = StreamOutput::new(Vec::new(), &b""[..], registry, OutputMode::Term);
//! output.writeln("<info>saved</info> <path>notes.txt</path>").unwrap();
//!
//! let (written, _) = output.into_parts();
//! assert_eq!(
//!     String::from_utf8(written).unwrap(),
//!     "\x1b[32msaved\x1b[0m \x1b[36mnotes.txt\x1b[0m\n"
//! );
//! ```
//!
//! Markup that does not nest properly is an error unless the stream is
//! [lenient](StreamOutput::lenient), in which case the message is written
//! unformatted and a warning is logged through `tracing`.

mod error;
mod output;
mod progress;

pub use error::{OutputError, ProgressError, Result};
pub use output::{ConsoleOutput, Output, OutputMode, StreamOutput};
pub use progress::{
    format_time_remaining, ProgressBar, ProgressBarFormatter, BAR_WIDTH, DEFAULT_FORMAT,
};

pub use tagtint_markup::{
    compile, validate, Color, Compiler, Element, MarkupError, Registry, Style, StylesheetError,
    TextEffect, RESET,
};
