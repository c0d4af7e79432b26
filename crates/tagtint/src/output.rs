//! Output streams that compile markup before writing.
//!
//! The [`OutputMode`] enum decides whether styling is applied, and the
//! [`Output`] trait compiles each message against its registry before it
//! reaches the underlying stream.

use std::io::{BufRead, Stdin, StdinLock, Stdout, Write};

use console::Term;
use tagtint_markup::{Compiler, Registry};

use crate::error::{OutputError, Result};

/// Controls whether compiled output carries ANSI escape codes.
///
/// # Example
///
/// ```rust
/// use tagtint::OutputMode;
///
/// assert!(OutputMode::Term.should_use_color());
/// assert!(!OutputMode::Text.should_use_color());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Auto-detect terminal capabilities
    #[default]
    Auto,
    /// Always use ANSI escape codes
    Term,
    /// Never use ANSI escape codes
    Text,
}

impl OutputMode {
    /// Resolves the mode to a concrete decision about whether to use color.
    ///
    /// - `Auto` checks whether stdout supports colors
    /// - `Term` always returns `true`
    /// - `Text` always returns `false`
    pub fn should_use_color(&self) -> bool {
        match self {
            OutputMode::Auto => Term::stdout().features().colors_supported(),
            OutputMode::Term => true,
            OutputMode::Text => false,
        }
    }
}

impl std::str::FromStr for OutputMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(OutputMode::Auto),
            "term" => Ok(OutputMode::Term),
            "text" => Ok(OutputMode::Text),
            other => Err(format!("unknown output mode: {}", other)),
        }
    }
}

/// A destination for markup messages.
///
/// Implementors provide the raw stream operations; `write` and `writeln`
/// compile the message first.
pub trait Output {
    /// The registry messages are compiled against.
    fn registry(&self) -> &Registry;

    fn registry_mut(&mut self) -> &mut Registry;

    /// Whether known tags become escape codes.
    fn style_enabled(&self) -> bool;

    /// When true, messages with broken markup are written unformatted
    /// instead of failing.
    fn is_lenient(&self) -> bool {
        false
    }

    /// Writes already-compiled text.
    fn write_raw(&mut self, text: &str) -> Result<()>;

    /// Reads one line of input, trimmed.
    fn read_line(&mut self) -> Result<String>;

    /// Clears the display, if the destination supports it.
    fn clear(&mut self) -> Result<()>;

    /// Compiles a message with this output's registry and styling.
    fn compile(&self, message: &str) -> Result<String> {
        let compiler = Compiler::new(self.registry()).style_enabled(self.style_enabled());
        match compiler.compile(message) {
            Ok(compiled) => Ok(compiled),
            Err(err) if self.is_lenient() => {
                tracing::warn!(error = %err, "markup error, writing message unformatted");
                Ok(message.to_string())
            }
            Err(err) => Err(err.into()),
        }
    }

    fn write(&mut self, message: &str) -> Result<()> {
        let compiled = self.compile(message)?;
        self.write_raw(&compiled)
    }

    fn writeln(&mut self, message: &str) -> Result<()> {
        let mut compiled = self.compile(message)?;
        compiled.push('\n');
        self.write_raw(&compiled)
    }
}

/// An [`Output`] over any writer/reader pair.
///
/// Each write is flushed immediately.
///
/// # Example
///
/// ```rust
/// use tagtint::{Output, OutputMode, StreamOutput};
/// use tagtint_markup::Registry;
///
/// let mut output = StreamOutput::new(Vec::new(), &b""[..], Registry::new(), OutputMode::Text);
/// output.writeln("<info>done</info>").unwrap();
///
/// let (written, _) = output.into_parts();
/// assert_eq!(String::from_utf8(written).unwrap(), "done\n");
/// ```
#[derive(Debug)]
pub struct StreamOutput<W, R> {
    writer: W,
    reader: R,
    registry: Registry,
    style_enabled: bool,
    lenient: bool,
    terminal: Option<Term>,
}

impl<W: Write, R: BufRead> StreamOutput<W, R> {
    pub fn new(writer: W, reader: R, registry: Registry, mode: OutputMode) -> Self {
        Self {
            writer,
            reader,
            registry,
            style_enabled: mode.should_use_color(),
            lenient: false,
            terminal: None,
        }
    }

    /// Write unformatted messages instead of failing on broken markup.
    pub fn lenient(mut self, lenient: bool) -> Self {
        self.lenient = lenient;
        self
    }

    /// Terminal cleared by [`Output::clear`]. Without one, clearing is a no-op.
    pub fn clear_terminal(mut self, terminal: Term) -> Self {
        self.terminal = Some(terminal);
        self
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn into_parts(self) -> (W, R) {
        (self.writer, self.reader)
    }
}

/// Standard output and input; `clear` clears the stdout terminal.
pub type ConsoleOutput = StreamOutput<Stdout, StdinLock<'static>>;

impl ConsoleOutput {
    pub fn console(registry: Registry, mode: OutputMode) -> Self {
        let stdin: Stdin = std::io::stdin();
        StreamOutput::new(std::io::stdout(), stdin.lock(), registry, mode)
            .clear_terminal(Term::stdout())
    }
}

impl<W: Write, R: BufRead> Output for StreamOutput<W, R> {
    fn registry(&self) -> &Registry {
        &self.registry
    }

    fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    fn style_enabled(&self) -> bool {
        self.style_enabled
    }

    fn is_lenient(&self) -> bool {
        self.lenient
    }

    fn write_raw(&mut self, text: &str) -> Result<()> {
        self.writer.write_all(text.as_bytes())?;
        self.writer.flush()?;
        Ok(())
    }

    fn read_line(&mut self) -> Result<String> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(OutputError::ReadFailed);
        }
        Ok(line.trim().to_string())
    }

    fn clear(&mut self) -> Result<()> {
        if let Some(terminal) = &self.terminal {
            self.writer.flush()?;
            terminal.clear_screen()?;
        }
        Ok(())
    }
}
