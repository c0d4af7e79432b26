//! `tagtint`: render `<tag>` markup to the terminal.
//!
//! ```text
//! tagtint "<info>done</info> in <b>3s</b>"
//! echo "<error>failed</error>" | tagtint --mode term
//! tagtint --stylesheet theme.yaml --list-elements
//! ```
//!
//! Logging goes to stderr and is filtered by `TAGTINT_LOG` (default `warn`).

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tagtint::{ConsoleOutput, Output, OutputMode, Registry};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tagtint")]
#[command(version)]
#[command(about = "Render <tag> markup as styled terminal text")]
struct Cli {
    /// Markup to render. Read from stdin when omitted.
    text: Option<String>,

    /// Output mode: auto, term, or text
    #[arg(long, default_value = "auto")]
    mode: OutputMode,

    /// YAML stylesheet with extra or replacement elements
    #[arg(long, value_name = "PATH")]
    stylesheet: Option<PathBuf>,

    /// Print malformed markup unformatted instead of failing
    #[arg(long)]
    lenient: bool,

    /// List registered elements, each in its own style
    #[arg(long)]
    list_elements: bool,
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("TAGTINT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn build_registry(stylesheet: Option<&PathBuf>) -> Result<Registry> {
    let mut registry = Registry::new();
    if let Some(path) = stylesheet {
        registry
            .load_stylesheet_file(path)
            .with_context(|| format!("loading stylesheet {}", path.display()))?;
    }
    Ok(registry)
}

fn list_elements(output: &mut ConsoleOutput) -> Result<()> {
    let lines: Vec<String> = output
        .registry()
        .names()
        .into_iter()
        .filter_map(|name| output.registry().lookup(name))
        .map(|element| {
            if output.style_enabled() {
                element.style.apply_to(&element.name)
            } else {
                element.name.clone()
            }
        })
        .collect();

    for line in lines {
        output.write_raw(&format!("{}\n", line))?;
    }
    Ok(())
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let registry = build_registry(cli.stylesheet.as_ref())?;
    tracing::debug!(elements = registry.len(), mode = ?cli.mode, "registry ready");

    if cli.list_elements {
        let mut output = ConsoleOutput::console(registry, cli.mode);
        return list_elements(&mut output);
    }

    let (text, newline) = match cli.text {
        Some(text) => (text, true),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading markup from stdin")?;
            (buf, false)
        }
    };

    let mut output = ConsoleOutput::console(registry, cli.mode).lenient(cli.lenient);
    if newline {
        output.writeln(&text)?;
    } else {
        output.write(&text)?;
    }
    Ok(())
}
