//! Renders a node tree into a terminal string.
//!
//! Known tags are replaced by their style's escape codes (or simply dropped
//! when styling is off). Unknown tags are written back literally so a typo in
//! a tag name stays visible in the output.
//!
//! Terminal resets are global: `ESC[0m` turns off every attribute, not just
//! the innermost one. When a styled region closes inside another styled
//! region, the compiler re-emits the enclosing region's activation right after
//! the reset so the text that follows keeps the outer styling.

use crate::error::Result;
use crate::lexer::Lexer;
use crate::parser::{parse, Node};
use crate::registry::Registry;
use crate::style::{Style, RESET};

/// Compiles markup against a registry.
///
/// # Example
///
/// ```rust
/// use tagtint_markup::{compile, Registry};
///
/// let registry = Registry::new();
///
/// // Styling on: info is green
/// let styled = compile("<info>hi</info>", &registry, true).unwrap();
/// assert_eq!(styled, "\x1b[32mhi\x1b[0m");
///
/// // Styling off: tags are stripped
/// let plain = compile("<info>hi</info>", &registry, false).unwrap();
/// assert_eq!(plain, "hi");
///
/// // Unknown tags pass through untouched
/// let unknown = compile("<bogus>x</bogus>", &registry, true).unwrap();
/// assert_eq!(unknown, "<bogus>x</bogus>");
/// ```
///
/// # Errors
///
/// Returns the parse error for unmatched or unclosed tags. No partial output
/// is produced.
pub fn compile(text: &str, registry: &Registry, style_enabled: bool) -> Result<String> {
    Compiler::new(registry).style_enabled(style_enabled).compile(text)
}

/// Lists tag names in `text` that the registry does not know, in first-seen
/// order without duplicates.
///
/// Such tags are not errors at compile time (they render literally), but in
/// static messages they are usually typos.
///
/// ```rust
/// use tagtint_markup::{validate, Registry};
///
/// let unknown = validate("<info>a</info><infp>b</infp>", &Registry::new()).unwrap();
/// assert_eq!(unknown, vec!["infp".to_string()]);
/// ```
pub fn validate(text: &str, registry: &Registry) -> Result<Vec<String>> {
    let nodes = parse(Lexer::new(text))?;
    let mut unknown = Vec::new();
    collect_unknown(&nodes, registry, &mut unknown);
    Ok(unknown)
}

fn collect_unknown(nodes: &[Node], registry: &Registry, unknown: &mut Vec<String>) {
    let mut pending: Vec<&Node> = nodes.iter().rev().collect();
    while let Some(node) = pending.pop() {
        if let Node::Tag { name, children } = node {
            if registry.lookup(name).is_none() && !unknown.contains(name) {
                unknown.push(name.clone());
            }
            pending.extend(children.iter().rev());
        }
    }
}

/// One unit of work for the compiler's explicit stack.
enum Step<'n> {
    Enter(&'n Node),
    CloseUnknown(&'n str),
    CloseStyled,
}

/// A registry bound to a styling mode.
#[derive(Debug, Clone, Copy)]
pub struct Compiler<'r> {
    registry: &'r Registry,
    style_enabled: bool,
}

impl<'r> Compiler<'r> {
    /// Creates a compiler with styling enabled.
    pub fn new(registry: &'r Registry) -> Self {
        Self {
            registry,
            style_enabled: true,
        }
    }

    /// Whether known tags emit escape codes or are stripped.
    pub fn style_enabled(mut self, enabled: bool) -> Self {
        self.style_enabled = enabled;
        self
    }

    /// Lexes, parses and renders `text`.
    pub fn compile(&self, text: &str) -> Result<String> {
        let tokens: Vec<_> = Lexer::new(text).collect();
        tracing::trace!(
            len = text.len(),
            tokens = tokens.len(),
            style_enabled = self.style_enabled,
            "compiling markup"
        );
        let nodes = parse(tokens)?;
        Ok(self.compile_nodes(&nodes))
    }

    /// Renders an already-parsed tree.
    ///
    /// The walk uses an explicit stack, so nesting depth is bounded by
    /// memory rather than by the call stack.
    pub fn compile_nodes(&self, nodes: &[Node]) -> String {
        let mut output = String::new();
        let mut active: Vec<&'r Style> = Vec::new();
        let mut steps: Vec<Step<'_>> = nodes.iter().rev().map(Step::Enter).collect();

        while let Some(step) = steps.pop() {
            match step {
                Step::Enter(Node::Word(text)) => output.push_str(text),
                Step::Enter(Node::Tag { name, children }) => {
                    match self.registry.lookup(name) {
                        None => {
                            output.push('<');
                            output.push_str(name);
                            output.push('>');
                            steps.push(Step::CloseUnknown(name.as_str()));
                        }
                        Some(element) if !self.style_enabled || element.style.is_plain() => {}
                        Some(element) => {
                            output.push_str(&element.style.activation());
                            active.push(&element.style);
                            steps.push(Step::CloseStyled);
                        }
                    }
                    steps.extend(children.iter().rev().map(Step::Enter));
                }
                Step::CloseUnknown(name) => {
                    output.push_str("</");
                    output.push_str(name);
                    output.push('>');
                }
                Step::CloseStyled => {
                    active.pop();
                    output.push_str(RESET);
                    if let Some(enclosing) = active.last() {
                        output.push_str(&enclosing.activation());
                    }
                }
            }
        }

        debug_assert!(active.is_empty());
        output
    }
}
