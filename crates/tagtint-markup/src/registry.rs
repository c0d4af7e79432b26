//! Element registry mapping tag names to styles.

use std::collections::HashMap;
use std::path::Path;

use crate::error::StylesheetError;
use crate::style::{Color, Style};
use crate::stylesheet::parse_stylesheet_with;

/// A named style. The name is the tag that selects it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub style: Style,
}

impl Element {
    pub fn new(name: impl Into<String>, style: Style) -> Self {
        Self {
            name: name.into(),
            style,
        }
    }
}

/// The default skin: semantic message elements plus `b` and `u`.
fn builtin_elements() -> Vec<Element> {
    vec![
        Element::new("success", Style::new().fg(Color::Black).bg(Color::Green)),
        Element::new("info", Style::new().fg(Color::Green)),
        Element::new("error", Style::new().fg(Color::Black).bg(Color::Yellow)),
        Element::new("fatal", Style::new().fg(Color::White).bg(Color::Red)),
        Element::new("question", Style::new().fg(Color::White).bg(Color::Blue)),
        Element::new("comment", Style::new().fg(Color::Yellow)),
        Element::new("b", Style::new().bold()),
        Element::new("u", Style::new().underline()),
    ]
}

/// Tag names to elements. Names are case-sensitive and unique.
///
/// There is no global instance: construct one, customize it, and hand it to
/// the compiler. Looking up an unknown name is not an error; the compiler
/// renders such tags literally.
///
/// # Example
///
/// ```rust
/// use tagtint_markup::{Color, Element, Registry, Style};
///
/// let mut registry = Registry::new();
/// assert!(registry.lookup("info").is_some());
///
/// registry.add_element(Element::new("warn", Style::new().fg(Color::Yellow).bold()));
/// registry.remove_element("comment");
/// registry.remove_element("never-existed");
///
/// assert!(registry.contains("warn"));
/// assert!(!registry.contains("comment"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registry {
    elements: HashMap<String, Element>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Creates a registry seeded with the built-in elements.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        for element in builtin_elements() {
            registry.add_element(element);
        }
        registry
    }

    /// Creates a registry with no elements at all.
    pub fn empty() -> Self {
        Self {
            elements: HashMap::new(),
        }
    }

    /// Built-ins plus the elements of a YAML stylesheet.
    pub fn from_stylesheet(yaml: &str) -> Result<Self, StylesheetError> {
        let mut registry = Self::new();
        registry.load_stylesheet(yaml)?;
        Ok(registry)
    }

    pub fn lookup(&self, name: &str) -> Option<&Element> {
        self.elements.get(name)
    }

    /// Adds an element, replacing any existing element of the same name.
    pub fn add_element(&mut self, element: Element) {
        tracing::debug!(element = %element.name, "registering element");
        self.elements.insert(element.name.clone(), element);
    }

    /// Shorthand for `add_element(Element::new(name, style))`.
    pub fn add(&mut self, name: impl Into<String>, style: Style) {
        self.add_element(Element::new(name, style));
    }

    /// Builder form of [`add`](Self::add).
    pub fn with(mut self, name: impl Into<String>, style: Style) -> Self {
        self.add(name, style);
        self
    }

    /// Removes an element. Removing a name that isn't registered does nothing.
    pub fn remove_element(&mut self, name: &str) {
        if self.elements.remove(name).is_some() {
            tracing::debug!(element = name, "removed element");
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.elements.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Element names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.elements.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.elements.values()
    }

    /// Adds every element defined in a YAML stylesheet.
    ///
    /// Aliases may point at elements of the same sheet or at elements already
    /// registered. Nothing is added if any entry fails.
    pub fn load_stylesheet(&mut self, yaml: &str) -> Result<(), StylesheetError> {
        let elements = parse_stylesheet_with(yaml, |name| {
            self.lookup(name).map(|element| element.style.clone())
        })?;
        for element in elements {
            self.add_element(element);
        }
        Ok(())
    }

    /// Reads a stylesheet file and loads it like [`load_stylesheet`](Self::load_stylesheet).
    pub fn load_stylesheet_file(&mut self, path: impl AsRef<Path>) -> Result<(), StylesheetError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|err| StylesheetError::Load {
            message: format!("{}: {}", path.display(), err),
        })?;
        self.load_stylesheet(&yaml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::TextEffect;

    #[test]
    fn builtins_are_seeded() {
        let registry = Registry::new();
        for name in ["success", "info", "error", "fatal", "question", "comment", "b", "u"] {
            assert!(registry.contains(name), "missing builtin {name}");
        }
        assert_eq!(registry.len(), 8);
    }

    #[test]
    fn empty_registry_has_nothing() {
        let registry = Registry::empty();
        assert!(registry.is_empty());
        assert!(registry.lookup("info").is_none());
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let registry = Registry::new();
        assert!(registry.lookup("info").is_some());
        assert!(registry.lookup("INFO").is_none());
    }

    #[test]
    fn add_overwrites_builtin() {
        let mut registry = Registry::new();
        registry.add("info", Style::new().fg(Color::Cyan));
        assert_eq!(
            registry.lookup("info").map(|e| &e.style),
            Some(&Style::new().fg(Color::Cyan))
        );
        assert_eq!(registry.len(), 8);
    }

    #[test]
    fn add_overwrites_custom() {
        let mut registry = Registry::empty()
            .with("x", Style::new().bold())
            .with("x", Style::new().underline());
        assert_eq!(registry.len(), 1);
        let style = &registry.lookup("x").unwrap().style;
        assert!(style.effects.contains(&TextEffect::Underline));
        assert!(!style.effects.contains(&TextEffect::Bold));

        registry.remove_element("x");
        assert!(registry.is_empty());
    }

    #[test]
    fn remove_missing_is_noop() {
        let mut registry = Registry::new();
        let before = registry.clone();
        registry.remove_element("nope");
        assert_eq!(registry, before);
    }

    #[test]
    fn names_are_sorted() {
        let registry = Registry::empty()
            .with("zeta", Style::new())
            .with("alpha", Style::new())
            .with("mid", Style::new());
        assert_eq!(registry.names(), vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn registries_are_independent() {
        let mut a = Registry::new();
        let b = Registry::new();
        a.remove_element("info");
        assert!(!a.contains("info"));
        assert!(b.contains("info"));
    }

    #[test]
    fn load_stylesheet_adds_and_overrides() {
        let mut registry = Registry::new();
        registry
            .load_stylesheet("info: cyan\nwarn: yellow bold\n")
            .unwrap();
        assert_eq!(
            registry.lookup("info").unwrap().style,
            Style::new().fg(Color::Cyan)
        );
        assert_eq!(
            registry.lookup("warn").unwrap().style,
            Style::new().fg(Color::Yellow).bold()
        );
    }

    #[test]
    fn failed_load_leaves_registry_untouched() {
        let mut registry = Registry::new();
        let before = registry.clone();
        let err = registry
            .load_stylesheet("good: red\nbad: missing-target\n")
            .unwrap_err();
        assert!(matches!(err, StylesheetError::UnresolvedAlias { .. }));
        assert_eq!(registry, before);
    }

    #[test]
    fn alias_to_existing_element() {
        let mut registry = Registry::new();
        registry.load_stylesheet("note: comment").unwrap();
        assert_eq!(
            registry.lookup("note").unwrap().style,
            registry.lookup("comment").unwrap().style
        );
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, b"title:\n  fg: blue\n  bold: true\n").unwrap();

        let mut registry = Registry::empty();
        registry.load_stylesheet_file(file.path()).unwrap();
        assert_eq!(
            registry.lookup("title").unwrap().style,
            Style::new().fg(Color::Blue).bold()
        );
    }

    #[test]
    fn load_missing_file() {
        let mut registry = Registry::empty();
        let err = registry
            .load_stylesheet_file("/definitely/not/here.yaml")
            .unwrap_err();
        assert!(matches!(err, StylesheetError::Load { .. }));
    }
}
