//! YAML stylesheets for defining elements.
//!
//! Each top-level key names an element. Values come in three forms:
//!
//! ```yaml
//! # Shorthand: colors, `on_<color>` backgrounds and effect names
//! warn: "yellow bold"
//! alert: "white on_red"
//!
//! # Full definition
//! title:
//!   fg: cyan
//!   bg: black
//!   bold: true
//!   underline: true
//!
//! # Alias to another element (in this sheet or already registered)
//! note: comment
//! ```
//!
//! Colors are the eight base names plus `bright_*` variants (`gray`/`grey`
//! mean `bright_black`). Effects are `bold`, `dim`, `italic`, `underline`,
//! `blink`, `reverse`, `hidden` and `strikethrough`.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::StylesheetError;
use crate::lexer::Lexer;
use crate::registry::Element;
use crate::style::{Color, Style, TextEffect};

/// Attributes of a full (mapping) definition.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct StyleAttributes {
    fg: Option<Color>,
    bg: Option<Color>,
    #[serde(default)]
    bold: bool,
    #[serde(default)]
    dim: bool,
    #[serde(default)]
    italic: bool,
    #[serde(default)]
    underline: bool,
    #[serde(default)]
    blink: bool,
    #[serde(default)]
    reverse: bool,
    #[serde(default)]
    hidden: bool,
    #[serde(default)]
    strikethrough: bool,
}

impl StyleAttributes {
    fn into_style(self) -> Style {
        let flags = [
            (self.bold, TextEffect::Bold),
            (self.dim, TextEffect::Dim),
            (self.italic, TextEffect::Italic),
            (self.underline, TextEffect::Underline),
            (self.blink, TextEffect::Blink),
            (self.reverse, TextEffect::Reverse),
            (self.hidden, TextEffect::Hidden),
            (self.strikethrough, TextEffect::Strikethrough),
        ];
        let mut style = Style {
            foreground: self.fg,
            background: self.bg,
            ..Style::default()
        };
        style
            .effects
            .extend(flags.into_iter().filter(|(on, _)| *on).map(|(_, e)| e));
        style
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Definition {
    Concrete(Style),
    Alias(String),
}

/// Parses a stylesheet into elements, sorted by name.
///
/// Aliases must resolve within the sheet itself; to alias registered
/// elements use [`Registry::load_stylesheet`](crate::Registry::load_stylesheet).
///
/// ```rust
/// use tagtint_markup::{parse_stylesheet, Color, Style};
///
/// let elements = parse_stylesheet("warn: yellow bold\nhint: warn").unwrap();
/// assert_eq!(elements[0].name, "hint");
/// assert_eq!(elements[1].style, Style::new().fg(Color::Yellow).bold());
/// assert_eq!(elements[0].style, elements[1].style);
/// ```
pub fn parse_stylesheet(yaml: &str) -> Result<Vec<Element>, StylesheetError> {
    parse_stylesheet_with(yaml, |_| None)
}

/// Parses a stylesheet, resolving aliases the sheet can't resolve via `external`.
pub(crate) fn parse_stylesheet_with<F>(
    yaml: &str,
    external: F,
) -> Result<Vec<Element>, StylesheetError>
where
    F: Fn(&str) -> Option<Style>,
{
    let root: serde_yaml::Value =
        serde_yaml::from_str(yaml).map_err(|err| StylesheetError::Parse {
            message: err.to_string(),
        })?;

    let mapping = match root {
        serde_yaml::Value::Mapping(mapping) => mapping,
        serde_yaml::Value::Null => return Ok(Vec::new()),
        other => {
            return Err(StylesheetError::Parse {
                message: format!("expected a mapping of element names, got {:?}", other),
            })
        }
    };

    let mut definitions = BTreeMap::new();
    for (key, value) in mapping {
        let name = match key {
            serde_yaml::Value::String(name) if Lexer::is_valid_tag_name(&name) => name,
            other => {
                return Err(StylesheetError::Parse {
                    message: format!("invalid element name {:?}", other),
                })
            }
        };
        let definition = parse_definition(&name, value)?;
        definitions.insert(name, definition);
    }

    definitions
        .keys()
        .map(|name| {
            let style = resolve(name, &definitions, &external)?;
            Ok(Element::new(name.clone(), style))
        })
        .collect()
}

fn parse_definition(
    element: &str,
    value: serde_yaml::Value,
) -> Result<Definition, StylesheetError> {
    match value {
        serde_yaml::Value::String(s) => parse_string(element, &s),
        mapping @ serde_yaml::Value::Mapping(_) => {
            let attributes: StyleAttributes =
                serde_yaml::from_value(mapping).map_err(|err| {
                    StylesheetError::InvalidDefinition {
                        element: element.to_string(),
                        message: err.to_string(),
                    }
                })?;
            Ok(Definition::Concrete(attributes.into_style()))
        }
        other => Err(StylesheetError::InvalidDefinition {
            element: element.to_string(),
            message: format!("expected string or mapping, got {:?}", other),
        }),
    }
}

/// A single word is shorthand if it is a color, background or effect, and an
/// alias otherwise. Several words must all be shorthand.
fn parse_string(element: &str, s: &str) -> Result<Definition, StylesheetError> {
    let words: Vec<&str> = s.split_whitespace().collect();
    match words.as_slice() {
        [] => Err(StylesheetError::InvalidDefinition {
            element: element.to_string(),
            message: "empty style definition".to_string(),
        }),
        [word] => {
            let mut style = Style::new();
            if apply_shorthand(&mut style, word) {
                Ok(Definition::Concrete(style))
            } else if Lexer::is_valid_tag_name(word) {
                Ok(Definition::Alias(word.to_string()))
            } else {
                Err(StylesheetError::UnknownShorthand {
                    element: element.to_string(),
                    word: word.to_string(),
                })
            }
        }
        words => {
            let mut style = Style::new();
            for word in words {
                if !apply_shorthand(&mut style, word) {
                    return Err(StylesheetError::UnknownShorthand {
                        element: element.to_string(),
                        word: word.to_string(),
                    });
                }
            }
            Ok(Definition::Concrete(style))
        }
    }
}

fn apply_shorthand(style: &mut Style, word: &str) -> bool {
    if let Some(bg) = word.strip_prefix("on_") {
        return match bg.parse::<Color>() {
            Ok(color) => {
                style.background = Some(color);
                true
            }
            Err(_) => false,
        };
    }
    if let Ok(color) = word.parse::<Color>() {
        style.foreground = Some(color);
        return true;
    }
    if let Ok(effect) = word.parse::<TextEffect>() {
        style.effects.insert(effect);
        return true;
    }
    false
}

/// Follows an alias chain to a concrete style.
fn resolve<F>(
    name: &str,
    definitions: &BTreeMap<String, Definition>,
    external: &F,
) -> Result<Style, StylesheetError>
where
    F: Fn(&str) -> Option<Style>,
{
    let mut path = vec![name.to_string()];
    let mut current = name;

    loop {
        match definitions.get(current) {
            Some(Definition::Concrete(style)) => return Ok(style.clone()),
            Some(Definition::Alias(target)) => {
                let seen = path.contains(target);
                path.push(target.clone());
                if seen {
                    return Err(StylesheetError::AliasCycle { path });
                }
                current = target;
            }
            None => {
                return external(current).ok_or_else(|| StylesheetError::UnresolvedAlias {
                    from: path[path.len() - 2].clone(),
                    to: current.to_string(),
                })
            }
        }
    }
}
