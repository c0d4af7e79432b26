//! Style values and their terminal encoding.
//!
//! A [`Style`] is plain data: an optional foreground, an optional background
//! and a set of [`TextEffect`]s. It is turned into escape codes through a
//! fixed SGR table, so two equal styles always encode to the same bytes.
//!
//! | effect          | code | | color   | fg | bg | bright fg | bright bg |
//! |-----------------|------|-|---------|----|----|-----------|-----------|
//! | `Bold`          | 1    | | black   | 30 | 40 | 90        | 100       |
//! | `Dim`           | 2    | | red     | 31 | 41 | 91        | 101       |
//! | `Italic`        | 3    | | green   | 32 | 42 | 92        | 102       |
//! | `Underline`     | 4    | | yellow  | 33 | 43 | 93        | 103       |
//! | `Blink`         | 5    | | blue    | 34 | 44 | 94        | 104       |
//! | `Reverse`       | 7    | | magenta | 35 | 45 | 95        | 105       |
//! | `Hidden`        | 8    | | cyan    | 36 | 46 | 96        | 106       |
//! | `Strikethrough` | 9    | | white   | 37 | 47 | 97        | 107       |
//!
//! The activation sequence lists effects first (in the order above), then
//! the foreground, then the background, in a single `ESC[...m`.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Full reset sequence emitted when a styled region closes.
pub const RESET: &str = "\x1b[0m";

/// Terminal color.
///
/// Deserializes through [`FromStr`], so stylesheet mappings accept the same
/// names as shorthand strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(try_from = "String")]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

impl Color {
    pub const ALL: [Color; 16] = [
        Color::Black,
        Color::Red,
        Color::Green,
        Color::Yellow,
        Color::Blue,
        Color::Magenta,
        Color::Cyan,
        Color::White,
        Color::BrightBlack,
        Color::BrightRed,
        Color::BrightGreen,
        Color::BrightYellow,
        Color::BrightBlue,
        Color::BrightMagenta,
        Color::BrightCyan,
        Color::BrightWhite,
    ];

    /// Index of the color within its normal/bright half of the palette.
    fn offset(self) -> u8 {
        (self as u8) % 8
    }

    pub fn is_bright(self) -> bool {
        (self as u8) >= 8
    }

    /// SGR parameter selecting this color as foreground.
    pub fn fg_code(self) -> u8 {
        if self.is_bright() {
            90 + self.offset()
        } else {
            30 + self.offset()
        }
    }

    /// SGR parameter selecting this color as background.
    pub fn bg_code(self) -> u8 {
        self.fg_code() + 10
    }

    pub fn name(self) -> &'static str {
        match self {
            Color::Black => "black",
            Color::Red => "red",
            Color::Green => "green",
            Color::Yellow => "yellow",
            Color::Blue => "blue",
            Color::Magenta => "magenta",
            Color::Cyan => "cyan",
            Color::White => "white",
            Color::BrightBlack => "bright_black",
            Color::BrightRed => "bright_red",
            Color::BrightGreen => "bright_green",
            Color::BrightYellow => "bright_yellow",
            Color::BrightBlue => "bright_blue",
            Color::BrightMagenta => "bright_magenta",
            Color::BrightCyan => "bright_cyan",
            Color::BrightWhite => "bright_white",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Color {
    type Err = String;

    /// Parses a color name, case-insensitively. `gray`/`grey` mean `bright_black`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        if lower == "gray" || lower == "grey" {
            return Ok(Color::BrightBlack);
        }
        Color::ALL
            .into_iter()
            .find(|color| color.name() == lower)
            .ok_or_else(|| format!("Unknown color name: {}", s))
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        name.parse()
    }
}

/// Text effect applied on top of colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TextEffect {
    Bold,
    Dim,
    Italic,
    Underline,
    Blink,
    Reverse,
    Hidden,
    Strikethrough,
}

impl TextEffect {
    pub const ALL: [TextEffect; 8] = [
        TextEffect::Bold,
        TextEffect::Dim,
        TextEffect::Italic,
        TextEffect::Underline,
        TextEffect::Blink,
        TextEffect::Reverse,
        TextEffect::Hidden,
        TextEffect::Strikethrough,
    ];

    /// SGR parameter enabling this effect.
    pub fn code(self) -> u8 {
        match self {
            TextEffect::Bold => 1,
            TextEffect::Dim => 2,
            TextEffect::Italic => 3,
            TextEffect::Underline => 4,
            TextEffect::Blink => 5,
            TextEffect::Reverse => 7,
            TextEffect::Hidden => 8,
            TextEffect::Strikethrough => 9,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TextEffect::Bold => "bold",
            TextEffect::Dim => "dim",
            TextEffect::Italic => "italic",
            TextEffect::Underline => "underline",
            TextEffect::Blink => "blink",
            TextEffect::Reverse => "reverse",
            TextEffect::Hidden => "hidden",
            TextEffect::Strikethrough => "strikethrough",
        }
    }
}

impl fmt::Display for TextEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TextEffect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        TextEffect::ALL
            .into_iter()
            .find(|effect| effect.name() == lower)
            .ok_or_else(|| format!("Unknown text effect: {}", s))
    }
}

/// A rendering intent: colors plus a set of effects.
///
/// # Example
///
/// ```rust
/// use tagtint_markup::{Color, Style};
///
/// let alert = Style::new().fg(Color::White).bg(Color::Red).bold();
/// assert_eq!(alert.activation(), "\x1b[1;37;41m");
/// assert_eq!(Style::new().activation(), "");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Style {
    pub foreground: Option<Color>,
    pub background: Option<Color>,
    pub effects: BTreeSet<TextEffect>,
}

impl Style {
    /// Creates a style with no colors and no effects.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fg(mut self, color: Color) -> Self {
        self.foreground = Some(color);
        self
    }

    pub fn bg(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    /// Adds an effect. Adding one twice has no further effect.
    pub fn effect(mut self, effect: TextEffect) -> Self {
        self.effects.insert(effect);
        self
    }

    pub fn bold(self) -> Self {
        self.effect(TextEffect::Bold)
    }

    pub fn underline(self) -> Self {
        self.effect(TextEffect::Underline)
    }

    pub fn blink(self) -> Self {
        self.effect(TextEffect::Blink)
    }

    pub fn reverse(self) -> Self {
        self.effect(TextEffect::Reverse)
    }

    /// True when the style has nothing to encode.
    pub fn is_plain(&self) -> bool {
        self.foreground.is_none() && self.background.is_none() && self.effects.is_empty()
    }

    /// SGR parameters in encoding order.
    pub fn codes(&self) -> Vec<u8> {
        let mut codes: Vec<u8> = self.effects.iter().map(|e| e.code()).collect();
        codes.extend(self.foreground.map(Color::fg_code));
        codes.extend(self.background.map(Color::bg_code));
        codes
    }

    /// The escape sequence that turns this style on. Empty for a plain style.
    pub fn activation(&self) -> String {
        let codes = self.codes();
        if codes.is_empty() {
            return String::new();
        }
        let params: Vec<String> = codes.iter().map(u8::to_string).collect();
        format!("\x1b[{}m", params.join(";"))
    }

    /// Wraps `text` in this style's activation and a full reset.
    pub fn apply_to(&self, text: &str) -> String {
        if self.is_plain() {
            return text.to_string();
        }
        format!("{}{}{}", self.activation(), text, RESET)
    }
}
