//! Character-level formatting captured from a run.

use std::fmt;
use std::str::FromStr;

use crate::error::StyleApplicationError;

/// Highlight names a word processor accepts for `w:highlight`.
pub const HIGHLIGHT_COLORS: &[&str] = &[
    "black",
    "blue",
    "cyan",
    "green",
    "magenta",
    "red",
    "yellow",
    "white",
    "darkBlue",
    "darkCyan",
    "darkGreen",
    "darkMagenta",
    "darkRed",
    "darkYellow",
    "darkGray",
    "lightGray",
    "none",
];

/// Largest font size a document can carry, in points.
const MAX_FONT_SIZE: f32 = 1638.0;

/// A 24-bit RGB color written as six hex digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    pub const BLACK: Self = Self([0, 0, 0]);
}

impl FromStr for Rgb {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().trim_start_matches('#');
        if s.len() != 6 || !s.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(format!("'{s}' is not a six-digit hex color"));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&s[i..i + 2], 16).map_err(|e| format!("'{s}': {e}"))
        };
        Ok(Self([channel(0)?, channel(2)?, channel(4)?]))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "{r:02X}{g:02X}{b:02X}")
    }
}

/// How a run's font color is expressed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ColorKind {
    /// No color element at all; the run inherits.
    #[default]
    Unset,
    /// Fixed RGB value.
    Explicit,
    /// The "automatic" color, usually black on white.
    Auto,
    /// Bound to a theme slot such as `accent1`.
    Theme(String),
}

/// Formatting attributes of one run.
///
/// Tri-state fields use `None` for "inherit", which is different from
/// `Some(false)` ("explicitly off").
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunStyle {
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<bool>,
    pub color: Option<Rgb>,
    pub color_kind: ColorKind,
    /// Size in points.
    pub font_size: Option<f32>,
    pub font_name: Option<String>,
    /// A name from [`HIGHLIGHT_COLORS`].
    pub highlight: Option<String>,
    pub shading_fill: Option<Rgb>,
    pub character_style_id: Option<String>,
}

impl RunStyle {
    pub fn is_plain(&self) -> bool {
        *self == Self::default()
    }

    /// Returns a copy holding only attributes that can be written back,
    /// together with one error per attribute that had to be dropped.
    pub fn sanitized(&self) -> (Self, Vec<StyleApplicationError>) {
        let mut style = self.clone();
        let mut errors = Vec::new();

        if let Some(size) = style.font_size
            && !(size.is_finite() && size > 0.0 && size <= MAX_FONT_SIZE)
        {
            errors.push(StyleApplicationError::new(
                "font_size",
                format!("{size} is not a valid point size"),
            ));
            style.font_size = None;
        }

        if let Some(name) = &style.font_name
            && name.trim().is_empty()
        {
            errors.push(StyleApplicationError::new("font_name", "empty font name"));
            style.font_name = None;
        }

        if let Some(highlight) = &style.highlight
            && !HIGHLIGHT_COLORS.contains(&highlight.as_str())
        {
            errors.push(StyleApplicationError::new(
                "highlight",
                format!("unknown highlight color '{highlight}'"),
            ));
            style.highlight = None;
        }

        if let Some(id) = &style.character_style_id
            && (id.is_empty() || id.chars().any(char::is_whitespace))
        {
            errors.push(StyleApplicationError::new(
                "character_style_id",
                format!("'{id}' is not a style identifier"),
            ));
            style.character_style_id = None;
        }

        if let ColorKind::Theme(name) = &style.color_kind
            && name.trim().is_empty()
        {
            errors.push(StyleApplicationError::new("color", "empty theme color name"));
            style.color_kind = if style.color.is_some() {
                ColorKind::Explicit
            } else {
                ColorKind::Unset
            };
        }

        (style, errors)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_parse_and_display() {
        let rgb: Rgb = "1f4e79".parse().unwrap();
        assert_eq!(rgb, Rgb([0x1F, 0x4E, 0x79]));
        assert_eq!(rgb.to_string(), "1F4E79");
        assert_eq!("#FF0000".parse::<Rgb>().unwrap(), Rgb([255, 0, 0]));
    }

    #[test]
    fn test_rgb_rejects_garbage() {
        assert!("auto".parse::<Rgb>().is_err());
        assert!("12345".parse::<Rgb>().is_err());
        assert!("GG0000".parse::<Rgb>().is_err());
    }

    #[test]
    fn test_default_style_is_plain() {
        assert!(RunStyle::default().is_plain());
        let bold = RunStyle {
            bold: Some(false),
            ..RunStyle::default()
        };
        assert!(!bold.is_plain());
    }

    #[test]
    fn test_sanitized_keeps_valid_attributes() {
        let style = RunStyle {
            bold: Some(true),
            font_size: Some(11.5),
            font_name: Some("Calibri".to_string()),
            highlight: Some("yellow".to_string()),
            character_style_id: Some("Strong".to_string()),
            ..RunStyle::default()
        };
        let (clean, errors) = style.sanitized();
        assert!(errors.is_empty());
        assert_eq!(clean, style);
    }

    #[test]
    fn test_sanitized_drops_only_invalid_attributes() {
        let style = RunStyle {
            italic: Some(true),
            font_size: Some(f32::NAN),
            highlight: Some("orange".to_string()),
            ..RunStyle::default()
        };
        let (clean, errors) = style.sanitized();

        assert_eq!(clean.italic, Some(true));
        assert_eq!(clean.font_size, None);
        assert_eq!(clean.highlight, None);
        let attributes: Vec<_> = errors.iter().map(|e| e.attribute).collect();
        assert_eq!(attributes, vec!["font_size", "highlight"]);
    }
}
