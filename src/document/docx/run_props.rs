//! Mapping between `w:rPr` and [`RunStyle`].

use crate::document::style::{ColorKind, Rgb, RunStyle};
use crate::document::xml::Element;

/// Reads the attributes of a run's `w:rPr`; a missing element yields the
/// plain style.
pub fn capture(properties: Option<&Element>) -> RunStyle {
    let Some(rpr) = properties else {
        return RunStyle::default();
    };

    let mut style = RunStyle {
        bold: rpr.child("w:b").map(toggle),
        italic: rpr.child("w:i").map(toggle),
        underline: rpr.child("w:u").map(|u| {
            u.attr("w:val").is_none_or(|val| val != "none")
        }),
        font_size: rpr
            .child("w:sz")
            .and_then(|sz| sz.attr("w:val"))
            .and_then(|val| val.parse::<f32>().ok())
            .map(|half_points| half_points / 2.0),
        font_name: rpr
            .child("w:rFonts")
            .and_then(|fonts| fonts.attr("w:ascii").or_else(|| fonts.attr("w:hAnsi")))
            .map(str::to_string),
        highlight: rpr
            .child("w:highlight")
            .and_then(|h| h.attr("w:val"))
            .map(str::to_string),
        shading_fill: rpr
            .child("w:shd")
            .and_then(|shd| shd.attr("w:fill"))
            .and_then(|fill| fill.parse().ok()),
        character_style_id: rpr
            .child("w:rStyle")
            .and_then(|s| s.attr("w:val"))
            .map(str::to_string),
        ..RunStyle::default()
    };

    if let Some(color) = rpr.child("w:color") {
        style.color = color.attr("w:val").and_then(|val| val.parse::<Rgb>().ok());
        style.color_kind = match color.attr("w:themeColor") {
            Some(theme) => ColorKind::Theme(theme.to_string()),
            None if style.color.is_some() => ColorKind::Explicit,
            None => ColorKind::Auto,
        };
    }

    style
}

/// `w:b`, `w:i` and friends are on unless `w:val` says otherwise.
fn toggle(el: &Element) -> bool {
    !matches!(el.attr("w:val"), Some("0" | "false" | "off"))
}

fn toggle_element(name: &str, on: bool) -> Element {
    let el = Element::new(name);
    if on { el } else { el.with_attr("w:val", "0") }
}

/// Builds a `w:rPr` in schema order, or `None` for a plain style.
pub fn render(style: &RunStyle) -> Option<Element> {
    let mut rpr = Element::new("w:rPr");

    if let Some(id) = &style.character_style_id {
        rpr = rpr.with_child(Element::new("w:rStyle").with_attr("w:val", id.as_str()));
    }
    if let Some(font) = &style.font_name {
        rpr = rpr.with_child(
            Element::new("w:rFonts")
                .with_attr("w:ascii", font.as_str())
                .with_attr("w:hAnsi", font.as_str()),
        );
    }
    if let Some(bold) = style.bold {
        rpr = rpr.with_child(toggle_element("w:b", bold));
    }
    if let Some(italic) = style.italic {
        rpr = rpr.with_child(toggle_element("w:i", italic));
    }
    if let Some(color) = render_color(style) {
        rpr = rpr.with_child(color);
    }
    if let Some(size) = style.font_size {
        let half_points = (size * 2.0).round() as u32;
        rpr = rpr.with_child(Element::new("w:sz").with_attr("w:val", half_points.to_string()));
    }
    if let Some(highlight) = &style.highlight {
        rpr = rpr.with_child(Element::new("w:highlight").with_attr("w:val", highlight.as_str()));
    }
    if let Some(underline) = style.underline {
        let val = if underline { "single" } else { "none" };
        rpr = rpr.with_child(Element::new("w:u").with_attr("w:val", val));
    }
    if let Some(fill) = style.shading_fill {
        rpr = rpr.with_child(
            Element::new("w:shd")
                .with_attr("w:val", "clear")
                .with_attr("w:color", "auto")
                .with_attr("w:fill", fill.to_string()),
        );
    }

    if rpr.children.is_empty() {
        None
    } else {
        Some(rpr)
    }
}

fn render_color(style: &RunStyle) -> Option<Element> {
    let val = style
        .color
        .map_or_else(|| "auto".to_string(), |rgb| rgb.to_string());
    let el = Element::new("w:color").with_attr("w:val", val);
    match &style.color_kind {
        ColorKind::Theme(theme) => Some(el.with_attr("w:themeColor", theme.as_str())),
        ColorKind::Auto => Some(Element::new("w:color").with_attr("w:val", "auto")),
        ColorKind::Explicit => Some(el),
        ColorKind::Unset => style.color.map(|_| el),
    }
}
