//! Text labels: alignment mapping and width estimation.

use super::node::{Node, Text, TextAnchor};

/// Which side of the anchor point the text extends to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HAlign {
    /// Text ends at the point.
    Left,
    Center,
    /// Text starts at the point.
    Right,
}

/// Which side of the anchor point the text sits on vertically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VAlign {
    /// Baseline on the point, text above it.
    Top,
    Center,
    /// Text hangs below the point.
    Bottom,
}

impl HAlign {
    pub fn anchor(self) -> TextAnchor {
        match self {
            HAlign::Left => TextAnchor::End,
            HAlign::Center => TextAnchor::Middle,
            HAlign::Right => TextAnchor::Start,
        }
    }
}

impl VAlign {
    pub fn dy_em(self) -> Option<f64> {
        match self {
            VAlign::Top => None,
            VAlign::Center => Some(0.32),
            VAlign::Bottom => Some(1.0),
        }
    }
}

/// Build a text node anchored at `(x, y)`.
pub fn label(
    x: f64,
    y: f64,
    size: f64,
    halign: HAlign,
    valign: VAlign,
    class: Option<&str>,
    content: impl Into<String>,
) -> Node {
    Node::Text(Text {
        class: class.map(str::to_string),
        x,
        y,
        size,
        anchor: halign.anchor(),
        dy_em: valign.dy_em(),
        content: content.into(),
    })
}

/// Heuristic: estimate pixel width of text (no font metrics at layout time).
pub fn estimate_text_width_px(text: &str, font_px: f64) -> f64 {
    text.chars().count() as f64 * font_px * 0.60
}

/// Pick the first candidate whose estimated width fits `max_px`, else the last one.
pub fn first_fitting<'a>(candidates: &[&'a str], font_px: f64, max_px: f64) -> &'a str {
    candidates
        .iter()
        .copied()
        .find(|c| estimate_text_width_px(c, font_px) <= max_px)
        .or_else(|| candidates.last().copied())
        .unwrap_or("")
}
