//! Draw list types, in court coordinates (640x480, y down)

use crate::sim::Rect;

/// What a rectangle represents, so a backend can style it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RectKind {
    Paddle,
    Ball,
    /// Top/bottom boundary lines
    Boundary,
    /// Center net dash
    Net,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawRect {
    pub rect: Rect,
    pub kind: RectKind,
}

/// Horizontal anchoring of a text item's `x`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawText {
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub align: TextAlign,
}

/// Everything to draw for one frame, back to front
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub rects: Vec<DrawRect>,
    pub texts: Vec<DrawText>,
}

impl Frame {
    pub fn rect(&mut self, rect: Rect, kind: RectKind) {
        self.rects.push(DrawRect { rect, kind });
    }

    pub fn text(&mut self, x: f64, y: f64, text: impl Into<String>, align: TextAlign) {
        self.texts.push(DrawText {
            x,
            y,
            text: text.into(),
            align,
        });
    }

    /// True if any text item contains `needle`
    pub fn has_text(&self, needle: &str) -> bool {
        self.texts.iter().any(|t| t.text.contains(needle))
    }

    pub fn count(&self, kind: RectKind) -> usize {
        self.rects.iter().filter(|r| r.kind == kind).count()
    }
}
