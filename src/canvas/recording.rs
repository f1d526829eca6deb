use super::Canvas;
use crate::colour::{colours, Colour};
use crate::error::LabelError;
use crate::rect::Rect;
use crate::units::Pt;
use std::cell::Cell;

/// Name of the font every [RecordingCanvas] starts with
pub const DEFAULT_FONT: &str = "Fixed";

/// Advance of every character in [DEFAULT_FONT], as a fraction of the font size
pub const DEFAULT_ADVANCE: f32 = 0.5;

/// A drawing operation captured by a [RecordingCanvas]
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Text {
        x: Pt,
        y: Pt,
        text: String,
        font: String,
        size: Pt,
        colour: Colour,
    },
    Rect {
        rect: Rect,
        colour: Colour,
    },
    Line {
        from: (Pt, Pt),
        to: (Pt, Pt),
        colour: Colour,
        width: Pt,
    },
}

#[derive(Debug, Clone, PartialEq)]
struct Style {
    font: String,
    size: Pt,
    fill: Colour,
    stroke: Colour,
    line_width: Pt,
}

/// A canvas with monospaced metrics that records what is drawn on it.
///
/// Every character of a font is `advance * size` wide, so layouts can be
/// worked out by hand.
#[derive(Debug, Clone)]
pub struct RecordingCanvas {
    width: Pt,
    height: Pt,
    fonts: Vec<(String, f32)>,
    style: Style,
    stack: Vec<Style>,
    calls: Vec<DrawCall>,
    measurements: Cell<usize>,
}

impl RecordingCanvas {
    /// A canvas of the given size that knows only [DEFAULT_FONT]
    pub fn new(width: Pt, height: Pt) -> RecordingCanvas {
        RecordingCanvas {
            width,
            height,
            fonts: vec![(DEFAULT_FONT.to_string(), DEFAULT_ADVANCE)],
            style: Style {
                font: DEFAULT_FONT.to_string(),
                size: Pt(12.0),
                fill: colours::BLACK,
                stroke: colours::BLACK,
                line_width: Pt(1.0),
            },
            stack: Vec::new(),
            calls: Vec::new(),
            measurements: Cell::new(0),
        }
    }

    /// Register another font whose characters are `advance * size` wide
    pub fn with_font<S: ToString>(mut self, name: S, advance: f32) -> RecordingCanvas {
        self.fonts.push((name.to_string(), advance));
        self
    }

    fn advance(&self, font_name: &str) -> f32 {
        self.fonts
            .iter()
            .find(|(name, _)| name == font_name)
            .or_else(|| self.fonts.first())
            .map(|&(_, advance)| advance)
            .unwrap_or(DEFAULT_ADVANCE)
    }

    pub fn font_size(&self) -> Pt {
        self.style.size
    }

    pub fn stroke_colour(&self) -> Colour {
        self.style.stroke
    }

    /// Number of unmatched [Canvas::save_style_state] calls
    pub fn style_depth(&self) -> usize {
        self.stack.len()
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// The text draw calls as `(x, y, text)`
    pub fn texts(&self) -> Vec<(Pt, Pt, &str)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Text { x, y, text, .. } => Some((*x, *y, text.as_str())),
                _ => None,
            })
            .collect()
    }

    /// How many times [Canvas::measure_width] has been called
    pub fn measurements(&self) -> usize {
        self.measurements.get()
    }
}

impl Canvas for RecordingCanvas {
    fn width(&self) -> Pt {
        self.width
    }

    fn height(&self) -> Pt {
        self.height
    }

    fn font_name(&self) -> &str {
        &self.style.font
    }

    fn fill_colour(&self) -> Colour {
        self.style.fill
    }

    fn measure_width(&self, text: &str, font_name: &str, size: Pt) -> Pt {
        self.measurements.set(self.measurements.get() + 1);
        size * (self.advance(font_name) * text.chars().count() as f32)
    }

    fn set_font(&mut self, name: &str) -> Result<(), LabelError> {
        if !self.fonts.iter().any(|(n, _)| n == name) {
            return Err(LabelError::UnknownFont(name.to_string()));
        }
        self.style.font = name.to_string();
        Ok(())
    }

    fn set_font_size(&mut self, size: Pt) {
        self.style.size = size;
    }

    fn set_fill_colour(&mut self, colour: Colour) {
        self.style.fill = colour;
    }

    fn set_stroke_colour(&mut self, colour: Colour) {
        self.style.stroke = colour;
    }

    fn set_line_width(&mut self, width: Pt) {
        self.style.line_width = width;
    }

    fn draw_string(&mut self, x: Pt, y: Pt, text: &str) {
        self.calls.push(DrawCall::Text {
            x,
            y,
            text: text.to_string(),
            font: self.style.font.clone(),
            size: self.style.size,
            colour: self.style.fill,
        });
    }

    fn fill_rect(&mut self, rect: Rect) {
        self.calls.push(DrawCall::Rect {
            rect,
            colour: self.style.fill,
        });
    }

    fn stroke_line(&mut self, from: (Pt, Pt), to: (Pt, Pt)) {
        self.calls.push(DrawCall::Line {
            from,
            to,
            colour: self.style.stroke,
            width: self.style.line_width,
        });
    }

    fn save_style_state(&mut self) {
        self.stack.push(self.style.clone());
    }

    fn restore_style_state(&mut self) {
        if let Some(style) = self.stack.pop() {
            self.style = style;
        }
    }
}
