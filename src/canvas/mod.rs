//! The drawing surface that labels are rendered onto.
//!
//! A [Canvas] is a rectangular region with its origin at the bottom-left
//! corner (the PDF convention), y growing upwards. It exposes string
//! measurement, a small amount of style state, and the drawing primitives
//! elements need.
//!
//! Two implementations ship with the crate:
//!
//! - [PageCanvas](crate::PageCanvas) draws into a region of a PDF [Page](crate::Page)
//! - [RecordingCanvas] measures with fixed advances and records draw calls, which
//!   makes layouts reproducible without any font files

mod recording;

pub use recording::*;

use crate::colour::Colour;
use crate::error::LabelError;
use crate::rect::Rect;
use crate::units::Pt;
use std::ops::{Deref, DerefMut};

pub trait Canvas {
    /// Width of the drawable region
    fn width(&self) -> Pt;

    /// Height of the drawable region
    fn height(&self) -> Pt;

    /// The name of the current font
    fn font_name(&self) -> &str;

    /// The current fill colour
    fn fill_colour(&self) -> Colour;

    /// Measure the advance width of `text` in the named font at `size`. Must be
    /// deterministic and must not touch the style state. Names the canvas doesn't
    /// know are measured with its default font.
    fn measure_width(&self, text: &str, font_name: &str, size: Pt) -> Pt;

    fn set_font(&mut self, name: &str) -> Result<(), LabelError>;

    fn set_font_size(&mut self, size: Pt);

    fn set_fill_colour(&mut self, colour: Colour);

    fn set_stroke_colour(&mut self, colour: Colour);

    fn set_line_width(&mut self, width: Pt);

    /// Draw `text` with its baseline starting at `(x, y)`
    fn draw_string(&mut self, x: Pt, y: Pt, text: &str);

    fn fill_rect(&mut self, rect: Rect);

    fn stroke_line(&mut self, from: (Pt, Pt), to: (Pt, Pt));

    /// Push the current style state (font, size, colours, line width)
    fn save_style_state(&mut self);

    /// Pop the style state pushed by the matching [Canvas::save_style_state]
    fn restore_style_state(&mut self);
}

/// Saves the canvas style state on creation and restores it when dropped, so
/// the state is restored on every exit path including early returns.
///
/// Derefs to the canvas so drawing goes through the guard.
pub struct StyleGuard<'c, C: Canvas + ?Sized> {
    canvas: &'c mut C,
}

impl<'c, C: Canvas + ?Sized> StyleGuard<'c, C> {
    pub fn new(canvas: &'c mut C) -> Self {
        canvas.save_style_state();
        StyleGuard { canvas }
    }
}

impl<C: Canvas + ?Sized> Deref for StyleGuard<'_, C> {
    type Target = C;

    fn deref(&self) -> &C {
        self.canvas
    }
}

impl<C: Canvas + ?Sized> DerefMut for StyleGuard<'_, C> {
    fn deref_mut(&mut self) -> &mut C {
        self.canvas
    }
}

impl<C: Canvas + ?Sized> Drop for StyleGuard<'_, C> {
    fn drop(&mut self) {
        self.canvas.restore_style_state();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colour::colours;

    fn fails_midway(canvas: &mut dyn Canvas) -> Result<(), LabelError> {
        let mut canvas = StyleGuard::new(canvas);
        canvas.set_fill_colour(colours::WHITE);
        canvas.set_stroke_colour(colours::OUTLINE);
        canvas.set_font("no such font")?;
        canvas.draw_string(Pt(0.0), Pt(0.0), "unreachable");
        Ok(())
    }

    #[test]
    fn guard_restores_on_early_return() {
        let mut canvas = RecordingCanvas::new(Pt(100.0), Pt(20.0));
        let before = canvas.fill_colour();

        assert!(fails_midway(&mut canvas).is_err());
        assert_eq!(canvas.style_depth(), 0);
        assert_eq!(canvas.fill_colour(), before);
        assert_eq!(canvas.stroke_colour(), colours::BLACK);
        assert!(canvas.calls().is_empty());
    }

    #[test]
    fn guards_nest() {
        let mut canvas = RecordingCanvas::new(Pt(100.0), Pt(20.0));
        {
            let mut outer = StyleGuard::new(&mut canvas);
            outer.set_font_size(Pt(30.0));
            {
                let mut inner = StyleGuard::new(&mut *outer);
                inner.set_font_size(Pt(5.0));
                assert_eq!(inner.style_depth(), 2);
            }
            assert_eq!(outer.style_depth(), 1);
            assert_eq!(outer.font_size(), Pt(30.0));
        }
        assert_eq!(canvas.style_depth(), 0);
    }
}
