//! Fitting text into a fixed rectangular box.
//!
//! Laying out a label happens in stages:
//!
//! 1. a [Fitter] measures candidate lines against the box width, greedily
//!    [wraps](Fitter::wrap) words into lines and optionally
//!    [truncates](Fitter::truncate) lines that still overflow
//! 2. when no font size is given, [max_fitting_size] binary searches for the
//!    largest size whose lines fit both the width and the height of the box
//! 3. [compose] turns the final lines into positioned [PlacedLine]s according to
//!    the [LineStyle], and [draw_lines] issues them to a canvas
//!
//! Coordinates follow the canvas: origin at the bottom-left, y growing upwards.
//!
//! # Example
//!
//! ```
//! use pdf_labels::layout::{compose, max_fitting_size, Fitter, LayoutResult, LineStyle, SizeRange, TextBox};
//! use pdf_labels::{Canvas, Pt, RecordingCanvas, DEFAULT_FONT};
//!
//! let canvas = RecordingCanvas::new(Pt(120.0), Pt(40.0));
//! let bounds = TextBox::of(&canvas).expect("box has an area");
//! let fitter = Fitter::new(&canvas, DEFAULT_FONT, bounds);
//!
//! let fit = max_fitting_size(&fitter, "10k 1%", true, Pt(2.0), SizeRange::default());
//! assert!(fit.fits);
//!
//! let lines = fitter.wrap("10k 1%", fit.size);
//! let layout = LayoutResult::new(lines, fit.size, Pt(2.0));
//! let placed = compose(&fitter, &layout, &LineStyle::default());
//! assert_eq!(placed.len(), 1);
//! ```

mod autosize;
mod compose;
mod fit;

pub use autosize::*;
pub use compose::*;
pub use fit::*;

use crate::canvas::Canvas;
use crate::error::LabelError;
use crate::units::{In, Pt, POINTS_PER_INCH};

/// The size of the rectangle text is fitted into
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TextBox {
    pub width: Pt,
    pub height: Pt,
}

impl TextBox {
    /// Both sides must be positive and finite; anything else would leave the
    /// size search without a meaningful bound.
    pub fn new(width: Pt, height: Pt) -> Result<TextBox, LabelError> {
        if !width.is_positive() || !height.is_positive() {
            return Err(LabelError::DegenerateBox { width, height });
        }
        Ok(TextBox { width, height })
    }

    /// The box covering the whole canvas
    pub fn of<C: Canvas + ?Sized>(canvas: &C) -> Result<TextBox, LabelError> {
        TextBox::new(canvas.width(), canvas.height())
    }
}

/// Height of one line of text at `size` points, in box units.
pub fn line_height(size: Pt) -> Pt {
    Pt::from(In(size.0 / POINTS_PER_INCH))
}

/// Total height of `line_count` lines separated by `line_gap`:
/// `count * (line_height + gap) - gap`, or nothing for no lines.
pub fn block_height(line_count: usize, size: Pt, line_gap: Pt) -> Pt {
    if line_count == 0 {
        return Pt(0.0);
    }
    (line_height(size) + line_gap) * line_count as f32 - line_gap
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::RecordingCanvas;

    #[test]
    fn degenerate_boxes_fail_fast() {
        assert!(TextBox::new(Pt(10.0), Pt(10.0)).is_ok());
        for (w, h) in [(0.0, 10.0), (10.0, 0.0), (-1.0, 10.0), (f32::NAN, 1.0), (1.0, f32::INFINITY)] {
            assert!(
                matches!(TextBox::new(Pt(w), Pt(h)), Err(LabelError::DegenerateBox { .. })),
                "{w} x {h}"
            );
        }
        let canvas = RecordingCanvas::new(Pt(0.0), Pt(5.0));
        assert!(TextBox::of(&canvas).is_err());
    }

    #[test]
    fn line_height_is_the_point_size() {
        assert_eq!(line_height(Pt(12.0)), Pt(12.0));
        assert_eq!(line_height(Pt(72.0)), Pt(72.0));
    }

    #[test]
    fn block_height_counts_gaps_between_lines() {
        assert_eq!(block_height(0, Pt(10.0), Pt(2.0)), Pt(0.0));
        assert_eq!(block_height(1, Pt(10.0), Pt(2.0)), Pt(10.0));
        assert_eq!(block_height(3, Pt(10.0), Pt(2.0)), Pt(34.0));
    }
}
