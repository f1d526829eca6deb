use super::{block_height, Fitter};
use crate::canvas::Canvas;
use crate::log::{debug, warn};
use crate::units::Pt;

/// Inclusive range of whole point sizes searched when autosizing
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SizeRange {
    pub min: u16,
    pub max: u16,
}

impl Default for SizeRange {
    fn default() -> Self {
        SizeRange { min: 1, max: 200 }
    }
}

/// The outcome of a size search
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SizeFit {
    pub size: Pt,
    /// `false` when not even the minimum size fit; `size` is then the minimum
    pub fits: bool,
}

/// Binary search for the largest whole font size at which `text` fits the
/// fitter's box.
///
/// A size fits when every candidate line (wrapped if `wrap` is set, otherwise
/// the text as one line) is no wider than the box and the lines stacked with
/// `line_gap` between them are no taller than it. Takes `O(log(max - min))`
/// rounds of measurement.
///
/// When nothing in the range fits, the minimum is returned with
/// [SizeFit::fits] unset; callers that need a guaranteed fit must check it.
pub fn max_fitting_size<C: Canvas + ?Sized>(
    fitter: &Fitter<'_, C>,
    text: &str,
    wrap: bool,
    line_gap: Pt,
    range: SizeRange,
) -> SizeFit {
    let floor = range.min.max(1);
    let mut low = floor as i32;
    let mut high = range.max as i32;
    let mut best: Option<i32> = None;

    while low <= high {
        let mid = low + (high - low) / 2;
        let size = Pt(mid as f32);
        let lines = fitter.lines(text, size, wrap);

        let fits_width = lines.iter().all(|line| fitter.fits_width(line, size));
        let fits_height = block_height(lines.len(), size, line_gap) <= fitter.bounds().height;
        debug!(size = mid, lines = lines.len(), fits_width, fits_height, "trying font size");

        if fits_width && fits_height {
            best = Some(mid);
            low = mid + 1;
        } else {
            high = mid - 1;
        }
    }

    match best {
        Some(size) => {
            debug!(size, "largest fitting font size");
            SizeFit {
                size: Pt(size as f32),
                fits: true,
            }
        }
        None => {
            warn!(min = floor, text, "text does not fit even at the minimum font size");
            SizeFit {
                size: Pt(floor as f32),
                fits: false,
            }
        }
    }
}
