use super::TextBox;
use crate::canvas::Canvas;
use crate::log::debug;
use crate::units::Pt;

/// Measures lines of text in one font against the width of a [TextBox].
///
/// The fitter only reads from the canvas: the font and size are passed to
/// every measurement, so repeated calls at the same size always agree.
pub struct Fitter<'a, C: Canvas + ?Sized> {
    canvas: &'a C,
    font_name: &'a str,
    bounds: TextBox,
}

impl<'a, C: Canvas + ?Sized> Fitter<'a, C> {
    pub fn new(canvas: &'a C, font_name: &'a str, bounds: TextBox) -> Self {
        Fitter {
            canvas,
            font_name,
            bounds,
        }
    }

    pub fn bounds(&self) -> TextBox {
        self.bounds
    }

    pub fn font_name(&self) -> &str {
        self.font_name
    }

    pub fn measure(&self, line: &str, size: Pt) -> Pt {
        self.canvas.measure_width(line, self.font_name, size)
    }

    pub fn fits_width(&self, line: &str, size: Pt) -> bool {
        self.measure(line, size) <= self.bounds.width
    }

    /// Greedily wrap words onto lines no wider than the box.
    ///
    /// Words are split on whitespace and re-joined with single spaces. A word
    /// that is wider than the box on its own is kept whole on its own line.
    /// Empty (or all-whitespace) text produces no lines.
    pub fn wrap(&self, text: &str, size: Pt) -> Vec<String> {
        debug!(size = size.0, "wrapping text");
        let mut lines = Vec::new();
        let mut current = String::new();

        for word in text.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{current} {word}")
            };

            if self.fits_width(&candidate, size) {
                current = candidate;
            } else {
                if !current.is_empty() {
                    lines.push(current);
                }
                current = word.to_string();
            }
        }

        if !current.is_empty() {
            lines.push(current);
        }
        lines
    }

    /// Drop trailing characters from every line that is wider than the box.
    /// No ellipsis is added; a line may end up empty.
    pub fn truncate(&self, lines: Vec<String>, size: Pt) -> Vec<String> {
        lines
            .into_iter()
            .map(|mut line| {
                while !line.is_empty() && !self.fits_width(&line, size) {
                    line.pop();
                }
                line
            })
            .collect()
    }

    /// The candidate lines for `text`: wrapped, or the whole text as one line
    pub fn lines(&self, text: &str, size: Pt, wrap: bool) -> Vec<String> {
        if wrap {
            self.wrap(text, size)
        } else {
            vec![text.to_string()]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{RecordingCanvas, DEFAULT_FONT};

    // at 10pt every character of the default font is 5pt wide, so a 50pt box
    // holds exactly 10 characters
    const SIZE: Pt = Pt(10.0);

    fn canvas() -> RecordingCanvas {
        RecordingCanvas::new(Pt(50.0), Pt(100.0))
    }

    fn fitter(canvas: &RecordingCanvas) -> Fitter<'_, RecordingCanvas> {
        Fitter::new(canvas, DEFAULT_FONT, TextBox::of(canvas).unwrap())
    }

    #[test]
    fn exact_width_fits() {
        let canvas = canvas();
        let fitter = fitter(&canvas);
        assert!(fitter.fits_width("0123456789", SIZE));
        assert!(!fitter.fits_width("0123456789A", SIZE));
    }

    #[test]
    fn wraps_greedily_in_word_order() {
        let canvas = canvas();
        let lines = fitter(&canvas).wrap("the quick brown fox jumps over", SIZE);
        assert_eq!(lines, vec!["the quick", "brown fox", "jumps over"]);
    }

    #[test]
    fn collapses_whitespace() {
        let canvas = canvas();
        let lines = fitter(&canvas).wrap("  a\t\tb \n c  ", SIZE);
        assert_eq!(lines, vec!["a b c"]);
    }

    #[test]
    fn long_word_stays_whole_on_its_own_line() {
        let canvas = canvas();
        let fitter = fitter(&canvas);
        let lines = fitter.wrap("ab supercalifragilistic cd", SIZE);
        assert_eq!(lines, vec!["ab", "supercalifragilistic", "cd"]);

        for line in &lines {
            assert!(fitter.fits_width(line, SIZE) || !line.contains(' '));
        }
    }

    #[test]
    fn empty_text_has_no_lines() {
        let canvas = canvas();
        assert!(fitter(&canvas).wrap("", SIZE).is_empty());
        assert!(fitter(&canvas).wrap("   ", SIZE).is_empty());
        assert_eq!(fitter(&canvas).lines("", SIZE, false), vec![""]);
    }

    #[test]
    fn truncation_drops_tail_characters() {
        let canvas = canvas();
        let fitter = fitter(&canvas);
        let lines = fitter.truncate(
            vec!["short".into(), "much too long a line".into(), String::new()],
            SIZE,
        );
        assert_eq!(lines, vec!["short", "much too l", ""]);
    }

    #[test]
    fn wrap_then_truncate_always_fits() {
        let canvas = canvas();
        let fitter = fitter(&canvas);
        let text = lipsum::lipsum(60);
        for size in [4.0, 10.0, 25.0, 80.0] {
            let size = Pt(size);
            let lines = fitter.truncate(fitter.wrap(&text, size), size);
            assert!(lines
                .iter()
                .all(|line| line.is_empty() || fitter.fits_width(line, size)));
        }
    }

    #[test]
    fn unwrapped_text_is_a_single_line() {
        let canvas = canvas();
        let lines = fitter(&canvas).lines("one two three four", SIZE, false);
        assert_eq!(lines, vec!["one two three four"]);
    }
}
