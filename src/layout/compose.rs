use super::{block_height, line_height, Fitter};
use crate::canvas::Canvas;
use crate::log::debug;
use crate::units::Pt;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum HorizontalAlign {
    Left,
    #[default]
    Center,
    Right,
}

impl HorizontalAlign {
    /// Offset of content `content` wide from the left edge of a span `available` wide
    pub fn offset(self, content: Pt, available: Pt) -> Pt {
        match self {
            HorizontalAlign::Left => Pt(0.0),
            HorizontalAlign::Center => (available - content) / 2.0,
            HorizontalAlign::Right => available - content,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum VerticalAlign {
    Top,
    #[default]
    Center,
    Bottom,
}

impl VerticalAlign {
    /// Offset of the bottom of content `content` tall from the bottom edge of a
    /// span `available` tall
    pub fn offset(self, content: Pt, available: Pt) -> Pt {
        match self {
            VerticalAlign::Top => available - content,
            VerticalAlign::Center => (available - content) / 2.0,
            VerticalAlign::Bottom => Pt(0.0),
        }
    }
}

/// How a block of lines is positioned inside its box
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LineStyle {
    /// Extra space between consecutive lines
    pub line_gap: Pt,
    /// Fraction of the font size reserved below the last baseline for descenders
    pub descender_spacer: f32,
    pub horizontal_align: HorizontalAlign,
    pub vertical_align: VerticalAlign,
    /// Cut overflowing lines short, and stop placing lines once the box is full
    pub auto_truncate: bool,
}

impl Default for LineStyle {
    fn default() -> Self {
        LineStyle {
            line_gap: Pt(2.0),
            descender_spacer: 0.25,
            horizontal_align: HorizontalAlign::default(),
            vertical_align: VerticalAlign::default(),
            auto_truncate: true,
        }
    }
}

/// The lines of a label at their final font size
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutResult {
    pub lines: Vec<String>,
    pub font_size: Pt,
    pub block_height: Pt,
}

impl LayoutResult {
    pub fn new(lines: Vec<String>, font_size: Pt, line_gap: Pt) -> LayoutResult {
        let block_height = block_height(lines.len(), font_size, line_gap);
        LayoutResult {
            lines,
            font_size,
            block_height,
        }
    }
}

/// A line of text and the baseline position it is drawn at
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub x: Pt,
    pub y: Pt,
}

/// Position the lines of `layout` in the fitter's box.
///
/// The block is aligned vertically, then lifted by the descender reserve
/// (`font_size * descender_spacer`) because a baseline sits above the visual
/// bottom of its glyphs. Lines are placed top to bottom, each aligned
/// horizontally on its own measured width. With `auto_truncate` set, placement
/// stops at the first line that would cross the bottom edge of the box.
pub fn compose<C: Canvas + ?Sized>(
    fitter: &Fitter<'_, C>,
    layout: &LayoutResult,
    style: &LineStyle,
) -> Vec<PlacedLine> {
    let bounds = fitter.bounds();
    let size = layout.font_size;
    let advance = line_height(size);

    let mut y = style.vertical_align.offset(layout.block_height, bounds.height)
        + layout.block_height
        + size * style.descender_spacer;

    let mut placed = Vec::with_capacity(layout.lines.len());
    for line in layout.lines.iter() {
        if style.auto_truncate && y - advance < Pt(0.0) {
            debug!(dropped = layout.lines.len() - placed.len(), "out of vertical space");
            break;
        }

        let width = fitter.measure(line, size);
        let x = style.horizontal_align.offset(width, bounds.width);
        y -= advance;
        placed.push(PlacedLine {
            text: line.clone(),
            x,
            y,
        });
        y -= style.line_gap;
    }
    placed
}

/// Issue one draw call per placed line, in order
pub fn draw_lines<C: Canvas + ?Sized>(canvas: &mut C, lines: &[PlacedLine]) {
    for line in lines {
        debug!(text = line.text.as_str(), x = line.x.0, y = line.y.0, "drawing line");
        canvas.draw_string(line.x, line.y, &line.text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{RecordingCanvas, DEFAULT_FONT};
    use crate::layout::TextBox;

    fn placed(width: f32, height: f32, lines: &[&str], size: f32, style: LineStyle) -> Vec<PlacedLine> {
        let canvas = RecordingCanvas::new(Pt(width), Pt(height));
        let fitter = Fitter::new(&canvas, DEFAULT_FONT, TextBox::of(&canvas).unwrap());
        let layout = LayoutResult::new(
            lines.iter().map(|l| l.to_string()).collect(),
            Pt(size),
            style.line_gap,
        );
        compose(&fitter, &layout, &style)
    }

    #[test]
    fn alignment_offsets() {
        assert_eq!(HorizontalAlign::Left.offset(Pt(10.0), Pt(50.0)), Pt(0.0));
        assert_eq!(HorizontalAlign::Center.offset(Pt(10.0), Pt(50.0)), Pt(20.0));
        assert_eq!(HorizontalAlign::Right.offset(Pt(10.0), Pt(50.0)), Pt(40.0));
        assert_eq!(VerticalAlign::Top.offset(Pt(10.0), Pt(50.0)), Pt(40.0));
        assert_eq!(VerticalAlign::Center.offset(Pt(10.0), Pt(50.0)), Pt(20.0));
        assert_eq!(VerticalAlign::Bottom.offset(Pt(10.0), Pt(50.0)), Pt(0.0));
    }

    #[test]
    fn bottom_aligned_baseline_sits_on_the_descender_reserve() {
        let style = LineStyle {
            vertical_align: VerticalAlign::Bottom,
            horizontal_align: HorizontalAlign::Left,
            ..LineStyle::default()
        };
        let lines = placed(100.0, 40.0, &["hi"], 20.0, style);
        assert_eq!(lines.len(), 1);
        // 5pt above the bottom edge, i.e. H - 5 measured from the top
        assert_eq!(lines[0].y, Pt(5.0));
        assert_eq!(Pt(40.0) - lines[0].y, Pt(40.0) - Pt(20.0) * 0.25);
        assert_eq!(lines[0].x, Pt(0.0));
    }

    #[test]
    fn lines_step_down_by_height_and_gap() {
        let style = LineStyle {
            vertical_align: VerticalAlign::Top,
            horizontal_align: HorizontalAlign::Right,
            ..LineStyle::default()
        };
        let lines = placed(100.0, 100.0, &["abcd", "ab"], 10.0, style);
        // block is 22pt tall at the top of the box, lifted 2.5pt
        assert_eq!(lines[0].y, Pt(92.5));
        assert_eq!(lines[1].y, Pt(80.5));
        assert_eq!(lines[0].x, Pt(80.0));
        assert_eq!(lines[1].x, Pt(90.0));
    }

    #[test]
    fn centered_block() {
        let lines = placed(100.0, 50.0, &["abcd"], 10.0, LineStyle::default());
        assert_eq!(lines[0].x, Pt(40.0));
        // (50 - 10) / 2 + 10 + 2.5 - 10
        assert_eq!(lines[0].y, Pt(22.5));
    }

    #[test]
    fn stops_placing_lines_when_out_of_space() {
        let style = LineStyle {
            vertical_align: VerticalAlign::Top,
            ..LineStyle::default()
        };
        let lines = placed(100.0, 25.0, &["one", "two", "three"], 10.0, style);
        let texts: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["one", "two"]);
    }

    #[test]
    fn overflow_kept_without_truncation() {
        let style = LineStyle {
            vertical_align: VerticalAlign::Top,
            auto_truncate: false,
            ..LineStyle::default()
        };
        let lines = placed(100.0, 25.0, &["one", "two", "three"], 10.0, style);
        assert_eq!(lines.len(), 3);
        assert!(lines[2].y < Pt(0.0));
    }

    #[test]
    fn draws_in_order() {
        let mut canvas = RecordingCanvas::new(Pt(10.0), Pt(10.0));
        draw_lines(
            &mut canvas,
            &[
                PlacedLine { text: "a".into(), x: Pt(1.0), y: Pt(2.0) },
                PlacedLine { text: "b".into(), x: Pt(3.0), y: Pt(4.0) },
            ],
        );
        assert_eq!(
            canvas.texts(),
            vec![(Pt(1.0), Pt(2.0), "a"), (Pt(3.0), Pt(4.0), "b")]
        );
    }
}
