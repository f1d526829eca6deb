use super::Element;
use crate::canvas::{Canvas, StyleGuard};
use crate::colour::Colour;
use crate::error::LabelError;
use crate::layout::{
    compose, draw_lines, max_fitting_size, Fitter, HorizontalAlign, LayoutResult, LineStyle,
    SizeRange, TextBox, VerticalAlign,
};
use crate::log::{debug, warn};
use crate::units::Pt;

/// How the font size of a [TextElement] is chosen
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub enum FontSize {
    /// No size given; the largest fitting size is used
    #[default]
    Unset,
    /// Search for the largest fitting size
    Auto,
    /// Use exactly this size
    Fixed(Pt),
}

/// A block of text fitted into the canvas it is rendered on
#[derive(Debug, Clone, PartialEq)]
pub struct TextElement {
    pub text: String,
    pub wrap: bool,
    pub font_size: FontSize,
    /// Falls back to the canvas fill colour
    pub font_colour: Option<Colour>,
    /// Falls back to the canvas font
    pub font_name: Option<String>,
    pub size_range: SizeRange,
    pub style: LineStyle,
}

impl TextElement {
    pub fn new<S: ToString>(text: S) -> TextElement {
        TextElement {
            text: text.to_string(),
            wrap: true,
            font_size: FontSize::default(),
            font_colour: None,
            font_name: None,
            size_range: SizeRange::default(),
            style: LineStyle::default(),
        }
    }

    pub fn with_wrap(mut self, wrap: bool) -> TextElement {
        self.wrap = wrap;
        self
    }

    pub fn with_font_size(mut self, font_size: FontSize) -> TextElement {
        self.font_size = font_size;
        self
    }

    pub fn with_font_colour(mut self, colour: Colour) -> TextElement {
        self.font_colour = Some(colour);
        self
    }

    /// Set the font colour from a `#rrggbb` or `#rgb` string
    pub fn with_font_colour_hex(self, hex: &str) -> Result<TextElement, LabelError> {
        Ok(self.with_font_colour(Colour::from_hex(hex)?))
    }

    pub fn with_font<S: ToString>(mut self, name: S) -> TextElement {
        self.font_name = Some(name.to_string());
        self
    }

    pub fn with_size_range(mut self, range: SizeRange) -> TextElement {
        self.size_range = range;
        self
    }

    pub fn with_style(mut self, style: LineStyle) -> TextElement {
        self.style = style;
        self
    }

    pub fn with_alignment(mut self, horizontal: HorizontalAlign, vertical: VerticalAlign) -> TextElement {
        self.style.horizontal_align = horizontal;
        self.style.vertical_align = vertical;
        self
    }

    /// Work out the font size and final lines of this text in `bounds`
    pub fn layout<C: Canvas + ?Sized>(
        &self,
        canvas: &C,
        font_name: &str,
        bounds: TextBox,
    ) -> Result<LayoutResult, LabelError> {
        let fitter = Fitter::new(canvas, font_name, bounds);

        let size = match self.font_size {
            FontSize::Fixed(size) => {
                if !size.is_positive() {
                    return Err(LabelError::InvalidFontSize(size));
                }
                size
            }
            FontSize::Unset | FontSize::Auto => {
                let fit = max_fitting_size(
                    &fitter,
                    &self.text,
                    self.wrap,
                    self.style.line_gap,
                    self.size_range,
                );
                if !fit.fits {
                    warn!(size = fit.size.0, "drawing text that overflows its box");
                }
                fit.size
            }
        };

        let mut lines = fitter.lines(&self.text, size, self.wrap);
        if self.style.auto_truncate {
            lines = fitter.truncate(lines, size);
        }
        debug!(size = size.0, lines = lines.len(), "laid out text");
        Ok(LayoutResult::new(lines, size, self.style.line_gap))
    }
}

impl Element for TextElement {
    fn render(&self, canvas: &mut dyn Canvas) -> Result<(), LabelError> {
        let bounds = TextBox::of(&*canvas)?;
        let mut canvas = StyleGuard::new(canvas);

        let font_name = match &self.font_name {
            Some(name) => name.clone(),
            None => canvas.font_name().to_string(),
        };
        canvas.set_font(&font_name)?;
        if let Some(colour) = self.font_colour {
            canvas.set_fill_colour(colour);
        }

        let layout = self.layout(&*canvas, &font_name, bounds)?;
        let placed = compose(&Fitter::new(&*canvas, &font_name, bounds), &layout, &self.style);

        canvas.set_font_size(layout.font_size);
        draw_lines(&mut *canvas, &placed);
        Ok(())
    }
}
