use super::Element;
use crate::canvas::{Canvas, StyleGuard};
use crate::colour::{colours, Colour};
use crate::encode::bands::{
    band_colour, generate_bands, is_representable, significant_digit_count, Band, BandRequirement,
};
use crate::error::{EncodeError, LabelError};
use crate::layout::TextBox;
use crate::log::{debug, info};
use crate::rect::Rect;
use crate::units::Pt;

/// Width of the body relative to its height
pub const BODY_ASPECT_RATIO: f32 = 3.2;

/// Common resistor body colours
pub mod body_colours {
    use crate::colour::Colour;

    pub const BLUE: Colour = Colour::RGB {
        r: 146.0 / 255.0,
        g: 204.0 / 255.0,
        b: 227.0 / 255.0,
    };
    pub const TAN: Colour = Colour::RGB {
        r: 223.0 / 255.0,
        g: 217.0 / 255.0,
        b: 149.0 / 255.0,
    };
    pub const GREEN: Colour = Colour::RGB {
        r: 138.0 / 255.0,
        g: 189.0 / 255.0,
        b: 94.0 / 255.0,
    };
    pub const BROWN: Colour = Colour::RGB {
        r: 155.0 / 255.0,
        g: 109.0 / 255.0,
        b: 77.0 / 255.0,
    };
    pub const GREY: Colour = Colour::RGB {
        r: 144.0 / 255.0,
        g: 144.0 / 255.0,
        b: 144.0 / 255.0,
    };
}

/// What to draw when the value needs more significant digits than the
/// bands provide
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum UnrepresentableBehavior {
    /// Draw nothing at all
    #[default]
    Skip,
    /// Draw the bare body crossed out
    DrawX,
}

const BAND_OUTLINE_WIDTH: Pt = Pt(0.3);
const BODY_OUTLINE_WIDTH: Pt = Pt(0.5);
const CROSS_WIDTH: Pt = Pt(0.75);
/// Centre and height of the shine on metallic bands, as fractions of the band height
const HIGHLIGHT_POSITION: f32 = 0.66;
const HIGHLIGHT_WIDTH: f32 = 0.2;
const METALLIC_SHADE: f32 = 0.2;

/// A through-hole resistor drawn with its colour bands
#[derive(Debug, Clone, PartialEq)]
pub struct ResistorElement {
    pub resistance: f64,
    pub body_colour: Colour,
    /// 3 to 6
    pub band_count: u8,
    pub tolerance: BandRequirement<f32>,
    pub temperature_coefficient: BandRequirement<u16>,
    pub unrepresentable: UnrepresentableBehavior,
}

impl ResistorElement {
    pub fn new(resistance: f64) -> ResistorElement {
        ResistorElement {
            resistance,
            body_colour: body_colours::BLUE,
            band_count: 5,
            tolerance: BandRequirement::Any,
            temperature_coefficient: BandRequirement::Any,
            unrepresentable: UnrepresentableBehavior::default(),
        }
    }

    pub fn with_body_colour(mut self, colour: Colour) -> ResistorElement {
        self.body_colour = colour;
        self
    }

    pub fn with_band_count(mut self, band_count: u8) -> ResistorElement {
        self.band_count = band_count;
        self
    }

    pub fn with_tolerance(mut self, tolerance: BandRequirement<f32>) -> ResistorElement {
        self.tolerance = tolerance;
        self
    }

    pub fn with_temperature_coefficient(mut self, tempco: BandRequirement<u16>) -> ResistorElement {
        self.temperature_coefficient = tempco;
        self
    }

    pub fn with_unrepresentable(mut self, behavior: UnrepresentableBehavior) -> ResistorElement {
        self.unrepresentable = behavior;
        self
    }

    /// The largest body with the right aspect ratio, centred in `bounds`
    pub fn body(&self, bounds: TextBox) -> Rect {
        let width = bounds.width.min(bounds.height * BODY_ASPECT_RATIO);
        let height = width / BODY_ASPECT_RATIO;
        Rect::from_origin_size(
            (bounds.width - width) / 2.0,
            (bounds.height - height) / 2.0,
            width,
            height,
        )
    }

    /// Left edges of `count` evenly spread bands, and the width of each band
    pub fn band_positions(body: Rect, count: usize) -> (Vec<Pt>, Pt) {
        let stripe = body.width() / 12.0;
        let working = body.width() - stripe * 3.0;
        let padding = if count > 1 {
            (working - stripe * count as f32) / (count - 1) as f32
        } else {
            Pt(0.0)
        };
        let positions = (0..count)
            .map(|i| body.x1 + stripe * 1.5 + (stripe + padding) * i as f32)
            .collect();
        (positions, stripe)
    }

    fn draw_band(canvas: &mut dyn Canvas, body: Rect, x: Pt, width: Pt, band: Band) -> Result<(), LabelError> {
        let band_rect = Rect::from_origin_size(x, body.y1, width, body.height());
        match band {
            Band::Wildcard => {
                canvas.set_fill_colour(colours::WHITE);
                canvas.fill_rect(band_rect);
                canvas.set_stroke_colour(colours::OUTLINE);
                canvas.set_line_width(BAND_OUTLINE_WIDTH);
                canvas.stroke_line((band_rect.x1, band_rect.y1), (band_rect.x2, band_rect.y2));
                canvas.stroke_line((band_rect.x2, band_rect.y1), (band_rect.x1, band_rect.y2));
            }
            Band::Colour(value) => {
                let entry = band_colour(value)
                    .ok_or(EncodeError::NoColourBand(value as i32))?;
                let colour = Colour::from_hex(entry.hex)?;
                if entry.metallic {
                    Self::draw_metallic(canvas, band_rect, colour);
                } else {
                    canvas.set_fill_colour(colour);
                    canvas.fill_rect(band_rect);
                }
            }
        }

        canvas.set_stroke_colour(colours::OUTLINE);
        canvas.set_line_width(BAND_OUTLINE_WIDTH);
        canvas.stroke_line((band_rect.x1, band_rect.y1), (band_rect.x1, band_rect.y2));
        canvas.stroke_line((band_rect.x2, band_rect.y1), (band_rect.x2, band_rect.y2));
        Ok(())
    }

    /// A darker band with a lighter strip two thirds of the way up
    fn draw_metallic(canvas: &mut dyn Canvas, band: Rect, colour: Colour) {
        let height = band.height();
        let clamp = |y: Pt| y.max(band.y1).min(band.y2);
        let start = clamp(band.y1 + height * (HIGHLIGHT_POSITION - HIGHLIGHT_WIDTH / 2.0));
        let end = clamp(band.y1 + height * (HIGHLIGHT_POSITION + HIGHLIGHT_WIDTH / 2.0));
        debug!(start = start.0, end = end.0, "metallic band highlight");

        let shade = colour.darken(METALLIC_SHADE);
        let sections = [
            (band.y1, start, shade),
            (start, end, colour.lighten(METALLIC_SHADE)),
            (end, band.y2, shade),
        ];
        for (bottom, top, fill) in sections {
            if top > bottom {
                canvas.set_fill_colour(fill);
                canvas.fill_rect(Rect {
                    x1: band.x1,
                    y1: bottom,
                    x2: band.x2,
                    y2: top,
                });
            }
        }
    }

    fn draw_cross(canvas: &mut dyn Canvas, body: Rect) {
        let offset = body.height() / 15.0;
        canvas.set_stroke_colour(colours::BLACK);
        canvas.set_line_width(CROSS_WIDTH);
        canvas.stroke_line((body.x1, body.y1 + offset), (body.x2, body.y2 - offset));
        canvas.stroke_line((body.x1, body.y2 - offset), (body.x2, body.y1 + offset));
    }

    fn outline(canvas: &mut dyn Canvas, body: Rect) {
        canvas.set_stroke_colour(colours::BLACK);
        canvas.set_line_width(BODY_OUTLINE_WIDTH);
        let corners = [
            (body.x1, body.y1),
            (body.x2, body.y1),
            (body.x2, body.y2),
            (body.x1, body.y2),
        ];
        for (&from, &to) in corners.iter().zip(corners.iter().cycle().skip(1)) {
            canvas.stroke_line(from, to);
        }
    }
}

impl Element for ResistorElement {
    fn render(&self, canvas: &mut dyn Canvas) -> Result<(), LabelError> {
        if !(3..=6).contains(&self.band_count) {
            return Err(EncodeError::UnsupportedBandCount(self.band_count).into());
        }
        let bounds = TextBox::of(&*canvas)?;

        let digits = significant_digit_count(self.band_count);
        let representable = is_representable(self.resistance, digits);
        if !representable && self.unrepresentable == UnrepresentableBehavior::Skip {
            info!(
                resistance = self.resistance,
                band_count = self.band_count,
                "value cannot be represented with this many bands, skipping"
            );
            return Ok(());
        }

        let body = self.body(bounds);
        debug!(width = body.width().0, height = body.height().0, "resistor body");

        let mut canvas = StyleGuard::new(canvas);
        canvas.set_fill_colour(self.body_colour);
        canvas.fill_rect(body);

        if representable {
            let bands = generate_bands(
                self.resistance,
                self.band_count,
                self.tolerance,
                self.temperature_coefficient,
            )?;
            let (positions, width) = Self::band_positions(body, bands.len());
            for (x, band) in positions.into_iter().zip(bands) {
                if let Some(band) = band {
                    Self::draw_band(&mut *canvas, body, x, width, band)?;
                }
            }
        } else {
            Self::draw_cross(&mut *canvas, body);
        }

        Self::outline(&mut *canvas, body);
        Ok(())
    }
}
