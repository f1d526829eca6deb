//! Colour band codes for through-hole resistors.

use super::{normalize, significant_digits_and_band};
use crate::error::EncodeError;
use crate::log::debug;

/// One entry of the resistor colour code
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BandColour {
    /// The digit or multiplier exponent the colour stands for
    pub value: i8,
    pub name: &'static str,
    pub hex: &'static str,
    /// Gold and silver are drawn with a metallic shine
    pub metallic: bool,
    pub tolerance_percent: Option<f32>,
    /// Temperature coefficient in ppm/K
    pub temperature_coefficient: Option<u16>,
}

const fn band(
    value: i8,
    name: &'static str,
    hex: &'static str,
    metallic: bool,
    tolerance_percent: Option<f32>,
    temperature_coefficient: Option<u16>,
) -> BandColour {
    BandColour {
        value,
        name,
        hex,
        metallic,
        tolerance_percent,
        temperature_coefficient,
    }
}

/// The colour code, silver (-2) through white (9)
pub const BAND_COLOURS: [BandColour; 12] = [
    band(-2, "silver", "#C0C0C0", true, Some(10.0), None),
    band(-1, "gold", "#FFD700", true, Some(5.0), None),
    band(0, "black", "#000000", false, Some(20.0), Some(250)),
    band(1, "brown", "#964B00", false, Some(1.0), Some(100)),
    band(2, "red", "#FF3030", false, Some(2.0), Some(50)),
    band(3, "orange", "#FFA500", false, Some(3.0), Some(15)),
    band(4, "yellow", "#FFFF00", false, Some(4.0), Some(25)),
    band(5, "green", "#00FF00", false, Some(0.5), Some(20)),
    band(6, "blue", "#0000FF", false, Some(0.25), Some(10)),
    band(7, "violet", "#C520F6", false, Some(0.1), Some(5)),
    band(8, "grey", "#808080", false, Some(0.05), Some(1)),
    band(9, "white", "#FFFFFF", false, None, None),
];

/// Look up the colour for a band value in `-2..=9`
pub fn band_colour(value: i8) -> Option<&'static BandColour> {
    BAND_COLOURS.iter().find(|c| c.value == value)
}

/// What a tolerance or temperature coefficient band should show
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum BandRequirement<T> {
    /// Any value is acceptable; drawn as a wildcard band
    Any,
    /// No band at all
    Omit,
    /// The colour whose entry matches exactly; no band if none does
    Exactly(T),
}

/// A single position on the resistor body
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Band {
    Colour(i8),
    Wildcard,
}

/// Number of significant digit bands for a given total band count:
/// 3 and 4 band resistors carry two digits, 5 and 6 band resistors three.
pub fn significant_digit_count(band_count: u8) -> usize {
    if matches!(band_count, 3 | 4) {
        2
    } else {
        3
    }
}

/// Whether `count` significant digits hold `value` exactly
pub fn is_representable(value: f64, count: usize) -> bool {
    let Ok(form) = normalize(value) else {
        return false;
    };
    let shifted = form.mantissa * 10f64.powi(count as i32 - 1);
    (shifted - shifted.round()).abs() <= 1e-9 * shifted.max(1.0)
}

/// Find the band whose tolerance matches `percent`
pub fn tolerance_band(percent: f32) -> Option<i8> {
    BAND_COLOURS
        .iter()
        .find(|c| {
            c.tolerance_percent
                .is_some_and(|t| (t - percent).abs() <= f32::EPSILON * t.max(1.0))
        })
        .map(|c| c.value)
}

/// Find the band whose temperature coefficient matches `ppm`
pub fn temperature_band(ppm: u16) -> Option<i8> {
    BAND_COLOURS
        .iter()
        .find(|c| c.temperature_coefficient == Some(ppm))
        .map(|c| c.value)
}

fn resolve<T: Copy>(requirement: BandRequirement<T>, lookup: fn(T) -> Option<i8>) -> Option<Band> {
    match requirement {
        BandRequirement::Any => Some(Band::Wildcard),
        BandRequirement::Omit => None,
        BandRequirement::Exactly(v) => lookup(v).map(Band::Colour),
    }
}

/// Lay out the bands of a resistor from left to right.
///
/// The result is the significant digits, the multiplier, an empty slot on
/// 3 and 4 band resistors, the tolerance, and on 6 band resistors the
/// temperature coefficient. `None` marks a slot that stays unpainted.
/// A zero ohm resistor is a single black band in the middle of five slots.
pub fn generate_bands(
    value: f64,
    band_count: u8,
    tolerance: BandRequirement<f32>,
    temperature_coefficient: BandRequirement<u16>,
) -> Result<Vec<Option<Band>>, EncodeError> {
    if !(3..=6).contains(&band_count) {
        return Err(EncodeError::UnsupportedBandCount(band_count));
    }
    if value == 0.0 {
        return Ok(vec![None, None, Some(Band::Colour(0)), None, None]);
    }

    let (digits, multiplier) =
        significant_digits_and_band(value, significant_digit_count(band_count))?;
    let multiplier = i8::try_from(multiplier)
        .ok()
        .filter(|&m| band_colour(m).is_some())
        .ok_or(EncodeError::NoColourBand(multiplier))?;

    let mut bands: Vec<Option<Band>> = digits
        .into_iter()
        .map(|d| Some(Band::Colour(d as i8)))
        .collect();
    bands.push(Some(Band::Colour(multiplier)));

    if band_count <= 4 {
        bands.push(None);
    }
    bands.push(resolve(tolerance, tolerance_band));
    if band_count == 6 {
        bands.push(resolve(temperature_coefficient, temperature_band));
    }

    debug!(?bands, "generated resistor bands");
    Ok(bands)
}
