//! Value-to-code encoding for component markings.
//!
//! Every code starts from the same place: the physical value is normalized to
//! scientific form (`mantissa * 10^exponent`, mantissa in `[1, 10)`), then the
//! decimal point is shifted so the value reads as an N-digit integer times a
//! power of ten (the *multiplier band*).
//!
//! Two code families are built on top of that:
//!
//! - [`smd_3_digit_code`] / [`smd_4_digit_code`] round the mantissa
//! - [`eia96_code`] truncates the significant digits and looks them up in the
//!   EIA-96 preferred-value table
//!
//! The families use different rounding rules, so the same value can
//! produce digits that disagree between an SMD code and an EIA-96 code.
//!
//! # Example
//!
//! ```
//! use pdf_labels::encode::{eia96_code, smd_3_digit_code, significant_digits_and_band};
//!
//! assert_eq!(smd_3_digit_code(470.0).unwrap(), "472");
//! assert_eq!(eia96_code(100.0).unwrap(), "01A");
//! assert_eq!(significant_digits_and_band(4700.0, 2).unwrap(), (vec![4, 7], 2));
//! ```

pub mod bands;
mod eia96;
mod smd;

pub use bands::*;
pub use eia96::*;
pub use smd::*;

use crate::error::EncodeError;

/// The largest number of significant digits an `f64` carries faithfully
pub const MAX_SIGNIFICANT_DIGITS: usize = 15;

/// Relative slack added before truncating a shifted mantissa, so that binary
/// representation error (`101.99999999999999` for 102) doesn't drop a digit.
const REPRESENTATION_SLACK: f64 = 1e-9;

/// A value in scientific form: `mantissa * 10^exponent`
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct NormalizedForm {
    /// In `[1, 10)`, or exactly `0.0` for a zero value
    pub mantissa: f64,
    pub exponent: i32,
}

impl NormalizedForm {
    /// Multiply back out to the resistance
    pub fn value(&self) -> f64 {
        self.mantissa * 10f64.powi(self.exponent)
    }

    pub fn is_zero(&self) -> bool {
        self.mantissa == 0.0
    }
}

/// Normalize a physical value to scientific form.
///
/// Zero short-circuits to the degenerate form `0 * 10^0`; callers that go on
/// to extract digits must reject it themselves. Negative and non-finite values
/// are rejected here.
pub fn normalize(value: f64) -> Result<NormalizedForm, EncodeError> {
    if !value.is_finite() || value < 0.0 {
        return Err(EncodeError::InvalidValue(value));
    }
    if value == 0.0 {
        return Ok(NormalizedForm {
            mantissa: 0.0,
            exponent: 0,
        });
    }

    let mut mantissa = value;
    let mut exponent = 0;
    while mantissa >= 10.0 {
        mantissa /= 10.0;
        exponent += 1;
    }
    while mantissa < 1.0 {
        mantissa *= 10.0;
        exponent -= 1;
    }

    Ok(NormalizedForm { mantissa, exponent })
}

/// Split a value into `count` significant digits (most significant first) and
/// the multiplier band, such that `digits * 10^band` reconstructs the value.
///
/// Digits are truncated, not rounded: 4.99 with two digits is `[4, 9]`.
pub fn significant_digits_and_band(
    value: f64,
    count: usize,
) -> Result<(Vec<u8>, i32), EncodeError> {
    if count == 0 || count > MAX_SIGNIFICANT_DIGITS {
        return Err(EncodeError::DigitCount(count));
    }

    let form = normalize(value)?;
    if form.is_zero() {
        return Err(EncodeError::ZeroValue);
    }

    let shift = (count - 1) as i32;
    let shifted = form.mantissa * 10f64.powi(shift);
    let mut band = form.exponent - shift;

    let mut whole = (shifted + shifted * REPRESENTATION_SLACK).floor() as u64;
    if whole >= 10u64.pow(count as u32) {
        // the slack pushed 9.999.. over into an extra digit
        whole /= 10;
        band += 1;
    }

    let digits = (0..count)
        .map(|i| ((whole / 10u64.pow((count - i - 1) as u32)) % 10) as u8)
        .collect();

    Ok((digits, band))
}

/// Join digits into the integer they spell out, `[1, 0, 2]` => `102`
pub fn digits_to_integer(digits: &[u8]) -> u64 {
    digits.iter().fold(0, |acc, &d| acc * 10 + d as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_bounds_mantissa_and_reconstructs() {
        for value in [1.0, 4.7, 10.0, 470.0, 0.0033, 12_345.678, 9.999_999, 1e12, 2.2e-9] {
            let form = normalize(value).expect("positive value");
            assert!(
                (1.0..10.0).contains(&form.mantissa),
                "{value}: mantissa {} out of range",
                form.mantissa
            );
            let rebuilt = form.value();
            assert!(
                ((rebuilt - value) / value).abs() < 1e-12,
                "{value} rebuilt as {rebuilt}"
            );
        }
    }

    #[test]
    fn normalize_zero_is_degenerate() {
        let form = normalize(0.0).expect("zero is allowed");
        assert!(form.is_zero());
        assert_eq!(form.exponent, 0);
    }

    #[test]
    fn normalize_rejects_negative_and_non_finite() {
        assert_eq!(normalize(-1.0), Err(EncodeError::InvalidValue(-1.0)));
        assert!(normalize(f64::NAN).is_err());
        assert!(normalize(f64::INFINITY).is_err());
    }

    #[test]
    fn digits_and_band() {
        assert_eq!(significant_digits_and_band(100.0, 3), Ok((vec![1, 0, 0], 0)));
        assert_eq!(significant_digits_and_band(4700.0, 2), Ok((vec![4, 7], 2)));
        assert_eq!(significant_digits_and_band(0.47, 2), Ok((vec![4, 7], -2)));
        assert_eq!(significant_digits_and_band(10_200.0, 3), Ok((vec![1, 0, 2], 2)));
    }

    #[test]
    fn digits_truncate_rather_than_round() {
        assert_eq!(significant_digits_and_band(4.99, 2), Ok((vec![4, 9], -1)));
        assert_eq!(significant_digits_and_band(1_999.0, 3), Ok((vec![1, 9, 9], 1)));
    }

    #[test]
    fn zero_and_bad_counts_are_rejected() {
        assert_eq!(significant_digits_and_band(0.0, 3), Err(EncodeError::ZeroValue));
        assert_eq!(significant_digits_and_band(1.0, 0), Err(EncodeError::DigitCount(0)));
        assert_eq!(significant_digits_and_band(1.0, 16), Err(EncodeError::DigitCount(16)));
    }

    #[test]
    fn joins_digits() {
        assert_eq!(digits_to_integer(&[1, 0, 2]), 102);
        assert_eq!(digits_to_integer(&[0, 4]), 4);
        assert_eq!(digits_to_integer(&[]), 0);
    }
}
