use super::normalize;
use crate::error::EncodeError;

/// Round the mantissa of `value` to `digits` significant digits and return
/// them as an integer alongside the exponent. A mantissa that rounds up to 10
/// (e.g. 9.96 with two digits) carries into the exponent.
fn rounded_significand(value: f64, digits: u32) -> Result<(u32, i32), EncodeError> {
    let form = normalize(value)?;
    if form.is_zero() {
        return Err(EncodeError::ZeroValue);
    }

    let mut whole = (form.mantissa * 10f64.powi(digits as i32 - 1)).round() as u32;
    let mut exponent = form.exponent;
    if whole >= 10u32.pow(digits) {
        whole /= 10;
        exponent += 1;
    }
    Ok((whole, exponent))
}

fn exponent_digit(exponent: i32) -> Result<char, EncodeError> {
    u32::try_from(exponent)
        .ok()
        .and_then(|e| char::from_digit(e, 10))
        .ok_or(EncodeError::ExponentOutOfRange(exponent))
}

fn marking(value: f64, digits: u32) -> Result<String, EncodeError> {
    let (whole, exponent) = rounded_significand(value, digits)?;
    let exponent = exponent_digit(exponent)?;
    Ok(format!("{whole:0width$}{exponent}", width = digits as usize))
}

/// Three character SMD marking: the mantissa rounded to two significant
/// digits followed by the decimal exponent, so 470 (4.7e2) is `"472"`.
///
/// Values whose exponent is not a single digit (below 1 or at least 1e10)
/// can't be marked and return [EncodeError::ExponentOutOfRange].
pub fn smd_3_digit_code(value: f64) -> Result<String, EncodeError> {
    marking(value, 2)
}

/// Four character SMD marking: the mantissa rounded to three significant
/// digits followed by the decimal exponent, so 470 is `"4702"` and 10.2k is
/// `"1024"`.
pub fn smd_4_digit_code(value: f64) -> Result<String, EncodeError> {
    marking(value, 3)
}
