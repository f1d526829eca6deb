use super::{digits_to_integer, significant_digits_and_band};
use crate::error::EncodeError;
use crate::log::debug;

/// Multiplier band to EIA-96 letter, ordered by band
pub const MULTIPLIER_TABLE: [(i32, char); 9] = [
    (-3, 'Z'),
    (-2, 'Y'),
    (-1, 'X'),
    (0, 'A'),
    (1, 'B'),
    (2, 'C'),
    (3, 'D'),
    (4, 'E'),
    (5, 'F'),
];

/// The E96 preferred values (three significant digits) and their two digit
/// EIA-96 codes, ordered by value
#[rustfmt::skip]
pub const EIA96_TABLE: [(u16, &str); 96] = [
    (100, "01"), (102, "02"), (105, "03"), (107, "04"), (110, "05"), (113, "06"),
    (115, "07"), (118, "08"), (121, "09"), (124, "10"), (127, "11"), (130, "12"),
    (133, "13"), (137, "14"), (140, "15"), (143, "16"), (147, "17"), (150, "18"),
    (154, "19"), (158, "20"), (162, "21"), (165, "22"), (169, "23"), (174, "24"),
    (178, "25"), (182, "26"), (187, "27"), (191, "28"), (196, "29"), (200, "30"),
    (205, "31"), (210, "32"), (215, "33"), (221, "34"), (226, "35"), (232, "36"),
    (237, "37"), (243, "38"), (249, "39"), (255, "40"), (261, "41"), (267, "42"),
    (274, "43"), (280, "44"), (287, "45"), (294, "46"), (301, "47"), (309, "48"),
    (316, "49"), (324, "50"), (332, "51"), (340, "52"), (348, "53"), (357, "54"),
    (365, "55"), (374, "56"), (383, "57"), (392, "58"), (402, "59"), (412, "60"),
    (422, "61"), (432, "62"), (442, "63"), (453, "64"), (464, "65"), (475, "66"),
    (487, "67"), (499, "68"), (511, "69"), (523, "70"), (536, "71"), (549, "72"),
    (562, "73"), (576, "74"), (590, "75"), (604, "76"), (619, "77"), (634, "78"),
    (649, "79"), (665, "80"), (681, "81"), (698, "82"), (715, "83"), (732, "84"),
    (750, "85"), (768, "86"), (787, "87"), (806, "88"), (825, "89"), (845, "90"),
    (866, "91"), (887, "92"), (909, "93"), (931, "94"), (953, "95"), (976, "96"),
];

/// The letter for a multiplier band, if the band is one EIA-96 can express
pub fn multiplier_letter(band: i32) -> Option<char> {
    MULTIPLIER_TABLE
        .iter()
        .find(|&&(b, _)| b == band)
        .map(|&(_, letter)| letter)
}

/// The inclusive range of multiplier bands covered by [MULTIPLIER_TABLE]
pub fn multiplier_range() -> (i32, i32) {
    let bands = MULTIPLIER_TABLE.iter().map(|&(band, _)| band);
    let min = bands.clone().min().unwrap_or_default();
    let max = bands.max().unwrap_or_default();
    (min, max)
}

/// The two digit code for a three digit E96 significant value
pub fn eia96_digits(significant: u32) -> Option<&'static str> {
    EIA96_TABLE
        .binary_search_by_key(&significant, |&(value, _)| value as u32)
        .ok()
        .map(|index| EIA96_TABLE[index].1)
}

/// EIA-96 marking: the two digit code for the value's three significant digits
/// followed by the multiplier letter, so 100Ω is `"01A"` and 10.2kΩ is `"02C"`.
///
/// The significant digits are truncated (not rounded) and must be an E96
/// preferred value, otherwise [EncodeError::NotInTable]. Multiplier bands
/// outside `-3..=5` give [EncodeError::BandOutOfRange].
pub fn eia96_code(value: f64) -> Result<String, EncodeError> {
    let (digits, band) = significant_digits_and_band(value, 3)?;
    let significant = digits_to_integer(&digits) as u32;
    debug!(significant, band, "EIA-96 lookup");

    let code = eia96_digits(significant).ok_or(EncodeError::NotInTable(significant))?;

    let (min, max) = multiplier_range();
    if !(min..=max).contains(&band) {
        return Err(EncodeError::BandOutOfRange(band));
    }
    let letter = multiplier_letter(band).ok_or(EncodeError::BandOutOfRange(band))?;

    Ok(format!("{code}{letter}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_sorted_and_numbered_in_order() {
        assert!(EIA96_TABLE.windows(2).all(|w| w[0].0 < w[1].0));
        for (i, &(_, code)) in EIA96_TABLE.iter().enumerate() {
            assert_eq!(code, format!("{:02}", i + 1));
        }
    }

    #[test]
    fn known_codes() {
        assert_eq!(eia96_code(100.0).unwrap(), "01A");
        assert_eq!(eia96_code(10_200.0).unwrap(), "02C");
        assert_eq!(eia96_code(49.9).unwrap(), "68X");
        assert_eq!(eia96_code(976_000.0).unwrap(), "96D");
        assert_eq!(eia96_code(0.1).unwrap(), "01Z");
    }

    #[test]
    fn values_outside_the_series_are_not_found() {
        assert_eq!(eia96_code(103.0), Err(EncodeError::NotInTable(103)));
        assert_eq!(eia96_code(4_700.0), Err(EncodeError::NotInTable(470)));
    }

    #[test]
    fn bands_outside_the_table_are_rejected() {
        assert_eq!(eia96_code(1e9), Err(EncodeError::BandOutOfRange(7)));
        assert_eq!(eia96_code(0.01), Err(EncodeError::BandOutOfRange(-4)));
    }

    #[test]
    fn zero_is_rejected() {
        assert_eq!(eia96_code(0.0), Err(EncodeError::ZeroValue));
    }

    #[test]
    fn multiplier_lookups() {
        assert_eq!(multiplier_range(), (-3, 5));
        assert_eq!(multiplier_letter(0), Some('A'));
        assert_eq!(multiplier_letter(-3), Some('Z'));
        assert_eq!(multiplier_letter(6), None);
    }
}
