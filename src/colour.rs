use crate::error::LabelError;
use std::str::FromStr;

/// A colour, expressed in RGB, CMYK or grey colour spaces
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Colour {
    /// DeviceRGB colour; r, g, b, range from 0.0 to 1.0
    RGB { r: f32, g: f32, b: f32 },
    /// DeviceCMYK colour; c, m, y, and k range from 0.0 to 1.0
    CMYK { c: f32, m: f32, y: f32, k: f32 },
    /// DeviceGray colour; g ranges from 0.0 to 1.0
    Grey { g: f32 },
}

impl Colour {
    /// Create a new colour in the RGB space. r, g, and b range from 0.0 to 1.0
    pub fn new_rgb(r: f32, g: f32, b: f32) -> Colour {
        Colour::RGB { r, g, b }
    }

    /// Create a new colour in the RGB space. r, g, and b range from 0 to 255
    pub fn new_rgb_bytes(r: u8, g: u8, b: u8) -> Colour {
        Colour::RGB {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Create a new colour in the Gray space, g ranges from 0.0 to 1.0
    pub fn new_grey(g: f32) -> Colour {
        Colour::Grey { g }
    }

    /// Parse a `#rrggbb` or `#rgb` hex string (the leading `#` is optional)
    pub fn from_hex(hex: &str) -> Result<Colour, LabelError> {
        let invalid = || LabelError::InvalidColour(hex.to_string());
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if !digits.is_ascii() {
            return Err(invalid());
        }

        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
        match digits.len() {
            6 => Ok(Colour::new_rgb_bytes(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            3 => {
                // #abc is shorthand for #aabbcc
                let r = channel(&digits[0..1])?;
                let g = channel(&digits[1..2])?;
                let b = channel(&digits[2..3])?;
                Ok(Colour::new_rgb_bytes(r * 17, g * 17, b * 17))
            }
            _ => Err(invalid()),
        }
    }

    /// Brighten every channel by `fraction` of itself (`c + c * fraction`),
    /// clamped to 1.0. CMYK colours lose ink instead.
    pub fn lighten(self, fraction: f32) -> Colour {
        let up = |v: f32| (v + v * fraction).min(1.0);
        let down = |v: f32| (v - v * fraction).max(0.0);
        match self {
            Colour::RGB { r, g, b } => Colour::RGB {
                r: up(r),
                g: up(g),
                b: up(b),
            },
            Colour::CMYK { c, m, y, k } => Colour::CMYK {
                c: down(c),
                m: down(m),
                y: down(y),
                k: down(k),
            },
            Colour::Grey { g } => Colour::Grey { g: up(g) },
        }
    }

    /// Scale every channel down by `fraction` (`c - c * fraction`), clamped to 0.0.
    /// CMYK colours gain ink instead.
    pub fn darken(self, fraction: f32) -> Colour {
        let up = |v: f32| (v + v * fraction).min(1.0);
        let down = |v: f32| (v - v * fraction).max(0.0);
        match self {
            Colour::RGB { r, g, b } => Colour::RGB {
                r: down(r),
                g: down(g),
                b: down(b),
            },
            Colour::CMYK { c, m, y, k } => Colour::CMYK {
                c: up(c),
                m: up(m),
                y: up(y),
                k: up(k),
            },
            Colour::Grey { g } => Colour::Grey { g: down(g) },
        }
    }
}

impl FromStr for Colour {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Colour::from_hex(s.trim())
    }
}

impl<T: Into<f32>> From<(T, T, T)> for Colour {
    fn from(c: (T, T, T)) -> Self {
        Colour::RGB {
            r: c.0.into(),
            g: c.1.into(),
            b: c.2.into(),
        }
    }
}

/// A list of pre-defined colour constants
pub mod colours {
    use super::*;

    pub const BLACK: Colour = Colour::Grey { g: 0.0 };
    pub const WHITE: Colour = Colour::Grey { g: 1.0 };
    /// Outline colour for resistor bodies and band edges
    pub const OUTLINE: Colour = Colour::Grey { g: 0.2 };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Colour, b: Colour) -> bool {
        match (a, b) {
            (Colour::RGB { r, g, b }, Colour::RGB { r: r2, g: g2, b: b2 }) => {
                (r - r2).abs() < 1e-4 && (g - g2).abs() < 1e-4 && (b - b2).abs() < 1e-4
            }
            _ => a == b,
        }
    }

    #[test]
    fn parses_long_and_short_hex() {
        let c: Colour = "#92cce3".parse().expect("valid hex");
        assert!(approx(c, Colour::new_rgb_bytes(0x92, 0xcc, 0xe3)));

        let short = Colour::from_hex("fff").expect("valid shorthand");
        assert!(approx(short, Colour::new_rgb(1.0, 1.0, 1.0)));
    }

    #[test]
    fn rejects_malformed_hex() {
        assert!(Colour::from_hex("#12345").is_err());
        assert!(Colour::from_hex("#gggggg").is_err());
        assert!(Colour::from_hex("#ééé").is_err());
        assert!(matches!(
            "blue".parse::<Colour>(),
            Err(LabelError::InvalidColour(s)) if s == "blue"
        ));
    }

    #[test]
    fn lighten_and_darken_clamp() {
        let c = Colour::new_rgb(0.5, 0.9, 0.0);
        assert!(approx(c.lighten(0.2), Colour::new_rgb(0.6, 1.0, 0.0)));
        assert!(approx(c.darken(0.2), Colour::new_rgb(0.4, 0.72, 0.0)));
        assert_eq!(colours::BLACK.lighten(0.5), colours::BLACK);
    }
}
