use crate::element::TextElement;
use crate::encode::{eia96_code, smd_3_digit_code, smd_4_digit_code};
use crate::error::EncodeError;
use crate::log::warn;

/// The SMD marking standards a resistor value can be printed in
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MarkingScheme {
    Smd3,
    Smd4,
    Eia96,
}

impl MarkingScheme {
    /// Encode `resistance` in this scheme
    pub fn encode(self, resistance: f64) -> Result<String, EncodeError> {
        match self {
            MarkingScheme::Smd3 => smd_3_digit_code(resistance),
            MarkingScheme::Smd4 => smd_4_digit_code(resistance),
            MarkingScheme::Eia96 => eia96_code(resistance),
        }
    }
}

/// A resistor, identified by its resistance in ohms
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Resistor {
    pub resistance: f64,
}

impl Resistor {
    pub const NAME: &'static str = "Resistor";
    pub const UNIT: &'static str = "\u{2126}";

    pub fn new(resistance: f64) -> Resistor {
        Resistor { resistance }
    }

    /// The marking in `scheme`, or an empty string when the value has none
    pub fn marking(&self, scheme: MarkingScheme) -> String {
        scheme.encode(self.resistance).unwrap_or_else(|e| {
            warn!(resistance = self.resistance, ?scheme, error = %e, "no marking for resistor");
            String::new()
        })
    }

    pub fn smd_3_digit_code(&self) -> String {
        self.marking(MarkingScheme::Smd3)
    }

    pub fn smd_4_digit_code(&self) -> String {
        self.marking(MarkingScheme::Smd4)
    }

    pub fn eia96_code(&self) -> String {
        self.marking(MarkingScheme::Eia96)
    }

    /// A text element showing the marking in `scheme`
    pub fn marking_label(&self, scheme: MarkingScheme) -> TextElement {
        TextElement::new(self.marking(scheme)).with_wrap(false)
    }
}
