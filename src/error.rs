use crate::units::Pt;
use thiserror::Error;

/// All errors that rendering and document output can generate
#[derive(Error, Debug)]
pub enum LabelError {
    #[error(transparent)]
    /// An I/O error occurred
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse the font
    FaceParsingError(#[from] owned_ttf_parser::FaceParsingError),

    /// The drawing box has a zero, negative or non-finite side
    #[error("drawing box must have positive, finite dimensions (got {width} x {height})")]
    DegenerateBox { width: Pt, height: Pt },

    /// A fixed font size that is zero, negative or non-finite
    #[error("font size must be positive and finite (got {0})")]
    InvalidFontSize(Pt),

    /// The canvas does not know a font by this name
    #[error("font `{0}` is not available on this canvas")]
    UnknownFont(String),

    /// A colour string that is not `#rrggbb` / `#rgb` hex
    #[error("`{0}` is not a hex colour")]
    InvalidColour(String),

    /// A canvas was requested before any font was added to the document
    #[error("at least one font must be added before drawing")]
    NoFonts,

    /// An object was written before the object it points to was allocated
    #[error("no PDF object was allocated for the {0}")]
    MissingReference(&'static str),

    #[error(transparent)]
    /// A component value could not be encoded
    Encoding(#[from] EncodeError),
}

/// Errors produced while turning a physical value into digits and codes.
///
/// [EncodeError::NotInTable] and [EncodeError::BandOutOfRange] are the
/// recoverable "encoding not found" cases; the rest reject degenerate input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EncodeError {
    #[error("value must be finite and non-negative (got {0})")]
    InvalidValue(f64),

    #[error("cannot extract significant digits from a zero value")]
    ZeroValue,

    #[error("significant digit count must be between 1 and 15 (got {0})")]
    DigitCount(usize),

    #[error("EIA-96 code not found for significant value {0}")]
    NotInTable(u32),

    #[error("multiplier band {0} is outside the supported EIA-96 range")]
    BandOutOfRange(i32),

    #[error("exponent {0} cannot be marked with a single digit")]
    ExponentOutOfRange(i32),

    #[error("multiplier band {0} has no colour band")]
    NoColourBand(i32),

    #[error("resistors are marked with 3 to 6 colour bands (got {0})")]
    UnsupportedBandCount(u8),
}
