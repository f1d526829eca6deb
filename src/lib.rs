//! Autosizing text labels and resistor value markings, rendered to PDF.
//!
//! Labels are built from [Element]s ([TextElement], [ResistorElement]) drawn
//! onto a [Canvas]. The text engine in [layout] finds the largest font size at
//! which text fits its box, wraps and truncates it, and positions the lines;
//! [encode] turns resistances into SMD and EIA-96 codes and colour bands.

mod canvas;
pub use canvas::*;

mod colour;
pub use colour::*;

mod document;
pub use document::*;

mod element;
pub use element::*;

pub mod encode;

mod font;
pub use font::*;

pub mod layout;

pub(crate) mod log;

mod page;
pub use page::*;

mod rect;
pub use rect::*;

pub(crate) mod refs;

mod resistor;
pub use resistor::*;

mod units;
pub use units::*;

mod error;
pub use error::*;

/// Re-export PDF-writer functionality
pub use pdf_writer;
