//! Things that can be drawn into a canvas region.

mod resistor;
mod text;

pub use resistor::*;
pub use text::*;

use crate::canvas::{Canvas, StyleGuard};
use crate::error::LabelError;
use crate::log::warn;

/// A drawable piece of a label.
///
/// Elements draw into the whole of the canvas they are given; positioning an
/// element on a page is done by handing it a canvas for the target region.
pub trait Element {
    fn render(&self, canvas: &mut dyn Canvas) -> Result<(), LabelError>;
}

/// The outcome of rendering a batch of elements
#[derive(Debug, Default)]
pub struct RenderReport {
    /// Number of elements that rendered without error
    pub rendered: usize,
    /// Index and error of every element that failed
    pub failures: Vec<(usize, LabelError)>,
}

impl RenderReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Count the result of rendering the element at `index`
    pub fn record(&mut self, index: usize, result: Result<(), LabelError>) {
        match result {
            Ok(()) => self.rendered += 1,
            Err(e) => {
                warn!(index, error = %e, "element failed to render, continuing");
                self.failures.push((index, e));
            }
        }
    }
}

/// Render every element onto the same canvas, in order.
///
/// A failing element does not stop the batch and cannot leak style state
/// into the elements after it.
pub fn render_each<'e, I>(canvas: &mut dyn Canvas, elements: I) -> RenderReport
where
    I: IntoIterator<Item = &'e dyn Element>,
{
    let mut report = RenderReport::default();
    for (index, element) in elements.into_iter().enumerate() {
        let mut guard = StyleGuard::new(&mut *canvas);
        let result = element.render(&mut *guard);
        drop(guard);
        report.record(index, result);
    }
    report
}
