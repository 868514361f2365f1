//! Rendering module for proxysheet.
//!
//! Images are prepared at print resolution, placed by the [`SheetBuilder`]
//! onto a [`SheetCanvas`], and written out as PDF by [`PdfWriter`].

mod canvas;
mod pdf;
mod prepare;
mod sheet;

pub use canvas::SheetCanvas;
pub use pdf::{fit_within, mm_to_pt, PdfWriter};
pub use prepare::{target_pixels, ImagePreparer};
pub use sheet::{PlacementOutcome, RunSummary, SheetBuilder};
