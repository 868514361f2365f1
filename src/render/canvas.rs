//! Drawing surface used by the sheet builder.

use std::path::Path;

use image::RgbaImage;

use crate::error::Result;
use crate::layout::Rect;
use crate::types::Colour;

/// A paginated surface the sheet builder draws cells onto.
///
/// Rectangles are in millimetres with the origin at the bottom-left of the
/// page. Images are keyed by their source path so repeated copies can reuse
/// data the canvas already holds.
pub trait SheetCanvas {
    /// Fill `rect` with a flat colour.
    fn fill_rect(&mut self, rect: Rect, colour: Colour) -> Result<()>;

    /// Draw `image` scaled into `rect`, preserving its aspect ratio.
    fn draw_image(&mut self, key: &Path, image: &RgbaImage, rect: Rect) -> Result<()>;

    /// Whether an image was already drawn under `key`.
    fn has_image(&self, key: &Path) -> bool;

    /// Draw a previously drawn image again.
    fn draw_cached(&mut self, key: &Path, rect: Rect) -> Result<()>;

    /// End the current page. The next drawing call starts a new one.
    fn page_break(&mut self) -> Result<()>;
}
