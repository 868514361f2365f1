//! Image decoding and print-resolution resampling.

use std::path::Path;

use image::imageops::FilterType;
use image::RgbaImage;

use crate::error::{ProxyError, Result};
use crate::layout::GridGeometry;

const MM_PER_INCH: f64 = 25.4;

/// Pixels needed to print `mm` millimetres at `dpi`, never less than one.
pub fn target_pixels(mm: f64, dpi: u32) -> u32 {
    let px = (mm / MM_PER_INCH * f64::from(dpi)).round();
    (px as u32).max(1)
}

/// Decodes source images and resamples them to the cell's print size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImagePreparer {
    pub width_px: u32,
    pub height_px: u32,
}

impl ImagePreparer {
    pub fn new(width_px: u32, height_px: u32) -> Self {
        Self {
            width_px: width_px.max(1),
            height_px: height_px.max(1),
        }
    }

    /// Size resampled images for one cell of `grid` at `dpi`.
    pub fn for_grid(grid: &GridGeometry, dpi: u32) -> Self {
        Self::new(
            target_pixels(grid.cell_width, dpi),
            target_pixels(grid.cell_height, dpi),
        )
    }

    /// Decode `path` and resample it to exactly the target size.
    ///
    /// Uses a Lanczos filter so downscaled scans keep sharp edges without
    /// aliasing.
    pub fn prepare(&self, path: &Path) -> Result<RgbaImage> {
        let source = image::open(path).map_err(|e| ProxyError::Image {
            path: path.to_path_buf(),
            message: format!("Failed to decode image: {}", e),
        })?;

        if source.width() == self.width_px && source.height() == self.height_px {
            return Ok(source.to_rgba8());
        }

        let resized = source.resize_exact(self.width_px, self.height_px, FilterType::Lanczos3);
        Ok(resized.to_rgba8())
    }
}
