//! Grid geometry derived from a [`SheetConfig`].

use crate::config::SheetConfig;
use crate::error::{ProxyError, Result};

use super::Cursor;

/// A rectangle on the page in millimetres, origin at the bottom-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Fixed cell grid for one page size.
///
/// Computed once per run; every page uses the same grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    pub page_width: f64,
    pub page_height: f64,
    pub cell_width: f64,
    pub cell_height: f64,
    pub margin: f64,
    pub padding: f64,
    pub columns: u32,
    pub rows: u32,
}

impl GridGeometry {
    /// Compute the grid, failing when not even one cell fits on a page.
    pub fn new(config: &SheetConfig) -> Result<Self> {
        config.validate()?;

        let columns = fit_count(
            config.page_width_mm,
            config.margin_mm,
            config.cell_width_mm,
            config.padding_mm,
        );
        let rows = fit_count(
            config.page_height_mm,
            config.margin_mm,
            config.cell_height_mm,
            config.padding_mm,
        );

        if columns == 0 || rows == 0 {
            return Err(ProxyError::Config {
                message: format!(
                    "a {}x{} mm cell does not fit on a {}x{} mm page with {} mm margins",
                    config.cell_width_mm,
                    config.cell_height_mm,
                    config.page_width_mm,
                    config.page_height_mm,
                    config.margin_mm
                ),
                help: Some("Reduce the cell size or margins".to_string()),
            });
        }

        if columns.checked_mul(rows).is_none() {
            return Err(ProxyError::Config {
                message: format!("a {}x{} grid has too many cells per page", columns, rows),
                help: Some("Increase the cell size".to_string()),
            });
        }

        Ok(Self {
            page_width: config.page_width_mm,
            page_height: config.page_height_mm,
            cell_width: config.cell_width_mm,
            cell_height: config.cell_height_mm,
            margin: config.margin_mm,
            padding: config.padding_mm,
            columns,
            rows,
        })
    }

    /// Number of cells on one page. Never overflows for a grid built by [`GridGeometry::new`].
    pub fn per_page(&self) -> u32 {
        self.columns * self.rows
    }

    /// Bottom-left corner of the top-left cell.
    pub fn origin(&self) -> (f64, f64) {
        (self.margin, self.page_height - self.margin - self.cell_height)
    }

    /// Rectangle covered by the cell under `cursor`.
    pub fn cell_rect(&self, cursor: &Cursor) -> Rect {
        Rect {
            x: cursor.x,
            y: cursor.y,
            width: self.cell_width,
            height: self.cell_height,
        }
    }
}

/// `floor((page - 2*margin + padding) / (cell + padding))`, clamped at zero.
fn fit_count(page: f64, margin: f64, cell: f64, padding: f64) -> u32 {
    let available = page - 2.0 * margin + padding;
    if available <= 0.0 {
        return 0;
    }
    (available / (cell + padding)).floor() as u32
}
