//! Proxy sheet builder.
//!
//! Walks the placement list in order, drawing each image into the next free
//! grid cell and breaking pages as the grid fills. Per-image problems are
//! recorded as outcomes and never abort the run.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::SheetConfig;
use crate::error::Result;
use crate::layout::{Cursor, GridGeometry, Rect};
use crate::output::Printer;
use crate::types::Colour;

use super::{ImagePreparer, SheetCanvas};

/// What happened to one entry of the placement list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PlacementOutcome {
    Placed {
        path: PathBuf,
        page: u32,
        row: u32,
        column: u32,
    },
    /// The file does not exist. No cell is consumed.
    Skipped { path: PathBuf },
    /// Decoding, resampling or drawing failed. No cell is consumed.
    Failed { path: PathBuf, cause: String },
}

/// Aggregated result of one sheet build.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunSummary {
    pub placed: usize,
    pub skipped: usize,
    pub failed: usize,
    pub pages: u32,
    pub outcomes: Vec<PlacementOutcome>,
}

impl RunSummary {
    fn record(&mut self, outcome: PlacementOutcome) {
        match &outcome {
            PlacementOutcome::Placed { page, .. } => {
                self.placed += 1;
                self.pages = self.pages.max(page + 1);
            }
            PlacementOutcome::Skipped { .. } => self.skipped += 1,
            PlacementOutcome::Failed { .. } => self.failed += 1,
        }
        self.outcomes.push(outcome);
    }
}

/// Lays out images on a fixed grid across pages of a [`SheetCanvas`].
#[derive(Debug, Clone)]
pub struct SheetBuilder {
    grid: GridGeometry,
    preparer: ImagePreparer,
    background: Option<Colour>,
}

impl SheetBuilder {
    /// Fails if the configuration is invalid or leaves no room for a cell.
    pub fn new(config: &SheetConfig, background: Option<Colour>) -> Result<Self> {
        let grid = GridGeometry::new(config)?;
        let preparer = ImagePreparer::for_grid(&grid, config.dpi);
        Ok(Self {
            grid,
            preparer,
            background,
        })
    }

    pub fn grid(&self) -> &GridGeometry {
        &self.grid
    }

    /// Place every image in `images` onto `canvas`, in order.
    ///
    /// Only canvas page handling can fail the build; missing or broken images
    /// are reported through `printer` and the summary.
    pub fn build<C: SheetCanvas>(
        &self,
        images: &[PathBuf],
        canvas: &mut C,
        printer: &Printer,
    ) -> Result<RunSummary> {
        let mut summary = RunSummary::default();
        let mut cursor = Cursor::start(&self.grid);

        for path in images {
            if !path.exists() {
                printer.warning("Missing", &format!("{} not found, skipping", path.display()));
                summary.record(PlacementOutcome::Skipped { path: path.clone() });
                continue;
            }

            let rect = self.grid.cell_rect(&cursor);
            if let Err(e) = self.place(path, rect, canvas) {
                printer.error("Failed", &e.to_string());
                summary.record(PlacementOutcome::Failed {
                    path: path.clone(),
                    cause: e.to_string(),
                });
                continue;
            }

            summary.record(PlacementOutcome::Placed {
                path: path.clone(),
                page: cursor.page,
                row: cursor.row,
                column: cursor.column,
            });

            let step = cursor.advance(&self.grid);
            if step.page_break {
                canvas.page_break()?;
            }
            cursor = step.next;
        }

        Ok(summary)
    }

    /// Draw one image into `rect`, filling the background first when set.
    fn place<C: SheetCanvas>(&self, path: &Path, rect: Rect, canvas: &mut C) -> Result<()> {
        if canvas.has_image(path) {
            self.fill(rect, canvas)?;
            return canvas.draw_cached(path, rect);
        }

        let image = self.preparer.prepare(path)?;
        self.fill(rect, canvas)?;
        canvas.draw_image(path, &image, rect)
    }

    fn fill<C: SheetCanvas>(&self, rect: Rect, canvas: &mut C) -> Result<()> {
        match self.background {
            Some(colour) => canvas.fill_rect(rect, colour),
            None => Ok(()),
        }
    }
}
