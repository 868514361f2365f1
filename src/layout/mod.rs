//! Grid layout and pagination.
//!
//! The layout stage is pure arithmetic: [`GridGeometry`] fixes the cell grid
//! for a page and [`Cursor`] walks it, reporting when a page is full.

mod cursor;
mod grid;

pub use cursor::{Advance, Cursor};
pub use grid::{GridGeometry, Rect};
