//! proxysheet - Printable proxy sheet generator
//!
//! A library for laying out card images on fixed-size PDF pages: an image
//! list is expanded into a placement list, each image is resampled to print
//! resolution, and the results are packed into a grid that paginates as it
//! fills.

pub mod cli;
pub mod config;
pub mod error;
pub mod layout;
pub mod output;
pub mod parser;
pub mod render;
pub mod types;

pub use config::SheetConfig;
pub use error::{ProxyError, Result};
pub use layout::{Advance, Cursor, GridGeometry, Rect};
pub use parser::{expand_entries, load_image_list, parse_manifest, ManifestEntry};
pub use render::{
    fit_within, mm_to_pt, target_pixels, ImagePreparer, PdfWriter, PlacementOutcome, RunSummary,
    SheetBuilder, SheetCanvas,
};
pub use types::Colour;
