//! Parsers for proxysheet input files.

pub mod list;

pub use list::{expand_entries, load_image_list, parse_manifest, ManifestEntry};
