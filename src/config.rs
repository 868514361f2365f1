//! Sheet layout configuration.
//!
//! Layout values default to A4 pages holding 59x86 mm cards at 300 DPI and can
//! be overridden from a YAML file passed with `--config`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ProxyError, Result};

/// Highest accepted print resolution.
pub const MAX_DPI: u32 = 2400;

/// Physical layout of a proxy sheet. All lengths are in millimetres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetConfig {
    pub page_width_mm: f64,
    pub page_height_mm: f64,
    pub cell_width_mm: f64,
    pub cell_height_mm: f64,
    pub margin_mm: f64,
    pub padding_mm: f64,

    /// Print resolution images are resampled to.
    pub dpi: u32,

    /// Default background fill as `#RRGGBB`. The CLI flag takes precedence.
    pub background: Option<String>,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            page_width_mm: 210.0,
            page_height_mm: 297.0,
            cell_width_mm: 59.0,
            cell_height_mm: 86.0,
            margin_mm: 10.0,
            padding_mm: 5.0,
            dpi: 300,
            background: None,
        }
    }
}

impl SheetConfig {
    /// Load configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ProxyError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read config: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse configuration from a YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(content).map_err(|e| ProxyError::Config {
            message: format!("Invalid config: {}", e),
            help: Some("Check the YAML syntax and field names".to_string()),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject non-positive dimensions and a DPI outside `1..=MAX_DPI`.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("page_width_mm", self.page_width_mm),
            ("page_height_mm", self.page_height_mm),
            ("cell_width_mm", self.cell_width_mm),
            ("cell_height_mm", self.cell_height_mm),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ProxyError::Config {
                    message: format!("{} must be greater than zero, got {}", name, value),
                    help: None,
                });
            }
        }

        let non_negative = [("margin_mm", self.margin_mm), ("padding_mm", self.padding_mm)];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ProxyError::Config {
                    message: format!("{} must not be negative, got {}", name, value),
                    help: None,
                });
            }
        }

        if self.dpi == 0 || self.dpi > MAX_DPI {
            return Err(ProxyError::Config {
                message: format!("dpi must be between 1 and {}, got {}", MAX_DPI, self.dpi),
                help: Some("300 is a typical print resolution".to_string()),
            });
        }

        Ok(())
    }
}
