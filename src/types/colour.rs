//! Background colour type and parsing.

use std::fmt;
use std::str::FromStr;

use crate::error::{ProxyError, Result};

/// An opaque RGB colour used for cell background fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Colour {
    /// Create a new colour from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// White.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Parse a `#RRGGBB` hex colour string.
    ///
    /// The leading `#` is required and exactly six hex digits must follow.
    pub fn from_hex(s: &str) -> Result<Self> {
        let s = s.trim();
        let hex = s.strip_prefix('#').ok_or_else(|| invalid(s))?;

        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid(s));
        }

        let r = parse_hex_byte(&hex[0..2], s)?;
        let g = parse_hex_byte(&hex[2..4], s)?;
        let b = parse_hex_byte(&hex[4..6], s)?;
        Ok(Self::rgb(r, g, b))
    }

    /// Channels scaled to the `0.0..=1.0` range, as PDF fill operators expect.
    pub fn to_unit_rgb(self) -> [f32; 3] {
        [
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
        ]
    }
}

impl FromStr for Colour {
    type Err = ProxyError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

fn invalid(input: &str) -> ProxyError {
    ProxyError::InvalidColour {
        input: input.to_string(),
        help: Some("Use a 6-digit hex colour such as #FFFFFF".to_string()),
    }
}

/// Parse a two-character hex byte.
fn parse_hex_byte(byte: &str, input: &str) -> Result<u8> {
    u8::from_str_radix(byte, 16).map_err(|_| invalid(input))
}
