//! Core value types shared by the layout and render stages.

mod colour;

pub use colour::Colour;
