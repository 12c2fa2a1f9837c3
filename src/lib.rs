//! glyph-art library crate.
//!
//! Converts images into ASCII art using a symbol palette calibrated against
//! the font the art will be displayed in.

pub mod ascii;
pub mod cli;
pub mod config;
pub mod generator;
pub mod raster;
pub mod source;
