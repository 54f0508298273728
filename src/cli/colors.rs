//! The CLI theme. Colors live here as constants so every message and the
//! prompt share one palette.
//!
//! - FERRUM_RED: main color, prompts and highlights
//! - SHEET_GREEN: JSON answers of data commands

use colored::Color;

pub(crate) const FERRUM_RED: Color = Color::TrueColor {
    r: 255,
    g: 87,
    b: 87,
};

pub(crate) const SHEET_GREEN: Color = Color::TrueColor {
    r: 87,
    g: 200,
    b: 120,
};
