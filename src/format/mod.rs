//! Terminal styling for rendered rows.
//!
//! The renderer only decides *what* colour a cell gets and whether it is
//! inverted; a [`Theme`] turns that into escape sequences (or nothing).

mod theme;

pub use theme::{AnsiTheme, ColorMode, Palette, Theme};
