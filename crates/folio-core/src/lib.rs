//! Core types shared across the folio crates.
//!
//! Everything here is plain data: the light/dark [`Theme`] and its
//! [`Palette`], the [`Rgb`] color type, canvas [`Bounds`] measured in logical
//! pixels, and the tunable [`FieldConfig`] of the particle backdrop.

mod color;
mod field;
mod geometry;
mod theme;

pub use color::Rgb;
pub use field::FieldConfig;
pub use geometry::{Bounds, CELL_HEIGHT, CELL_WIDTH};
pub use theme::{ColorRole, Palette, Theme};
