//! paintkit: a small 2D raster engine
//!
//! A [`PixelBuffer`] is a grid of 8-bit RGB [`Color`]s addressed as
//! (row, col). A [`Canvas`] wraps one with the state the drawing
//! primitives need. Buffers round-trip through uncompressed 24-bit BMP.
//! The `demo` module holds the animated scenes rendered by the binary.

pub mod config;
pub mod demo;
#[cfg(feature = "display")]
pub mod display;
pub mod error;
pub mod paint;
pub mod util;

pub use config::Config;
pub use error::{PaintError, Result};
pub use paint::{Canvas, Color, Kernel, PixelBuffer};
