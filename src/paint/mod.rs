//! Raster core: colors, pixel buffers, drawing and the BMP codec

pub mod bmp;
mod canvas;
mod color;
mod kernel;
mod pixel_buffer;

pub use canvas::{Canvas, DEFAULT_ERASER_SIZE};
pub use color::Color;
pub use kernel::Kernel;
pub use pixel_buffer::PixelBuffer;
