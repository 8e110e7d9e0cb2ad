use super::{Color, Kernel};
use crate::error::{PaintError, Result};

// ============================================================================
// Utility Functions
// ============================================================================

/// Von Neumann neighborhood offsets as (dy, dx)
const NEIGHBORS_4: [(i32, i32); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

/// Write ABGR pixel to slice (RGBA8888 little-endian byte order)
#[inline]
fn write_pixel(dest: &mut [u8], c: Color) {
    dest[0] = 255; // A
    dest[1] = c.b; // B
    dest[2] = c.g; // G
    dest[3] = c.r; // R
}

// ============================================================================
// PixelBuffer
// ============================================================================

/// Owned row-major grid of colors addressed by (row, col)
///
/// Every accessor validates coordinates; nothing here can index outside the
/// backing storage. Operations that produce a logically different image
/// (filters, derivatives, crops) return a new buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    pixels: Vec<Color>,
    width: u32,
    height: u32,
}

impl PixelBuffer {
    /// Create a `width` x `height` buffer filled with `fill`
    pub fn new(width: u32, height: u32, fill: Color) -> Self {
        Self {
            pixels: vec![fill; width as usize * height as usize],
            width,
            height,
        }
    }

    /// Wrap an existing row-major pixel vector. Returns None when the length
    /// does not match the dimensions.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Color>) -> Option<Self> {
        if pixels.len() != width as usize * height as usize {
            return None;
        }
        Some(Self {
            pixels,
            width,
            height,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Check if coordinates are within bounds
    #[inline]
    pub fn in_bounds(&self, row: i32, col: i32) -> bool {
        row >= 0 && (row as i64) < self.height as i64 && col >= 0 && (col as i64) < self.width as i64
    }

    /// Linear index for an in-bounds (row, col)
    #[inline]
    fn index(&self, row: i32, col: i32) -> usize {
        row as usize * self.width as usize + col as usize
    }

    fn out_of_bounds(&self, row: i32, col: i32) -> PaintError {
        PaintError::OutOfBounds {
            row,
            col,
            width: self.width,
            height: self.height,
        }
    }

    /// Read a pixel (bounds checked)
    #[inline]
    pub fn get(&self, row: i32, col: i32) -> Result<Color> {
        if self.in_bounds(row, col) {
            Ok(self.pixels[self.index(row, col)])
        } else {
            Err(self.out_of_bounds(row, col))
        }
    }

    /// Write a pixel (bounds checked)
    #[inline]
    pub fn set(&mut self, row: i32, col: i32, color: Color) -> Result<()> {
        if self.in_bounds(row, col) {
            let idx = self.index(row, col);
            self.pixels[idx] = color;
            Ok(())
        } else {
            Err(self.out_of_bounds(row, col))
        }
    }

    /// Row-major view of every pixel
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// One row as a slice (bounds checked)
    pub fn row(&self, row: i32) -> Result<&[Color]> {
        if row < 0 || row as i64 >= self.height as i64 {
            return Err(self.out_of_bounds(row, 0));
        }
        let start = row as usize * self.width as usize;
        Ok(&self.pixels[start..start + self.width as usize])
    }

    /// Paint every pixel with one color
    pub fn reset(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    /// Copy contents from another buffer (must be same size)
    pub fn copy_from(&mut self, src: &PixelBuffer) {
        if self.width == src.width && self.height == src.height {
            self.pixels.copy_from_slice(&src.pixels);
        }
    }

    fn map(&self, f: impl Fn(Color) -> Color) -> Self {
        Self {
            pixels: self.pixels.iter().map(|&c| f(c)).collect(),
            width: self.width,
            height: self.height,
        }
    }

    // ========================================================================
    // Whole-buffer Transforms
    // ========================================================================

    /// Scale every pixel by `factor` in place (motion trails)
    /// factor: 0.0 = black, 1.0 = unchanged
    pub fn fade(&mut self, factor: f64) {
        for p in &mut self.pixels {
            *p = *p * factor;
        }
    }

    /// Luminance-gray copy
    pub fn grayscale(&self) -> Self {
        self.map(|c| c.to_gray())
    }

    /// Horizontal edge magnitude: first column copied, the rest are the
    /// absolute difference to the left neighbor
    pub fn x_derivative(&self) -> Self {
        let mut ret = self.clone();
        let w = self.width as usize;
        for y in 0..self.height as usize {
            let row = y * w;
            for x in 1..w {
                ret.pixels[row + x] = self.pixels[row + x].abs_diff(self.pixels[row + x - 1]);
            }
        }
        ret
    }

    /// Vertical edge magnitude: first row copied, the rest are the absolute
    /// difference to the pixel above
    pub fn y_derivative(&self) -> Self {
        let mut ret = self.clone();
        let w = self.width as usize;
        for y in 1..self.height as usize {
            for x in 0..w {
                let i = y * w + x;
                ret.pixels[i] = self.pixels[i].abs_diff(self.pixels[i - w]);
            }
        }
        ret
    }

    /// Channel-wise max of the x and y derivatives
    pub fn derivative(&self) -> Self {
        let dx = self.x_derivative();
        let dy = self.y_derivative();
        Self {
            pixels: dx
                .pixels
                .iter()
                .zip(&dy.pixels)
                .map(|(&a, &b)| a.max(b))
                .collect(),
            width: self.width,
            height: self.height,
        }
    }

    /// Replace pixels with luminance <= `level` by `low`, keep the rest
    pub fn threshold(&self, level: u8, low: Color) -> Self {
        self.map(|c| if c.luminance() > level { c } else { low })
    }

    /// Two-color threshold: luminance > `level` becomes `high`, else `low`
    pub fn binarize(&self, level: u8, low: Color, high: Color) -> Self {
        self.map(|c| if c.luminance() > level { high } else { low })
    }

    // ========================================================================
    // Convolution
    // ========================================================================

    /// 3x3 convolution. Taps outside the buffer are dropped (no padding or
    /// wrap); sums are truncated and clamped into a color.
    pub fn matrix_filter(&self, kernel: &Kernel) -> Self {
        let mut ret = self.clone();
        let w = self.width as i32;
        let h = self.height as i32;

        for y in 0..h {
            for x in 0..w {
                let (mut sr, mut sg, mut sb) = (0.0f64, 0.0f64, 0.0f64);
                for dy in -1..=1 {
                    for dx in -1..=1 {
                        let (ty, tx) = (y + dy, x + dx);
                        if !self.in_bounds(ty, tx) {
                            continue;
                        }
                        let c = self.pixels[self.index(ty, tx)];
                        let k = kernel.weight(dy, dx);
                        sr += c.r as f64 * k;
                        sg += c.g as f64 * k;
                        sb += c.b as f64 * k;
                    }
                }
                let idx = self.index(y, x);
                ret.pixels[idx] = Color::new(sr as i32, sg as i32, sb as i32);
            }
        }
        ret
    }

    pub fn gaussian_filter(&self) -> Self {
        self.matrix_filter(&Kernel::GAUSSIAN)
    }

    pub fn blur_filter(&self) -> Self {
        self.matrix_filter(&Kernel::BOX_BLUR)
    }

    pub fn sharpen_filter(&self) -> Self {
        self.matrix_filter(&Kernel::SHARPEN)
    }

    pub fn laplace(&self) -> Self {
        self.matrix_filter(&Kernel::LAPLACE)
    }

    // ========================================================================
    // Morphology
    // ========================================================================

    fn morph(&self, combine: impl Fn(Color, Color) -> Color) -> Self {
        let mut ret = self.clone();
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                let idx = self.index(y, x);
                let mut c = self.pixels[idx];
                for (dy, dx) in NEIGHBORS_4 {
                    if let Ok(n) = self.get(y + dy, x + dx) {
                        c = combine(c, n);
                    }
                }
                ret.pixels[idx] = c;
            }
        }
        ret
    }

    /// 4-neighbor channel-wise minimum (shrinks bright regions)
    pub fn erode(&self) -> Self {
        self.morph(Color::min)
    }

    /// 4-neighbor channel-wise maximum (grows bright regions)
    pub fn dilate(&self) -> Self {
        self.morph(Color::max)
    }

    // ========================================================================
    // Regions
    // ========================================================================

    /// Copy the `w` x `h` block whose top-left source pixel is at column `x`,
    /// row `y`. Cells that fall outside this buffer stay black.
    pub fn extract_region(&self, x: i32, y: i32, w: u32, h: u32) -> Self {
        let mut ret = Self::new(w, h, Color::default());
        for i in 0..h as i32 {
            for j in 0..w as i32 {
                if let Ok(c) = self.get(y + i, x + j) {
                    let idx = ret.index(i, j);
                    ret.pixels[idx] = c;
                }
            }
        }
        ret
    }

    /// Copy `src` onto this buffer with its top-left corner at column `x`,
    /// row `y`; pixels landing outside are skipped
    pub fn composite_at(&mut self, src: &PixelBuffer, x: i32, y: i32) {
        for sy in 0..src.height as i32 {
            let dy = y + sy;
            if dy < 0 || dy as i64 >= self.height as i64 {
                continue;
            }
            for sx in 0..src.width as i32 {
                let dx = x + sx;
                if dx < 0 || dx as i64 >= self.width as i64 {
                    continue;
                }
                let di = self.index(dy, dx);
                self.pixels[di] = src.pixels[src.index(sy, sx)];
            }
        }
    }

    // ========================================================================
    // Presentation
    // ========================================================================

    /// Bytes for an SDL `RGBA8888` streaming texture, pitch `width * 4`.
    /// Row 0 is the bottom of the display, so rows are emitted bottom-up.
    pub fn to_rgba8888(&self) -> Vec<u8> {
        let w = self.width as usize;
        let mut bytes = vec![0u8; self.pixels.len() * 4];
        if w == 0 {
            return bytes;
        }
        for (out_row, src_row) in self.pixels.chunks_exact(w).rev().enumerate() {
            let base = out_row * w * 4;
            for (x, &c) in src_row.iter().enumerate() {
                let idx = base + x * 4;
                write_pixel(&mut bytes[idx..idx + 4], c);
            }
        }
        bytes
    }
}

impl Default for PixelBuffer {
    /// Empty 0x0 buffer, useful only as an assignment target
    fn default() -> Self {
        Self::new(0, 0, Color::BLACK)
    }
}
