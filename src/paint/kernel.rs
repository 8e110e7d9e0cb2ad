//! 3x3 convolution kernels for `PixelBuffer::matrix_filter`

/// Row-major 3x3 weights; `weights[dy + 1][dx + 1]` applies to the tap at
/// offset (dy, dx) from the output pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kernel {
    pub weights: [[f64; 3]; 3],
}

impl Kernel {
    pub const fn new(weights: [[f64; 3]; 3]) -> Self {
        Self { weights }
    }

    /// Weighted 3x3 gaussian approximation (weights sum to 1)
    pub const GAUSSIAN: Kernel = Kernel::new([
        [1.0 / 21.0, 1.0 / 7.0, 1.0 / 21.0],
        [1.0 / 7.0, 5.0 / 21.0, 1.0 / 7.0],
        [1.0 / 21.0, 1.0 / 7.0, 1.0 / 21.0],
    ]);

    /// Uniform box blur
    pub const BOX_BLUR: Kernel = Kernel::new([[1.0 / 9.0; 3]; 3]);

    pub const SHARPEN: Kernel = Kernel::new([
        [0.0, -1.0, 0.0],
        [-1.0, 5.0, -1.0],
        [0.0, -1.0, 0.0],
    ]);

    /// 8-neighbor Laplacian edge detector
    pub const LAPLACE: Kernel = Kernel::new([
        [-1.0, -1.0, -1.0],
        [-1.0, 8.0, -1.0],
        [-1.0, -1.0, -1.0],
    ]);

    pub const IDENTITY: Kernel = Kernel::new([
        [0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0],
    ]);

    /// Weight for the tap at offset (dy, dx), both in `-1..=1`
    #[inline]
    pub fn weight(&self, dy: i32, dx: i32) -> f64 {
        self.weights[(dy + 1) as usize][(dx + 1) as usize]
    }
}

impl Default for Kernel {
    fn default() -> Self {
        Self::IDENTITY
    }
}
