//! Error types for the paint engine.

/// Errors produced by pixel access, the bitmap codec and configuration I/O.
#[derive(Debug, thiserror::Error)]
pub enum PaintError {
    /// A pixel read or write fell outside the buffer.
    #[error("pixel ({row}, {col}) out of bounds for {width}x{height} buffer")]
    OutOfBounds {
        row: i32,
        col: i32,
        width: u32,
        height: u32,
    },

    /// The bitmap did not start with the `BM` magic bytes.
    #[error("not a bitmap: magic bytes {magic:?}")]
    MalformedFile { magic: [u8; 2] },

    /// The bitmap header declares dimensions that cannot be represented.
    #[error("invalid bitmap dimensions: {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },

    /// File or stream I/O failed (including truncated pixel data).
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration could not be parsed or serialized.
    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PaintError>;
