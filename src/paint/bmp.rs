//! Uncompressed 24-bit bitmap codec
//!
//! Layout: a 14-byte file header and a 40-byte info header (all fields
//! little-endian), then one record per buffer row, row 0 first. Each pixel is
//! stored as B, G, R and every row is zero-padded to a multiple of 4 bytes.
//!
//! The file-size field is `54 + width * height`. It does not count the three
//! bytes per pixel or the row padding; readers here ignore it, and it is
//! written that way so files stay byte-identical with existing ones.

use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::Path;

use super::{Color, PixelBuffer};
use crate::error::{PaintError, Result};

pub const MAGIC: [u8; 2] = *b"BM";
/// Combined size of both headers; also the pixel data offset we write
pub const HEADER_LEN: usize = 54;
pub const PIXEL_DATA_OFFSET: u32 = 0x36;
pub const INFO_HEADER_SIZE: u32 = 40;
pub const BITS_PER_PIXEL: u16 = 24;

/// Zero bytes appended to each row of `width` pixels
#[inline]
pub fn row_padding(width: u32) -> usize {
    (4 - (width as usize * 3) % 4) % 4
}

/// Parsed form of the 54-byte header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BmpHeader {
    pub magic: [u8; 2],
    pub file_size: u32,
    pub pixel_offset: u32,
    pub info_size: u32,
    pub width: i32,
    pub height: i32,
    pub planes: u16,
    pub bits_per_pixel: u16,
    pub compression: u32,
}

impl BmpHeader {
    /// Header describing `buffer`
    pub fn for_buffer(buffer: &PixelBuffer) -> Self {
        let area = buffer.width() as u64 * buffer.height() as u64;
        Self {
            magic: MAGIC,
            file_size: (HEADER_LEN as u64 + area) as u32,
            pixel_offset: PIXEL_DATA_OFFSET,
            info_size: INFO_HEADER_SIZE,
            width: buffer.width() as i32,
            height: buffer.height() as i32,
            planes: 1,
            bits_per_pixel: BITS_PER_PIXEL,
            compression: 0,
        }
    }

    pub fn has_valid_magic(&self) -> bool {
        self.magic == MAGIC
    }

    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut out = [0u8; HEADER_LEN];
        out[0..2].copy_from_slice(&self.magic);
        out[2..6].copy_from_slice(&self.file_size.to_le_bytes());
        // 6..10 reserved
        out[10..14].copy_from_slice(&self.pixel_offset.to_le_bytes());
        out[14..18].copy_from_slice(&self.info_size.to_le_bytes());
        out[18..22].copy_from_slice(&self.width.to_le_bytes());
        out[22..26].copy_from_slice(&self.height.to_le_bytes());
        out[26..28].copy_from_slice(&self.planes.to_le_bytes());
        out[28..30].copy_from_slice(&self.bits_per_pixel.to_le_bytes());
        out[30..34].copy_from_slice(&self.compression.to_le_bytes());
        // 34..54: palette size, x/y pixels per meter, colors used, important colors
        out
    }

    pub fn parse(b: &[u8; HEADER_LEN]) -> Self {
        let u32_at = |i: usize| u32::from_le_bytes([b[i], b[i + 1], b[i + 2], b[i + 3]]);
        let i32_at = |i: usize| i32::from_le_bytes([b[i], b[i + 1], b[i + 2], b[i + 3]]);
        let u16_at = |i: usize| u16::from_le_bytes([b[i], b[i + 1]]);
        Self {
            magic: [b[0], b[1]],
            file_size: u32_at(2),
            pixel_offset: u32_at(10),
            info_size: u32_at(14),
            width: i32_at(18),
            height: i32_at(22),
            planes: u16_at(26),
            bits_per_pixel: u16_at(28),
            compression: u32_at(30),
        }
    }
}

fn truncated(expected: u64, actual: u64) -> PaintError {
    PaintError::Io(std::io::Error::new(
        ErrorKind::UnexpectedEof,
        format!("bitmap pixel data needs {} bytes, stream has {}", expected, actual),
    ))
}

impl PixelBuffer {
    /// Serialize into any writer
    pub fn write_bmp<W: Write>(&self, out: &mut W) -> Result<()> {
        out.write_all(&BmpHeader::for_buffer(self).to_bytes())?;

        let mut row_bytes = vec![0u8; self.width() as usize * 3 + row_padding(self.width())];
        for y in 0..self.height() as i32 {
            for (x, c) in self.row(y)?.iter().enumerate() {
                row_bytes[x * 3] = c.b;
                row_bytes[x * 3 + 1] = c.g;
                row_bytes[x * 3 + 2] = c.r;
            }
            out.write_all(&row_bytes)?;
        }
        Ok(())
    }

    /// Serialize to an in-memory byte vector
    pub fn encode_bmp(&self) -> Result<Vec<u8>> {
        let row_len = self.width() as usize * 3 + row_padding(self.width());
        let mut bytes = Vec::with_capacity(HEADER_LEN + row_len * self.height() as usize);
        self.write_bmp(&mut bytes)?;
        Ok(bytes)
    }

    /// Write the buffer to a bitmap file, replacing any existing file
    pub fn save_bmp(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut out = BufWriter::new(File::create(path)?);
        self.write_bmp(&mut out)?;
        out.flush()?;
        log::info!(
            "saved {}x{} bitmap to {}",
            self.width(),
            self.height(),
            path.display()
        );
        Ok(())
    }

    /// Decode a bitmap. A bad magic number is logged and decoding carries on
    /// with whatever header follows.
    pub fn decode_bmp<R: Read + Seek>(reader: &mut R) -> Result<Self> {
        Self::decode_with(reader, false)
    }

    /// Like [`PixelBuffer::decode_bmp`] but rejects a bad magic number
    pub fn decode_bmp_strict<R: Read + Seek>(reader: &mut R) -> Result<Self> {
        Self::decode_with(reader, true)
    }

    fn decode_with<R: Read + Seek>(reader: &mut R, strict: bool) -> Result<Self> {
        let mut raw = [0u8; HEADER_LEN];
        reader.read_exact(&mut raw)?;
        let header = BmpHeader::parse(&raw);

        if !header.has_valid_magic() {
            if strict {
                return Err(PaintError::MalformedFile {
                    magic: header.magic,
                });
            }
            log::warn!("not a BM bitmap (magic {:?}), reading anyway", header.magic);
        }
        if header.bits_per_pixel != BITS_PER_PIXEL || header.compression != 0 {
            log::warn!(
                "bitmap declares {} bpp, compression {}; decoding as uncompressed 24 bpp",
                header.bits_per_pixel,
                header.compression
            );
        }
        if header.width < 0 || header.height < 0 {
            return Err(PaintError::InvalidDimensions {
                width: header.width,
                height: header.height,
            });
        }

        let width = header.width as u32;
        let height = header.height as u32;
        if width == 0 || height == 0 {
            // no pixel rows to read, whatever the other dimension says
            return Ok(Self::new(width, height, Color::BLACK));
        }
        let row_len = width as u64 * 3 + row_padding(width) as u64;
        let expected =
            (header.pixel_offset as u64).saturating_add(row_len.saturating_mul(height as u64));

        // Refuse to allocate for pixel data the stream cannot contain
        let stream_len = reader.seek(SeekFrom::End(0))?;
        let available = stream_len.saturating_sub(header.pixel_offset as u64);
        if stream_len < expected || available < row_len {
            return Err(truncated(expected, stream_len));
        }
        reader.seek(SeekFrom::Start(header.pixel_offset as u64))?;

        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        let mut row = vec![0u8; row_len as usize];
        for _ in 0..height {
            reader.read_exact(&mut row)?;
            pixels.extend(
                row[..width as usize * 3]
                    .chunks_exact(3)
                    .map(|bgr| Color::rgb(bgr[2], bgr[1], bgr[0])),
            );
        }

        Self::from_pixels(width, height, pixels).ok_or(PaintError::InvalidDimensions {
            width: header.width,
            height: header.height,
        })
    }

    /// Read a bitmap file into a new buffer
    pub fn load_bmp(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut reader = BufReader::new(File::open(path)?);
        let buffer = Self::decode_bmp(&mut reader)?;
        log::info!(
            "loaded {}x{} bitmap from {}",
            buffer.width(),
            buffer.height(),
            path.display()
        );
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn gradient(w: u32, h: u32) -> PixelBuffer {
        let mut buf = PixelBuffer::new(w, h, Color::BLACK);
        for y in 0..h as i32 {
            for x in 0..w as i32 {
                buf.set(y, x, Color::new(x * 40, y * 60, x * 7 + y * 13)).unwrap();
            }
        }
        buf
    }

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("paintkit-{}-{}.bmp", std::process::id(), name))
    }

    #[test]
    fn test_row_padding() {
        assert_eq!(row_padding(0), 0);
        assert_eq!(row_padding(1), 1);
        assert_eq!(row_padding(2), 2);
        assert_eq!(row_padding(3), 3);
        assert_eq!(row_padding(4), 0);
        assert_eq!(row_padding(5), 1);
    }

    #[test]
    fn test_header_layout() {
        let buf = PixelBuffer::new(4, 4, Color::WHITE);
        let bytes = buf.encode_bmp().unwrap();
        assert_eq!(bytes.len(), 54 + 4 * 12);
        assert_eq!(&bytes[0..2], b"BM");
        assert_eq!(&bytes[2..6], &(54u32 + 16).to_le_bytes());
        assert_eq!(&bytes[6..10], &[0, 0, 0, 0]);
        assert_eq!(&bytes[10..14], &0x36u32.to_le_bytes());
        assert_eq!(&bytes[14..18], &40u32.to_le_bytes());
        assert_eq!(&bytes[18..22], &4i32.to_le_bytes());
        assert_eq!(&bytes[22..26], &4i32.to_le_bytes());
        assert_eq!(&bytes[26..28], &1u16.to_le_bytes());
        assert_eq!(&bytes[28..30], &24u16.to_le_bytes());
        assert!(bytes[30..54].iter().all(|&b| b == 0));
        assert!(bytes[54..].iter().all(|&b| b == 255));
    }

    #[test]
    fn test_pixels_are_bgr_with_padding() {
        let mut buf = PixelBuffer::new(1, 2, Color::BLACK);
        buf.set(0, 0, Color::rgb(1, 2, 3)).unwrap();
        buf.set(1, 0, Color::rgb(4, 5, 6)).unwrap();
        let bytes = buf.encode_bmp().unwrap();
        // row 0 first, no vertical flip; one pad byte per 3-byte row
        assert_eq!(&bytes[54..], &[3, 2, 1, 0, 6, 5, 4, 0]);
    }

    #[test]
    fn test_write_matches_encode() {
        let buf = gradient(3, 2);
        let mut out = Vec::new();
        buf.write_bmp(&mut out).unwrap();
        assert_eq!(out, buf.encode_bmp().unwrap());
    }

    #[test]
    fn test_round_trip_across_paddings() {
        for w in 1..=5 {
            let buf = gradient(w, 3);
            let bytes = buf.encode_bmp().unwrap();
            let decoded = PixelBuffer::decode_bmp(&mut Cursor::new(bytes)).unwrap();
            assert_eq!(decoded, buf, "width {}", w);
        }
    }

    #[test]
    fn test_empty_round_trip() {
        let buf = PixelBuffer::default();
        let decoded = PixelBuffer::decode_bmp(&mut Cursor::new(buf.encode_bmp().unwrap())).unwrap();
        assert!(decoded.is_empty());
    }

    #[test_log::test]
    fn test_bad_magic_is_tolerated() {
        let mut bytes = gradient(2, 2).encode_bmp().unwrap();
        bytes[0] = b'X';
        let lenient = PixelBuffer::decode_bmp(&mut Cursor::new(bytes.clone())).unwrap();
        assert_eq!(lenient, gradient(2, 2));

        let strict = PixelBuffer::decode_bmp_strict(&mut Cursor::new(bytes));
        assert!(matches!(
            strict,
            Err(PaintError::MalformedFile { magic: [b'X', b'M'] })
        ));
    }

    #[test]
    fn test_truncated_pixel_data() {
        let mut bytes = gradient(3, 3).encode_bmp().unwrap();
        bytes.truncate(bytes.len() - 2);
        let err = PixelBuffer::decode_bmp(&mut Cursor::new(bytes)).unwrap_err();
        assert!(matches!(err, PaintError::Io(ref e) if e.kind() == ErrorKind::UnexpectedEof));

        let short_header = vec![b'B', b'M', 0, 0];
        assert!(PixelBuffer::decode_bmp(&mut Cursor::new(short_header)).is_err());
    }

    #[test]
    fn test_zero_height_with_huge_width() {
        let mut bytes = gradient(2, 2).encode_bmp().unwrap();
        bytes[18..22].copy_from_slice(&i32::MAX.to_le_bytes());
        bytes[22..26].copy_from_slice(&0i32.to_le_bytes());
        bytes.truncate(HEADER_LEN);
        let decoded = PixelBuffer::decode_bmp(&mut Cursor::new(bytes)).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (i32::MAX as u32, 0));
        assert!(decoded.is_empty());
    }

    #[test]
    fn test_huge_row_on_short_stream() {
        let mut bytes = gradient(2, 2).encode_bmp().unwrap();
        bytes[18..22].copy_from_slice(&i32::MAX.to_le_bytes());
        bytes[22..26].copy_from_slice(&1i32.to_le_bytes());
        let err = PixelBuffer::decode_bmp(&mut Cursor::new(bytes)).unwrap_err();
        assert!(matches!(err, PaintError::Io(ref e) if e.kind() == ErrorKind::UnexpectedEof));

        // pixel offset past the end of the stream
        let mut bytes = gradient(2, 2).encode_bmp().unwrap();
        bytes[10..14].copy_from_slice(&u32::MAX.to_le_bytes());
        assert!(PixelBuffer::decode_bmp(&mut Cursor::new(bytes)).is_err());
    }

    #[test]
    fn test_negative_dimensions_rejected() {
        let mut bytes = gradient(2, 2).encode_bmp().unwrap();
        bytes[22..26].copy_from_slice(&(-2i32).to_le_bytes());
        let err = PixelBuffer::decode_bmp(&mut Cursor::new(bytes)).unwrap_err();
        assert!(matches!(err, PaintError::InvalidDimensions { width: 2, height: -2 }));
    }

    #[test]
    fn test_honors_pixel_data_offset() {
        let buf = gradient(2, 2);
        let mut bytes = buf.encode_bmp().unwrap();
        // move pixel data 4 bytes further out
        bytes.splice(54..54, [0xAA; 4]);
        bytes[10..14].copy_from_slice(&58u32.to_le_bytes());
        let decoded = PixelBuffer::decode_bmp(&mut Cursor::new(bytes)).unwrap();
        assert_eq!(decoded, buf);
    }

    #[test]
    fn test_save_and_load_file() {
        let path = temp_path("save-load");
        let buf = gradient(5, 4);
        buf.save_bmp(&path).unwrap();
        let on_disk = std::fs::read(&path).unwrap();
        assert_eq!(on_disk, buf.encode_bmp().unwrap());
        let loaded = PixelBuffer::load_bmp(&path).unwrap();
        assert_eq!(loaded, buf);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_missing_file() {
        let err = PixelBuffer::load_bmp(temp_path("does-not-exist")).unwrap_err();
        assert!(matches!(err, PaintError::Io(_)));
    }
}
