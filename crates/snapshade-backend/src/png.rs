//! Deterministic PNG writer.
//!
//! Uses fixed compression settings so the same pixels always encode to the
//! same bytes.

use std::io::Write;
use std::path::Path;

use png::{BitDepth, ColorType, Compression, Encoder, FilterType};
use thiserror::Error;

use crate::buffer::PixelBuffer;

/// Errors from PNG operations.
#[derive(Debug, Error)]
pub enum PngError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PNG encoding error: {0}")]
    Encoding(#[from] png::EncodingError),
}

/// PNG export configuration for deterministic output.
#[derive(Debug, Clone)]
pub struct PngConfig {
    /// Compression level. Use a fixed value for determinism.
    pub compression: Compression,
    /// Filter type. Use a fixed value for determinism.
    pub filter: FilterType,
}

impl Default for PngConfig {
    fn default() -> Self {
        Self {
            compression: Compression::Default,
            filter: FilterType::NoFilter,
        }
    }
}

impl PngConfig {
    /// Create config optimized for file size (slower, but deterministic).
    pub fn best_compression() -> Self {
        Self {
            compression: Compression::Best,
            filter: FilterType::Paeth,
        }
    }

    /// Create config optimized for speed (faster, but larger files).
    pub fn fast() -> Self {
        Self {
            compression: Compression::Fast,
            filter: FilterType::NoFilter,
        }
    }
}

/// Write an RGBA pixel buffer to a PNG file.
pub fn write_rgba(buffer: &PixelBuffer, path: &Path, config: &PngConfig) -> Result<(), PngError> {
    let file = std::fs::File::create(path)?;
    let writer = std::io::BufWriter::new(file);

    write_rgba_to_writer(buffer, writer, config)
}

/// Write an RGBA pixel buffer to any writer.
pub fn write_rgba_to_writer<W: Write>(
    buffer: &PixelBuffer,
    writer: W,
    config: &PngConfig,
) -> Result<(), PngError> {
    let mut encoder = Encoder::new(writer, buffer.width(), buffer.height());
    encoder.set_color(ColorType::Rgba);
    encoder.set_depth(BitDepth::Eight);
    encoder.set_compression(config.compression);
    encoder.set_filter(config.filter);

    // The png crate adds no timestamps or other variable chunks
    let mut png_writer = encoder.write_header()?;
    png_writer.write_image_data(buffer.as_raw())?;

    Ok(())
}

/// Encode to an in-memory PNG.
pub fn encode_png(buffer: &PixelBuffer, config: &PngConfig) -> Result<Vec<u8>, PngError> {
    let mut data = Vec::new();
    write_rgba_to_writer(buffer, &mut data, config)?;
    Ok(data)
}

/// Compute the BLAKE3 hash of encoded bytes.
pub fn hash_bytes(data: &[u8]) -> String {
    blake3::hash(data).to_hex().to_string()
}

/// Encode to an in-memory PNG and return its hash alongside.
pub fn encode_png_with_hash(
    buffer: &PixelBuffer,
    config: &PngConfig,
) -> Result<(Vec<u8>, String), PngError> {
    let data = encode_png(buffer, config)?;
    let hash = hash_bytes(&data);
    Ok((data, hash))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(w: u32, h: u32) -> PixelBuffer {
        PixelBuffer::from_fn(w, h, |x, y| {
            [(x * 255 / (w - 1)) as u8, (y * 255 / (h - 1)) as u8, 128, 255]
        })
        .unwrap()
    }

    #[test]
    fn test_rgba_deterministic() {
        let buffer = gradient(64, 64);
        let config = PngConfig::default();

        let (data1, hash1) = encode_png_with_hash(&buffer, &config).unwrap();
        let (data2, hash2) = encode_png_with_hash(&buffer, &config).unwrap();

        assert_eq!(data1, data2, "PNG data should be identical");
        assert_eq!(hash1, hash2, "PNG hashes should be identical");
    }

    #[test]
    fn test_png_signature_and_size() {
        let data = encode_png(&gradient(8, 4), &PngConfig::fast()).unwrap();
        assert_eq!(&data[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
        // IHDR width and height, big-endian
        assert_eq!(&data[16..20], &8u32.to_be_bytes());
        assert_eq!(&data[20..24], &4u32.to_be_bytes());
    }

    #[test]
    fn test_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        let buffer = gradient(16, 16);

        write_rgba(&buffer, &path, &PngConfig::best_compression()).unwrap();
        let on_disk = std::fs::read(&path).unwrap();
        assert_eq!(
            on_disk,
            encode_png(&buffer, &PngConfig::best_compression()).unwrap()
        );
    }
}
