//! Image decoding into RGBA8 pixel buffers.

use std::path::Path;

use thiserror::Error;

use crate::buffer::{BufferError, PixelBuffer};

/// Errors from decoding image bytes.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("no image data")]
    Empty,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image decode error: {0}")]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Buffer(#[from] BufferError),
}

/// Decode PNG or JPEG bytes into an RGBA8 buffer.
///
/// Grayscale, RGB and 16-bit inputs are converted; alpha defaults to opaque.
pub fn decode_image(bytes: &[u8]) -> Result<PixelBuffer, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::Empty);
    }

    let format = image::guess_format(bytes)?;
    log::debug!("decoding {} bytes as {:?}", bytes.len(), format);

    let rgba = image::load_from_memory_with_format(bytes, format)?.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(PixelBuffer::new(width, height, rgba.into_raw())?)
}

/// Read and decode an image file.
pub fn decode_file(path: &Path) -> Result<PixelBuffer, DecodeError> {
    let bytes = std::fs::read(path)?;
    decode_image(&bytes)
}
