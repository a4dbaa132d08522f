//! RGBA8 pixel buffer.

use thiserror::Error;

/// Bytes per pixel (R, G, B, A).
pub const CHANNELS: usize = 4;

/// Errors from constructing a pixel buffer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BufferError {
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Buffer length mismatch: expected {expected} bytes, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}

/// A 2D image as RGBA8 quadruples in row-major order.
///
/// Always holds `width * height * 4` bytes with both dimensions non-zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap raw RGBA8 bytes.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self, BufferError> {
        let expected = Self::byte_len(width, height)?;
        if data.len() != expected {
            return Err(BufferError::LengthMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Create a buffer filled with one color.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Result<Self, BufferError> {
        let len = Self::byte_len(width, height)?;
        let data = rgba.iter().copied().cycle().take(len).collect();
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Create a buffer by evaluating `f(x, y)` for every pixel.
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Result<Self, BufferError>
    where
        F: FnMut(u32, u32) -> [u8; 4],
    {
        let len = Self::byte_len(width, height)?;
        let mut data = Vec::with_capacity(len);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&f(x, y));
            }
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    fn byte_len(width: u32, height: u32) -> Result<usize, BufferError> {
        if width == 0 || height == 0 {
            return Err(BufferError::InvalidDimensions { width, height });
        }
        (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(CHANNELS))
            .ok_or(BufferError::InvalidDimensions { width, height })
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Byte offset of the pixel at (x, y).
    #[inline]
    pub fn index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * CHANNELS
    }

    /// Get a pixel at the given coordinates.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> [u8; 4] {
        let i = self.index(x, y);
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    /// Set a pixel at the given coordinates.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        let i = self.index(x, y);
        self.data[i..i + CHANNELS].copy_from_slice(&rgba);
    }

    /// Iterate pixels as 4-byte slices.
    pub fn pixels(&self) -> std::slice::ChunksExact<'_, u8> {
        self.data.chunks_exact(CHANNELS)
    }

    /// Iterate pixels mutably as 4-byte slices.
    pub fn pixels_mut(&mut self) -> std::slice::ChunksExactMut<'_, u8> {
        self.data.chunks_exact_mut(CHANNELS)
    }

    /// Raw RGBA bytes.
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    /// Consume the buffer, returning its bytes.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Copy of this buffer with `f` applied to every pixel.
    pub(crate) fn map_pixels<F>(&self, mut f: F) -> PixelBuffer
    where
        F: FnMut([u8; 4]) -> [u8; 4],
    {
        let mut out = self.clone();
        for px in out.pixels_mut() {
            let mapped = f([px[0], px[1], px[2], px[3]]);
            px.copy_from_slice(&mapped);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_checks_length() {
        assert!(PixelBuffer::new(2, 2, vec![0; 16]).is_ok());
        assert_eq!(
            PixelBuffer::new(2, 2, vec![0; 15]),
            Err(BufferError::LengthMismatch {
                expected: 16,
                actual: 15
            })
        );
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert_eq!(
            PixelBuffer::new(0, 3, vec![]),
            Err(BufferError::InvalidDimensions {
                width: 0,
                height: 3
            })
        );
        assert!(PixelBuffer::filled(3, 0, [0, 0, 0, 255]).is_err());
    }

    #[test]
    fn test_get_set_row_major() {
        let mut buf = PixelBuffer::filled(3, 2, [0, 0, 0, 255]).unwrap();
        buf.set(2, 1, [10, 20, 30, 40]);
        assert_eq!(buf.get(2, 1), [10, 20, 30, 40]);
        assert_eq!(buf.index(2, 1), 20);
        assert_eq!(&buf.as_raw()[20..24], &[10, 20, 30, 40]);
    }

    #[test]
    fn test_from_fn_and_pixel_count() {
        let buf = PixelBuffer::from_fn(4, 3, |x, y| [x as u8, y as u8, 0, 255]).unwrap();
        assert_eq!(buf.pixel_count(), 12);
        assert_eq!(buf.pixels().count(), 12);
        assert_eq!(buf.get(3, 2), [3, 2, 0, 255]);
        assert_eq!(buf.into_raw().len(), 48);
    }
}
