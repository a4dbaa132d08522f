//! Area-averaging resampler.

use crate::buffer::{BufferError, PixelBuffer};
use crate::color::channel_u8;

/// Resize to `width x height` by averaging the source pixels each target
/// pixel covers.
///
/// When enlarging, a target pixel covers less than one source pixel and the
/// nearest source pixel is used.
pub fn resize_area(
    input: &PixelBuffer,
    width: u32,
    height: u32,
) -> Result<PixelBuffer, BufferError> {
    if width == input.width() && height == input.height() {
        return Ok(input.clone());
    }

    let src_w = input.width() as u64;
    let src_h = input.height() as u64;
    let span = |i: u32, dst: u32, src: u64| -> (u32, u32) {
        let start = (i as u64 * src / dst as u64) as u32;
        let end = ((i as u64 + 1) * src / dst as u64) as u32;
        (start, end.max(start + 1).min(src as u32))
    };

    let mut out = PixelBuffer::filled(width, height, [0, 0, 0, 0])?;

    for ty in 0..out.height() {
        let (y0, y1) = span(ty, out.height(), src_h);
        for tx in 0..out.width() {
            let (x0, x1) = span(tx, out.width(), src_w);

            let mut sum = [0u64; 4];
            for y in y0..y1 {
                for x in x0..x1 {
                    for (acc, v) in sum.iter_mut().zip(input.get(x, y)) {
                        *acc += v as u64;
                    }
                }
            }

            let count = ((x1 - x0) * (y1 - y0)) as f64;
            out.set(
                tx,
                ty,
                [
                    channel_u8(sum[0] as f64 / count),
                    channel_u8(sum[1] as f64 / count),
                    channel_u8(sum[2] as f64 / count),
                    channel_u8(sum[3] as f64 / count),
                ],
            );
        }
    }

    Ok(out)
}
