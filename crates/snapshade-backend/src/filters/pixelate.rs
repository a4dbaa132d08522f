//! Pixelate: each square block takes its mean color.

use snapshade_spec::PixelateParams;

use crate::buffer::PixelBuffer;
use crate::color::channel_u8;

/// Blocks start at the top-left corner; blocks on the right and bottom edges
/// are cut to the image bounds and averaged over what remains.
pub fn pixelate(input: &PixelBuffer, params: &PixelateParams) -> PixelBuffer {
    let block = params.block_size.max(1);
    if block == 1 {
        return input.clone();
    }

    let w = input.width();
    let h = input.height();
    let mut out = input.clone();

    for by in (0..h).step_by(block as usize) {
        let y1 = (by + block).min(h);
        for bx in (0..w).step_by(block as usize) {
            let x1 = (bx + block).min(w);

            let mut sum = [0u64; 4];
            for y in by..y1 {
                for x in bx..x1 {
                    for (acc, v) in sum.iter_mut().zip(input.get(x, y)) {
                        *acc += v as u64;
                    }
                }
            }

            let count = ((x1 - bx) * (y1 - by)) as f64;
            let mean = sum.map(|s| channel_u8(s as f64 / count));
            for y in by..y1 {
                for x in bx..x1 {
                    out.set(x, y, mean);
                }
            }
        }
    }

    out
}
