//! Radial vignette.

use snapshade_spec::VignetteParams;

use crate::buffer::PixelBuffer;
use crate::color::channel_u8;

/// Darken RGB toward the corners; alpha is kept.
pub fn vignette(input: &PixelBuffer, params: &VignetteParams) -> PixelBuffer {
    let (w, h) = (input.width(), input.height());
    let mut out = input.clone();

    for y in 0..h {
        for x in 0..w {
            let factor = vignette_factor(x, y, w, h, params.strength, params.radius);
            if factor < 1.0 {
                let px = input.get(x, y);
                out.set(
                    x,
                    y,
                    [
                        channel_u8(px[0] as f64 * factor),
                        channel_u8(px[1] as f64 * factor),
                        channel_u8(px[2] as f64 * factor),
                        px[3],
                    ],
                );
            }
        }
    }

    out
}

/// Brightness multiplier for pixel (x, y) of a `w x h` image.
///
/// Distance is measured from pixel centers and normalized so the image
/// corner sits at 1.0. Inside `radius` the factor is 1; beyond it the factor
/// falls quadratically to `1 - strength` at the corner.
pub fn vignette_factor(x: u32, y: u32, w: u32, h: u32, strength: f64, radius: f64) -> f64 {
    if radius >= 1.0 || strength <= 0.0 {
        return 1.0;
    }

    let cx = w as f64 / 2.0;
    let cy = h as f64 / 2.0;
    let max_dist = (cx * cx + cy * cy).sqrt();

    let dx = x as f64 + 0.5 - cx;
    let dy = y as f64 + 0.5 - cy;
    let d = ((dx * dx + dy * dy).sqrt() / max_dist).min(1.0);

    if d <= radius {
        return 1.0;
    }

    let t = (d - radius) / (1.0 - radius);
    (1.0 - strength * t * t).clamp(0.0, 1.0)
}
