//! Vintage print: sepia, faded contrast, warm cast, vignette and film grain.

use snapshade_spec::VintageParams;

use super::tone::sepia_rgb;
use super::vignette::vignette_factor;
use crate::buffer::PixelBuffer;
use crate::color::channel_u8;
use crate::rng::DeterministicRng;

/// Vignette radius used by the vintage look.
const VINTAGE_VIGNETTE_RADIUS: f64 = 0.45;

/// Peak grain offset in 0-255 units at `grain = 1`.
const GRAIN_AMPLITUDE: f64 = 48.0;

/// Portion of the distance to mid-gray covered at `fade = 1`.
const FADE_SCALE: f64 = 0.35;

const WARM_RED: f64 = 1.05;
const WARM_BLUE: f64 = 0.92;

/// Same input and parameters (including `seed`) give identical bytes.
pub fn vintage(input: &PixelBuffer, params: &VintageParams) -> PixelBuffer {
    let (w, h) = (input.width(), input.height());
    let mut rng = DeterministicRng::new(params.seed);
    let mut out = input.clone();

    for y in 0..h {
        for x in 0..w {
            let px = input.get(x, y);
            let [mut r, mut g, mut b] =
                sepia_rgb([px[0] as f64, px[1] as f64, px[2] as f64], params.sepia);

            let fade = params.fade * FADE_SCALE;
            r += (128.0 - r) * fade;
            g += (128.0 - g) * fade;
            b += (128.0 - b) * fade;

            r *= WARM_RED;
            b *= WARM_BLUE;

            let factor = vignette_factor(x, y, w, h, params.vignette, VINTAGE_VIGNETTE_RADIUS);
            r *= factor;
            g *= factor;
            b *= factor;

            if params.grain > 0.0 {
                let noise = rng.gen_signed_f64() * params.grain * GRAIN_AMPLITUDE;
                r += noise;
                g += noise;
                b += noise;
            }

            out.set(x, y, [channel_u8(r), channel_u8(g), channel_u8(b), px[3]]);
        }
    }

    out
}
