//! Per-pixel tone filters: grayscale, sepia, invert.

use snapshade_spec::{GrayscaleMethod, GrayscaleParams, SepiaParams};

use crate::buffer::PixelBuffer;
use crate::color::{channel_u8, rgb_average, rgb_luminance};

/// Reduce every pixel to one gray level.
pub fn grayscale(input: &PixelBuffer, params: &GrayscaleParams) -> PixelBuffer {
    input.map_pixels(|px| {
        let v = match params.method {
            GrayscaleMethod::Average => rgb_average(px),
            GrayscaleMethod::Luminance => rgb_luminance(px),
        };
        let v = channel_u8(v);
        [v, v, v, px[3]]
    })
}

/// Sepia toning blended with the original by `intensity`.
pub fn sepia(input: &PixelBuffer, params: &SepiaParams) -> PixelBuffer {
    input.map_pixels(|px| {
        let [r, g, b] = sepia_rgb([px[0] as f64, px[1] as f64, px[2] as f64], params.intensity);
        [channel_u8(r), channel_u8(g), channel_u8(b), px[3]]
    })
}

/// Photographic negative; alpha is kept.
pub fn invert(input: &PixelBuffer) -> PixelBuffer {
    input.map_pixels(|px| [255 - px[0], 255 - px[1], 255 - px[2], px[3]])
}

/// Sepia matrix on 0-255 floats, each toned channel capped at 255 before
/// blending with the source.
pub(crate) fn sepia_rgb(rgb: [f64; 3], intensity: f64) -> [f64; 3] {
    let [r, g, b] = rgb;
    let toned = [
        (0.393 * r + 0.769 * g + 0.189 * b).min(255.0),
        (0.349 * r + 0.686 * g + 0.168 * b).min(255.0),
        (0.272 * r + 0.534 * g + 0.131 * b).min(255.0),
    ];
    let t = intensity.clamp(0.0, 1.0);
    [
        r + (toned[0] - r) * t,
        g + (toned[1] - g) * t,
        b + (toned[2] - b) * t,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one(px: [u8; 4]) -> PixelBuffer {
        PixelBuffer::filled(1, 1, px).unwrap()
    }

    #[test]
    fn test_grayscale_average_and_luminance() {
        let input = one([255, 0, 0, 128]);

        let avg = grayscale(&input, &GrayscaleParams::default());
        assert_eq!(avg.get(0, 0), [85, 85, 85, 128]);

        let luma = grayscale(
            &input,
            &GrayscaleParams {
                method: GrayscaleMethod::Luminance,
            },
        );
        assert_eq!(luma.get(0, 0), [76, 76, 76, 128]);
    }

    #[test]
    fn test_sepia_full_intensity() {
        let out = sepia(&one([100, 150, 210, 255]), &SepiaParams::default());
        // 0.393*100 + 0.769*150 + 0.189*210 = 194.34
        // 0.349*100 + 0.686*150 + 0.168*210 = 173.08
        // 0.272*100 + 0.534*150 + 0.131*210 = 134.81
        assert_eq!(out.get(0, 0), [194, 173, 135, 255]);
    }

    #[test]
    fn test_sepia_caps_white() {
        let out = sepia(&one([255, 255, 255, 255]), &SepiaParams::default());
        // blue: 0.937*255 = 238.935
        assert_eq!(out.get(0, 0), [255, 255, 239, 255]);
    }

    #[test]
    fn test_sepia_zero_intensity_is_identity() {
        let input = PixelBuffer::from_fn(4, 4, |x, y| [x as u8 * 60, y as u8 * 60, 33, 250]).unwrap();
        assert_eq!(sepia(&input, &SepiaParams { intensity: 0.0 }), input);
    }

    #[test]
    fn test_invert_twice_is_identity() {
        let input = PixelBuffer::from_fn(3, 3, |x, y| [x as u8 * 90, y as u8 * 7, 255, 17]).unwrap();
        let once = invert(&input);
        assert_eq!(once.get(0, 0), [255, 255, 0, 17]);
        assert_eq!(invert(&once), input);
    }
}
