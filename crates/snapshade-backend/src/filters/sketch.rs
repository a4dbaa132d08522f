//! Pencil sketch: color dodge of the gray image with its blurred negative.

use snapshade_spec::SketchParams;

use super::blur::box_blur;
use crate::buffer::PixelBuffer;
use crate::color::{channel_u8, rgb_average};

pub fn sketch(input: &PixelBuffer, params: &SketchParams) -> PixelBuffer {
    let w = input.width() as usize;
    let h = input.height() as usize;

    // Intermediate layers are quantized to bytes, as a canvas would store them.
    let gray: Vec<u8> = input
        .pixels()
        .map(|px| channel_u8(rgb_average([px[0], px[1], px[2], px[3]])))
        .collect();
    let negative: Vec<f64> = gray.iter().map(|&g| (255 - g) as f64).collect();
    let blurred = box_blur(&negative, w, h, params.blur_radius);

    let mut out = input.clone();
    for (i, px) in out.pixels_mut().enumerate() {
        let v = color_dodge(gray[i], channel_u8(blurred[i]));
        px[0] = v;
        px[1] = v;
        px[2] = v;
    }
    out
}

/// `base / (1 - blend)` on the 0-255 scale, rounded to the nearest level.
#[inline]
fn color_dodge(base: u8, blend: u8) -> u8 {
    if blend == 255 {
        return 255;
    }
    channel_u8(base as f64 * 255.0 / (255 - blend) as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_dodge() {
        assert_eq!(color_dodge(0, 255), 255);
        assert_eq!(color_dodge(0, 100), 0);
        assert_eq!(color_dodge(100, 155), 255);
        assert_eq!(color_dodge(255, 0), 255);
    }

    #[test]
    fn test_color_dodge_rounds_half_up() {
        // 100 * 255 / 200 = 127.5
        assert_eq!(color_dodge(100, 55), 128);
        // 10 * 255 / 155 = 16.45
        assert_eq!(color_dodge(10, 100), 16);
        // 2 * 255 / 3 = 170.0
        assert_eq!(color_dodge(2, 252), 170);
    }

    #[test]
    fn test_flat_regions_turn_white() {
        let input = PixelBuffer::filled(16, 16, [90, 120, 60, 255]).unwrap();
        let out = sketch(&input, &SketchParams::default());
        assert!(out.pixels().all(|px| px == [255, 255, 255, 255]));
    }

    #[test]
    fn test_edge_leaves_dark_stroke() {
        // Left half black, right half white
        let input = PixelBuffer::from_fn(40, 4, |x, _| {
            if x < 20 {
                [0, 0, 0, 255]
            } else {
                [255, 255, 255, 200]
            }
        })
        .unwrap();
        let out = sketch(&input, &SketchParams { blur_radius: 2 });

        // Far from the edge both sides are paper white
        assert_eq!(out.get(0, 0), [255, 255, 255, 255]);
        assert_eq!(out.get(39, 0), [255, 255, 255, 200]);
        // The dark side of the edge draws the line
        assert_eq!(out.get(19, 1), [0, 0, 0, 255]);
    }

    #[test]
    fn test_zero_radius_is_all_white() {
        let input =
            PixelBuffer::from_fn(8, 8, |x, y| [(x * 30) as u8, (y * 30) as u8, 0, 255]).unwrap();
        let out = sketch(&input, &SketchParams { blur_radius: 0 });
        assert!(out.pixels().all(|px| px[..3] == [255, 255, 255]));
    }
}
