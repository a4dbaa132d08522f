//! Duotone: brightness mapped onto a shadow-to-highlight gradient.

use snapshade_spec::DuotoneParams;

use super::FilterError;
use crate::buffer::PixelBuffer;
use crate::color::{rgb_average, Color};

pub fn duotone(input: &PixelBuffer, params: &DuotoneParams) -> Result<PixelBuffer, FilterError> {
    let shadow = Color::from_hex(&params.shadow)?;
    let highlight = Color::from_hex(&params.highlight)?;

    Ok(input.map_pixels(|px| {
        let t = rgb_average(px) / 255.0;
        let [r, g, b] = shadow.lerp(&highlight, t).to_rgb8();
        [r, g, b, px[3]]
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(shadow: &str, highlight: &str) -> DuotoneParams {
        DuotoneParams {
            shadow: shadow.to_string(),
            highlight: highlight.to_string(),
        }
    }

    #[test]
    fn test_endpoints_map_to_colors() {
        let input = PixelBuffer::from_fn(2, 1, |x, _| {
            if x == 0 {
                [0, 0, 0, 255]
            } else {
                [255, 255, 255, 90]
            }
        })
        .unwrap();
        let out = duotone(&input, &params("#102030", "#f0e0d0")).unwrap();
        assert_eq!(out.get(0, 0), [0x10, 0x20, 0x30, 255]);
        assert_eq!(out.get(1, 0), [0xf0, 0xe0, 0xd0, 90]);
    }

    #[test]
    fn test_midtone_interpolates() {
        let input = PixelBuffer::filled(1, 1, [51, 51, 51, 255]).unwrap();
        let out = duotone(&input, &params("#000000", "#ff0000")).unwrap();
        // 51/255 = 0.2 of the way to pure red
        assert_eq!(out.get(0, 0), [51, 0, 0, 255]);
    }

    #[test]
    fn test_bad_color_is_an_error() {
        let input = PixelBuffer::filled(1, 1, [0, 0, 0, 255]).unwrap();
        assert!(matches!(
            duotone(&input, &params("black", "#fff")),
            Err(FilterError::Color(_))
        ));
    }
}
