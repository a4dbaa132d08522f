//! Per-filter parameter types.
//!
//! Every struct carries serde defaults, so a recipe only needs to name the
//! values it changes.

use serde::{Deserialize, Serialize};

/// Default ASCII density ramp, densest glyph first.
pub const DEFAULT_DENSITY: &str = "Ñ@#W$9876543210?!abc;:+=-,._ ";

/// How a color is reduced to a single gray level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrayscaleMethod {
    /// Unweighted mean of R, G and B.
    #[default]
    Average,
    /// BT.601 luma weights.
    Luminance,
}

/// Parameters for the grayscale filter.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GrayscaleParams {
    /// Reduction method.
    pub method: GrayscaleMethod,
}

/// Parameters for the sepia filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SepiaParams {
    /// Blend between the original (0.0) and full sepia (1.0).
    pub intensity: f64,
}

impl Default for SepiaParams {
    fn default() -> Self {
        Self { intensity: 1.0 }
    }
}

/// The invert filter takes no parameters.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InvertParams {}

/// Parameters for the duotone filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DuotoneParams {
    /// Hex color mapped to black.
    pub shadow: String,
    /// Hex color mapped to white.
    pub highlight: String,
}

impl Default for DuotoneParams {
    fn default() -> Self {
        Self {
            shadow: "#1b1464".to_string(),
            highlight: "#ffd23f".to_string(),
        }
    }
}

/// Parameters for the pixelate filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PixelateParams {
    /// Edge length of a block in pixels.
    pub block_size: u32,
}

impl Default for PixelateParams {
    fn default() -> Self {
        Self { block_size: 10 }
    }
}

/// Parameters for the vignette filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VignetteParams {
    /// Darkening at the corners (0-1).
    pub strength: f64,
    /// Normalized distance from the center where darkening begins (0-1).
    pub radius: f64,
}

impl Default for VignetteParams {
    fn default() -> Self {
        Self {
            strength: 0.5,
            radius: 0.5,
        }
    }
}

/// Parameters for the pencil sketch filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SketchParams {
    /// Box blur radius applied to the inverted gray layer.
    pub blur_radius: u32,
}

impl Default for SketchParams {
    fn default() -> Self {
        Self { blur_radius: 3 }
    }
}

/// Parameters for the vintage filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VintageParams {
    /// Sepia intensity (0-1).
    pub sepia: f64,
    /// Contrast fade toward mid-gray (0-1).
    pub fade: f64,
    /// Vignette strength (0-1).
    pub vignette: f64,
    /// Film grain amount (0-1).
    pub grain: f64,
    /// Seed for the grain generator.
    pub seed: u32,
}

impl Default for VintageParams {
    fn default() -> Self {
        Self {
            sepia: 0.6,
            fade: 0.2,
            vignette: 0.35,
            grain: 0.08,
            seed: 0,
        }
    }
}

/// Parameters for the ASCII-art filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AsciiParams {
    /// Characters per line.
    pub columns: u32,
    /// Glyph width divided by glyph height, used to keep proportions.
    pub char_aspect: f64,
    /// Density ramp, densest glyph first.
    pub density: String,
    /// Map bright pixels to dense glyphs instead (for light-on-dark display).
    pub invert: bool,
}

impl Default for AsciiParams {
    fn default() -> Self {
        Self {
            columns: 120,
            char_aspect: 0.5,
            density: DEFAULT_DENSITY.to_string(),
            invert: false,
        }
    }
}
