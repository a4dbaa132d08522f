//! Filter recipe types.

mod overrides;
mod params;

pub use overrides::parse_override;
pub use params::{
    AsciiParams, DuotoneParams, GrayscaleMethod, GrayscaleParams, InvertParams, PixelateParams,
    SepiaParams, SketchParams, VignetteParams, VintageParams, DEFAULT_DENSITY,
};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SpecError;

/// Current recipe format version.
pub const RECIPE_VERSION: u32 = 1;

/// What a filter produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputKind {
    /// An RGBA image, exported as PNG.
    Image,
    /// UTF-8 text, exported as a .txt file.
    Text,
}

impl OutputKind {
    /// File extension used when exporting this kind.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputKind::Image => "png",
            OutputKind::Text => "txt",
        }
    }
}

/// Filter identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    Grayscale,
    Sepia,
    Invert,
    Duotone,
    Pixelate,
    Vignette,
    Sketch,
    Vintage,
    Ascii,
}

impl FilterKind {
    /// Every filter, in menu order.
    pub const ALL: [FilterKind; 9] = [
        FilterKind::Grayscale,
        FilterKind::Sepia,
        FilterKind::Invert,
        FilterKind::Duotone,
        FilterKind::Pixelate,
        FilterKind::Vignette,
        FilterKind::Sketch,
        FilterKind::Vintage,
        FilterKind::Ascii,
    ];

    /// Returns the recipe name of this filter.
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterKind::Grayscale => "grayscale",
            FilterKind::Sepia => "sepia",
            FilterKind::Invert => "invert",
            FilterKind::Duotone => "duotone",
            FilterKind::Pixelate => "pixelate",
            FilterKind::Vignette => "vignette",
            FilterKind::Sketch => "sketch",
            FilterKind::Vintage => "vintage",
            FilterKind::Ascii => "ascii",
        }
    }

    /// One-line description for listings.
    pub fn description(&self) -> &'static str {
        match self {
            FilterKind::Grayscale => "Remove color, keeping brightness",
            FilterKind::Sepia => "Warm brown photographic toning",
            FilterKind::Invert => "Photographic negative",
            FilterKind::Duotone => "Map brightness onto a two-color gradient",
            FilterKind::Pixelate => "Average square blocks into large pixels",
            FilterKind::Vignette => "Darken toward the corners",
            FilterKind::Sketch => "Pencil drawing via color-dodge of a blurred negative",
            FilterKind::Vintage => "Faded sepia print with vignette and grain",
            FilterKind::Ascii => "Render the image as text characters",
        }
    }

    /// What this filter produces.
    pub fn output_kind(&self) -> OutputKind {
        match self {
            FilterKind::Ascii => OutputKind::Text,
            _ => OutputKind::Image,
        }
    }

    /// Default parameters for this filter.
    pub fn default_params(&self) -> FilterParams {
        match self {
            FilterKind::Grayscale => FilterParams::Grayscale(GrayscaleParams::default()),
            FilterKind::Sepia => FilterParams::Sepia(SepiaParams::default()),
            FilterKind::Invert => FilterParams::Invert(InvertParams::default()),
            FilterKind::Duotone => FilterParams::Duotone(DuotoneParams::default()),
            FilterKind::Pixelate => FilterParams::Pixelate(PixelateParams::default()),
            FilterKind::Vignette => FilterParams::Vignette(VignetteParams::default()),
            FilterKind::Sketch => FilterParams::Sketch(SketchParams::default()),
            FilterKind::Vintage => FilterParams::Vintage(VintageParams::default()),
            FilterKind::Ascii => FilterParams::Ascii(AsciiParams::default()),
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FilterKind {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| SpecError::UnknownFilter(s.to_string()))
    }
}

/// A filter selection together with its parameter values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FilterParams {
    Grayscale(GrayscaleParams),
    Sepia(SepiaParams),
    Invert(InvertParams),
    Duotone(DuotoneParams),
    Pixelate(PixelateParams),
    Vignette(VignetteParams),
    Sketch(SketchParams),
    Vintage(VintageParams),
    Ascii(AsciiParams),
}

impl FilterParams {
    /// Returns the filter these parameters belong to.
    pub fn kind(&self) -> FilterKind {
        match self {
            FilterParams::Grayscale(_) => FilterKind::Grayscale,
            FilterParams::Sepia(_) => FilterKind::Sepia,
            FilterParams::Invert(_) => FilterKind::Invert,
            FilterParams::Duotone(_) => FilterKind::Duotone,
            FilterParams::Pixelate(_) => FilterKind::Pixelate,
            FilterParams::Vignette(_) => FilterKind::Vignette,
            FilterParams::Sketch(_) => FilterKind::Sketch,
            FilterParams::Vintage(_) => FilterKind::Vintage,
            FilterParams::Ascii(_) => FilterKind::Ascii,
        }
    }

    /// Build parameters for `kind` from defaults plus `key=value` overrides.
    ///
    /// Values that parse as JSON numbers or booleans are used as such; anything
    /// else is taken as a string, so `shadow=#000000` needs no quoting.
    pub fn from_overrides(
        kind: FilterKind,
        overrides: &[(String, String)],
    ) -> Result<FilterParams, SpecError> {
        overrides::build_params(kind, overrides)
    }

    /// Returns a copy with the grain seed replaced, if the filter has one.
    pub fn with_seed(&self, seed: u32) -> FilterParams {
        match self {
            FilterParams::Vintage(p) => FilterParams::Vintage(VintageParams {
                seed,
                ..p.clone()
            }),
            other => other.clone(),
        }
    }
}

/// A recipe document: one filter with its parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterRecipe {
    /// Format version, currently always [`RECIPE_VERSION`].
    pub recipe_version: u32,
    /// The filter to apply.
    pub filter: FilterParams,
}

impl FilterRecipe {
    /// Creates a recipe at the current version.
    pub fn new(filter: FilterParams) -> Self {
        Self {
            recipe_version: RECIPE_VERSION,
            filter,
        }
    }

    /// Parses a recipe from JSON.
    pub fn from_json(json: &str) -> Result<Self, SpecError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, SpecError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Serializes to a JSON value.
    pub fn to_value(&self) -> Result<serde_json::Value, SpecError> {
        Ok(serde_json::to_value(self)?)
    }
}

#[cfg(test)]
mod tests;
