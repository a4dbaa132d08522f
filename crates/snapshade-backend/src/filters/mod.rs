//! Photo filters.
//!
//! Every filter is a pure function of the input buffer and its parameters.
//! [`apply_filter`] validates the parameters and dispatches on the filter kind.

mod ascii;
mod blur;
mod duotone;
mod pixelate;
mod sketch;
mod tone;
mod vignette;
mod vintage;

pub use ascii::{ascii_art, ascii_grid_size, AsciiArt};
pub use blur::box_blur;
pub use duotone::duotone;
pub use pixelate::pixelate;
pub use sketch::sketch;
pub use tone::{grayscale, invert, sepia};
pub use vignette::{vignette, vignette_factor};
pub use vintage::vintage;

use std::time::Instant;

use snapshade_spec::validation::validate_params;
use snapshade_spec::{BackendError, FilterParams, OutputKind};
use thiserror::Error;

use crate::buffer::{BufferError, PixelBuffer};
use crate::color::ColorParseError;

/// Errors from applying a filter.
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error(transparent)]
    Color(#[from] ColorParseError),

    #[error(transparent)]
    Buffer(#[from] BufferError),
}

impl BackendError for FilterError {
    fn code(&self) -> &'static str {
        match self {
            FilterError::InvalidParameter(_) => "FILTER_001",
            FilterError::Color(_) => "FILTER_002",
            FilterError::Buffer(_) => "FILTER_003",
        }
    }

    fn category(&self) -> &'static str {
        "filter"
    }
}

/// The product of a filter.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterOutput {
    Image(PixelBuffer),
    Text(AsciiArt),
}

impl FilterOutput {
    /// Whether this is an image or text.
    pub fn kind(&self) -> OutputKind {
        match self {
            FilterOutput::Image(_) => OutputKind::Image,
            FilterOutput::Text(_) => OutputKind::Text,
        }
    }

    pub fn as_image(&self) -> Option<&PixelBuffer> {
        match self {
            FilterOutput::Image(buf) => Some(buf),
            FilterOutput::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&AsciiArt> {
        match self {
            FilterOutput::Text(art) => Some(art),
            FilterOutput::Image(_) => None,
        }
    }
}

/// Apply one filter to `input`.
///
/// Parameters are validated first; any validation error is returned as
/// [`FilterError::InvalidParameter`] and the input is not touched.
pub fn apply_filter(
    input: &PixelBuffer,
    params: &FilterParams,
) -> Result<FilterOutput, FilterError> {
    if let Err(errors) = validate_params(params).into_result() {
        let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        return Err(FilterError::InvalidParameter(messages.join("; ")));
    }

    let start = Instant::now();
    let output = match params {
        FilterParams::Grayscale(p) => FilterOutput::Image(grayscale(input, p)),
        FilterParams::Sepia(p) => FilterOutput::Image(sepia(input, p)),
        FilterParams::Invert(_) => FilterOutput::Image(invert(input)),
        FilterParams::Duotone(p) => FilterOutput::Image(duotone(input, p)?),
        FilterParams::Pixelate(p) => FilterOutput::Image(pixelate(input, p)),
        FilterParams::Vignette(p) => FilterOutput::Image(vignette(input, p)),
        FilterParams::Sketch(p) => FilterOutput::Image(sketch(input, p)),
        FilterParams::Vintage(p) => FilterOutput::Image(vintage(input, p)),
        FilterParams::Ascii(p) => FilterOutput::Text(ascii_art(input, p)?),
    };

    log::debug!(
        "{} applied to {}x{} in {:.2?}",
        params.kind(),
        input.width(),
        input.height(),
        start.elapsed()
    );
    Ok(output)
}
