//! Recipe validation logic.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{ErrorCode, ValidationError, ValidationResult, ValidationWarning, WarningCode};
use crate::recipe::{FilterParams, FilterRecipe, RECIPE_VERSION};

/// Accepted hex color forms: `#rgb`, `#rrggbb`, with or without the `#`.
const HEX_COLOR_PATTERN: &str = r"^#?([0-9a-fA-F]{3}|[0-9a-fA-F]{6})$";

/// ASCII grids wider than this trigger a warning.
const ASCII_COLUMNS_WARNING_THRESHOLD: u32 = 1000;

/// Widest ASCII grid accepted.
pub const MAX_ASCII_COLUMNS: u32 = 4096;

/// Largest accepted `char_aspect`.
pub const MAX_CHAR_ASPECT: f64 = 8.0;

/// Upper bound on `columns * rows` once the image size is known.
pub const MAX_ASCII_CELLS: u64 = 4096 * 4096;

/// Sketch blur radii above this are rejected.
pub const MAX_BLUR_RADIUS: u32 = 256;

static HEX_COLOR_REGEX: OnceLock<Regex> = OnceLock::new();

fn hex_color_regex() -> &'static Regex {
    HEX_COLOR_REGEX.get_or_init(|| Regex::new(HEX_COLOR_PATTERN).expect("invalid regex pattern"))
}

/// Returns true if `s` is a hex color accepted by the duotone filter.
pub fn is_hex_color(s: &str) -> bool {
    hex_color_regex().is_match(s)
}

/// Validates a recipe and returns a validation result.
///
/// # Arguments
/// * `recipe` - The recipe to validate
///
/// # Returns
/// * `ValidationResult` with `ok=true` if validation passed, with any warnings.
/// * `ValidationResult` with `ok=false` and errors if validation failed.
///
/// # Example
/// ```
/// use snapshade_spec::{FilterRecipe, FilterKind};
/// use snapshade_spec::validation::validate_recipe;
///
/// let recipe = FilterRecipe::new(FilterKind::Sketch.default_params());
/// assert!(validate_recipe(&recipe).is_ok());
/// ```
pub fn validate_recipe(recipe: &FilterRecipe) -> ValidationResult {
    let mut result = ValidationResult::success();

    if recipe.recipe_version != RECIPE_VERSION {
        result.add_error(ValidationError::with_path(
            ErrorCode::UnsupportedRecipeVersion,
            format!(
                "recipe_version must be {}, got {}",
                RECIPE_VERSION, recipe.recipe_version
            ),
            "recipe_version",
        ));
    }

    result.merge(validate_params(&recipe.filter));
    result
}

/// Validates filter parameters on their own.
///
/// Paths in the result are rooted at `filter`, matching their position in a
/// recipe document.
pub fn validate_params(params: &FilterParams) -> ValidationResult {
    let mut result = ValidationResult::success();

    match params {
        FilterParams::Grayscale(_) | FilterParams::Invert(_) => {}
        FilterParams::Sepia(p) => {
            check_unit(&mut result, p.intensity, "filter.intensity");
            if p.intensity == 0.0 {
                result.add_warning(ValidationWarning::with_path(
                    WarningCode::NoOpFilter,
                    "sepia intensity 0 leaves the image unchanged",
                    "filter.intensity",
                ));
            }
        }
        FilterParams::Duotone(p) => {
            check_color(&mut result, &p.shadow, "filter.shadow");
            check_color(&mut result, &p.highlight, "filter.highlight");
        }
        FilterParams::Pixelate(p) => {
            if p.block_size == 0 {
                result.add_error(ValidationError::with_path(
                    ErrorCode::ZeroSize,
                    "block_size must be at least 1",
                    "filter.block_size",
                ));
            } else if p.block_size == 1 {
                result.add_warning(ValidationWarning::with_path(
                    WarningCode::NoOpFilter,
                    "block_size 1 leaves the image unchanged",
                    "filter.block_size",
                ));
            }
        }
        FilterParams::Vignette(p) => {
            check_unit(&mut result, p.strength, "filter.strength");
            check_unit(&mut result, p.radius, "filter.radius");
            if p.strength == 0.0 || p.radius == 1.0 {
                result.add_warning(ValidationWarning::with_path(
                    WarningCode::NoOpFilter,
                    "vignette with strength 0 or radius 1 leaves the image unchanged",
                    "filter",
                ));
            }
        }
        FilterParams::Sketch(p) => {
            if p.blur_radius > MAX_BLUR_RADIUS {
                result.add_error(ValidationError::with_path(
                    ErrorCode::ParameterOutOfRange,
                    format!(
                        "blur_radius must be at most {}, got {}",
                        MAX_BLUR_RADIUS, p.blur_radius
                    ),
                    "filter.blur_radius",
                ));
            }
        }
        FilterParams::Vintage(p) => {
            check_unit(&mut result, p.sepia, "filter.sepia");
            check_unit(&mut result, p.fade, "filter.fade");
            check_unit(&mut result, p.vignette, "filter.vignette");
            check_unit(&mut result, p.grain, "filter.grain");
        }
        FilterParams::Ascii(p) => {
            if p.columns == 0 {
                result.add_error(ValidationError::with_path(
                    ErrorCode::ZeroSize,
                    "columns must be at least 1",
                    "filter.columns",
                ));
            } else if p.columns > MAX_ASCII_COLUMNS {
                result.add_error(ValidationError::with_path(
                    ErrorCode::ParameterOutOfRange,
                    format!(
                        "columns must be at most {}, got {}",
                        MAX_ASCII_COLUMNS, p.columns
                    ),
                    "filter.columns",
                ));
            } else if p.columns > ASCII_COLUMNS_WARNING_THRESHOLD {
                result.add_warning(ValidationWarning::with_path(
                    WarningCode::WideAsciiGrid,
                    format!(
                        "{} columns is wider than most viewers can display",
                        p.columns
                    ),
                    "filter.columns",
                ));
            }
            if !(p.char_aspect > 0.0 && p.char_aspect <= MAX_CHAR_ASPECT) {
                result.add_error(ValidationError::with_path(
                    ErrorCode::ParameterOutOfRange,
                    format!(
                        "char_aspect must be in (0, {}], got {}",
                        MAX_CHAR_ASPECT, p.char_aspect
                    ),
                    "filter.char_aspect",
                ));
            }
            if p.density.chars().count() < 2 {
                result.add_error(ValidationError::with_path(
                    ErrorCode::DensityTooShort,
                    "density ramp needs at least 2 characters",
                    "filter.density",
                ));
            }
        }
    }

    result
}

fn check_unit(result: &mut ValidationResult, value: f64, path: &str) {
    // NaN fails `contains` as well
    if !(0.0..=1.0).contains(&value) {
        result.add_error(ValidationError::with_path(
            ErrorCode::ParameterOutOfRange,
            format!("value must be in [0, 1], got {}", value),
            path,
        ));
    }
}

fn check_color(result: &mut ValidationResult, value: &str, path: &str) {
    if !is_hex_color(value) {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidColor,
            format!("'{}' is not a hex color (#rgb or #rrggbb)", value),
            path,
        ));
    }
}
