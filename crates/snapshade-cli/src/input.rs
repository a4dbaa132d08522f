//! Recipe loading.
//!
//! A recipe comes either from a JSON file or from `--filter` plus `--param`
//! flags on the command line. Both paths produce a [`FilterRecipe`].

use snapshade_spec::recipe::parse_override;
use snapshade_spec::{FilterKind, FilterParams, FilterRecipe, SpecError};
use std::path::{Path, PathBuf};

use crate::commands::json_output::error_codes;

/// Result of loading a recipe file.
#[derive(Debug)]
pub struct LoadResult {
    /// The parsed recipe.
    pub recipe: FilterRecipe,
    /// BLAKE3 hash of the file content (hex string).
    pub source_hash: String,
}

/// Errors that can occur while building a recipe.
#[derive(Debug)]
pub enum InputError {
    /// File could not be read.
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// JSON parsing failed.
    JsonParse { message: String },

    /// `--filter` named no known filter.
    UnknownFilter { name: String },

    /// A `--param` was malformed or did not fit the filter.
    InvalidParam { message: String },

    /// Neither or both of `--filter` and `--recipe` were given.
    MissingRecipe,
}

impl InputError {
    /// Stable code for JSON output.
    pub fn code(&self) -> &'static str {
        match self {
            InputError::FileRead { .. } => error_codes::FILE_READ,
            InputError::JsonParse { .. } => error_codes::JSON_PARSE,
            InputError::UnknownFilter { .. } => error_codes::UNKNOWN_FILTER,
            InputError::InvalidParam { .. } => error_codes::INVALID_PARAM,
            InputError::MissingRecipe => error_codes::MISSING_RECIPE,
        }
    }
}

impl std::fmt::Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputError::FileRead { path, source } => {
                write!(f, "failed to read file '{}': {}", path.display(), source)
            }
            InputError::JsonParse { message } => write!(f, "JSON parse error: {}", message),
            InputError::UnknownFilter { name } => {
                let known: Vec<&str> = FilterKind::ALL.iter().map(|k| k.as_str()).collect();
                write!(
                    f,
                    "unknown filter '{}' (expected one of: {})",
                    name,
                    known.join(", ")
                )
            }
            InputError::InvalidParam { message } => write!(f, "invalid --param: {}", message),
            InputError::MissingRecipe => {
                write!(f, "exactly one of --filter or --recipe is required")
            }
        }
    }
}

impl std::error::Error for InputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InputError::FileRead { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Load a recipe from a JSON file.
///
/// # Example
/// ```no_run
/// use std::path::Path;
/// use snapshade_cli::input::load_recipe;
///
/// let loaded = load_recipe(Path::new("sepia.json")).unwrap();
/// println!("{}", loaded.recipe.filter.kind());
/// ```
pub fn load_recipe(path: &Path) -> Result<LoadResult, InputError> {
    let content = std::fs::read_to_string(path).map_err(|e| InputError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let source_hash = blake3::hash(content.as_bytes()).to_hex().to_string();

    let recipe = FilterRecipe::from_json(&content).map_err(|e| InputError::JsonParse {
        message: e.to_string(),
    })?;
    log::debug!("loaded {} recipe from {}", recipe.filter.kind(), path.display());

    Ok(LoadResult {
        recipe,
        source_hash,
    })
}

/// Build a recipe from a filter name and `key=value` parameters.
pub fn recipe_from_flags(filter: &str, params: &[String]) -> Result<FilterRecipe, InputError> {
    let kind: FilterKind = filter.parse().map_err(|_| InputError::UnknownFilter {
        name: filter.to_string(),
    })?;

    let overrides = params
        .iter()
        .map(|p| parse_override(p))
        .collect::<Result<Vec<_>, SpecError>>()
        .map_err(invalid_param)?;

    let params = FilterParams::from_overrides(kind, &overrides).map_err(invalid_param)?;
    Ok(FilterRecipe::new(params))
}

/// Resolve `--filter`/`--param` or `--recipe` into a recipe.
///
/// Returns the recipe and, for files, the source hash.
pub fn resolve_recipe(
    filter: Option<&str>,
    params: &[String],
    recipe_path: Option<&str>,
) -> Result<(FilterRecipe, Option<String>), InputError> {
    match (filter, recipe_path) {
        (Some(filter), None) => Ok((recipe_from_flags(filter, params)?, None)),
        (None, Some(path)) if params.is_empty() => {
            let loaded = load_recipe(Path::new(path))?;
            Ok((loaded.recipe, Some(loaded.source_hash)))
        }
        (None, Some(_)) => Err(InputError::InvalidParam {
            message: "--param requires --filter".to_string(),
        }),
        _ => Err(InputError::MissingRecipe),
    }
}

fn invalid_param(e: SpecError) -> InputError {
    InputError::InvalidParam {
        message: e.to_string(),
    }
}
