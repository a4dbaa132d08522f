//! snapshade Filter Recipe Library
//!
//! This crate provides types, validation, and hashing for snapshade filter recipes.
//! A recipe is a small JSON document naming one filter and the values of its
//! parameters, the same state a slider or color picker would hold.
//!
//! # Example
//!
//! ```
//! use snapshade_spec::{FilterRecipe, FilterParams, FilterKind};
//! use snapshade_spec::validation::validate_recipe;
//! use snapshade_spec::hash::canonical_recipe_hash;
//!
//! let recipe = FilterRecipe::from_json(
//!     r##"{ "recipe_version": 1, "filter": { "kind": "duotone", "shadow": "#102030" } }"##,
//! )
//! .unwrap();
//! assert_eq!(recipe.filter.kind(), FilterKind::Duotone);
//!
//! let result = validate_recipe(&recipe);
//! assert!(result.is_ok());
//!
//! let hash = canonical_recipe_hash(&recipe).unwrap();
//! assert_eq!(hash.len(), 64);
//! ```
//!
//! # Modules
//!
//! - [`error`]: Error and warning types for validation
//! - [`recipe`]: Recipe and per-filter parameter types
//! - [`validation`]: Recipe validation functions
//! - [`hash`]: Canonical hashing and seed derivation

pub mod error;
pub mod hash;
pub mod recipe;
pub mod validation;

// Re-export commonly used types at the crate root
pub use error::{
    BackendError, ErrorCode, SpecError, ValidationError, ValidationResult, ValidationWarning,
    WarningCode,
};
pub use recipe::{
    AsciiParams, DuotoneParams, FilterKind, FilterParams, FilterRecipe, GrayscaleMethod,
    GrayscaleParams, InvertParams, OutputKind, PixelateParams, SepiaParams, SketchParams,
    VignetteParams, VintageParams, RECIPE_VERSION,
};
