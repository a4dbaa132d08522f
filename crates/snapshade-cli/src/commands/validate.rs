//! Validate command implementation
//!
//! Checks a recipe file without touching any image.

use anyhow::Result;
use colored::Colorize;
use serde::{Deserialize, Serialize};
use snapshade_spec::hash::canonical_recipe_hash;
use snapshade_spec::validation::validate_recipe;
use snapshade_spec::{OutputKind, ValidationResult};
use std::path::Path;
use std::process::ExitCode;

use super::json_output::{
    validation_error_to_json, validation_warning_to_json, JsonError, JsonOutput, JsonWarning,
};
use crate::input::load_recipe;

/// JSON result of the validate command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateResult {
    /// Filter named by the recipe
    pub filter: String,
    /// What the filter produces
    pub output_kind: OutputKind,
    /// Canonical BLAKE3 hash of the recipe
    pub recipe_hash: String,
    /// BLAKE3 hash of the recipe file
    pub source_hash: String,
}

/// Run the validate command
///
/// # Arguments
/// * `recipe_path` - Path to the recipe file
/// * `json_output` - Whether to output machine-readable JSON diagnostics
///
/// # Returns
/// Exit code: 0 if valid, 1 if invalid
pub fn run(recipe_path: &str, json_output: bool) -> Result<ExitCode> {
    if !json_output {
        println!("{} {}", "Validating:".cyan().bold(), recipe_path);
    }

    let loaded = match load_recipe(Path::new(recipe_path)) {
        Ok(loaded) => loaded,
        Err(e) => {
            let error = JsonError::new(e.code(), e.to_string()).with_file(recipe_path);
            if json_output {
                return JsonOutput::<ValidateResult>::failure(vec![error], vec![]).emit();
            }
            println!("\n{} {}", "FAILED".red().bold(), error);
            return Ok(ExitCode::from(1));
        }
    };

    let recipe = loaded.recipe;
    let validation = validate_recipe(&recipe);
    let recipe_hash = canonical_recipe_hash(&recipe).unwrap_or_else(|_| "unknown".to_string());

    if json_output {
        let warnings: Vec<JsonWarning> = validation
            .warnings
            .iter()
            .map(validation_warning_to_json)
            .collect();
        let output = if validation.is_ok() {
            let result = ValidateResult {
                filter: recipe.filter.kind().to_string(),
                output_kind: recipe.filter.kind().output_kind(),
                recipe_hash,
                source_hash: loaded.source_hash,
            };
            JsonOutput::success(result, warnings)
        } else {
            let errors: Vec<JsonError> = validation
                .errors
                .iter()
                .map(validation_error_to_json)
                .collect();
            JsonOutput::failure(errors, warnings)
        };
        return output.emit();
    }

    println!("{} {}", "Filter:".dimmed(), recipe.filter.kind());
    println!("{} {}", "Recipe hash:".dimmed(), &recipe_hash[..16.min(recipe_hash.len())]);
    print_validation_results(&validation);

    if validation.is_ok() {
        println!("\n{} Recipe is valid", "SUCCESS".green().bold());
        Ok(ExitCode::SUCCESS)
    } else {
        println!(
            "\n{} Recipe has {} error(s)",
            "FAILED".red().bold(),
            validation.errors.len()
        );
        Ok(ExitCode::from(1))
    }
}

/// Print validation results to the console
fn print_validation_results(result: &ValidationResult) {
    if !result.errors.is_empty() {
        println!("\n{}", "Errors:".red().bold());
        for error in &result.errors {
            let path_info = error
                .path
                .as_ref()
                .map(|p| format!(" at {}", p))
                .unwrap_or_default();
            println!(
                "  {} [{}]{}: {}",
                "x".red(),
                error.code.to_string().red(),
                path_info.dimmed(),
                error.message
            );
        }
    }

    if !result.warnings.is_empty() {
        println!("\n{}", "Warnings:".yellow().bold());
        for warning in &result.warnings {
            let path_info = warning
                .path
                .as_ref()
                .map(|p| format!(" at {}", p))
                .unwrap_or_default();
            println!(
                "  {} [{}]{}: {}",
                "!".yellow(),
                warning.code.to_string().yellow(),
                path_info.dimmed(),
                warning.message
            );
        }
    }
}
