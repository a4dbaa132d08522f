//! Batch command implementation
//!
//! Applies one recipe to every PNG/JPEG under a directory.

use anyhow::{Context, Result};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use snapshade_spec::hash::{canonical_recipe_hash, derive_input_seed};
use snapshade_spec::validation::validate_recipe;
use snapshade_spec::FilterParams;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;
use walkdir::WalkDir;

use super::apply::{render_file, OutputTarget, RenderResult};
use super::json_output::{
    error_codes, validation_error_to_json, validation_warning_to_json, JsonError, JsonOutput,
};
use crate::input::load_recipe;

/// File extensions picked up by the batch walk.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// Result of filtering a single file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileResult {
    /// Input path
    pub input: String,
    /// Whether filtering succeeded
    pub success: bool,
    /// Error if failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonError>,
    /// Output details if succeeded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<RenderResult>,
}

/// JSON result of the batch command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResult {
    /// Canonical BLAKE3 hash of the recipe
    pub recipe_hash: String,
    /// Output root directory
    pub out_root: String,
    /// Number of files processed
    pub total: usize,
    /// Number of files that succeeded
    pub succeeded: usize,
    /// Number of files that failed
    pub failed: usize,
    /// Per-file results, in processing order
    pub files: Vec<FileResult>,
    /// Total time in milliseconds
    pub duration_ms: u64,
}

/// Collect image files under `dir` in sorted order.
pub fn collect_images(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .min_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        })
        .collect();

    // Sort for deterministic order
    files.sort();
    files
}

/// Output path for `input`: its path relative to `input_dir`, re-rooted
/// under `out_root`, with the extension of the filter's output.
fn output_path(input: &Path, input_dir: &Path, out_root: &Path, extension: &str) -> PathBuf {
    let relative = input.strip_prefix(input_dir).unwrap_or(input);
    out_root.join(relative).with_extension(extension)
}

/// Output path for every input, in input order.
///
/// Inputs that differ only by extension (`cat.jpg`, `cat.png`) map to the
/// same output. The first input in sorted order keeps it; later ones get
/// `Err` with the input that claimed it.
fn plan_outputs(
    inputs: &[PathBuf],
    input_dir: &Path,
    out_root: &Path,
    extension: &str,
) -> Vec<Result<PathBuf, PathBuf>> {
    let mut claimed: HashMap<PathBuf, &Path> = HashMap::new();
    inputs
        .iter()
        .map(|input| {
            let out = output_path(input, input_dir, out_root, extension);
            match claimed.get(&out) {
                Some(first) => Err(first.to_path_buf()),
                None => {
                    claimed.insert(out.clone(), input.as_path());
                    Ok(out)
                }
            }
        })
        .collect()
}

/// Give each input its own grain seed, derived from the recipe seed.
fn params_for_input(params: &FilterParams, input: &Path) -> FilterParams {
    match params {
        FilterParams::Vintage(p) => {
            let name = input
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            params.with_seed(derive_input_seed(p.seed, &name))
        }
        other => other.clone(),
    }
}

/// Run the batch command
///
/// # Arguments
/// * `input_dir` - Directory to scan recursively for images
/// * `recipe_path` - Recipe file to apply to every image
/// * `out_root` - Directory receiving the outputs
/// * `json_output` - Whether to output machine-readable JSON diagnostics
///
/// # Returns
/// Exit code: 0 if every file succeeded, 1 otherwise
pub fn run(
    input_dir: &str,
    recipe_path: &str,
    out_root: &str,
    json_output: bool,
) -> Result<ExitCode> {
    let start = Instant::now();

    let loaded = match load_recipe(Path::new(recipe_path)) {
        Ok(loaded) => loaded,
        Err(e) => {
            let error = JsonError::new(e.code(), e.to_string()).with_file(recipe_path);
            return fail(vec![error], json_output);
        }
    };
    let recipe = loaded.recipe;

    let validation = validate_recipe(&recipe);
    let warnings: Vec<_> = validation
        .warnings
        .iter()
        .map(validation_warning_to_json)
        .collect();
    if !validation.is_ok() {
        let errors = validation
            .errors
            .iter()
            .map(validation_error_to_json)
            .collect();
        if json_output {
            return JsonOutput::<BatchResult>::failure(errors, warnings).emit();
        }
        return fail(errors, false);
    }

    let input_root = Path::new(input_dir);
    if !input_root.is_dir() {
        let error = JsonError::new(
            error_codes::NO_INPUTS,
            format!("input directory not found: {}", input_dir),
        );
        return fail(vec![error], json_output);
    }

    let inputs = collect_images(input_root);
    if inputs.is_empty() {
        let error = JsonError::new(
            error_codes::NO_INPUTS,
            format!("no .png, .jpg or .jpeg files under {}", input_dir),
        );
        return fail(vec![error], json_output);
    }

    let recipe_hash = canonical_recipe_hash(&recipe).unwrap_or_else(|_| "unknown".to_string());
    let extension = recipe.filter.kind().output_kind().extension();
    let out_root_path = Path::new(out_root);
    std::fs::create_dir_all(out_root_path)
        .with_context(|| format!("Failed to create output directory: {}", out_root))?;

    if !json_output {
        println!(
            "{} Found {} images to process",
            "INFO".blue().bold(),
            inputs.len()
        );
        println!("{} {}", "Recipe:".dimmed(), recipe.filter.kind());
    }

    let planned = plan_outputs(&inputs, input_root, out_root_path, extension);
    let mut files = Vec::with_capacity(inputs.len());
    for (i, (input, target)) in inputs.iter().zip(planned).enumerate() {
        let rendered = match target {
            Ok(out) => {
                let params = params_for_input(&recipe.filter, input);
                render_file(input, &params, &OutputTarget::File(out))
            }
            Err(first) => Err(JsonError::new(
                error_codes::OUTPUT_COLLISION,
                format!(
                    "output for {} is already taken by {}",
                    input.display(),
                    first.display()
                ),
            )
            .with_file(input.display().to_string())),
        };

        let file_result = match rendered {
            Ok(render) => {
                if !json_output {
                    println!(
                        "  [{}/{}] {} {} -> {}",
                        i + 1,
                        inputs.len(),
                        "OK".green(),
                        input.display(),
                        render.output.as_deref().unwrap_or_default()
                    );
                }
                FileResult {
                    input: input.display().to_string(),
                    success: true,
                    error: None,
                    output: Some(render),
                }
            }
            Err(error) => {
                log::warn!("skipping {}: {}", input.display(), error);
                if !json_output {
                    println!(
                        "  [{}/{}] {} {}: {}",
                        i + 1,
                        inputs.len(),
                        "FAIL".red(),
                        input.display(),
                        error.message
                    );
                }
                FileResult {
                    input: input.display().to_string(),
                    success: false,
                    error: Some(error),
                    output: None,
                }
            }
        };
        files.push(file_result);
    }

    let succeeded = files.iter().filter(|f| f.success).count();
    let failed = files.len() - succeeded;
    let result = BatchResult {
        recipe_hash,
        out_root: out_root.to_string(),
        total: files.len(),
        succeeded,
        failed,
        files,
        duration_ms: start.elapsed().as_millis() as u64,
    };

    if json_output {
        let output = if failed == 0 {
            JsonOutput::success(result, warnings)
        } else {
            let errors = result
                .files
                .iter()
                .filter_map(|f| f.error.clone())
                .collect();
            JsonOutput::failure(errors, warnings).with_result(result)
        };
        return output.emit();
    }

    for warning in &warnings {
        println!(
            "  {} [{}]: {}",
            "!".yellow(),
            warning.code.yellow(),
            warning.message
        );
    }

    if failed == 0 {
        println!(
            "\n{} {} file(s) written to {} ({}ms)",
            "SUCCESS".green().bold(),
            result.succeeded,
            out_root,
            result.duration_ms
        );
        Ok(ExitCode::SUCCESS)
    } else {
        println!(
            "\n{} {} of {} file(s) failed ({}ms)",
            "FAILED".red().bold(),
            failed,
            result.total,
            result.duration_ms
        );
        Ok(ExitCode::from(1))
    }
}

fn fail(errors: Vec<JsonError>, json_output: bool) -> Result<ExitCode> {
    if json_output {
        return JsonOutput::<BatchResult>::failure(errors, Vec::new()).emit();
    }
    for error in &errors {
        eprintln!("  {} {}", "x".red(), error);
    }
    Ok(ExitCode::from(1))
}
