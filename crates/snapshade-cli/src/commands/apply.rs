//! Apply command implementation
//!
//! Filters one image and writes the PNG or ASCII-art result.

use anyhow::Result;
use colored::Colorize;
use serde::{Deserialize, Serialize};
use snapshade_backend::png::hash_bytes;
use snapshade_backend::{FilterOutput, Session};
use snapshade_spec::hash::canonical_recipe_hash;
use snapshade_spec::validation::validate_recipe;
use snapshade_spec::{FilterParams, OutputKind};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use super::json_output::{
    error_codes, validation_error_to_json, validation_warning_to_json, JsonError, JsonOutput,
    JsonWarning,
};
use crate::input::resolve_recipe;

/// Where a filtered result goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Write to this file.
    File(PathBuf),
    /// Write next to the working directory under the export's default name.
    Default,
    /// Print to stdout (text output only).
    Stdout,
}

impl OutputTarget {
    /// Interpret an `--out` value; `-` means stdout.
    pub fn from_arg(out: Option<&str>) -> Self {
        match out {
            None => OutputTarget::Default,
            Some("-") => OutputTarget::Stdout,
            Some(path) => OutputTarget::File(PathBuf::from(path)),
        }
    }
}

/// Outcome of filtering one file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderResult {
    /// Input image path
    pub input: String,
    /// Filter name
    pub filter: String,
    /// Image or text
    pub output_kind: OutputKind,
    /// Written file (absent when printed to stdout)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    /// MIME type of the output
    pub mime: String,
    /// Input width in pixels
    pub width: u32,
    /// Input height in pixels
    pub height: u32,
    /// ASCII grid as [columns, rows]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid: Option<[u32; 2]>,
    /// BLAKE3 hash of the output bytes
    pub output_hash: String,
    /// Processing time in milliseconds
    pub duration_ms: u64,
    /// ASCII art, when printed to stdout
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// JSON result of the apply command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplyResult {
    /// Canonical BLAKE3 hash of the recipe
    pub recipe_hash: String,
    /// BLAKE3 hash of the recipe file, if one was given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_hash: Option<String>,
    #[serde(flatten)]
    pub render: RenderResult,
}

/// Load `input`, filter it with `params` and write the export to `target`.
pub(crate) fn render_file(
    input: &Path,
    params: &FilterParams,
    target: &OutputTarget,
) -> Result<RenderResult, JsonError> {
    let start = Instant::now();
    let input_name = input.display().to_string();

    let bytes = fs::read(input).map_err(|e| {
        JsonError::new(error_codes::FILE_READ, e.to_string()).with_file(&input_name)
    })?;

    let mut session = Session::new();
    session
        .load_bytes(&bytes)
        .map_err(|e| JsonError::from_backend(&e).with_file(&input_name))?;
    let (width, height) = match session.original() {
        Ok(image) => (image.width(), image.height()),
        Err(e) => return Err(JsonError::from_backend(&e).with_file(&input_name)),
    };

    let grid = match session.apply(params) {
        Ok(FilterOutput::Text(art)) => Some([art.columns, art.rows]),
        Ok(FilterOutput::Image(_)) => None,
        Err(e) => return Err(JsonError::from_backend(&e).with_file(&input_name)),
    };
    let export = session
        .export()
        .map_err(|e| JsonError::from_backend(&e).with_file(&input_name))?;

    let kind = params.kind();
    let (output, text) = match target {
        OutputTarget::Stdout => {
            if grid.is_none() {
                return Err(JsonError::new(
                    error_codes::INVALID_OUTPUT,
                    format!("{} produces an image; use --out <file> instead of '-'", kind),
                ));
            }
            (None, Some(String::from_utf8_lossy(&export.bytes).into_owned()))
        }
        OutputTarget::File(path) => (Some(write_output(path, &export.bytes)?), None),
        OutputTarget::Default => (
            Some(write_output(Path::new(export.file_name), &export.bytes)?),
            None,
        ),
    };

    Ok(RenderResult {
        input: input_name,
        filter: kind.to_string(),
        output_kind: kind.output_kind(),
        output,
        mime: export.mime.to_string(),
        width,
        height,
        grid,
        output_hash: hash_bytes(&export.bytes),
        duration_ms: start.elapsed().as_millis() as u64,
        text,
    })
}

fn write_output(path: &Path, bytes: &[u8]) -> Result<String, JsonError> {
    let display = path.display().to_string();
    let write_error = |e: std::io::Error| {
        JsonError::new(error_codes::WRITE, format!("failed to write output: {}", e))
            .with_file(&display)
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_error)?;
    }
    fs::write(path, bytes).map_err(write_error)?;
    log::info!("wrote {} ({} bytes)", display, bytes.len());
    Ok(display)
}

struct Outcome {
    result: Option<ApplyResult>,
    errors: Vec<JsonError>,
    warnings: Vec<JsonWarning>,
}

fn execute(
    input: &str,
    filter: Option<&str>,
    params: &[String],
    recipe_path: Option<&str>,
    target: &OutputTarget,
) -> Outcome {
    let mut outcome = Outcome {
        result: None,
        errors: Vec::new(),
        warnings: Vec::new(),
    };

    let (recipe, source_hash) = match resolve_recipe(filter, params, recipe_path) {
        Ok(resolved) => resolved,
        Err(e) => {
            let mut error = JsonError::new(e.code(), e.to_string());
            if let Some(path) = recipe_path {
                error = error.with_file(path);
            }
            outcome.errors.push(error);
            return outcome;
        }
    };

    let validation = validate_recipe(&recipe);
    outcome
        .warnings
        .extend(validation.warnings.iter().map(validation_warning_to_json));
    if !validation.is_ok() {
        outcome
            .errors
            .extend(validation.errors.iter().map(validation_error_to_json));
        return outcome;
    }

    let recipe_hash = canonical_recipe_hash(&recipe).unwrap_or_else(|_| "unknown".to_string());
    log::debug!("recipe hash {}", recipe_hash);

    match render_file(Path::new(input), &recipe.filter, target) {
        Ok(render) => {
            outcome.result = Some(ApplyResult {
                recipe_hash,
                source_hash,
                render,
            })
        }
        Err(e) => outcome.errors.push(e),
    }
    outcome
}

/// Run the apply command
///
/// # Arguments
/// * `input` - Path to the PNG or JPEG to filter
/// * `filter` - Filter name, used with `params`
/// * `params` - `key=value` parameter overrides
/// * `recipe_path` - Recipe file, instead of `filter`/`params`
/// * `out` - Output path; `-` prints ASCII art to stdout
/// * `json_output` - Whether to output machine-readable JSON diagnostics
///
/// # Returns
/// Exit code: 0 on success, 1 on any error
pub fn run(
    input: &str,
    filter: Option<&str>,
    params: &[String],
    recipe_path: Option<&str>,
    out: Option<&str>,
    json_output: bool,
) -> Result<ExitCode> {
    let target = OutputTarget::from_arg(out);
    let outcome = execute(input, filter, params, recipe_path, &target);

    if json_output {
        let output = match outcome.result {
            Some(result) if outcome.errors.is_empty() => {
                JsonOutput::success(result, outcome.warnings)
            }
            _ => JsonOutput::<ApplyResult>::failure(outcome.errors, outcome.warnings),
        };
        return output.emit();
    }

    // Stdout carries the art itself, so status goes to stderr there.
    let to_stderr = target == OutputTarget::Stdout;
    let status = |line: String| {
        if to_stderr {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    };

    status(format!("{} {}", "Applying to:".cyan().bold(), input));
    for warning in &outcome.warnings {
        let path_info = warning
            .path
            .as_ref()
            .map(|p| format!(" at {}", p))
            .unwrap_or_default();
        status(format!(
            "  {} [{}]{}: {}",
            "!".yellow(),
            warning.code.yellow(),
            path_info.dimmed(),
            warning.message
        ));
    }

    match outcome.result {
        Some(result) if outcome.errors.is_empty() => {
            let render = result.render;
            if let Some(text) = &render.text {
                print!("{}", text);
            }
            status(format!(
                "{} {} {}x{} -> {} ({}, {}ms)",
                "SUCCESS".green().bold(),
                render.filter,
                render.width,
                render.height,
                render.output.as_deref().unwrap_or("stdout"),
                &render.output_hash[..16],
                render.duration_ms
            ));
            Ok(ExitCode::SUCCESS)
        }
        _ => {
            for error in &outcome.errors {
                eprintln!("  {} {}", "x".red(), error);
            }
            eprintln!(
                "{} {} error(s)",
                "FAILED".red().bold(),
                outcome.errors.len()
            );
            Ok(ExitCode::from(1))
        }
    }
}
