//! JSON output types for machine-readable CLI output.
//!
//! Every command run with `--json` prints one [`JsonOutput`] envelope to
//! stdout: a success flag, structured errors and warnings, and a
//! command-specific result.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use snapshade_spec::{BackendError, ValidationError, ValidationWarning};
use std::process::ExitCode;

/// Error codes for CLI operations.
///
/// These codes are stable and can be used for programmatic error handling.
/// Format: CLI_XXX for CLI-level errors; validation (`E0xx`) and backend
/// (`FILTER_xxx`, `SESSION_xxx`) codes pass through unchanged.
pub mod error_codes {
    /// File could not be read
    pub const FILE_READ: &str = "CLI_001";
    /// JSON parse error
    pub const JSON_PARSE: &str = "CLI_002";
    /// Unknown filter name
    pub const UNKNOWN_FILTER: &str = "CLI_003";
    /// Malformed or unknown `--param`
    pub const INVALID_PARAM: &str = "CLI_004";
    /// Neither or both of `--filter` / `--recipe`
    pub const MISSING_RECIPE: &str = "CLI_005";
    /// Output could not be written
    pub const WRITE: &str = "CLI_006";
    /// Input directory missing or empty
    pub const NO_INPUTS: &str = "CLI_007";
    /// Output target not usable for this filter
    pub const INVALID_OUTPUT: &str = "CLI_008";
    /// Two batch inputs map to the same output file
    pub const OUTPUT_COLLISION: &str = "CLI_009";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "CLI_001", "E003", "FILTER_001")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// JSON path to the problematic field (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Source file path (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl JsonError {
    /// Creates a new error with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            path: None,
            file: None,
        }
    }

    /// Sets the JSON path for this error.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Sets the file path for this error.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Wraps a backend error, keeping its code.
    pub fn from_backend(err: &dyn BackendError) -> Self {
        Self::new(err.code(), err.message())
    }
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(path) = &self.path {
            write!(f, " at {}", path)?;
        }
        if let Some(file) = &self.file {
            write!(f, " ({})", file)?;
        }
        Ok(())
    }
}

/// A structured warning in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonWarning {
    /// Stable warning code (e.g., "W001")
    pub code: String,
    /// Human-readable warning message
    pub message: String,
    /// JSON path to the problematic field (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl JsonWarning {
    /// Creates a new warning with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            path: None,
        }
    }

    /// Sets the JSON path for this warning.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

/// The `--json` envelope shared by all commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonOutput<T> {
    /// Whether the command succeeded
    pub success: bool,
    /// Errors encountered
    pub errors: Vec<JsonError>,
    /// Non-fatal warnings
    pub warnings: Vec<JsonWarning>,
    /// Command-specific result (on success, and for partial batch failures)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
}

impl<T: Serialize> JsonOutput<T> {
    /// Creates a successful output.
    pub fn success(result: T, warnings: Vec<JsonWarning>) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            warnings,
            result: Some(result),
        }
    }

    /// Creates a failed output.
    pub fn failure(errors: Vec<JsonError>, warnings: Vec<JsonWarning>) -> Self {
        Self {
            success: false,
            errors,
            warnings,
            result: None,
        }
    }

    /// Attaches a result to a failed output.
    pub fn with_result(mut self, result: T) -> Self {
        self.result = Some(result);
        self
    }

    /// Prints the envelope and returns the matching exit code.
    pub fn emit(&self) -> Result<ExitCode> {
        println!("{}", serde_json::to_string_pretty(self)?);
        Ok(if self.success {
            ExitCode::SUCCESS
        } else {
            ExitCode::from(1)
        })
    }
}

/// Converts a validation error to a JSON error.
pub fn validation_error_to_json(error: &ValidationError) -> JsonError {
    let mut json_error = JsonError::new(error.code.to_string(), &error.message);
    if let Some(path) = &error.path {
        json_error = json_error.with_path(path);
    }
    json_error
}

/// Converts a validation warning to a JSON warning.
pub fn validation_warning_to_json(warning: &ValidationWarning) -> JsonWarning {
    let mut json_warning = JsonWarning::new(warning.code.to_string(), &warning.message);
    if let Some(path) = &warning.path {
        json_warning = json_warning.with_path(path);
    }
    json_warning
}

#[cfg(test)]
mod tests {
    use super::*;
    use snapshade_spec::{ErrorCode, WarningCode};

    #[test]
    fn test_json_error_serialization() {
        let error = JsonError::new("E003", "out of range").with_path("filter.strength");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"E003\""));
        assert!(json.contains("\"path\":\"filter.strength\""));
        assert!(!json.contains("file"));
    }

    #[test]
    fn test_json_error_display() {
        let error = JsonError::new("CLI_006", "bad image").with_file("a.png");
        assert_eq!(error.to_string(), "[CLI_006] bad image (a.png)");
    }

    #[test]
    fn test_envelope_shape() {
        let ok = JsonOutput::success(serde_json::json!({"n": 1}), vec![]);
        let value = serde_json::to_value(&ok).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["result"]["n"], 1);
        assert!(value["errors"].as_array().unwrap().is_empty());

        let failed: JsonOutput<()> =
            JsonOutput::failure(vec![JsonError::new("CLI_001", "missing")], vec![]);
        let value = serde_json::to_value(&failed).unwrap();
        assert_eq!(value["success"], false);
        assert!(value.get("result").is_none());
    }

    #[test]
    fn test_validation_conversions() {
        let error =
            ValidationError::with_path(ErrorCode::InvalidColor, "bad color", "filter.shadow");
        let json = validation_error_to_json(&error);
        assert_eq!(json.code, "E002");
        assert_eq!(json.path.as_deref(), Some("filter.shadow"));

        let warning =
            ValidationWarning::with_path(WarningCode::NoOpFilter, "does nothing", "filter");
        let json = validation_warning_to_json(&warning);
        assert_eq!(json.code, "W001");
        assert_eq!(json.path.as_deref(), Some("filter"));
    }
}
