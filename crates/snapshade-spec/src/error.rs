//! Error types for recipe validation and processing.

use thiserror::Error;

/// Error codes for recipe validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// E001: Unsupported recipe_version
    UnsupportedRecipeVersion,
    /// E002: Color is not a valid hex color
    InvalidColor,
    /// E003: Numeric parameter outside its allowed range
    ParameterOutOfRange,
    /// E004: ASCII density ramp has fewer than two characters
    DensityTooShort,
    /// E005: Grid or block size of zero
    ZeroSize,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "E001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::UnsupportedRecipeVersion => "E001",
            ErrorCode::InvalidColor => "E002",
            ErrorCode::ParameterOutOfRange => "E003",
            ErrorCode::DensityTooShort => "E004",
            ErrorCode::ZeroSize => "E005",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Warning codes for recipe validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningCode {
    /// W001: Parameters make the filter a no-op
    NoOpFilter,
    /// W002: ASCII grid wider than most terminals and editors can show
    WideAsciiGrid,
}

impl WarningCode {
    /// Returns the warning code string (e.g., "W001").
    pub fn code(&self) -> &'static str {
        match self {
            WarningCode::NoOpFilter => "W001",
            WarningCode::WideAsciiGrid => "W002",
        }
    }
}

impl std::fmt::Display for WarningCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A validation error with code, message, and optional JSON path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The error code.
    pub code: ErrorCode,
    /// Human-readable error message.
    pub message: String,
    /// JSON path to the problematic field (e.g., "filter.shadow").
    pub path: Option<String>,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Creates a new validation error with a JSON path.
    pub fn with_path(code: ErrorCode, message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref path) = self.path {
            write!(f, "{}: {} (at {})", self.code, self.message, path)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

impl std::error::Error for ValidationError {}

/// A validation warning with code, message, and optional JSON path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// The warning code.
    pub code: WarningCode,
    /// Human-readable warning message.
    pub message: String,
    /// JSON path to the problematic field.
    pub path: Option<String>,
}

impl ValidationWarning {
    /// Creates a new validation warning with a JSON path.
    pub fn with_path(
        code: WarningCode,
        message: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref path) = self.path {
            write!(f, "{}: {} (at {})", self.code, self.message, path)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

/// Top-level error type for recipe operations.
#[derive(Debug, Error)]
pub enum SpecError {
    /// Recipe validation failed with one or more errors.
    #[error("recipe validation failed with {0} error(s)")]
    ValidationFailed(usize),

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// A `key=value` override could not be parsed.
    #[error("invalid parameter override '{0}': expected key=value")]
    InvalidOverride(String),

    /// Filter name not recognized.
    #[error("unknown filter '{0}'")]
    UnknownFilter(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result of recipe validation.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether validation passed (no errors).
    pub ok: bool,
    /// List of validation errors.
    pub errors: Vec<ValidationError>,
    /// List of validation warnings.
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    /// Creates a successful validation result.
    pub fn success() -> Self {
        Self {
            ok: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Adds an error to the result.
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
        self.ok = false;
    }

    /// Adds a warning to the result.
    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Merges another result into this one.
    pub fn merge(&mut self, other: ValidationResult) {
        for error in other.errors {
            self.add_error(error);
        }
        self.warnings.extend(other.warnings);
    }

    /// Returns true if there are no errors.
    pub fn is_ok(&self) -> bool {
        self.ok
    }

    /// Converts to a Result, returning Err if there are errors.
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, Vec<ValidationError>> {
        if self.ok {
            Ok(self.warnings)
        } else {
            Err(self.errors)
        }
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::success()
    }
}

/// Common trait for backend errors.
///
/// Backends implement this so the CLI can report a stable code and category
/// without knowing the concrete error type.
pub trait BackendError: std::error::Error {
    /// Get the error code for reporting.
    ///
    /// Returns a static string like "FILTER_001" or "SESSION_001".
    fn code(&self) -> &'static str;

    /// Get a human-readable message describing the error.
    fn message(&self) -> String {
        self.to_string()
    }

    /// Get the error category for grouping related errors.
    fn category(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_stable() {
        assert_eq!(ErrorCode::UnsupportedRecipeVersion.code(), "E001");
        assert_eq!(ErrorCode::InvalidColor.code(), "E002");
        assert_eq!(ErrorCode::ParameterOutOfRange.code(), "E003");
        assert_eq!(ErrorCode::DensityTooShort.code(), "E004");
        assert_eq!(ErrorCode::ZeroSize.code(), "E005");
        assert_eq!(WarningCode::NoOpFilter.code(), "W001");
        assert_eq!(WarningCode::WideAsciiGrid.code(), "W002");
    }

    #[test]
    fn test_validation_error_display_with_path() {
        let err = ValidationError::with_path(ErrorCode::InvalidColor, "bad color", "filter.shadow");
        assert_eq!(err.to_string(), "E002: bad color (at filter.shadow)");
    }

    #[test]
    fn test_merge_propagates_failure() {
        let mut result = ValidationResult::success();
        let mut other = ValidationResult::success();
        other.add_error(ValidationError::new(ErrorCode::ZeroSize, "zero"));
        other.add_warning(ValidationWarning::with_path(
            WarningCode::NoOpFilter,
            "noop",
            "filter",
        ));

        result.merge(other);
        assert!(!result.is_ok());
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.warnings.len(), 1);
    }
}
