//! CLI-specific error handling with exit codes.
//!
//! Wraps library errors and query failures, mapping each kind to a distinct
//! process exit code so scripts can branch on the failure class.

use std::fmt;

use conflate::Error as LibError;

/// CLI error type with exit code mapping.
#[derive(Debug)]
pub enum CliError {
    /// Library error (wrapped).
    Library(LibError),

    /// A requested path did not resolve in the merged document.
    UnknownPath(String),

    /// The resolved value could not be rendered as JSON text.
    Render(serde_json::Error),
}

impl CliError {
    /// Get the appropriate exit code for this error.
    ///
    /// Exit codes:
    /// - 0: Success (not an error)
    /// - 1: Requested path not present in the merged document
    /// - 2: Configuration file not found
    /// - 3: Malformed configuration document
    /// - 4: Invalid key structure (delimiter in key, or leaf conflict)
    /// - 5: Missing required key
    /// - 6: Conversion failure
    /// - 7: Output rendering failure
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::UnknownPath(_) => 1,
            CliError::Library(lib_err) => match lib_err {
                LibError::FileNotFound { .. } => 2,
                LibError::MalformedDocument { .. } => 3,
                LibError::InvalidKeyStructure { .. } => 4,
                LibError::MissingRequiredKey { .. } => 5,
                LibError::ConversionFailure { .. } => 6,
            },
            CliError::Render(_) => 7,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Library(err) => write!(f, "{err}"),
            CliError::UnknownPath(path) => write!(f, "no value at path '{path}'"),
            CliError::Render(err) => write!(f, "failed to render output: {err}"),
        }
    }
}

impl From<LibError> for CliError {
    fn from(err: LibError) -> Self {
        CliError::Library(err)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Render(err)
    }
}
