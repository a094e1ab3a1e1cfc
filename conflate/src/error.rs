//! Error types for the conflate library.
//!
//! This module provides the error hierarchy for document loading, overlay
//! merging, required-key validation, and value conversion, using `thiserror`
//! for ergonomic error handling.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that may fail with a conflate error.
///
/// # Examples
///
/// ```
/// use conflate::{Error, Result};
///
/// fn example_operation() -> Result<&'static str> {
///     Ok("resolved")
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the conflate library.
///
/// Every failure the resolution pipeline can report is covered here. A
/// failure aborts the pipeline step it occurs in; nothing is retried
/// internally, and a failed parse leaves the configuration state undefined.
#[derive(Debug, Error)]
pub enum Error {
    /// The resolved configuration file does not exist.
    #[error("configuration file not found: {}", path.display())]
    FileNotFound {
        /// The path that was expected to exist.
        path: PathBuf,
    },

    /// The configuration file could not be read or parsed into a document.
    #[error("malformed configuration document {}: {source}", path.display())]
    MalformedDocument {
        /// The path of the unreadable or unparseable file.
        path: PathBuf,
        /// The underlying read or decode failure.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A document key contains the active delimiter, or a merge path
    /// descended into an existing leaf value.
    #[error("invalid key structure for '{key}': {reason}")]
    InvalidKeyStructure {
        /// The offending key or path.
        key: String,
        /// Why the key structure is invalid.
        reason: String,
    },

    /// A required key was absent after the overlay merge.
    #[error("missing required key: {key}")]
    MissingRequiredKey {
        /// The path that did not resolve to a value.
        key: String,
    },

    /// A registered converter failed for a key.
    #[error("failed to convert key '{key}': {source}")]
    ConversionFailure {
        /// The path whose value could not be converted.
        key: String,
        /// The failure reported by the converter.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl Error {
    /// Check if the error indicates a missing configuration file.
    ///
    /// # Examples
    ///
    /// ```
    /// use conflate::Error;
    /// use std::path::PathBuf;
    ///
    /// let err = Error::FileNotFound { path: PathBuf::from("/nonexistent") };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::FileNotFound { .. })
    }

    /// Check if the error was raised by a registered converter.
    #[must_use]
    pub fn is_conversion_failure(&self) -> bool {
        matches!(self, Self::ConversionFailure { .. })
    }
}
