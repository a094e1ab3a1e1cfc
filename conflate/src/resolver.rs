//! Merge, validation, and conversion over a loaded document.
//!
//! The [`Resolver`] owns the document tree and applies the three mutating
//! stages of resolution: overlay merge (command line over file), required-key
//! validation, and value conversion. Lookups delegate to the document.

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::document::Document;
use crate::error::{Error, Result};

/// Error type converters may return; the cause is preserved on failure.
pub type ConverterError = Box<dyn std::error::Error + Send + Sync>;

/// A value-transform callback applied to the value at a registered path.
///
/// Converters receive the current value and produce a replacement, or fail
/// with an error that is attached to the reported [`Error::ConversionFailure`].
pub type Converter = Box<dyn Fn(&Value) -> std::result::Result<Value, ConverterError>>;

/// Owns the document tree and drives merge, validation, and conversion.
///
/// A resolver progresses through load, overlay merge, required-key
/// validation, and conversion. Lookups are usable from load onward; the
/// mutating operations are not order-enforced here, but the orchestrating
/// [`Config`](crate::Config) always drives them in that fixed sequence.
#[derive(Debug, Default)]
pub struct Resolver {
    document: Document,
}

impl Resolver {
    /// Creates a resolver with an empty document and the default delimiter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a resolver whose paths split on a custom delimiter.
    #[must_use]
    pub fn with_delimiter(delimiter: char) -> Self {
        Self {
            document: Document::with_delimiter(delimiter),
        }
    }

    /// Adopts `root` as the document tree, or an empty tree when absent,
    /// verifying key structure immediately.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKeyStructure`] if any object key at any depth
    /// contains the delimiter; the whole load fails in that case.
    pub fn load(&mut self, root: Option<Value>) -> Result<()> {
        let delimiter = self.document.delimiter();
        let root = root.unwrap_or_else(|| Value::Object(Map::new()));
        self.document = Document::from_value(root, delimiter)?;
        Ok(())
    }

    /// The owned document.
    #[must_use]
    pub const fn document(&self) -> &Document {
        &self.document
    }

    /// Looks up the value at `path`.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Value> {
        self.document.get(path)
    }

    /// Whether `path` resolves to a present value.
    #[must_use]
    pub fn has(&self, path: &str) -> bool {
        self.document.has(path)
    }

    /// Merges a keyword overlay into the document.
    ///
    /// Every overlay key is treated as a path: `"a.b.c"` creates or
    /// overwrites the nested objects `a → b → c`. Overlay values replace
    /// file values of any type at that path; merging after the file load is
    /// what makes the command line win.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKeyStructure`] when an overlay path descends
    /// through an existing leaf value.
    pub fn merge_overlay(&mut self, overlay: &Map<String, Value>) -> Result<()> {
        for (key, value) in overlay {
            log::debug!("merging overlay key '{key}'");
            self.document.set_path(key, value.clone())?;
        }
        Ok(())
    }

    /// Checks that every path in `paths` is present after the merge.
    ///
    /// "Present" is origin-agnostic: a value from the file and a value from
    /// the command-line overlay satisfy the requirement equally.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingRequiredKey`] naming the first path that does
    /// not resolve.
    pub fn require_keys(&self, paths: &[String]) -> Result<()> {
        for path in paths {
            if !self.document.has(path) {
                return Err(Error::MissingRequiredKey { key: path.clone() });
            }
        }
        Ok(())
    }

    /// Applies registered converters to present values.
    ///
    /// Runs strictly after [`Resolver::require_keys`] in the pipeline. The
    /// converted value is written back at the registered path, so later
    /// lookups observe it. Absent paths are skipped: presence enforcement is
    /// the job of required-key validation, not conversion.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConversionFailure`] naming the key and carrying the
    /// converter's own error as the cause.
    pub fn convert_keys(&mut self, converters: &HashMap<String, Converter>) -> Result<()> {
        for (path, converter) in converters {
            let Some(value) = self.document.get(path) else {
                continue;
            };
            let converted = converter(value).map_err(|source| Error::ConversionFailure {
                key: path.clone(),
                source,
            })?;
            log::debug!("converted value at '{path}'");
            self.document.set_path(path, converted)?;
        }
        Ok(())
    }
}
