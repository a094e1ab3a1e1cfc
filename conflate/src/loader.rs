//! Configuration document loading.
//!
//! File existence and syntax are checked here, at the boundary to the
//! filesystem: a missing file and a file that fails to decode are reported
//! as distinct error kinds so callers can tell them apart.

use std::fs;
use std::io;
use std::path::Path;

use serde_json::Value;

use crate::error::{Error, Result};

/// Reads configuration documents from disk.
///
/// # Examples
///
/// ```no_run
/// use conflate::DocumentLoader;
/// use std::path::Path;
///
/// let document = DocumentLoader::read(Path::new("app.json")).unwrap();
/// println!("loaded {document}");
/// ```
pub struct DocumentLoader;

impl DocumentLoader {
    /// Reads and parses the UTF-8 JSON document at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FileNotFound`] if the path does not exist, and
    /// [`Error::MalformedDocument`] if the bytes cannot be read or do not
    /// parse as a single JSON value.
    pub fn read(path: &Path) -> Result<Value> {
        let contents = fs::read_to_string(path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                Error::FileNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                Error::MalformedDocument {
                    path: path.to_path_buf(),
                    source: Box::new(source),
                }
            }
        })?;

        serde_json::from_str(&contents).map_err(|source| Error::MalformedDocument {
            path: path.to_path_buf(),
            source: Box::new(source),
        })
    }
}
