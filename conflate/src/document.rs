//! The path-addressed document tree.
//!
//! A [`Document`] wraps a JSON value and addresses nested entries with
//! delimiter-joined key paths: `"server.http.port"` walks the object keys
//! `server`, `http`, `port`. Objects are the interior nodes; every other
//! value (including arrays) is a leaf, so path addressing and key
//! verification never descend into array elements.

use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Default delimiter separating path segments.
pub const DEFAULT_DELIMITER: char = '.';

/// A JSON document addressed by delimiter-joined key paths.
///
/// # Examples
///
/// ```
/// use conflate::Document;
/// use serde_json::json;
///
/// let document = Document::from_value(json!({"server": {"port": 8080}}), '.').unwrap();
/// assert_eq!(document.get("server.port"), Some(&json!(8080)));
/// assert!(document.get("server.missing").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct Document {
    delimiter: char,
    root: Value,
}

impl Document {
    /// Creates an empty document using the default `.` delimiter.
    #[must_use]
    pub fn new() -> Self {
        Self::with_delimiter(DEFAULT_DELIMITER)
    }

    /// Creates an empty document with a custom path delimiter.
    #[must_use]
    pub fn with_delimiter(delimiter: char) -> Self {
        Self {
            delimiter,
            root: Value::Object(Map::new()),
        }
    }

    /// Adopts a parsed value as the document root, verifying key structure
    /// immediately.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKeyStructure`] if any object key at any depth
    /// contains `delimiter`.
    pub fn from_value(root: Value, delimiter: char) -> Result<Self> {
        let document = Self { delimiter, root };
        document.verify_keys()?;
        Ok(document)
    }

    /// Returns the active path delimiter.
    #[must_use]
    pub const fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Returns the document root value.
    #[must_use]
    pub const fn root(&self) -> &Value {
        &self.root
    }

    /// Looks up the value at a delimiter-joined path.
    ///
    /// Walks object keys segment by segment. If any step lands on a
    /// non-object node or a missing key, the whole path is treated as fully
    /// absent: an incomplete path yields `None`, never an error.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut node = &self.root;
        for segment in path.split(self.delimiter) {
            node = node.as_object()?.get(segment)?;
        }
        Some(node)
    }

    /// Whether a path resolves to a present value.
    ///
    /// A JSON `null` stored in the document counts as present; absence is
    /// signalled only by the path failing to resolve.
    #[must_use]
    pub fn has(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// Root-level key names, never flattened descendant paths.
    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        match &self.root {
            Value::Object(map) => map.keys().map(String::as_str).collect(),
            _ => Vec::new(),
        }
    }

    /// Writes `value` at `path`, creating interior objects as needed.
    ///
    /// The final segment is overwritten unconditionally (last write wins).
    /// Descending through an existing leaf is a conflict: a leaf is never
    /// silently replaced by an object while walking toward the final segment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKeyStructure`] when a node along the path
    /// already holds a leaf value.
    pub fn set_path(&mut self, path: &str, value: Value) -> Result<()> {
        let segments: Vec<&str> = path.split(self.delimiter).collect();
        // split() yields at least one segment, even for an empty path
        let Some((last, parents)) = segments.split_last() else {
            return Ok(());
        };

        let mut node = &mut self.root;
        for (depth, segment) in parents.iter().enumerate() {
            let map = Self::interior_mut(node, path, &segments[..depth], self.delimiter)?;
            node = map
                .entry((*segment).to_string())
                .or_insert_with(|| Value::Object(Map::new()));
        }

        let map = Self::interior_mut(node, path, parents, self.delimiter)?;
        if map.insert((*last).to_string(), value).is_some() {
            log::debug!("overwrote existing value at '{path}'");
        }
        Ok(())
    }

    /// Verifies that no object key at any depth contains the delimiter.
    ///
    /// This is a load-time integrity check, not a query-time one. Leaf
    /// content is not inspected, so objects inside arrays are exempt.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKeyStructure`] naming the first offending key.
    pub fn verify_keys(&self) -> Result<()> {
        Self::verify_node(&self.root, self.delimiter)
    }

    fn verify_node(node: &Value, delimiter: char) -> Result<()> {
        if let Value::Object(map) = node {
            for (key, child) in map {
                if key.contains(delimiter) {
                    return Err(Error::InvalidKeyStructure {
                        key: key.clone(),
                        reason: format!(
                            "document keys must not contain the delimiter '{delimiter}'; \
                             use nested objects instead"
                        ),
                    });
                }
                Self::verify_node(child, delimiter)?;
            }
        }
        Ok(())
    }

    /// View `node` as a mutable object map, or report which path prefix
    /// holds a leaf.
    fn interior_mut<'a>(
        node: &'a mut Value,
        path: &str,
        prefix: &[&str],
        delimiter: char,
    ) -> Result<&'a mut Map<String, Value>> {
        match node {
            Value::Object(map) => Ok(map),
            _ => Err(Error::InvalidKeyStructure {
                key: path.to_string(),
                reason: if prefix.is_empty() {
                    "the document root is not an object".to_string()
                } else {
                    format!(
                        "'{}' holds a leaf value and cannot contain nested keys",
                        prefix.join(&delimiter.to_string())
                    )
                },
            }),
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
