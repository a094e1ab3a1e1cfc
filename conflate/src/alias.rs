//! Key rename tables.
//!
//! An [`AliasTable`] maps many old names onto one canonical name. Names that
//! were never registered map to themselves, so applying a table is always
//! total and always idempotent.

use std::collections::HashMap;

use serde_json::{Map, Value};

/// A many-to-one rename table for keyword keys and bare tokens.
///
/// # Examples
///
/// ```
/// use conflate::AliasTable;
///
/// let mut aliases = AliasTable::new();
/// aliases.register("verbose", &["-v", "--verbose", "verb"]);
///
/// assert_eq!(aliases.canonical("-v"), "verbose");
/// assert_eq!(aliases.canonical("other"), "other");
/// ```
#[derive(Debug, Default, Clone)]
pub struct AliasTable {
    renames: HashMap<String, String>,
}

impl AliasTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers each of `old_names` as an alias of `canonical`.
    ///
    /// Registering the canonical name as its own alias is harmless.
    pub fn register(&mut self, canonical: &str, old_names: &[&str]) {
        for name in old_names {
            self.renames
                .insert((*name).to_string(), canonical.to_string());
        }
    }

    /// Resolves a name to its canonical form, or to itself if unregistered.
    #[must_use]
    pub fn canonical<'a>(&'a self, name: &'a str) -> &'a str {
        self.renames.get(name).map_or(name, String::as_str)
    }

    /// Rewrites every key of a possibly nested mapping to its canonical form.
    ///
    /// Object values are rewritten recursively, so nested keyword overlays
    /// are renamed at every level. When two keys at the same level alias to
    /// the same canonical name, the later-processed one wins; iteration order
    /// over the input mapping is not guaranteed, so exactly one survivor is
    /// defined but which one is not. This is a documented caveat of alias
    /// collisions, not a resolution rule.
    #[must_use]
    pub fn apply_to_map(&self, mapping: Map<String, Value>) -> Map<String, Value> {
        let mut renamed = Map::new();
        for (key, value) in mapping {
            let value = match value {
                Value::Object(nested) => Value::Object(self.apply_to_map(nested)),
                other => other,
            };
            let canonical = self.canonical(&key).to_string();
            if renamed.insert(canonical.clone(), value).is_some() {
                log::debug!("alias collision on '{canonical}'");
            }
        }
        renamed
    }

    /// Maps each token to its canonical form, de-duplicating by the result.
    ///
    /// De-duplication keys on the *resulting* canonical value and preserves
    /// first-occurrence order.
    ///
    /// # Examples
    ///
    /// ```
    /// use conflate::AliasTable;
    ///
    /// let mut aliases = AliasTable::new();
    /// aliases.register("verbose", &["-v", "--verbose", "verb", "verbose"]);
    ///
    /// let tokens = vec!["-v".to_string(), "--verbose".to_string(), "verb".to_string()];
    /// assert_eq!(aliases.apply_to_list(tokens), vec!["verbose".to_string()]);
    /// ```
    #[must_use]
    pub fn apply_to_list(&self, tokens: Vec<String>) -> Vec<String> {
        let mut renamed: Vec<String> = Vec::new();
        for token in tokens {
            let canonical = self.canonical(&token);
            if !renamed.iter().any(|seen| seen == canonical) {
                renamed.push(canonical.to_string());
            }
        }
        renamed
    }
}
