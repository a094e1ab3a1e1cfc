//! The top-level resolution pipeline.
//!
//! [`Config`] composes the command-line tokenizer, the alias table, and the
//! resolver into one fixed-order pipeline: tokenize first (so the config
//! file itself can be named on the command line), then load, merge,
//! validate, and convert.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::argv::CommandLine;
use crate::document::{Document, DEFAULT_DELIMITER};
use crate::error::Result;
use crate::loader::DocumentLoader;
use crate::resolver::{Converter, ConverterError, Resolver};

/// Canonical keyword under which the command line may name the config file.
///
/// Deliberately free of punctuation so it cannot collide with any custom
/// path delimiter when the overlay is merged.
const CONFIG_FILE_KEY: &str = "configfile";

/// Command-line spellings aliased onto [`CONFIG_FILE_KEY`].
const CONFIG_FILE_ALIASES: [&str; 2] = ["-c", "--config-file"];

/// Layered configuration: one JSON document merged with command-line
/// overrides, queryable by delimiter-joined key paths.
///
/// Registration calls (`require_key`, `convert_key`, `rename_keys`) are made
/// before [`Config::parse`]; lookups are made after. Each `parse` call runs
/// the pipeline exactly once and mutates only this instance's owned state.
/// Ambient process arguments are never read here.
///
/// # Examples
///
/// ```
/// use conflate::Config;
///
/// let argv: Vec<String> = ["tool", "server.port=9090", "--dry-run"]
///     .iter()
///     .map(|token| (*token).to_string())
///     .collect();
///
/// let mut config = Config::new();
/// config.parse(None, &argv).unwrap();
///
/// assert_eq!(
///     config.get("server.port").and_then(|value| value.as_str()),
///     Some("9090")
/// );
/// assert!(config.has_extra_arg("--dry-run"));
/// ```
pub struct Config {
    command_line: CommandLine,
    resolver: Resolver,
    required_keys: Vec<String>,
    converters: HashMap<String, Converter>,
}

impl Config {
    /// Creates a configuration using the default `.` path delimiter.
    #[must_use]
    pub fn new() -> Self {
        Self::with_delimiter(DEFAULT_DELIMITER)
    }

    /// Creates a configuration whose paths split on a custom delimiter.
    #[must_use]
    pub fn with_delimiter(delimiter: char) -> Self {
        let mut command_line = CommandLine::new();
        command_line.rename_keys(CONFIG_FILE_KEY, &CONFIG_FILE_ALIASES);
        Self {
            command_line,
            resolver: Resolver::with_delimiter(delimiter),
            required_keys: Vec::new(),
            converters: HashMap::new(),
        }
    }

    /// Requires `path` to resolve to a present value after the merge.
    ///
    /// Presence is origin-agnostic: the file and the command line satisfy
    /// the requirement equally.
    pub fn require_key(&mut self, path: &str) {
        self.required_keys.push(path.to_string());
    }

    /// Requires `path` and registers a converter for its value.
    pub fn require_key_with<F>(&mut self, path: &str, converter: F)
    where
        F: Fn(&Value) -> std::result::Result<Value, ConverterError> + 'static,
    {
        self.require_key(path);
        self.convert_key(path, converter);
    }

    /// Registers a converter applied to the value at `path` after
    /// required-key validation.
    ///
    /// The converter runs only when the path is present; its result replaces
    /// the value in the resolved tree. Registering a second converter for
    /// the same path replaces the first.
    pub fn convert_key<F>(&mut self, path: &str, converter: F)
    where
        F: Fn(&Value) -> std::result::Result<Value, ConverterError> + 'static,
    {
        self.converters.insert(path.to_string(), Box::new(converter));
    }

    /// Renames command-line keys (keyword and bare) onto a canonical name.
    pub fn rename_keys(&mut self, canonical: &str, old_names: &[&str]) {
        self.command_line.rename_keys(canonical, old_names);
    }

    /// Runs the resolution pipeline once. The order is load-bearing:
    ///
    /// 1. Tokenize `argv`, applying registered aliases, so that the config
    ///    file itself can be named on the command line.
    /// 2. Pick the effective file path: a command-line `-c`/`--config-file`
    ///    value overrides `default_path`; with neither, no file is loaded
    ///    and resolution starts from an empty tree (not an error).
    /// 3. Load the document and verify its key structure.
    /// 4. Merge the keyword overlay; the command line wins by merging last.
    /// 5. Check required keys, then apply converters.
    ///
    /// Ambient process arguments are never read here; callers inject
    /// `std::env::args` at the outermost boundary when they want them.
    ///
    /// # Errors
    ///
    /// Propagates every pipeline failure fail-fast: [`Error::FileNotFound`],
    /// [`Error::MalformedDocument`], [`Error::InvalidKeyStructure`],
    /// [`Error::MissingRequiredKey`], [`Error::ConversionFailure`]. After an
    /// error the configuration state is undefined and must be treated as not
    /// yet loaded.
    ///
    /// [`Error::FileNotFound`]: crate::Error::FileNotFound
    /// [`Error::MalformedDocument`]: crate::Error::MalformedDocument
    /// [`Error::InvalidKeyStructure`]: crate::Error::InvalidKeyStructure
    /// [`Error::MissingRequiredKey`]: crate::Error::MissingRequiredKey
    /// [`Error::ConversionFailure`]: crate::Error::ConversionFailure
    pub fn parse(&mut self, default_path: Option<&Path>, argv: &[String]) -> Result<()> {
        self.command_line.parse(argv);

        let override_path = self
            .command_line
            .get(CONFIG_FILE_KEY)
            .and_then(Value::as_str)
            .map(PathBuf::from);
        let effective = override_path.or_else(|| default_path.map(Path::to_path_buf));

        let root = match effective {
            Some(path) => {
                log::debug!("loading configuration from {}", path.display());
                Some(DocumentLoader::read(&path)?)
            }
            None => None,
        };
        self.resolver.load(root)?;

        self.resolver.merge_overlay(self.command_line.keywords())?;
        self.resolver.require_keys(&self.required_keys)?;
        self.resolver.convert_keys(&self.converters)?;
        Ok(())
    }

    /// Looks up the resolved value at `path`.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Value> {
        self.resolver.get(path)
    }

    /// Whether `path` resolves to a present value.
    #[must_use]
    pub fn has(&self, path: &str) -> bool {
        self.resolver.has(path)
    }

    /// The resolved document tree.
    #[must_use]
    pub const fn document(&self) -> &Document {
        self.resolver.document()
    }

    /// The program identifier from the last parse.
    #[must_use]
    pub fn program(&self) -> Option<&str> {
        self.command_line.program()
    }

    /// Bare (non `key=value`) tokens in original order, alias-canonicalized.
    ///
    /// Keyword pairs and bare tokens are tracked independently; aliasing one
    /// of each onto the same canonical name keeps them in their separate
    /// containers.
    #[must_use]
    pub fn extra_args(&self) -> &[String] {
        self.command_line.extras()
    }

    /// Whether `token` appeared as a bare command-line token.
    #[must_use]
    pub fn has_extra_arg(&self, token: &str) -> bool {
        self.command_line.has_extra(token)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
