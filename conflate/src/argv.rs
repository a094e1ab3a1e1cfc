//! Command-line token parsing.
//!
//! Splits a raw token list into a program identifier, a `key=value` keyword
//! map, and an ordered list of bare tokens. A token is a keyword pair only
//! when splitting on `=` yields exactly two pieces, so values cannot contain
//! `=` themselves. This is a documented constraint of the token format, not
//! an escaping gap to work around.

use serde_json::{Map, Value};

use crate::alias::AliasTable;

/// Tokenized command-line state.
///
/// The first token is the program identifier; each remaining token is either
/// a `key=value` keyword pair (kept raw, no trimming) or a bare token. The
/// two categories are tracked independently and never merged into each
/// other. Registered aliases are applied to both after tokenizing.
///
/// # Examples
///
/// ```
/// use conflate::CommandLine;
///
/// let argv: Vec<String> = ["app", "mode=fast", "run"]
///     .iter()
///     .map(|token| (*token).to_string())
///     .collect();
///
/// let mut command_line = CommandLine::new();
/// command_line.parse(&argv);
///
/// assert_eq!(command_line.program(), Some("app"));
/// assert_eq!(command_line.get("mode").and_then(|v| v.as_str()), Some("fast"));
/// assert_eq!(command_line.extras(), ["run"]);
/// ```
#[derive(Debug, Default, Clone)]
pub struct CommandLine {
    program: Option<String>,
    keywords: Map<String, Value>,
    extras: Vec<String>,
    aliases: AliasTable,
}

impl CommandLine {
    /// Creates an empty parser with no registered aliases.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps each of `old_names` onto `canonical` for subsequent parses.
    ///
    /// Renames apply to keyword keys and bare tokens alike.
    pub fn rename_keys(&mut self, canonical: &str, old_names: &[&str]) {
        self.aliases.register(canonical, old_names);
    }

    /// Tokenizes `argv`, replacing any previously parsed state wholesale.
    ///
    /// An empty list leaves everything absent. Duplicate keyword keys keep
    /// the last occurrence; bare tokens keep their relative order and are
    /// de-duplicated by canonical name after aliasing.
    pub fn parse(&mut self, argv: &[String]) {
        self.program = None;
        self.keywords = Map::new();
        self.extras = Vec::new();

        let Some((program, arguments)) = argv.split_first() else {
            return;
        };
        self.program = Some(program.clone());

        for token in arguments {
            let pieces: Vec<&str> = token.split('=').collect();
            if pieces.len() == 2 {
                self.keywords
                    .insert(pieces[0].to_string(), Value::String(pieces[1].to_string()));
            } else {
                self.extras.push(token.clone());
            }
        }

        self.keywords = self.aliases.apply_to_map(std::mem::take(&mut self.keywords));
        self.extras = self.aliases.apply_to_list(std::mem::take(&mut self.extras));

        log::debug!(
            "parsed {} keyword pair(s) and {} bare token(s)",
            self.keywords.len(),
            self.extras.len()
        );
    }

    /// The program identifier, absent until a non-empty parse.
    #[must_use]
    pub fn program(&self) -> Option<&str> {
        self.program.as_deref()
    }

    /// The keyword mapping from the last parse, alias-canonicalized.
    #[must_use]
    pub const fn keywords(&self) -> &Map<String, Value> {
        &self.keywords
    }

    /// The bare tokens from the last parse, in original relative order.
    #[must_use]
    pub fn extras(&self) -> &[String] {
        &self.extras
    }

    /// Looks up the value of a keyword pair by its canonical key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.keywords.get(key)
    }

    /// Whether `token` appeared as a bare (non `key=value`) token.
    #[must_use]
    pub fn has_extra(&self, token: &str) -> bool {
        self.extras.iter().any(|extra| extra == token)
    }
}
