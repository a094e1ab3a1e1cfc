#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # conflate
//!
//! Layered JSON configuration for command-line programs: one hierarchical
//! document merged with transient `key=value` overrides, addressed by dotted
//! (or custom-delimiter) key paths.
//!
//! ## Core Types
//!
//! - [`Config`]: the resolution pipeline from tokenizing through conversion
//! - [`Document`]: the path-addressed document tree
//! - [`CommandLine`] and [`AliasTable`]: token parsing and key renaming
//! - [`Resolver`]: merge, validation, and conversion over a loaded document
//! - [`Error`] and [`Result`]: error handling types
//!
//! ## Examples
//!
//! ```
//! use conflate::Config;
//!
//! let argv: Vec<String> = ["tool", "server.port=9090", "--dry-run"]
//!     .iter()
//!     .map(|token| (*token).to_string())
//!     .collect();
//!
//! let mut config = Config::new();
//! config.parse(None, &argv).unwrap();
//!
//! assert_eq!(
//!     config.get("server.port").and_then(|value| value.as_str()),
//!     Some("9090")
//! );
//! assert!(config.has_extra_arg("--dry-run"));
//! ```
//!
//! With a configuration file, command-line pairs override file values and
//! dotted keys override nested entries:
//!
//! ```no_run
//! use std::path::Path;
//! use conflate::Config;
//!
//! let argv: Vec<String> = std::env::args().collect();
//!
//! let mut config = Config::new();
//! config.parse(Some(Path::new("app.json")), &argv)?;
//! # Ok::<(), conflate::Error>(())
//! ```

pub mod alias;
pub mod argv;
pub mod config;
pub mod document;
pub mod error;
pub mod loader;
pub mod resolver;

// Re-export key types at crate root for convenience
pub use alias::AliasTable;
pub use argv::CommandLine;
pub use config::Config;
pub use document::{Document, DEFAULT_DELIMITER};
pub use error::{Error, Result};
pub use loader::DocumentLoader;
pub use resolver::{Converter, ConverterError, Resolver};
