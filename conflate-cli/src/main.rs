//! Entry point for the conflate configuration inspector.
//!
//! Resolves a layered JSON configuration (a file named with `-c=FILE` or
//! `--config-file=FILE`, merged with `key=value` overrides) and prints the
//! result: the value at each bare-token path, or the whole merged document
//! when no paths are given. This binary is the one place ambient process
//! arguments are read; the library itself never touches them.
//!
//! ```text
//! conflate --config-file=app.json server.port=8080 server
//! ```

mod error;

use std::env;
use std::process;

use conflate::Config;
use error::CliError;

fn main() {
    let argv: Vec<String> = env::args().collect();

    match run(&argv) {
        Ok(output) => println!("{output}"),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(e.exit_code());
        }
    }
}

/// Resolve the configuration and render the requested output.
fn run(argv: &[String]) -> Result<String, CliError> {
    let mut config = Config::new();
    config.parse(None, argv)?;

    let paths = config.extra_args();
    if paths.is_empty() {
        return Ok(serde_json::to_string_pretty(config.document().root())?);
    }

    let mut rendered = Vec::with_capacity(paths.len());
    for path in paths {
        let value = config
            .get(path)
            .ok_or_else(|| CliError::UnknownPath(path.clone()))?;
        rendered.push(serde_json::to_string_pretty(value)?);
    }
    Ok(rendered.join("\n"))
}
