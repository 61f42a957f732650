//! Gathering color tokens and the mode selector from the outside world.
//!
//! Tokens come from the color file (one per line) followed by positional
//! arguments. Bad tokens and bad mode names are logged and skipped rather
//! than aborting the run.

use crate::error::CliError;
use colormix_blend::Mode;
use colormix_core::Color;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, warn};

/// Color file read when `--file` is not given.
pub const DEFAULT_COLOR_FILE: &str = "colors.txt";

/// A token that could not be parsed as a color.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rejected {
    pub token: String,
    pub error: String,
}

/// Reads a color file, returning trimmed non-blank lines.
pub fn read_color_lines(path: &Path) -> io::Result<Vec<String>> {
    let text = fs::read_to_string(path)?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect())
}

/// Loads tokens from `path`, or from [`DEFAULT_COLOR_FILE`] when `path` is `None`.
///
/// An explicitly requested file that cannot be read is an error; a missing
/// default file only logs a warning.
pub fn load_file_tokens(path: Option<&Path>) -> Result<Vec<String>, CliError> {
    match path {
        Some(path) => read_color_lines(path)
            .map_err(|e| CliError::Io(format!("could not read {}: {e}", path.display()))),
        None => match read_color_lines(Path::new(DEFAULT_COLOR_FILE)) {
            Ok(lines) => Ok(lines),
            Err(e) => {
                warn!("could not read file {DEFAULT_COLOR_FILE}: {e}");
                Ok(Vec::new())
            }
        },
    }
}

/// Parses every token, keeping the good ones in order and reporting the rest.
pub fn parse_tokens(tokens: &[String], default_alpha: u8) -> (Vec<Color>, Vec<Rejected>) {
    let mut colors = Vec::with_capacity(tokens.len());
    let mut rejected = Vec::new();
    for token in tokens {
        match Color::parse_with_alpha(token, default_alpha) {
            Ok(color) => {
                debug!(token = token.as_str(), hex = %color.hex(), "parsed color");
                colors.push(color);
            }
            Err(e) => {
                warn!("skipping {token:?}: {e}");
                rejected.push(Rejected {
                    token: token.clone(),
                    error: e.to_string(),
                });
            }
        }
    }
    (colors, rejected)
}

/// Resolves the `--mode` argument, falling back to [`Mode::Mix`] with a warning.
pub fn resolve_mode(name: Option<&str>) -> Mode {
    match name.map(Mode::from_name) {
        Some(Ok(mode)) => mode,
        Some(Err(e)) => {
            warn!("{e}: default mode {} chosen", Mode::default());
            Mode::default()
        }
        None => {
            warn!("no mode given: default mode {} chosen", Mode::default());
            Mode::default()
        }
    }
}
