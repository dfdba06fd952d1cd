//! Extracts a [`NiriSettings`] snapshot from `config.kdl`.
//!
//! Extraction is lenient: lines that are not recognised, keys outside
//! their block, and malformed values are skipped silently.  When the same
//! key appears more than once, the last occurrence wins.

use crate::niri::error::{LoadError, NiriConfigError};
use crate::niri::scan::Scanner;
use crate::niri::settings::NiriSettings;
use log::{debug, info};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Load the settings stored in the file at `path`.
///
/// The file is streamed line by line.  On any I/O failure the returned
/// [`LoadError`] still carries a record at the hard-coded defaults, bound
/// to `path`, so the caller can keep going.
pub fn load(path: &Path) -> Result<NiriSettings, LoadError> {
    let fail = |source: std::io::Error| LoadError {
        settings: NiriSettings::with_path(path),
        source: NiriConfigError::Read {
            path: path.to_path_buf(),
            source,
        },
    };

    let file = File::open(path).map_err(fail)?;
    let mut settings = NiriSettings::with_path(path);
    let mut scanner = Scanner::new();

    for line in BufReader::new(file).lines() {
        let line = line.map_err(fail)?;
        if let Some(m) = scanner.feed(&line) {
            debug!("{} = {:?}", m.key, m.value);
            settings.set(m.key, m.value);
        }
    }

    info!("loaded niri settings from {}", path.display());
    Ok(settings)
}

/// Extract settings from in-memory `text`, binding the result to `path`.
pub fn parse(text: &str, path: impl Into<PathBuf>) -> NiriSettings {
    let mut settings = NiriSettings::with_path(path);
    let mut scanner = Scanner::new();
    for line in text.lines() {
        if let Some(m) = scanner.feed(line) {
            settings.set(m.key, m.value);
        }
    }
    settings
}
