//! Errors produced while loading or saving the niri config file.

use crate::niri::settings::NiriSettings;
use std::path::PathBuf;

/// Failure to read, rewrite, or write `config.kdl`.
#[derive(Debug, thiserror::Error)]
pub enum NiriConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The rewrite itself failed; the file on disk was not touched.
    #[error("failed to update {}: {reason}", path.display())]
    Internal { path: PathBuf, reason: String },
}

/// A failed load.
///
/// Loading never leaves the caller empty-handed: `settings` holds the
/// hard-coded defaults bound to the requested path, ready to be displayed.
#[derive(Debug, thiserror::Error)]
#[error("{source}")]
pub struct LoadError {
    pub settings: NiriSettings,
    pub source: NiriConfigError,
}

impl LoadError {
    /// Discard the error and keep the defaulted record.
    pub fn into_settings(self) -> NiriSettings {
        self.settings
    }
}
