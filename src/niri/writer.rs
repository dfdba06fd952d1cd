//! Writes a [`NiriSettings`] snapshot back into `config.kdl`.
//!
//! The update is surgical: only the value token of a recognised key is
//! replaced, so indentation, comments, trailing text and key order all
//! survive.  Keys missing from the file are never inserted; the writer
//! edits existing structure and does not author new blocks.
//!
//! The whole file is read, rewritten in memory, and then replaced in a
//! single step through a temporary sibling file, so a failed save leaves
//! the original intact.

use crate::niri::error::NiriConfigError;
use crate::niri::scan::{Match, Scanner};
use crate::niri::settings::{NiriSettings, SettingKey, SettingValue};
use log::{debug, info};
use std::fs;
use std::io::{self, Write};
use std::panic;
use std::path::{Path, PathBuf};

/// Rewrite the file at `settings.path` so every recognised key carries the
/// value held in `settings`.
pub fn save(settings: &NiriSettings) -> Result<(), NiriConfigError> {
    let path = &settings.path;
    let original = fs::read_to_string(path).map_err(|source| NiriConfigError::Read {
        path: path.clone(),
        source,
    })?;

    let updated = panic::catch_unwind(|| rewrite(&original, settings)).map_err(|cause| {
        let reason = cause
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| cause.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "rewrite panicked".into());
        NiriConfigError::Internal {
            path: path.clone(),
            reason,
        }
    })?;

    replace_file(path, &updated).map_err(|source| NiriConfigError::Write {
        path: path.clone(),
        source,
    })?;
    info!("saved niri settings to {}", path.display());
    Ok(())
}

/// Apply `settings` to the config text `content`.
///
/// Lines are split on `\n` and joined back the same way, so line endings
/// (including a trailing newline or `\r\n`) are preserved.
pub fn rewrite(content: &str, settings: &NiriSettings) -> String {
    let mut scanner = Scanner::new();
    content
        .split('\n')
        .map(|line| match scanner.feed(line) {
            Some(m) => update_line(line, &m, settings),
            None => line.to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Replace the token `m` points at with the value `settings` holds.
fn update_line(line: &str, m: &Match, settings: &NiriSettings) -> String {
    let current = settings.get(m.key);
    // An unchanged value keeps its original spelling (`007` stays `007`).
    if current == m.value {
        return line.to_string();
    }

    let token = match (m.key, current) {
        // Presence flags can be read but not written.
        (SettingKey::FocusFollowsMouse | SettingKey::WorkspaceAutoBackAndForth, _) => {
            return line.to_string();
        }
        (_, SettingValue::Int(v)) => v.to_string(),
        (_, SettingValue::Bool(true)) => "on".to_string(),
        (_, SettingValue::Bool(false)) => "off".to_string(),
    };

    debug!("{}: {:?} -> {}", m.key, m.value, token);
    let mut out = line.to_string();
    out.replace_range(m.span.clone(), &token);
    out
}

/// Atomically replace `path` with `contents`.
///
/// Symlinks are resolved first so a dotfile-managed config keeps its link.
/// A read-only target is refused rather than silently replaced.
fn replace_file(path: &Path, contents: &str) -> io::Result<()> {
    let target: PathBuf = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let permissions = fs::metadata(&target)?.permissions();
    if permissions.readonly() {
        return Err(io::Error::new(
            io::ErrorKind::PermissionDenied,
            "file is read-only",
        ));
    }

    let dir = match target.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(contents.as_bytes())?;
    tmp.as_file().sync_all()?;
    fs::set_permissions(tmp.path(), permissions)?;
    tmp.persist(&target).map_err(|e| e.error)?;
    Ok(())
}
