//! [`CommandRunner`] implementation that spawns real processes.

use crate::traits::{CommandOutput, CommandRunner};
use log::debug;
use std::process::{Command, Stdio};

/// Runs programs found on `$PATH`.
///
/// Standard input is closed and standard error discarded so nothing leaks
/// onto the terminal the dashboard is drawing on.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

/// A program could not be started.
#[derive(Debug, thiserror::Error)]
#[error("failed to run {program}: {source}")]
pub struct SpawnError {
    program: String,
    #[source]
    source: std::io::Error,
}

impl SystemRunner {
    /// Create a new runner.
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemRunner {
    type Error = SpawnError;

    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput, SpawnError> {
        debug!("running {} {:?}", program, args);
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .map_err(|source| SpawnError {
                program: program.to_string(),
                source,
            })?;
        Ok(CommandOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        })
    }
}
