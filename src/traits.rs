//! Core trait that decouples nirimatic from the processes it talks to.
//!
//! Service probes and quick actions never spawn processes directly; they go
//! through a [`CommandRunner`].  The real implementation lives in
//! [`system`](crate::system); tests substitute a recorder.

/// What a finished external command produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Whether the process exited with status 0.
    pub success: bool,
    /// Captured standard output, lossily decoded.
    pub stdout: String,
}

impl CommandOutput {
    /// A successful run that printed `stdout`.
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            success: true,
            stdout: stdout.into(),
        }
    }

    /// A run that exited non-zero after printing `stdout`.
    pub fn failed(stdout: impl Into<String>) -> Self {
        Self {
            success: false,
            stdout: stdout.into(),
        }
    }
}

/// Abstraction over running an external program to completion.
///
/// An implementation might spawn a real process, or it might be a canned
/// table used in tests.
///
/// # Contract
///
/// * [`run`](CommandRunner::run) **blocks** until the program exits.
/// * `Err` means the program could not be started at all; a program that
///   started and failed is `Ok` with `success == false`.
/// * Implementations must be `Send + Sync` so background tasks can share
///   one runner.
pub trait CommandRunner: Send + Sync {
    /// The error type produced when a program cannot be started.
    type Error: std::error::Error + Send + 'static;

    /// Run `program` with `args` and wait for it to finish.
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput, Self::Error>;
}


#[cfg(test)]
mod tests {
    use super::mock::MockRunner;
    use super::*;

    #[test]
    fn mock_runner_records_calls() {
        let runner = MockRunner::new().respond("niri msg version", CommandOutput::ok("25.08"));
        let out = runner.run("niri", &["msg", "version"]).unwrap();
        assert_eq!(out, CommandOutput::ok("25.08"));
        assert!(runner.run("pgrep", &["-x", "stasis"]).is_err());
        assert_eq!(runner.calls(), vec!["niri msg version", "pgrep -x stasis"]);
    }

    #[test]
    fn output_constructors() {
        assert!(CommandOutput::ok("").success);
        assert!(!CommandOutput::failed("inactive").success);
        assert_eq!(CommandOutput::default(), CommandOutput::failed(""));
    }
}
