//! Quick actions that hand off to other programs.

use crate::traits::CommandRunner;
use log::{info, warn};
use std::fmt;

/// A fire-and-forget external action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Ask the running compositor to re-read its config file.
    ReloadNiri,
    /// Toggle the Noctalia shell settings panel.
    ToggleNoctalia,
}

impl Action {
    /// The program and arguments implementing this action.
    pub fn command(self) -> (&'static str, &'static [&'static str]) {
        match self {
            Action::ReloadNiri => ("niri", &["msg", "action", "reload-config"]),
            Action::ToggleNoctalia => (
                "qs",
                &["-c", "noctalia-shell", "ipc", "call", "settings", "toggle"],
            ),
        }
    }

    /// Run the action to completion.
    pub fn run<R: CommandRunner>(self, runner: &R) -> Result<(), ActionError> {
        let (program, args) = self.command();
        match runner.run(program, args) {
            Ok(out) if out.success => {
                info!("{} done", self);
                Ok(())
            }
            Ok(_) => {
                warn!("{} exited with an error", self);
                Err(ActionError(format!("`{}` exited with an error", program)))
            }
            Err(e) => {
                warn!("{}: {}", self, e);
                Err(ActionError(e.to_string()))
            }
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::ReloadNiri => write!(f, "reload niri config"),
            Action::ToggleNoctalia => write!(f, "toggle noctalia settings"),
        }
    }
}

/// An action could not be carried out.
#[derive(Debug, Clone, thiserror::Error)]
#[error("action failed: {0}")]
pub struct ActionError(String);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::mock::MockRunner;
    use crate::traits::CommandOutput;

    #[test]
    fn reload_runs_niri_msg() {
        let runner = MockRunner::new()
            .respond("niri msg action reload-config", CommandOutput::ok(""));
        Action::ReloadNiri.run(&runner).unwrap();
        assert_eq!(runner.calls(), vec!["niri msg action reload-config"]);
    }

    #[test]
    fn noctalia_toggle_command_line() {
        let runner = MockRunner::new().respond(
            "qs -c noctalia-shell ipc call settings toggle",
            CommandOutput::ok(""),
        );
        assert!(Action::ToggleNoctalia.run(&runner).is_ok());
    }

    #[test]
    fn failures_are_reported() {
        let runner = MockRunner::new()
            .respond("niri msg action reload-config", CommandOutput::failed(""));
        let err = Action::ReloadNiri.run(&runner).unwrap_err();
        assert!(err.to_string().contains("niri"));

        assert!(Action::ToggleNoctalia.run(&MockRunner::new()).is_err());
    }
}
