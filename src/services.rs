//! Service status checks shown on the dashboard.
//!
//! The compositor itself is considered running when `niri msg version`
//! succeeds, since that only works while niri's IPC socket is up.  Other
//! services are looked up as systemd user units first and as bare process
//! names second.

use crate::traits::CommandRunner;
use log::debug;
use std::fmt;

/// Observed state of one service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ServiceStatus {
    Running,
    Stopped,
    #[default]
    Unknown,
}

impl fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceStatus::Running => write!(f, "Running"),
            ServiceStatus::Stopped => write!(f, "Stopped"),
            ServiceStatus::Unknown => write!(f, "Unknown"),
        }
    }
}

/// A named service and its last observed status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Service {
    pub name: String,
    pub status: ServiceStatus,
}

impl Service {
    /// A service that has not been checked yet.
    pub fn unchecked(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: ServiceStatus::Unknown,
        }
    }
}

/// Determine the status of `name`.
///
/// A program that cannot be started counts as a failed run; this function
/// never errors.
pub fn check_service<R: CommandRunner>(runner: &R, name: &str) -> ServiceStatus {
    let succeeds = |program: &str, args: &[&str]| match runner.run(program, args) {
        Ok(out) => out.success,
        Err(e) => {
            debug!("{}", e);
            false
        }
    };

    if name == "niri" {
        return if succeeds("niri", &["msg", "version"]) {
            ServiceStatus::Running
        } else {
            ServiceStatus::Stopped
        };
    }

    let unit_state = match runner.run("systemctl", &["--user", "is-active", name]) {
        Ok(out) => out.stdout.trim().to_string(),
        Err(e) => {
            debug!("{}", e);
            String::new()
        }
    };

    match unit_state.as_str() {
        "active" => ServiceStatus::Running,
        "inactive" | "failed" => ServiceStatus::Stopped,
        _ if succeeds("pgrep", &["-x", name]) => ServiceStatus::Running,
        _ => ServiceStatus::Unknown,
    }
}

/// Check every service in `names`, preserving order.
pub fn check_all<R: CommandRunner>(runner: &R, names: &[String]) -> Vec<Service> {
    names
        .iter()
        .map(|name| Service {
            name: name.clone(),
            status: check_service(runner, name),
        })
        .collect()
}
