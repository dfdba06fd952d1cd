//! Background work requested by the UI and the events it reports back.
//!
//! UI state never blocks: key handlers return [`Task`]s, the event loop
//! runs each one on its own thread with [`spawn`], and the result comes
//! back as an [`AppEvent`] over an [`mpsc`](std::sync::mpsc) channel.
//! Each task is a self-contained unit (one load, one save, one round of
//! status checks) that runs to completion.

use crate::actions::{Action, ActionError};
use crate::niri::{self, LoadError, NiriConfigError, NiriSettings};
use crate::services::{self, Service};
use crate::traits::CommandRunner;
use log::{debug, error};
use std::path::PathBuf;
use std::sync::{mpsc, Arc};

/// A unit of work for a background thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    /// Read the niri config at the given path.
    LoadSettings(PathBuf),
    /// Write the snapshot back to its file.
    SaveSettings(NiriSettings),
    /// Check the status of the named services.
    CheckServices(Vec<String>),
    /// Run a quick action.
    Run(Action),
}

/// The outcome of a [`Task`].
#[derive(Debug)]
pub enum AppEvent {
    SettingsLoaded(Result<NiriSettings, LoadError>),
    SettingsSaved(Result<(), NiriConfigError>),
    ServicesChecked(Vec<Service>),
    ActionFinished(Action, Result<(), ActionError>),
}

/// Run `task` on the calling thread.
pub fn execute<R: CommandRunner>(task: Task, runner: &R) -> AppEvent {
    match task {
        Task::LoadSettings(path) => AppEvent::SettingsLoaded(niri::load(&path)),
        Task::SaveSettings(settings) => AppEvent::SettingsSaved(niri::save(&settings)),
        Task::CheckServices(names) => {
            AppEvent::ServicesChecked(services::check_all(runner, &names))
        }
        Task::Run(action) => AppEvent::ActionFinished(action, action.run(runner)),
    }
}

/// Run `task` on a new thread and send its outcome to `sink`.
pub fn spawn<R: CommandRunner + 'static>(task: Task, runner: Arc<R>, sink: mpsc::Sender<AppEvent>) {
    debug!("spawning {:?}", task);
    let spawned = std::thread::Builder::new()
        .name("nirimatic-task".into())
        .spawn(move || {
            let event = execute(task, runner.as_ref());
            if sink.send(event).is_err() {
                debug!("event loop gone, dropping task result");
            }
        });
    if let Err(e) = spawned {
        error!("failed to spawn task thread: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::mock::MockRunner;
    use crate::traits::CommandOutput;
    use std::time::Duration;

    #[test]
    fn load_task_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.kdl");
        match execute(Task::LoadSettings(path.clone()), &MockRunner::new()) {
            AppEvent::SettingsLoaded(Err(e)) => {
                assert_eq!(e.settings, NiriSettings::with_path(&path))
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn save_task_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.kdl");
        std::fs::write(&path, "layout {\n    gaps 10\n}\n").unwrap();
        let mut settings = niri::load(&path).unwrap();
        settings.gaps = 3;
        match execute(Task::SaveSettings(settings), &MockRunner::new()) {
            AppEvent::SettingsSaved(Ok(())) => {}
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "layout {\n    gaps 3\n}\n"
        );
    }

    #[test]
    fn spawned_task_reports_over_channel() {
        let runner = Arc::new(
            MockRunner::new().respond("niri msg action reload-config", CommandOutput::ok("")),
        );
        let (tx, rx) = mpsc::channel();
        spawn(Task::Run(Action::ReloadNiri), runner, tx);
        match rx.recv_timeout(Duration::from_secs(5)).unwrap() {
            AppEvent::ActionFinished(Action::ReloadNiri, Ok(())) => {}
            other => panic!("unexpected {:?}", other),
        }
    }
}
