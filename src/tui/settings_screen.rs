//! The niri settings editor screen.
//!
//! An edit session starts when a [`NiriSettings`] snapshot arrives.  Edits
//! only touch the [`FieldList`]; pressing save copies the fields into the
//! snapshot and hands it to the writer.  Reverting discards the snapshot
//! and reloads it from disk.
//!
//! At most one load or save is in flight at a time; save and revert are
//! refused until the pending one reports back.

use crate::niri::{LoadError, NiriConfigError, NiriSettings, SettingValue};
use crate::tui::fields::{Field, FieldKind, FieldList, Section};
use crate::tui::keys::{help_line, KeyMap};
use crate::tui::tasks::Task;
use crate::tui::theme::Theme;
use crossterm::event::KeyEvent;
use log::{debug, info, warn};
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use std::path::{Path, PathBuf};

const SLIDER_WIDTH: u32 = 20;

/// Feedback shown after a save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Saved,
    SaveFailed(String),
}

/// State of the settings screen.
#[derive(Debug, Clone)]
pub struct SettingsScreen {
    path: PathBuf,
    settings: Option<NiriSettings>,
    fields: FieldList,
    cursor: usize,
    dirty: bool,
    /// Bumped on every edit that changes a value.
    generation: u64,
    /// Generation captured when the pending save was requested.
    saving: Option<u64>,
    /// A load or save is in flight.
    busy: bool,
    error: Option<String>,
    notice: Option<Notice>,
}

impl SettingsScreen {
    /// An empty screen for the config at `path`; nothing is loaded yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            settings: None,
            fields: FieldList::default(),
            cursor: 0,
            dirty: false,
            generation: 0,
            saving: None,
            busy: false,
            error: None,
            notice: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn settings(&self) -> Option<&NiriSettings> {
        self.settings.as_ref()
    }

    pub fn fields(&self) -> &FieldList {
        &self.fields
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether there are edits that have not been saved.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Whether a load or save has not reported back yet.
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Start a fresh edit session from disk.
    ///
    /// Returns `None` while another load or save is still running.
    pub fn load(&mut self) -> Option<Task> {
        if self.busy {
            debug!("config operation in flight, not reloading");
            return None;
        }
        self.busy = true;
        Some(Task::LoadSettings(self.path.clone()))
    }

    /// React to a key press while the screen has focus.
    pub fn handle_key(&mut self, key: &KeyEvent, keys: &KeyMap) -> Option<Task> {
        if keys.up.matches(key) {
            self.cursor = self.cursor.saturating_sub(1);
        } else if keys.down.matches(key) {
            if self.cursor + 1 < self.fields.len() {
                self.cursor += 1;
            }
        } else if keys.left.matches(key) {
            self.edit(Field::decrease);
        } else if keys.right.matches(key) {
            self.edit(Field::increase);
        } else if keys.toggle.matches(key) {
            self.edit(Field::toggle);
        } else if keys.save.matches(key) {
            return self.save();
        } else if keys.revert.matches(key) {
            return self.load();
        }
        None
    }

    fn edit(&mut self, op: fn(&mut Field) -> bool) {
        if let Some(field) = self.fields.get_mut(self.cursor) {
            if op(field) {
                self.dirty = true;
                self.generation += 1;
            }
        }
    }

    /// Copy the fields into the snapshot and request a write.
    fn save(&mut self) -> Option<Task> {
        if self.busy {
            debug!("config operation in flight, not saving");
            return None;
        }
        let Some(settings) = self.settings.as_mut() else {
            self.notice = Some(Notice::SaveFailed("no config loaded".into()));
            return None;
        };
        self.fields.store_into(settings);
        self.busy = true;
        self.saving = Some(self.generation);
        Some(Task::SaveSettings(settings.clone()))
    }

    /// A load finished.  A failed load still installs the defaulted
    /// record so the user sees the values a save would write.
    pub fn on_loaded(&mut self, result: Result<NiriSettings, LoadError>) {
        let settings = match result {
            Ok(settings) => {
                self.error = None;
                settings
            }
            Err(e) => {
                warn!("{}", e);
                self.error = Some(e.to_string());
                e.into_settings()
            }
        };
        self.fields.load_from(&settings);
        self.settings = Some(settings);
        self.dirty = false;
        self.busy = false;
        self.notice = None;
    }

    /// A save finished.  Edits made after the save was requested stay
    /// dirty.
    pub fn on_saved(&mut self, result: Result<(), NiriConfigError>) {
        self.busy = false;
        let saved = self.saving.take();
        match result {
            Ok(()) => {
                info!("configuration saved");
                if saved == Some(self.generation) {
                    self.dirty = false;
                }
                self.notice = Some(Notice::Saved);
            }
            Err(e) => {
                warn!("save failed: {}", e);
                self.notice = Some(Notice::SaveFailed(e.to_string()));
            }
        }
    }

    //  Rendering

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme, keys: &KeyMap) {
        let mut lines = vec![
            Line::from(Span::styled("Niri Settings", theme.title())),
            Line::from(Span::styled(self.path.display().to_string(), theme.dimmed())),
            Line::default(),
        ];

        if let Some(err) = &self.error {
            lines.push(Line::from(Span::styled(format!("Error: {}", err), theme.error())));
            lines.push(Line::default());
        }
        match &self.notice {
            Some(Notice::Saved) => {
                lines.push(Line::from(Span::styled("Configuration saved!", theme.success())));
                lines.push(Line::default());
            }
            Some(Notice::SaveFailed(reason)) => {
                lines.push(Line::from(Span::styled(
                    format!("Error saving: {}", reason),
                    theme.error(),
                )));
                lines.push(Line::default());
            }
            None => {}
        }

        for section in Section::ALL {
            lines.push(Line::from(Span::styled(section.title(), theme.section())));
            for (index, field) in self.fields.iter().enumerate() {
                if field.section == section {
                    lines.push(self.field_line(field, index == self.cursor, theme));
                }
            }
            lines.push(Line::default());
        }

        if self.dirty {
            lines.push(Line::from(Span::styled("* Unsaved changes", theme.warning())));
            lines.push(Line::default());
        }

        let help = help_line(&[
            &keys.up,
            &keys.down,
            &keys.left,
            &keys.right,
            &keys.toggle,
            &keys.save,
            &keys.revert,
        ]);
        lines.push(Line::from(Span::styled(help, theme.dimmed())));

        frame.render_widget(Paragraph::new(lines), area);
    }

    fn field_line(&self, field: &Field, selected: bool, theme: &Theme) -> Line<'static> {
        let cursor = if selected { "▸ " } else { "  " };
        let mut spans = vec![
            Span::styled(cursor, theme.success()),
            Span::styled(format!("{:<22}", field.label), theme.item(selected)),
        ];

        match (field.kind, field.value) {
            (FieldKind::Slider { min, max, unit, .. }, SettingValue::Int(value)) => {
                spans.push(Span::styled(
                    format!("[{}]", slider(value, min, max)),
                    theme.slider(selected),
                ));
                spans.push(Span::styled(format!(" {}", value), theme.value(selected)));
                if !unit.is_empty() {
                    spans.push(Span::styled(format!(" {}", unit), theme.dimmed()));
                }
            }
            (_, SettingValue::Bool(enabled)) => {
                let text = if enabled { "[✓] Enabled" } else { "[ ] Disabled" };
                spans.push(Span::styled(text, theme.toggle(enabled, selected)));
            }
            (FieldKind::Toggle, SettingValue::Int(value)) => {
                spans.push(Span::styled(value.to_string(), theme.value(selected)));
            }
        }
        Line::from(spans)
    }
}

/// Draw a `SLIDER_WIDTH`-wide track with a knob at `value`.
fn slider(value: u32, min: u32, max: u32) -> String {
    let range = u64::from(max.saturating_sub(min).max(1));
    let offset = u64::from(value.clamp(min, max.max(min)) - min);
    let pos = (offset * u64::from(SLIDER_WIDTH) / range).min(u64::from(SLIDER_WIDTH)) as usize;
    format!(
        "{}●{}",
        "─".repeat(pos),
        "─".repeat(SLIDER_WIDTH as usize - pos)
    )
}
