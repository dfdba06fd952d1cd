//! Top-level application state.
//!
//! [`App`] routes key presses between the sidebar and the active screen,
//! collects the [`Task`]s they produce, and applies the [`AppEvent`]s that
//! come back.  It performs no I/O itself.

use crate::actions::Action;
use crate::config::Config;
use crate::tui::dashboard::Dashboard;
use crate::tui::keys::{help_line, KeyMap};
use crate::tui::settings_screen::SettingsScreen;
use crate::tui::tasks::{AppEvent, Task};
use crate::tui::theme::Theme;
use chrono::Local;
use crossterm::event::KeyEvent;
use log::info;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::Frame;
use std::time::Instant;

const SIDEBAR_WIDTH: u16 = 24;

/// Screens reachable from the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Dashboard,
    NiriSettings,
}

impl Screen {
    pub const ALL: [Screen; 2] = [Screen::Dashboard, Screen::NiriSettings];

    pub fn title(self) -> &'static str {
        match self {
            Screen::Dashboard => "Dashboard",
            Screen::NiriSettings => "Niri Settings",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }
}

/// Which pane receives navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Sidebar,
    Content,
}

/// Outcome of the last quick action, shown in the footer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Done(String),
    Failed(String),
    Info(String),
}

/// The whole UI state.
pub struct App {
    screen: Screen,
    focus: Focus,
    keys: KeyMap,
    theme: Theme,
    dashboard: Dashboard,
    settings: SettingsScreen,
    status: Option<Status>,
    quit_armed: bool,
    should_quit: bool,
}

impl App {
    /// Build the UI for `config`, drawing with `theme`.
    pub fn new(config: &Config, theme: Theme) -> Self {
        Self {
            screen: Screen::Dashboard,
            focus: Focus::Sidebar,
            keys: KeyMap::default(),
            theme,
            dashboard: Dashboard::new(&config.services, config.refresh_interval()),
            settings: SettingsScreen::new(config.niri_config_path()),
            status: None,
            quit_armed: false,
            should_quit: false,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    pub fn settings(&self) -> &SettingsScreen {
        &self.settings
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Work to kick off once the event loop is running.
    pub fn start(&mut self, now: Instant) -> Vec<Task> {
        let mut tasks: Vec<Task> = self.settings.load().into_iter().collect();
        tasks.extend(self.dashboard.poll(now));
        tasks
    }

    /// Periodic housekeeping.
    pub fn tick(&mut self, now: Instant) -> Vec<Task> {
        self.dashboard.poll(now).into_iter().collect()
    }

    /// React to a key press.
    pub fn handle_key(&mut self, key: KeyEvent) -> Vec<Task> {
        let keys = &self.keys;

        if keys.quit.matches(&key) {
            if self.settings.is_dirty() && !self.quit_armed {
                self.quit_armed = true;
                self.status = Some(Status::Info(
                    "Unsaved changes; press q again to quit".into(),
                ));
            } else {
                info!("quitting");
                self.should_quit = true;
            }
            return Vec::new();
        }
        if self.quit_armed {
            self.quit_armed = false;
            self.status = None;
        }

        if keys.noctalia.matches(&key) {
            return vec![Task::Run(Action::ToggleNoctalia)];
        }

        let task = match self.focus {
            Focus::Content if keys.back.matches(&key) => {
                self.focus = Focus::Sidebar;
                None
            }
            Focus::Content => match self.screen {
                Screen::Dashboard => self.dashboard.handle_key(&key, keys),
                Screen::NiriSettings => self.settings.handle_key(&key, keys),
            },
            Focus::Sidebar => {
                if keys.enter.matches(&key) {
                    self.focus = Focus::Content;
                    None
                } else if keys.up.matches(&key) {
                    self.screen = Screen::ALL[self.screen.index().saturating_sub(1)];
                    None
                } else if keys.down.matches(&key) {
                    let next = (self.screen.index() + 1).min(Screen::ALL.len() - 1);
                    self.screen = Screen::ALL[next];
                    None
                } else if keys.reload.matches(&key) {
                    Some(Task::Run(Action::ReloadNiri))
                } else {
                    None
                }
            }
        };
        task.into_iter().collect()
    }

    /// Apply the outcome of a background task.
    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::SettingsLoaded(result) => self.settings.on_loaded(result),
            AppEvent::SettingsSaved(result) => self.settings.on_saved(result),
            AppEvent::ServicesChecked(services) => {
                self.dashboard.on_checked(services, Local::now())
            }
            AppEvent::ActionFinished(action, result) => {
                self.status = Some(match result {
                    Ok(()) => Status::Done(format!("✓ {}", action)),
                    Err(e) => Status::Failed(format!("✗ {}: {}", action, e)),
                });
            }
        }
    }

    //  Rendering

    pub fn render(&self, frame: &mut Frame) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(frame.area());
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(1)])
            .split(rows[1]);

        self.render_header(frame, rows[0]);
        self.render_sidebar(frame, cols[0]);
        self.render_content(frame, cols[1]);
        self.render_footer(frame, rows[2]);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let header = Paragraph::new(Line::from(vec![
            Span::styled("▄▄ nirimatic", self.theme.header()),
            Span::styled(
                format!("  v{}", env!("CARGO_PKG_VERSION")),
                self.theme.dimmed(),
            ),
        ]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(self.theme.border(false)),
        );
        frame.render_widget(header, area);
    }

    fn render_sidebar(&self, frame: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = Screen::ALL
            .iter()
            .map(|screen| {
                let selected = *screen == self.screen;
                let marker = if selected { "▸ " } else { "  " };
                ListItem::new(Line::from(Span::styled(
                    format!("{}{}", marker, screen.title()),
                    self.theme.item(selected),
                )))
            })
            .collect();

        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(self.theme.border(self.focus == Focus::Sidebar))
                .title(Span::styled(" nirimatic ", self.theme.title())),
        );
        let mut state = ListState::default();
        state.select(Some(self.screen.index()));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn render_content(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border(self.focus == Focus::Content));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        match self.screen {
            Screen::Dashboard => self.dashboard.render(frame, inner, &self.theme, &self.keys),
            Screen::NiriSettings => self.settings.render(frame, inner, &self.theme, &self.keys),
        }
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let keys = &self.keys;
        let line = match &self.status {
            Some(Status::Done(text)) => Span::styled(text.clone(), self.theme.success()),
            Some(Status::Failed(text)) => Span::styled(text.clone(), self.theme.error()),
            Some(Status::Info(text)) => Span::styled(text.clone(), self.theme.warning()),
            None => {
                let help = match self.focus {
                    Focus::Sidebar => help_line(&[
                        &keys.up,
                        &keys.down,
                        &keys.enter,
                        &keys.reload,
                        &keys.noctalia,
                        &keys.quit,
                    ]),
                    Focus::Content => help_line(&[&keys.back, &keys.noctalia, &keys.quit]),
                };
                Span::styled(help, self.theme.dimmed())
            }
        };
        frame.render_widget(Paragraph::new(Line::from(line)), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::niri::NiriSettings;
    use crate::traits::mock::MockRunner;
    use crossterm::event::{KeyCode, KeyModifiers};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use std::path::PathBuf;

    fn app() -> App {
        let config = Config {
            niri_config: Some(PathBuf::from("/tmp/nirimatic-test/config.kdl")),
            ..Config::default()
        };
        App::new(&config, Theme::default())
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn press(c: char) -> KeyEvent {
        key(KeyCode::Char(c))
    }

    fn loaded_app() -> App {
        let mut app = app();
        app.handle_event(AppEvent::SettingsLoaded(Ok(NiriSettings::with_path(
            "/tmp/nirimatic-test/config.kdl",
        ))));
        app
    }

    fn render_text(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn start_loads_settings_and_checks_services() {
        let mut app = app();
        let tasks = app.start(Instant::now());
        assert_eq!(
            tasks,
            vec![
                Task::LoadSettings(PathBuf::from("/tmp/nirimatic-test/config.kdl")),
                Task::CheckServices(vec![
                    "niri".into(),
                    "noctalia-shell".into(),
                    "stasis".into()
                ]),
            ]
        );
    }

    #[test]
    fn sidebar_navigation_and_focus() {
        let mut app = app();
        assert_eq!(app.screen(), Screen::Dashboard);
        app.handle_key(press('j'));
        assert_eq!(app.screen(), Screen::NiriSettings);
        app.handle_key(press('j'));
        assert_eq!(app.screen(), Screen::NiriSettings);
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.focus(), Focus::Content);
        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.focus(), Focus::Sidebar);
        app.handle_key(press('k'));
        assert_eq!(app.screen(), Screen::Dashboard);
    }

    #[test]
    fn r_reloads_niri_from_sidebar_but_reverts_in_settings() {
        let mut app = loaded_app();
        assert_eq!(app.handle_key(press('r')), vec![Task::Run(Action::ReloadNiri)]);

        app.handle_key(press('j'));
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(
            app.handle_key(press('r')),
            vec![Task::LoadSettings(PathBuf::from(
                "/tmp/nirimatic-test/config.kdl"
            ))]
        );
    }

    #[test]
    fn content_keys_route_to_settings() {
        let mut app = loaded_app();
        app.handle_key(press('j'));
        app.handle_key(key(KeyCode::Enter));
        app.handle_key(press('l'));
        assert!(app.settings().is_dirty());
        match app.handle_key(press('s')).as_slice() {
            [Task::SaveSettings(s)] => assert_eq!(s.gaps, 11),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn noctalia_is_global() {
        let mut app = app();
        assert_eq!(app.handle_key(press('n')), vec![Task::Run(Action::ToggleNoctalia)]);
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.handle_key(press('n')), vec![Task::Run(Action::ToggleNoctalia)]);
    }

    #[test]
    fn quit_is_immediate_when_clean() {
        let mut app = loaded_app();
        app.handle_key(press('q'));
        assert!(app.should_quit());
    }

    #[test]
    fn quit_with_unsaved_changes_needs_confirmation() {
        let mut app = loaded_app();
        app.handle_key(press('j'));
        app.handle_key(key(KeyCode::Enter));
        app.handle_key(press('l'));

        app.handle_key(press('q'));
        assert!(!app.should_quit());
        assert!(matches!(app.status(), Some(Status::Info(_))));

        // Any other key disarms.
        app.handle_key(press('j'));
        app.handle_key(press('q'));
        assert!(!app.should_quit());

        app.handle_key(press('q'));
        assert!(app.should_quit());
    }

    #[test]
    fn ctrl_c_quits() {
        let mut app = app();
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit());
    }

    #[test]
    fn action_results_show_in_status() {
        let mut app = app();
        app.handle_event(AppEvent::ActionFinished(Action::ReloadNiri, Ok(())));
        assert_eq!(
            app.status(),
            Some(&Status::Done("✓ reload niri config".into()))
        );

        let failed = Action::ToggleNoctalia.run(&MockRunner::new());
        app.handle_event(AppEvent::ActionFinished(Action::ToggleNoctalia, failed));
        assert!(matches!(app.status(), Some(Status::Failed(_))));
    }

    #[test]
    fn tick_polls_services_once_in_flight() {
        let mut app = app();
        let now = Instant::now();
        assert_eq!(app.tick(now).len(), 1);
        assert!(app.tick(now).is_empty());
    }

    #[test]
    fn render_shows_sidebar_and_active_screen() {
        let mut app = loaded_app();
        let text = render_text(&app);
        assert!(text.contains("nirimatic"));
        assert!(text.contains("▸ Dashboard"));
        assert!(text.contains("Service Status"));

        app.handle_key(press('j'));
        let text = render_text(&app);
        assert!(text.contains("▸ Niri Settings"));
        assert!(text.contains("Corner Radius"));
    }
}
