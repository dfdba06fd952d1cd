//! Dashboard screen: service status and quick actions.

use crate::actions::Action;
use crate::services::{Service, ServiceStatus};
use crate::tui::keys::KeyMap;
use crate::tui::tasks::Task;
use crate::tui::theme::Theme;
use chrono::{DateTime, Local};
use crossterm::event::KeyEvent;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use std::time::{Duration, Instant};

/// State of the dashboard screen.
#[derive(Debug, Clone)]
pub struct Dashboard {
    services: Vec<Service>,
    interval: Duration,
    /// When the last status check was requested.
    requested_at: Option<Instant>,
    /// Wall-clock time the last status check came back.
    refreshed_at: Option<DateTime<Local>>,
    checking: bool,
}

impl Dashboard {
    /// A dashboard watching `names`, re-checked every `interval`.
    pub fn new(names: &[String], interval: Duration) -> Self {
        Self {
            services: names.iter().map(Service::unchecked).collect(),
            interval,
            requested_at: None,
            refreshed_at: None,
            checking: false,
        }
    }

    pub fn services(&self) -> &[Service] {
        &self.services
    }

    /// Request a status check if one is due at `now`.
    ///
    /// At most one check is in flight at a time.
    pub fn poll(&mut self, now: Instant) -> Option<Task> {
        let due = match self.requested_at {
            None => true,
            Some(at) => now.saturating_duration_since(at) >= self.interval,
        };
        if self.checking || !due || self.services.is_empty() {
            return None;
        }
        self.checking = true;
        self.requested_at = Some(now);
        Some(Task::CheckServices(
            self.services.iter().map(|s| s.name.clone()).collect(),
        ))
    }

    /// A status check finished at `at`.
    pub fn on_checked(&mut self, services: Vec<Service>, at: DateTime<Local>) {
        self.services = services;
        self.refreshed_at = Some(at);
        self.checking = false;
    }

    /// React to a key press while the screen has focus.
    pub fn handle_key(&mut self, key: &KeyEvent, keys: &KeyMap) -> Option<Task> {
        if keys.reload.matches(key) {
            return Some(Task::Run(Action::ReloadNiri));
        }
        None
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme, keys: &KeyMap) {
        let mut lines = vec![
            Line::from(Span::styled("Dashboard", theme.title())),
            Line::default(),
            Line::from(Span::styled("Service Status", theme.section())),
            Line::default(),
        ];

        for service in &self.services {
            let (symbol, style) = match service.status {
                ServiceStatus::Running => ("●", theme.success()),
                ServiceStatus::Stopped => ("●", theme.error()),
                ServiceStatus::Unknown => ("○", theme.dimmed()),
            };
            lines.push(Line::from(vec![
                Span::styled(format!("  {} ", symbol), style),
                Span::styled(format!("{:<20}", service.name), theme.text()),
                Span::styled(service.status.to_string(), style),
            ]));
        }

        lines.push(Line::default());
        lines.push(Line::from(Span::styled("Quick Actions", theme.section())));
        lines.push(Line::default());
        for (binding, desc) in [
            (&keys.reload, "Reload Niri Config"),
            (&keys.noctalia, "Noctalia Settings"),
            (&keys.quit, "Quit"),
        ] {
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(format!(" {} ", binding.key_label()), theme.key_hint()),
                Span::styled(format!(" {}", desc), theme.text()),
            ]));
        }

        lines.push(Line::default());
        let status = match self.refreshed_at {
            Some(at) => format!("Last updated: {}", at.format("%H:%M:%S")),
            None if self.checking => "Checking services…".to_string(),
            None => String::new(),
        };
        lines.push(Line::from(Span::styled(status, theme.dimmed())));

        frame.render_widget(Paragraph::new(lines), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use crossterm::event::{KeyCode, KeyModifiers};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn names() -> Vec<String> {
        vec!["niri".into(), "stasis".into()]
    }

    fn clock(h: u32, m: u32, s: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 1, 2, h, m, s).unwrap()
    }

    #[test]
    fn first_poll_requests_check_then_waits() {
        let t0 = Instant::now();
        let mut d = Dashboard::new(&names(), Duration::from_secs(5));
        assert_eq!(
            d.poll(t0),
            Some(Task::CheckServices(vec!["niri".into(), "stasis".into()]))
        );
        // In flight.
        assert_eq!(d.poll(t0 + Duration::from_secs(10)), None);

        d.on_checked(
            vec![
                Service {
                    name: "niri".into(),
                    status: ServiceStatus::Running,
                },
                Service::unchecked("stasis"),
            ],
            clock(9, 0, 0),
        );
        assert_eq!(d.services()[0].status, ServiceStatus::Running);
        assert_eq!(d.poll(t0 + Duration::from_secs(4)), None);
        assert!(d.poll(t0 + Duration::from_secs(5)).is_some());
    }

    #[test]
    fn checking_is_shown_until_first_result() {
        let mut d = Dashboard::new(&names(), Duration::from_secs(5));
        d.poll(Instant::now());
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        terminal
            .draw(|f| d.render(f, f.area(), &Theme::default(), &KeyMap::default()))
            .unwrap();
        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Checking services…"));
        assert!(!text.contains("Last updated"));
    }

    #[test]
    fn no_services_means_no_checks() {
        let mut d = Dashboard::new(&[], Duration::from_secs(1));
        assert_eq!(d.poll(Instant::now()), None);
    }

    #[test]
    fn reload_key_runs_action() {
        let mut d = Dashboard::new(&names(), Duration::from_secs(5));
        let key = KeyEvent::new(KeyCode::Char('r'), KeyModifiers::NONE);
        assert_eq!(
            d.handle_key(&key, &KeyMap::default()),
            Some(Task::Run(Action::ReloadNiri))
        );
    }

    #[test]
    fn render_lists_services_and_actions() {
        let mut d = Dashboard::new(&names(), Duration::from_secs(5));
        d.on_checked(
            vec![
                Service {
                    name: "niri".into(),
                    status: ServiceStatus::Running,
                },
                Service {
                    name: "stasis".into(),
                    status: ServiceStatus::Stopped,
                },
            ],
            clock(15, 4, 5),
        );
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        terminal
            .draw(|f| d.render(f, f.area(), &Theme::default(), &KeyMap::default()))
            .unwrap();
        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Service Status"));
        assert!(text.contains("niri"));
        assert!(text.contains("Running"));
        assert!(text.contains("Stopped"));
        assert!(text.contains("Reload Niri Config"));
        assert!(text.contains("Last updated: 15:04:05"));
    }
}
