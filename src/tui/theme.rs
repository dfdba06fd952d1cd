//! Colours and styles for the terminal UI.
//!
//! A [`Theme`] is a plain value handed to every render function; there is
//! no global style state.

use ratatui::style::{Color, Modifier, Style};

/// Base colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub current_line: Color,
    pub foreground: Color,
    pub comment: Color,
    pub cyan: Color,
    pub green: Color,
    pub orange: Color,
    pub pink: Color,
    pub purple: Color,
    pub red: Color,
    pub yellow: Color,
}

impl Palette {
    /// The Dracula palette.
    pub const DRACULA: Palette = Palette {
        background: Color::Rgb(0x28, 0x2a, 0x36),
        current_line: Color::Rgb(0x44, 0x47, 0x5a),
        foreground: Color::Rgb(0xf8, 0xf8, 0xf2),
        comment: Color::Rgb(0x62, 0x72, 0xa4),
        cyan: Color::Rgb(0x8b, 0xe9, 0xfd),
        green: Color::Rgb(0x50, 0xfa, 0x7b),
        orange: Color::Rgb(0xff, 0xb8, 0x6c),
        pink: Color::Rgb(0xff, 0x79, 0xc6),
        purple: Color::Rgb(0xbd, 0x93, 0xf9),
        red: Color::Rgb(0xff, 0x55, 0x55),
        yellow: Color::Rgb(0xf1, 0xfa, 0x8c),
    };
}

/// Styles derived from a [`Palette`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub palette: Palette,
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(Palette::DRACULA)
    }
}

impl Theme {
    pub fn new(palette: Palette) -> Self {
        Self { palette }
    }

    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.palette.purple)
            .add_modifier(Modifier::BOLD)
    }

    pub fn header(&self) -> Style {
        Style::default()
            .fg(self.palette.pink)
            .add_modifier(Modifier::BOLD)
    }

    pub fn section(&self) -> Style {
        Style::default()
            .fg(self.palette.cyan)
            .add_modifier(Modifier::BOLD)
    }

    pub fn text(&self) -> Style {
        Style::default().fg(self.palette.foreground)
    }

    pub fn dimmed(&self) -> Style {
        Style::default().fg(self.palette.comment)
    }

    pub fn success(&self) -> Style {
        Style::default().fg(self.palette.green)
    }

    pub fn warning(&self) -> Style {
        Style::default().fg(self.palette.yellow)
    }

    pub fn error(&self) -> Style {
        Style::default().fg(self.palette.red)
    }

    pub fn key_hint(&self) -> Style {
        Style::default()
            .fg(self.palette.background)
            .bg(self.palette.purple)
            .add_modifier(Modifier::BOLD)
    }

    /// Border of a pane; highlighted while it has focus.
    pub fn border(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.palette.cyan)
        } else {
            Style::default().fg(self.palette.current_line)
        }
    }

    /// A selectable row, highlighted when `selected`.
    pub fn item(&self, selected: bool) -> Style {
        if selected {
            Style::default()
                .fg(self.palette.green)
                .add_modifier(Modifier::BOLD)
        } else {
            self.text()
        }
    }

    pub fn value(&self, selected: bool) -> Style {
        if selected {
            Style::default()
                .fg(self.palette.green)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.palette.orange)
        }
    }

    pub fn slider(&self, selected: bool) -> Style {
        if selected {
            Style::default().fg(self.palette.cyan)
        } else {
            self.dimmed()
        }
    }

    pub fn toggle(&self, enabled: bool, selected: bool) -> Style {
        let base = if enabled {
            Style::default().fg(self.palette.green)
        } else {
            Style::default().fg(self.palette.red)
        };
        if selected {
            base.add_modifier(Modifier::BOLD)
        } else {
            base
        }
    }
}
