//! Key bindings.
//!
//! A [`Binding`] pairs the key presses that trigger it with the text shown
//! in the footer help line.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// One logical key binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    presses: Vec<(KeyCode, KeyModifiers)>,
    help_key: &'static str,
    help_desc: &'static str,
}

impl Binding {
    /// Bind plain key codes (no modifiers).
    pub fn new(codes: &[KeyCode], help_key: &'static str, help_desc: &'static str) -> Self {
        Self {
            presses: codes.iter().map(|c| (*c, KeyModifiers::NONE)).collect(),
            help_key,
            help_desc,
        }
    }

    /// Also trigger on `code` pressed together with `modifiers`.
    pub fn with(mut self, code: KeyCode, modifiers: KeyModifiers) -> Self {
        self.presses.push((code, modifiers));
        self
    }

    /// Whether `event` triggers this binding.
    ///
    /// `Shift` is ignored because it is already folded into the character
    /// (`R` vs `r`).
    pub fn matches(&self, event: &KeyEvent) -> bool {
        let modifiers = event.modifiers.difference(KeyModifiers::SHIFT);
        self.presses
            .iter()
            .any(|(code, mods)| *code == event.code && *mods == modifiers)
    }

    /// The key part of the help text, e.g. `"↑/k"`.
    pub fn key_label(&self) -> &'static str {
        self.help_key
    }

    /// `"<key> <description>"` as shown in the help line.
    pub fn help(&self) -> String {
        format!("{} {}", self.help_key, self.help_desc)
    }
}

/// All bindings the application uses.
#[derive(Debug, Clone)]
pub struct KeyMap {
    // Navigation
    pub up: Binding,
    pub down: Binding,
    pub left: Binding,
    pub right: Binding,
    pub enter: Binding,
    pub back: Binding,

    // Actions
    pub quit: Binding,
    pub save: Binding,
    pub reload: Binding,
    pub revert: Binding,
    pub noctalia: Binding,

    // Editing
    pub toggle: Binding,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            up: Binding::new(&[KeyCode::Up, KeyCode::Char('k')], "↑/k", "up"),
            down: Binding::new(&[KeyCode::Down, KeyCode::Char('j')], "↓/j", "down"),
            left: Binding::new(&[KeyCode::Left, KeyCode::Char('h')], "←/h", "decrease"),
            right: Binding::new(&[KeyCode::Right, KeyCode::Char('l')], "→/l", "increase"),
            enter: Binding::new(&[KeyCode::Enter], "enter", "select"),
            back: Binding::new(&[KeyCode::Esc], "esc", "back"),

            quit: Binding::new(&[KeyCode::Char('q')], "q", "quit")
                .with(KeyCode::Char('c'), KeyModifiers::CONTROL),
            save: Binding::new(&[KeyCode::Char('s')], "s", "save")
                .with(KeyCode::Char('s'), KeyModifiers::CONTROL),
            reload: Binding::new(&[KeyCode::Char('r')], "r", "reload niri"),
            revert: Binding::new(&[KeyCode::Char('r')], "r", "revert"),
            noctalia: Binding::new(&[KeyCode::Char('n')], "n", "noctalia"),

            toggle: Binding::new(&[KeyCode::Char(' ')], "space", "toggle"),
        }
    }
}

/// Join the help text of `bindings` into a compact footer line.
pub fn help_line(bindings: &[&Binding]) -> String {
    bindings
        .iter()
        .map(|b| b.help())
        .collect::<Vec<_>>()
        .join(" • ")
}
