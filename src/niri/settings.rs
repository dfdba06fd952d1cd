//! The typed snapshot of the niri settings nirimatic understands.
//!
//! A [`NiriSettings`] is built with hard-coded defaults, then overwritten
//! key by key while the reader walks the file.  Keys that never appear keep
//! their default.  The writer consumes it read-only.

use crate::config::config_home;
use std::fmt;
use std::path::PathBuf;

/// Every setting the reader extracts and the writer rewrites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKey {
    Gaps,
    BorderWidth,
    FocusRingWidth,
    CornerRadius,
    ShadowEnabled,
    ShadowSoftness,
    ShadowSpread,
    FocusFollowsMouse,
    WorkspaceAutoBackAndForth,
}

impl SettingKey {
    /// All keys, in the order the editor presents them.
    pub const ALL: [SettingKey; 9] = [
        SettingKey::Gaps,
        SettingKey::BorderWidth,
        SettingKey::FocusRingWidth,
        SettingKey::CornerRadius,
        SettingKey::ShadowEnabled,
        SettingKey::ShadowSoftness,
        SettingKey::ShadowSpread,
        SettingKey::FocusFollowsMouse,
        SettingKey::WorkspaceAutoBackAndForth,
    ];
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingKey::Gaps => write!(f, "layout.gaps"),
            SettingKey::BorderWidth => write!(f, "layout.border.width"),
            SettingKey::FocusRingWidth => write!(f, "layout.focus-ring.width"),
            SettingKey::CornerRadius => write!(f, "geometry-corner-radius"),
            SettingKey::ShadowEnabled => write!(f, "layout.shadow.on"),
            SettingKey::ShadowSoftness => write!(f, "layout.shadow.softness"),
            SettingKey::ShadowSpread => write!(f, "layout.shadow.spread"),
            SettingKey::FocusFollowsMouse => write!(f, "input.focus-follows-mouse"),
            SettingKey::WorkspaceAutoBackAndForth => {
                write!(f, "input.workspace-auto-back-and-forth")
            }
        }
    }
}

/// A value held by one setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingValue {
    /// A non-negative pixel (or unitless) amount.
    Int(u32),
    /// An on/off switch or a presence flag.
    Bool(bool),
}

/// The in-memory niri configuration snapshot.
///
/// `path` is where the backing file lives; it may not exist yet.  All other
/// fields start at the values returned by [`NiriSettings::default`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NiriSettings {
    /// Location of the backing `config.kdl`.
    pub path: PathBuf,

    // Layout, in pixels.
    pub gaps: u32,
    pub border_width: u32,
    pub focus_ring_width: u32,
    pub corner_radius: u32,

    // Shadow.
    pub shadow_enabled: bool,
    pub shadow_softness: u32,
    pub shadow_spread: u32,

    // Behaviour.
    pub focus_follows_mouse: bool,
    pub workspace_auto_back_and_forth: bool,
}

impl Default for NiriSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::new(),
            gaps: 10,
            border_width: 2,
            focus_ring_width: 0,
            corner_radius: 16,
            shadow_enabled: true,
            shadow_softness: 60,
            shadow_spread: 10,
            focus_follows_mouse: true,
            workspace_auto_back_and_forth: true,
        }
    }
}

impl NiriSettings {
    /// Defaults bound to the file at `path`.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Current value of `key`.
    pub fn get(&self, key: SettingKey) -> SettingValue {
        match key {
            SettingKey::Gaps => SettingValue::Int(self.gaps),
            SettingKey::BorderWidth => SettingValue::Int(self.border_width),
            SettingKey::FocusRingWidth => SettingValue::Int(self.focus_ring_width),
            SettingKey::CornerRadius => SettingValue::Int(self.corner_radius),
            SettingKey::ShadowEnabled => SettingValue::Bool(self.shadow_enabled),
            SettingKey::ShadowSoftness => SettingValue::Int(self.shadow_softness),
            SettingKey::ShadowSpread => SettingValue::Int(self.shadow_spread),
            SettingKey::FocusFollowsMouse => SettingValue::Bool(self.focus_follows_mouse),
            SettingKey::WorkspaceAutoBackAndForth => {
                SettingValue::Bool(self.workspace_auto_back_and_forth)
            }
        }
    }

    /// Overwrite `key` with `value`.
    ///
    /// A value of the wrong shape (a boolean for an integer key or the
    /// other way round) is ignored.
    pub fn set(&mut self, key: SettingKey, value: SettingValue) {
        match (key, value) {
            (SettingKey::Gaps, SettingValue::Int(v)) => self.gaps = v,
            (SettingKey::BorderWidth, SettingValue::Int(v)) => self.border_width = v,
            (SettingKey::FocusRingWidth, SettingValue::Int(v)) => self.focus_ring_width = v,
            (SettingKey::CornerRadius, SettingValue::Int(v)) => self.corner_radius = v,
            (SettingKey::ShadowEnabled, SettingValue::Bool(v)) => self.shadow_enabled = v,
            (SettingKey::ShadowSoftness, SettingValue::Int(v)) => self.shadow_softness = v,
            (SettingKey::ShadowSpread, SettingValue::Int(v)) => self.shadow_spread = v,
            (SettingKey::FocusFollowsMouse, SettingValue::Bool(v)) => {
                self.focus_follows_mouse = v
            }
            (SettingKey::WorkspaceAutoBackAndForth, SettingValue::Bool(v)) => {
                self.workspace_auto_back_and_forth = v
            }
            (key, value) => log::warn!("ignoring {:?} for {}", value, key),
        }
    }
}

/// Resolve the niri config path (`$XDG_CONFIG_HOME/niri/config.kdl`).
pub fn default_config_path() -> PathBuf {
    config_home().join("niri").join("config.kdl")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_record_has_hard_coded_defaults() {
        let s = NiriSettings::default();
        assert_eq!(s.gaps, 10);
        assert_eq!(s.border_width, 2);
        assert_eq!(s.focus_ring_width, 0);
        assert_eq!(s.corner_radius, 16);
        assert!(s.shadow_enabled);
        assert_eq!(s.shadow_softness, 60);
        assert_eq!(s.shadow_spread, 10);
        assert!(s.focus_follows_mouse);
        assert!(s.workspace_auto_back_and_forth);
    }

    #[test]
    fn with_path_keeps_defaults() {
        let s = NiriSettings::with_path("/x/config.kdl");
        assert_eq!(s.path, PathBuf::from("/x/config.kdl"));
        assert_eq!(
            s,
            NiriSettings {
                path: PathBuf::from("/x/config.kdl"),
                ..NiriSettings::default()
            }
        );
    }

    #[test]
    fn set_then_get_every_key() {
        let mut s = NiriSettings::default();
        for (i, key) in SettingKey::ALL.iter().enumerate() {
            let value = match s.get(*key) {
                SettingValue::Int(_) => SettingValue::Int(100 + i as u32),
                SettingValue::Bool(b) => SettingValue::Bool(!b),
            };
            s.set(*key, value);
            assert_eq!(s.get(*key), value, "{}", key);
        }
    }

    #[test]
    fn mismatched_value_shape_is_ignored() {
        let mut s = NiriSettings::default();
        s.set(SettingKey::Gaps, SettingValue::Bool(false));
        s.set(SettingKey::ShadowEnabled, SettingValue::Int(0));
        assert_eq!(s, NiriSettings::default());
    }
}
