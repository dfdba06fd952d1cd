//! The editable field list behind the settings screen.
//!
//! Fields are edited in place with bounded steps and only copied into a
//! [`NiriSettings`] on save.

use crate::niri::{NiriSettings, SettingKey, SettingValue};

/// Group a field is displayed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Layout,
    Shadows,
    Behavior,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Layout, Section::Shadows, Section::Behavior];

    pub fn title(self) -> &'static str {
        match self {
            Section::Layout => "Layout",
            Section::Shadows => "Shadows",
            Section::Behavior => "Behavior",
        }
    }
}

/// How a field is edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// An integer adjusted by `step` within `min..=max`.
    Slider {
        min: u32,
        max: u32,
        step: u32,
        unit: &'static str,
    },
    /// An on/off switch.
    Toggle,
}

/// One row of the settings editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub key: SettingKey,
    pub label: &'static str,
    pub section: Section,
    pub kind: FieldKind,
    pub value: SettingValue,
}

impl Field {
    fn slider(key: SettingKey, label: &'static str, section: Section, max: u32, step: u32, unit: &'static str) -> Self {
        Self {
            key,
            label,
            section,
            kind: FieldKind::Slider {
                min: 0,
                max,
                step,
                unit,
            },
            value: SettingValue::Int(0),
        }
    }

    fn switch(key: SettingKey, label: &'static str, section: Section) -> Self {
        Self {
            key,
            label,
            section,
            kind: FieldKind::Toggle,
            value: SettingValue::Bool(false),
        }
    }

    /// Step the value up, clamped at `max`.  Returns whether it changed.
    pub fn increase(&mut self) -> bool {
        match (self.kind, &mut self.value) {
            (FieldKind::Slider { max, step, .. }, SettingValue::Int(v)) if *v < max => {
                *v = v.saturating_add(step).min(max);
                true
            }
            _ => false,
        }
    }

    /// Step the value down, clamped at `min`.  Returns whether it changed.
    pub fn decrease(&mut self) -> bool {
        match (self.kind, &mut self.value) {
            (FieldKind::Slider { min, step, .. }, SettingValue::Int(v)) if *v > min => {
                *v = v.saturating_sub(step).max(min);
                true
            }
            _ => false,
        }
    }

    /// Flip a toggle.  Returns whether it changed (sliders never do).
    pub fn toggle(&mut self) -> bool {
        match &mut self.value {
            SettingValue::Bool(b) if self.kind == FieldKind::Toggle => {
                *b = !*b;
                true
            }
            _ => false,
        }
    }
}

/// The full editor table, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldList {
    fields: Vec<Field>,
}

impl Default for FieldList {
    fn default() -> Self {
        use Section::*;
        use SettingKey as K;

        let mut list = Self {
            fields: vec![
                Field::slider(K::Gaps, "Gaps", Layout, 50, 1, "px"),
                Field::slider(K::BorderWidth, "Border Width", Layout, 10, 1, "px"),
                Field::slider(K::FocusRingWidth, "Focus Ring Width", Layout, 10, 1, "px"),
                Field::slider(K::CornerRadius, "Corner Radius", Layout, 32, 1, "px"),
                Field::switch(K::ShadowEnabled, "Shadows", Shadows),
                Field::slider(K::ShadowSoftness, "Shadow Softness", Shadows, 100, 5, ""),
                Field::slider(K::ShadowSpread, "Shadow Spread", Shadows, 50, 1, ""),
                Field::switch(K::FocusFollowsMouse, "Focus Follows Mouse", Behavior),
                Field::switch(K::WorkspaceAutoBackAndForth, "Workspace Auto Back", Behavior),
            ],
        };
        list.load_from(&NiriSettings::default());
        list
    }
}

impl FieldList {
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Field> {
        self.fields.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Field> {
        self.fields.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter()
    }

    /// Copy every field's value out of `settings`.
    pub fn load_from(&mut self, settings: &NiriSettings) {
        for field in &mut self.fields {
            field.value = settings.get(field.key);
        }
    }

    /// Copy every field's value into `settings`.
    pub fn store_into(&self, settings: &mut NiriSettings) {
        for field in &self.fields {
            settings.set(field.key, field.value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(list: &mut FieldList, key: SettingKey) -> &mut Field {
        let index = list.iter().position(|f| f.key == key).unwrap();
        list.get_mut(index).unwrap()
    }

    #[test]
    fn table_covers_every_setting_once() {
        let list = FieldList::default();
        let keys: Vec<_> = list.iter().map(|f| f.key).collect();
        assert_eq!(keys, SettingKey::ALL.to_vec());
    }

    #[test]
    fn defaults_match_record_defaults() {
        let list = FieldList::default();
        let mut settings = NiriSettings::with_path("x");
        settings.gaps = 0;
        list.store_into(&mut settings);
        assert_eq!(settings, NiriSettings::with_path("x"));
    }

    #[test]
    fn increase_clamps_at_max() {
        let mut list = FieldList::default();
        let softness = field(&mut list, SettingKey::ShadowSoftness);
        softness.value = SettingValue::Int(97);
        assert!(softness.increase());
        assert_eq!(softness.value, SettingValue::Int(100));
        assert!(!softness.increase());
        assert_eq!(softness.value, SettingValue::Int(100));
    }

    #[test]
    fn decrease_clamps_at_min() {
        let mut list = FieldList::default();
        let softness = field(&mut list, SettingKey::ShadowSoftness);
        softness.value = SettingValue::Int(3);
        assert!(softness.decrease());
        assert_eq!(softness.value, SettingValue::Int(0));
        assert!(!softness.decrease());
    }

    #[test]
    fn out_of_range_value_from_file_can_be_stepped_back() {
        let mut list = FieldList::default();
        let gaps = field(&mut list, SettingKey::Gaps);
        gaps.value = SettingValue::Int(80);
        assert!(!gaps.increase());
        assert!(gaps.decrease());
        assert_eq!(gaps.value, SettingValue::Int(79));
    }

    #[test]
    fn toggle_only_affects_toggles() {
        let mut list = FieldList::default();
        let shadows = field(&mut list, SettingKey::ShadowEnabled);
        assert!(shadows.toggle());
        assert_eq!(shadows.value, SettingValue::Bool(false));
        assert!(!shadows.increase());

        let gaps = field(&mut list, SettingKey::Gaps);
        assert!(!gaps.toggle());
        assert_eq!(gaps.value, SettingValue::Int(10));
    }

    #[test]
    fn round_trip_through_record() {
        let mut settings = NiriSettings::with_path("c.kdl");
        settings.corner_radius = 4;
        settings.focus_follows_mouse = false;

        let mut list = FieldList::default();
        list.load_from(&settings);
        field(&mut list, SettingKey::CornerRadius).increase();

        let mut out = settings.clone();
        list.store_into(&mut out);
        assert_eq!(out.corner_radius, 5);
        assert!(!out.focus_follows_mouse);
        assert_eq!(out.path, settings.path);
    }
}
