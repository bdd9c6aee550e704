//! Keyboard shortcut resolution.

use crate::action::Action;
use crate::storage::ShortcutsConfig;

/// A key press as reported by the host UI.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyPress {
    pub key: String,
    pub ctrl: bool,
    pub meta: bool,
    /// Focus is inside a text input or editable field.
    pub in_text_field: bool,
}

impl KeyPress {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }

    pub fn in_text_field(mut self) -> Self {
        self.in_text_field = true;
        self
    }
}

/// A parsed binding such as `ctrl+enter`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Combo {
    command: bool,
    key: String,
}

impl Combo {
    fn parse(binding: &str) -> Option<Self> {
        let mut command = false;
        let mut key = None;
        for part in binding.split('+').map(str::trim) {
            match part.to_ascii_lowercase().as_str() {
                "ctrl" | "cmd" | "meta" => command = true,
                "" => return None,
                other => key = Some(other.to_string()),
            }
        }
        key.map(|key| Self { command, key })
    }

    /// Ctrl and Meta are interchangeable so Mac users get the same binding.
    fn matches(&self, press: &KeyPress) -> bool {
        let command = press.ctrl || press.meta;
        command == self.command && press.key.eq_ignore_ascii_case(&self.key)
    }
}

/// Map a key press to an action, if it is bound.
pub fn resolve_shortcut(config: &ShortcutsConfig, press: &KeyPress) -> Option<Action> {
    if let Some(combo) = Combo::parse(&config.calculate_key) {
        if combo.matches(press) {
            return Some(Action::CalculateCgpa { show_errors: true });
        }
    }
    if let Some(combo) = Combo::parse(&config.focus_task_key) {
        if !press.in_text_field && combo.matches(press) {
            return Some(Action::FocusTaskInput);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_key_outside_text_field() {
        let cfg = ShortcutsConfig::default();
        assert_eq!(
            resolve_shortcut(&cfg, &KeyPress::new("/")),
            Some(Action::FocusTaskInput)
        );
    }

    #[test]
    fn focus_key_inside_text_field_is_typed() {
        let cfg = ShortcutsConfig::default();
        assert_eq!(resolve_shortcut(&cfg, &KeyPress::new("/").in_text_field()), None);
    }

    #[test]
    fn calculate_combo_works_everywhere() {
        let cfg = ShortcutsConfig::default();
        let expected = Some(Action::CalculateCgpa { show_errors: true });
        assert_eq!(
            resolve_shortcut(&cfg, &KeyPress::new("Enter").with_ctrl()),
            expected
        );
        assert_eq!(
            resolve_shortcut(&cfg, &KeyPress::new("Enter").with_meta().in_text_field()),
            expected
        );
        assert_eq!(resolve_shortcut(&cfg, &KeyPress::new("Enter")), None);
    }

    #[test]
    fn custom_bindings() {
        let cfg = ShortcutsConfig {
            focus_task_key: "t".into(),
            calculate_key: "ctrl+g".into(),
        };
        assert_eq!(
            resolve_shortcut(&cfg, &KeyPress::new("T")),
            Some(Action::FocusTaskInput)
        );
        assert_eq!(resolve_shortcut(&cfg, &KeyPress::new("/")), None);
        assert_eq!(
            resolve_shortcut(&cfg, &KeyPress::new("g").with_ctrl()),
            Some(Action::CalculateCgpa { show_errors: true })
        );
    }

    #[test]
    fn malformed_binding_is_ignored() {
        let cfg = ShortcutsConfig {
            focus_task_key: "".into(),
            calculate_key: "ctrl+".into(),
        };
        assert_eq!(resolve_shortcut(&cfg, &KeyPress::new("enter").with_ctrl()), None);
    }
}
