use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::input::KeyModifiers;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Binding {
    pub keys: Vec<KeyEvent>,
    pub help_key: String,
    pub help_desc: String,
}

impl Binding {
    pub fn new(
        help_key: impl Into<String>,
        help_desc: impl Into<String>,
        keys: Vec<KeyEvent>,
    ) -> Self {
        Self {
            keys,
            help_key: help_key.into(),
            help_desc: help_desc.into(),
        }
    }

    pub fn matches(&self, event: &KeyEvent) -> bool {
        self.keys.iter().any(|k| key_event_matches(k, event))
    }
}

pub fn key_event_matches(pattern: &KeyEvent, event: &KeyEvent) -> bool {
    pattern.code == event.code && modifiers_match(pattern.modifiers, event.modifiers)
}

fn modifiers_match(pattern: KeyModifiers, event: KeyModifiers) -> bool {
    pattern.shift == event.shift && pattern.ctrl == event.ctrl && pattern.alt == event.alt
}

pub fn key_char(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c))
}

pub fn key_ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c)).with_modifiers(KeyModifiers {
        shift: false,
        ctrl: true,
        alt: false,
    })
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CapsuleKeyAction {
    FocusPrev,
    FocusNext,
    FocusFirst,
    FocusLast,
    Activate,
    ToggleAll,
    Blur,
}

/// Key bindings for the capsule selector.
///
/// Defaults: `←`/`h` and `→`/`l` move focus (Tab/BackTab as well), `Space`/`Enter` click the
/// focused capsule, `a` clicks the select-all control, `Esc` drops focus.
#[derive(Clone, Debug)]
pub struct CapsuleBindings {
    pub prev: Binding,
    pub next: Binding,
    pub first: Binding,
    pub last: Binding,
    pub activate: Binding,
    pub toggle_all: Binding,
    pub blur: Binding,
}

impl Default for CapsuleBindings {
    fn default() -> Self {
        Self {
            prev: Binding::new(
                "←/h",
                "prev",
                vec![
                    KeyEvent::new(KeyCode::Left),
                    key_char('h'),
                    KeyEvent::new(KeyCode::BackTab),
                ],
            ),
            next: Binding::new(
                "→/l",
                "next",
                vec![
                    KeyEvent::new(KeyCode::Right),
                    key_char('l'),
                    KeyEvent::new(KeyCode::Tab),
                ],
            ),
            first: Binding::new("home", "first", vec![KeyEvent::new(KeyCode::Home)]),
            last: Binding::new("end", "last", vec![KeyEvent::new(KeyCode::End)]),
            activate: Binding::new(
                "space",
                "toggle",
                vec![key_char(' '), KeyEvent::new(KeyCode::Enter)],
            ),
            toggle_all: Binding::new("a", "all", vec![key_char('a')]),
            blur: Binding::new("esc", "blur", vec![KeyEvent::new(KeyCode::Esc)]),
        }
    }
}

impl CapsuleBindings {
    pub fn action_for(&self, key: &KeyEvent) -> Option<CapsuleKeyAction> {
        let table = [
            (&self.prev, CapsuleKeyAction::FocusPrev),
            (&self.next, CapsuleKeyAction::FocusNext),
            (&self.first, CapsuleKeyAction::FocusFirst),
            (&self.last, CapsuleKeyAction::FocusLast),
            (&self.activate, CapsuleKeyAction::Activate),
            (&self.toggle_all, CapsuleKeyAction::ToggleAll),
            (&self.blur, CapsuleKeyAction::Blur),
        ];
        table
            .into_iter()
            .find(|(binding, _)| binding.matches(key))
            .map(|(_, action)| action)
    }

    /// Bindings worth advertising in a help line, in display order.
    pub fn help(&self, multi: bool) -> Vec<Binding> {
        let mut out = vec![self.prev.clone(), self.next.clone(), self.activate.clone()];
        if multi {
            out.push(self.toggle_all.clone());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binding_matches_exact_modifiers() {
        let b = Binding::new("a", "all", vec![key_char('a')]);
        assert!(b.matches(&key_char('a')));
        assert!(!b.matches(&key_ctrl('a')));
    }

    #[test]
    fn default_bindings_resolve_actions() {
        let b = CapsuleBindings::default();
        assert_eq!(
            b.action_for(&KeyEvent::new(KeyCode::Right)),
            Some(CapsuleKeyAction::FocusNext)
        );
        assert_eq!(
            b.action_for(&key_char(' ')),
            Some(CapsuleKeyAction::Activate)
        );
        assert_eq!(
            b.action_for(&key_char('a')),
            Some(CapsuleKeyAction::ToggleAll)
        );
        assert_eq!(b.action_for(&key_char('z')), None);
    }

    #[test]
    fn help_lists_select_all_only_for_multi() {
        let b = CapsuleBindings::default();
        assert_eq!(b.help(false).len(), 3);
        assert_eq!(b.help(true).last().map(|b| b.help_desc.as_str()), Some("all"));
    }
}
