use super::super::super::messages::Message;
use super::super::super::state::App;
use crate::pronounce::Variant;
use iced::keyboard::{Key, Modifiers, key};

impl App {
    pub(super) fn shortcut_message_for_key(
        &self,
        key: Key,
        modifiers: Modifiers,
    ) -> Option<Message> {
        let pressed = match key.as_ref() {
            Key::Named(key::Named::Space) => "space".to_string(),
            Key::Named(key::Named::ArrowDown) => "arrowdown".to_string(),
            Key::Named(key::Named::ArrowUp) => "arrowup".to_string(),
            Key::Named(key::Named::Home) => "home".to_string(),
            Key::Named(key::Named::End) => "end".to_string(),
            Key::Named(key::Named::Escape) => "escape".to_string(),
            Key::Named(key::Named::Enter) => "enter".to_string(),
            Key::Character(ch) => ch.to_ascii_lowercase(),
            _ => return None,
        };

        // A load error has to be acknowledged before anything else happens.
        if self.library.notice.is_some() {
            return matches!(pressed.as_str(), "escape" | "enter").then_some(Message::DismissNotice);
        }

        let c = &self.config;
        if Self::shortcut_matches(&c.key_next_entry, "j", &pressed, modifiers)
            || Self::shortcut_matches("arrowdown", "arrowdown", &pressed, modifiers)
        {
            Some(Message::NextEntry)
        } else if Self::shortcut_matches(&c.key_prev_entry, "k", &pressed, modifiers)
            || Self::shortcut_matches("arrowup", "arrowup", &pressed, modifiers)
        {
            Some(Message::PreviousEntry)
        } else if Self::shortcut_matches(&c.key_first_entry, "home", &pressed, modifiers) {
            Some(Message::FirstEntry)
        } else if Self::shortcut_matches(&c.key_last_entry, "end", &pressed, modifiers) {
            Some(Message::LastEntry)
        } else if Self::shortcut_matches(&c.key_play_us, "u", &pressed, modifiers) {
            Some(Message::PronounceCurrent(Variant::Us))
        } else if Self::shortcut_matches(&c.key_play_uk, "i", &pressed, modifiers) {
            Some(Message::PronounceCurrent(Variant::Uk))
        } else if Self::shortcut_matches(&c.key_font_larger, "ctrl+=", &pressed, modifiers) {
            Some(Message::FontSizeChanged(c.font_size.saturating_add(1)))
        } else if Self::shortcut_matches(&c.key_font_smaller, "ctrl+-", &pressed, modifiers) {
            Some(Message::FontSizeChanged(c.font_size.saturating_sub(1)))
        } else if Self::shortcut_matches(&c.key_toggle_search, "ctrl+f", &pressed, modifiers) {
            Some(Message::ToggleSearch)
        } else if Self::shortcut_matches(&c.key_safe_quit, "q", &pressed, modifiers) {
            Some(Message::SafeQuit)
        } else {
            None
        }
    }

    pub(super) fn shortcut_matches(
        raw: &str,
        fallback: &str,
        pressed: &str,
        modifiers: Modifiers,
    ) -> bool {
        let normalized = Self::normalize_shortcut_token(raw, fallback);

        let mut required_ctrl = false;
        let mut required_alt = false;
        let mut required_logo = false;
        let mut required_shift = false;
        let mut required_key: Option<&str> = None;

        for token in normalized
            .split('+')
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            match token {
                "ctrl" | "control" => required_ctrl = true,
                "alt" => required_alt = true,
                "logo" | "meta" | "super" | "cmd" | "command" => required_logo = true,
                "shift" => required_shift = true,
                key => required_key = Some(key),
            }
        }

        let required_key = required_key.unwrap_or(fallback);
        if pressed != required_key {
            return false;
        }

        modifiers.control() == required_ctrl
            && modifiers.alt() == required_alt
            && modifiers.logo() == required_logo
            && modifiers.shift() == required_shift
    }

    pub(super) fn normalize_shortcut_token(raw: &str, fallback: &str) -> String {
        let normalized = raw.trim().to_ascii_lowercase();
        if normalized.is_empty() {
            fallback.to_string()
        } else {
            normalized
                .split('+')
                .map(|token| match token.trim() {
                    "spacebar" => "space",
                    "down" => "arrowdown",
                    "up" => "arrowup",
                    other => other,
                })
                .collect::<Vec<_>>()
                .join("+")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iced::keyboard::Modifiers;

    #[test]
    fn normalizes_key_aliases() {
        assert_eq!(App::normalize_shortcut_token(" SpaceBar ", "x"), "space");
        assert_eq!(App::normalize_shortcut_token("Down", "x"), "arrowdown");
        assert_eq!(App::normalize_shortcut_token("ArrowUp", "x"), "arrowup");
        assert_eq!(App::normalize_shortcut_token("", "j"), "j");
    }

    #[test]
    fn matches_ctrl_shortcuts() {
        assert!(App::shortcut_matches("ctrl+f", "x", "f", Modifiers::CTRL));
        assert!(App::shortcut_matches("ctrl+=", "x", "=", Modifiers::CTRL));
        assert!(App::shortcut_matches("ctrl+-", "x", "-", Modifiers::CTRL));
    }

    #[test]
    fn rejects_unexpected_extra_modifier() {
        assert!(!App::shortcut_matches(
            "ctrl+f",
            "x",
            "f",
            Modifiers::CTRL | Modifiers::SHIFT,
        ));
        assert!(!App::shortcut_matches("j", "j", "j", Modifiers::CTRL));
    }
}
