//! Progress text and jump control state.

/// What the status bar shows: progress text plus the jump input's value and
/// upper bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReflector {
    progress: String,
    jump_value: String,
    jump_max: usize,
}

impl Default for StatusReflector {
    fn default() -> Self {
        Self {
            progress: "0 / 0".to_string(),
            jump_value: String::new(),
            jump_max: 0,
        }
    }
}

impl StatusReflector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Progress text is always rewritten. The jump value only changes when it
    /// no longer names `current`, so a value being typed is left alone.
    pub fn reflect(&mut self, current: usize, total: usize) {
        self.progress = format!("{current} / {total}");
        if total > 0 && self.jump_value.trim().parse::<usize>().ok() != Some(current) {
            self.jump_value = current.to_string();
        }
    }

    /// New list loaded: bound the jump control and reset to the empty state
    /// or the first entry.
    pub fn reset(&mut self, total: usize) {
        *self = Self::default();
        self.jump_max = total;
        if total > 0 {
            self.reflect(1, total);
        }
    }

    /// User typing into the jump control. Only digits are kept.
    pub fn set_jump_input(&mut self, raw: &str) {
        self.jump_value = raw.chars().filter(char::is_ascii_digit).collect();
    }

    /// The jump value as a request, or `None` when it is empty.
    pub fn requested_jump(&self) -> Option<i64> {
        self.jump_value.trim().parse::<i64>().ok()
    }

    pub fn progress(&self) -> &str {
        &self.progress
    }

    pub fn jump_value(&self) -> &str {
        &self.jump_value
    }

    pub fn jump_max(&self) -> usize {
        self.jump_max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_state() {
        let status = StatusReflector::new();
        assert_eq!(status.progress(), "0 / 0");
        assert_eq!(status.jump_value(), "");
        assert_eq!(status.jump_max(), 0);
    }

    #[test]
    fn reset_sets_max_and_first_position() {
        let mut status = StatusReflector::new();
        status.reset(42);
        assert_eq!(status.progress(), "1 / 42");
        assert_eq!(status.jump_value(), "1");
        assert_eq!(status.jump_max(), 42);

        status.reset(0);
        assert_eq!(status, StatusReflector::new());
    }

    #[test]
    fn reflect_keeps_matching_jump_value() {
        let mut status = StatusReflector::new();
        status.reset(10);
        status.set_jump_input("07");
        status.reflect(7, 10);
        assert_eq!(status.jump_value(), "07");
        status.reflect(8, 10);
        assert_eq!(status.jump_value(), "8");
        assert_eq!(status.progress(), "8 / 10");
    }

    #[test]
    fn jump_input_keeps_digits_only() {
        let mut status = StatusReflector::new();
        status.set_jump_input("1a2-");
        assert_eq!(status.requested_jump(), Some(12));
        status.set_jump_input("");
        assert_eq!(status.requested_jump(), None);
    }
}
