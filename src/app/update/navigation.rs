use super::super::state::App;
use super::Effect;
use crate::navigation::ScrollAnimation;
use std::time::{Duration, Instant};
use tracing::debug;

impl App {
    pub(super) fn handle_jump_input_changed(&mut self, raw: String) {
        self.session.status_mut().set_jump_input(&raw);
    }

    pub(super) fn handle_jump_submitted(&mut self, effects: &mut Vec<Effect>) {
        if let Some(requested) = self.session.status().requested_jump() {
            self.request_jump(requested, true, effects);
        }
    }

    /// Entry being navigated to while a jump is in flight, else the current one.
    pub(super) fn navigation_base(&self) -> Option<usize> {
        self.scroll
            .animation
            .map(|animation| animation.target + 1)
            .or(self.session.current())
    }

    pub(super) fn handle_step_entry(&mut self, delta: i64, effects: &mut Vec<Effect>) {
        let Some(base) = self.navigation_base() else {
            return;
        };
        self.request_jump(base as i64 + delta, true, effects);
    }

    /// Scroll so entry `requested` (1-based) sits at the top. The current
    /// position is left to the tracker.
    pub(super) fn request_jump(&mut self, requested: i64, animate: bool, effects: &mut Vec<Effect>) {
        let Some(target) = self.session.jump_to(requested) else {
            return;
        };
        let duration = Duration::from_millis(self.config.smooth_scroll_ms);
        if animate && !duration.is_zero() {
            debug!(
                position = target.position,
                from = self.scroll.offset,
                to = target.offset,
                "Starting jump animation"
            );
            self.scroll.animation = Some(ScrollAnimation::new(
                self.scroll.offset,
                target.offset,
                Instant::now(),
                duration,
                target.index,
            ));
        } else {
            self.scroll.animation = None;
            self.scroll_programmatically(target.offset, effects);
        }
    }
}
