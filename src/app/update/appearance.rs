use super::super::state::App;
use super::Effect;
use crate::config::{MAX_FONT_SIZE, MIN_FONT_SIZE, ThemeMode};
use tracing::{debug, info};

impl App {
    pub(super) fn handle_font_size_changed(&mut self, size: u32, effects: &mut Vec<Effect>) {
        let clamped = size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
        if clamped == self.config.font_size {
            return;
        }
        debug!(
            old = self.config.font_size,
            new = clamped,
            "Font size changed"
        );
        self.config.font_size = clamped;
        self.apply_card_metrics(effects);
    }

    pub(super) fn handle_toggle_theme(&mut self) {
        let next = match self.config.theme {
            ThemeMode::Night => ThemeMode::Day,
            ThemeMode::Day => ThemeMode::Night,
        };
        info!(
            night_mode = matches!(next, ThemeMode::Night),
            "Toggled theme"
        );
        self.config.theme = next;
    }

    pub(super) fn handle_window_resized(
        &mut self,
        width: f32,
        height: f32,
        effects: &mut Vec<Effect>,
    ) {
        if !width.is_finite() || !height.is_finite() {
            return;
        }
        let width = width.clamp(320.0, 7680.0);
        let height = height.clamp(240.0, 4320.0);

        let changed = (self.config.window_width - width).abs() >= 1.0
            || (self.config.window_height - height).abs() >= 1.0;
        if changed {
            self.config.window_width = width;
            self.config.window_height = height;
            debug!(width, height, "Window size changed");
            // The list reports its own width once it lays out again.
            if self.scroll.viewport_width <= 0.0 {
                self.apply_card_metrics(effects);
            }
        }
    }

    /// Re-derive card geometry and keep the current card in place.
    pub(super) fn apply_card_metrics(&mut self, effects: &mut Vec<Effect>) {
        let metrics = self.card_metrics();
        if metrics == *self.session.metrics() {
            self.observe_viewport();
            return;
        }
        let pending = self.scroll.animation.take();
        let offset = self.session.relayout(metrics);
        match pending {
            Some(animation) => {
                self.request_jump(animation.target as i64 + 1, false, effects);
            }
            None => self.scroll_programmatically(offset, effects),
        }
    }
}
