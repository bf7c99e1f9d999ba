use super::super::state::{
    App, BOOKMARK_SAVE_INTERVAL_MS, MAX_PENDING_ECHOES, SCROLL_ECHO_TOLERANCE_PX,
};
use super::Effect;
use crate::cache::{Bookmark, save_bookmark};
use crate::session::SessionState;
use crate::viewport::Viewport;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

impl App {
    pub(super) fn handle_scrolled(
        &mut self,
        generation: u64,
        offset_y: f32,
        viewport_width: f32,
        viewport_height: f32,
        effects: &mut Vec<Effect>,
    ) {
        if generation != self.session.generation() {
            trace!(
                generation,
                current = self.session.generation(),
                "Dropping scroll notification from a previous layout"
            );
            return;
        }
        let sanitize = |v: f32| if v.is_finite() { v.max(0.0) } else { 0.0 };
        let offset = sanitize(offset_y);
        let width = sanitize(viewport_width);
        self.scroll.viewport_height = sanitize(viewport_height);

        let is_echo = self.take_echo(offset);
        if !is_echo && self.scroll.animation.take().is_some() {
            debug!(offset, "User scroll cancelled jump animation");
        }
        self.scroll.offset = offset;

        if width > 0.0 && (width - self.scroll.viewport_width).abs() >= 1.0 {
            self.scroll.viewport_width = width;
            self.apply_card_metrics(effects);
            return;
        }

        self.observe_viewport();
        self.maybe_save_bookmark(Instant::now(), effects);
    }

    pub(super) fn handle_tick(&mut self, now: Instant, effects: &mut Vec<Effect>) {
        if let Some(animation) = self.scroll.animation {
            let offset = animation.offset_at(now);
            self.scroll_programmatically(offset, effects);
            if animation.is_finished(now) {
                self.scroll.animation = None;
                debug!(
                    target = animation.target + 1,
                    current = ?self.session.current(),
                    "Jump animation settled"
                );
            }
        }
        self.maybe_save_bookmark(now, effects);
    }

    /// Move the list to `offset` ourselves and feed the settled position to
    /// the tracker.
    pub(super) fn scroll_programmatically(&mut self, offset: f32, effects: &mut Vec<Effect>) {
        let offset = offset.clamp(0.0, self.session.max_offset());
        self.scroll.offset = offset;
        if self.scroll.pending_echoes.len() >= MAX_PENDING_ECHOES {
            self.scroll.pending_echoes.pop_front();
        }
        self.scroll.pending_echoes.push_back(offset);
        effects.push(Effect::ScrollTo(offset));
        self.observe_viewport();
    }

    /// Re-send the current offset after the layout around the list changed,
    /// so the widget and the tracked position cannot drift apart.
    pub(super) fn reassert_scroll(&mut self, effects: &mut Vec<Effect>) {
        if matches!(self.session.state(), SessionState::Populated { .. }) {
            self.scroll_programmatically(self.scroll.offset, effects);
        }
    }

    fn take_echo(&mut self, offset: f32) -> bool {
        let Some(pos) = self
            .scroll
            .pending_echoes
            .iter()
            .position(|requested| (requested - offset).abs() <= SCROLL_ECHO_TOLERANCE_PX)
        else {
            return false;
        };
        // Anything requested before the matching offset has been superseded.
        self.scroll.pending_echoes.drain(..=pos);
        true
    }

    pub(super) fn observe_viewport(&mut self) {
        let viewport = Viewport::new(self.scroll.offset, self.scroll.viewport_height);
        if let Some(position) = self.session.observe(viewport) {
            debug!(position, offset = viewport.offset, "Current entry changed");
        }
    }

    pub(super) fn bookmark_dirty(&self) -> bool {
        self.list_path.is_some()
            && self.session.current().is_some()
            && self.session.current() != self.bookmark.saved_position
    }

    fn maybe_save_bookmark(&mut self, now: Instant, effects: &mut Vec<Effect>) {
        if !self.bookmark_dirty() || self.scroll.animation.is_some() {
            return;
        }
        let due = self.bookmark.last_saved_at.is_none_or(|at| {
            now.saturating_duration_since(at) >= Duration::from_millis(BOOKMARK_SAVE_INTERVAL_MS)
        });
        if due {
            self.bookmark.saved_position = self.session.current();
            self.bookmark.last_saved_at = Some(now);
            effects.push(Effect::SaveBookmark);
        }
    }

    pub(super) fn persist_bookmark(&mut self) {
        let (Some(path), Some(position)) = (self.list_path.as_ref(), self.session.current()) else {
            return;
        };
        save_bookmark(path, &Bookmark { position });
        self.bookmark.saved_position = Some(position);
        debug!(position, path = %path.display(), "Saved bookmark");
    }
}
