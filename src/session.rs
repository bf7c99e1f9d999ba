//! One loaded list and everything derived from it.
//!
//! A `Session` owns the entry store, the rendered units, the position tracker
//! and the status line, and rebuilds all of them together on every load so
//! none can outlive the list it was built for.

use crate::cards::{self, CardMetrics, VisualUnit};
use crate::config::DetectionWindow;
use crate::navigation::{self, JumpTarget};
use crate::status::StatusReflector;
use crate::tracker::PositionTracker;
use crate::viewport::{OffsetDetector, SubscriptionHandle, Viewport, ViewportDetector};
use crate::vocab::{EntryStore, IndexError, LoadError, VocabularyEntry};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Empty,
    Populated { total: usize },
}

#[derive(Debug)]
pub struct Session<D: ViewportDetector = OffsetDetector> {
    store: EntryStore,
    units: Vec<VisualUnit>,
    tracker: PositionTracker<D>,
    status: StatusReflector,
    metrics: CardMetrics,
    viewport: Viewport,
}

impl Session {
    pub fn new(window: DetectionWindow, threshold: f32, metrics: CardMetrics) -> Self {
        Self::with_detector(OffsetDetector::new(window, threshold), metrics)
    }
}

impl<D: ViewportDetector> Session<D> {
    pub fn with_detector(detector: D, metrics: CardMetrics) -> Self {
        Self {
            store: EntryStore::new(),
            units: Vec::new(),
            tracker: PositionTracker::new(detector),
            status: StatusReflector::new(),
            metrics,
            viewport: Viewport::new(0.0, 0.0),
        }
    }

    /// Parse and apply a list. A failed parse leaves the session untouched.
    ///
    /// On success the store, units, subscriptions and status are rebuilt in
    /// lockstep and the view returns to the top.
    pub fn load(&mut self, raw: &str) -> Result<(), LoadError> {
        self.store.load(raw)?;
        self.units = cards::render_all(self.store.entries(), &self.metrics);
        self.tracker.rebuild(&self.units);
        self.status.reset(self.units.len());
        self.viewport.offset = 0.0;
        info!(
            total = self.units.len(),
            title = self.store.title().unwrap_or_default(),
            "Word list applied"
        );
        Ok(())
    }

    /// Feed a settled viewport into the tracker. Returns the position when the
    /// pass changed it.
    pub fn observe(&mut self, viewport: Viewport) -> Option<usize> {
        self.viewport = viewport;
        let before = self.tracker.current();
        let batch = self.tracker.detect(viewport);
        self.deliver(&batch);
        let after = self.tracker.current();
        (after != before).then_some(after).flatten()
    }

    /// Deliver an externally produced detection batch.
    pub fn deliver(&mut self, batch: &[SubscriptionHandle]) {
        let total = self.units.len();
        let status = &mut self.status;
        self.tracker
            .deliver(batch, |position| status.reflect(position, total));
    }

    /// Resolve a 1-based jump. Out-of-range requests yield `None`.
    pub fn jump_to(&self, requested: i64) -> Option<JumpTarget> {
        navigation::jump_to(requested, &self.units, self.max_offset())
    }

    /// Apply new card metrics and return the offset that keeps the current
    /// card where it was relative to the viewport top.
    pub fn relayout(&mut self, metrics: CardMetrics) -> f32 {
        if metrics == self.metrics {
            return self.viewport.offset;
        }
        let anchor = self
            .tracker
            .current()
            .and_then(|p| self.units.get(p - 1))
            .map(|unit| (unit.index, (self.viewport.offset - unit.bounds.top).max(0.0)));

        self.metrics = metrics;
        cards::relayout(&mut self.units, &self.metrics);
        self.tracker.update_bounds(&self.units);

        let offset = anchor
            .and_then(|(index, intra)| {
                self.units
                    .get(index)
                    .map(|unit| unit.bounds.top + intra.min(unit.bounds.height))
            })
            .unwrap_or(0.0)
            .clamp(0.0, self.max_offset());
        debug!(
            font_size = metrics.font_size,
            width = metrics.content_width,
            offset,
            "Relaid out cards"
        );
        self.viewport.offset = offset;
        offset
    }

    /// Space after the last card that lets it scroll up to the viewport top.
    pub fn trailing_space(&self) -> f32 {
        self.units
            .last()
            .map(|unit| (self.viewport.height - unit.bounds.height).max(0.0))
            .unwrap_or(0.0)
    }

    pub fn content_height(&self) -> f32 {
        cards::content_height(&self.units) + self.trailing_space()
    }

    pub fn max_offset(&self) -> f32 {
        (self.content_height() - self.viewport.height).max(0.0)
    }

    pub fn state(&self) -> SessionState {
        if self.store.is_empty() {
            SessionState::Empty
        } else {
            SessionState::Populated {
                total: self.tracker.total(),
            }
        }
    }

    pub fn current(&self) -> Option<usize> {
        self.tracker.current()
    }

    pub fn total(&self) -> usize {
        self.store.count()
    }

    pub fn generation(&self) -> u64 {
        self.tracker.generation()
    }

    pub fn live_subscriptions(&self) -> usize {
        self.tracker.live_subscriptions()
    }

    #[cfg(test)]
    pub fn handles(&self) -> &[SubscriptionHandle] {
        self.tracker.handles()
    }

    pub fn units(&self) -> &[VisualUnit] {
        &self.units
    }

    pub fn entry(&self, index: usize) -> Result<&VocabularyEntry, IndexError> {
        self.store.at(index)
    }

    pub fn entries(&self) -> &[VocabularyEntry] {
        self.store.entries()
    }

    pub fn status(&self) -> &StatusReflector {
        &self.status
    }

    pub fn status_mut(&mut self) -> &mut StatusReflector {
        &mut self.status
    }

    pub fn title(&self) -> Option<&str> {
        self.store.title()
    }

    pub fn metrics(&self) -> &CardMetrics {
        &self.metrics
    }

    #[cfg(test)]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::ScrollAnimation;
    use std::time::{Duration, Instant};

    const SAMPLE: &str = r#"{"wordList":[{"value":"apple","translation":"苹果"},{"value":"bat","translation":"蝙蝠\n球棒"}]}"#;
    const VIEWPORT_HEIGHT: f32 = 600.0;

    fn metrics() -> CardMetrics {
        CardMetrics::new(20, 12.0, 800.0)
    }

    fn session() -> Session {
        Session::new(DetectionWindow::FocusBand, 0.5, metrics())
    }

    fn mixed_list(count: usize) -> String {
        let words: Vec<String> = (0..count)
            .map(|i| {
                let lines: Vec<String> = (0..=(i % 4)).map(|l| format!("meaning {l}")).collect();
                format!(
                    r#"{{"value":"word{i}","translation":"{}"}}"#,
                    lines.join("\\n")
                )
            })
            .collect();
        format!(r#"{{"wordList":[{}]}}"#, words.join(","))
    }

    /// Drive an animated jump frame by frame, observing each frame.
    fn settle_jump(session: &mut Session, requested: i64) -> bool {
        let Some(target) = session.jump_to(requested) else {
            return false;
        };
        let start = Instant::now();
        let anim = ScrollAnimation::new(
            session.viewport().offset,
            target.offset,
            start,
            Duration::from_millis(300),
            target.index,
        );
        for frame in 0..=20u64 {
            let now = start + Duration::from_millis(frame * 16);
            session.observe(Viewport::new(anim.offset_at(now), VIEWPORT_HEIGHT));
        }
        session.observe(Viewport::new(
            anim.offset_at(start + Duration::from_secs(1)),
            VIEWPORT_HEIGHT,
        ));
        true
    }

    #[test]
    fn sample_list_starts_at_first_entry() {
        let mut session = session();
        session.load(SAMPLE).expect("sample");
        assert_eq!(session.state(), SessionState::Populated { total: 2 });
        assert_eq!(session.current(), Some(1));
        assert_eq!(session.status().progress(), "1 / 2");
        assert_eq!(session.status().jump_max(), 2);
        assert_eq!(session.units()[0].paragraphs.len(), 1);
        assert_eq!(session.units()[1].paragraphs.len(), 2);

        session.observe(Viewport::new(0.0, VIEWPORT_HEIGHT));
        assert!(settle_jump(&mut session, 2));
        assert_eq!(session.current(), Some(2));
        assert_eq!(session.status().progress(), "2 / 2");
        assert_eq!(session.status().jump_value(), "2");
    }

    #[test]
    fn every_jump_converges() {
        let mut session = session();
        session.load(&mixed_list(40)).expect("list");
        session.observe(Viewport::new(0.0, VIEWPORT_HEIGHT));
        let order: Vec<i64> = (1..=40).chain((1..=40).rev()).chain([7, 33, 1, 40]).collect();
        for requested in order {
            assert!(settle_jump(&mut session, requested));
            assert_eq!(
                session.current(),
                Some(requested as usize),
                "jump to {requested}"
            );
        }
    }

    #[test]
    fn jumps_converge_with_touching_cards() {
        let mut session = Session::new(
            DetectionWindow::FocusBand,
            0.5,
            CardMetrics::new(20, 0.0, 800.0),
        );
        let words: Vec<String> = (0..10)
            .map(|i| format!(r#"{{"value":"word{i}","translation":"meaning"}}"#))
            .collect();
        session
            .load(&format!(r#"{{"wordList":[{}]}}"#, words.join(",")))
            .expect("list");
        let height = session.units()[1].bounds.height;
        assert!((session.units()[2].bounds.top - session.units()[1].bounds.bottom()).abs() < 1e-3);

        // Band split evenly across cards 2 and 3, then nudged onto card 3.
        let split = session.units()[1].bounds.top + height / 2.0;
        session.observe(Viewport::new(split, VIEWPORT_HEIGHT));
        assert_eq!(session.current(), Some(2));
        session.observe(Viewport::new(split + 1.0, VIEWPORT_HEIGHT));
        assert_eq!(session.current(), Some(3));

        for requested in [2, 1, 3, 2, 10, 9, 1] {
            assert!(settle_jump(&mut session, requested));
            assert_eq!(session.current(), Some(requested as usize), "jump to {requested}");
        }
    }

    #[test]
    fn whole_viewport_window_settles_on_the_lowest_visible_card() {
        let mut session = Session::new(DetectionWindow::Viewport, 0.5, metrics());
        session.load(&mixed_list(20)).expect("list");
        let lowest = session
            .units()
            .iter()
            .filter(|u| {
                let visible = u.bounds.bottom().min(VIEWPORT_HEIGHT) - u.bounds.top;
                visible + 0.5 >= u.bounds.height / 2.0
            })
            .map(|u| u.index + 1)
            .last();
        assert!(lowest > Some(1));

        // A jump to the first card does not hold in this mode.
        assert!(settle_jump(&mut session, 1));
        assert_eq!(session.current(), lowest);
    }

    #[test]
    fn out_of_range_jumps_are_no_ops() {
        let mut session = session();
        session.load(SAMPLE).expect("sample");
        assert_eq!(session.jump_to(0), None);
        assert_eq!(session.jump_to(3), None);
        assert_eq!(session.current(), Some(1));
    }

    #[test]
    fn empty_reload_returns_to_empty_state() {
        let mut session = session();
        session.load(SAMPLE).expect("sample");
        session.load(r#"{"wordList":[]}"#).expect("empty list");
        assert_eq!(session.state(), SessionState::Empty);
        assert_eq!(session.current(), None);
        assert_eq!(session.status().progress(), "0 / 0");
        assert_eq!(session.status().jump_value(), "");
        assert_eq!(session.status().jump_max(), 0);
        assert_eq!(session.live_subscriptions(), 0);
    }

    #[test]
    fn malformed_input_leaves_state_untouched() {
        let mut session = session();
        session.load(SAMPLE).expect("sample");
        session.observe(Viewport::new(0.0, VIEWPORT_HEIGHT));
        settle_jump(&mut session, 2);
        let generation = session.generation();

        let err = session.load("{\"wordList\": [").unwrap_err();
        assert!(matches!(err, LoadError::Format(_)));
        assert_eq!(session.state(), SessionState::Populated { total: 2 });
        assert_eq!(session.current(), Some(2));
        assert_eq!(session.generation(), generation);
    }

    #[test]
    fn reload_kills_previous_handles() {
        let mut session = session();
        session.load(&mixed_list(12)).expect("list");
        let stale = session.handles().to_vec();
        session.load(&mixed_list(30)).expect("reload");
        assert_eq!(session.status().jump_max(), 30);
        assert_eq!(session.current(), Some(1));
        assert_eq!(session.live_subscriptions(), 30);

        session.deliver(&stale[5..]);
        assert_eq!(session.current(), Some(1));
        assert_eq!(session.status().progress(), "1 / 30");
    }

    #[test]
    fn user_scroll_updates_position() {
        let mut session = session();
        session.load(&mixed_list(20)).expect("list");
        let top = session.units()[9].bounds.top;
        assert_eq!(session.observe(Viewport::new(top, VIEWPORT_HEIGHT)), Some(10));
        assert_eq!(session.observe(Viewport::new(top + 1.0, VIEWPORT_HEIGHT)), None);
        assert_eq!(session.status().progress(), "10 / 20");
    }

    #[test]
    fn relayout_keeps_current_card_anchored() {
        let mut session = session();
        session.load(&mixed_list(20)).expect("list");
        let top = session.units()[6].bounds.top;
        session.observe(Viewport::new(top + 4.0, VIEWPORT_HEIGHT));
        assert_eq!(session.current(), Some(7));

        let offset = session.relayout(CardMetrics::new(28, 12.0, 800.0));
        assert_eq!(offset, session.units()[6].bounds.top + 4.0);
        session.observe(Viewport::new(offset, VIEWPORT_HEIGHT));
        assert_eq!(session.current(), Some(7));
    }

    #[test]
    fn trailing_space_lets_last_card_reach_the_top() {
        let mut session = session();
        session.load(&mixed_list(5)).expect("list");
        session.observe(Viewport::new(0.0, VIEWPORT_HEIGHT));
        let last_top = session.units()[4].bounds.top;
        assert!(session.max_offset() >= last_top);
        let target = session.jump_to(5).expect("in range");
        assert_eq!(target.offset, last_top);
    }
}
