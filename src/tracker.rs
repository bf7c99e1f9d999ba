//! Scroll-driven current-position tracking.

use crate::cards::VisualUnit;
use crate::viewport::{OffsetDetector, SubscriptionHandle, Viewport, ViewportDetector};
use tracing::{debug, trace};

/// Owns the detection subscriptions for the current unit set and the single
/// authoritative current position.
#[derive(Debug)]
pub struct PositionTracker<D: ViewportDetector = OffsetDetector> {
    detector: D,
    handles: Vec<SubscriptionHandle>,
    current: Option<usize>,
    total: usize,
}

impl<D: ViewportDetector> PositionTracker<D> {
    pub fn new(detector: D) -> Self {
        Self {
            detector,
            handles: Vec::new(),
            current: None,
            total: 0,
        }
    }

    /// Release every subscription of the previous unit set, then subscribe
    /// one per unit. The position starts at the first entry.
    pub fn rebuild(&mut self, units: &[VisualUnit]) {
        self.detector.unsubscribe_all();
        self.handles = units
            .iter()
            .map(|unit| self.detector.subscribe(unit.index, unit.bounds))
            .collect();
        self.total = units.len();
        self.current = if self.total > 0 { Some(1) } else { None };
        debug!(
            total = self.total,
            generation = self.detector.generation(),
            "Rebuilt position subscriptions"
        );
    }

    /// Push new bounds after a relayout. Subscriptions stay the same.
    pub fn update_bounds(&mut self, units: &[VisualUnit]) {
        for (handle, unit) in self.handles.iter().zip(units) {
            self.detector.update_bounds(*handle, unit.bounds);
        }
    }

    /// Run one detection pass. The batch still has to be delivered.
    pub fn detect(&mut self, viewport: Viewport) -> Vec<SubscriptionHandle> {
        self.detector.detect(viewport)
    }

    /// Apply a batch of newly active units in order; the last live one wins.
    /// Handles from an older generation or for unknown units are skipped.
    pub fn deliver(&mut self, batch: &[SubscriptionHandle], mut emit: impl FnMut(usize)) {
        for handle in batch {
            if !self.detector.is_live(*handle) || handle.index >= self.total {
                trace!(
                    index = handle.index,
                    generation = handle.generation,
                    "Ignoring stale detection callback"
                );
                continue;
            }
            let position = handle.index + 1;
            self.current = Some(position);
            emit(position);
        }
    }

    pub fn current(&self) -> Option<usize> {
        self.current
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn generation(&self) -> u64 {
        self.detector.generation()
    }

    pub fn live_subscriptions(&self) -> usize {
        self.detector.live_count()
    }

    pub fn handles(&self) -> &[SubscriptionHandle] {
        &self.handles
    }

    #[cfg(test)]
    pub fn detector(&self) -> &D {
        &self.detector
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardMetrics, render_all};
    use crate::config::DetectionWindow;
    use crate::vocab::WordList;

    fn units(count: usize) -> Vec<VisualUnit> {
        let words: Vec<String> = (0..count)
            .map(|i| format!(r#"{{"value":"w{i}","translation":"t{i}"}}"#))
            .collect();
        let raw = format!(r#"{{"wordList":[{}]}}"#, words.join(","));
        let list = WordList::parse(&raw).expect("list");
        render_all(&list.entries, &CardMetrics::new(20, 12.0, 800.0))
    }

    fn tracker() -> PositionTracker {
        PositionTracker::new(OffsetDetector::new(DetectionWindow::FocusBand, 0.5))
    }

    #[test]
    fn rebuild_starts_at_first_entry() {
        let mut tracker = tracker();
        tracker.rebuild(&units(5));
        assert_eq!(tracker.current(), Some(1));
        assert_eq!(tracker.live_subscriptions(), 5);
    }

    #[test]
    fn empty_unit_set_has_no_position() {
        let mut tracker = tracker();
        tracker.rebuild(&units(3));
        tracker.rebuild(&[]);
        assert_eq!(tracker.current(), None);
        assert_eq!(tracker.live_subscriptions(), 0);
        assert!(tracker.detect(Viewport::new(0.0, 600.0)).is_empty());
    }

    #[test]
    fn observe_follows_the_scroll_offset() {
        let units = units(10);
        let mut tracker = tracker();
        tracker.rebuild(&units);
        let batch = tracker.detect(Viewport::new(units[4].bounds.top, 600.0));
        let mut emitted = Vec::new();
        tracker.deliver(&batch, |p| emitted.push(p));
        assert_eq!(emitted, vec![5]);
        assert_eq!(tracker.current(), Some(5));
    }

    #[test]
    fn last_unit_in_batch_wins() {
        let mut tracker = tracker();
        tracker.rebuild(&units(4));
        let generation = tracker.generation();
        let batch: Vec<_> = [1, 3, 2]
            .iter()
            .map(|&index| SubscriptionHandle { generation, index })
            .collect();
        let mut emitted = Vec::new();
        tracker.deliver(&batch, |p| emitted.push(p));
        assert_eq!(emitted, vec![2, 4, 3]);
        assert_eq!(tracker.current(), Some(3));
    }

    #[test]
    fn stale_batches_after_rebuild_are_ignored() {
        let mut tracker = tracker();
        tracker.rebuild(&units(6));
        let stale = tracker.handles().to_vec();
        tracker.rebuild(&units(2));
        assert!(stale.iter().all(|h| !tracker.detector().is_live(*h)));

        let mut emitted = Vec::new();
        tracker.deliver(&stale, |p| emitted.push(p));
        assert!(emitted.is_empty());
        assert_eq!(tracker.current(), Some(1));
    }
}
