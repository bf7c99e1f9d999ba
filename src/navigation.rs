//! Jump requests and the eased scroll that carries them out.
//!
//! Navigation never touches the current position itself. It only produces a
//! scroll target; the position tracker confirms the move once the viewport
//! actually arrives there.

use crate::cards::VisualUnit;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Resolved jump request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JumpTarget {
    pub index: usize,
    /// 1-based position that was requested.
    pub position: usize,
    /// Scroll offset that puts the unit's top edge at the viewport top.
    pub offset: f32,
}

/// Resolve a 1-based jump request. Anything outside `[1, total]` is ignored.
pub fn jump_to(requested: i64, units: &[VisualUnit], max_offset: f32) -> Option<JumpTarget> {
    let total = units.len();
    if requested < 1 || requested as u64 > total as u64 {
        debug!(requested, total, "Ignoring out-of-range jump");
        return None;
    }
    let index = (requested - 1) as usize;
    let unit = units.get(index)?;
    let offset = unit.bounds.top.min(max_offset.max(0.0)).max(0.0);
    info!(position = requested, offset, "Jump requested");
    Some(JumpTarget {
        index,
        position: index + 1,
        offset,
    })
}

/// Ease-out scroll from one offset to another.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollAnimation {
    pub from: f32,
    pub to: f32,
    pub started_at: Instant,
    pub duration: Duration,
    pub target: usize,
}

impl ScrollAnimation {
    pub fn new(from: f32, to: f32, started_at: Instant, duration: Duration, target: usize) -> Self {
        Self {
            from,
            to,
            started_at,
            duration,
            target,
        }
    }

    fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started_at);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    /// Offset at `now`; lands exactly on `to` once the duration has elapsed.
    pub fn offset_at(&self, now: Instant) -> f32 {
        let t = self.progress(now);
        if t >= 1.0 {
            return self.to;
        }
        // Cubic ease-out.
        let eased = 1.0 - (1.0 - t).powi(3);
        self.from + (self.to - self.from) * eased
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardMetrics, render_all};
    use crate::vocab::WordList;

    fn units() -> Vec<VisualUnit> {
        let list = WordList::parse(
            r#"{"wordList":[{"value":"a"},{"value":"b"},{"value":"c"}]}"#,
        )
        .expect("list");
        render_all(&list.entries, &CardMetrics::new(20, 12.0, 800.0))
    }

    #[test]
    fn out_of_range_requests_are_ignored() {
        let units = units();
        assert_eq!(jump_to(0, &units, 10_000.0), None);
        assert_eq!(jump_to(4, &units, 10_000.0), None);
        assert_eq!(jump_to(-3, &units, 10_000.0), None);
        assert_eq!(jump_to(1, &[], 10_000.0), None);
    }

    #[test]
    fn valid_request_targets_unit_top() {
        let units = units();
        let target = jump_to(3, &units, 10_000.0).expect("in range");
        assert_eq!(target.index, 2);
        assert_eq!(target.position, 3);
        assert_eq!(target.offset, units[2].bounds.top);
    }

    #[test]
    fn target_offset_is_clamped_to_scroll_range() {
        let units = units();
        let target = jump_to(3, &units, 5.0).expect("in range");
        assert_eq!(target.offset, 5.0);
    }

    #[test]
    fn animation_eases_toward_the_target() {
        let start = Instant::now();
        let anim = ScrollAnimation::new(0.0, 100.0, start, Duration::from_millis(300), 0);
        let mid = anim.offset_at(start + Duration::from_millis(150));
        assert!(mid > 50.0 && mid < 100.0);
        assert!(!anim.is_finished(start + Duration::from_millis(150)));
        assert_eq!(anim.offset_at(start + Duration::from_millis(400)), 100.0);
        assert!(anim.is_finished(start + Duration::from_millis(300)));
    }

    #[test]
    fn zero_duration_is_instant() {
        let start = Instant::now();
        let anim = ScrollAnimation::new(40.0, 10.0, start, Duration::ZERO, 1);
        assert_eq!(anim.offset_at(start), 10.0);
        assert!(anim.is_finished(start));
    }
}
