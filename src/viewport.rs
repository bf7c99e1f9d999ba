//! Viewport intersection detection over cached card bounds.
//!
//! There is no platform intersection observer to lean on, so detection polls
//! the scroll offset against the bounds recorded when units were subscribed.
//! Units are stacked top to bottom in index order, which keeps every lookup a
//! binary search plus a walk over the handful of units inside the window.

use crate::config::DetectionWindow;
use tracing::{debug, trace};

const OVERLAP_EPSILON_PX: f32 = 0.5;

/// Vertical extent of a unit in content coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitBounds {
    pub top: f32,
    pub height: f32,
}

impl UnitBounds {
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    fn overlap(&self, top: f32, bottom: f32) -> f32 {
        (self.bottom().min(bottom) - self.top.max(top)).max(0.0)
    }
}

/// Visible slice of the content: scroll offset plus viewport height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub offset: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(offset: f32, height: f32) -> Self {
        let sanitize = |v: f32| if v.is_finite() { v.max(0.0) } else { 0.0 };
        Self {
            offset: sanitize(offset),
            height: sanitize(height),
        }
    }
}

/// Identifies one live subscription. Handles from an older generation are
/// dead even when their index is still in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionHandle {
    pub generation: u64,
    pub index: usize,
}

/// Detection backend used by the position tracker.
pub trait ViewportDetector {
    fn subscribe(&mut self, index: usize, bounds: UnitBounds) -> SubscriptionHandle;

    /// Release every subscription and start a new generation.
    fn unsubscribe_all(&mut self);

    /// Replace the cached bounds of a live subscription.
    fn update_bounds(&mut self, handle: SubscriptionHandle, bounds: UnitBounds) -> bool;

    /// Units that became active since the previous call, in document order.
    fn detect(&mut self, viewport: Viewport) -> Vec<SubscriptionHandle>;

    fn is_live(&self, handle: SubscriptionHandle) -> bool;

    fn live_count(&self) -> usize;

    fn generation(&self) -> u64;
}

#[derive(Debug, Clone, Copy)]
struct Observed {
    index: usize,
    bounds: UnitBounds,
}

/// Polling detector backed by cached unit bounds.
#[derive(Debug)]
pub struct OffsetDetector {
    window: DetectionWindow,
    threshold: f32,
    generation: u64,
    observed: Vec<Observed>,
    sorted: bool,
    active: Vec<usize>,
    min_height: f32,
    min_height_dirty: bool,
}

impl OffsetDetector {
    pub fn new(window: DetectionWindow, threshold: f32) -> Self {
        let threshold = if threshold.is_finite() {
            threshold.clamp(0.01, 1.0)
        } else {
            0.5
        };
        Self {
            window,
            threshold,
            generation: 0,
            observed: Vec::new(),
            sorted: true,
            active: Vec::new(),
            min_height: 0.0,
            min_height_dirty: false,
        }
    }

    /// Detection window in content coordinates for the given viewport.
    fn window_span(&self, viewport: Viewport) -> (f32, f32) {
        let height = match self.window {
            DetectionWindow::Viewport => viewport.height,
            DetectionWindow::FocusBand => {
                if self.min_height > 0.0 {
                    viewport.height.min(self.min_height)
                } else {
                    viewport.height
                }
            }
        };
        (viewport.offset, viewport.offset + height)
    }

    fn is_active(&self, bounds: UnitBounds, top: f32, bottom: f32) -> bool {
        if bounds.height <= 0.0 || bottom <= top {
            return false;
        }
        let overlap = bounds.overlap(top, bottom);
        if overlap <= 0.0 {
            return false;
        }
        if overlap + OVERLAP_EPSILON_PX >= self.threshold * bounds.height {
            return true;
        }
        // Units taller than the band can never have half their area inside it.
        matches!(self.window, DetectionWindow::FocusBand)
            && overlap + OVERLAP_EPSILON_PX >= self.threshold * (bottom - top)
    }

    fn ensure_sorted(&mut self) {
        if !self.sorted {
            self.observed
                .sort_by(|a, b| a.bounds.top.total_cmp(&b.bounds.top));
            self.sorted = true;
        }
    }

    fn recompute_min_height(&mut self) {
        self.min_height = self
            .observed
            .iter()
            .map(|o| o.bounds.height)
            .filter(|h| *h > 0.0)
            .fold(f32::INFINITY, f32::min);
        if !self.min_height.is_finite() {
            self.min_height = 0.0;
        }
    }

    fn position_of(&self, index: usize) -> Option<usize> {
        // Subscriptions normally arrive in index order, so try the direct slot first.
        match self.observed.get(index) {
            Some(o) if o.index == index => Some(index),
            _ => self.observed.iter().position(|o| o.index == index),
        }
    }
}

impl ViewportDetector for OffsetDetector {
    fn subscribe(&mut self, index: usize, bounds: UnitBounds) -> SubscriptionHandle {
        if let Some(last) = self.observed.last() {
            if bounds.top < last.bounds.top {
                self.sorted = false;
            }
        }
        self.observed.push(Observed { index, bounds });
        if bounds.height > 0.0 && (self.min_height <= 0.0 || bounds.height < self.min_height) {
            self.min_height = bounds.height;
        }
        SubscriptionHandle {
            generation: self.generation,
            index,
        }
    }

    fn unsubscribe_all(&mut self) {
        let released = self.observed.len();
        self.observed.clear();
        self.active.clear();
        self.sorted = true;
        self.min_height = 0.0;
        self.min_height_dirty = false;
        self.generation = self.generation.wrapping_add(1);
        debug!(
            released,
            generation = self.generation,
            "Released viewport subscriptions"
        );
    }

    fn update_bounds(&mut self, handle: SubscriptionHandle, bounds: UnitBounds) -> bool {
        if !self.is_live(handle) {
            return false;
        }
        let Some(pos) = self.position_of(handle.index) else {
            return false;
        };
        self.observed[pos].bounds = bounds;
        self.sorted = false;
        self.min_height_dirty = true;
        true
    }

    fn detect(&mut self, viewport: Viewport) -> Vec<SubscriptionHandle> {
        self.ensure_sorted();
        if self.min_height_dirty {
            self.recompute_min_height();
            self.min_height_dirty = false;
        }
        let (top, bottom) = self.window_span(viewport);
        let first = self
            .observed
            .partition_point(|o| o.bounds.bottom() <= top);

        let mut now_active: Vec<usize> = self.observed[first..]
            .iter()
            .take_while(|o| o.bounds.top < bottom)
            .filter(|o| self.is_active(o.bounds, top, bottom))
            .map(|o| o.index)
            .collect();
        // The band holds one card at a time; with touching cards or a low
        // threshold two can qualify, and the upper one owns the band.
        if matches!(self.window, DetectionWindow::FocusBand) {
            now_active.truncate(1);
        }

        let generation = self.generation;
        let newly: Vec<SubscriptionHandle> = now_active
            .iter()
            .filter(|index| !self.active.contains(index))
            .map(|&index| SubscriptionHandle { generation, index })
            .collect();

        trace!(
            offset = viewport.offset,
            window_top = top,
            window_bottom = bottom,
            active = now_active.len(),
            newly = newly.len(),
            "Viewport detection pass"
        );
        self.active = now_active;
        newly
    }

    fn is_live(&self, handle: SubscriptionHandle) -> bool {
        handle.generation == self.generation && self.position_of(handle.index).is_some()
    }

    fn live_count(&self) -> usize {
        self.observed.len()
    }

    fn generation(&self) -> u64 {
        self.generation
    }
}
