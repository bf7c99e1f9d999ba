use iced::widget::scrollable::Id as ScrollId;
use once_cell::sync::Lazy;

/// Layout and timing constants shared by the view and the update handlers.
pub(crate) const OUTER_PADDING_PX: f32 = 16.0;
pub(crate) const SCROLLBAR_ALLOWANCE_PX: f32 = 14.0;
/// Rough height of the controls above the list, used until the list reports
/// its real viewport.
pub(crate) const CONTROLS_HEIGHT_ESTIMATE_PX: f32 = 150.0;
pub(crate) const OVERSCAN_UNITS: usize = 4;
pub(crate) const SCROLL_ECHO_TOLERANCE_PX: f32 = 1.0;
pub(crate) const MAX_PENDING_ECHOES: usize = 8;
pub(crate) const ANIMATION_FRAME_MS: u64 = 16;
pub(crate) const BOOKMARK_SAVE_INTERVAL_MS: u64 = 1_500;
pub(crate) const RECENT_LISTS_SHOWN: usize = 8;
pub(crate) static LIST_SCROLL_ID: Lazy<ScrollId> = Lazy::new(|| ScrollId::new("card-list"));
