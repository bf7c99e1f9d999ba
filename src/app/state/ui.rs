use crate::navigation::ScrollAnimation;
use crate::pronounce::{PronunciationClient, Variant};
use std::collections::VecDeque;
use std::path::PathBuf;
use std::time::Instant;

pub struct ScrollState {
    pub(in crate::app) viewport_width: f32,
    pub(in crate::app) viewport_height: f32,
    pub(in crate::app) offset: f32,
    pub(in crate::app) animation: Option<ScrollAnimation>,
    /// Offsets we asked the scrollable to move to whose notifications have
    /// not come back yet.
    pub(in crate::app) pending_echoes: VecDeque<f32>,
}

pub struct LibraryState {
    pub(in crate::app) open_path_input: String,
    pub(in crate::app) recent: Vec<PathBuf>,
    pub(in crate::app) loading: bool,
    pub(in crate::app) notice: Option<String>,
}

pub struct SearchState {
    pub(in crate::app) visible: bool,
    pub(in crate::app) query: String,
    pub(in crate::app) error: Option<String>,
    pub(in crate::app) matches: Vec<usize>,
    pub(in crate::app) selected_match: usize,
}

pub struct PronunciationState {
    pub(in crate::app) client: PronunciationClient,
    pub(in crate::app) in_flight: Vec<(String, Variant)>,
    pub(in crate::app) last_error: Option<String>,
}

pub struct BookmarkState {
    pub(in crate::app) saved_position: Option<usize>,
    pub(in crate::app) last_saved_at: Option<Instant>,
}
