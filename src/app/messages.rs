use crate::cache::Bookmark;
use crate::pronounce::Variant;
use crate::vocab::LoadError;
use iced::keyboard::{Key, Modifiers};
use std::path::PathBuf;
use std::time::Instant;

/// Messages emitted by the UI.
#[derive(Debug, Clone)]
pub enum Message {
    OpenPathInputChanged(String),
    OpenPathRequested,
    OpenList(PathBuf),
    /// File read off the update loop; parsing happens when it is applied.
    ListLoaded {
        path: PathBuf,
        raw: String,
        bookmark: Option<Bookmark>,
    },
    ListLoadFailed {
        path: PathBuf,
        error: LoadError,
    },
    DismissNotice,
    /// Scrollable viewport changed. `generation` is the layout generation the
    /// view was built under.
    Scrolled {
        generation: u64,
        offset_y: f32,
        viewport_width: f32,
        viewport_height: f32,
    },
    JumpInputChanged(String),
    JumpSubmitted,
    NextEntry,
    PreviousEntry,
    FirstEntry,
    LastEntry,
    FontSizeChanged(u32),
    ToggleTheme,
    Pronounce {
        index: usize,
        variant: Variant,
    },
    PronounceCurrent(Variant),
    PronunciationFinished {
        word: String,
        variant: Variant,
        error: Option<String>,
    },
    ToggleSearch,
    SearchQueryChanged(String),
    SearchNext,
    SearchPrev,
    WindowResized {
        width: f32,
        height: f32,
    },
    KeyPressed {
        key: Key,
        modifiers: Modifiers,
    },
    Tick(Instant),
    SafeQuit,
}
