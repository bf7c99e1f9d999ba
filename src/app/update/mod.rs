use crate::cache::Bookmark;
use crate::pronounce::Variant;
use std::path::PathBuf;

mod appearance;
mod core;
mod library;
mod navigation;
mod pronounce;
mod scroll;
mod search;


/// Describes work that must be performed outside the pure reducer.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum Effect {
    LoadList(PathBuf),
    RememberRecent(PathBuf),
    ScrollTo(f32),
    Pronounce { word: String, variant: Variant },
    SaveBookmark,
    /// Persist a position for a list that is no longer the open one.
    StoreBookmark { path: PathBuf, bookmark: Bookmark },
    QuitSafely,
}
