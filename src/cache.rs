//! On-disk cache: last position per list, recently opened lists and
//! downloaded pronunciation clips.
//!
//! Per-list files live under `.cache/<sha256 of the list path>/`. Everything
//! is small TOML, and write failures are logged and otherwise ignored so the
//! UI never stalls on the cache.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const CACHE_DIR: &str = ".cache";
pub const RECENT_LIMIT: usize = 16;
const RECENT_FILE: &str = "recent.toml";
const BOOKMARK_FILE: &str = "bookmark.toml";

/// Last known position in a list, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub position: usize,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct RecentLists {
    #[serde(default)]
    paths: Vec<PathBuf>,
}

/// Absolute form of a list path, so every spelling of one file shares a
/// bookmark and a recent entry. Paths that cannot be resolved are kept as is.
pub fn canonical_list_path(list_path: &Path) -> PathBuf {
    fs::canonicalize(list_path).unwrap_or_else(|_| list_path.to_path_buf())
}

fn hash_dir_in(root: &Path, list_path: &Path) -> PathBuf {
    let key = canonical_list_path(list_path);
    root.join(sha256_hex(key.as_os_str().to_string_lossy().as_bytes()))
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

pub fn audio_dir() -> PathBuf {
    Path::new(CACHE_DIR).join("audio")
}

pub fn load_bookmark(list_path: &Path) -> Option<Bookmark> {
    load_bookmark_in(Path::new(CACHE_DIR), list_path)
}

pub fn save_bookmark(list_path: &Path, bookmark: &Bookmark) {
    save_bookmark_in(Path::new(CACHE_DIR), list_path, bookmark);
}

fn load_bookmark_in(root: &Path, list_path: &Path) -> Option<Bookmark> {
    let path = hash_dir_in(root, list_path).join(BOOKMARK_FILE);
    let data = fs::read_to_string(path).ok()?;
    toml::from_str::<Bookmark>(&data)
        .ok()
        .filter(|bm| bm.position > 0)
}

fn save_bookmark_in(root: &Path, list_path: &Path, bookmark: &Bookmark) {
    let path = hash_dir_in(root, list_path).join(BOOKMARK_FILE);
    match toml::to_string(bookmark) {
        Ok(contents) => write_file(&path, &contents),
        Err(err) => warn!("Failed to serialize bookmark: {err}"),
    }
}

/// Recently opened list paths, most recent first, skipping ones that no
/// longer exist.
pub fn list_recent(limit: usize) -> Vec<PathBuf> {
    list_recent_in(Path::new(CACHE_DIR), limit)
}

/// Move `list_path` to the front of the recent list.
pub fn remember_recent(list_path: &Path) {
    remember_recent_in(Path::new(CACHE_DIR), list_path);
}

fn read_recent(root: &Path) -> RecentLists {
    fs::read_to_string(root.join(RECENT_FILE))
        .ok()
        .and_then(|data| toml::from_str(&data).ok())
        .unwrap_or_default()
}

fn list_recent_in(root: &Path, limit: usize) -> Vec<PathBuf> {
    read_recent(root)
        .paths
        .into_iter()
        .filter(|path| path.exists())
        .take(limit)
        .collect()
}

fn remember_recent_in(root: &Path, list_path: &Path) {
    let absolute = canonical_list_path(list_path);
    let mut recent = read_recent(root);
    push_recent(&mut recent.paths, absolute, RECENT_LIMIT);
    match toml::to_string(&recent) {
        Ok(contents) => write_file(&root.join(RECENT_FILE), &contents),
        Err(err) => warn!("Failed to serialize recent lists: {err}"),
    }
}

/// Insert `path` at the front, dropping an older copy and anything past
/// `limit`.
pub fn push_recent(paths: &mut Vec<PathBuf>, path: PathBuf, limit: usize) {
    paths.retain(|existing| existing != &path);
    paths.insert(0, path);
    paths.truncate(limit);
}

fn write_file(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        if let Err(err) = fs::create_dir_all(parent) {
            warn!(path = %parent.display(), "Failed to create cache dir: {err}");
            return;
        }
    }
    match fs::write(path, contents) {
        Ok(()) => debug!(path = %path.display(), "Wrote cache file"),
        Err(err) => warn!(path = %path.display(), "Failed to write cache file: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "wordcard-cache-{name}-{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn push_recent_dedupes_and_limits() {
        let mut paths = vec![PathBuf::from("a"), PathBuf::from("b"), PathBuf::from("c")];
        push_recent(&mut paths, PathBuf::from("b"), 3);
        assert_eq!(paths, vec![PathBuf::from("b"), PathBuf::from("a"), PathBuf::from("c")]);
        push_recent(&mut paths, PathBuf::from("d"), 3);
        assert_eq!(paths, vec![PathBuf::from("d"), PathBuf::from("b"), PathBuf::from("a")]);
    }

    #[test]
    fn bookmark_round_trips_per_list() {
        let root = scratch_dir("bookmark");
        let list = Path::new("lists/cet4.json");
        assert_eq!(load_bookmark_in(&root, list), None);
        save_bookmark_in(&root, list, &Bookmark { position: 42 });
        assert_eq!(
            load_bookmark_in(&root, list),
            Some(Bookmark { position: 42 })
        );
        assert_eq!(load_bookmark_in(&root, Path::new("lists/other.json")), None);
        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn bookmark_is_shared_by_every_spelling_of_a_path() {
        let root = scratch_dir("spelling");
        let lists = root.join("lists");
        fs::create_dir_all(lists.join("nested")).expect("scratch dir");
        fs::write(lists.join("cet4.json"), "{}").expect("write list");

        let roundabout = lists.join("nested").join("..").join("cet4.json");
        save_bookmark_in(&root, &roundabout, &Bookmark { position: 7 });

        let canonical = fs::canonicalize(lists.join("cet4.json")).expect("canonical");
        assert_eq!(
            load_bookmark_in(&root, &canonical),
            Some(Bookmark { position: 7 })
        );

        // The recent list hands back the same spelling the bookmark answers to.
        remember_recent_in(&root, &roundabout);
        let recent = list_recent_in(&root, RECENT_LIMIT);
        assert_eq!(recent, vec![canonical.clone()]);
        assert_eq!(
            load_bookmark_in(&root, &recent[0]),
            Some(Bookmark { position: 7 })
        );
        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn recent_lists_skip_missing_files() {
        let root = scratch_dir("recent");
        fs::create_dir_all(&root).expect("scratch dir");
        let existing = root.join("list.json");
        fs::write(&existing, "{}").expect("write list");
        remember_recent_in(&root, Path::new("/definitely/missing/list.json"));
        remember_recent_in(&root, &existing);

        let recent = list_recent_in(&root, RECENT_LIMIT);
        assert_eq!(recent.len(), 1);
        assert!(recent[0].ends_with("list.json"));
        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn hash_dir_is_stable() {
        let root = Path::new(CACHE_DIR);
        let a = hash_dir_in(root, Path::new("x.json"));
        let b = hash_dir_in(root, Path::new("x.json"));
        assert_eq!(a, b);
        assert!(a.starts_with(CACHE_DIR));
        assert_ne!(a, hash_dir_in(root, Path::new("y.json")));
    }
}
