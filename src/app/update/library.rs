use super::super::state::App;
use super::Effect;
use crate::cache::{Bookmark, canonical_list_path};
use crate::session::SessionState;
use crate::vocab::LoadError;
use std::path::PathBuf;
use tracing::{info, warn};

impl App {
    pub(super) fn handle_open_path_input_changed(&mut self, path: String) {
        self.library.open_path_input = path;
    }

    pub(super) fn handle_open_path_requested(&mut self, effects: &mut Vec<Effect>) {
        let candidate = PathBuf::from(self.library.open_path_input.trim());
        if candidate.as_os_str().is_empty() {
            return;
        }
        self.handle_open_list(candidate, effects);
    }

    pub(super) fn handle_open_list(&mut self, path: PathBuf, effects: &mut Vec<Effect>) {
        if self.library.loading {
            return;
        }
        if !path.exists() {
            self.library.notice = Some(format!("File not found: {}", path.display()));
            warn!(path = %path.display(), "Requested list does not exist");
            return;
        }
        let path = canonical_list_path(&path);
        self.library.loading = true;
        self.library.open_path_input = path.display().to_string();
        info!(path = %path.display(), "Opening word list");
        effects.push(Effect::LoadList(path));
    }

    pub(super) fn handle_list_loaded(
        &mut self,
        path: PathBuf,
        raw: String,
        bookmark: Option<Bookmark>,
        effects: &mut Vec<Effect>,
    ) {
        let leaving = self
            .list_path
            .clone()
            .filter(|previous| previous != &path)
            .zip(self.session.current());
        if let Err(error) = self.session.load(&raw) {
            self.handle_list_load_failed(path, error);
            return;
        }
        if let Some((previous, position)) = leaving {
            effects.push(Effect::StoreBookmark {
                path: previous,
                bookmark: Bookmark { position },
            });
        }

        self.library.loading = false;
        self.library.notice = None;
        self.list_path = Some(path.clone());
        self.scroll.animation = None;
        self.scroll.pending_echoes.clear();
        self.bookmark.saved_position = bookmark.map(|bm| bm.position);
        self.bookmark.last_saved_at = None;
        self.update_search_matches();

        self.scroll_programmatically(0.0, effects);
        if let Some(bm) = bookmark {
            info!(position = bm.position, "Resuming from cached position");
            self.request_jump(bm.position as i64, false, effects);
        }
        effects.push(Effect::RememberRecent(path.clone()));
        match self.session.state() {
            SessionState::Populated { total } => info!(
                path = %path.display(),
                total,
                subscriptions = self.session.live_subscriptions(),
                "Word list loaded"
            ),
            SessionState::Empty => info!(path = %path.display(), "Word list loaded with no entries"),
        }
    }

    pub(super) fn handle_dismiss_notice(&mut self, effects: &mut Vec<Effect>) {
        if self.library.notice.take().is_some() {
            self.reassert_scroll(effects);
        }
    }

    pub(super) fn handle_list_load_failed(&mut self, path: PathBuf, error: LoadError) {
        self.library.loading = false;
        self.library.notice = Some(format!("Failed to open {}: {}", path.display(), error));
        warn!(path = %path.display(), "Failed to load word list: {error}");
    }
}
