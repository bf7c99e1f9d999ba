use super::super::state::App;
use super::Effect;

impl App {
    pub(super) fn handle_toggle_search(&mut self, effects: &mut Vec<Effect>) {
        self.search.visible = !self.search.visible;
        if self.search.visible {
            self.update_search_matches();
        } else {
            self.search.error = None;
            self.search.matches.clear();
            self.search.selected_match = 0;
        }
        self.reassert_scroll(effects);
    }

    pub(super) fn handle_search_query_changed(&mut self, query: String) {
        self.search.query = query;
        self.update_search_matches();
    }

    /// Next match after the entry being viewed, wrapping to the first.
    pub(super) fn handle_search_next(&mut self, effects: &mut Vec<Effect>) {
        if self.search.matches.is_empty() {
            return;
        }
        let base = self.navigation_base().unwrap_or(0);
        self.search.selected_match = self
            .search
            .matches
            .iter()
            .position(|idx| idx + 1 > base)
            .unwrap_or(0);
        self.jump_to_selected_search_match(effects);
    }

    /// Previous match before the entry being viewed, wrapping to the last.
    pub(super) fn handle_search_prev(&mut self, effects: &mut Vec<Effect>) {
        if self.search.matches.is_empty() {
            return;
        }
        let base = self.navigation_base().unwrap_or(0);
        self.search.selected_match = self
            .search
            .matches
            .iter()
            .rposition(|idx| idx + 1 < base)
            .unwrap_or(self.search.matches.len() - 1);
        self.jump_to_selected_search_match(effects);
    }

    fn jump_to_selected_search_match(&mut self, effects: &mut Vec<Effect>) {
        let Some(index) = self.search.matches.get(self.search.selected_match).copied() else {
            return;
        };
        self.request_jump(index as i64 + 1, true, effects);
    }
}
