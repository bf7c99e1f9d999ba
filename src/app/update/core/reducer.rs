use super::super::super::messages::Message;
use super::super::super::state::App;
use super::super::Effect;

impl App {
    pub(in crate::app) fn reduce(&mut self, message: Message) -> Vec<Effect> {
        let mut effects = Vec::new();

        match message {
            Message::OpenPathInputChanged(path) => self.handle_open_path_input_changed(path),
            Message::OpenPathRequested => self.handle_open_path_requested(&mut effects),
            Message::OpenList(path) => self.handle_open_list(path, &mut effects),
            Message::ListLoaded {
                path,
                raw,
                bookmark,
            } => self.handle_list_loaded(path, raw, bookmark, &mut effects),
            Message::ListLoadFailed { path, error } => self.handle_list_load_failed(path, error),
            Message::DismissNotice => self.handle_dismiss_notice(&mut effects),
            Message::Scrolled {
                generation,
                offset_y,
                viewport_width,
                viewport_height,
            } => self.handle_scrolled(
                generation,
                offset_y,
                viewport_width,
                viewport_height,
                &mut effects,
            ),
            Message::JumpInputChanged(raw) => self.handle_jump_input_changed(raw),
            Message::JumpSubmitted => self.handle_jump_submitted(&mut effects),
            Message::NextEntry => self.handle_step_entry(1, &mut effects),
            Message::PreviousEntry => self.handle_step_entry(-1, &mut effects),
            Message::FirstEntry => self.request_jump(1, true, &mut effects),
            Message::LastEntry => {
                let total = self.session.total() as i64;
                self.request_jump(total, true, &mut effects);
            }
            Message::FontSizeChanged(size) => self.handle_font_size_changed(size, &mut effects),
            Message::ToggleTheme => self.handle_toggle_theme(),
            Message::Pronounce { index, variant } => {
                self.handle_pronounce(index, variant, &mut effects)
            }
            Message::PronounceCurrent(variant) => {
                self.handle_pronounce_current(variant, &mut effects)
            }
            Message::PronunciationFinished {
                word,
                variant,
                error,
            } => self.handle_pronunciation_finished(word, variant, error),
            Message::ToggleSearch => self.handle_toggle_search(&mut effects),
            Message::SearchQueryChanged(query) => self.handle_search_query_changed(query),
            Message::SearchNext => self.handle_search_next(&mut effects),
            Message::SearchPrev => self.handle_search_prev(&mut effects),
            Message::WindowResized { width, height } => {
                self.handle_window_resized(width, height, &mut effects);
            }
            Message::KeyPressed { key, modifiers } => {
                if let Some(shortcut) = self.shortcut_message_for_key(key, modifiers) {
                    effects.extend(self.reduce(shortcut));
                }
            }
            Message::Tick(now) => self.handle_tick(now, &mut effects),
            Message::SafeQuit => effects.push(Effect::QuitSafely),
        }

        effects
    }
}
