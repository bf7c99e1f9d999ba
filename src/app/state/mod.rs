mod constants;
mod ui;

use crate::cache::list_recent;
use crate::cards::CardMetrics;
use crate::config::{
    AppConfig, MAX_AUDIO_VOLUME, MAX_CARD_SPACING, MAX_FONT_SIZE, MAX_SMOOTH_SCROLL_MS,
    MIN_FONT_SIZE,
};
use crate::pronounce::PronunciationClient;
use crate::session::Session;
use iced::Task;
use regex::RegexBuilder;
use std::collections::VecDeque;
use std::path::PathBuf;

use super::messages::Message;

pub(crate) use constants::*;
pub(in crate::app) use ui::{
    BookmarkState, LibraryState, PronunciationState, ScrollState, SearchState,
};

/// Core application state composed of sub-models.
pub struct App {
    pub(super) session: Session,
    pub(super) config: AppConfig,
    pub(super) list_path: Option<PathBuf>,
    pub(super) scroll: ScrollState,
    pub(super) library: LibraryState,
    pub(super) search: SearchState,
    pub(super) pronunciation: PronunciationState,
    pub(super) bookmark: BookmarkState,
}

impl App {
    pub(super) fn bootstrap(
        mut config: AppConfig,
        initial_list: Option<PathBuf>,
    ) -> (App, Task<Message>) {
        clamp_config(&mut config);
        let metrics = card_metrics_for(&config, 0.0);
        let mut app = App {
            session: Session::new(config.detection_window, config.active_threshold, metrics),
            scroll: ScrollState {
                viewport_width: 0.0,
                viewport_height: estimated_list_height(config.window_height),
                offset: 0.0,
                animation: None,
                pending_echoes: VecDeque::new(),
            },
            library: LibraryState {
                open_path_input: initial_list
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default(),
                recent: list_recent(RECENT_LISTS_SHOWN),
                loading: false,
                notice: None,
            },
            search: SearchState {
                visible: false,
                query: String::new(),
                error: None,
                matches: Vec::new(),
                selected_match: 0,
            },
            pronunciation: PronunciationState {
                client: PronunciationClient::from_config(&config),
                in_flight: Vec::new(),
                last_error: None,
            },
            bookmark: BookmarkState {
                saved_position: None,
                last_saved_at: None,
            },
            list_path: None,
            config,
        };

        let task = match initial_list {
            Some(path) => app.update(Message::OpenList(path)),
            None => Task::none(),
        };
        (app, task)
    }

    pub(super) fn window_title(&self) -> String {
        match self.session.title() {
            Some(title) => format!("{title} - Word Cards"),
            None => "Word Cards".to_string(),
        }
    }

    /// Card metrics for the current font size and list width.
    pub(super) fn card_metrics(&self) -> CardMetrics {
        card_metrics_for(&self.config, self.scroll.viewport_width)
    }

    pub(super) fn update_search_matches(&mut self) {
        let query = self.search.query.trim();
        if query.is_empty() {
            self.search.error = None;
            self.search.matches.clear();
            self.search.selected_match = 0;
            return;
        }

        let regex = match RegexBuilder::new(query).case_insensitive(true).build() {
            Ok(regex) => regex,
            Err(err) => {
                self.search.error = Some(err.to_string());
                self.search.matches.clear();
                self.search.selected_match = 0;
                return;
            }
        };

        self.search.error = None;
        self.search.matches = self
            .session
            .entries()
            .iter()
            .enumerate()
            .filter_map(|(idx, entry)| regex.is_match(&entry.text).then_some(idx))
            .collect();
        if self.search.matches.is_empty() {
            self.search.selected_match = 0;
        } else {
            self.search.selected_match = self
                .search
                .selected_match
                .min(self.search.matches.len().saturating_sub(1));
        }
    }
}

fn card_metrics_for(config: &AppConfig, viewport_width: f32) -> CardMetrics {
    let width = if viewport_width > 0.0 {
        viewport_width - SCROLLBAR_ALLOWANCE_PX
    } else {
        config.window_width - OUTER_PADDING_PX * 2.0 - SCROLLBAR_ALLOWANCE_PX
    };
    CardMetrics::new(config.font_size, config.card_spacing, width.max(1.0))
}

fn estimated_list_height(window_height: f32) -> f32 {
    (window_height - CONTROLS_HEIGHT_ESTIMATE_PX - OUTER_PADDING_PX * 2.0).max(100.0)
}

fn clamp_config(config: &mut AppConfig) {
    fn normalize_key_binding(value: &mut String, fallback: String) {
        let normalized = value.trim().to_ascii_lowercase();
        if normalized.is_empty() {
            *value = fallback;
        } else {
            *value = normalized;
        }
    }

    config.font_size = config.font_size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
    config.card_spacing = if config.card_spacing.is_finite() {
        config.card_spacing.clamp(0.0, MAX_CARD_SPACING)
    } else {
        crate::config::AppConfig::default().card_spacing
    };
    config.window_width = config.window_width.clamp(320.0, 7680.0);
    config.window_height = config.window_height.clamp(240.0, 4320.0);
    config.active_threshold = if config.active_threshold.is_finite() {
        config.active_threshold.clamp(0.01, 1.0)
    } else {
        0.5
    };
    config.smooth_scroll_ms = config.smooth_scroll_ms.min(MAX_SMOOTH_SCROLL_MS);
    config.audio_volume = if config.audio_volume.is_finite() {
        config.audio_volume.clamp(0.0, MAX_AUDIO_VOLUME)
    } else {
        1.0
    };
    config.audio_timeout_secs = config.audio_timeout_secs.clamp(1, 120);
    normalize_key_binding(&mut config.key_next_entry, "j".to_string());
    normalize_key_binding(&mut config.key_prev_entry, "k".to_string());
    normalize_key_binding(&mut config.key_first_entry, "home".to_string());
    normalize_key_binding(&mut config.key_last_entry, "end".to_string());
    normalize_key_binding(&mut config.key_play_us, "u".to_string());
    normalize_key_binding(&mut config.key_play_uk, "i".to_string());
    normalize_key_binding(&mut config.key_font_larger, "ctrl+=".to_string());
    normalize_key_binding(&mut config.key_font_smaller, "ctrl+-".to_string());
    normalize_key_binding(&mut config.key_toggle_search, "ctrl+f".to_string());
    normalize_key_binding(&mut config.key_safe_quit, "q".to_string());
}
