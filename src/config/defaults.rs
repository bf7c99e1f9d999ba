use super::models::LogLevel;

pub(crate) const MIN_FONT_SIZE: u32 = 12;
pub(crate) const MAX_FONT_SIZE: u32 = 48;
pub(crate) const MAX_CARD_SPACING: f32 = 64.0;
pub(crate) const MAX_SMOOTH_SCROLL_MS: u64 = 2_000;
pub(crate) const MAX_AUDIO_VOLUME: f32 = 2.0;

pub(crate) fn default_font_size() -> u32 {
    20
}

pub(crate) fn default_card_spacing() -> f32 {
    12.0
}

pub(crate) fn default_window_width() -> f32 {
    960.0
}

pub(crate) fn default_window_height() -> f32 {
    800.0
}

pub(crate) fn default_active_threshold() -> f32 {
    0.5
}

pub(crate) fn default_smooth_scroll_ms() -> u64 {
    350
}

pub(crate) fn default_audio_base_url() -> String {
    "https://dict.youdao.com/dictvoice".to_string()
}

pub(crate) fn default_audio_volume() -> f32 {
    1.0
}

pub(crate) fn default_cache_audio() -> bool {
    true
}

pub(crate) fn default_audio_timeout_secs() -> u64 {
    10
}

pub(crate) fn default_log_level() -> LogLevel {
    LogLevel::Debug
}

pub(crate) fn default_key_next_entry() -> String {
    "j".to_string()
}

pub(crate) fn default_key_prev_entry() -> String {
    "k".to_string()
}

pub(crate) fn default_key_first_entry() -> String {
    "home".to_string()
}

pub(crate) fn default_key_last_entry() -> String {
    "end".to_string()
}

pub(crate) fn default_key_play_us() -> String {
    "u".to_string()
}

pub(crate) fn default_key_play_uk() -> String {
    "i".to_string()
}

pub(crate) fn default_key_font_larger() -> String {
    "ctrl+=".to_string()
}

pub(crate) fn default_key_font_smaller() -> String {
    "ctrl+-".to_string()
}

pub(crate) fn default_key_toggle_search() -> String {
    "ctrl+f".to_string()
}

pub(crate) fn default_key_safe_quit() -> String {
    "q".to_string()
}
