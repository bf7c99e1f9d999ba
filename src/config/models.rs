use serde::Deserialize;

/// High-level app configuration; the flattened view of the TOML tables.
#[derive(Debug, Clone, PartialEq, Deserialize, serde::Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub theme: ThemeMode,
    #[serde(default = "crate::config::defaults::default_font_size")]
    pub font_size: u32,
    #[serde(default = "crate::config::defaults::default_card_spacing")]
    pub card_spacing: f32,
    #[serde(default = "crate::config::defaults::default_window_width")]
    pub window_width: f32,
    #[serde(default = "crate::config::defaults::default_window_height")]
    pub window_height: f32,
    #[serde(default)]
    pub detection_window: DetectionWindow,
    #[serde(default = "crate::config::defaults::default_active_threshold")]
    pub active_threshold: f32,
    #[serde(default = "crate::config::defaults::default_smooth_scroll_ms")]
    pub smooth_scroll_ms: u64,
    #[serde(default = "crate::config::defaults::default_audio_base_url")]
    pub audio_base_url: String,
    #[serde(default = "crate::config::defaults::default_audio_volume")]
    pub audio_volume: f32,
    #[serde(default = "crate::config::defaults::default_cache_audio")]
    pub cache_audio: bool,
    #[serde(default = "crate::config::defaults::default_audio_timeout_secs")]
    pub audio_timeout_secs: u64,
    #[serde(default = "crate::config::defaults::default_log_level")]
    pub log_level: LogLevel,
    #[serde(default = "crate::config::defaults::default_key_next_entry")]
    pub key_next_entry: String,
    #[serde(default = "crate::config::defaults::default_key_prev_entry")]
    pub key_prev_entry: String,
    #[serde(default = "crate::config::defaults::default_key_first_entry")]
    pub key_first_entry: String,
    #[serde(default = "crate::config::defaults::default_key_last_entry")]
    pub key_last_entry: String,
    #[serde(default = "crate::config::defaults::default_key_play_us")]
    pub key_play_us: String,
    #[serde(default = "crate::config::defaults::default_key_play_uk")]
    pub key_play_uk: String,
    #[serde(default = "crate::config::defaults::default_key_font_larger")]
    pub key_font_larger: String,
    #[serde(default = "crate::config::defaults::default_key_font_smaller")]
    pub key_font_smaller: String,
    #[serde(default = "crate::config::defaults::default_key_toggle_search")]
    pub key_toggle_search: String,
    #[serde(default = "crate::config::defaults::default_key_safe_quit")]
    pub key_safe_quit: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            theme: ThemeMode::default(),
            font_size: crate::config::defaults::default_font_size(),
            card_spacing: crate::config::defaults::default_card_spacing(),
            window_width: crate::config::defaults::default_window_width(),
            window_height: crate::config::defaults::default_window_height(),
            detection_window: DetectionWindow::default(),
            active_threshold: crate::config::defaults::default_active_threshold(),
            smooth_scroll_ms: crate::config::defaults::default_smooth_scroll_ms(),
            audio_base_url: crate::config::defaults::default_audio_base_url(),
            audio_volume: crate::config::defaults::default_audio_volume(),
            cache_audio: crate::config::defaults::default_cache_audio(),
            audio_timeout_secs: crate::config::defaults::default_audio_timeout_secs(),
            log_level: crate::config::defaults::default_log_level(),
            key_next_entry: crate::config::defaults::default_key_next_entry(),
            key_prev_entry: crate::config::defaults::default_key_prev_entry(),
            key_first_entry: crate::config::defaults::default_key_first_entry(),
            key_last_entry: crate::config::defaults::default_key_last_entry(),
            key_play_us: crate::config::defaults::default_key_play_us(),
            key_play_uk: crate::config::defaults::default_key_play_uk(),
            key_font_larger: crate::config::defaults::default_key_font_larger(),
            key_font_smaller: crate::config::defaults::default_key_font_smaller(),
            key_toggle_search: crate::config::defaults::default_key_toggle_search(),
            key_safe_quit: crate::config::defaults::default_key_safe_quit(),
        }
    }
}

/// Theme mode.
#[derive(Debug, Clone, Copy, Default, Deserialize, serde::Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeMode {
    #[default]
    Day,
    Night,
}

impl std::fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ThemeMode::Day => "Day",
            ThemeMode::Night => "Night",
        };
        write!(f, "{}", label)
    }
}

/// Region of the viewport a card must cover to become the current entry.
///
/// `focus-band` is a strip at the top of the viewport as tall as the shortest
/// card, so exactly one card can be current and a jump always lands on the
/// requested entry. `viewport` uses the whole visible area; the lowest
/// half-visible card becomes current there, so a jump may settle past its
/// target.
#[derive(Debug, Clone, Copy, Default, Deserialize, serde::Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum DetectionWindow {
    #[default]
    FocusBand,
    Viewport,
}

impl std::fmt::Display for DetectionWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            DetectionWindow::FocusBand => "focus-band",
            DetectionWindow::Viewport => "viewport",
        };
        write!(f, "{}", label)
    }
}

/// Supported logging verbosity levels.
#[derive(Debug, Clone, Copy, Default, Deserialize, serde::Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    #[default]
    Debug,
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_filter_str())
    }
}

impl LogLevel {
    pub fn as_filter_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}
