use super::defaults;
use super::models::{AppConfig, DetectionWindow, LogLevel, ThemeMode};
use serde::Deserialize;

/// On-disk layout of `config.toml`: one table per concern.
#[derive(Debug, Clone, Default, Deserialize, serde::Serialize)]
pub(super) struct ConfigTables {
    #[serde(default)]
    appearance: AppearanceConfig,
    #[serde(default)]
    viewport: ViewportConfig,
    #[serde(default)]
    pronunciation: PronunciationConfig,
    #[serde(default)]
    ui: UiConfig,
    #[serde(default)]
    logging: LoggingConfig,
    #[serde(default)]
    keys: KeysConfig,
}

impl From<ConfigTables> for AppConfig {
    fn from(tables: ConfigTables) -> Self {
        AppConfig {
            theme: tables.appearance.theme,
            font_size: tables.appearance.font_size,
            card_spacing: tables.appearance.card_spacing,
            detection_window: tables.viewport.detection_window,
            active_threshold: tables.viewport.active_threshold,
            smooth_scroll_ms: tables.viewport.smooth_scroll_ms,
            audio_base_url: tables.pronunciation.audio_base_url,
            audio_volume: tables.pronunciation.volume,
            cache_audio: tables.pronunciation.cache_audio,
            audio_timeout_secs: tables.pronunciation.timeout_secs,
            window_width: tables.ui.window_width,
            window_height: tables.ui.window_height,
            log_level: tables.logging.log_level,
            key_next_entry: tables.keys.next_entry,
            key_prev_entry: tables.keys.prev_entry,
            key_first_entry: tables.keys.first_entry,
            key_last_entry: tables.keys.last_entry,
            key_play_us: tables.keys.play_us,
            key_play_uk: tables.keys.play_uk,
            key_font_larger: tables.keys.font_larger,
            key_font_smaller: tables.keys.font_smaller,
            key_toggle_search: tables.keys.toggle_search,
            key_safe_quit: tables.keys.safe_quit,
        }
    }
}

impl From<&AppConfig> for ConfigTables {
    fn from(config: &AppConfig) -> Self {
        ConfigTables {
            appearance: AppearanceConfig {
                theme: config.theme,
                font_size: config.font_size,
                card_spacing: config.card_spacing,
            },
            viewport: ViewportConfig {
                detection_window: config.detection_window,
                active_threshold: config.active_threshold,
                smooth_scroll_ms: config.smooth_scroll_ms,
            },
            pronunciation: PronunciationConfig {
                audio_base_url: config.audio_base_url.clone(),
                volume: config.audio_volume,
                cache_audio: config.cache_audio,
                timeout_secs: config.audio_timeout_secs,
            },
            ui: UiConfig {
                window_width: config.window_width,
                window_height: config.window_height,
            },
            logging: LoggingConfig {
                log_level: config.log_level,
            },
            keys: KeysConfig {
                next_entry: config.key_next_entry.clone(),
                prev_entry: config.key_prev_entry.clone(),
                first_entry: config.key_first_entry.clone(),
                last_entry: config.key_last_entry.clone(),
                play_us: config.key_play_us.clone(),
                play_uk: config.key_play_uk.clone(),
                font_larger: config.key_font_larger.clone(),
                font_smaller: config.key_font_smaller.clone(),
                toggle_search: config.key_toggle_search.clone(),
                safe_quit: config.key_safe_quit.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct AppearanceConfig {
    #[serde(default)]
    theme: ThemeMode,
    #[serde(default = "defaults::default_font_size")]
    font_size: u32,
    #[serde(default = "defaults::default_card_spacing")]
    card_spacing: f32,
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        AppearanceConfig {
            theme: ThemeMode::default(),
            font_size: defaults::default_font_size(),
            card_spacing: defaults::default_card_spacing(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct ViewportConfig {
    #[serde(default)]
    detection_window: DetectionWindow,
    #[serde(default = "defaults::default_active_threshold")]
    active_threshold: f32,
    #[serde(default = "defaults::default_smooth_scroll_ms")]
    smooth_scroll_ms: u64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        ViewportConfig {
            detection_window: DetectionWindow::default(),
            active_threshold: defaults::default_active_threshold(),
            smooth_scroll_ms: defaults::default_smooth_scroll_ms(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct PronunciationConfig {
    #[serde(default = "defaults::default_audio_base_url")]
    audio_base_url: String,
    #[serde(default = "defaults::default_audio_volume")]
    volume: f32,
    #[serde(default = "defaults::default_cache_audio")]
    cache_audio: bool,
    #[serde(default = "defaults::default_audio_timeout_secs")]
    timeout_secs: u64,
}

impl Default for PronunciationConfig {
    fn default() -> Self {
        PronunciationConfig {
            audio_base_url: defaults::default_audio_base_url(),
            volume: defaults::default_audio_volume(),
            cache_audio: defaults::default_cache_audio(),
            timeout_secs: defaults::default_audio_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct UiConfig {
    #[serde(default = "defaults::default_window_width")]
    window_width: f32,
    #[serde(default = "defaults::default_window_height")]
    window_height: f32,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            window_width: defaults::default_window_width(),
            window_height: defaults::default_window_height(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, serde::Serialize)]
struct LoggingConfig {
    #[serde(default = "defaults::default_log_level")]
    log_level: LogLevel,
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct KeysConfig {
    #[serde(default = "defaults::default_key_next_entry")]
    next_entry: String,
    #[serde(default = "defaults::default_key_prev_entry")]
    prev_entry: String,
    #[serde(default = "defaults::default_key_first_entry")]
    first_entry: String,
    #[serde(default = "defaults::default_key_last_entry")]
    last_entry: String,
    #[serde(default = "defaults::default_key_play_us")]
    play_us: String,
    #[serde(default = "defaults::default_key_play_uk")]
    play_uk: String,
    #[serde(default = "defaults::default_key_font_larger")]
    font_larger: String,
    #[serde(default = "defaults::default_key_font_smaller")]
    font_smaller: String,
    #[serde(default = "defaults::default_key_toggle_search")]
    toggle_search: String,
    #[serde(default = "defaults::default_key_safe_quit")]
    safe_quit: String,
}

impl Default for KeysConfig {
    fn default() -> Self {
        KeysConfig {
            next_entry: defaults::default_key_next_entry(),
            prev_entry: defaults::default_key_prev_entry(),
            first_entry: defaults::default_key_first_entry(),
            last_entry: defaults::default_key_last_entry(),
            play_us: defaults::default_key_play_us(),
            play_uk: defaults::default_key_play_uk(),
            font_larger: defaults::default_key_font_larger(),
            font_smaller: defaults::default_key_font_smaller(),
            toggle_search: defaults::default_key_toggle_search(),
            safe_quit: defaults::default_key_safe_quit(),
        }
    }
}
