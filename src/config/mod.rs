//! Configuration loading for the word card viewer.
//!
//! All user-tunable settings are centralized here and loaded from
//! `conf/config.toml` if present. A missing or invalid file falls back to
//! defaults so the UI can still launch.

mod defaults;
mod io;
mod models;
mod tables;

pub(crate) use defaults::{
    MAX_AUDIO_VOLUME, MAX_CARD_SPACING, MAX_FONT_SIZE, MAX_SMOOTH_SCROLL_MS, MIN_FONT_SIZE,
};
pub use io::load_config;
pub use models::{AppConfig, DetectionWindow, ThemeMode};
