//! Pronunciation playback for headwords.
//!
//! Clips come from a dictionary voice endpoint
//! (`{base}?audio={word}&type={0|1}`), are cached on disk keyed by a hash of
//! the request, and are played on the default output device. Everything here
//! blocks, so the UI runs it on a worker thread through
//! [`speak_in_background`].

use crate::cache::{audio_dir, sha256_hex};
use crate::config::{AppConfig, MAX_AUDIO_VOLUME};
use anyhow::{Context, Result, anyhow};
use iced::futures::channel::oneshot;
use reqwest::Url;
use rodio::{Decoder, OutputStream, Sink};
use std::fs;
use std::io::Cursor;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Accent of a pronunciation clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    Us,
    Uk,
}

impl Variant {
    /// Value of the endpoint's `type` parameter.
    pub fn code(self) -> u8 {
        match self {
            Variant::Us => 0,
            Variant::Uk => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Variant::Us => "US",
            Variant::Uk => "UK",
        }
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone)]
pub struct PronunciationClient {
    base_url: String,
    cache_dir: Option<PathBuf>,
    volume: f32,
    timeout: Duration,
}

impl PronunciationClient {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            base_url: config.audio_base_url.clone(),
            cache_dir: config.cache_audio.then(audio_dir),
            volume: config.audio_volume.clamp(0.0, MAX_AUDIO_VOLUME),
            timeout: Duration::from_secs(config.audio_timeout_secs.max(1)),
        }
    }

    pub fn audio_url(&self, word: &str, variant: Variant) -> Result<Url> {
        let code = variant.code().to_string();
        Url::parse_with_params(&self.base_url, &[("audio", word), ("type", code.as_str())])
            .with_context(|| format!("Invalid audio base URL {}", self.base_url))
    }

    fn cache_path(&self, word: &str, variant: Variant) -> Option<PathBuf> {
        let dir = self.cache_dir.as_ref()?;
        let key = format!("{}\n{}\n{}", self.base_url, word, variant.code());
        Some(dir.join(format!("{}.mp3", sha256_hex(key.as_bytes()))))
    }

    /// Clip bytes, from the cache when present.
    pub fn fetch(&self, word: &str, variant: Variant) -> Result<Vec<u8>> {
        let cached = self.cache_path(word, variant);
        if let Some(path) = cached.as_ref().filter(|p| p.exists()) {
            debug!(path = %path.display(), "Using cached pronunciation clip");
            return fs::read(path).with_context(|| format!("Reading {}", path.display()));
        }

        let url = self.audio_url(word, variant)?;
        info!(%word, variant = %variant, "Downloading pronunciation clip");
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .context("Building HTTP client")?;
        let response = client
            .get(url)
            .send()
            .context("Requesting pronunciation clip")?
            .error_for_status()
            .context("Pronunciation endpoint returned an error")?;
        let bytes = response.bytes().context("Reading clip body")?.to_vec();
        if bytes.is_empty() {
            return Err(anyhow!("Empty pronunciation clip for {word}"));
        }

        if let Some(path) = cached {
            if let Some(parent) = path.parent() {
                let _ = fs::create_dir_all(parent);
            }
            if let Err(err) = fs::write(&path, &bytes) {
                warn!(path = %path.display(), "Failed to cache pronunciation clip: {err}");
            }
        }
        Ok(bytes)
    }

    /// Decode and play a clip, returning when playback ends.
    pub fn play(&self, bytes: Vec<u8>) -> Result<()> {
        let (_stream, handle) = OutputStream::try_default().context("Opening audio output")?;
        let sink = Sink::try_new(&handle).context("Creating sink")?;
        let source = Decoder::new(Cursor::new(bytes)).context("Decoding pronunciation clip")?;
        sink.set_volume(self.volume);
        sink.append(source);
        sink.sleep_until_end();
        Ok(())
    }

    pub fn speak(&self, word: &str, variant: Variant) -> Result<()> {
        let bytes = self.fetch(word, variant)?;
        self.play(bytes)
    }
}

/// Fetch and play on a dedicated thread. The blocking HTTP client cannot run
/// inside the async executor.
pub async fn speak_in_background(
    client: PronunciationClient,
    word: String,
    variant: Variant,
) -> Result<(), String> {
    let (tx, rx) = oneshot::channel();
    std::thread::Builder::new()
        .name("pronounce".to_string())
        .spawn(move || {
            let result = client.speak(&word, variant).map_err(|err| format!("{err:#}"));
            let _ = tx.send(result);
        })
        .map_err(|err| format!("Failed to start pronunciation worker: {err}"))?;
    rx.await
        .unwrap_or_else(|_| Err("Pronunciation worker exited early".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> PronunciationClient {
        let mut config = AppConfig::default();
        config.cache_audio = false;
        PronunciationClient::from_config(&config)
    }

    #[test]
    fn builds_endpoint_url() {
        let url = client().audio_url("ice cream", Variant::Uk).expect("url");
        assert_eq!(
            url.as_str(),
            "https://dict.youdao.com/dictvoice?audio=ice+cream&type=1"
        );
        let url = client().audio_url("apple", Variant::Us).expect("url");
        assert!(url.as_str().ends_with("audio=apple&type=0"));
    }

    #[test]
    fn bad_base_url_is_an_error() {
        let mut config = AppConfig::default();
        config.audio_base_url = "not a url".to_string();
        let client = PronunciationClient::from_config(&config);
        assert!(client.audio_url("apple", Variant::Us).is_err());
    }

    #[test]
    fn cache_key_depends_on_word_and_variant() {
        let mut config = AppConfig::default();
        config.cache_audio = true;
        let client = PronunciationClient::from_config(&config);
        let us = client.cache_path("apple", Variant::Us).expect("cache enabled");
        let uk = client.cache_path("apple", Variant::Uk).expect("cache enabled");
        assert_ne!(us, uk);
        assert_eq!(Some(us.clone()), client.cache_path("apple", Variant::Us));
        assert!(us.starts_with(audio_dir()));
        assert_eq!(self::client().cache_path("apple", Variant::Us), None);
    }

    #[test]
    fn variant_codes() {
        assert_eq!(Variant::Us.code(), 0);
        assert_eq!(Variant::Uk.code(), 1);
        assert_eq!(Variant::Uk.to_string(), "UK");
    }
}
