use super::super::state::App;
use super::Effect;
use crate::pronounce::Variant;
use tracing::{debug, warn};

impl App {
    pub(super) fn handle_pronounce(
        &mut self,
        index: usize,
        variant: Variant,
        effects: &mut Vec<Effect>,
    ) {
        let word = match self.session.entry(index) {
            Ok(entry) => entry.text.clone(),
            Err(err) => {
                warn!("Pronunciation requested for a missing entry: {err}");
                return;
            }
        };
        if self
            .pronunciation
            .in_flight
            .iter()
            .any(|(w, v)| w == &word && *v == variant)
        {
            debug!(%word, %variant, "Pronunciation already in flight");
            return;
        }
        self.pronunciation.in_flight.push((word.clone(), variant));
        effects.push(Effect::Pronounce { word, variant });
    }

    pub(super) fn handle_pronounce_current(&mut self, variant: Variant, effects: &mut Vec<Effect>) {
        if let Some(position) = self.session.current() {
            self.handle_pronounce(position - 1, variant, effects);
        }
    }

    pub(super) fn handle_pronunciation_finished(
        &mut self,
        word: String,
        variant: Variant,
        error: Option<String>,
    ) {
        self.pronunciation
            .in_flight
            .retain(|(w, v)| !(w == &word && *v == variant));
        match error {
            Some(err) => {
                warn!(%word, %variant, "Pronunciation playback failed: {err}");
                self.pronunciation.last_error = Some(format!("{variant} audio for {word}: {err}"));
            }
            None => {
                debug!(%word, %variant, "Pronunciation finished");
                self.pronunciation.last_error = None;
            }
        }
    }
}
