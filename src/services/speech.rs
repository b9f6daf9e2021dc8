//! Pronunciation port. Playback is platform work that lives behind a trait;
//! the default implementation only records the request.

use tracing::info;

pub trait SpeechSynthesizer: Send + Sync {
    /// Speaks `text` in the language identified by `lang` (a two-letter
    /// code). Playback is fire-and-forget.
    fn speak(&self, text: &str, lang: &str);
}

/// No-audio synthesizer. Logs the request so the flow is visible in traces.
#[derive(Debug, Default)]
pub struct NullSpeech;

impl SpeechSynthesizer for NullSpeech {
    fn speak(&self, text: &str, lang: &str) {
        info!(text, lang, "speech requested (no audio backend)");
    }
}
