//! Core types for speech output

use serde::{Deserialize, Serialize};

/// TTS engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TtsConfig {
    /// Enable/disable speech output
    pub enabled: bool,
    /// BCP 47 language tag for spoken output (e.g. "en-US")
    pub language: String,
    /// Speaking rate (words per minute, typically 100-300)
    pub speech_rate: Option<u32>,
    /// Voice pitch (0.0-2.0, 1.0 is normal)
    pub pitch: Option<f32>,
    /// Volume (0.0-1.0)
    pub volume: Option<f32>,
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            language: "en-US".to_string(),
            speech_rate: Some(180), // Reasonable default speaking rate
            pitch: Some(1.0),
            volume: Some(0.8),
        }
    }
}

/// How a new utterance interacts with whatever the engine is already saying
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueueMode {
    /// Discard any queued or in-progress utterance and speak immediately
    Interrupt,
    /// Play after the current utterance finishes
    ///
    /// Engines without a queue may downgrade this to [`QueueMode::Interrupt`].
    Enqueue,
}

/// A single synthesis request handed to an engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UtteranceRequest {
    /// Correlation ID, see [`crate::next_utterance_id`]
    pub id: u64,
    /// Text to vocalize
    pub text: String,
    /// Queue interaction policy
    pub mode: QueueMode,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tts_config_default() {
        let config = TtsConfig::default();
        assert!(config.enabled);
        assert_eq!(config.language, "en-US");
        assert_eq!(config.speech_rate, Some(180));
        assert_eq!(config.pitch, Some(1.0));
        assert_eq!(config.volume, Some(0.8));
    }
}
