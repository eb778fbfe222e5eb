//! Speech adapter configuration

use serde::{Deserialize, Serialize};
use voxout_tts::TtsConfig;

/// Reset policy for the awaiting-response latch
///
/// The latch tells the embedding application that the last utterance expects
/// an answer. Who clears it is a policy decision, so it is explicit here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LatchResetPolicy {
    /// The adapter never clears an armed latch; the embedding application
    /// calls [`crate::SpeechOutputAdapter::clear_awaiting_response`] once the
    /// response has been handled.
    #[default]
    Manual,
    /// Reading the latch consumes it: the first
    /// [`crate::SpeechOutputAdapter::awaiting_response`] returning true
    /// clears it. For callers that treat the latch as a one-shot signal.
    ConsumeOnRead,
}

/// Speech adapter configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// Engine configuration (language, prosody, enable switch)
    pub tts: TtsConfig,
    /// Awaiting-response latch reset policy
    pub latch_reset: LatchResetPolicy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_source_behavior() {
        let config = SpeechConfig::default();
        assert!(config.tts.enabled);
        assert_eq!(config.tts.language, "en-US");
        assert_eq!(config.latch_reset, LatchResetPolicy::Manual);
    }
}
