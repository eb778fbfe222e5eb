//! Text-to-speech abstraction layer for voxout
//!
//! This crate provides the foundational types and traits for speech output,
//! including the engine trait, utterance events, configuration, and errors.

use std::sync::atomic::{AtomicU64, Ordering};

pub mod engine;
pub mod error;
pub mod types;

pub use engine::{TtsEngine, UtteranceEvent};
pub use error::{TtsError, TtsResult};
pub use types::{QueueMode, TtsConfig, UtteranceRequest};

/// Generates unique utterance IDs
static UTTERANCE_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Generate a unique utterance ID
///
/// IDs are process-wide and strictly increasing, so progress events can be
/// correlated with the `speak` call that produced them.
pub fn next_utterance_id() -> u64 {
    UTTERANCE_ID_COUNTER.fetch_add(1, Ordering::SeqCst)
}

#[cfg(test)]
mod tests {
    use super::next_utterance_id;

    #[test]
    fn utterance_ids_are_unique_and_increasing() {
        let a = next_utterance_id();
        let b = next_utterance_id();
        let c = next_utterance_id();
        assert!(a < b && b < c);
    }
}
