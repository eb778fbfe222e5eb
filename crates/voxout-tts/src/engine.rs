//! TTS engine abstraction and utterance progress events

use crate::error::TtsResult;
use crate::types::{TtsConfig, UtteranceRequest};
use async_trait::async_trait;
use tokio::sync::broadcast;

/// Utterance progress events
///
/// Engines report the lifecycle of every utterance on the broadcast channel
/// handed to [`TtsEngine::initialize`]. The embedding application subscribes
/// to these instead of registering fixed listener callbacks.
#[derive(Debug, Clone)]
pub enum UtteranceEvent {
    /// Playback started for the given text
    Started { utterance_id: u64, text: String },
    /// Playback finished normally
    Completed { utterance_id: u64 },
    /// Playback was preempted by a newer utterance or an explicit stop
    Cancelled { utterance_id: u64 },
    /// Playback failed with error
    Failed { utterance_id: u64, error: String },
}

/// Core TTS engine interface
///
/// Implementations provide specific speech output backends (espeak, platform
/// synthesizers, test fakes). An engine must not be asked to speak before
/// `initialize` has returned `Ok`.
#[async_trait]
pub trait TtsEngine: Send + Sync {
    /// Get engine name/identifier
    fn name(&self) -> &str;

    /// Check if the engine is available on this system
    async fn is_available(&self) -> bool;

    /// Initialize the engine with configuration
    ///
    /// `events` is where the engine reports utterance progress from now on.
    async fn initialize(
        &mut self,
        config: TtsConfig,
        events: broadcast::Sender<UtteranceEvent>,
    ) -> TtsResult<()>;

    /// Set the language used for subsequent utterances
    async fn set_language(&mut self, tag: &str) -> TtsResult<()>;

    /// Start speaking an utterance
    ///
    /// Returns once playback has been started; completion, cancellation and
    /// failure are reported as [`UtteranceEvent`]s.
    async fn speak(&mut self, request: UtteranceRequest) -> TtsResult<()>;

    /// Stop the utterance currently playing, if any
    async fn stop(&mut self) -> TtsResult<()>;

    /// Shutdown the engine and cleanup resources
    async fn shutdown(&mut self) -> TtsResult<()>;
}
