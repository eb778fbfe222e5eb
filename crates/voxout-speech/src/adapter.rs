//! Speech output adapter
//!
//! Owns the TTS engine handle and the awaiting-response latch. Engine
//! initialization is asynchronous; `speak` consults the resulting state
//! instead of assuming the engine tolerates early calls.

use crate::config::{LatchResetPolicy, SpeechConfig};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{broadcast, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};
use voxout_tts::{next_utterance_id, QueueMode, TtsEngine, UtteranceEvent, UtteranceRequest};

const EVENT_BUFFER_SIZE: usize = 64;

/// Engine lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Constructed, initialization not yet resolved
    Uninitialized,
    /// Engine initialized, language configured
    Ready,
    /// Engine initialization failed; `speak` is a no-op
    Failed,
}

/// Mediates access to a TTS engine and exposes a minimal speak operation
///
/// Cloning is cheap and clones share all state, so a clone can be handed to
/// a background task while the embedding application keeps its own.
#[derive(Clone)]
pub struct SpeechOutputAdapter {
    config: SpeechConfig,
    engine: Arc<Mutex<Box<dyn TtsEngine>>>,
    state: Arc<RwLock<EngineState>>,
    awaiting_response: Arc<AtomicBool>,
    events: broadcast::Sender<UtteranceEvent>,
}

impl SpeechOutputAdapter {
    /// Wrap an engine. The adapter starts `Uninitialized` with the latch
    /// clear; call [`start`](Self::start) or [`initialize`](Self::initialize)
    /// to bring the engine up.
    pub fn new(engine: Box<dyn TtsEngine>, config: SpeechConfig) -> Self {
        let (events, _) = broadcast::channel(EVENT_BUFFER_SIZE);
        Self {
            config,
            engine: Arc::new(Mutex::new(engine)),
            state: Arc::new(RwLock::new(EngineState::Uninitialized)),
            awaiting_response: Arc::new(AtomicBool::new(false)),
            events,
        }
    }

    /// Spawn engine initialization in the background
    ///
    /// Fire-and-forget counterpart of [`initialize`](Self::initialize); the
    /// returned handle resolves to the state the adapter ended up in.
    pub fn start(&self) -> JoinHandle<EngineState> {
        let adapter = self.clone();
        tokio::spawn(async move { adapter.initialize().await })
    }

    /// Drive engine initialization and record the outcome
    ///
    /// On success the engine's language is set to the configured default.
    /// Failure is logged and recorded as [`EngineState::Failed`], never
    /// raised: subsequent `speak` calls become no-ops rather than errors.
    pub async fn initialize(&self) -> EngineState {
        let current = *self.state.read();
        if current != EngineState::Uninitialized {
            warn!(target: "speech", ?current, "initialize called more than once");
            return current;
        }

        let mut engine = self.engine.lock().await;
        let next = match engine
            .initialize(self.config.tts.clone(), self.events.clone())
            .await
        {
            Ok(()) => {
                let language = &self.config.tts.language;
                if let Err(e) = engine.set_language(language).await {
                    // Engine still speaks with its own default voice
                    warn!(target: "speech", %language, "failed to set language: {}", e);
                } else {
                    debug!(target: "speech", %language, "language configured");
                }
                info!(target: "speech", engine = engine.name(), "speech engine ready");
                EngineState::Ready
            }
            Err(e) => {
                warn!(target: "speech", engine = engine.name(), "engine initialization failed: {}", e);
                EngineState::Failed
            }
        };
        drop(engine);

        *self.state.write() = next;
        next
    }

    /// Current engine lifecycle state
    pub fn state(&self) -> EngineState {
        *self.state.read()
    }

    /// Speak `text`, flushing any utterance currently playing
    ///
    /// When `need_response` is true the awaiting-response latch is armed
    /// before synthesis is attempted, so it is set even if the engine is
    /// down. Never returns an error: problems are logged and the call is a
    /// no-op.
    pub async fn speak(&self, text: &str, need_response: bool) {
        if need_response {
            self.awaiting_response.store(true, Ordering::SeqCst);
        }

        if text.trim().is_empty() {
            warn!(target: "speech", "empty text, nothing to speak");
            return;
        }
        if !self.config.tts.enabled {
            debug!(target: "speech", "speech output disabled in configuration");
            return;
        }
        match self.state() {
            EngineState::Ready => {}
            state => {
                warn!(target: "speech", ?state, "speak ignored: engine not ready");
                return;
            }
        }

        let request = UtteranceRequest {
            id: next_utterance_id(),
            text: text.to_string(),
            mode: QueueMode::Interrupt,
        };
        let utterance_id = request.id;
        debug!(target: "speech", utterance_id, "speaking {} chars", text.len());

        let mut engine = self.engine.lock().await;
        if let Err(e) = engine.speak(request).await {
            error!(target: "speech", utterance_id, "synthesis request failed: {}", e);
        }
    }

    /// Whether the last spoken prompt expects an answer
    ///
    /// Under [`LatchResetPolicy::ConsumeOnRead`] a true read clears the
    /// latch; under [`LatchResetPolicy::Manual`] reads never change it.
    pub fn awaiting_response(&self) -> bool {
        match self.config.latch_reset {
            LatchResetPolicy::Manual => self.awaiting_response.load(Ordering::SeqCst),
            LatchResetPolicy::ConsumeOnRead => self.awaiting_response.swap(false, Ordering::SeqCst),
        }
    }

    /// Clear the awaiting-response latch
    ///
    /// The embedding application calls this once the expected response has
    /// been received and handled.
    pub fn clear_awaiting_response(&self) {
        self.awaiting_response.store(false, Ordering::SeqCst);
    }

    /// Subscribe to utterance progress events (started/completed/cancelled/failed)
    pub fn subscribe_events(&self) -> broadcast::Receiver<UtteranceEvent> {
        self.events.subscribe()
    }

    /// Stop the utterance currently playing, if any
    pub async fn stop(&self) {
        let mut engine = self.engine.lock().await;
        if let Err(e) = engine.stop().await {
            warn!(target: "speech", "stop failed: {}", e);
        }
    }

    /// Shut the engine down and release its resources
    pub async fn shutdown(&self) {
        let mut engine = self.engine.lock().await;
        if let Err(e) = engine.shutdown().await {
            warn!(target: "speech", "engine shutdown failed: {}", e);
        }
        *self.state.write() = EngineState::Uninitialized;
        info!(target: "speech", "speech adapter shut down");
    }
}
