//! Speech output adapter for voxout
//!
//! Wraps a pluggable [`voxout_tts::TtsEngine`] behind a small state machine:
//! the adapter drives asynchronous engine initialization, speaks text with
//! flush semantics, arms an "awaiting response" latch for the embedding
//! application, and re-broadcasts utterance progress events.

pub mod adapter;
pub mod config;

pub use adapter::{EngineState, SpeechOutputAdapter};
pub use config::{LatchResetPolicy, SpeechConfig};
