//! Speak one prompt through espeak and watch the utterance events.
//!
//! Requires espeak or espeak-ng on PATH.

use voxout_speech::{EngineState, SpeechConfig, SpeechOutputAdapter};
use voxout_tts::UtteranceEvent;
use voxout_tts_espeak::EspeakEngine;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().init();

    let engine = EspeakEngine::new();
    let adapter = SpeechOutputAdapter::new(Box::new(engine), SpeechConfig::default());
    let mut events = adapter.subscribe_events();

    // Initialization runs in the background, as the embedding app would use it
    let state = adapter.start().await?;
    if state != EngineState::Ready {
        eprintln!("speech engine unavailable ({:?}), nothing to do", state);
        return Ok(());
    }

    adapter.speak("Hello from voxout. Anything else I can do?", true).await;

    while let Ok(event) = events.recv().await {
        println!("event: {:?}", event);
        match event {
            UtteranceEvent::Completed { .. }
            | UtteranceEvent::Cancelled { .. }
            | UtteranceEvent::Failed { .. } => break,
            UtteranceEvent::Started { .. } => {}
        }
    }

    println!("awaiting response: {}", adapter.awaiting_response());
    adapter.shutdown().await;
    Ok(())
}
