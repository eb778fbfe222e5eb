//! eSpeak speech output engine for voxout
//!
//! Speaks through the `espeak` / `espeak-ng` command-line synthesizer. Each
//! utterance is a child process playing straight to the audio device;
//! [`QueueMode::Interrupt`] kills the active child before starting the next
//! one, which gives real flush semantics.

use async_trait::async_trait;
use regex::Regex;
use std::process::Stdio;
use std::sync::Arc;
use tokio::process::Command;
use tokio::sync::{broadcast, oneshot, Mutex};
use tracing::{debug, warn};
use voxout_tts::{QueueMode, TtsConfig, TtsEngine, TtsError, TtsResult, UtteranceEvent, UtteranceRequest};

mod tests;

/// Handle to the utterance currently playing
struct ActiveUtterance {
    id: u64,
    kill_tx: oneshot::Sender<()>,
}

pub struct EspeakEngine {
    config: TtsConfig,
    command: Option<String>,
    language: Option<String>,
    available_languages: Vec<String>,
    events: Option<broadcast::Sender<UtteranceEvent>>,
    active: Arc<Mutex<Option<ActiveUtterance>>>,
    is_initialized: bool,
}

impl Default for EspeakEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl EspeakEngine {
    pub fn new() -> Self {
        Self {
            config: TtsConfig::default(),
            command: None,
            language: None,
            available_languages: Vec::new(),
            events: None,
            active: Arc::new(Mutex::new(None)),
            is_initialized: false,
        }
    }

    /// Get the espeak command name (espeak or espeak-ng)
    async fn find_espeak_command() -> Option<String> {
        for cmd in ["espeak", "espeak-ng"] {
            if Command::new(cmd).arg("--version").output().await.is_ok() {
                return Some(cmd.to_string());
            }
        }
        None
    }

    /// Parse language tags out of `espeak --voices` output
    ///
    /// Format: Pty Language Age/Gender VoiceName File Other
    /// Example: 5  en-us          M  english-us         (en 2)
    fn parse_language_list(output: &str) -> Vec<String> {
        let voice_regex = Regex::new(r"^\s*\d+\s+([\w-]+)\s+").unwrap();
        output
            .lines()
            .skip(1) // Skip header
            .filter_map(|line| voice_regex.captures(line))
            .filter_map(|captures| captures.get(1).map(|m| m.as_str().to_lowercase()))
            .collect()
    }

    /// Check a language tag against the loaded voice list
    ///
    /// espeak tags are lowercase and sometimes only the primary subtag, so
    /// "en-US" matches both "en-us" and "en".
    fn supports_language(&self, tag: &str) -> bool {
        let normalized = tag.to_lowercase();
        let primary = normalized.split('-').next().unwrap_or(&normalized);
        self.available_languages
            .iter()
            .any(|lang| lang == &normalized || lang == primary)
    }

    /// Build espeak command arguments for one utterance
    fn build_args(&self, text: &str) -> Vec<String> {
        let mut args = Vec::new();

        if let Some(lang) = self.language.as_ref() {
            args.push("-v".to_string());
            args.push(lang.to_lowercase());
        }

        let rate = self.config.speech_rate.unwrap_or(180);
        args.push("-s".to_string());
        args.push(rate.to_string());

        let pitch = self.config.pitch.unwrap_or(1.0);
        let pitch_value = ((pitch * 50.0) as u32).min(100);
        args.push("-p".to_string());
        args.push(pitch_value.to_string());

        let volume = self.config.volume.unwrap_or(0.8);
        let volume_value = ((volume * 200.0) as u32).min(200);
        args.push("-a".to_string());
        args.push(volume_value.to_string());

        args.push(text.to_string());

        args
    }

    /// Kill the active utterance, if any, notifying its watcher task
    async fn preempt_active(&self) {
        let mut active = self.active.lock().await;
        if let Some(prev) = active.take() {
            debug!(target: "tts", utterance_id = prev.id, "preempting active utterance");
            let _ = prev.kill_tx.send(());
        }
    }
}

#[async_trait]
impl TtsEngine for EspeakEngine {
    fn name(&self) -> &str {
        "eSpeak"
    }

    async fn is_available(&self) -> bool {
        Self::find_espeak_command().await.is_some()
    }

    async fn initialize(
        &mut self,
        config: TtsConfig,
        events: broadcast::Sender<UtteranceEvent>,
    ) -> TtsResult<()> {
        let cmd = Self::find_espeak_command().await.ok_or_else(|| {
            TtsError::EngineNotAvailable(
                "eSpeak not found. Please install espeak or espeak-ng.".to_string(),
            )
        })?;

        match Command::new(&cmd).arg("--voices").output().await {
            Ok(output) => {
                let output_str = String::from_utf8_lossy(&output.stdout);
                self.available_languages = Self::parse_language_list(&output_str);
                debug!(
                    target: "tts",
                    "Loaded {} espeak languages",
                    self.available_languages.len()
                );
            }
            Err(e) => {
                warn!(target: "tts", "Failed to load espeak voices: {}", e);
                return Err(TtsError::InitializationError(format!(
                    "Failed to load voices: {}",
                    e
                )));
            }
        }

        self.config = config;
        self.command = Some(cmd);
        self.events = Some(events);
        self.is_initialized = true;
        Ok(())
    }

    async fn set_language(&mut self, tag: &str) -> TtsResult<()> {
        if !self.is_initialized {
            return Err(TtsError::InitializationError(
                "Engine not initialized".to_string(),
            ));
        }
        if !self.supports_language(tag) {
            return Err(TtsError::LanguageNotSupported(tag.to_string()));
        }
        self.language = Some(tag.to_string());
        Ok(())
    }

    async fn speak(&mut self, request: UtteranceRequest) -> TtsResult<()> {
        if !self.is_initialized {
            return Err(TtsError::InitializationError(
                "Engine not initialized".to_string(),
            ));
        }
        if request.text.trim().is_empty() {
            return Err(TtsError::InvalidInput("Empty text input".to_string()));
        }
        if request.mode == QueueMode::Enqueue {
            // espeak child processes have no queue to append to
            debug!(target: "tts", "Enqueue not supported by espeak, interrupting instead");
        }

        let cmd = self
            .command
            .clone()
            .ok_or_else(|| TtsError::EngineNotAvailable("eSpeak command not found".to_string()))?;
        let events = self
            .events
            .clone()
            .ok_or_else(|| TtsError::InitializationError("No event channel".to_string()))?;

        self.preempt_active().await;

        let args = self.build_args(&request.text);
        debug!(target: "tts", utterance_id = request.id, "Running espeak: {} {:?}", cmd, args);

        let mut child = Command::new(&cmd)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(TtsError::Io)?;

        let _ = events.send(UtteranceEvent::Started {
            utterance_id: request.id,
            text: request.text.clone(),
        });

        let (kill_tx, kill_rx) = oneshot::channel();
        {
            let mut active = self.active.lock().await;
            *active = Some(ActiveUtterance {
                id: request.id,
                kill_tx,
            });
        }

        // Watcher owns the child: reports completion, or kills it on preempt.
        let active_slot = Arc::clone(&self.active);
        let id = request.id;
        tokio::spawn(async move {
            tokio::select! {
                status = child.wait() => {
                    let event = match status {
                        Ok(s) if s.success() => UtteranceEvent::Completed { utterance_id: id },
                        Ok(s) => UtteranceEvent::Failed {
                            utterance_id: id,
                            error: format!("espeak exited with {}", s),
                        },
                        Err(e) => UtteranceEvent::Failed {
                            utterance_id: id,
                            error: format!("espeak wait failed: {}", e),
                        },
                    };
                    let _ = events.send(event);
                }
                _ = kill_rx => {
                    let _ = child.start_kill();
                    let _ = child.wait().await;
                    let _ = events.send(UtteranceEvent::Cancelled { utterance_id: id });
                }
            }
            // Clear the slot unless a newer utterance already replaced it
            let mut slot = active_slot.lock().await;
            if slot.as_ref().map(|a| a.id) == Some(id) {
                *slot = None;
            }
        });

        Ok(())
    }

    async fn stop(&mut self) -> TtsResult<()> {
        self.preempt_active().await;
        Ok(())
    }

    async fn shutdown(&mut self) -> TtsResult<()> {
        self.preempt_active().await;
        self.is_initialized = false;
        self.command = None;
        self.language = None;
        self.available_languages.clear();
        self.events = None;
        debug!(target: "tts", "eSpeak engine shutdown");
        Ok(())
    }
}
