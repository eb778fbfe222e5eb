//! Tests for the eSpeak engine

#[cfg(test)]
mod tests {
    use crate::EspeakEngine;
    use voxout_tts::{QueueMode, TtsEngine, TtsError, UtteranceRequest};

    #[tokio::test]
    async fn engine_creation() {
        let engine = EspeakEngine::new();
        assert_eq!(engine.name(), "eSpeak");
    }

    #[tokio::test]
    async fn availability_check_does_not_panic() {
        let engine = EspeakEngine::new();
        // The test environment may or may not have eSpeak installed;
        // just ensure the probe completes either way.
        let _is_available = engine.is_available().await;
    }

    #[test]
    fn parses_espeak_voice_list() {
        let output = "\
Pty Language Age/Gender VoiceName          File          Other Languages
 5  af             M  afrikaans          other/af
 5  en-us          M  english-us         en-us         (en 13)
 2  en-gb          M  english            en            (en-uk 2)
";
        let languages = EspeakEngine::parse_language_list(output);
        assert_eq!(languages, vec!["af", "en-us", "en-gb"]);
    }

    #[test]
    fn language_matching_ignores_case_and_region() {
        let mut engine = EspeakEngine::new();
        engine.available_languages = vec!["en-us".to_string(), "fr".to_string()];
        assert!(engine.supports_language("en-US"));
        assert!(engine.supports_language("en-us"));
        assert!(engine.supports_language("fr-FR")); // primary subtag fallback
        assert!(!engine.supports_language("de-DE"));
    }

    #[test]
    fn build_args_carries_language_and_prosody() {
        let mut engine = EspeakEngine::new();
        engine.language = Some("en-US".to_string());
        let args = engine.build_args("hello there");

        assert_eq!(args[0], "-v");
        assert_eq!(args[1], "en-us");
        assert!(args.contains(&"-s".to_string()));
        assert!(args.contains(&"180".to_string()));
        assert_eq!(args.last().unwrap(), "hello there");
        // No --stdout: audio goes straight to the output device
        assert!(!args.contains(&"--stdout".to_string()));
    }

    #[tokio::test]
    async fn set_language_requires_initialization() {
        let mut engine = EspeakEngine::new();
        let result = engine.set_language("en-US").await;
        assert!(matches!(result, Err(TtsError::InitializationError(_))));
    }

    #[tokio::test]
    async fn speak_requires_initialization() {
        let mut engine = EspeakEngine::new();
        let result = engine
            .speak(UtteranceRequest {
                id: 1,
                text: "hello".to_string(),
                mode: QueueMode::Interrupt,
            })
            .await;
        assert!(matches!(result, Err(TtsError::InitializationError(_))));
    }

    #[tokio::test]
    async fn shutdown_without_initialization_is_ok() {
        let mut engine = EspeakEngine::new();
        assert!(engine.shutdown().await.is_ok());
    }
}
