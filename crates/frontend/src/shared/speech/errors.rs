/// Shown when dictation is restarted before the previous session has ended
pub const SESSION_BUSY_MESSAGE: &str = "Still finishing the previous dictation. Try again in a moment.";

/// Map a `SpeechRecognitionErrorEvent.error` code to a message for the user
pub fn speech_error_message(code: &str) -> String {
    let message = match code {
        "no-speech" => "No speech was detected. Please try again.",
        "audio-capture" => "No microphone was found. Check that a microphone is connected.",
        "not-allowed" => "Microphone access was denied. Allow microphone access to use voice input.",
        "network" => "Network error during speech recognition. Check your connection.",
        "aborted" => "Speech recognition was stopped.",
        "language-not-supported" => "The selected language is not supported for voice input.",
        "service-not-allowed" => "Speech recognition is not allowed in this browser.",
        other => return format!("Speech recognition error: {}", other),
    };
    message.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes() {
        for code in [
            "no-speech",
            "audio-capture",
            "not-allowed",
            "network",
            "aborted",
            "language-not-supported",
            "service-not-allowed",
        ] {
            assert!(!speech_error_message(code).contains(code), "{}", code);
        }
        assert!(speech_error_message("not-allowed").contains("denied"));
    }

    #[test]
    fn test_unknown_code_templated() {
        assert_eq!(
            speech_error_message("bad-grammar"),
            "Speech recognition error: bad-grammar"
        );
    }
}
