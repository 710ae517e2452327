//! Transcript bookkeeping of one dictation session, independent of the browser

/// One entry of `SpeechRecognitionEvent.results`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognitionSegment {
    pub text: String,
    pub is_final: bool,
}

impl RecognitionSegment {
    pub fn interim(text: &str) -> Self {
        Self {
            text: text.to_string(),
            is_final: false,
        }
    }

    pub fn finalized(text: &str) -> Self {
        Self {
            text: text.to_string(),
            is_final: true,
        }
    }
}

/// Outcome of applying a recognition event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechUpdate {
    /// Text to show right now (prefix + finalized, or + interim while speaking)
    pub transcript: String,
    /// Set only when this event finalized something: prefix + all finalized text
    pub finalized: Option<String>,
}

/// Idle -> Listening on `begin`, back to Idle on `stop`/`end`.
///
/// `stop` only drops the listening flag: the recognizer still delivers the
/// last final result before its `end` event, so results are accepted until
/// `end`.
#[derive(Debug, Clone, Default)]
pub struct SpeechSession {
    listening: bool,
    active: bool,
    prefix: String,
    final_text: String,
    transcript: String,
}

fn join_text(left: &str, right: &str) -> String {
    let left = left.trim_end();
    let right = right.trim();
    match (left.is_empty(), right.is_empty()) {
        (true, _) => right.to_string(),
        (_, true) => left.to_string(),
        _ => format!("{} {}", left, right),
    }
}

impl SpeechSession {
    pub fn is_listening(&self) -> bool {
        self.listening
    }

    /// A session is running (possibly stopping, waiting for `end`)
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    /// Start a session. `seed` becomes the prefix results are appended to.
    /// Returns false when a session is still running.
    pub fn begin(&mut self, seed: Option<&str>) -> bool {
        if self.active {
            return false;
        }
        self.active = true;
        self.listening = true;
        self.prefix = seed.unwrap_or_default().to_string();
        self.final_text.clear();
        self.transcript = self.prefix.trim().to_string();
        true
    }

    pub fn stop(&mut self) {
        self.listening = false;
    }

    /// Session is over (`end`, `error` or abort): clear the prefix
    pub fn end(&mut self) {
        self.listening = false;
        self.active = false;
        self.prefix.clear();
        self.final_text.clear();
    }

    /// Apply the segments of one event, starting at its `resultIndex`
    pub fn apply(&mut self, segments: &[RecognitionSegment]) -> Option<SpeechUpdate> {
        if !self.active {
            return None;
        }
        let mut interim = String::new();
        let mut finalized_now = false;
        for segment in segments {
            if segment.is_final {
                self.final_text = join_text(&self.final_text, &segment.text);
                finalized_now = true;
            } else {
                interim = join_text(&interim, &segment.text);
            }
        }

        let body = if interim.is_empty() {
            self.final_text.clone()
        } else {
            join_text(&self.final_text, &interim)
        };
        self.transcript = join_text(&self.prefix, &body);

        let finalized = finalized_now.then(|| join_text(&self.prefix, &self.final_text));
        Some(SpeechUpdate {
            transcript: self.transcript.clone(),
            finalized,
        })
    }

    /// Abandon the session: its prefix and results are never delivered
    pub fn cancel(&mut self) {
        self.end();
        self.transcript.clear();
    }

    pub fn reset_transcript(&mut self) {
        self.final_text.clear();
        self.transcript.clear();
    }
}
