//! Voice dictation for text fields.
//!
//! `use_speech_input` wraps the browser recognizer behind start/stop/toggle
//! controls. When the browser has no speech recognition every control is a
//! no-op and `is_supported` is false, so callers hide their button.

pub mod errors;
pub mod recognizer;
pub mod session;

use leptos::prelude::*;
use recognizer::{BrowserRecognizer, RecognizerHandlers};
use session::SpeechSession;

pub use errors::{speech_error_message, SESSION_BUSY_MESSAGE};
pub use recognizer::is_speech_supported;

#[derive(Clone, Copy)]
pub struct SpeechInput {
    pub is_supported: bool,
    pub is_listening: RwSignal<bool>,
    /// Finalized text, or interim text while the user is speaking
    pub transcript: RwSignal<String>,
    pub error: RwSignal<Option<String>>,
    session: StoredValue<SpeechSession>,
    recognizer: StoredValue<Option<BrowserRecognizer>, LocalStorage>,
    lang: StoredValue<String>,
    on_transcript: Callback<String>,
}

/// Create a speech input bound to the current component.
///
/// `on_transcript` receives the seed plus every finalized word so far, each
/// time a segment is finalized. Interim results only update `transcript`.
pub fn use_speech_input(lang: impl Into<String>, on_transcript: Callback<String>) -> SpeechInput {
    let input = SpeechInput {
        is_supported: is_speech_supported(),
        is_listening: RwSignal::new(false),
        transcript: RwSignal::new(String::new()),
        error: RwSignal::new(None),
        session: StoredValue::new(SpeechSession::default()),
        recognizer: StoredValue::new_local(None),
        lang: StoredValue::new(lang.into()),
        on_transcript,
    };

    on_cleanup(move || {
        input.recognizer.try_update_value(|recognizer| {
            if let Some(recognizer) = recognizer.take() {
                recognizer.abort();
            }
        });
        input.session.try_update_value(|s| s.end());
    });

    input
}

impl SpeechInput {
    fn handlers(self) -> RecognizerHandlers {
        RecognizerHandlers {
            on_result: Box::new(move |segments| {
                let update = self
                    .session
                    .try_update_value(|s| s.apply(&segments))
                    .flatten();
                if let Some(update) = update {
                    self.transcript.set(update.transcript);
                    if let Some(text) = update.finalized {
                        self.on_transcript.run(text);
                    }
                }
            }),
            on_error: Box::new(move |code| {
                log::warn!("Speech recognition error: {}", code);
                self.error.set(Some(speech_error_message(&code)));
                self.session.update_value(|s| s.end());
                self.is_listening.set(false);
            }),
            on_end: Box::new(move || {
                log::debug!("Speech recognition session ended");
                self.session.update_value(|s| s.end());
                self.is_listening.set(false);
            }),
        }
    }

    pub fn start(self) {
        self.start_with_seed(None);
    }

    fn start_with_seed(self, seed: Option<String>) {
        if !self.is_supported {
            return;
        }
        let began = self
            .session
            .try_update_value(|s| s.begin(seed.as_deref()))
            .unwrap_or(false);
        if !began {
            log::debug!("Speech recognition still stopping, start ignored");
            self.error.set(Some(SESSION_BUSY_MESSAGE.to_string()));
            return;
        }

        let lang = self.lang.get_value();
        let started = BrowserRecognizer::new(&lang, self.handlers()).and_then(|recognizer| {
            recognizer.start()?;
            Ok(recognizer)
        });

        match started {
            Ok(recognizer) => {
                // Replacing the previous recognizer drops (and detaches) it
                self.recognizer.set_value(Some(recognizer));
                self.error.set(None);
                self.transcript
                    .set(self.session.with_value(|s| s.transcript().to_string()));
                self.is_listening.set(true);
            }
            Err(e) => {
                log::error!("Failed to start speech recognition: {}", e);
                self.session.update_value(|s| s.end());
                self.error.set(Some(e));
                self.is_listening.set(false);
            }
        }
    }

    pub fn stop(self) {
        if !self.is_supported {
            return;
        }
        self.session.update_value(|s| s.stop());
        self.is_listening.set(false);
        self.recognizer.with_value(|recognizer| {
            if let Some(recognizer) = recognizer {
                recognizer.stop();
            }
        });
    }

    /// Stop when listening, otherwise start with `seed` as the text prefix
    pub fn toggle(self, seed: Option<String>) {
        if self.is_listening.get_untracked() {
            self.stop();
        } else {
            self.start_with_seed(seed);
        }
    }

    /// Abort the running session without delivering anything more
    pub fn cancel(self) {
        if !self.is_supported {
            return;
        }
        // Dropping the recognizer detaches its handlers before aborting
        self.recognizer.set_value(None);
        self.session.update_value(|s| s.cancel());
        self.is_listening.set(false);
        self.transcript.set(String::new());
        self.error.set(None);
    }

    pub fn reset_transcript(self) {
        self.session.update_value(|s| s.reset_transcript());
        self.transcript.set(String::new());
    }
}
