use crate::shared::icons::icon;
use crate::shared::speech::use_speech_input;
use leptos::prelude::*;

/// Microphone button for dictating into a text field.
///
/// Renders nothing when the browser has no speech recognition. Each
/// finalized segment is passed to `on_transcript` as `current_text` (at the
/// moment dictation started) followed by everything recognized so far.
#[component]
pub fn SpeechButton(
    on_transcript: Callback<String>,
    current_text: Signal<String>,
    lang: String,
    #[prop(optional, into)] disabled: Signal<bool>,
    /// Any change cancels dictation in progress (e.g. the form was cleared)
    #[prop(optional, into)]
    cancel_on: Signal<u64>,
) -> impl IntoView {
    let speech = use_speech_input(lang, on_transcript);
    if !speech.is_supported {
        return ().into_any();
    }

    Effect::new(move |previous: Option<u64>| {
        let epoch = cancel_on.get();
        if previous.is_some_and(|previous| previous != epoch) {
            speech.cancel();
        }
        epoch
    });

    let listening = speech.is_listening;
    let handle_click = move |_| {
        speech.toggle(Some(current_text.get_untracked()));
    };

    view! {
        <div class="speech-input">
            <button
                type="button"
                class=move || if listening.get() { "button button--icon speech-input__btn speech-input__btn--active" } else { "button button--icon speech-input__btn" }
                title=move || if listening.get() { "Stop dictation" } else { "Dictate" }
                disabled=move || disabled.get()
                on:click=handle_click
            >
                {move || if listening.get() { icon("mic-off") } else { icon("mic") }}
            </button>
            <Show when=move || listening.get()>
                <span class="speech-input__live">
                    {move || {
                        let heard = speech.transcript.get();
                        if heard.is_empty() { "Listening…".to_string() } else { live_preview(&heard) }
                    }}
                </span>
            </Show>
            {move || speech.error.get().map(|e| view! {
                <span class="speech-input__error">{e}</span>
            })}
        </div>
    }
    .into_any()
}

const PREVIEW_CHARS: usize = 60;

/// Tail of the live transcript, the seed text is usually long
fn live_preview(text: &str) -> String {
    let count = text.chars().count();
    if count <= PREVIEW_CHARS {
        return text.to_string();
    }
    let tail: String = text.chars().skip(count - PREVIEW_CHARS).collect();
    format!("…{}", tail.trim_start())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_live_preview() {
        assert_eq!(live_preview("bold colors"), "bold colors");
        let long = format!("{} and clean type", "x".repeat(100));
        let preview = live_preview(&long);
        assert!(preview.starts_with('…'));
        assert!(preview.ends_with("and clean type"));
        assert_eq!(preview.chars().count(), PREVIEW_CHARS + 1);
    }
}
