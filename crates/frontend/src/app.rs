use crate::usecases::u508_creative_direction::{
    ContinueFuture, CreativeDirectionConfig, CreativeDirectionStep,
};
use contracts::usecases::u508_creative_direction::{AnalyticsEvent, CreativeDirectionState};
use leptos::prelude::*;

/// Standalone host for the creative direction step.
///
/// Settings may be injected by the page as a JSON `<script id="creative-direction-config">`.
#[component]
pub fn App() -> impl IntoView {
    let config = load_config();

    let on_back = Callback::new(|_: ()| log::info!("Back to the previous step"));
    let on_continue = Callback::new(|state: CreativeDirectionState| -> ContinueFuture {
        Box::pin(async move {
            log::info!(
                "Creative direction submitted: trust={}, files={}",
                state.trust_delegated,
                state.uploaded_files.len()
            );
            Ok(())
        })
    });
    let on_analytics = Callback::new(|event: AnalyticsEvent| {
        log::info!("{} {}", event.name(), event.properties());
    });

    view! {
        <main class="app">
            <CreativeDirectionStep
                config=config
                on_back=on_back
                on_continue=on_continue
                on_analytics=on_analytics
            />
        </main>
    }
}

fn load_config() -> CreativeDirectionConfig {
    let raw = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id("creative-direction-config"))
        .and_then(|el| el.text_content());
    match raw {
        Some(raw) => CreativeDirectionConfig::from_json(&raw).unwrap_or_else(|e| {
            log::warn!("{}, using defaults", e);
            CreativeDirectionConfig::default()
        }),
        None => CreativeDirectionConfig::default(),
    }
}
