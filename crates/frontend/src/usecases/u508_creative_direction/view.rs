use super::config::CreativeDirectionConfig;
use super::file_uploader::FileUploader;
use super::store::{use_creative_direction, CreativeDirectionProvider};
use super::track;
use super::trust_toggle::TrustToggle;
use super::view_model::CreativeDirectionVm;
use super::vision_field::VisionField;
use crate::shared::icons::icon;
use crate::shared::notice::show_blocking_notice;
use contracts::usecases::u508_creative_direction::{AnalyticsEvent, CreativeDirectionState};
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use thaw::*;

/// Result of the host's continue handler, awaited before the button is released
pub type ContinueFuture = Pin<Box<dyn Future<Output = Result<(), String>>>>;

/// The creative direction step: provider + fields + navigation
#[component]
pub fn CreativeDirectionStep(
    #[prop(optional)] config: Option<CreativeDirectionConfig>,
    /// Replaces the restored state once on mount
    #[prop(optional)]
    initial_state: Option<CreativeDirectionState>,
    /// Disables "Continue" regardless of content
    #[prop(optional, into)]
    disabled: Signal<bool>,
    /// Snapshot of the general info step, sent as AI context
    #[prop(optional)]
    general_info: Option<Value>,
    /// Snapshot of the design style step, sent as AI context
    #[prop(optional)]
    design_style: Option<Value>,
    #[prop(optional)] on_state_change: Option<Callback<CreativeDirectionState>>,
    #[prop(optional)] on_back: Option<Callback<()>>,
    #[prop(optional)] on_continue: Option<Callback<CreativeDirectionState, ContinueFuture>>,
    #[prop(optional)] on_analytics: Option<Callback<AnalyticsEvent>>,
) -> impl IntoView {
    let config = config.unwrap_or_default();
    let storage_key = config.storage_key.clone();

    view! {
        <CreativeDirectionProvider
            storage_key=storage_key
            initial_state=initial_state
            on_state_change=on_state_change
        >
            <CreativeDirectionForm
                config=config
                disabled=disabled
                general_info=general_info
                design_style=design_style
                on_back=on_back
                on_continue=on_continue
                on_analytics=on_analytics
            />
        </CreativeDirectionProvider>
    }
}

#[component]
fn CreativeDirectionForm(
    config: CreativeDirectionConfig,
    disabled: Signal<bool>,
    general_info: Option<Value>,
    design_style: Option<Value>,
    on_back: Option<Callback<()>>,
    on_continue: Option<Callback<CreativeDirectionState, ContinueFuture>>,
    on_analytics: Option<Callback<AnalyticsEvent>>,
) -> impl IntoView {
    let ctx = use_creative_direction();
    let vm = CreativeDirectionVm::new();
    let config = StoredValue::new(config);
    let ai_context = StoredValue::new((general_info, design_style));

    let trust = Signal::derive(move || ctx.state().with(|s| s.trust_delegated));
    let has_content = Signal::derive(move || ctx.state().with(|s| s.has_content()));
    let can_continue = Signal::derive(move || {
        !vm.is_submitting.get() && ctx.state().with(|s| s.can_continue(disabled.get()))
    });

    let handle_clear = move |_| {
        ctx.reset();
        vm.reset();
        track(on_analytics, AnalyticsEvent::Cleared);
    };

    let handle_back = move |_| {
        track(on_analytics, AnalyticsEvent::Back);
        if let Some(on_back) = on_back {
            on_back.run(());
        }
    };

    let handle_continue = move |_| {
        let state = ctx.get_untracked();
        if vm.is_submitting.get_untracked() || !state.can_continue(disabled.get_untracked()) {
            return;
        }
        track(
            on_analytics,
            AnalyticsEvent::Continue {
                trust_delegated: state.trust_delegated,
                has_vision: !state.vision.trim().is_empty(),
                file_count: state.uploaded_files.len(),
            },
        );
        let Some(on_continue) = on_continue else {
            return;
        };

        vm.is_submitting.set(true);
        let pending = on_continue.run(state);
        spawn_local(async move {
            if let Err(e) = pending.await {
                log::error!("Continue handler failed: {}", e);
                show_blocking_notice(&e);
            }
            vm.is_submitting.set(false);
        });
    };

    view! {
        <div class="creative-direction">
            <div class="creative-direction__header">
                <h2 class="creative-direction__title">"Creative Direction"</h2>
                <p class="creative-direction__subtitle">
                    "Tell us how the result should look and feel, or leave it to the team."
                </p>
            </div>

            <TrustToggle on_analytics=on_analytics />

            <Show
                when=move || !trust.get()
                fallback=|| view! {
                    <div class="creative-direction__trust-note">
                        "Our designers will shape the creative direction from what you shared in the previous steps."
                    </div>
                }
            >
                <VisionField
                    vm=vm
                    config=config.get_value()
                    general_info=ai_context.with_value(|(info, _)| info.clone())
                    design_style=ai_context.with_value(|(_, style)| style.clone())
                />
                <FileUploader vm=vm config=config.get_value() on_analytics=on_analytics />
            </Show>

            <div class="creative-direction__actions">
                <Button appearance=ButtonAppearance::Secondary on_click=handle_back>
                    {icon("chevron-left")}
                    " Back"
                </Button>
                <Show when=move || has_content.get()>
                    <Button appearance=ButtonAppearance::Subtle on_click=handle_clear>
                        {icon("x")}
                        " Clear"
                    </Button>
                </Show>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=handle_continue
                    disabled=Signal::derive(move || !can_continue.get())
                >
                    {move || if vm.is_submitting.get() { "Saving..." } else { "Continue" }}
                    {icon("chevron-right")}
                </Button>
            </div>
        </div>
    }
}
