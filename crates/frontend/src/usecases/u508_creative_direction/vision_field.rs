use super::api::{self, VisionContext};
use super::config::CreativeDirectionConfig;
use super::speech_button::SpeechButton;
use super::store::use_creative_direction;
use super::view_model::{self, CreativeDirectionVm};
use crate::shared::icons::icon;
use contracts::usecases::u508_creative_direction::limits::MAX_VISION_LENGTH;
use contracts::usecases::u508_creative_direction::{FormStatePatch, VisionButtonType};
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde_json::Value;
use thaw::*;
use wasm_bindgen::JsCast;

/// Creative vision textarea with AI assistance, undo and dictation
#[component]
pub fn VisionField(
    vm: CreativeDirectionVm,
    config: CreativeDirectionConfig,
    general_info: Option<Value>,
    design_style: Option<Value>,
) -> impl IntoView {
    let ctx = use_creative_direction();
    let ai_enabled = config.creative_vision_url().is_some();
    let speech_language = config.speech_language.clone();
    let config = StoredValue::new(config);
    let ai_context = StoredValue::new((general_info, design_style));

    let vision = Signal::derive(move || ctx.state().with(|s| s.vision.clone()));
    let is_blank = Signal::derive(move || ctx.state().with(|s| s.vision.trim().is_empty()));
    let char_count = move || ctx.state().with(|s| s.vision.chars().count());

    let handle_input = move |ev: web_sys::Event| {
        let value = event_target_value(&ev);
        if ctx.merge(FormStatePatch::vision(value)).is_err() {
            // Over the limit: the stored text stays, put it back into the field
            if let Some(textarea) = ev
                .target()
                .and_then(|t| t.dyn_into::<web_sys::HtmlTextAreaElement>().ok())
            {
                textarea.set_value(&ctx.get_untracked().vision);
            }
        }
    };

    let run_ai = move |mode: VisionButtonType| {
        let state = ctx.get_untracked();
        let (general_info, design_style) = ai_context.get_value();
        let context = VisionContext {
            general_info,
            design_style,
            current_vision: state.vision,
            trust_delegated: state.trust_delegated,
        };
        let config = config.get_value();
        let ticket = vm.begin_generation();

        spawn_local(async move {
            let result = match mode {
                VisionButtonType::FeelingLucky => api::feeling_lucky(&context, &config).await,
                VisionButtonType::Enhance => api::enhance(&context, &config).await,
            };
            if !vm.finish_generation(ticket) {
                return;
            }
            let applied = result.and_then(|vision| {
                let state = ctx.get_untracked();
                let mut patch = Err(String::new());
                vm.undo.update(|slot| {
                    patch = view_model::apply_vision_result(&state, mode, vision, slot)
                });
                ctx.merge(patch?).map_err(|e| e.to_string())
            });
            if let Err(e) = applied {
                vm.vision_error.set(Some(e));
            }
        });
    };

    let handle_undo = move |_| {
        let mut patch = None;
        vm.undo.update(|slot| patch = view_model::undo_vision(slot));
        if let Some(patch) = patch {
            if let Err(e) = ctx.merge(patch) {
                log::warn!("Undo rejected: {}", e);
            }
        }
    };

    let on_transcript = Callback::new(move |text: String| {
        let state = ctx.get_untracked();
        if text == state.vision {
            return;
        }
        let mut patch = Err(String::new());
        vm.undo.update(|slot| {
            patch = view_model::replace_vision(&state, text, state.vision.clone(), slot)
        });
        if let Err(e) = patch.and_then(|p| ctx.merge(p).map_err(|e| e.to_string())) {
            vm.vision_error.set(Some(e));
        }
    });

    view! {
        <div class="creative-direction__vision">
            <label class="creative-direction__label" for="creative-vision">
                "Describe your creative vision"
            </label>
            <textarea
                id="creative-vision"
                class="creative-direction__textarea"
                rows=6
                maxlength=MAX_VISION_LENGTH
                placeholder="Colors, mood, references, things to avoid..."
                prop:value=move || vision.get()
                on:input=handle_input
            ></textarea>

            <div class="creative-direction__vision-footer">
                <span class="creative-direction__counter">
                    {move || format!("{} / {}", char_count(), MAX_VISION_LENGTH)}
                </span>

                <Space>
                    <SpeechButton
                        on_transcript=on_transcript
                        current_text=vision
                        lang=speech_language
                        disabled=vm.is_generating
                        cancel_on=vm.clear_epoch
                    />

                    <Show when=move || vm.can_undo()>
                        <Button
                            appearance=ButtonAppearance::Subtle
                            on_click=handle_undo
                            disabled=Signal::derive(move || vm.is_generating.get())
                        >
                            {icon("undo")}
                            " Undo"
                        </Button>
                    </Show>

                    <Show when=move || ai_enabled>
                        {move || if is_blank.get() {
                            view! {
                                <Button
                                    appearance=ButtonAppearance::Secondary
                                    on_click=move |_| run_ai(VisionButtonType::FeelingLucky)
                                    disabled=Signal::derive(move || vm.is_generating.get())
                                >
                                    {icon("sparkles")}
                                    " Feeling Lucky"
                                </Button>
                            }.into_any()
                        } else {
                            view! {
                                <Button
                                    appearance=ButtonAppearance::Secondary
                                    on_click=move |_| run_ai(VisionButtonType::Enhance)
                                    disabled=Signal::derive(move || vm.is_generating.get())
                                >
                                    {icon("wand")}
                                    " Enhance"
                                </Button>
                            }.into_any()
                        }}
                    </Show>

                    <Show when=move || vm.is_generating.get()>
                        <Spinner />
                    </Show>
                </Space>
            </div>

            {move || vm.vision_error.get().map(|e| view! {
                <div class="warning-box warning-box--error">
                    <span class="warning-box__icon">"⚠"</span>
                    <span class="warning-box__text">{e}</span>
                </div>
            })}
        </div>
    }
}
