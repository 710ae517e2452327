use super::store::use_creative_direction;
use super::track;
use contracts::usecases::u508_creative_direction::{AnalyticsEvent, FormStatePatch};
use leptos::prelude::*;

/// "Trust the team" switch. Vision and files are kept when it is turned on.
#[component]
pub fn TrustToggle(on_analytics: Option<Callback<AnalyticsEvent>>) -> impl IntoView {
    let ctx = use_creative_direction();
    let checked = move || ctx.state().with(|s| s.trust_delegated);

    let handle_change = move |ev: web_sys::Event| {
        let enabled = event_target_checked(&ev);
        if ctx.merge(FormStatePatch::trust_delegated(enabled)).is_ok() {
            track(on_analytics, AnalyticsEvent::TrustToggled { enabled });
        }
    };

    view! {
        <div class="creative-direction__trust">
            <label class="creative-direction__switch">
                <input
                    type="checkbox"
                    role="switch"
                    prop:checked=checked
                    on:change=handle_change
                />
                <span class="creative-direction__switch-track"></span>
                <span class="creative-direction__switch-label">
                    "I trust the team with the creative direction"
                </span>
            </label>
            <p class="creative-direction__hint">
                "Skip the brief and let our designers decide. You can still change your mind later."
            </p>
        </div>
    }
}
