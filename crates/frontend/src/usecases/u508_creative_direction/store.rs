//! Creative direction form state, provided through context.
//!
//! The provider owns a [`FormStateStore`] backed by sessionStorage and
//! mirrors it into a signal for rendering. Components below it mutate the
//! form only through `merge`, `replace` and `reset`.

use crate::shared::state::form_state_manager::{FormStateStore, DEFAULT_STORAGE_KEY};
use crate::shared::state::storage::BrowserSessionStorage;
use contracts::usecases::u508_creative_direction::{
    CreativeDirectionState, FormStatePatch, StateError,
};
use leptos::prelude::*;

#[derive(Clone, Copy)]
pub struct CreativeDirectionContext {
    state: RwSignal<CreativeDirectionState>,
    store: StoredValue<FormStateStore<BrowserSessionStorage>>,
    on_state_change: Option<Callback<CreativeDirectionState>>,
}

impl CreativeDirectionContext {
    pub fn new(storage_key: &str, on_state_change: Option<Callback<CreativeDirectionState>>) -> Self {
        let store = FormStateStore::new(BrowserSessionStorage, storage_key);
        Self {
            state: RwSignal::new(store.state().clone()),
            store: StoredValue::new(store),
            on_state_change,
        }
    }

    /// Current state (tracked)
    pub fn state(&self) -> Signal<CreativeDirectionState> {
        self.state.into()
    }

    pub fn get_untracked(&self) -> CreativeDirectionState {
        self.state.get_untracked()
    }

    pub fn merge(&self, patch: FormStatePatch) -> Result<(), StateError> {
        let mut result = Ok(());
        self.store.update_value(|store| result = store.merge(patch));
        if result.is_ok() {
            self.publish();
        }
        result
    }

    pub fn replace(&self, full: CreativeDirectionState) -> Result<(), StateError> {
        let mut result = Ok(());
        self.store.update_value(|store| result = store.replace(full));
        if result.is_ok() {
            self.publish();
        }
        result
    }

    pub fn reset(&self) {
        self.store.update_value(|store| store.reset());
        self.publish();
    }

    fn publish(&self) {
        let snapshot = self.store.with_value(|store| store.state().clone());
        self.state.set(snapshot.clone());
        if let Some(on_state_change) = self.on_state_change {
            on_state_change.run(snapshot);
        }
    }
}

/// Provides [`CreativeDirectionContext`] to its children
#[component]
pub fn CreativeDirectionProvider(
    /// sessionStorage key, defaults to "creative-direction-form"
    #[prop(optional, into)]
    storage_key: Option<String>,
    /// Seeds the form once on mount, replacing whatever was restored
    #[prop(default = None)]
    initial_state: Option<CreativeDirectionState>,
    /// Called with the new state after every change
    #[prop(default = None)]
    on_state_change: Option<Callback<CreativeDirectionState>>,
    children: Children,
) -> impl IntoView {
    let key = storage_key.unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_string());
    let ctx = CreativeDirectionContext::new(&key, on_state_change);
    if let Some(initial) = initial_state {
        if let Err(e) = ctx.replace(initial) {
            log::error!("Initial creative direction state ignored: {}", e);
        }
    }
    provide_context(ctx);

    children()
}

/// Hook to use the creative direction context.
pub fn use_creative_direction() -> CreativeDirectionContext {
    use_context::<CreativeDirectionContext>()
        .expect("CreativeDirectionContext not found. Wrap the step with CreativeDirectionProvider.")
}
