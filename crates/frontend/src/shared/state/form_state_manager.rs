use super::storage::StateStorage;
use contracts::usecases::u508_creative_direction::{
    CreativeDirectionState, FormStatePatch, StateError,
};

/// Storage key of the creative direction form
pub const DEFAULT_STORAGE_KEY: &str = "creative-direction-form";

/// FormStateStore owns the creative direction state and persists it.
///
/// Every mutation goes through `merge`, `replace` or `reset`, and each of
/// them writes the resulting state to storage before returning.
#[derive(Clone, Debug)]
pub struct FormStateStore<S: StateStorage> {
    key: String,
    state: CreativeDirectionState,
    storage: S,
}

impl<S: StateStorage> FormStateStore<S> {
    /// Create the store, hydrating from storage when a valid snapshot exists
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let state = Self::hydrate(&storage, &key).unwrap_or_default();
        Self {
            key,
            state,
            storage,
        }
    }

    fn hydrate(storage: &S, key: &str) -> Option<CreativeDirectionState> {
        let raw = storage.get_item(key)?;
        let parsed = match serde_json::from_str::<CreativeDirectionState>(&raw) {
            Ok(state) => state,
            Err(e) => {
                log::warn!("Discarding unreadable form state '{}': {}", key, e);
                return None;
            }
        };
        match parsed.validated() {
            Ok(state) => {
                log::debug!("Form state '{}' restored from storage", key);
                Some(state)
            }
            Err(e) => {
                log::warn!("Discarding stored form state '{}': {}", key, e);
                None
            }
        }
    }

    pub fn state(&self) -> &CreativeDirectionState {
        &self.state
    }

    /// Shallow-merge a patch. A rejected patch leaves state and storage untouched.
    pub fn merge(&mut self, patch: FormStatePatch) -> Result<(), StateError> {
        let next = self.state.merged(patch).map_err(|e| {
            log::warn!("Form state update rejected: {}", e);
            e
        })?;
        self.commit(next);
        Ok(())
    }

    /// Replace the whole state (seeding from host-supplied initial state)
    pub fn replace(&mut self, full: CreativeDirectionState) -> Result<(), StateError> {
        let next = full.validated().map_err(|e| {
            log::warn!("Initial form state rejected: {}", e);
            e
        })?;
        self.commit(next);
        Ok(())
    }

    /// Restore defaults
    pub fn reset(&mut self) {
        self.commit(CreativeDirectionState::default());
    }

    fn commit(&mut self, next: CreativeDirectionState) {
        self.state = next;
        match serde_json::to_string(&self.state) {
            Ok(json) => self.storage.set_item(&self.key, &json),
            Err(e) => log::error!("Failed to serialize form state: {}", e),
        }
    }
}
