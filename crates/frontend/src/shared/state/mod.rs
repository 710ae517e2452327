pub mod form_state_manager;
pub mod storage;

pub use form_state_manager::FormStateStore;
pub use storage::{BrowserSessionStorage, MemoryStorage, StateStorage};
