//! Interactive browsing: explicit view state, a pure event reducer, and a
//! debouncer for search input.

mod debounce;
mod state;

pub use debounce::{Debouncer, SEARCH_DEBOUNCE};
pub use state::{AppState, Effect, UiEvent, apply};
