//! Single-writer state container.
//!
//! [`Store`] owns the current [`AppState`] snapshot. Readers get a shared
//! borrow; the only way to change state is [`Store::dispatch`], which runs
//! the pure [`reduce`] transition to completion before returning.

mod action;
mod reducer;
mod state;

pub use action::Action;
pub use reducer::reduce;
pub use state::AppState;

pub struct Store {
    state: AppState,
}

impl Store {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn dispatch(&mut self, action: Action) {
        self.state = reduce(self.state.clone(), action);
    }

    pub fn into_state(self) -> AppState {
        self.state
    }
}
