pub mod controller;
pub mod state;

#[cfg(test)]
mod controller_tests;

pub use controller::{ClickOutcome, SessionController, SessionNotice};
pub use state::{PowerUpView, SessionPhase, SessionSnapshot, SessionState};
