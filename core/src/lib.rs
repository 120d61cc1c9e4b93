pub mod clock;
pub mod error;
pub mod powerup;
pub mod remote;
pub mod rng;
pub mod session;

// Re-exports for convenience
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::SessionError;
pub use remote::{HttpClickService, RecordOutcome, RemoteError};
pub use rng::{ClickRng, GameRng, ScriptedRng};
pub use session::{
    ClickOutcome, SessionController, SessionNotice, SessionPhase, SessionSnapshot,
};
