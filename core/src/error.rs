use thiserror::Error;

/// Local validation and lifecycle errors for the session controller.
///
/// Nothing here is fatal; callers surface the message and carry on.
/// Remote-service failures are a separate taxonomy (`RemoteError`) and
/// never reach the session state machine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("player name cannot be empty")]
    EmptyName,

    #[error("time limit must be at least one second")]
    InvalidTimeLimit,

    #[error("no active session")]
    NotActive,
}
