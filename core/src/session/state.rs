use clickrush_types::PowerUpKind;

use crate::powerup::ActivePowerUp;

/// Session lifecycle: `Idle -> Active -> Ending -> Idle`.
///
/// `reset()` is a valid transition back to `Idle` from any phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    #[default]
    Idle,
    Active,
    Ending,
}

/// Pure storage for one timed challenge attempt.
/// Transition logic lives in `SessionController`.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    /// Set once at start, immutable for the session's lifetime.
    pub player_name: String,
    /// Effective limit in seconds; a SlowMo activation adds its bonus
    /// here once.
    pub time_limit_seconds: u64,
    /// Source of truth for elapsed time. Never accumulated from tick
    /// intervals.
    pub started_at_epoch_ms: i64,
    /// Local count for this session, including power-up multipliers.
    pub session_clicks: u64,
    /// At most one active power-up per session.
    pub active_power_up: Option<ActivePowerUp>,
    pub phase: SessionPhase,
}

/// Active power-up as seen by a display layer.
#[derive(Debug, Clone, PartialEq)]
pub struct PowerUpView {
    pub kind: PowerUpKind,
    pub remaining_secs: f64,
}

/// Derived display values, recomputed on demand from the clock.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub phase: SessionPhase,
    pub player_name: String,
    pub session_clicks: u64,
    /// Cumulative clicks across sessions in this process.
    pub total_clicks: u64,
    pub elapsed_secs: i64,
    /// Clamped at zero for display.
    pub remaining_secs: i64,
    pub clicks_per_second: f64,
    pub power_up: Option<PowerUpView>,
}
