//! Session controller: the timed-challenge state machine.
//!
//! Owns all per-session mutable state and processes the discrete event
//! stream (clicks, ticks, remote responses) on a single logical thread.
//! Remote bookkeeping is decoupled: `register_click()` hands back the
//! wire payload for the driver to send fire-and-forget, and a late or
//! failed response can only ever add a notice, never touch the
//! counters.

use clickrush_types::{PowerUpKind, RecordClickRequest};
use tracing::{debug, info};

use crate::clock::Clock;
use crate::error::SessionError;
use crate::powerup::{ActivePowerUp, SLOW_MO_BONUS_SECS};
use crate::rng::ClickRng;

use super::state::{PowerUpView, SessionPhase, SessionSnapshot, SessionState};

/// User-facing events produced by the state machine, drained by the
/// driving loop.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionNotice {
    PowerUpActivated { kind: PowerUpKind },
    PowerUpExpired { kind: PowerUpKind },
    /// Remote service rejected a click; the local count stands. At most
    /// one of these per session.
    RateLimited { message: String },
    SessionEnded { session_clicks: u64, average_cps: f64 },
}

/// Result of one physical click.
#[derive(Debug, Clone, PartialEq)]
pub struct ClickOutcome {
    /// Multiplier applied to the local counters (1, 2, or 5).
    pub multiplier: u64,
    pub session_clicks: u64,
    /// Payload for the remote ledger: exactly one per physical click,
    /// multiplier deliberately absent.
    pub record: RecordClickRequest,
}

pub struct SessionController<C: Clock, R: ClickRng> {
    clock: C,
    rng: R,
    state: SessionState,
    /// Survives reset; all-time counter for the running process.
    total_clicks: u64,
    notices: Vec<SessionNotice>,
    rate_limit_notified: bool,
}

impl<C: Clock, R: ClickRng> SessionController<C, R> {
    pub fn new(clock: C, rng: R) -> Self {
        Self {
            clock,
            rng,
            state: SessionState::default(),
            total_clicks: 0,
            notices: Vec::new(),
            rate_limit_notified: false,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.phase
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn total_clicks(&self) -> u64 {
        self.total_clicks
    }

    /// Take queued notices (drains the queue).
    pub fn take_notices(&mut self) -> Vec<SessionNotice> {
        std::mem::take(&mut self.notices)
    }

    /// Begin a timed challenge. Any previous session is discarded.
    ///
    /// The caller is responsible for the idempotent `create_user` call
    /// to the remote service; a duplicate name must not block the start.
    pub fn start(&mut self, name: &str, time_limit_seconds: u64) -> Result<(), SessionError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SessionError::EmptyName);
        }
        if time_limit_seconds == 0 {
            return Err(SessionError::InvalidTimeLimit);
        }

        self.reset();
        self.state = SessionState {
            player_name: name.to_string(),
            time_limit_seconds,
            started_at_epoch_ms: self.clock.now_epoch_ms(),
            session_clicks: 0,
            active_power_up: None,
            phase: SessionPhase::Active,
        };
        info!(player = %self.state.player_name, seconds = time_limit_seconds, "session started");
        Ok(())
    }

    /// Process one physical click.
    ///
    /// Applies the current multiplier to the local counters, then rolls
    /// for power-up activation. The activating click itself still
    /// counts at the previous multiplier.
    pub fn register_click(&mut self) -> Result<ClickOutcome, SessionError> {
        if self.state.phase != SessionPhase::Active {
            return Err(SessionError::NotActive);
        }
        let now_ms = self.clock.now_epoch_ms();
        if self.time_remaining_secs(now_ms) <= 0 {
            return Err(SessionError::NotActive);
        }

        self.sweep_power_up(now_ms);

        let multiplier = self
            .state
            .active_power_up
            .map(|p| p.kind.multiplier())
            .unwrap_or(1);
        self.state.session_clicks += multiplier;
        self.total_clicks += multiplier;

        // Check-and-set is atomic within the single-threaded event
        // stream: the roll is only consulted when no power-up is held.
        if self.state.active_power_up.is_none() && self.rng.roll_activation() {
            self.activate_power_up(now_ms);
        }

        Ok(ClickOutcome {
            multiplier,
            session_clicks: self.state.session_clicks,
            record: RecordClickRequest {
                user_name: self.state.player_name.clone(),
                timestamp: now_ms,
            },
        })
    }

    /// Periodic re-evaluation (~100ms cadence while a session runs).
    ///
    /// Idempotent after the session has ended: ticks in `Ending` or
    /// `Idle` do nothing, so the countdown can never re-trigger `end()`.
    pub fn tick(&mut self) {
        if self.state.phase != SessionPhase::Active {
            return;
        }
        let now_ms = self.clock.now_epoch_ms();
        self.sweep_power_up(now_ms);
        if self.time_remaining_secs(now_ms) <= 0 {
            self.end();
        }
    }

    /// Finish the challenge: deactivate any power-up and queue the
    /// final report. Transitions `Active -> Ending`; the driver returns
    /// to `Idle` via `reset()` once the report is shown.
    pub fn end(&mut self) {
        if self.state.phase != SessionPhase::Active {
            return;
        }
        self.state.active_power_up = None;
        let session_clicks = self.state.session_clicks;
        let average_cps = session_clicks as f64 / self.state.time_limit_seconds as f64;
        self.state.phase = SessionPhase::Ending;
        info!(
            player = %self.state.player_name,
            clicks = session_clicks,
            "session ended"
        );
        self.notices.push(SessionNotice::SessionEnded {
            session_clicks,
            average_cps,
        });
    }

    /// Clear everything back to the pre-session state. Safe from any
    /// phase; drops the power-up deadline so nothing can expire into a
    /// reused session.
    ///
    /// Notices already queued stay queued: `take_notices` is the only
    /// point of removal, so an end report cannot be lost to a restart
    /// that races the driving loop.
    pub fn reset(&mut self) {
        self.state = SessionState::default();
        self.rate_limit_notified = false;
    }

    /// Record a rate-limit response from the remote service.
    ///
    /// The click already counted locally; this only surfaces a one-time
    /// warning per session.
    pub fn note_rate_limited(&mut self, message: &str) {
        if self.rate_limit_notified {
            return;
        }
        self.rate_limit_notified = true;
        self.notices.push(SessionNotice::RateLimited {
            message: message.to_string(),
        });
    }

    /// Derived display values at this instant.
    pub fn snapshot(&self) -> SessionSnapshot {
        let now_ms = self.clock.now_epoch_ms();
        let (elapsed, remaining) = match self.state.phase {
            SessionPhase::Idle => (0, 0),
            _ => {
                let elapsed = self.elapsed_secs(now_ms);
                (elapsed, self.time_remaining_secs(now_ms).max(0))
            }
        };
        let clicks_per_second = if elapsed > 0 {
            self.state.session_clicks as f64 / elapsed as f64
        } else {
            0.0
        };
        SessionSnapshot {
            phase: self.state.phase,
            player_name: self.state.player_name.clone(),
            session_clicks: self.state.session_clicks,
            total_clicks: self.total_clicks,
            elapsed_secs: elapsed,
            remaining_secs: remaining,
            clicks_per_second,
            power_up: self.state.active_power_up.map(|p| PowerUpView {
                kind: p.kind,
                remaining_secs: p.remaining_secs(now_ms),
            }),
        }
    }

    fn elapsed_secs(&self, now_ms: i64) -> i64 {
        (now_ms - self.state.started_at_epoch_ms) / 1000
    }

    fn time_remaining_secs(&self, now_ms: i64) -> i64 {
        self.state.time_limit_seconds as i64 - self.elapsed_secs(now_ms)
    }

    fn activate_power_up(&mut self, now_ms: i64) {
        let kind = self.rng.pick_kind();
        if kind == PowerUpKind::SlowMo {
            // One-time effect at activation, not sustained over the
            // power-up's duration.
            self.state.time_limit_seconds += SLOW_MO_BONUS_SECS;
        }
        self.state.active_power_up = Some(ActivePowerUp::new(kind, now_ms));
        debug!(kind = kind.label(), "power-up activated");
        self.notices.push(SessionNotice::PowerUpActivated { kind });
    }

    /// Expire the power-up if its deadline has passed.
    fn sweep_power_up(&mut self, now_ms: i64) {
        if let Some(p) = self.state.active_power_up
            && p.is_expired(now_ms)
        {
            self.state.active_power_up = None;
            debug!(kind = p.kind.label(), "power-up expired");
            self.notices.push(SessionNotice::PowerUpExpired { kind: p.kind });
        }
    }
}
