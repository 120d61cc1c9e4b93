//! Active power-up state.
//!
//! A power-up is a time-boxed modifier created on a lucky click and
//! destroyed on expiry or session end/reset. Expiry is held as an
//! absolute epoch-millisecond deadline and evaluated against the
//! injected clock on every tick and click, so "cancelling the timer"
//! is simply dropping the value - nothing can fire into a stale
//! session.

use clickrush_types::PowerUpKind;

/// Probability that a click with no active power-up triggers one.
pub const POWER_UP_CHANCE: f64 = 0.05;

/// How long an activated power-up lasts.
pub const POWER_UP_DURATION_MS: i64 = 5_000;

/// One-time time-limit bonus applied when SlowMo activates.
pub const SLOW_MO_BONUS_SECS: u64 = 3;

/// The single power-up instance a session may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivePowerUp {
    pub kind: PowerUpKind,
    pub expires_at_epoch_ms: i64,
}

impl ActivePowerUp {
    pub fn new(kind: PowerUpKind, now_ms: i64) -> Self {
        Self {
            kind,
            expires_at_epoch_ms: now_ms + POWER_UP_DURATION_MS,
        }
    }

    pub fn is_expired(&self, now_ms: i64) -> bool {
        now_ms >= self.expires_at_epoch_ms
    }

    /// Seconds of effect left, clamped at zero.
    pub fn remaining_secs(&self, now_ms: i64) -> f64 {
        ((self.expires_at_epoch_ms - now_ms).max(0)) as f64 / 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expires_exactly_at_deadline() {
        let p = ActivePowerUp::new(PowerUpKind::Double, 10_000);
        assert!(!p.is_expired(14_999));
        assert!(p.is_expired(15_000));
        assert_eq!(p.remaining_secs(12_000), 3.0);
        assert_eq!(p.remaining_secs(20_000), 0.0);
    }
}
