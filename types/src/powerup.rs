use serde::{Deserialize, Serialize};

/// The three transient modifiers a session can roll.
///
/// At most one is active at a time; see the session controller for the
/// activation and expiry rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Each click counts double.
    Double,
    /// One-time +3s added to the session time limit.
    SlowMo,
    /// Each click counts five-fold.
    Mega,
}

impl PowerUpKind {
    /// Local click multiplier while this power-up is active.
    ///
    /// SlowMo leaves the click value untouched; its effect is applied to
    /// the time limit once at activation.
    pub fn multiplier(self) -> u64 {
        match self {
            PowerUpKind::Double => 2,
            PowerUpKind::SlowMo => 1,
            PowerUpKind::Mega => 5,
        }
    }

    /// Display name for notices and the terminal UI.
    pub fn label(self) -> &'static str {
        match self {
            PowerUpKind::Double => "Double Points",
            PowerUpKind::SlowMo => "Slow Motion",
            PowerUpKind::Mega => "Mega Clicks",
        }
    }
}
