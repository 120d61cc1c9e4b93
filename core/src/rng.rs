//! Randomness behind a trait so power-up rolls are scriptable in tests.

use clickrush_types::PowerUpKind;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::powerup::POWER_UP_CHANCE;

/// Rolls consulted by the session controller on each click.
pub trait ClickRng {
    /// Whether this click triggers a power-up (~5% of the time).
    fn roll_activation(&mut self) -> bool;

    /// Uniform pick among the three power-up kinds.
    fn pick_kind(&mut self) -> PowerUpKind;
}

/// Production RNG.
#[derive(Debug)]
pub struct GameRng {
    rng: StdRng,
}

impl GameRng {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Seeded constructor, mostly useful for reproducing a session.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new()
    }
}

impl ClickRng for GameRng {
    fn roll_activation(&mut self) -> bool {
        self.rng.gen_range(0.0..1.0) < POWER_UP_CHANCE
    }

    fn pick_kind(&mut self) -> PowerUpKind {
        match self.rng.gen_range(0..3u8) {
            0 => PowerUpKind::Double,
            1 => PowerUpKind::SlowMo,
            _ => PowerUpKind::Mega,
        }
    }
}

/// Deterministic rolls for tests: pops scripted answers, then defaults
/// to "no activation" / Double once the script runs out.
///
/// Rolls are only consumed when the controller actually consults the
/// RNG, so a test can also assert that no roll happened while a
/// power-up was already active.
#[derive(Debug, Default)]
pub struct ScriptedRng {
    activations: std::collections::VecDeque<bool>,
    kinds: std::collections::VecDeque<PowerUpKind>,
}

impl ScriptedRng {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script_activation(&mut self, fires: bool) -> &mut Self {
        self.activations.push_back(fires);
        self
    }

    pub fn script_kind(&mut self, kind: PowerUpKind) -> &mut Self {
        self.kinds.push_back(kind);
        self
    }

    /// Number of scripted activation rolls not yet consumed.
    pub fn pending_activations(&self) -> usize {
        self.activations.len()
    }
}

impl ClickRng for ScriptedRng {
    fn roll_activation(&mut self) -> bool {
        self.activations.pop_front().unwrap_or(false)
    }

    fn pick_kind(&mut self) -> PowerUpKind {
        self.kinds.pop_front().unwrap_or(PowerUpKind::Double)
    }
}
