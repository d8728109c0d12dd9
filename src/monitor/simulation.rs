use rand::Rng;
use std::fmt;
use std::ops::RangeInclusive;

/// Poll cycles on which a rehearsal may fire. Never the first two.
pub const TRIGGER_RANGE: RangeInclusive<u64> = 3..=10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BanKind {
    Vac,
    Game,
}

impl fmt::Display for BanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Vac => "VAC",
            Self::Game => "Game",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FiredEvent {
    pub kind: BanKind,
    pub check: u64,
}

/// Rehearsal schedule, drawn once per process and fired at most once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationPlan {
    trigger_index: u64,
    kind: BanKind,
    fired: bool,
}

impl SimulationPlan {
    pub fn draw() -> Self {
        Self::draw_with(&mut rand::rng())
    }

    pub fn draw_with<R: Rng>(rng: &mut R) -> Self {
        let trigger_index = rng.random_range(TRIGGER_RANGE);
        let kind = if rng.random_bool(0.5) {
            BanKind::Vac
        } else {
            BanKind::Game
        };
        Self::new(trigger_index, kind)
    }

    /// Fixed plan. The index is clamped into [`TRIGGER_RANGE`].
    pub fn new(trigger_index: u64, kind: BanKind) -> Self {
        Self {
            trigger_index: trigger_index.clamp(*TRIGGER_RANGE.start(), *TRIGGER_RANGE.end()),
            kind,
            fired: false,
        }
    }

    pub fn trigger_index(&self) -> u64 {
        self.trigger_index
    }

    pub fn kind(&self) -> BanKind {
        self.kind
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }

    /// Fires on the planned cycle, once.
    pub fn maybe_fire(&mut self, check_count: u64) -> Option<FiredEvent> {
        if self.fired || check_count != self.trigger_index {
            return None;
        }
        self.fired = true;
        Some(FiredEvent {
            kind: self.kind,
            check: check_count,
        })
    }
}
