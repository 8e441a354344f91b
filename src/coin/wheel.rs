//! Reward wheel: a paid, weighted prize draw with a fixed spin delay.
//!
//! `Idle --start--> Spinning --(SPIN_DURATION_TICKS elapsed)--> Idle`.
//! The cost is taken on `start`; the prize is drawn and credited when the
//! spin finishes. There is no way to cancel a spin.

use crate::error::GameError;
use crate::time::ms_to_ticks;

use super::logic::{credit, ensure_funds};
use super::rng::CoinRng;
use super::state::GameState;

pub const SPIN_COST: u64 = 190;

/// 3 second spin.
pub const SPIN_DURATION_TICKS: u32 = ms_to_ticks(3000);

/// Prize bands. The first two deliberately overlap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrizeTier {
    Small,
    Medium,
    Jackpot,
}

impl PrizeTier {
    pub fn all() -> &'static [PrizeTier] {
        &[PrizeTier::Small, PrizeTier::Medium, PrizeTier::Jackpot]
    }

    /// Chance of landing in this tier.
    pub fn probability(&self) -> f64 {
        match self {
            PrizeTier::Small => 0.30,
            PrizeTier::Medium => 0.50,
            PrizeTier::Jackpot => 0.20,
        }
    }

    /// Inclusive coin range.
    pub fn range(&self) -> (u64, u64) {
        match self {
            PrizeTier::Small => (50, 100),
            PrizeTier::Medium => (90, 120),
            PrizeTier::Jackpot => (500, 605),
        }
    }

    /// Pick the tier for a uniform draw `r` in `[0, 1)`.
    fn from_unit(r: f64) -> PrizeTier {
        if r < 0.30 {
            PrizeTier::Small
        } else if r < 0.80 {
            PrizeTier::Medium
        } else {
            PrizeTier::Jackpot
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Prize {
    pub tier: PrizeTier,
    pub amount: u64,
}

/// Draw one prize.
pub fn draw_prize(rng: &mut CoinRng) -> Prize {
    let tier = PrizeTier::from_unit(rng.unit());
    let (lo, hi) = tier.range();
    Prize {
        tier,
        amount: rng.between(lo, hi),
    }
}

/// Saved with the game, so a reload during a spin resumes the countdown.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum WheelPhase {
    #[default]
    Idle,
    Spinning { ticks_left: u32 },
}

impl WheelPhase {
    /// Rebuild from the saved countdown; 0 means idle. Out of range values
    /// are clamped to a full spin.
    pub fn from_ticks_left(ticks_left: u32) -> Self {
        match ticks_left {
            0 => WheelPhase::Idle,
            n => WheelPhase::Spinning {
                ticks_left: n.min(SPIN_DURATION_TICKS),
            },
        }
    }

    pub fn ticks_left(&self) -> u32 {
        match self {
            WheelPhase::Idle => 0,
            WheelPhase::Spinning { ticks_left } => *ticks_left,
        }
    }

    pub fn is_spinning(&self) -> bool {
        matches!(self, WheelPhase::Spinning { .. })
    }

    /// Fraction of the current spin completed, 0.0 when idle.
    pub fn progress(&self) -> f64 {
        match self {
            WheelPhase::Idle => 0.0,
            WheelPhase::Spinning { ticks_left } => {
                1.0 - f64::from(*ticks_left) / f64::from(SPIN_DURATION_TICKS)
            }
        }
    }
}

/// Pay for a spin and start it.
pub fn start(state: &mut GameState) -> Result<(), GameError> {
    if state.wheel.is_spinning() {
        return Err(GameError::WheelBusy);
    }
    ensure_funds(state, SPIN_COST)?;
    state.balance -= SPIN_COST as f64;
    state.wheel = WheelPhase::Spinning {
        ticks_left: SPIN_DURATION_TICKS,
    };
    Ok(())
}

/// Let time pass. Returns the prize if the spin finished during this call;
/// the prize has already been credited.
pub fn advance(delta_ticks: u32, state: &mut GameState, rng: &mut CoinRng) -> Option<Prize> {
    let WheelPhase::Spinning { ticks_left } = state.wheel else {
        return None;
    };
    let ticks_left = ticks_left.saturating_sub(delta_ticks);
    if ticks_left > 0 {
        state.wheel = WheelPhase::Spinning { ticks_left };
        return None;
    }
    let prize = draw_prize(rng);
    credit(state, prize.amount);
    state.wheel = WheelPhase::Idle;
    Some(prize)
}
