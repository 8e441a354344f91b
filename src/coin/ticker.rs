//! Passive income: pays `auto_income_rate` once per second while the rate
//! is positive.
//!
//! The ticker tracks the rate it was armed with. When the game's rate
//! changes it is re-armed and a fresh one-second period starts; at rate 0 it
//! is disarmed and accumulates nothing.

use crate::time::ms_to_ticks;

use super::logic::credit;
use super::state::GameState;

pub const INCOME_INTERVAL_TICKS: u32 = ms_to_ticks(1000);

pub struct IncomeTicker {
    armed_rate: u64,
    /// Ticks into the current period.
    phase_ticks: u32,
}

impl IncomeTicker {
    pub fn new() -> Self {
        Self {
            armed_rate: 0,
            phase_ticks: 0,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.armed_rate > 0
    }

    /// Re-arm for `rate`. No-op when the rate is unchanged.
    pub fn rearm(&mut self, rate: u64) {
        if rate != self.armed_rate {
            self.armed_rate = rate;
            self.phase_ticks = 0;
        }
    }

    /// Advance by `delta_ticks`, paying out every completed period.
    /// Returns the coins credited.
    pub fn advance(&mut self, delta_ticks: u32, state: &mut GameState) -> u64 {
        self.rearm(state.auto_income_rate);
        if !self.is_armed() {
            return 0;
        }
        let elapsed = self.phase_ticks + delta_ticks;
        let periods = elapsed / INCOME_INTERVAL_TICKS;
        self.phase_ticks = elapsed % INCOME_INTERVAL_TICKS;

        let income = self.armed_rate * u64::from(periods);
        if income > 0 {
            credit(state, income);
        }
        income
    }
}
