//! Frame clock: turns `draw_web()` timestamps into fixed 100 ms game ticks.
//!
//! All timers in the game (passive income, wheel spin) count these ticks,
//! which keeps them deterministic in tests. A frame gap longer than
//! [`MAX_FRAME_GAP_MS`] is clamped, so a backgrounded tab resumes where it
//! left off instead of replaying every missed tick.

/// Game ticks per real-time second.
pub const TICKS_PER_SEC: u32 = 10;

/// Longest frame gap honoured, in milliseconds.
pub const MAX_FRAME_GAP_MS: f64 = 500.0;

const MS_PER_TICK: f64 = 1000.0 / TICKS_PER_SEC as f64;

/// Convert a duration in milliseconds to whole ticks.
pub const fn ms_to_ticks(ms: u32) -> u32 {
    ms * TICKS_PER_SEC / 1000
}

pub struct FrameClock {
    /// Milliseconds carried over that do not yet add up to a tick.
    carry_ms: f64,
    prev_frame_ms: Option<f64>,
    pub total_ticks: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            carry_ms: 0.0,
            prev_frame_ms: None,
            total_ticks: 0,
        }
    }

    /// Feed the timestamp of the current frame (`performance.now()`), get back
    /// how many ticks elapsed since the previous frame.
    pub fn advance(&mut self, now_ms: f64) -> u32 {
        let gap = self
            .prev_frame_ms
            .map_or(0.0, |prev| (now_ms - prev).clamp(0.0, MAX_FRAME_GAP_MS));
        self.prev_frame_ms = Some(now_ms);

        self.carry_ms += gap;
        let ticks = (self.carry_ms / MS_PER_TICK) as u32;
        self.carry_ms -= f64::from(ticks) * MS_PER_TICK;
        self.total_ticks += u64::from(ticks);
        ticks
    }
}
