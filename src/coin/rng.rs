//! Seeded randomness for wheel prizes and first-run identity.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Length of a generated referral id.
pub const REFERRAL_ID_LEN: usize = 9;

pub struct CoinRng {
    rng: Pcg32,
}

impl CoinRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Seed from whatever the platform offers. Not cryptographic; nothing in
    /// the game needs it to be.
    pub fn from_entropy() -> Self {
        Self::new(entropy_seed())
    }

    /// Uniform draw in `[0, 1)`.
    pub fn unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    /// Uniform integer in `lo..=hi`.
    pub fn between(&mut self, lo: u64, hi: u64) -> u64 {
        self.rng.random_range(lo..=hi)
    }

    /// Shareable referral id: lowercase base-36.
    pub fn referral_id(&mut self) -> String {
        (0..REFERRAL_ID_LEN)
            .map(|_| BASE36[self.rng.random_range(0..BASE36.len())] as char)
            .collect()
    }

    /// Default display name for a brand new player.
    pub fn default_username(&mut self) -> String {
        format!("Player{}", self.between(1000, 9999))
    }
}

#[cfg(target_arch = "wasm32")]
fn entropy_seed() -> u64 {
    let noise = (js_sys::Math::random() * (1u64 << 53) as f64) as u64;
    noise ^ (js_sys::Date::now() as u64).rotate_left(29)
}

#[cfg(not(target_arch = "wasm32"))]
fn entropy_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}
