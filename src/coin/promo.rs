//! Static promo-code table. Codes never expire; matching is case-insensitive.

/// `(code, reward)` in display order.
pub const PROMO_CODES: &[(&str, u64)] = &[
    ("MAYSTART", 100),
    ("GREENPOWER", 250),
    ("NEONBOOST", 500),
    ("CYBERPUNK", 1000),
];

/// Canonical form of user input: trimmed, uppercase.
pub fn normalize(code: &str) -> String {
    code.trim().to_uppercase()
}

/// Reward for an already-normalized code.
pub fn reward(code: &str) -> Option<u64> {
    PROMO_CODES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, r)| *r)
}
