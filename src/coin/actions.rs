//! Semantic action IDs for MAY COIN click targets.
//!
//! Registered during render and dispatched via `InputEvent::Click`.

// ── Game tab ────────────────────────────────────────────────────
pub const CLICK_COIN: u16 = 0;

// ── Tab navigation (base + Tab::all() index) ────────────────────
pub const TAB_BASE: u16 = 10;

// ── Upgrade purchase (base + catalog index 0..4) ────────────────
pub const BUY_UPGRADE_BASE: u16 = 100;

// ── Gifts tab ───────────────────────────────────────────────────
pub const ENTER_PROMO: u16 = 200;
pub const SPIN_WHEEL: u16 = 210;

// ── Profile tab ─────────────────────────────────────────────────
pub const RENAME: u16 = 300;
pub const BUY_PREMIUM: u16 = 310;

// ── Text entry ──────────────────────────────────────────────────
pub const SUBMIT_ENTRY: u16 = 900;
pub const CANCEL_ENTRY: u16 = 901;
