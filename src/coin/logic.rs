//! MAY COIN game rules as pure functions over [`GameState`].
//!
//! Every function either applies its whole effect and returns `Ok`, or
//! returns an error and leaves the state untouched.

use crate::error::GameError;

use super::promo;
use super::state::{GameState, Upgrade, UpgradeEffect};

/// Flat bonus paid when arriving through someone else's referral link.
pub const REFERRAL_BONUS: u64 = 50;

/// Longest accepted username, in characters.
pub const MAX_USERNAME_LEN: usize = 24;

/// Price after one more purchase: `floor(cost * 1.5)`.
pub fn next_cost(cost: u64) -> u64 {
    cost + cost / 2
}

/// Fail with `InsufficientFunds` unless `cost` is affordable.
pub fn ensure_funds(state: &GameState, cost: u64) -> Result<(), GameError> {
    if state.balance < cost as f64 {
        return Err(GameError::InsufficientFunds {
            needed: cost,
            balance: state.whole_balance(),
        });
    }
    Ok(())
}

/// Add income. Every source of coins goes through here so `total_earned`
/// always equals lifetime gross income.
pub fn credit(state: &mut GameState, amount: u64) {
    state.balance += amount as f64;
    state.total_earned += amount as f64;
}

/// Manual click. Returns the coins gained.
pub fn click(state: &mut GameState) -> u64 {
    let power = state.click_power;
    credit(state, power);
    state.total_clicks += 1;
    power
}

/// Buy one unit of the upgrade `id`. Returns the upgrade after purchase.
pub fn buy_upgrade<'a>(state: &'a mut GameState, id: &str) -> Result<&'a Upgrade, GameError> {
    let idx = state
        .upgrades
        .iter()
        .position(|u| u.id == id)
        .ok_or_else(|| GameError::UnknownUpgrade(id.to_string()))?;

    let cost = state.upgrades[idx].cost;
    ensure_funds(state, cost)?;

    state.balance -= cost as f64;
    let upgrade = &mut state.upgrades[idx];
    upgrade.owned += 1;
    upgrade.cost = next_cost(cost);
    match upgrade.effect {
        UpgradeEffect::ClickPower(n) => state.click_power += n,
        UpgradeEffect::AutoIncome(n) => state.auto_income_rate += n,
    }
    Ok(&state.upgrades[idx])
}

/// Redeem a promo code typed by the player. Returns the reward.
pub fn redeem_promo(state: &mut GameState, input: &str) -> Result<u64, GameError> {
    let code = promo::normalize(input);
    if state.used_promo_codes.contains(&code) {
        return Err(GameError::PromoAlreadyUsed(code));
    }
    let reward = promo::reward(&code).ok_or_else(|| GameError::InvalidPromoCode(code.clone()))?;
    credit(state, reward);
    state.used_promo_codes.insert(code);
    Ok(reward)
}

/// Pay the referral bonus for arriving via `referrer`'s link.
///
/// Paid at most once per referrer id; the set of claimed ids is part of the
/// saved state, so reloading the same link does not pay again.
pub fn apply_referral_bonus(state: &mut GameState, referrer: &str) -> Result<u64, GameError> {
    if referrer == state.referral_id {
        return Err(GameError::SelfReferral);
    }
    if state.claimed_referrals.contains(referrer) {
        return Err(GameError::ReferralAlreadyClaimed(referrer.to_string()));
    }
    credit(state, REFERRAL_BONUS);
    state.claimed_referrals.insert(referrer.to_string());
    if state.referred_by.is_none() {
        state.referred_by = Some(referrer.to_string());
    }
    Ok(REFERRAL_BONUS)
}

/// Cosmetic premium badge. One way; returns whether anything changed.
pub fn set_premium(state: &mut GameState) -> bool {
    let changed = !state.has_premium;
    state.has_premium = true;
    changed
}

/// Change the display name.
pub fn rename(state: &mut GameState, name: &str) -> Result<(), GameError> {
    let name = name.trim();
    let len = name.chars().count();
    if len == 0 || len > MAX_USERNAME_LEN {
        return Err(GameError::InvalidUsername);
    }
    state.username = name.to_string();
    Ok(())
}

/// Percentage of `goal` reached, capped at 100.
pub fn progress_percent(value: f64, goal: f64) -> u16 {
    if goal <= 0.0 {
        return 100;
    }
    ((value.max(0.0) / goal) * 100.0).floor().min(100.0) as u16
}

/// Format a coin amount for display: floored, with thousands separators.
pub fn format_coins(amount: f64) -> String {
    let digits = (amount.max(0.0).floor() as u64).to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn fresh() -> GameState {
        GameState::new("selfid123".into(), "Player1000".into())
    }

    proptest! {
        #[test]
        fn prop_click_k_times(k in 0u64..500, power in 1u64..1000) {
            let mut state = fresh();
            state.click_power = power;
            for _ in 0..k {
                click(&mut state);
            }
            prop_assert_eq!(state.balance, (k * power) as f64);
            prop_assert_eq!(state.total_clicks, k);
        }

        #[test]
        fn prop_cost_after_n_purchases(n in 0u32..20, idx in 0usize..5) {
            let mut state = fresh();
            state.balance = 1e15;
            let id = state.upgrades[idx].id.clone();
            let mut expected = state.upgrades[idx].cost;
            for _ in 0..n {
                buy_upgrade(&mut state, &id).unwrap();
                expected = (expected as f64 * 1.5).floor() as u64;
            }
            let upgrade = state.upgrade(&id).unwrap();
            prop_assert_eq!(upgrade.cost, expected);
            prop_assert_eq!(upgrade.owned, n);
        }

        #[test]
        fn prop_failed_purchase_is_noop(balance in 0u64..50) {
            let mut state = fresh();
            state.balance = balance as f64;
            let before = state.clone();
            prop_assert!(buy_upgrade(&mut state, "click1").is_err());
            prop_assert_eq!(state, before);
        }

        #[test]
        fn prop_promo_never_credits_twice(idx in 0usize..4, lower in any::<bool>()) {
            let code = promo::PROMO_CODES[idx].0;
            let code = if lower { code.to_lowercase() } else { code.to_string() };
            let mut state = fresh();
            let reward = redeem_promo(&mut state, &code).unwrap();
            prop_assert!(redeem_promo(&mut state, &code).is_err());
            prop_assert_eq!(state.balance, reward as f64);
        }

        #[test]
        fn prop_format_coins_strips_to_integer(n in 0u64..10_000_000_000) {
            let s = format_coins(n as f64);
            let stripped: String = s.chars().filter(|c| *c != ',').collect();
            prop_assert_eq!(stripped, n.to_string());
        }
    }
}
