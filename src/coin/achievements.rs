//! Achievement badges.
//!
//! Nothing is stored: each badge is a predicate over the current state and
//! leaderboard, re-evaluated whenever the profile is drawn.

use super::leaderboard::Leaderboard;
use super::state::GameState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AchievementId {
    Newbie,
    Experienced,
    Master,
    Freebie,
    Winner,
    Premium,
}

/// Inputs every predicate may look at.
pub struct AchievementContext<'a> {
    pub state: &'a GameState,
    pub leaderboard: &'a Leaderboard,
}

pub struct Achievement {
    pub id: AchievementId,
    pub name: &'static str,
    pub description: &'static str,
    pub check: fn(&AchievementContext) -> bool,
}

fn earned_newbie(ctx: &AchievementContext) -> bool {
    ctx.state.total_earned >= 35_000.0
}

fn earned_experienced(ctx: &AchievementContext) -> bool {
    ctx.state.total_earned >= 250_000.0
}

fn earned_master(ctx: &AchievementContext) -> bool {
    ctx.state.total_earned >= 500_000.0
}

fn redeemed_twenty_codes(ctx: &AchievementContext) -> bool {
    ctx.state.used_promo_codes.len() >= 20
}

fn leads_leaderboard(ctx: &AchievementContext) -> bool {
    ctx.leaderboard
        .leader()
        .is_some_and(|e| e.username == ctx.state.username)
}

fn has_premium(ctx: &AchievementContext) -> bool {
    ctx.state.has_premium
}

pub const ACHIEVEMENTS: &[Achievement] = &[
    Achievement {
        id: AchievementId::Newbie,
        name: "Newbie",
        description: "Earn 35,000 coins in total",
        check: earned_newbie,
    },
    Achievement {
        id: AchievementId::Experienced,
        name: "Experienced",
        description: "Earn 250,000 coins in total",
        check: earned_experienced,
    },
    Achievement {
        id: AchievementId::Master,
        name: "Master",
        description: "Earn 500,000 coins in total",
        check: earned_master,
    },
    Achievement {
        id: AchievementId::Freebie,
        name: "Freebie Hunter",
        description: "Redeem 20 promo codes",
        check: redeemed_twenty_codes,
    },
    Achievement {
        id: AchievementId::Winner,
        name: "Winner",
        description: "Top the leaderboard",
        check: leads_leaderboard,
    },
    Achievement {
        id: AchievementId::Premium,
        name: "Premium",
        description: "Own the premium badge",
        check: has_premium,
    },
];

/// Every achievement with whether it is currently satisfied, in table order.
pub fn evaluate(state: &GameState, leaderboard: &Leaderboard) -> Vec<(&'static Achievement, bool)> {
    let ctx = AchievementContext { state, leaderboard };
    ACHIEVEMENTS.iter().map(|a| (a, (a.check)(&ctx))).collect()
}

/// Ids of the satisfied achievements.
pub fn unlocked(state: &GameState, leaderboard: &Leaderboard) -> Vec<AchievementId> {
    evaluate(state, leaderboard)
        .into_iter()
        .filter(|(_, ok)| *ok)
        .map(|(a, _)| a.id)
        .collect()
}
