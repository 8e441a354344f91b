/// MAY COIN game state definitions.
use std::collections::BTreeSet;

use super::rng::CoinRng;
use super::wheel::WheelPhase;

/// What an upgrade grants per purchase.
#[derive(Clone, Debug, PartialEq)]
pub enum UpgradeEffect {
    /// Added to click power.
    ClickPower(u64),
    /// Added to the passive income rate (coins per second).
    AutoIncome(u64),
}

/// A repeatable upgrade in the shop.
#[derive(Clone, Debug, PartialEq)]
pub struct Upgrade {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Price of the next unit.
    pub cost: u64,
    pub effect: UpgradeEffect,
    pub owned: u32,
}

impl Upgrade {
    fn new(id: &str, name: &str, description: &str, cost: u64, effect: UpgradeEffect) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            cost,
            effect,
            owned: 0,
        }
    }

    pub fn click_bonus(&self) -> Option<u64> {
        match self.effect {
            UpgradeEffect::ClickPower(n) => Some(n),
            UpgradeEffect::AutoIncome(_) => None,
        }
    }

    pub fn auto_income_bonus(&self) -> Option<u64> {
        match self.effect {
            UpgradeEffect::AutoIncome(n) => Some(n),
            UpgradeEffect::ClickPower(_) => None,
        }
    }
}

/// The shop, in display order. Key `1`..`5` buys the matching entry.
pub fn create_upgrades() -> Vec<Upgrade> {
    vec![
        Upgrade::new("click1", "Click Booster", "+1 coin per click", 50, UpgradeEffect::ClickPower(1)),
        Upgrade::new("click2", "Mega Clicker", "+5 coins per click", 250, UpgradeEffect::ClickPower(5)),
        Upgrade::new("auto1", "Auto Clicker", "+1 coin per second", 100, UpgradeEffect::AutoIncome(1)),
        Upgrade::new("auto2", "Robo Miner", "+5 coins per second", 500, UpgradeEffect::AutoIncome(5)),
        Upgrade::new(
            "auto3",
            "Quantum Generator",
            "+20 coins per second",
            2000,
            UpgradeEffect::AutoIncome(20),
        ),
    ]
}

/// Everything that is persisted about a player.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    /// Spendable coins.
    pub balance: f64,
    pub click_power: u64,
    /// Coins added once per second while positive.
    pub auto_income_rate: u64,
    pub total_clicks: u64,
    /// Lifetime gross income. Never decreases.
    pub total_earned: f64,
    /// Redeemed promo codes, uppercase.
    pub used_promo_codes: BTreeSet<String>,
    pub upgrades: Vec<Upgrade>,
    /// This player's shareable id. Assigned on first run, never regenerated.
    pub referral_id: String,
    pub username: String,
    pub has_premium: bool,
    /// Referrer ids whose bonus has already been paid out.
    pub claimed_referrals: BTreeSet<String>,
    /// First referrer that brought this player in.
    pub referred_by: Option<String>,
    /// A paid spin still waiting for its prize.
    pub wheel: WheelPhase,
}

impl GameState {
    /// Fresh state with the given identity.
    pub fn new(referral_id: String, username: String) -> Self {
        Self {
            balance: 0.0,
            click_power: 1,
            auto_income_rate: 0,
            total_clicks: 0,
            total_earned: 0.0,
            used_promo_codes: BTreeSet::new(),
            upgrades: create_upgrades(),
            referral_id,
            username,
            has_premium: false,
            claimed_referrals: BTreeSet::new(),
            referred_by: None,
            wheel: WheelPhase::Idle,
        }
    }

    /// First-run state: defaults plus a newly generated identity.
    pub fn first_run(rng: &mut CoinRng) -> Self {
        let referral_id = rng.referral_id();
        let username = rng.default_username();
        Self::new(referral_id, username)
    }

    #[cfg(test)]
    pub fn upgrade(&self, id: &str) -> Option<&Upgrade> {
        self.upgrades.iter().find(|u| u.id == id)
    }

    /// Balance as shown to the player (fractions are never displayed).
    pub fn whole_balance(&self) -> u64 {
        self.balance.max(0.0).floor() as u64
    }

    pub fn owned_upgrades(&self) -> impl Iterator<Item = &Upgrade> {
        self.upgrades.iter().filter(|u| u.owned > 0)
    }
}

/// Top-level screens.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Tab {
    Game,
    Gifts,
    Profile,
    About,
}

impl Tab {
    pub fn all() -> &'static [Tab] {
        &[Tab::Game, Tab::Gifts, Tab::Profile, Tab::About]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Game => "Game",
            Tab::Gifts => "Gifts",
            Tab::Profile => "Profile",
            Tab::About => "About",
        }
    }

    pub fn next(&self) -> Tab {
        match self {
            Tab::Game => Tab::Gifts,
            Tab::Gifts => Tab::Profile,
            Tab::Profile => Tab::About,
            Tab::About => Tab::Game,
        }
    }
}

/// How keystrokes are interpreted.
#[derive(Clone, Debug, PartialEq)]
pub enum InputMode {
    Play,
    /// Typing a promo code.
    PromoEntry,
    /// Typing a new username.
    RenameEntry,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

/// One line of the notice log (the terminal version of a toast).
#[derive(Clone, Debug)]
pub struct Notice {
    pub text: String,
    pub kind: NoticeKind,
}

/// Maximum notices kept.
const LOG_CAPACITY: usize = 50;

/// Session-only UI state. Never persisted.
pub struct UiState {
    pub tab: Tab,
    pub input_mode: InputMode,
    /// Text typed in promo/rename entry.
    pub input_buffer: String,
    pub log: Vec<Notice>,
    /// Ticks of highlight left after a click.
    pub click_flash: u32,
    /// Ticks of highlight left after a purchase.
    pub purchase_flash: u32,
    /// Last wheel prize, shown under the wheel.
    pub last_prize: Option<u64>,
    pub anim_frame: u32,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            tab: Tab::Game,
            input_mode: InputMode::Play,
            input_buffer: String::new(),
            log: Vec::new(),
            click_flash: 0,
            purchase_flash: 0,
            last_prize: None,
            anim_frame: 0,
        }
    }

    pub fn add_log(&mut self, text: &str, kind: NoticeKind) {
        self.log.push(Notice {
            text: text.to_string(),
            kind,
        });
        if self.log.len() > LOG_CAPACITY {
            self.log.remove(0);
        }
    }
}
