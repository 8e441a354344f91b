//! MAY COIN: click for coins, buy upgrades, redeem codes, spin the wheel.
//!
//! [`CoinGame`] is the session. It owns the state and the [`save::Store`];
//! every successful mutation is followed by a save, and a blocked account
//! has every mutation refused.

pub mod achievements;
pub mod actions;
pub mod leaderboard;
pub mod logic;
pub mod promo;
pub mod render;
pub mod rng;
pub mod save;
pub mod state;
pub mod ticker;
pub mod wheel;

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::console;
use crate::error::GameError;
use crate::input::{ClickState, InputEvent};

use actions::*;
use leaderboard::Leaderboard;
use rng::CoinRng;
use save::Store;
use state::{GameState, InputMode, NoticeKind, Tab, UiState};
use ticker::IncomeTicker;

/// Ticks the coin stays highlighted after a click.
const CLICK_FLASH_TICKS: u32 = 2;
const PURCHASE_FLASH_TICKS: u32 = 3;

/// Longest text accepted in an entry field.
const MAX_ENTRY_LEN: usize = 32;

pub struct CoinGame {
    pub state: GameState,
    pub ui: UiState,
    ticker: IncomeTicker,
    store: Store,
    rng: CoinRng,
    blocked: Option<String>,
    leaderboard: Leaderboard,
    /// Whether the last save failed; used to notify only once per outage.
    save_failing: bool,
}

impl CoinGame {
    /// Start a session: restore (or create) the player, then apply the
    /// referral from the page URL, if any.
    pub fn load(store: Store, mut rng: CoinRng, referrer: Option<&str>) -> Self {
        let blocked = store.block_reason();
        let (state, restored) = store.load_or_new(&mut rng);
        let leaderboard = store.load_leaderboard();

        let mut game = Self {
            state,
            ui: UiState::new(),
            ticker: IncomeTicker::new(),
            store,
            rng,
            blocked,
            leaderboard,
            save_failing: false,
        };

        if let Some(reason) = &game.blocked {
            console::warn(&format!("アカウントはブロックされています: {reason}"));
            return game;
        }

        if restored {
            game.ui.add_log("Progress loaded", NoticeKind::Info);
        } else {
            let welcome = format!("Welcome, {}!", game.state.username);
            game.ui.add_log(&welcome, NoticeKind::Info);
            // 新しい ID はリロード後も残るようすぐ保存する。
            game.persist();
        }

        if let Some(referrer) = referrer.map(str::trim).filter(|r| !r.is_empty()) {
            match game.apply_referral(referrer) {
                Ok(bonus) => game.ui.add_log(
                    &format!("Referral bonus: +{bonus} coins"),
                    NoticeKind::Success,
                ),
                Err(GameError::ReferralAlreadyClaimed(id)) => {
                    console::info(&format!("紹介ボーナス {id} は受け取り済み"));
                }
                Err(e) => game.ui.add_log(&e.notice(), NoticeKind::Error),
            }
        }
        game
    }

    pub fn blocked_reason(&self) -> Option<&str> {
        self.blocked.as_deref()
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    /// Run `listener` after every successful save.
    pub fn subscribe(&mut self, listener: impl FnMut(&GameState) + 'static) {
        self.store.subscribe(listener);
    }

    fn guard(&self) -> Result<(), GameError> {
        match &self.blocked {
            Some(reason) => Err(GameError::Blocked {
                reason: reason.clone(),
            }),
            None => Ok(()),
        }
    }

    /// 現在の状態を保存する。失敗時はログに出してメモリ上で続行し、
    /// 次の操作で再試行する。
    fn persist(&mut self) {
        match self.store.save(&self.state) {
            Ok(board) => {
                self.leaderboard = board;
                self.save_failing = false;
            }
            Err(e) => {
                console::warn(&format!("セーブに失敗: {e}"));
                if !self.save_failing {
                    self.ui.add_log(&e.notice(), NoticeKind::Error);
                }
                self.save_failing = true;
            }
        }
    }

    // ── Mutations ───────────────────────────────────────────────

    pub fn click(&mut self) -> Result<u64, GameError> {
        self.guard()?;
        let gained = logic::click(&mut self.state);
        self.ui.click_flash = CLICK_FLASH_TICKS;
        self.persist();
        Ok(gained)
    }

    /// Buy one unit of upgrade `id`. Returns its name.
    pub fn buy_upgrade(&mut self, id: &str) -> Result<String, GameError> {
        self.guard()?;
        let name = logic::buy_upgrade(&mut self.state, id)?.name.clone();
        self.ui.purchase_flash = PURCHASE_FLASH_TICKS;
        self.persist();
        Ok(name)
    }

    pub fn redeem_promo(&mut self, code: &str) -> Result<u64, GameError> {
        self.guard()?;
        let reward = logic::redeem_promo(&mut self.state, code)?;
        self.persist();
        Ok(reward)
    }

    pub fn spin(&mut self) -> Result<(), GameError> {
        self.guard()?;
        wheel::start(&mut self.state)?;
        self.ui.last_prize = None;
        self.persist();
        Ok(())
    }

    pub fn apply_referral(&mut self, referrer: &str) -> Result<u64, GameError> {
        self.guard()?;
        let bonus = logic::apply_referral_bonus(&mut self.state, referrer)?;
        self.persist();
        Ok(bonus)
    }

    pub fn rename(&mut self, name: &str) -> Result<(), GameError> {
        self.guard()?;
        let old = self.state.username.clone();
        logic::rename(&mut self.state, name)?;
        if old != self.state.username {
            match self.store.rename_player(&old, &self.state.username) {
                Ok(board) => self.leaderboard = board,
                Err(e) => console::warn(&format!("リーダーボードの名前変更に失敗: {e}")),
            }
        }
        self.persist();
        Ok(())
    }

    /// Returns whether the badge was newly granted.
    pub fn buy_premium(&mut self) -> Result<bool, GameError> {
        self.guard()?;
        let changed = logic::set_premium(&mut self.state);
        if changed {
            self.persist();
        }
        Ok(changed)
    }

    // ── Input ───────────────────────────────────────────────────

    fn report<T>(&mut self, result: Result<T, GameError>, success: impl FnOnce(T) -> Option<String>) {
        match result {
            Ok(value) => {
                if let Some(msg) = success(value) {
                    self.ui.add_log(&msg, NoticeKind::Success);
                }
            }
            Err(e) => self.ui.add_log(&e.notice(), NoticeKind::Error),
        }
    }

    fn do_click(&mut self) {
        let result = self.click();
        self.report(result, |_| None);
    }

    fn do_buy(&mut self, index: usize) {
        let Some(id) = self.state.upgrades.get(index).map(|u| u.id.clone()) else {
            return;
        };
        let result = self.buy_upgrade(&id);
        self.report(result, |name| Some(format!("Bought {name}")));
    }

    fn do_spin(&mut self) {
        let result = self.spin();
        self.report(result, |_| Some("The wheel is spinning...".to_string()));
    }

    fn do_premium(&mut self) {
        let result = self.buy_premium();
        self.report(result, |changed| changed.then(|| "Premium activated".to_string()));
    }

    fn begin_entry(&mut self, mode: InputMode, tab: Tab) {
        self.ui.tab = tab;
        self.ui.input_mode = mode;
        self.ui.input_buffer.clear();
    }

    fn end_entry(&mut self) {
        self.ui.input_mode = InputMode::Play;
        self.ui.input_buffer.clear();
    }

    fn submit_entry(&mut self) {
        let text = std::mem::take(&mut self.ui.input_buffer);
        match self.ui.input_mode {
            InputMode::PromoEntry => {
                let result = self.redeem_promo(&text);
                self.report(result, |reward| Some(format!("Promo code applied: +{reward} coins")));
            }
            InputMode::RenameEntry => {
                let result = self.rename(&text);
                self.report(result, |_| Some("Name updated".to_string()));
            }
            InputMode::Play => {}
        }
        self.end_entry();
    }

    fn handle_entry(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::Key(c) if !c.is_control() => {
                if self.ui.input_buffer.chars().count() < MAX_ENTRY_LEN {
                    self.ui.input_buffer.push(*c);
                }
                true
            }
            InputEvent::Erase => {
                self.ui.input_buffer.pop();
                true
            }
            InputEvent::Submit | InputEvent::Click(SUBMIT_ENTRY) => {
                self.submit_entry();
                true
            }
            InputEvent::Cancel | InputEvent::Click(CANCEL_ENTRY) => {
                self.end_entry();
                true
            }
            InputEvent::Click(id) => {
                // Clicking elsewhere abandons the entry.
                self.end_entry();
                self.handle_click(*id)
            }
            InputEvent::Key(_) => false,
        }
    }

    fn handle_click(&mut self, action_id: u16) -> bool {
        let tab_count = Tab::all().len() as u16;
        let upgrade_count = self.state.upgrades.len() as u16;
        match action_id {
            CLICK_COIN => self.do_click(),
            id if (TAB_BASE..TAB_BASE + tab_count).contains(&id) => {
                self.ui.tab = Tab::all()[(id - TAB_BASE) as usize];
            }
            id if (BUY_UPGRADE_BASE..BUY_UPGRADE_BASE + upgrade_count).contains(&id) => {
                self.do_buy((id - BUY_UPGRADE_BASE) as usize);
            }
            ENTER_PROMO => self.begin_entry(InputMode::PromoEntry, Tab::Gifts),
            SPIN_WHEEL => self.do_spin(),
            RENAME => self.begin_entry(InputMode::RenameEntry, Tab::Profile),
            BUY_PREMIUM => self.do_premium(),
            _ => return false,
        }
        true
    }

    fn handle_key(&mut self, key: char) -> bool {
        match key {
            '\t' => self.ui.tab = self.ui.tab.next(),
            'c' | ' ' => self.do_click(),
            '1'..='9' if self.ui.tab == Tab::Game => {
                let index = (key as u8 - b'1') as usize;
                if index >= self.state.upgrades.len() {
                    return false;
                }
                self.do_buy(index);
            }
            'p' => self.begin_entry(InputMode::PromoEntry, Tab::Gifts),
            's' => self.do_spin(),
            'n' => self.begin_entry(InputMode::RenameEntry, Tab::Profile),
            'b' => self.do_premium(),
            _ => return false,
        }
        true
    }

    /// Handle an input event. Returns true if the event was consumed.
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        if self.blocked.is_some() {
            return false;
        }
        if self.ui.input_mode != InputMode::Play {
            return self.handle_entry(event);
        }
        match event {
            InputEvent::Key(c) => self.handle_key(*c),
            InputEvent::Click(id) => self.handle_click(*id),
            InputEvent::Submit | InputEvent::Erase | InputEvent::Cancel => false,
        }
    }

    // ── Time ────────────────────────────────────────────────────

    /// Advance timers by `delta_ticks`: passive income and the wheel.
    pub fn tick(&mut self, delta_ticks: u32) {
        if delta_ticks == 0 || self.blocked.is_some() {
            return;
        }
        self.ui.anim_frame = self.ui.anim_frame.wrapping_add(delta_ticks);
        self.ui.click_flash = self.ui.click_flash.saturating_sub(delta_ticks);
        self.ui.purchase_flash = self.ui.purchase_flash.saturating_sub(delta_ticks);

        let income = self.ticker.advance(delta_ticks, &mut self.state);
        let prize = wheel::advance(delta_ticks, &mut self.state, &mut self.rng);

        if let Some(prize) = prize {
            self.ui.last_prize = Some(prize.amount);
            self.ui
                .add_log(&format!("You won {} coins!", prize.amount), NoticeKind::Success);
        }
        if income > 0 || prize.is_some() {
            self.persist();
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
        render::render(self, f, area, click_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStorage, Storage};
    use wheel::{SPIN_COST, SPIN_DURATION_TICKS};

    fn new_game() -> (CoinGame, MemoryStorage) {
        let storage = MemoryStorage::new();
        let game = CoinGame::load(Store::new(Box::new(storage.clone())), CoinRng::new(5), None);
        (game, storage)
    }

    fn reload(storage: &MemoryStorage, referrer: Option<&str>) -> CoinGame {
        CoinGame::load(Store::new(Box::new(storage.clone())), CoinRng::new(6), referrer)
    }

    fn last_log(game: &CoinGame) -> &str {
        game.ui.log.last().map(|n| n.text.as_str()).unwrap_or("")
    }

    #[test]
    fn first_run_persists_identity() {
        let (game, storage) = new_game();
        assert!(storage.get_item(save::STORAGE_KEY).unwrap().is_some());
        let again = reload(&storage, None);
        assert_eq!(again.state.referral_id, game.state.referral_id);
        assert_eq!(again.state.username, game.state.username);
    }

    #[test]
    fn click_via_key_and_target() {
        let (mut game, _) = new_game();
        assert!(game.handle_input(&InputEvent::Key('c')));
        assert!(game.handle_input(&InputEvent::Click(CLICK_COIN)));
        assert_eq!(game.state.balance, 2.0);
        assert_eq!(game.state.total_clicks, 2);
        assert!(game.ui.click_flash > 0);
    }

    #[test]
    fn every_mutation_is_saved() {
        let (mut game, storage) = new_game();
        game.click().unwrap();
        assert_eq!(reload(&storage, None).state.balance, 1.0);

        game.redeem_promo("maystart").unwrap();
        let loaded = reload(&storage, None);
        assert_eq!(loaded.state.balance, 101.0);
        assert!(loaded.state.used_promo_codes.contains("MAYSTART"));
    }

    #[test]
    fn leaderboard_follows_saves() {
        let (mut game, _) = new_game();
        game.redeem_promo("CYBERPUNK").unwrap();
        let leader = game.leaderboard().leader().unwrap();
        assert_eq!(leader.username, game.state.username);
        assert_eq!(leader.balance, 1000.0);
    }

    #[test]
    fn buy_with_number_key_on_game_tab() {
        let (mut game, _) = new_game();
        game.state.balance = 60.0;
        game.handle_input(&InputEvent::Key('1'));
        assert_eq!(game.state.click_power, 2);
        assert_eq!(last_log(&game), "Bought Click Booster");
    }

    #[test]
    fn number_keys_ignored_off_game_tab() {
        let (mut game, _) = new_game();
        game.state.balance = 60.0;
        game.ui.tab = Tab::Profile;
        assert!(!game.handle_input(&InputEvent::Key('1')));
        assert_eq!(game.state.click_power, 1);
    }

    #[test]
    fn failed_purchase_reports_shortfall() {
        let (mut game, _) = new_game();
        for _ in 0..5 {
            game.handle_input(&InputEvent::Key('c'));
        }
        game.handle_input(&InputEvent::Click(BUY_UPGRADE_BASE));
        assert_eq!(game.state.balance, 5.0);
        assert_eq!(last_log(&game), "Not enough coins: 45 more needed");
        assert_eq!(game.ui.log.last().unwrap().kind, NoticeKind::Error);
    }

    #[test]
    fn promo_entry_flow() {
        let (mut game, _) = new_game();
        game.handle_input(&InputEvent::Key('p'));
        assert_eq!(game.ui.input_mode, InputMode::PromoEntry);
        assert_eq!(game.ui.tab, Tab::Gifts);
        for c in "neonboostx".chars() {
            game.handle_input(&InputEvent::Key(c));
        }
        game.handle_input(&InputEvent::Erase);
        game.handle_input(&InputEvent::Submit);

        assert_eq!(game.ui.input_mode, InputMode::Play);
        assert_eq!(game.state.balance, 500.0);
        assert_eq!(last_log(&game), "Promo code applied: +500 coins");

        game.handle_input(&InputEvent::Key('p'));
        for c in "NEONBOOST".chars() {
            game.handle_input(&InputEvent::Key(c));
        }
        game.handle_input(&InputEvent::Click(SUBMIT_ENTRY));
        assert_eq!(game.state.balance, 500.0);
        assert_eq!(last_log(&game), "Promo code already used");
    }

    #[test]
    fn entry_keys_do_not_trigger_actions() {
        let (mut game, _) = new_game();
        game.handle_input(&InputEvent::Key('p'));
        game.handle_input(&InputEvent::Key('c'));
        game.handle_input(&InputEvent::Key('s'));
        assert_eq!(game.state.total_clicks, 0);
        assert_eq!(game.ui.input_buffer, "cs");

        game.handle_input(&InputEvent::Cancel);
        assert_eq!(game.ui.input_mode, InputMode::Play);
        assert!(game.ui.input_buffer.is_empty());
    }

    #[test]
    fn entry_length_is_capped() {
        let (mut game, _) = new_game();
        game.handle_input(&InputEvent::Key('n'));
        for _ in 0..100 {
            game.handle_input(&InputEvent::Key('x'));
        }
        assert_eq!(game.ui.input_buffer.chars().count(), MAX_ENTRY_LEN);
    }

    #[test]
    fn rename_flow() {
        let (mut game, storage) = new_game();
        game.handle_input(&InputEvent::Click(RENAME));
        for c in " Neo ".chars() {
            game.handle_input(&InputEvent::Key(c));
        }
        game.handle_input(&InputEvent::Submit);
        assert_eq!(game.state.username, "Neo");
        assert_eq!(reload(&storage, None).state.username, "Neo");

        game.handle_input(&InputEvent::Key('n'));
        game.handle_input(&InputEvent::Submit);
        assert_eq!(game.state.username, "Neo");
        assert_eq!(last_log(&game), "Name must be 1-24 characters");
    }

    #[test]
    fn clicking_elsewhere_leaves_entry() {
        let (mut game, _) = new_game();
        game.handle_input(&InputEvent::Key('p'));
        game.handle_input(&InputEvent::Click(CLICK_COIN));
        assert_eq!(game.ui.input_mode, InputMode::Play);
        assert_eq!(game.state.balance, 1.0);
    }

    #[test]
    fn tabs_by_click_and_key() {
        let (mut game, _) = new_game();
        game.handle_input(&InputEvent::Click(TAB_BASE + 2));
        assert_eq!(game.ui.tab, Tab::Profile);
        game.handle_input(&InputEvent::Key('\t'));
        assert_eq!(game.ui.tab, Tab::About);
        game.handle_input(&InputEvent::Key('\t'));
        assert_eq!(game.ui.tab, Tab::Game);
    }

    #[test]
    fn passive_income_via_tick() {
        let (mut game, storage) = new_game();
        game.state.balance = 100.0;
        game.buy_upgrade("auto1").unwrap();
        game.tick(ticker::INCOME_INTERVAL_TICKS * 3);
        assert_eq!(game.state.balance, 3.0);
        assert_eq!(reload(&storage, None).state.balance, 3.0);
    }

    #[test]
    fn wheel_spin_through_session() {
        let (mut game, _) = new_game();
        game.state.balance = 400.0;
        game.handle_input(&InputEvent::Key('s'));
        assert_eq!(game.state.balance, 400.0 - SPIN_COST as f64);

        game.handle_input(&InputEvent::Click(SPIN_WHEEL));
        assert_eq!(last_log(&game), "The wheel is still spinning");
        assert_eq!(game.state.balance, 400.0 - SPIN_COST as f64);

        game.tick(SPIN_DURATION_TICKS);
        let prize = game.ui.last_prize.unwrap();
        assert_eq!(game.state.balance, 400.0 - SPIN_COST as f64 + prize as f64);
        assert!(!game.state.wheel.is_spinning());
    }

    #[test]
    fn spin_resumes_after_reload() {
        let (mut game, storage) = new_game();
        game.state.balance = 400.0;
        game.spin().unwrap();

        let mut again = reload(&storage, None);
        assert!(again.state.wheel.is_spinning());
        assert_eq!(again.state.balance, 400.0 - SPIN_COST as f64);

        again.tick(SPIN_DURATION_TICKS);
        let prize = again.ui.last_prize.unwrap();
        assert_eq!(reload(&storage, None).state.balance, 400.0 - SPIN_COST as f64 + prize as f64);
        assert!(!reload(&storage, None).state.wheel.is_spinning());
    }

    #[test]
    fn rename_moves_leaderboard_row() {
        let (mut game, storage) = new_game();
        game.redeem_promo("CYBERPUNK").unwrap();
        let old = game.state.username.clone();

        game.rename("Neo").unwrap();
        game.buy_upgrade("click1").unwrap();

        let rows: Vec<_> = game
            .leaderboard()
            .entries()
            .iter()
            .map(|e| (e.username.clone(), e.balance))
            .collect();
        assert_eq!(rows, vec![("Neo".to_string(), 950.0)]);
        assert!(rows.iter().all(|(name, _)| *name != old));
        assert!(achievements::unlocked(&game.state, game.leaderboard())
            .contains(&achievements::AchievementId::Winner));

        let again = reload(&storage, None);
        assert_eq!(again.leaderboard().entries().len(), 1);
        assert_eq!(again.leaderboard().leader().unwrap().username, "Neo");
    }

    #[test]
    fn spin_without_funds() {
        let (mut game, _) = new_game();
        game.state.balance = 189.0;
        assert!(matches!(game.spin(), Err(GameError::InsufficientFunds { .. })));
        assert!(!game.state.wheel.is_spinning());
    }

    #[test]
    fn premium_once() {
        let (mut game, _) = new_game();
        assert!(game.buy_premium().unwrap());
        assert!(!game.buy_premium().unwrap());
        assert!(game.state.has_premium);
        assert_eq!(game.state.balance, 0.0);
    }

    #[test]
    fn referral_bonus_paid_once_across_reloads() {
        let (game, storage) = new_game();
        drop(game);
        let with_ref = reload(&storage, Some("friend0001"));
        assert_eq!(with_ref.state.balance, 50.0);
        assert_eq!(with_ref.state.total_earned, 50.0);

        let again = reload(&storage, Some("friend0001"));
        assert_eq!(again.state.balance, 50.0);
        assert_eq!(again.state.referred_by.as_deref(), Some("friend0001"));
    }

    #[test]
    fn own_referral_link_pays_nothing() {
        let (game, storage) = new_game();
        let own = game.state.referral_id.clone();
        let again = reload(&storage, Some(&own));
        assert_eq!(again.state.balance, 0.0);
        assert_eq!(last_log(&again), "You cannot use your own referral link");
    }

    #[test]
    fn blank_referrer_is_ignored() {
        let (_, storage) = new_game();
        let again = reload(&storage, Some("   "));
        assert_eq!(again.state.balance, 0.0);
        assert!(again.state.claimed_referrals.is_empty());
    }

    #[test]
    fn blocked_account_refuses_everything() {
        let storage = MemoryStorage::new();
        storage.set_item(save::BLOCK_KEY, "cheating").unwrap();
        let mut game =
            CoinGame::load(Store::new(Box::new(storage.clone())), CoinRng::new(1), Some("friend"));
        assert_eq!(game.blocked_reason(), Some("cheating"));
        assert_eq!(game.state.balance, 0.0);

        assert!(matches!(game.click(), Err(GameError::Blocked { .. })));
        assert!(matches!(game.redeem_promo("MAYSTART"), Err(GameError::Blocked { .. })));
        assert!(matches!(game.spin(), Err(GameError::Blocked { .. })));
        assert!(matches!(game.buy_upgrade("click1"), Err(GameError::Blocked { .. })));
        assert!(matches!(game.rename("x"), Err(GameError::Blocked { .. })));
        assert!(matches!(game.buy_premium(), Err(GameError::Blocked { .. })));
        assert!(!game.handle_input(&InputEvent::Key('c')));

        game.state.auto_income_rate = 10;
        game.tick(100);
        assert_eq!(game.state.balance, 0.0);
        assert_eq!(storage.get_item(save::STORAGE_KEY).unwrap(), None);
    }

    #[test]
    fn save_failure_keeps_playing_and_retries() {
        let (mut game, storage) = new_game();
        storage.set_fail_writes(true);
        game.click().unwrap();
        game.click().unwrap();
        assert_eq!(game.state.balance, 2.0);
        let errors = game
            .ui
            .log
            .iter()
            .filter(|n| n.kind == NoticeKind::Error)
            .count();
        assert_eq!(errors, 1);

        storage.set_fail_writes(false);
        game.click().unwrap();
        assert_eq!(reload(&storage, None).state.balance, 3.0);
    }

    #[test]
    fn subscribers_notified_on_save() {
        let (mut game, _) = new_game();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        game.subscribe(move |s| sink.borrow_mut().push(s.whole_balance()));
        game.click().unwrap();
        game.click().unwrap();
        assert_eq!(*seen.borrow(), vec![1, 2]);
    }

    #[test]
    fn malformed_save_starts_fresh() {
        let storage = MemoryStorage::new();
        storage.set_item(save::STORAGE_KEY, "][").unwrap();
        let game = reload(&storage, None);
        assert_eq!(game.state.balance, 0.0);
        assert!(game.state.username.starts_with("Player"));
        // The fresh game was written over the broken record.
        assert!(reload(&storage, None).state.referral_id == game.state.referral_id);
    }
}
