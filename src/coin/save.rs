//! MAY COIN セーブ/ロードとリーダーボード同期。
//!
//! ## バージョニング方針
//!
//! - `SAVE_VERSION`: 現在のセーブ形式バージョン。フィールド追加時にインクリメントする。
//! - `MIN_COMPATIBLE_VERSION`: 互換性を維持できる最小バージョン。
//!   既存フィールドの意味変更や削除など破壊的変更を行った場合のみインクリメントする。
//!
//! 旧バージョンのセーブデータは、`MIN_COMPATIBLE_VERSION` 以上であれば
//! 不足フィールドにデフォルト値を補完して読み込む。

use serde::{Deserialize, Serialize};

use crate::console;
use crate::error::GameError;
use crate::storage::Storage;

use super::leaderboard::Leaderboard;
use super::rng::CoinRng;
use super::state::GameState;
use super::wheel::WheelPhase;

/// セーブデータのフォーマットバージョン。
pub const SAVE_VERSION: u32 = 1;

/// この値以上のセーブデータは、不足フィールドをデフォルト値で補完して読み込む。
pub const MIN_COMPATIBLE_VERSION: u32 = 1;

/// localStorage のキー。
pub const STORAGE_KEY: &str = "may_coin_save";
pub const LEADERBOARD_KEY: &str = "may_coin_leaderboard";

/// 管理ツールが書き込む。キーが存在すればアカウントはブロック状態。
pub const BLOCK_KEY: &str = "block_reason";

pub const DEFAULT_BLOCK_REASON: &str = "Violation of the game rules";

#[derive(Serialize, Deserialize)]
struct SaveData {
    version: u32,
    game: GameSave,
}

#[derive(Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct GameSave {
    balance: f64,
    click_power: u64,
    auto_income_rate: u64,
    total_clicks: u64,
    total_earned: f64,
    used_promo_codes: Vec<String>,
    upgrades: Vec<UpgradeSave>,
    referral_id: String,
    username: String,
    has_premium: bool,
    claimed_referrals: Vec<String>,
    referred_by: Option<String>,
    spin_ticks_left: u32,
}

/// 不足フィールドは新規ゲームの値で補完する。
impl Default for GameSave {
    fn default() -> Self {
        extract_save(&GameState::new(String::new(), String::new())).game
    }
}

/// アップグレードは `id` でカタログに対応付ける。名前・説明・ボーナスは
/// 読みやすさのためだけに保存し、ロード時はカタログの定義を使う。
#[derive(Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct UpgradeSave {
    id: String,
    name: String,
    description: String,
    cost: u64,
    click_bonus: Option<u64>,
    auto_income_bonus: Option<u64>,
    owned_count: u32,
}

fn extract_save(state: &GameState) -> SaveData {
    SaveData {
        version: SAVE_VERSION,
        game: GameSave {
            balance: state.balance,
            click_power: state.click_power,
            auto_income_rate: state.auto_income_rate,
            total_clicks: state.total_clicks,
            total_earned: state.total_earned,
            used_promo_codes: state.used_promo_codes.iter().cloned().collect(),
            upgrades: state
                .upgrades
                .iter()
                .map(|u| UpgradeSave {
                    id: u.id.clone(),
                    name: u.name.clone(),
                    description: u.description.clone(),
                    cost: u.cost,
                    click_bonus: u.click_bonus(),
                    auto_income_bonus: u.auto_income_bonus(),
                    owned_count: u.owned,
                })
                .collect(),
            referral_id: state.referral_id.clone(),
            username: state.username.clone(),
            has_premium: state.has_premium,
            claimed_referrals: state.claimed_referrals.iter().cloned().collect(),
            referred_by: state.referred_by.clone(),
            spin_ticks_left: state.wheel.ticks_left(),
        },
    }
}

/// セーブデータを GameState に復元する。
/// 保存された ID が空なら `state` 側の ID を残す。未知のアップグレードは無視。
fn apply_save(state: &mut GameState, save: &GameSave) {
    state.balance = non_negative(save.balance);
    state.click_power = save.click_power.max(1);
    state.auto_income_rate = save.auto_income_rate;
    state.total_clicks = save.total_clicks;
    state.total_earned = non_negative(save.total_earned);
    state.used_promo_codes = save.used_promo_codes.iter().cloned().collect();

    for saved in &save.upgrades {
        if let Some(u) = state.upgrades.iter_mut().find(|u| u.id == saved.id) {
            u.owned = saved.owned_count;
            if saved.cost > 0 {
                u.cost = saved.cost;
            }
        }
    }

    if !save.referral_id.is_empty() {
        state.referral_id = save.referral_id.clone();
    }
    if !save.username.trim().is_empty() {
        state.username = save.username.clone();
    }
    state.has_premium = save.has_premium;
    state.claimed_referrals = save.claimed_referrals.iter().cloned().collect();
    state.referred_by = save.referred_by.clone();
    state.wheel = WheelPhase::from_ticks_left(save.spin_ticks_left);
}

/// 手編集された記録の負数や NaN は 0 に丸める。
fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

type Listener = Box<dyn FnMut(&GameState)>;

/// ストレージを所有する。永続化はすべてここを通る。
pub struct Store {
    storage: Box<dyn Storage>,
    listeners: Vec<Listener>,
}

impl Store {
    pub fn new(storage: Box<dyn Storage>) -> Self {
        Self {
            storage,
            listeners: Vec::new(),
        }
    }

    /// セーブデータを読み込む。
    ///
    /// 未保存、または `MIN_COMPATIBLE_VERSION` より古い場合は `Ok(None)`
    /// （古いデータは削除する）。パースできないデータはエラーとして返し、
    /// 削除は呼び出し側に任せる。
    pub fn load(&self, rng: &mut CoinRng) -> Result<Option<GameState>, GameError> {
        let Some(json) = self.storage.get_item(STORAGE_KEY)? else {
            return Ok(None);
        };
        let save_data: SaveData = serde_json::from_str(&json)?;

        if save_data.version < MIN_COMPATIBLE_VERSION {
            console::info(&format!(
                "セーブバージョンが古すぎます (saved={}, min_compatible={})。新規ゲームを開始します。",
                save_data.version, MIN_COMPATIBLE_VERSION
            ));
            self.storage.remove_item(STORAGE_KEY)?;
            return Ok(None);
        }
        if save_data.version < SAVE_VERSION {
            console::info(&format!(
                "旧バージョンのセーブデータをマイグレーション (saved={}, current={})。",
                save_data.version, SAVE_VERSION
            ));
        }

        let mut state = GameState::first_run(rng);
        apply_save(&mut state, &save_data.game);
        Ok(Some(state))
    }

    /// セーブデータを読み込む。無ければ新規ゲームを作る。
    ///
    /// 失敗しない: 読み込みエラーや壊れたデータはログに出し、壊れたデータは
    /// 削除して新しい ID で新規ゲームを返す。復元できた場合はフラグが true。
    pub fn load_or_new(&self, rng: &mut CoinRng) -> (GameState, bool) {
        match self.load(rng) {
            Ok(Some(state)) => (state, true),
            Ok(None) => (GameState::first_run(rng), false),
            Err(e @ GameError::MalformedSavedState(_)) => {
                console::warn(&format!("セーブデータのパースに失敗（破棄します）: {e}"));
                if let Err(e) = self.storage.remove_item(STORAGE_KEY) {
                    console::warn(&format!("セーブデータの削除に失敗: {e}"));
                }
                (GameState::first_run(rng), false)
            }
            Err(e) => {
                console::warn(&format!("セーブデータの読み込みに失敗: {e}"));
                (GameState::first_run(rng), false)
            }
        }
    }

    /// `state` を保存し、スコアをリーダーボードに反映する。
    ///
    /// 両方の書き込みが成功した後にだけ購読者へ通知する。
    /// 更新後のリーダーボードを返す。
    pub fn save(&mut self, state: &GameState) -> Result<Leaderboard, GameError> {
        let json = serde_json::to_string(&extract_save(state))?;
        self.storage.set_item(STORAGE_KEY, &json)?;

        let mut board = self.load_leaderboard();
        board.upsert(&state.username, state.balance);
        let json = serde_json::to_string(&board)?;
        self.storage.set_item(LEADERBOARD_KEY, &json)?;

        for listener in &mut self.listeners {
            listener(state);
        }
        Ok(board)
    }

    /// 名前変更に合わせて、プレイヤーの行を `old` から `new` へ移す。
    ///
    /// `new` の行が既にある場合は古い行を消すだけ。次のセーブで `new` の
    /// 残高が上書きされる。
    pub fn rename_player(&mut self, old: &str, new: &str) -> Result<Leaderboard, GameError> {
        let mut board = self.load_leaderboard();
        board.rename(old, new);
        let json = serde_json::to_string(&board)?;
        self.storage.set_item(LEADERBOARD_KEY, &json)?;
        Ok(board)
    }

    /// 現在のリーダーボード。未保存・読み込み失敗時は空。
    pub fn load_leaderboard(&self) -> Leaderboard {
        let json = match self.storage.get_item(LEADERBOARD_KEY) {
            Ok(Some(json)) => json,
            Ok(None) => return Leaderboard::new(),
            Err(e) => {
                console::warn(&format!("リーダーボードの読み込みに失敗: {e}"));
                return Leaderboard::new();
            }
        };
        match serde_json::from_str::<Leaderboard>(&json) {
            Ok(mut board) => {
                board.normalize();
                board
            }
            Err(e) => {
                console::warn(&format!("リーダーボードのパースに失敗（無視します）: {e}"));
                Leaderboard::new()
            }
        }
    }

    /// セーブ成功のたびに呼ばれるコールバックを登録する。
    pub fn subscribe(&mut self, listener: impl FnMut(&GameState) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// ブロックされていれば `Some(reason)`。理由が空でもブロックし、
    /// 既定の文言を使う。
    pub fn block_reason(&self) -> Option<String> {
        let reason = match self.storage.get_item(BLOCK_KEY) {
            Ok(reason) => reason?,
            Err(e) => {
                console::warn(&format!("ブロック状態の読み込みに失敗: {e}"));
                return None;
            }
        };
        let reason = reason.trim();
        if reason.is_empty() {
            Some(DEFAULT_BLOCK_REASON.to_string())
        } else {
            Some(reason.to_string())
        }
    }
}
