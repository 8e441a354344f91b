//! Error taxonomy for MAY COIN.
//!
//! None of these are fatal. Game rules return them to reject an action and
//! leave state untouched; the session turns them into a notice in the log.

use thiserror::Error;

/// Everything that can go wrong while playing.
#[derive(Debug, Error)]
pub enum GameError {
    /// Buy or spin attempted with too little balance.
    #[error("insufficient funds: need {needed}, have {balance}")]
    InsufficientFunds { needed: u64, balance: u64 },

    /// Upgrade id not present in the catalog.
    #[error("unknown upgrade: {0}")]
    UnknownUpgrade(String),

    #[error("invalid promo code: {0}")]
    InvalidPromoCode(String),

    #[error("promo code already used: {0}")]
    PromoAlreadyUsed(String),

    /// Referral link points back at this player.
    #[error("cannot redeem your own referral link")]
    SelfReferral,

    #[error("referral from {0} already claimed")]
    ReferralAlreadyClaimed(String),

    /// A spin is already in progress.
    #[error("the wheel is already spinning")]
    WheelBusy,

    #[error("username must be 1 to 24 characters")]
    InvalidUsername,

    /// The account was blocked by an administrator.
    #[error("account blocked: {reason}")]
    Blocked { reason: String },

    /// Local storage missing or a read/write failed.
    #[error("storage unavailable: {0}")]
    PersistenceUnavailable(String),

    /// The saved record could not be parsed.
    #[error("malformed save data: {0}")]
    MalformedSavedState(#[from] serde_json::Error),
}

impl GameError {
    /// Short message suitable for the in-game notice log.
    pub fn notice(&self) -> String {
        match self {
            GameError::InsufficientFunds { needed, balance } => {
                format!("Not enough coins: {} more needed", needed.saturating_sub(*balance))
            }
            GameError::UnknownUpgrade(id) => format!("No such upgrade: {}", id),
            GameError::InvalidPromoCode(_) => "Invalid promo code".to_string(),
            GameError::PromoAlreadyUsed(_) => "Promo code already used".to_string(),
            GameError::SelfReferral => "You cannot use your own referral link".to_string(),
            GameError::ReferralAlreadyClaimed(_) => "Referral bonus already received".to_string(),
            GameError::WheelBusy => "The wheel is still spinning".to_string(),
            GameError::InvalidUsername => "Name must be 1-24 characters".to_string(),
            GameError::Blocked { reason } => format!("Account blocked: {}", reason),
            GameError::PersistenceUnavailable(_) => {
                "Progress could not be saved (playing offline)".to_string()
            }
            GameError::MalformedSavedState(_) => "Saved progress was corrupted and reset".to_string(),
        }
    }
}
