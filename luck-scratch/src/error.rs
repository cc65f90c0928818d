use luck_core::{Money, TierId};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GameError>;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Core error: {0}")]
    Core(#[from] luck_core::CoreError),

    #[error("Invalid game state: {0}")]
    InvalidState(String),

    #[error("Invalid player count: {count} (must be between 1 and {max})")]
    InvalidPlayerCount { count: usize, max: usize },

    #[error("Unknown tier: {0}")]
    UnknownTier(TierId),

    #[error("Insufficient balance: need {need}, have {available}")]
    InsufficientBalance { need: Money, available: Money },

    #[error("No tickets available for {0}")]
    SoldOut(TierId),

    #[error("{0} is not the distributor")]
    NotDistributor(String),

    #[error("No distributor in this game")]
    NoDistributor,

    #[error("The distributor cannot buy its own tickets")]
    OwnInventory,

    #[error("Too many tickets requested: at most {max} per allocation")]
    TooManyTickets { max: u32 },
}

impl GameError {
    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }

    /// Business-rule rejections: shown to the player, the game carries on.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            GameError::InsufficientBalance { .. }
                | GameError::SoldOut(_)
                | GameError::OwnInventory
                | GameError::NotDistributor(_)
                | GameError::TooManyTickets { .. }
        )
    }
}
