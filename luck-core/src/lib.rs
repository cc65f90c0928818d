//! Luck simulator core - currency, prize tables and game configuration
//!
//! Prize resolution maps one uniform draw in `[0, 1)` through the
//! cumulative probabilities of an ordered [`PrizeTable`].

pub mod config;
pub mod error;
pub mod prize;
pub mod types;

pub use config::{GameConfig, TierConfig, TIER_COUNT};
pub use error::{CoreError, Result};
pub use prize::{OddsRow, PrizeEntry, PrizeTable};
pub use types::{GameMode, Money, TierId};
