use crate::error::{CoreError, Result};
use crate::prize::{PrizeEntry, PrizeTable};
use crate::types::{GameMode, Money, TierId};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Number of tiers in tiered and distributor mode.
pub const TIER_COUNT: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierConfig {
    pub name: String,
    pub cost: Money,
    /// What the distributor pays to create one ticket of this tier.
    #[serde(default)]
    pub creation_cost: Money,
    pub prizes: PrizeTable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub classic_starting_balance: Money,
    pub starting_balance: Money,
    pub distributor_starting_balance: Money,
    pub max_players: usize,
    pub classic: TierConfig,
    pub tiers: Vec<TierConfig>,
}

// Built-in tables; `validate` still checks them.
fn table(pairs: &[(i64, f64)]) -> PrizeTable {
    PrizeTable::unchecked(
        pairs
            .iter()
            .map(|&(dollars, probability)| PrizeEntry {
                prize: Money::from_dollars(dollars),
                probability,
            })
            .collect(),
    )
}

impl Default for GameConfig {
    fn default() -> Self {
        let standard_prizes = table(&[(0, 0.70), (2, 0.15), (10, 0.10), (25, 0.04), (100, 0.01)]);

        Self {
            classic_starting_balance: Money::from_dollars(100),
            starting_balance: Money::from_dollars(500),
            distributor_starting_balance: Money::from_dollars(50_000),
            max_players: 4,
            classic: TierConfig {
                name: "Scratch Card".to_string(),
                cost: Money::from_dollars(5),
                creation_cost: Money::ZERO,
                prizes: standard_prizes.clone(),
            },
            tiers: vec![
                TierConfig {
                    name: "Safe".to_string(),
                    cost: Money::from_dollars(2),
                    creation_cost: Money::from_cents(10),
                    prizes: table(&[(0, 0.55), (1, 0.20), (2, 0.15), (5, 0.08), (10, 0.02)]),
                },
                TierConfig {
                    name: "Medium".to_string(),
                    cost: Money::from_dollars(5),
                    creation_cost: Money::from_cents(25),
                    prizes: standard_prizes,
                },
                TierConfig {
                    name: "Risky".to_string(),
                    cost: Money::from_dollars(20),
                    creation_cost: Money::from_dollars(1),
                    prizes: table(&[
                        (0, 0.85),
                        (10, 0.07),
                        (50, 0.05),
                        (200, 0.025),
                        (1000, 0.005),
                    ]),
                },
            ],
        }
    }
}

impl GameConfig {
    /// Loads a JSON config file and validates it.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: GameConfig = serde_json::from_str(&content)?;
        config.validate()?;
        tracing::info!("Loaded game config from {}", path.display());
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_players == 0 {
            return Err(CoreError::config("Max players must be at least 1"));
        }

        if self.tiers.len() != TIER_COUNT {
            return Err(CoreError::config(format!(
                "Expected {} tiers, found {}",
                TIER_COUNT,
                self.tiers.len()
            )));
        }

        for balance in [
            self.classic_starting_balance,
            self.starting_balance,
            self.distributor_starting_balance,
        ] {
            if balance.is_negative() {
                return Err(CoreError::config(format!(
                    "Starting balance {} cannot be negative",
                    balance
                )));
            }
        }

        std::iter::once(&self.classic)
            .chain(self.tiers.iter())
            .try_for_each(validate_tier)
    }

    /// Tiers in play for `mode`, in menu order.
    pub fn lineup(&self, mode: GameMode) -> &[TierConfig] {
        match mode {
            GameMode::Classic => std::slice::from_ref(&self.classic),
            GameMode::Tiered | GameMode::Distributor => &self.tiers,
        }
    }

    pub fn player_balance(&self, mode: GameMode) -> Money {
        match mode {
            GameMode::Classic => self.classic_starting_balance,
            GameMode::Tiered | GameMode::Distributor => self.starting_balance,
        }
    }

    pub fn tier(&self, mode: GameMode, tier: TierId) -> Option<&TierConfig> {
        self.lineup(mode).get(tier.index())
    }
}

fn validate_tier(tier: &TierConfig) -> Result<()> {
    if tier.name.trim().is_empty() {
        return Err(CoreError::config("Tier name cannot be empty"));
    }

    if tier.cost.to_cents() <= 0 {
        return Err(CoreError::config(format!(
            "Cost of '{}' must be greater than 0",
            tier.name
        )));
    }

    if tier.creation_cost.is_negative() {
        return Err(CoreError::config(format!(
            "Creation cost of '{}' cannot be negative",
            tier.name
        )));
    }

    // Serde already validated the table; this catches tables edited in code.
    PrizeTable::new(tier.prizes.entries().to_vec())
        .map_err(|e| CoreError::config(format!("Tier '{}': {}", tier.name, e)))?;

    Ok(())
}
