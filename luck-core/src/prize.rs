use crate::error::{CoreError, Result};
use crate::types::Money;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Allowed distance between a table's probability total and 1.0.
pub const PROBABILITY_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrizeEntry {
    pub prize: Money,
    pub probability: f64,
}

/// Row of the odds display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OddsRow {
    pub prize: Money,
    pub probability: f64,
    pub cumulative: f64,
}

/// Ordered prize table. Entry order is the resolution order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PrizeEntry>", into = "Vec<PrizeEntry>")]
pub struct PrizeTable {
    entries: Vec<PrizeEntry>,
}

impl PrizeTable {
    pub fn new(entries: Vec<PrizeEntry>) -> Result<Self> {
        if entries.is_empty() {
            return Err(CoreError::prize_table("table has no entries"));
        }

        for entry in &entries {
            if entry.prize.is_negative() {
                return Err(CoreError::prize_table(format!(
                    "prize {} is negative",
                    entry.prize
                )));
            }
            if !(entry.probability > 0.0 && entry.probability <= 1.0) {
                return Err(CoreError::prize_table(format!(
                    "probability {} for prize {} must be in (0, 1]",
                    entry.probability, entry.prize
                )));
            }
        }

        let total: f64 = entries.iter().map(|e| e.probability).sum();
        if (total - 1.0).abs() > PROBABILITY_TOLERANCE {
            return Err(CoreError::prize_table(format!(
                "probabilities sum to {}, expected 1.0",
                total
            )));
        }

        Ok(Self { entries })
    }

    pub(crate) fn unchecked(entries: Vec<PrizeEntry>) -> Self {
        Self { entries }
    }

    /// Builds a table from `(prize, probability)` pairs.
    pub fn from_pairs(pairs: &[(Money, f64)]) -> Result<Self> {
        Self::new(
            pairs
                .iter()
                .map(|&(prize, probability)| PrizeEntry { prize, probability })
                .collect(),
        )
    }

    pub fn entries(&self) -> &[PrizeEntry] {
        &self.entries
    }

    pub fn prizes(&self) -> impl Iterator<Item = Money> + '_ {
        self.entries.iter().map(|e| e.prize)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the first prize whose cumulative probability exceeds `draw`.
    ///
    /// A draw the running total never exceeds (rounding, `draw >= 1.0`, NaN)
    /// resolves to the last entry.
    pub fn resolve(&self, draw: f64) -> Money {
        let mut cumulative = 0.0;
        for entry in &self.entries {
            cumulative += entry.probability;
            if draw < cumulative {
                return entry.prize;
            }
        }

        let last = self.entries.last().map_or(Money::ZERO, |e| e.prize);
        tracing::warn!(
            "Draw {} exceeded cumulative probability {}, clamping to last prize {}",
            draw,
            cumulative,
            last
        );
        last
    }

    /// Samples a uniform draw in `[0, 1)` from `rng` and resolves it.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Money {
        let draw: f64 = rng.gen();
        let prize = self.resolve(draw);
        tracing::debug!("Draw {:.6} resolved to {}", draw, prize);
        prize
    }

    /// Expected payout per card, in dollars.
    pub fn expected_value(&self) -> f64 {
        self.entries
            .iter()
            .map(|e| e.prize.to_dollars() * e.probability)
            .sum()
    }

    /// Expected payout as a fraction of the card cost.
    pub fn return_to_player(&self, cost: Money) -> f64 {
        if cost.to_cents() <= 0 {
            return 0.0;
        }
        self.expected_value() / cost.to_dollars()
    }

    pub fn odds(&self) -> Vec<OddsRow> {
        let mut cumulative = 0.0;
        self.entries
            .iter()
            .map(|e| {
                cumulative += e.probability;
                OddsRow {
                    prize: e.prize,
                    probability: e.probability,
                    cumulative,
                }
            })
            .collect()
    }
}

impl TryFrom<Vec<PrizeEntry>> for PrizeTable {
    type Error = CoreError;

    fn try_from(entries: Vec<PrizeEntry>) -> Result<Self> {
        Self::new(entries)
    }
}

impl From<PrizeTable> for Vec<PrizeEntry> {
    fn from(table: PrizeTable) -> Self {
        table.entries
    }
}
