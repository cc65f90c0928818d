use luck_core::{Money, TierConfig};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Outcome of a batch of draw-based cards against one tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub tier_name: String,
    pub cards: u32,
    pub spent: Money,
    pub won: Money,
    /// `(prize, hits)` in prize table order.
    pub hits: Vec<(Money, u32)>,
}

impl SimulationReport {
    pub fn net(&self) -> Money {
        self.won - self.spent
    }

    /// Observed payout as a fraction of the amount spent.
    pub fn observed_return(&self) -> f64 {
        if self.spent.to_cents() <= 0 {
            return 0.0;
        }
        self.won.to_dollars() / self.spent.to_dollars()
    }
}

/// Buys `cards` cards of `tier` with no balance limit and tallies the prizes.
pub fn run_batch<R: Rng + ?Sized>(tier: &TierConfig, cards: u32, rng: &mut R) -> SimulationReport {
    let mut hits: Vec<(Money, u32)> = tier.prizes.prizes().map(|p| (p, 0)).collect();
    let mut won = Money::ZERO;

    for _ in 0..cards {
        let prize = tier.prizes.draw(rng);
        won += prize;
        if let Some(slot) = hits.iter_mut().find(|(p, _)| *p == prize) {
            slot.1 += 1;
        }
    }

    tracing::info!("Simulated {} {} cards, paid out {}", cards, tier.name, won);

    SimulationReport {
        tier_name: tier.name.clone(),
        cards,
        spent: tier.cost * cards,
        won,
        hits,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use luck_core::GameConfig;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_batch_totals_add_up() {
        let config = GameConfig::default();
        let tier = &config.tiers[1];
        let mut rng = StdRng::seed_from_u64(2024);

        let report = run_batch(tier, 1_000, &mut rng);
        assert_eq!(report.cards, 1_000);
        assert_eq!(report.spent, Money::from_dollars(5_000));
        assert_eq!(report.hits.iter().map(|(_, n)| n).sum::<u32>(), 1_000);

        let recomputed: Money = report.hits.iter().map(|&(p, n)| p * n).sum();
        assert_eq!(recomputed, report.won);
    }

    #[test]
    fn test_batch_with_forced_draws() {
        let config = GameConfig::default();
        let mut zeros = StepRng::new(0, 0);

        let report = run_batch(&config.classic, 10, &mut zeros);
        assert_eq!(report.won, Money::ZERO);
        assert_eq!(report.hits[0], (Money::ZERO, 10));
        assert_eq!(report.net(), Money::from_dollars(-50));
        assert_eq!(report.observed_return(), 0.0);
    }
}
