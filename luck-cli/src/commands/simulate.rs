use crate::display::{heavy_rule, percent, simulation_table};
use anyhow::{anyhow, Result};
use luck_core::{GameConfig, GameMode, TierId};
use luck_scratch::{run_batch, seeded_rng};

pub fn run_simulation(
    config: &GameConfig,
    mode: GameMode,
    tier_number: u8,
    cards: u32,
    seed: Option<u64>,
) -> Result<()> {
    let tier = TierId::new(tier_number)
        .and_then(|id| config.tier(mode, id))
        .ok_or_else(|| {
            anyhow!(
                "Invalid tier: {}. {} mode has {} tier(s)",
                tier_number,
                mode,
                config.lineup(mode).len()
            )
        })?;

    let mut rng = seeded_rng(seed);
    let report = run_batch(tier, cards, &mut rng);

    println!("Simulated {} x {} ({} each)", report.cards, report.tier_name, tier.cost);
    println!("{}", heavy_rule());
    println!("{}", simulation_table(&report));
    println!("Total Spent: {}", report.spent);
    println!("Total Won: {}", report.won);
    println!("Net: {}", report.net());
    println!(
        "Observed return: {} (expected {})",
        percent(report.observed_return()),
        percent(tier.prizes.return_to_player(tier.cost))
    );

    Ok(())
}
