use crate::display::{heavy_rule, odds_table, percent};
use anyhow::Result;
use luck_core::{GameConfig, GameMode, TierId};

pub fn show_odds(config: &GameConfig, mode: GameMode) -> Result<()> {
    println!("Prize odds ({} mode)", mode);
    println!("{}", heavy_rule());

    for (index, tier) in config.lineup(mode).iter().enumerate() {
        let id = TierId::from_index(index);
        println!();
        println!("{}. {} - Cost: {}", id.number(), tier.name, tier.cost);
        if mode.uses_inventory() {
            println!("   Creation cost per ticket: {}", tier.creation_cost);
        }
        println!("{}", odds_table(tier));
        println!(
            "   Expected payout: ${:.2} per card ({} return)",
            tier.prizes.expected_value(),
            percent(tier.prizes.return_to_player(tier.cost))
        );
    }

    Ok(())
}
