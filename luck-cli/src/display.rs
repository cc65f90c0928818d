use comfy_table::{presets::UTF8_FULL, Table};
use luck_core::{Money, TierConfig, TierId};
use luck_scratch::{InventorySummary, Player, Purchase, Session, SimulationReport, Verdict};
use rand::Rng;

const RULE_WIDTH: usize = 50;

pub fn heavy_rule() -> String {
    "=".repeat(RULE_WIDTH)
}

pub fn light_rule() -> String {
    "-".repeat(RULE_WIDTH)
}

pub fn percent(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}

/// Result line shown after a card is scratched.
pub fn purchase_message(purchase: &Purchase) -> String {
    match purchase.verdict() {
        Verdict::Loss => "Better luck next time! You won $0.00".to_string(),
        Verdict::Partial => format!(
            "You won {}! (Net: {})",
            purchase.prize,
            purchase.net()
        ),
        Verdict::BreakEven => format!("You won {}! (Break even!)", purchase.prize),
        Verdict::Win => format!(
            "WINNER! You won {}! (Net: +{})",
            purchase.prize,
            purchase.net()
        ),
    }
}

pub fn stats_table(players: &[Player]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec![
        "Player",
        "Balance",
        "Games Played",
        "Total Spent",
        "Total Won",
        "ROI",
    ]);

    for player in players {
        let stats = player.stats();
        let roi = stats
            .roi()
            .map(|roi| format!("{:.1}%", roi))
            .unwrap_or_else(|| "-".to_string());
        let name = if player.is_distributor() {
            format!("{} (distributor)", player.name())
        } else {
            player.name().to_string()
        };

        table.add_row(vec![
            name,
            player.balance().to_string(),
            stats.games_played.to_string(),
            stats.total_spent.to_string(),
            stats.total_won.to_string(),
            roi,
        ]);
    }

    table
}

/// Stock and sales per tier for the distributor seat.
pub fn inventory_table(distributor: &Player, tiers: &[TierConfig]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Tier", "Cost", "Available", "Sold", "Prizes Owed"]);

    for (index, tier) in tiers.iter().enumerate() {
        let id = TierId::from_index(index);
        let summary = distributor
            .distributor()
            .and_then(|role| role.inventory(id))
            .map(|inventory| inventory.summary())
            .unwrap_or(InventorySummary {
                available: 0,
                sold: 0,
                liability: Money::ZERO,
            });

        table.add_row(vec![
            format!("{}. {}", id.number(), tier.name),
            tier.cost.to_string(),
            summary.available.to_string(),
            summary.sold.to_string(),
            summary.liability.to_string(),
        ]);
    }

    table
}

pub fn odds_table(tier: &TierConfig) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Prize", "Probability", "Cumulative"]);

    for row in tier.prizes.odds() {
        table.add_row(vec![
            row.prize.to_string(),
            percent(row.probability),
            percent(row.cumulative),
        ]);
    }

    table
}

pub fn simulation_table(report: &SimulationReport) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Prize", "Hits", "Observed"]);

    for &(prize, hits) in &report.hits {
        let observed = if report.cards == 0 {
            0.0
        } else {
            f64::from(hits) / f64::from(report.cards)
        };
        table.add_row(vec![prize.to_string(), hits.to_string(), percent(observed)]);
    }

    table
}

pub fn print_stats<R: Rng>(session: &Session<R>) {
    println!("\n{}", heavy_rule());
    println!("PLAYER STATISTICS");
    println!("{}", heavy_rule());
    println!("{}", stats_table(session.players()));

    if let Some(distributor) = session.distributor() {
        if let Some(role) = distributor.distributor() {
            println!();
            println!("Distributor: {}", distributor.name());
            println!("  Tickets Sold: {}", role.sold());
            println!("  Revenue: {}", role.revenue());
            println!("  Creation Costs: {}", role.creation_spent());
            println!("  Prizes Still Owed: {}", role.liability());
            println!("{}", inventory_table(distributor, session.tiers()));
        }
    }
    println!("{}", heavy_rule());
}
