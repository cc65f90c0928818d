use crate::display::{self, heavy_rule, light_rule};
use crate::prompt;
use anyhow::Result;
use luck_core::{GameConfig, GameMode, Money, TierId};
use luck_scratch::{seeded_rng, GameError, Session, TurnAction};
use rand::rngs::StdRng;

/// Interactive game loop. Returns once a player picks Quit.
pub fn run_game(mode: GameMode, config: GameConfig, seed: Option<u64>) -> Result<()> {
    println!("{}", heavy_rule());
    println!("WELCOME TO LUCK SIMULATOR! ({} mode)", mode);
    println!("{}", heavy_rule());

    let mut session = setup_session(mode, config, seed)?;

    println!("\n{}", heavy_rule());
    println!("Players created!");
    for player in session.players() {
        println!("  {}", player);
    }
    println!("{}\n", heavy_rule());

    session.start()?;

    loop {
        show_menu(&session)?;

        match prompt::menu_choice()? {
            TurnAction::Play => {
                if session.current()?.is_distributor() {
                    create_tickets(&mut session)?;
                } else {
                    play_scratch_card(&mut session)?;
                }
            }
            TurnAction::Stats => {
                display::print_stats(&session);
                prompt::pause()?;
            }
            TurnAction::EndTurn => {
                let name = session.current()?.name().to_string();
                session.end_turn()?;
                println!("\n{} ended their turn.", name);
                prompt::pause()?;
            }
            TurnAction::Quit => {
                println!("\nThanks for playing!");
                session.quit()?;
                display::print_stats(&session);
                println!(
                    "Session started {}",
                    session.started_at().format("%Y-%m-%d %H:%M:%S UTC")
                );
                println!(
                    "Session length: {}m {}s",
                    session.elapsed().num_minutes(),
                    session.elapsed().num_seconds() % 60
                );
                return Ok(());
            }
        }
    }
}

fn setup_session(mode: GameMode, config: GameConfig, seed: Option<u64>) -> Result<Session<StdRng>> {
    let distributor_name = if mode == GameMode::Distributor {
        Some(prompt::distributor_name()?)
    } else {
        None
    };

    let count = prompt::player_count(config.max_players)?;
    let names = (0..count)
        .map(prompt::player_name)
        .collect::<Result<Vec<_>>>()?;

    let rng = seeded_rng(seed);
    let session = match distributor_name {
        Some(distributor) => Session::with_distributor(config, &distributor, &names, rng)?,
        None => Session::new(mode, config, &names, rng)?,
    };
    Ok(session)
}

fn show_menu(session: &Session<StdRng>) -> Result<()> {
    let player = session.current()?;
    let play_label = match (session.mode(), player.is_distributor()) {
        (_, true) => "Create Tickets",
        (GameMode::Distributor, false) => "Buy Ticket",
        _ => "Play Scratch Card",
    };

    println!("\n{}", heavy_rule());
    println!("{}'s Turn", player.name());
    println!("Balance: {}", player.balance());
    println!("{}", heavy_rule());
    println!("\nWhat would you like to do?");
    println!("1. {}", play_label);
    println!("2. View Stats");
    println!("3. End Turn");
    println!("4. Quit Game");
    println!("{}", light_rule());
    Ok(())
}

fn choose_tier(session: &Session<StdRng>) -> Result<TierId> {
    let tiers = session.tiers();
    if tiers.len() == 1 {
        return Ok(TierId::SAFE);
    }

    println!("\nAvailable tiers:");
    for (index, tier) in tiers.iter().enumerate() {
        let id = TierId::from_index(index);
        match session.available_count(id) {
            Ok(left) => println!("  {}. {} - {} ({} left)", id.number(), tier.name, tier.cost, left),
            Err(_) => println!("  {}. {} - {}", id.number(), tier.name, tier.cost),
        }
    }

    prompt::tier_choice(tiers.len())
}

fn play_scratch_card(session: &mut Session<StdRng>) -> Result<()> {
    let tier = choose_tier(session)?;
    let (name, cost) = {
        let config = session.tier(tier)?;
        (config.name.clone(), config.cost)
    };
    let player = session.current()?;

    println!("\n{}", light_rule());
    println!("{} - Cost: {}", name.to_uppercase(), cost);
    println!("{}'s balance: {}", player.name(), player.balance());
    println!("{}", light_rule());

    if !player.can_afford(cost) {
        println!("Sorry {}, you don't have enough money!", player.name());
        return prompt::pause();
    }

    if !prompt::confirm(format!("Buy a {} card for {}?", name, cost))? {
        println!("Cancelled.");
        return prompt::pause();
    }

    match session.purchase(tier) {
        Ok(purchase) => {
            println!("\nScratching...");
            println!("{}", ".".repeat(20));
            if let Some(serial) = purchase.serial {
                println!("Ticket #{}", serial);
            }
            println!("{}", display::purchase_message(&purchase));
            println!("\nNew balance: {}", purchase.balance_after);
        }
        Err(e) if e.is_rejection() => println!("{}", rejection_message(&e)),
        Err(e) => return Err(e.into()),
    }

    prompt::pause()
}

fn create_tickets(session: &mut Session<StdRng>) -> Result<()> {
    println!("\n{}", light_rule());
    println!("CREATE TICKETS");
    println!("{}", light_rule());

    let tiers: Vec<_> = session.tiers().to_vec();
    for (index, tier) in tiers.iter().enumerate() {
        let id = TierId::from_index(index);
        println!(
            "\n{}. {} - sells for {}, costs {} per ticket to create",
            id.number(),
            tier.name,
            tier.cost,
            tier.creation_cost
        );

        let mut distribution: Vec<(Money, u32)> = Vec::new();
        for prize in tier.prizes.prizes() {
            distribution.push((prize, prompt::ticket_count(prize)?));
        }

        match session.allocate(id, &distribution) {
            Ok(allocation) if allocation.created == 0 => {
                println!("No {} tickets created.", tier.name);
            }
            Ok(allocation) => println!(
                "Created {} {} tickets for {}.",
                allocation.created, tier.name, allocation.total_cost
            ),
            Err(e) if e.is_rejection() => println!("{}", rejection_message(&e)),
            Err(e) => return Err(e.into()),
        }
    }

    if let Some(distributor) = session.distributor() {
        println!("\nBalance: {}", distributor.balance());
        println!("{}", display::inventory_table(distributor, session.tiers()));
    }

    prompt::pause()
}

fn rejection_message(error: &GameError) -> String {
    match error {
        GameError::InsufficientBalance { need, available } => format!(
            "Sorry, you don't have enough money! Need {}, have {}.",
            need, available
        ),
        GameError::SoldOut(tier) => format!("Sorry, {} is sold out.", tier),
        GameError::OwnInventory => "You cannot buy your own tickets.".to_string(),
        GameError::TooManyTickets { max } => {
            format!("Too many tickets! Create at most {} at a time.", max)
        }
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_messages() {
        let insufficient = GameError::InsufficientBalance {
            need: Money::from_dollars(5),
            available: Money::from_dollars(3),
        };
        assert_eq!(
            rejection_message(&insufficient),
            "Sorry, you don't have enough money! Need $5.00, have $3.00."
        );
        assert_eq!(
            rejection_message(&GameError::SoldOut(TierId::RISKY)),
            "Sorry, tier 3 is sold out."
        );
        assert_eq!(
            rejection_message(&GameError::OwnInventory),
            "You cannot buy your own tickets."
        );
        assert_eq!(
            rejection_message(&GameError::TooManyTickets { max: 100_000 }),
            "Too many tickets! Create at most 100000 at a time."
        );
    }
}
