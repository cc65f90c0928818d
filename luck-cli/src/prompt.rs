//! Console prompts. Invalid input is rejected by the validators and
//! dialoguer asks again, so callers only ever see well-formed values.

use anyhow::Result;
use dialoguer::{Confirm, Input};
use luck_core::{Money, TierId};
use luck_scratch::TurnAction;

pub fn parse_player_count(input: &str, max: usize) -> std::result::Result<usize, String> {
    let count: usize = input
        .trim()
        .parse()
        .map_err(|_| "Please enter a valid number.".to_string())?;

    if (1..=max).contains(&count) {
        Ok(count)
    } else {
        Err(format!("Please enter a number between 1 and {}.", max))
    }
}

pub fn parse_menu_choice(input: &str) -> std::result::Result<TurnAction, String> {
    TurnAction::from_choice(input).ok_or_else(|| "Invalid choice. Please try again.".to_string())
}

pub fn parse_tier_choice(input: &str, tiers: usize) -> std::result::Result<TierId, String> {
    let number: u8 = input
        .trim()
        .parse()
        .map_err(|_| "Please enter a valid number.".to_string())?;

    match TierId::new(number) {
        Some(tier) if tier.index() < tiers => Ok(tier),
        _ => Err(format!("Please choose a tier between 1 and {}.", tiers)),
    }
}

pub fn player_count(max: usize) -> Result<usize> {
    let input: String = Input::new()
        .with_prompt(format!("How many players? (1-{})", max))
        .validate_with(|s: &String| parse_player_count(s, max).map(|_| ()))
        .interact_text()?;

    parse_player_count(&input, max).map_err(anyhow::Error::msg)
}

/// Raw name as typed; blank input is allowed and replaced when seating.
pub fn player_name(position: usize) -> Result<String> {
    let name: String = Input::new()
        .with_prompt(format!("Enter name for Player {}", position + 1))
        .allow_empty(true)
        .interact_text()?;
    Ok(name)
}

pub fn distributor_name() -> Result<String> {
    let name: String = Input::new()
        .with_prompt("Enter name for the Distributor")
        .allow_empty(true)
        .interact_text()?;
    Ok(name)
}

pub fn menu_choice() -> Result<TurnAction> {
    let input: String = Input::new()
        .with_prompt("Choose an option (1-4)")
        .validate_with(|s: &String| parse_menu_choice(s).map(|_| ()))
        .interact_text()?;

    parse_menu_choice(&input).map_err(anyhow::Error::msg)
}

pub fn tier_choice(tiers: usize) -> Result<TierId> {
    let input: String = Input::new()
        .with_prompt(format!("Choose a tier (1-{})", tiers))
        .validate_with(|s: &String| parse_tier_choice(s, tiers).map(|_| ()))
        .interact_text()?;

    parse_tier_choice(&input, tiers).map_err(anyhow::Error::msg)
}

/// Non-integer input is re-prompted by dialoguer's parser.
pub fn ticket_count(prize: Money) -> Result<u32> {
    let count: u32 = Input::new()
        .with_prompt(format!("  Tickets with prize {}", prize))
        .default(0)
        .interact_text()?;
    Ok(count)
}

pub fn confirm(prompt: String) -> Result<bool> {
    Ok(Confirm::new().with_prompt(prompt).default(false).interact()?)
}

pub fn pause() -> Result<()> {
    let _: String = Input::new()
        .with_prompt("Press Enter to continue")
        .allow_empty(true)
        .report(false)
        .interact_text()?;
    Ok(())
}
