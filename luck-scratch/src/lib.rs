//! Scratch-card game sessions
//!
//! Players buy cards whose prize is either drawn from a prize table at
//! purchase time or fixed in advance by a distributor's ticket inventory.

pub mod error;
pub mod game;
pub mod inventory;
pub mod player;
pub mod simulate;

pub use error::{GameError, Result};
pub use game::{GameState, Purchase, Session, TurnAction, Verdict, DEFAULT_DISTRIBUTOR_NAME};
pub use inventory::{Allocation, InventorySummary, ScratchTicket, TicketInventory};
pub use player::{DistributorRole, Player, PlayerStats, MAX_TICKETS_PER_ALLOCATION};
pub use simulate::{run_batch, SimulationReport};

use luck_core::{GameConfig, GameMode};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Creates a session seeded from `seed`, or from OS entropy when `None`.
pub fn create_session(
    mode: GameMode,
    config: GameConfig,
    player_names: &[String],
    seed: Option<u64>,
) -> Result<Session<StdRng>> {
    Session::new(mode, config, player_names, seeded_rng(seed))
}

pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
