use crate::inventory::{Allocation, ScratchTicket, TicketInventory};
use crate::{GameError, Result};
use luck_core::{Money, TierId};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// Upper bound on the tickets a single allocation may create.
pub const MAX_TICKETS_PER_ALLOCATION: u32 = 100_000;

/// Cumulative play statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub games_played: u32,
    pub total_spent: Money,
    pub total_won: Money,
}

impl PlayerStats {
    pub fn net(&self) -> Money {
        self.total_won - self.total_spent
    }

    /// Return on investment in percent, `None` before the first card.
    pub fn roi(&self) -> Option<f64> {
        if self.total_spent.to_cents() <= 0 {
            return None;
        }
        Some(self.net().to_dollars() / self.total_spent.to_dollars() * 100.0)
    }
}

/// Ticket inventories and sales counters of the distributor seat.
#[derive(Debug, Clone, Default)]
pub struct DistributorRole {
    inventories: BTreeMap<TierId, TicketInventory>,
    sold: u32,
    revenue: Money,
    creation_spent: Money,
}

impl DistributorRole {
    pub fn inventory(&self, tier: TierId) -> Option<&TicketInventory> {
        self.inventories.get(&tier)
    }

    pub fn sold(&self) -> u32 {
        self.sold
    }

    pub fn revenue(&self) -> Money {
        self.revenue
    }

    pub fn creation_spent(&self) -> Money {
        self.creation_spent
    }

    /// Prizes still owed across all tiers.
    pub fn liability(&self) -> Money {
        self.inventories.values().map(|i| i.liability()).sum()
    }
}

/// A seat in the game. The distributor is a player carrying a
/// [`DistributorRole`].
pub struct Player {
    id: Uuid,
    name: String,
    balance: Money,
    stats: PlayerStats,
    distributor: Option<DistributorRole>,
}

impl Player {
    pub fn new(name: impl Into<String>, balance: Money) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            balance,
            stats: PlayerStats::default(),
            distributor: None,
        }
    }

    pub fn new_distributor(name: impl Into<String>, balance: Money) -> Self {
        Self {
            distributor: Some(DistributorRole::default()),
            ..Self::new(name, balance)
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn balance(&self) -> Money {
        self.balance
    }

    pub fn stats(&self) -> &PlayerStats {
        &self.stats
    }

    pub fn is_distributor(&self) -> bool {
        self.distributor.is_some()
    }

    pub fn distributor(&self) -> Option<&DistributorRole> {
        self.distributor.as_ref()
    }

    pub fn can_afford(&self, cost: Money) -> bool {
        self.balance >= cost
    }

    pub(crate) fn debit(&mut self, amount: Money) {
        self.balance -= amount;
    }

    pub(crate) fn credit(&mut self, amount: Money) {
        self.balance += amount;
    }

    pub(crate) fn record_game(&mut self, cost: Money, winnings: Money) {
        self.stats.games_played += 1;
        self.stats.total_spent += cost;
        self.stats.total_won += winnings;
    }

    /// Creates `count` tickets per prize value for `tier`, charging
    /// `unit_creation_cost` for each one.
    pub fn allocate<R: Rng + ?Sized>(
        &mut self,
        tier: TierId,
        cost: Money,
        distribution: &[(Money, u32)],
        unit_creation_cost: Money,
        rng: &mut R,
    ) -> Result<Allocation> {
        let role = self
            .distributor
            .as_mut()
            .ok_or_else(|| GameError::NotDistributor(self.name.clone()))?;

        let count = distribution
            .iter()
            .try_fold(0u32, |total, &(_, n)| total.checked_add(n))
            .filter(|&count| count <= MAX_TICKETS_PER_ALLOCATION)
            .ok_or(GameError::TooManyTickets {
                max: MAX_TICKETS_PER_ALLOCATION,
            })?;
        let total_cost = unit_creation_cost * count;
        if total_cost > self.balance {
            return Err(GameError::InsufficientBalance {
                need: total_cost,
                available: self.balance,
            });
        }

        let created = role
            .inventories
            .entry(tier)
            .or_default()
            .stock(tier, cost, distribution, rng);
        self.balance -= total_cost;
        role.creation_spent += total_cost;

        tracing::info!(
            "{} created {} tickets for {} at a cost of {}",
            self.name,
            created,
            tier,
            total_cost
        );

        Ok(Allocation {
            tier,
            created,
            total_cost,
        })
    }

    /// Unscratched tickets of `tier`, empty for regular players.
    pub fn available(&self, tier: TierId) -> &[ScratchTicket] {
        self.distributor
            .as_ref()
            .and_then(|role| role.inventory(tier))
            .map(|inventory| inventory.available())
            .unwrap_or(&[])
    }

    pub fn available_count(&self, tier: TierId) -> usize {
        self.available(tier).len()
    }

    /// Sells the first available ticket of `tier`. `Ok(None)` means the tier
    /// is sold out and nothing changed.
    pub fn sell(&mut self, tier: TierId, cost: Money) -> Result<Option<ScratchTicket>> {
        let role = self
            .distributor
            .as_mut()
            .ok_or_else(|| GameError::NotDistributor(self.name.clone()))?;

        let Some(ticket) = role
            .inventories
            .get_mut(&tier)
            .and_then(|inventory| inventory.take_next())
        else {
            return Ok(None);
        };

        self.balance += cost;
        self.balance -= ticket.prize();
        role.sold += 1;
        role.revenue += cost;

        tracing::info!(
            "{} sold ticket #{} from {} for {} (prize {})",
            self.name,
            ticket.serial(),
            tier,
            cost,
            ticket.prize()
        );
        Ok(Some(ticket))
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.balance)
    }
}

impl fmt::Debug for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Player")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("balance", &self.balance)
            .field("games_played", &self.stats.games_played)
            .field("is_distributor", &self.is_distributor())
            .finish()
    }
}
