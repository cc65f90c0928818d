pub mod ticket;

pub use ticket::ScratchTicket;

use luck_core::{Money, TierId};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Result of one allocation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    pub tier: TierId,
    pub created: u32,
    pub total_cost: Money,
}

/// Snapshot of one tier's stock for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventorySummary {
    pub available: usize,
    pub sold: usize,
    pub liability: Money,
}

/// Finite, ordered ticket stock for one tier.
///
/// Sales always take the first unscratched ticket and new stock is appended,
/// so every ticket before `next` is scratched and every ticket from `next`
/// on is still available.
#[derive(Debug, Clone, Default)]
pub struct TicketInventory {
    tickets: Vec<ScratchTicket>,
    next: usize,
    last_serial: u32,
}

impl TicketInventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prints `count` tickets per prize value, shuffles them and appends
    /// them to the stock. Returns how many were created.
    pub(crate) fn stock<R: Rng + ?Sized>(
        &mut self,
        tier: TierId,
        cost: Money,
        distribution: &[(Money, u32)],
        rng: &mut R,
    ) -> u32 {
        let mut prizes: Vec<Money> = distribution
            .iter()
            .flat_map(|&(prize, count)| std::iter::repeat(prize).take(count as usize))
            .collect();
        prizes.shuffle(rng);

        let created = prizes.len() as u32;
        for prize in prizes {
            self.last_serial += 1;
            self.tickets
                .push(ScratchTicket::new(self.last_serial, tier, cost, prize));
        }
        created
    }

    /// Unscratched tickets in sale order.
    pub fn available(&self) -> &[ScratchTicket] {
        &self.tickets[self.next..]
    }

    pub fn available_count(&self) -> usize {
        self.tickets.len() - self.next
    }

    pub fn sold(&self) -> &[ScratchTicket] {
        &self.tickets[..self.next]
    }

    pub fn total_created(&self) -> usize {
        self.tickets.len()
    }

    /// Prizes still owed if every remaining ticket is sold.
    pub fn liability(&self) -> Money {
        self.available().iter().map(|t| t.prize()).sum()
    }

    pub fn summary(&self) -> InventorySummary {
        InventorySummary {
            available: self.available_count(),
            sold: self.next,
            liability: self.liability(),
        }
    }

    pub(crate) fn take_next(&mut self) -> Option<ScratchTicket> {
        let ticket = self.tickets.get_mut(self.next)?;
        ticket.scratch();
        self.next += 1;
        Some(ticket.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_stock_exact_counts() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut inventory = TicketInventory::new();
        let created = inventory.stock(
            TierId::SAFE,
            Money::from_dollars(2),
            &[(Money::ZERO, 7), (Money::from_dollars(10), 3)],
            &mut rng,
        );

        assert_eq!(created, 10);
        assert_eq!(inventory.available_count(), 10);
        let winners = inventory
            .available()
            .iter()
            .filter(|t| t.prize() == Money::from_dollars(10))
            .count();
        assert_eq!(winners, 3);
        assert_eq!(inventory.liability(), Money::from_dollars(30));
    }

    #[test]
    fn test_take_next_is_front_and_permanent() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut inventory = TicketInventory::new();
        inventory.stock(
            TierId::MEDIUM,
            Money::from_dollars(5),
            &[(Money::ZERO, 2), (Money::from_dollars(2), 2)],
            &mut rng,
        );

        let front = inventory.available()[0].clone();
        let sold = inventory.take_next().unwrap();
        assert_eq!(sold.serial(), front.serial());
        assert!(sold.is_scratched());
        assert_eq!(inventory.available_count(), 3);
        assert!(inventory
            .available()
            .iter()
            .all(|t| t.serial() != sold.serial() && !t.is_scratched()));
        assert_eq!(inventory.sold().len(), 1);
    }

    #[test]
    fn test_empty_inventory() {
        let mut inventory = TicketInventory::new();
        assert!(inventory.take_next().is_none());
        assert_eq!(inventory.available_count(), 0);
        assert_eq!(inventory.liability(), Money::ZERO);
    }

    #[test]
    fn test_restock_appends_after_existing_stock() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut inventory = TicketInventory::new();
        inventory.stock(TierId::RISKY, Money::from_dollars(20), &[(Money::ZERO, 1)], &mut rng);
        inventory.take_next();
        inventory.stock(TierId::RISKY, Money::from_dollars(20), &[(Money::from_dollars(50), 2)], &mut rng);

        assert_eq!(inventory.total_created(), 3);
        assert_eq!(inventory.available_count(), 2);
        let serials: Vec<u32> = inventory.available().iter().map(|t| t.serial()).collect();
        assert_eq!(serials, vec![2, 3]);
        assert_eq!(
            inventory.summary(),
            InventorySummary {
                available: 2,
                sold: 1,
                liability: Money::from_dollars(100),
            }
        );
    }
}
