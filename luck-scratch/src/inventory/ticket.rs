use luck_core::{Money, TierId};
use serde::{Deserialize, Serialize};

/// A pre-printed ticket. The prize is fixed when the ticket is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScratchTicket {
    serial: u32,
    tier: TierId,
    cost: Money,
    prize: Money,
    scratched: bool,
}

impl ScratchTicket {
    pub(crate) fn new(serial: u32, tier: TierId, cost: Money, prize: Money) -> Self {
        Self {
            serial,
            tier,
            cost,
            prize,
            scratched: false,
        }
    }

    pub fn serial(&self) -> u32 {
        self.serial
    }

    pub fn tier(&self) -> TierId {
        self.tier
    }

    pub fn cost(&self) -> Money {
        self.cost
    }

    pub fn prize(&self) -> Money {
        self.prize
    }

    pub fn is_scratched(&self) -> bool {
        self.scratched
    }

    pub(crate) fn scratch(&mut self) {
        self.scratched = true;
    }
}
