use crate::inventory::{Allocation, ScratchTicket};
use crate::{GameError, Player, Result};
use chrono::{DateTime, Duration, Utc};
use luck_core::{GameConfig, GameMode, Money, TierConfig, TierId};
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

pub const DEFAULT_DISTRIBUTOR_NAME: &str = "Distributor";

/// Game state of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    Setup,
    Turn { current: usize },
    Finished,
}

/// Menu options offered on every turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnAction {
    /// Buy a card, or create tickets when the distributor is up.
    Play,
    Stats,
    EndTurn,
    Quit,
}

impl TurnAction {
    /// Maps a menu digit (`1`-`4`) to an action.
    pub fn from_choice(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(TurnAction::Play),
            "2" => Some(TurnAction::Stats),
            "3" => Some(TurnAction::EndTurn),
            "4" => Some(TurnAction::Quit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Loss,
    Partial,
    BreakEven,
    Win,
}

/// Settled purchase of one card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Purchase {
    pub buyer: String,
    pub tier: TierId,
    pub cost: Money,
    pub prize: Money,
    pub balance_before: Money,
    pub balance_after: Money,
    /// Ticket serial when the card came from a distributor's inventory.
    pub serial: Option<u32>,
}

impl Purchase {
    pub fn net(&self) -> Money {
        self.prize - self.cost
    }

    pub fn verdict(&self) -> Verdict {
        if self.prize.is_zero() {
            Verdict::Loss
        } else if self.prize < self.cost {
            Verdict::Partial
        } else if self.prize == self.cost {
            Verdict::BreakEven
        } else {
            Verdict::Win
        }
    }
}

/// Turn-based scratch-card session.
///
/// Owns the players, whose turn it is and the random generator every draw
/// and shuffle comes from.
pub struct Session<R: Rng = StdRng> {
    mode: GameMode,
    config: GameConfig,
    players: Vec<Player>,
    state: GameState,
    rng: R,
    started_at: DateTime<Utc>,
}

impl<R: Rng> Session<R> {
    /// Seats the players. In distributor mode a distributor seat named
    /// [`DEFAULT_DISTRIBUTOR_NAME`] takes the first turn.
    pub fn new(mode: GameMode, config: GameConfig, player_names: &[String], rng: R) -> Result<Self> {
        if mode == GameMode::Distributor {
            return Self::with_distributor(config, DEFAULT_DISTRIBUTOR_NAME, player_names, rng);
        }

        let players = seat_players(&config, mode, player_names)?;
        Ok(Self::from_parts(mode, config, players, rng))
    }

    /// Distributor mode session. The distributor sits first, then the players.
    pub fn with_distributor(
        config: GameConfig,
        distributor_name: &str,
        player_names: &[String],
        rng: R,
    ) -> Result<Self> {
        let mut players = seat_players(&config, GameMode::Distributor, player_names)?;
        let name = match distributor_name.trim() {
            "" => DEFAULT_DISTRIBUTOR_NAME,
            name => name,
        };
        players.insert(
            0,
            Player::new_distributor(name, config.distributor_starting_balance),
        );

        Ok(Self::from_parts(GameMode::Distributor, config, players, rng))
    }

    fn from_parts(mode: GameMode, config: GameConfig, players: Vec<Player>, rng: R) -> Self {
        tracing::info!("Created {} session with {} seats", mode, players.len());
        for player in &players {
            tracing::debug!("Seated {} ({})", player.name(), player.id());
        }
        Self {
            mode,
            config,
            players,
            state: GameState::Setup,
            rng,
            started_at: Utc::now(),
        }
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn elapsed(&self) -> Duration {
        Utc::now() - self.started_at
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.state, GameState::Finished)
    }

    /// Tiers on sale in this mode, in menu order.
    pub fn tiers(&self) -> &[TierConfig] {
        self.config.lineup(self.mode)
    }

    pub fn tier(&self, tier: TierId) -> Result<&TierConfig> {
        self.config
            .tier(self.mode, tier)
            .ok_or(GameError::UnknownTier(tier))
    }

    pub fn distributor(&self) -> Option<&Player> {
        self.players.iter().find(|p| p.is_distributor())
    }

    fn distributor_index(&self) -> Option<usize> {
        self.players.iter().position(|p| p.is_distributor())
    }

    /// Tickets left for `tier` in the distributor's inventory.
    pub fn available_count(&self, tier: TierId) -> Result<usize> {
        self.tier(tier)?;
        self.distributor()
            .map(|d| d.available_count(tier))
            .ok_or(GameError::NoDistributor)
    }

    pub fn start(&mut self) -> Result<&Player> {
        if !matches!(self.state, GameState::Setup) {
            return Err(GameError::invalid_state("Session already started"));
        }

        self.state = GameState::Turn { current: 0 };
        tracing::info!("Session started, {} goes first", self.players[0].name());
        Ok(&self.players[0])
    }

    pub fn current_index(&self) -> Result<usize> {
        match self.state {
            GameState::Turn { current } => Ok(current),
            GameState::Setup => Err(GameError::invalid_state("Session not started")),
            GameState::Finished => Err(GameError::invalid_state("Session is finished")),
        }
    }

    pub fn current(&self) -> Result<&Player> {
        Ok(&self.players[self.current_index()?])
    }

    /// Passes the turn to the next seat, wrapping around.
    pub fn end_turn(&mut self) -> Result<&Player> {
        let current = self.current_index()?;
        let next = (current + 1) % self.players.len();
        self.state = GameState::Turn { current: next };

        tracing::info!(
            "{} ended their turn, {} is up",
            self.players[current].name(),
            self.players[next].name()
        );
        Ok(&self.players[next])
    }

    pub fn quit(&mut self) -> Result<()> {
        self.current_index()?;
        self.state = GameState::Finished;
        tracing::info!("Session finished after {}s", self.elapsed().num_seconds());
        Ok(())
    }

    /// Buys one card of `tier` for the current player.
    ///
    /// Rejections leave every balance untouched.
    pub fn purchase(&mut self, tier: TierId) -> Result<Purchase> {
        let index = self.current_index()?;
        if self.mode.uses_inventory() {
            self.purchase_from_inventory(index, tier)
        } else {
            self.purchase_by_draw(index, tier)
        }
    }

    fn purchase_by_draw(&mut self, index: usize, tier: TierId) -> Result<Purchase> {
        let tier_config = self
            .config
            .tier(self.mode, tier)
            .ok_or(GameError::UnknownTier(tier))?;
        let cost = tier_config.cost;
        let player = &mut self.players[index];

        if !player.can_afford(cost) {
            return Err(GameError::InsufficientBalance {
                need: cost,
                available: player.balance(),
            });
        }

        let balance_before = player.balance();
        player.debit(cost);
        let prize = tier_config.prizes.draw(&mut self.rng);
        player.credit(prize);
        player.record_game(cost, prize);

        tracing::info!(
            "{} bought a {} card for {} and won {}",
            player.name(),
            tier_config.name,
            cost,
            prize
        );

        Ok(Purchase {
            buyer: player.name().to_string(),
            tier,
            cost,
            prize,
            balance_before,
            balance_after: player.balance(),
            serial: None,
        })
    }

    fn purchase_from_inventory(&mut self, index: usize, tier: TierId) -> Result<Purchase> {
        let cost = self.tier(tier)?.cost;
        let dealer_index = self.distributor_index().ok_or(GameError::NoDistributor)?;
        if dealer_index == index {
            return Err(GameError::OwnInventory);
        }

        let buyer = &self.players[index];
        if !buyer.can_afford(cost) {
            return Err(GameError::InsufficientBalance {
                need: cost,
                available: buyer.balance(),
            });
        }
        if self.players[dealer_index].available_count(tier) == 0 {
            return Err(GameError::SoldOut(tier));
        }

        let balance_before = buyer.balance();
        let (buyer, dealer) = pair_mut(&mut self.players, index, dealer_index);
        let ticket = buy_from(buyer, dealer, tier, cost)?;

        Ok(Purchase {
            buyer: buyer.name().to_string(),
            tier,
            cost,
            prize: ticket.prize(),
            balance_before,
            balance_after: buyer.balance(),
            serial: Some(ticket.serial()),
        })
    }

    /// Creates tickets for `tier` from the current seat, which must be the
    /// distributor. `distribution` is the number of tickets per prize value.
    pub fn allocate(&mut self, tier: TierId, distribution: &[(Money, u32)]) -> Result<Allocation> {
        let index = self.current_index()?;
        let (cost, creation_cost) = {
            let tier_config = self.tier(tier)?;
            (tier_config.cost, tier_config.creation_cost)
        };

        self.players[index].allocate(tier, cost, distribution, creation_cost, &mut self.rng)
    }
}

/// Moves one ticket from `dealer` to `buyer`. A sale that fails after the
/// buyer was charged refunds the cost.
pub(crate) fn buy_from(
    buyer: &mut Player,
    dealer: &mut Player,
    tier: TierId,
    cost: Money,
) -> Result<ScratchTicket> {
    buyer.debit(cost);

    let ticket = match dealer.sell(tier, cost) {
        Ok(Some(ticket)) => ticket,
        Ok(None) => {
            buyer.credit(cost);
            tracing::warn!("{} refunded {}: {} sold out", buyer.name(), cost, tier);
            return Err(GameError::SoldOut(tier));
        }
        Err(e) => {
            buyer.credit(cost);
            tracing::warn!("{} refunded {}: {}", buyer.name(), cost, e);
            return Err(e);
        }
    };

    buyer.credit(ticket.prize());
    buyer.record_game(cost, ticket.prize());
    Ok(ticket)
}

fn pair_mut<T>(items: &mut [T], a: usize, b: usize) -> (&mut T, &mut T) {
    if a < b {
        let (left, right) = items.split_at_mut(b);
        (&mut left[a], &mut right[0])
    } else {
        let (left, right) = items.split_at_mut(a);
        (&mut right[0], &mut left[b])
    }
}

/// Blank names become `Player N`.
pub fn seat_name(raw: &str, position: usize) -> String {
    match raw.trim() {
        "" => format!("Player {}", position + 1),
        name => name.to_string(),
    }
}

fn seat_players(config: &GameConfig, mode: GameMode, names: &[String]) -> Result<Vec<Player>> {
    config.validate()?;

    if names.is_empty() || names.len() > config.max_players {
        return Err(GameError::InvalidPlayerCount {
            count: names.len(),
            max: config.max_players,
        });
    }

    let balance = config.player_balance(mode);
    Ok(names
        .iter()
        .enumerate()
        .map(|(i, raw)| Player::new(seat_name(raw, i), balance))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::SeedableRng;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_classic_losing_card() {
        let mut session = Session::new(
            GameMode::Classic,
            GameConfig::default(),
            &names(&["Ann"]),
            StepRng::new(0, 0),
        )
        .unwrap();
        session.start().unwrap();

        let purchase = session.purchase(TierId::SAFE).unwrap();
        assert_eq!(purchase.prize, Money::ZERO);
        assert_eq!(purchase.verdict(), Verdict::Loss);

        let ann = session.current().unwrap();
        assert_eq!(ann.balance(), Money::from_dollars(95));
        assert_eq!(ann.stats().games_played, 1);
        assert_eq!(ann.stats().total_spent, Money::from_dollars(5));
        assert_eq!(ann.stats().total_won, Money::ZERO);
        assert_eq!(ann.stats().roi(), Some(-100.0));
    }

    #[test]
    fn test_classic_top_prize_draw() {
        let mut session = Session::new(
            GameMode::Classic,
            GameConfig::default(),
            &names(&["Ann"]),
            StepRng::new(u64::MAX, 0),
        )
        .unwrap();
        session.start().unwrap();

        let purchase = session.purchase(TierId::SAFE).unwrap();
        assert_eq!(purchase.prize, Money::from_dollars(100));
        assert_eq!(purchase.verdict(), Verdict::Win);
        assert_eq!(purchase.balance_after, Money::from_dollars(195));
    }

    #[test]
    fn test_balance_identity_over_many_purchases() {
        let mut session = Session::new(
            GameMode::Tiered,
            GameConfig::default(),
            &names(&["Ann", "Ben"]),
            StdRng::seed_from_u64(99),
        )
        .unwrap();
        session.start().unwrap();

        for round in 0..60 {
            let tier = TierId::from_index(round % 3);
            let games_before = session.current().unwrap().stats().games_played;
            match session.purchase(tier) {
                Ok(purchase) => {
                    assert_eq!(
                        purchase.balance_after,
                        purchase.balance_before - purchase.cost + purchase.prize
                    );
                    let player = session.current().unwrap();
                    assert_eq!(player.balance(), purchase.balance_after);
                    assert_eq!(player.stats().games_played, games_before + 1);
                }
                Err(e) => assert!(matches!(e, GameError::InsufficientBalance { .. })),
            }
            session.end_turn().unwrap();
        }
    }

    #[test]
    fn test_insufficient_balance_has_no_side_effects() {
        let mut config = GameConfig::default();
        config.classic_starting_balance = Money::from_dollars(4);
        let mut session =
            Session::new(GameMode::Classic, config, &names(&["Ann"]), StepRng::new(0, 0)).unwrap();
        session.start().unwrap();

        let err = session.purchase(TierId::SAFE).unwrap_err();
        assert!(err.is_rejection());
        let ann = session.current().unwrap();
        assert_eq!(ann.balance(), Money::from_dollars(4));
        assert_eq!(ann.stats().games_played, 0);
    }

    #[test]
    fn test_distributor_end_to_end() {
        let mut session = Session::with_distributor(
            GameConfig::default(),
            "Dealer",
            &names(&["Bob"]),
            StdRng::seed_from_u64(5),
        )
        .unwrap();

        let first = session.start().unwrap();
        assert!(first.is_distributor());
        assert_eq!(first.balance(), Money::from_dollars(50_000));

        let allocation = session
            .allocate(TierId::SAFE, &[(Money::from_dollars(10), 1)])
            .unwrap();
        assert_eq!(allocation.created, 1);
        assert_eq!(
            session.current().unwrap().balance(),
            Money::from_cents(4_999_990)
        );

        let bob = session.end_turn().unwrap();
        assert_eq!(bob.name(), "Bob");
        assert_eq!(bob.balance(), Money::from_dollars(500));

        let purchase = session.purchase(TierId::SAFE).unwrap();
        assert_eq!(purchase.cost, Money::from_dollars(2));
        assert_eq!(purchase.prize, Money::from_dollars(10));
        assert_eq!(purchase.serial, Some(1));
        assert_eq!(session.current().unwrap().balance(), Money::from_dollars(508));
        assert_eq!(
            session.distributor().unwrap().balance(),
            Money::from_cents(4_999_190)
        );
        assert_eq!(session.available_count(TierId::SAFE).unwrap(), 0);
    }

    #[test]
    fn test_distributor_mode_rejections() {
        let mut session = Session::new(
            GameMode::Distributor,
            GameConfig::default(),
            &names(&["Bob"]),
            StdRng::seed_from_u64(6),
        )
        .unwrap();
        session.start().unwrap();
        assert_eq!(session.current().unwrap().name(), DEFAULT_DISTRIBUTOR_NAME);

        assert!(matches!(
            session.purchase(TierId::SAFE),
            Err(GameError::OwnInventory)
        ));

        session.end_turn().unwrap();
        assert!(matches!(
            session.purchase(TierId::MEDIUM),
            Err(GameError::SoldOut(TierId::MEDIUM))
        ));
        assert_eq!(session.current().unwrap().balance(), Money::from_dollars(500));
        assert!(matches!(
            session.allocate(TierId::MEDIUM, &[(Money::ZERO, 1)]),
            Err(GameError::NotDistributor(_))
        ));
        assert!(matches!(
            session.purchase(TierId::new(4).unwrap()),
            Err(GameError::UnknownTier(_))
        ));
    }

    #[test]
    fn test_buy_from_refunds_failed_sale() {
        let mut buyer = Player::new("Bob", Money::from_dollars(500));
        let mut dealer = Player::new_distributor("Dealer", Money::from_dollars(1000));

        let err = buy_from(&mut buyer, &mut dealer, TierId::SAFE, Money::from_dollars(2)).unwrap_err();
        assert!(matches!(err, GameError::SoldOut(_)));
        assert_eq!(buyer.balance(), Money::from_dollars(500));
        assert_eq!(buyer.stats().games_played, 0);
        assert_eq!(dealer.balance(), Money::from_dollars(1000));

        let mut imposter = Player::new("Eve", Money::ZERO);
        assert!(buy_from(&mut buyer, &mut imposter, TierId::SAFE, Money::from_dollars(2)).is_err());
        assert_eq!(buyer.balance(), Money::from_dollars(500));
    }

    #[test]
    fn test_round_robin_turns() {
        let mut session = Session::new(
            GameMode::Tiered,
            GameConfig::default(),
            &names(&["Ann", "Ben", "Cid"]),
            StdRng::seed_from_u64(1),
        )
        .unwrap();

        assert!(session.end_turn().is_err());
        session.start().unwrap();
        assert!(session.start().is_err());

        assert_eq!(session.end_turn().unwrap().name(), "Ben");
        assert_eq!(session.end_turn().unwrap().name(), "Cid");
        assert_eq!(session.end_turn().unwrap().name(), "Ann");

        session.quit().unwrap();
        assert!(session.is_finished());
        assert!(session.purchase(TierId::SAFE).is_err());
    }

    #[test]
    fn test_player_count_and_names() {
        let config = GameConfig::default();
        for count in [0usize, 5] {
            let roster = vec![String::new(); count];
            let err = Session::new(GameMode::Classic, config.clone(), &roster, StepRng::new(0, 0))
                .err()
                .unwrap();
            assert!(matches!(err, GameError::InvalidPlayerCount { .. }));
        }

        let session = Session::new(
            GameMode::Classic,
            config,
            &names(&["", "  Zed  "]),
            StepRng::new(0, 0),
        )
        .unwrap();
        let seated: Vec<&str> = session.players().iter().map(|p| p.name()).collect();
        assert_eq!(seated, vec!["Player 1", "Zed"]);

        let ids: std::collections::HashSet<_> = session.players().iter().map(|p| p.id()).collect();
        assert_eq!(ids.len(), 2);
        assert!(session.started_at() <= Utc::now());
    }

    #[test]
    fn test_turn_action_from_choice() {
        assert_eq!(TurnAction::from_choice("1"), Some(TurnAction::Play));
        assert_eq!(TurnAction::from_choice(" 4 "), Some(TurnAction::Quit));
        assert_eq!(TurnAction::from_choice("5"), None);
        assert_eq!(TurnAction::from_choice("play"), None);
    }

    #[test]
    fn test_verdicts() {
        let mut purchase = Purchase {
            buyer: "Ann".to_string(),
            tier: TierId::SAFE,
            cost: Money::from_dollars(5),
            prize: Money::from_dollars(2),
            balance_before: Money::from_dollars(100),
            balance_after: Money::from_dollars(97),
            serial: None,
        };
        assert_eq!(purchase.verdict(), Verdict::Partial);
        assert_eq!(purchase.net(), Money::from_dollars(-3));

        purchase.prize = Money::from_dollars(5);
        assert_eq!(purchase.verdict(), Verdict::BreakEven);
    }
}
