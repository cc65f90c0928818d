use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};
use std::str::FromStr;

/// Signed currency amount held as whole cents.
///
/// Configuration files carry amounts as dollars (`2.5` is $2.50); they are
/// rounded to the nearest cent on the way in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub const fn from_dollars(dollars: i64) -> Self {
        Self(dollars * 100)
    }

    /// Rounds to the nearest cent.
    pub fn from_dollars_f64(dollars: f64) -> Self {
        Self((dollars * 100.0).round() as i64)
    }

    pub const fn to_cents(self) -> i64 {
        self.0
    }

    pub fn to_dollars(self) -> f64 {
        self.0 as f64 / 100.0
    }

    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        f.pad(&format!("{}${}.{:02}", sign, abs / 100, abs % 100))
    }
}

impl TryFrom<f64> for Money {
    type Error = String;

    fn try_from(dollars: f64) -> std::result::Result<Self, Self::Error> {
        if !dollars.is_finite() {
            return Err(format!("amount must be a finite number, got {}", dollars));
        }
        Ok(Self::from_dollars_f64(dollars))
    }
}

impl From<Money> for f64 {
    fn from(money: Money) -> Self {
        money.to_dollars()
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Money {
        Money(-self.0)
    }
}

impl Mul<u32> for Money {
    type Output = Money;

    fn mul(self, rhs: u32) -> Money {
        Money(self.0 * i64::from(rhs))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.copied().sum()
    }
}

/// 1-based tier number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TierId(u8);

impl TierId {
    pub const SAFE: TierId = TierId(1);
    pub const MEDIUM: TierId = TierId(2);
    pub const RISKY: TierId = TierId(3);

    /// `None` for tier 0, which does not exist.
    pub fn new(number: u8) -> Option<Self> {
        (number > 0).then_some(Self(number))
    }

    pub fn from_index(index: usize) -> Self {
        Self(index as u8 + 1)
    }

    pub fn number(self) -> u8 {
        self.0
    }

    pub fn index(self) -> usize {
        usize::from(self.0) - 1
    }
}

impl fmt::Display for TierId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tier {}", self.0)
    }
}

/// Which iteration of the game is being played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// Single card with one prize table.
    Classic,
    /// Three tiers resolved by random draw.
    Tiered,
    /// Three tiers sold from a distributor's finite inventory.
    Distributor,
}

impl GameMode {
    pub fn uses_inventory(self) -> bool {
        matches!(self, GameMode::Distributor)
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GameMode::Classic => "classic",
            GameMode::Tiered => "tiered",
            GameMode::Distributor => "distributor",
        };
        f.write_str(name)
    }
}

impl FromStr for GameMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "classic" => Ok(GameMode::Classic),
            "tiered" => Ok(GameMode::Tiered),
            "distributor" => Ok(GameMode::Distributor),
            _ => Err(format!(
                "Invalid mode: {}. Supported modes: classic, tiered, distributor",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_display() {
        assert_eq!(Money::from_cents(9500).to_string(), "$95.00");
        assert_eq!(Money::from_cents(4999990).to_string(), "$49999.90");
        assert_eq!(Money::from_cents(-500).to_string(), "-$5.00");
        assert_eq!(Money::from_cents(7).to_string(), "$0.07");
        assert_eq!(format!("{:>8}", Money::from_dollars(2)), "   $2.00");
    }

    #[test]
    fn test_money_arithmetic() {
        let start = Money::from_dollars(50000);
        let after = start - Money::from_cents(10) + Money::from_dollars(2) - Money::from_dollars(10);
        assert_eq!(after, Money::from_cents(4_999_190));
        assert_eq!(Money::from_cents(25) * 4, Money::from_dollars(1));
        assert_eq!(-Money::from_dollars(3), Money::from_cents(-300));

        let total: Money = [Money::from_dollars(1), Money::from_cents(50)].iter().sum();
        assert_eq!(total, Money::from_cents(150));
    }

    #[test]
    fn test_money_serde_as_dollars() {
        let money: Money = serde_json::from_str("0.1").unwrap();
        assert_eq!(money, Money::from_cents(10));
        assert_eq!(serde_json::to_string(&Money::from_cents(250)).unwrap(), "2.5");
        assert!(Money::try_from(f64::NAN).is_err());
    }

    #[test]
    fn test_tier_id() {
        assert!(TierId::new(0).is_none());
        assert_eq!(TierId::new(2), Some(TierId::MEDIUM));
        assert_eq!(TierId::RISKY.index(), 2);
        assert_eq!(TierId::from_index(0), TierId::SAFE);
    }

    #[test]
    fn test_game_mode_parse() {
        assert_eq!("Tiered".parse::<GameMode>().unwrap(), GameMode::Tiered);
        assert!("poker".parse::<GameMode>().is_err());
        assert!(GameMode::Distributor.uses_inventory());
    }
}
