use crate::error::{Result, StoreError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

/// A monetary value held by an account or attached to a product.
///
/// Wrapper around `rust_decimal::Decimal` so balances are never mixed up
/// with quantities or percentages in the engine's signatures.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Balance(pub Decimal);

/// A strictly positive transfer size (deposit, withdrawal).
///
/// Constructor-validated so "amount must be positive" holds by type.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(StoreError::NonPositiveAmount(value))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = StoreError;

    fn try_from(value: Decimal) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Amount> for Balance {
    fn from(amount: Amount) -> Self {
        Self(amount.0)
    }
}

impl Balance {
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// A price or escrow figure: zero is allowed, negative is not.
    pub fn non_negative(value: Decimal) -> Result<Self> {
        if value.is_sign_negative() {
            Err(StoreError::NegativePrice(value))
        } else {
            Ok(Self(value))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Scales by a unit count, e.g. unit price times purchase quantity.
    /// Quantities large enough to exceed `Decimal` range are a typed error,
    /// never a panic.
    pub fn times(&self, quantity: u64) -> Result<Self> {
        self.0
            .checked_mul(Decimal::from(quantity))
            .map(Self)
            .ok_or(StoreError::AmountOverflow {
                price: self.0,
                quantity,
            })
    }

    /// Applies a percentage discount, flooring the result:
    /// `floor(self * (100 - percent) / 100)`.
    pub fn discounted(&self, percent: u8) -> Self {
        Self((self.0 * Decimal::from(100 - u32::from(percent)) / Decimal::from(100)).floor())
    }
}

impl Add for Balance {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Balance {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl AddAssign for Balance {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Balance {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
