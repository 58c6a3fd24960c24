//! Proportional claim units.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::Amount;

/// A quantity of the pool's claim token.
///
/// Distinct from [`Amount`] because it measures a share of the pool, not
/// a quantity of either traded asset.  Claim balances themselves live in
/// the claim ledger; the pool only tracks the aggregate supply.
///
/// # Examples
///
/// ```
/// use pair_pool::domain::Claims;
///
/// let minted = Claims::new(200);
/// assert_eq!(minted.checked_add(&Claims::new(100)), Some(Claims::new(300)));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Claims(u128);

impl Claims {
    /// No claims.
    pub const ZERO: Self = Self(0);

    /// Wraps a raw `u128`.
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// Returns the underlying `u128` value.
    #[must_use]
    pub const fn get(&self) -> u128 {
        self.0
    }

    /// Returns `true` if there are no claims.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition. Returns `None` on overflow.
    #[must_use]
    pub const fn checked_add(&self, other: &Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked subtraction. Returns `None` on underflow.
    #[must_use]
    pub const fn checked_sub(&self, other: &Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Views the claim quantity as a raw ledger amount.
    ///
    /// The claim token is held in an ordinary ledger, so minting and
    /// burning move [`Amount`]s of it.
    pub const fn as_amount(&self) -> Amount {
        Amount::new(self.0)
    }
}

impl From<Amount> for Claims {
    fn from(amount: Amount) -> Self {
        Self(amount.get())
    }
}

impl fmt::Display for Claims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
