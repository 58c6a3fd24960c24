//! Swap fee expressed as an exact rational.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{Amount, Rounding};
use crate::error::PoolError;
use crate::math::mul_div;

/// Denominator for basis-point fees (10 000 bp = 100%).
const BPS_DENOMINATOR: u32 = 10_000;

/// The fraction of every swap input retained by the pool.
///
/// Stored as `numerator / denominator` so fees such as 3/1000 are exact.
/// The fee is taken from the *input* side of a swap and stays in the
/// reserves, which is what makes the constant product grow.
///
/// # Invariants
///
/// - `denominator > 0`
/// - `numerator < denominator` (a 100% fee would make every swap pay
///   nothing)
///
/// # Examples
///
/// ```
/// use pair_pool::domain::FeeRate;
///
/// let fee = FeeRate::new(3, 1_000).expect("valid fee");
/// assert_eq!(fee.complement(), 997);
///
/// let same = FeeRate::from_basis_points(30).expect("valid fee");
/// assert!(fee.is_equivalent(&same));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawFeeRate")]
pub struct FeeRate {
    numerator: u32,
    denominator: u32,
}

#[derive(Deserialize)]
struct RawFeeRate {
    numerator: u32,
    denominator: u32,
}

impl TryFrom<RawFeeRate> for FeeRate {
    type Error = PoolError;

    fn try_from(raw: RawFeeRate) -> Result<Self, Self::Error> {
        Self::new(raw.numerator, raw.denominator)
    }
}

impl FeeRate {
    /// 0.3%, the conventional constant-product fee.
    pub const DEFAULT: Self = Self {
        numerator: 3,
        denominator: 1_000,
    };

    /// No fee.
    pub const ZERO: Self = Self {
        numerator: 0,
        denominator: 1,
    };

    /// Creates a fee of `numerator / denominator`.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidConfiguration`] if the denominator is
    /// zero or the fee is 100% or more.
    pub const fn new(numerator: u32, denominator: u32) -> crate::error::Result<Self> {
        if denominator == 0 {
            return Err(PoolError::InvalidConfiguration(
                "fee denominator must be positive",
            ));
        }
        if numerator >= denominator {
            return Err(PoolError::InvalidConfiguration(
                "fee must be below 100%",
            ));
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }

    /// Creates a fee from basis points (1 bp = 0.01%).
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidConfiguration`] if `bps >= 10_000`.
    pub const fn from_basis_points(bps: u32) -> crate::error::Result<Self> {
        Self::new(bps, BPS_DENOMINATOR)
    }

    /// Returns the fee numerator.
    #[must_use]
    pub const fn numerator(&self) -> u32 {
        self.numerator
    }

    /// Returns the fee denominator.
    #[must_use]
    pub const fn denominator(&self) -> u32 {
        self.denominator
    }

    /// Returns `denominator - numerator`, the share of input that trades.
    #[must_use]
    pub const fn complement(&self) -> u32 {
        self.denominator - self.numerator
    }

    /// Returns `true` if the fee is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.numerator == 0
    }

    /// Returns `true` if both rates describe the same fraction.
    #[must_use]
    pub const fn is_equivalent(&self, other: &Self) -> bool {
        (self.numerator as u64) * (other.denominator as u64)
            == (other.numerator as u64) * (self.denominator as u64)
    }

    /// Computes the fee portion of `amount`.
    ///
    /// # Errors
    ///
    /// Propagates [`PoolError::Overflow`] from the narrowed result, which
    /// cannot happen for a fee below 100%.
    pub fn apply(&self, amount: Amount, rounding: Rounding) -> crate::error::Result<Amount> {
        mul_div(
            amount.get(),
            u128::from(self.numerator),
            u128::from(self.denominator),
            rounding,
        )
        .map(Amount::new)
    }
}

impl Default for FeeRate {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for FeeRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn default_is_three_per_mille() {
        let fee = FeeRate::default();
        assert_eq!(fee.numerator(), 3);
        assert_eq!(fee.denominator(), 1_000);
        assert_eq!(fee.complement(), 997);
        assert_eq!(format!("{fee}"), "3/1000");
    }

    #[test]
    fn zero_denominator_rejected() {
        assert!(matches!(
            FeeRate::new(0, 0),
            Err(PoolError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn full_fee_rejected() {
        assert!(FeeRate::new(1_000, 1_000).is_err());
        assert!(FeeRate::from_basis_points(10_000).is_err());
    }

    #[test]
    fn basis_points_equivalence() {
        let Ok(bps) = FeeRate::from_basis_points(30) else {
            panic!("valid fee");
        };
        assert!(bps.is_equivalent(&FeeRate::DEFAULT));
        assert_ne!(bps, FeeRate::DEFAULT);
    }

    #[test]
    fn apply_rounds_as_requested() {
        let fee = FeeRate::DEFAULT;
        let Ok(down) = fee.apply(Amount::new(10), Rounding::Down) else {
            panic!("expected Ok");
        };
        let Ok(up) = fee.apply(Amount::new(10), Rounding::Up) else {
            panic!("expected Ok");
        };
        assert_eq!(down, Amount::ZERO);
        assert_eq!(up, Amount::new(1));
    }

    #[test]
    fn deserialize_validates() {
        let ok: Result<FeeRate, _> = serde_json::from_str(r#"{"numerator":3,"denominator":1000}"#);
        assert!(matches!(ok, Ok(f) if f == FeeRate::DEFAULT));

        let bad: Result<FeeRate, _> = serde_json::from_str(r#"{"numerator":5,"denominator":5}"#);
        assert!(bad.is_err());
    }
}
