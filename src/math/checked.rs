//! Checked arithmetic trait for domain wrapper types.
//!
//! [`CheckedArithmetic`] lifts the `Option`-returning methods on
//! [`Amount`] and [`Claims`] into [`PoolError`] results with a specific
//! variant, so orchestration code can propagate with `?`.
//!
//! # Examples
//!
//! ```
//! use pair_pool::domain::Amount;
//! use pair_pool::math::CheckedArithmetic;
//!
//! let sum = Amount::new(100).safe_add(&Amount::new(50));
//! assert_eq!(sum.ok(), Some(Amount::new(150)));
//! ```

use crate::domain::{Amount, Claims};
use crate::error::PoolError;

/// Fallible arithmetic for domain wrapper types.
///
/// # Contract
///
/// - No panics: every error condition produces `Err`.
/// - No saturation: errors propagate instead.
pub trait CheckedArithmetic: Sized {
    /// Checked addition.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Overflow`] on overflow.
    fn safe_add(&self, other: &Self) -> Result<Self, PoolError>;

    /// Checked subtraction.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Underflow`] if the result would be negative.
    fn safe_sub(&self, other: &Self) -> Result<Self, PoolError>;
}

impl CheckedArithmetic for Amount {
    #[inline]
    fn safe_add(&self, other: &Self) -> Result<Self, PoolError> {
        self.checked_add(other)
            .ok_or(PoolError::Overflow("amount addition overflow"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self, PoolError> {
        self.checked_sub(other)
            .ok_or(PoolError::Underflow("amount subtraction underflow"))
    }
}

impl CheckedArithmetic for Claims {
    #[inline]
    fn safe_add(&self, other: &Self) -> Result<Self, PoolError> {
        self.checked_add(other)
            .ok_or(PoolError::Overflow("claim supply overflow"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self, PoolError> {
        self.checked_sub(other)
            .ok_or(PoolError::Underflow("claim supply underflow"))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn amount_add_overflow() {
        let Err(PoolError::Overflow(_)) = Amount::MAX.safe_add(&Amount::new(1)) else {
            panic!("expected Overflow");
        };
    }

    #[test]
    fn amount_sub_underflow() {
        let Err(PoolError::Underflow(_)) = Amount::new(1).safe_sub(&Amount::new(2)) else {
            panic!("expected Underflow");
        };
    }

    #[test]
    fn claims_round_trip() {
        let Ok(sum) = Claims::new(200).safe_add(&Claims::new(100)) else {
            panic!("expected Ok");
        };
        let Ok(back) = sum.safe_sub(&Claims::new(100)) else {
            panic!("expected Ok");
        };
        assert_eq!(back, Claims::new(200));
    }

    #[test]
    fn claims_sub_underflow() {
        assert!(matches!(
            Claims::ZERO.safe_sub(&Claims::new(1)),
            Err(PoolError::Underflow(_))
        ));
    }
}
