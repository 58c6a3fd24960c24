//! Outcome of an executed swap.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{Amount, SwapDirection};
use crate::error::PoolError;

/// What a committed swap exchanged.
///
/// # Invariants
///
/// - `amount_in > 0` and `amount_out > 0`
/// - `fee < amount_in`
///
/// # Examples
///
/// ```
/// use pair_pool::domain::{Amount, SwapDirection, SwapOutcome};
///
/// let out = SwapOutcome::new(
///     SwapDirection::AForB,
///     Amount::new(10),
///     Amount::new(36),
///     Amount::ZERO,
/// );
/// assert!(out.is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SwapOutcome {
    direction: SwapDirection,
    amount_in: Amount,
    amount_out: Amount,
    fee: Amount,
}

impl SwapOutcome {
    /// Creates a validated outcome.
    ///
    /// # Errors
    ///
    /// - [`PoolError::ZeroAmount`] if `amount_in` is zero.
    /// - [`PoolError::InsufficientOutputAmount`] if `amount_out` is zero.
    /// - [`PoolError::InvalidConfiguration`] if `fee >= amount_in`.
    pub const fn new(
        direction: SwapDirection,
        amount_in: Amount,
        amount_out: Amount,
        fee: Amount,
    ) -> crate::error::Result<Self> {
        if amount_in.is_zero() {
            return Err(PoolError::ZeroAmount);
        }
        if amount_out.is_zero() {
            return Err(PoolError::InsufficientOutputAmount);
        }
        if fee.get() >= amount_in.get() {
            return Err(PoolError::InvalidConfiguration(
                "fee must be less than amount_in",
            ));
        }
        Ok(Self {
            direction,
            amount_in,
            amount_out,
            fee,
        })
    }

    /// Direction of the trade.
    #[must_use]
    pub const fn direction(&self) -> SwapDirection {
        self.direction
    }

    /// Input paid by the trader, fee included.
    pub const fn amount_in(&self) -> Amount {
        self.amount_in
    }

    /// Output received by the trader.
    pub const fn amount_out(&self) -> Amount {
        self.amount_out
    }

    /// Fee share of the input, rounded down.
    pub const fn fee(&self) -> Amount {
        self.fee
    }
}

impl fmt::Display for SwapOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "swap {} in={} out={} fee={}",
            self.direction, self.amount_in, self.amount_out, self.fee
        )
    }
}
