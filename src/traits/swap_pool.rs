//! Swap surface of a two-asset pool.
//!
//! # Fee Deduction Invariant
//!
//! Every implementation takes the fee from the input amount before the
//! pricing formula is applied, and keeps it in the reserves:
//!
//! ```text
//! after_fee  = amount_in × (den − num)
//! amount_out = after_fee × reserve_out / (reserve_in × den + after_fee)
//! ```
//!
//! so `reserve_a × reserve_b` never decreases across a swap.

use crate::domain::{AccountId, Amount, FeeRate, SwapDirection, SwapOutcome};
use crate::error::PoolError;

/// Core trait for quoting and executing swaps.
///
/// # Errors
///
/// Common error variants:
///
/// - [`PoolError::ZeroAmount`]: zero input
/// - [`PoolError::InsufficientLiquidity`]: an empty reserve
/// - [`PoolError::SlippageExceeded`]: output below the caller's minimum
/// - [`PoolError::Ledger`]: the input could not be pulled
pub trait SwapPool {
    /// Pure quote for `amount_in` against arbitrary reserves.
    ///
    /// # Errors
    ///
    /// - [`PoolError::ZeroAmount`] if `amount_in` is zero.
    /// - [`PoolError::InsufficientLiquidity`] if either reserve is zero.
    fn quote_output(
        &self,
        amount_in: Amount,
        reserve_in: Amount,
        reserve_out: Amount,
    ) -> Result<Amount, PoolError>;

    /// Executes a swap for `trader`.
    ///
    /// The swap either completes fully or returns an error with no
    /// ledger or pool state changed.
    ///
    /// # Errors
    ///
    /// See the trait-level list.
    fn swap(
        &mut self,
        trader: &AccountId,
        direction: SwapDirection,
        amount_in: Amount,
        min_amount_out: Amount,
    ) -> Result<SwapOutcome, PoolError>;

    /// Sells asset A for asset B.
    ///
    /// # Errors
    ///
    /// Same as [`SwapPool::swap`].
    fn swap_a_for_b(
        &mut self,
        trader: &AccountId,
        amount_in: Amount,
        min_amount_out: Amount,
    ) -> Result<SwapOutcome, PoolError> {
        self.swap(trader, SwapDirection::AForB, amount_in, min_amount_out)
    }

    /// Sells asset B for asset A.
    ///
    /// # Errors
    ///
    /// Same as [`SwapPool::swap`].
    fn swap_b_for_a(
        &mut self,
        trader: &AccountId,
        amount_in: Amount,
        min_amount_out: Amount,
    ) -> Result<SwapOutcome, PoolError> {
        self.swap(trader, SwapDirection::BForA, amount_in, min_amount_out)
    }

    /// Current `(reserve_a, reserve_b)`.
    #[must_use]
    fn reserves(&self) -> (Amount, Amount);

    /// The pool's swap fee, constant for its lifetime.
    #[must_use]
    fn fee(&self) -> FeeRate;
}
