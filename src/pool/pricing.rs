//! Constant-product pricing with an input-side fee.
//!
//! # Exact-in
//!
//! ```text
//! after_fee  = amount_in × (den − num)
//! amount_out = ⌊after_fee × reserve_out / (reserve_in × den + after_fee)⌋
//! ```
//!
//! # Exact-out
//!
//! ```text
//! amount_in = ⌈reserve_in × amount_out × den / ((reserve_out − amount_out) × (den − num))⌉
//! ```
//!
//! Both round in the pool's favour, so
//! `quote_output(quote_input(x)) ≥ x` for every reachable `x`.

use ethnum::U256;

use crate::domain::{Amount, FeeRate, Reserves, Rounding, SwapDirection};
use crate::error::PoolError;
use crate::math::narrow;

/// Pure quoting engine bound to one fee rate.
///
/// ```
/// use pair_pool::domain::{Amount, FeeRate};
/// use pair_pool::pool::PricingEngine;
///
/// let engine = PricingEngine::new(FeeRate::DEFAULT);
/// let out = engine.quote_output(Amount::new(10), Amount::new(100), Amount::new(400));
/// assert_eq!(out.ok(), Some(Amount::new(36)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingEngine {
    fee: FeeRate,
}

impl PricingEngine {
    #[must_use]
    pub const fn new(fee: FeeRate) -> Self {
        Self { fee }
    }

    #[must_use]
    pub const fn fee(&self) -> FeeRate {
        self.fee
    }

    /// Output received for selling `amount_in` into the given reserves.
    ///
    /// May return zero for dust inputs; rejecting a zero output is left
    /// to the caller executing the swap.
    ///
    /// # Errors
    ///
    /// - [`PoolError::ZeroAmount`] if `amount_in` is zero.
    /// - [`PoolError::InsufficientLiquidity`] if either reserve is zero.
    /// - [`PoolError::Overflow`] if the numerator exceeds 256 bits.
    pub fn quote_output(
        &self,
        amount_in: Amount,
        reserve_in: Amount,
        reserve_out: Amount,
    ) -> Result<Amount, PoolError> {
        if amount_in.is_zero() {
            return Err(PoolError::ZeroAmount);
        }
        if reserve_in.is_zero() || reserve_out.is_zero() {
            return Err(PoolError::InsufficientLiquidity);
        }

        let after_fee = U256::new(amount_in.get()) * U256::new(u128::from(self.fee.complement()));
        let numerator = after_fee
            .checked_mul(U256::new(reserve_out.get()))
            .ok_or(PoolError::Overflow("swap numerator exceeds 256 bits"))?;
        let denominator = U256::new(reserve_in.get()) * U256::new(u128::from(self.fee.denominator()))
            + after_fee;

        let out = narrow(numerator / denominator, "swap output exceeds 128 bits")?;
        Ok(Amount::new(out))
    }

    /// Input required to receive exactly `amount_out`, rounded up.
    ///
    /// # Errors
    ///
    /// - [`PoolError::ZeroAmount`] if `amount_out` is zero.
    /// - [`PoolError::InsufficientLiquidity`] if either reserve is zero
    ///   or `amount_out` would drain the output reserve.
    /// - [`PoolError::Overflow`] if the required input exceeds 128 bits.
    pub fn quote_input(
        &self,
        amount_out: Amount,
        reserve_in: Amount,
        reserve_out: Amount,
    ) -> Result<Amount, PoolError> {
        if amount_out.is_zero() {
            return Err(PoolError::ZeroAmount);
        }
        if reserve_in.is_zero() || amount_out >= reserve_out {
            return Err(PoolError::InsufficientLiquidity);
        }

        let numerator = (U256::new(reserve_in.get()) * U256::new(amount_out.get()))
            .checked_mul(U256::new(u128::from(self.fee.denominator())))
            .ok_or(PoolError::Overflow("exact-out numerator exceeds 256 bits"))?;
        // amount_out < reserve_out, so the remaining reserve is positive
        let remaining = U256::new(reserve_out.get() - amount_out.get());
        let denominator = remaining * U256::new(u128::from(self.fee.complement()));

        let mut amount_in = numerator / denominator;
        if numerator % denominator != U256::ZERO {
            amount_in += U256::ONE;
        }
        Ok(Amount::new(narrow(amount_in, "required input exceeds 128 bits")?))
    }

    /// Share of `amount_in` attributed to the fee, floored.
    ///
    /// Informational only: the whole input enters the reserve either way.
    ///
    /// # Errors
    ///
    /// [`PoolError::Overflow`] only if the narrowing invariant breaks.
    pub fn fee_portion(&self, amount_in: Amount) -> Result<Amount, PoolError> {
        self.fee.apply(amount_in, Rounding::Down)
    }

    /// Quotes a swap in `direction` against `reserves`.
    ///
    /// Returns `(amount_out, fee_portion)`.
    ///
    /// # Errors
    ///
    /// Same as [`PricingEngine::quote_output`].
    pub fn quote_swap(
        &self,
        direction: SwapDirection,
        amount_in: Amount,
        reserves: &Reserves,
    ) -> Result<(Amount, Amount), PoolError> {
        let (reserve_in, reserve_out) = reserves.oriented(direction);
        let out = self.quote_output(amount_in, reserve_in, reserve_out)?;
        let fee = self.fee_portion(amount_in)?;
        Ok((out, fee))
    }
}
