//! Liquidity provision extending [`SwapPool`].
//!
//! # Claim Accounting Invariant
//!
//! The total claim supply reported by [`LiquidityPool::total_claims`]
//! changes only through [`LiquidityPool::provide_liquidity`] and
//! [`LiquidityPool::remove_liquidity`], and always equals the supply in
//! the claim ledger.  Swaps never mint or burn claims; the fees they
//! retain raise the value of every outstanding claim instead.

use super::SwapPool;
use crate::domain::{AccountId, Amount, Claims};
use crate::error::PoolError;

/// Trait for pools that accept paired deposits against proportional
/// claims.
pub trait LiquidityPool: SwapPool {
    /// Deposits `amount_a` and `amount_b` from `provider` and mints
    /// claims to them.
    ///
    /// # Returns
    ///
    /// The [`Claims`] minted.
    ///
    /// # Errors
    ///
    /// - [`PoolError::ZeroAmount`] if either amount is zero.
    /// - [`PoolError::InvalidRatio`] if the pair does not match the
    ///   current reserve ratio exactly.
    /// - [`PoolError::InsufficientClaimsMinted`] if the deposit is too
    ///   small to mint a single claim.
    /// - [`PoolError::Ledger`] if either asset cannot be pulled.
    fn provide_liquidity(
        &mut self,
        provider: &AccountId,
        amount_a: Amount,
        amount_b: Amount,
    ) -> Result<Claims, PoolError>;

    /// Burns `claims` held by `provider` and pays out the proportional
    /// share of both reserves.
    ///
    /// # Returns
    ///
    /// `(amount_a_out, amount_b_out)`, each rounded down.
    ///
    /// # Errors
    ///
    /// - [`PoolError::ZeroAmount`] if `claims` is zero.
    /// - [`PoolError::InsufficientClaims`] if `provider` holds fewer.
    fn remove_liquidity(
        &mut self,
        provider: &AccountId,
        claims: Claims,
    ) -> Result<(Amount, Amount), PoolError>;

    /// Total outstanding claims.
    #[must_use]
    fn total_claims(&self) -> Claims;
}
