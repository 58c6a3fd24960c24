//! Claim arithmetic for deposits and withdrawals.
//!
//! # Minting
//!
//! - First deposit: `claims = ⌊√(amount_a × amount_b)⌋`.
//! - Later deposits must match the reserve ratio exactly
//!   (`amount_a × reserve_b == amount_b × reserve_a`) and mint
//!   `min(⌊amount_a × total / reserve_a⌋, ⌊amount_b × total / reserve_b⌋)`.
//!
//! # Burning
//!
//! `out_x = ⌊reserve_x × claims / total⌋` for each side.
//!
//! All products are formed in 256 bits.  Every rounding step favours the
//! pool over the caller.

use crate::domain::{Amount, Claims, Reserves, Rounding};
use crate::error::PoolError;
use crate::math::{integer_sqrt_product, mul_div, products_equal};

use super::PoolState;

/// Stateless claim calculator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LiquidityAccountant;

impl LiquidityAccountant {
    /// Claims minted for depositing `(amount_a, amount_b)` into `state`.
    ///
    /// # Errors
    ///
    /// - [`PoolError::ZeroAmount`] if either amount is zero.
    /// - [`PoolError::InvalidRatio`] if the pool already holds liquidity
    ///   and the amounts are not exactly proportional to its reserves.
    /// - [`PoolError::InsufficientClaimsMinted`] if the result floors to
    ///   zero.
    pub fn claims_for_deposit(
        state: &PoolState,
        amount_a: Amount,
        amount_b: Amount,
    ) -> Result<Claims, PoolError> {
        if amount_a.is_zero() || amount_b.is_zero() {
            return Err(PoolError::ZeroAmount);
        }

        let minted = if state.is_empty() {
            integer_sqrt_product(amount_a.get(), amount_b.get())?
        } else {
            let reserve_a = state.reserve_a().get();
            let reserve_b = state.reserve_b().get();
            if !products_equal(amount_a.get(), reserve_b, amount_b.get(), reserve_a) {
                return Err(PoolError::InvalidRatio);
            }
            let total = state.total_claims().get();
            let share_a = mul_div(amount_a.get(), total, reserve_a, Rounding::Down)?;
            let share_b = mul_div(amount_b.get(), total, reserve_b, Rounding::Down)?;
            share_a.min(share_b)
        };

        if minted == 0 {
            return Err(PoolError::InsufficientClaimsMinted);
        }
        Ok(Claims::new(minted))
    }

    /// Payout `(amount_a, amount_b)` for burning `claims`.
    ///
    /// Only checks `claims` against the total supply; the holder's own
    /// balance is checked by the caller against the claim ledger.
    ///
    /// # Errors
    ///
    /// - [`PoolError::ZeroAmount`] if `claims` is zero.
    /// - [`PoolError::InsufficientClaims`] if `claims` exceeds the supply.
    pub fn amounts_for_withdrawal(
        state: &PoolState,
        claims: Claims,
    ) -> Result<(Amount, Amount), PoolError> {
        if claims.is_zero() {
            return Err(PoolError::ZeroAmount);
        }
        let total = state.total_claims();
        if claims > total {
            return Err(PoolError::InsufficientClaims {
                held: total,
                requested: claims,
            });
        }

        let out_a = mul_div(state.reserve_a().get(), claims.get(), total.get(), Rounding::Down)?;
        let out_b = mul_div(state.reserve_b().get(), claims.get(), total.get(), Rounding::Down)?;
        Ok((Amount::new(out_a), Amount::new(out_b)))
    }

    /// Confirms that the ledger balances observed after pulling a deposit
    /// equal `before` plus the deposited amounts.
    ///
    /// # Errors
    ///
    /// [`PoolError::ReserveMismatch`] for the first side that disagrees.
    pub fn confirm_deposit(
        before: &Reserves,
        observed: &Reserves,
        amount_a: Amount,
        amount_b: Amount,
    ) -> Result<(), PoolError> {
        let expected_a = before
            .a
            .checked_add(&amount_a)
            .ok_or(PoolError::Overflow("reserve_a overflow on deposit"))?;
        let expected_b = before
            .b
            .checked_add(&amount_b)
            .ok_or(PoolError::Overflow("reserve_b overflow on deposit"))?;

        if observed.a != expected_a {
            return Err(PoolError::ReserveMismatch {
                expected: expected_a,
                actual: observed.a,
            });
        }
        if observed.b != expected_b {
            return Err(PoolError::ReserveMismatch {
                expected: expected_b,
                actual: observed.b,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::FeeRate;

    fn pool(reserve_a: u128, reserve_b: u128, total: u128) -> PoolState {
        let Ok(s) = PoolState::new(FeeRate::DEFAULT).with_deposit(
            Amount::new(reserve_a),
            Amount::new(reserve_b),
            Claims::new(total),
        ) else {
            panic!("seed");
        };
        s
    }

    fn deposit(state: &PoolState, a: u128, b: u128) -> Result<Claims, PoolError> {
        LiquidityAccountant::claims_for_deposit(state, Amount::new(a), Amount::new(b))
    }

    #[test]
    fn first_deposit_mints_geometric_mean() {
        let empty = PoolState::new(FeeRate::DEFAULT);
        assert_eq!(deposit(&empty, 100, 400), Ok(Claims::new(200)));
    }

    #[test]
    fn first_deposit_floors_irrational_root() {
        let empty = PoolState::new(FeeRate::DEFAULT);
        assert_eq!(deposit(&empty, 2, 3), Ok(Claims::new(2)));
    }

    #[test]
    fn first_deposit_at_max_amounts() {
        let empty = PoolState::new(FeeRate::DEFAULT);
        assert_eq!(deposit(&empty, u128::MAX, u128::MAX), Ok(Claims::new(u128::MAX)));
    }

    #[test]
    fn proportional_deposit() {
        assert_eq!(deposit(&pool(100, 400, 200), 50, 200), Ok(Claims::new(100)));
    }

    #[test]
    fn off_ratio_deposit_rejected() {
        assert_eq!(deposit(&pool(100, 400, 200), 50, 150), Err(PoolError::InvalidRatio));
    }

    #[test]
    fn zero_side_rejected() {
        let empty = PoolState::new(FeeRate::DEFAULT);
        assert_eq!(deposit(&empty, 0, 10), Err(PoolError::ZeroAmount));
        assert_eq!(deposit(&pool(100, 400, 200), 10, 0), Err(PoolError::ZeroAmount));
    }

    #[test]
    fn dust_deposit_mints_nothing() {
        // 1 × 3 / 1000 floors to zero
        assert_eq!(
            deposit(&pool(1_000, 1_000, 3), 1, 1),
            Err(PoolError::InsufficientClaimsMinted)
        );
    }

    #[test]
    fn withdrawal_is_proportional() {
        let Ok(out) = LiquidityAccountant::amounts_for_withdrawal(&pool(100, 400, 200), Claims::new(50))
        else {
            panic!("expected Ok");
        };
        assert_eq!(out, (Amount::new(25), Amount::new(100)));
    }

    #[test]
    fn withdrawal_floors() {
        let Ok(out) = LiquidityAccountant::amounts_for_withdrawal(&pool(10, 10, 3), Claims::new(1))
        else {
            panic!("expected Ok");
        };
        assert_eq!(out, (Amount::new(3), Amount::new(3)));
    }

    #[test]
    fn full_withdrawal_returns_everything() {
        let Ok(out) = LiquidityAccountant::amounts_for_withdrawal(&pool(7, 13, 9), Claims::new(9))
        else {
            panic!("expected Ok");
        };
        assert_eq!(out, (Amount::new(7), Amount::new(13)));
    }

    #[test]
    fn withdrawal_beyond_supply_rejected() {
        let r = LiquidityAccountant::amounts_for_withdrawal(&pool(100, 400, 200), Claims::new(201));
        assert!(matches!(r, Err(PoolError::InsufficientClaims { .. })));
        let r = LiquidityAccountant::amounts_for_withdrawal(&pool(100, 400, 200), Claims::ZERO);
        assert_eq!(r, Err(PoolError::ZeroAmount));
    }

    #[test]
    fn confirm_deposit_detects_short_transfer() {
        let before = Reserves::new(Amount::new(100), Amount::new(400));
        let observed = Reserves::new(Amount::new(150), Amount::new(599));
        let r = LiquidityAccountant::confirm_deposit(&before, &observed, Amount::new(50), Amount::new(200));
        assert_eq!(
            r,
            Err(PoolError::ReserveMismatch {
                expected: Amount::new(600),
                actual: Amount::new(599),
            })
        );
    }
}
