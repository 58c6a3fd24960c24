//! Pool state and its persisted snapshot.
//!
//! [`PoolState`] is a plain value.  Every transition is computed as a new
//! value by one of the `with_*` methods and only swapped in by the
//! service once the matching ledger transfers have succeeded, so a failed
//! operation leaves the old value untouched.

use serde::{Deserialize, Serialize};

use crate::config::PoolConfig;
use crate::domain::{AccountId, Amount, Claims, FeeRate, Reserves, Side, SwapDirection};
use crate::error::PoolError;
use crate::math::CheckedArithmetic;
use crate::traits::FromConfig;

/// Reserve counters, claim supply, fee, and lifetime fee counters of one
/// pool.
///
/// # Invariants
///
/// - `total_claims == 0` exactly when both reserves are zero.
/// - `total_claims > 0` implies both reserves are positive.
/// - The fee never changes after construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolState {
    reserves: Reserves,
    total_claims: Claims,
    fee: FeeRate,
    fees_a: Amount,
    fees_b: Amount,
}

impl PoolState {
    /// Creates an empty pool with the given fee.
    #[must_use]
    pub const fn new(fee: FeeRate) -> Self {
        Self {
            reserves: Reserves::ZERO,
            total_claims: Claims::ZERO,
            fee,
            fees_a: Amount::ZERO,
            fees_b: Amount::ZERO,
        }
    }

    /// Current reserves.
    #[must_use]
    pub const fn reserves(&self) -> Reserves {
        self.reserves
    }

    #[must_use]
    pub const fn reserve_a(&self) -> Amount {
        self.reserves.a
    }

    #[must_use]
    pub const fn reserve_b(&self) -> Amount {
        self.reserves.b
    }

    /// Total outstanding claims.
    #[must_use]
    pub const fn total_claims(&self) -> Claims {
        self.total_claims
    }

    #[must_use]
    pub const fn fee(&self) -> FeeRate {
        self.fee
    }

    /// Lifetime fees retained on asset A inputs.
    #[must_use]
    pub const fn fees_a(&self) -> Amount {
        self.fees_a
    }

    /// Lifetime fees retained on asset B inputs.
    #[must_use]
    pub const fn fees_b(&self) -> Amount {
        self.fees_b
    }

    /// Lifetime fees retained on the given side.
    #[must_use]
    pub const fn fees(&self, side: Side) -> Amount {
        match side {
            Side::A => self.fees_a,
            Side::B => self.fees_b,
        }
    }

    /// Returns `true` if the pool holds no liquidity.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.total_claims.is_zero()
    }

    /// State after a deposit of `(amount_a, amount_b)` minting `minted`.
    ///
    /// # Errors
    ///
    /// [`PoolError::Overflow`] if a reserve or the claim supply overflows.
    pub fn with_deposit(
        &self,
        amount_a: Amount,
        amount_b: Amount,
        minted: Claims,
    ) -> Result<Self, PoolError> {
        Ok(Self {
            reserves: Reserves::new(
                self.reserves.a.safe_add(&amount_a)?,
                self.reserves.b.safe_add(&amount_b)?,
            ),
            total_claims: self.total_claims.safe_add(&minted)?,
            ..*self
        })
    }

    /// State after paying out `(amount_a, amount_b)` against `burned`.
    ///
    /// # Errors
    ///
    /// [`PoolError::Underflow`] if a payout exceeds its reserve or
    /// `burned` exceeds the supply.
    pub fn with_withdrawal(
        &self,
        amount_a: Amount,
        amount_b: Amount,
        burned: Claims,
    ) -> Result<Self, PoolError> {
        Ok(Self {
            reserves: Reserves::new(
                self.reserves.a.safe_sub(&amount_a)?,
                self.reserves.b.safe_sub(&amount_b)?,
            ),
            total_claims: self.total_claims.safe_sub(&burned)?,
            ..*self
        })
    }

    /// State after a swap in `direction`.
    ///
    /// The full `amount_in`, fee included, is added to the input reserve;
    /// `fee` is only added to the informational counter.
    ///
    /// # Errors
    ///
    /// - [`PoolError::Overflow`] if the input reserve or a fee counter
    ///   overflows.
    /// - [`PoolError::Underflow`] if `amount_out` exceeds the output
    ///   reserve.
    pub fn with_swap(
        &self,
        direction: SwapDirection,
        amount_in: Amount,
        amount_out: Amount,
        fee: Amount,
    ) -> Result<Self, PoolError> {
        let (reserve_in, reserve_out) = self.reserves.oriented(direction);
        let reserve_in = reserve_in.safe_add(&amount_in)?;
        let reserve_out = reserve_out.safe_sub(&amount_out)?;

        let mut next = *self;
        match direction {
            SwapDirection::AForB => {
                next.reserves = Reserves::new(reserve_in, reserve_out);
                next.fees_a = self.fees_a.safe_add(&fee)?;
            }
            SwapDirection::BForA => {
                next.reserves = Reserves::new(reserve_out, reserve_in);
                next.fees_b = self.fees_b.safe_add(&fee)?;
            }
        }
        Ok(next)
    }

    /// Checks the structural invariants.
    ///
    /// # Errors
    ///
    /// [`PoolError::InvalidConfiguration`] if the claim supply and the
    /// reserves disagree about whether the pool holds liquidity.
    pub fn validate(&self) -> Result<(), PoolError> {
        if self.total_claims.is_zero() {
            if !self.reserves.a.is_zero() || !self.reserves.b.is_zero() {
                return Err(PoolError::InvalidConfiguration(
                    "reserves present without outstanding claims",
                ));
            }
        } else if self.reserves.has_empty_side() {
            return Err(PoolError::InvalidConfiguration(
                "outstanding claims against an empty reserve",
            ));
        }
        Ok(())
    }
}

impl FromConfig<PoolConfig> for PoolState {
    /// Creates an empty pool carrying the configured fee.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`PoolConfig::validate`].
    fn from_config(config: &PoolConfig) -> Result<Self, PoolError> {
        config.validate()?;
        Ok(Self::new(config.fee()))
    }
}

/// Persisted layout of a pool.
///
/// Holds the four invariant-bearing fields, the fee, the lifetime fee
/// counters, and the claim balances of the holders the caller asked for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolSnapshot {
    pub reserve_a: Amount,
    pub reserve_b: Amount,
    pub total_claims: Claims,
    pub fee: FeeRate,
    #[serde(default)]
    pub fees_a: Amount,
    #[serde(default)]
    pub fees_b: Amount,
    #[serde(default)]
    pub claim_balances: Vec<(AccountId, Claims)>,
}

impl PoolSnapshot {
    /// Captures `state` together with `claim_balances`.
    #[must_use]
    pub fn capture(state: &PoolState, claim_balances: Vec<(AccountId, Claims)>) -> Self {
        Self {
            reserve_a: state.reserve_a(),
            reserve_b: state.reserve_b(),
            total_claims: state.total_claims(),
            fee: state.fee(),
            fees_a: state.fees_a(),
            fees_b: state.fees_b(),
            claim_balances,
        }
    }

    /// Rebuilds the pool state.
    ///
    /// # Errors
    ///
    /// - [`PoolError::InvalidConfiguration`] if the state invariants do
    ///   not hold, or the listed claim balances add up to more than the
    ///   supply.
    /// - [`PoolError::Overflow`] if the listed balances overflow.
    pub fn state(&self) -> Result<PoolState, PoolError> {
        let state = PoolState {
            reserves: Reserves::new(self.reserve_a, self.reserve_b),
            total_claims: self.total_claims,
            fee: self.fee,
            fees_a: self.fees_a,
            fees_b: self.fees_b,
        };
        state.validate()?;

        let listed = self
            .claim_balances
            .iter()
            .try_fold(Claims::ZERO, |sum, (_, held)| sum.safe_add(held))?;
        if listed > self.total_claims {
            return Err(PoolError::InvalidConfiguration(
                "listed claim balances exceed total claims",
            ));
        }
        Ok(state)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn seeded() -> PoolState {
        let Ok(s) = PoolState::new(FeeRate::DEFAULT).with_deposit(
            Amount::new(100),
            Amount::new(400),
            Claims::new(200),
        ) else {
            panic!("deposit");
        };
        s
    }

    #[test]
    fn new_state_is_empty() {
        let s = PoolState::new(FeeRate::DEFAULT);
        assert!(s.is_empty());
        assert_eq!(s.reserves(), Reserves::ZERO);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn deposit_grows_all_counters() {
        let s = seeded();
        assert_eq!(s.reserve_a(), Amount::new(100));
        assert_eq!(s.reserve_b(), Amount::new(400));
        assert_eq!(s.total_claims(), Claims::new(200));
        assert!(s.validate().is_ok());
    }

    #[test]
    fn swap_keeps_fee_in_reserve() {
        let Ok(s) = seeded().with_swap(
            SwapDirection::AForB,
            Amount::new(10),
            Amount::new(36),
            Amount::ZERO,
        ) else {
            panic!("swap");
        };
        assert_eq!(s.reserves(), Reserves::new(Amount::new(110), Amount::new(364)));
        assert_eq!(s.total_claims(), Claims::new(200));
    }

    #[test]
    fn swap_b_for_a_updates_fee_counter_b() {
        let Ok(s) = seeded().with_swap(
            SwapDirection::BForA,
            Amount::new(1_000),
            Amount::new(70),
            Amount::new(3),
        ) else {
            panic!("swap");
        };
        assert_eq!(s.reserve_a(), Amount::new(30));
        assert_eq!(s.reserve_b(), Amount::new(1_400));
        assert_eq!(s.fees_b(), Amount::new(3));
        assert_eq!(s.fees(Side::A), Amount::ZERO);
    }

    #[test]
    fn swap_cannot_overdraw_output() {
        let r = seeded().with_swap(
            SwapDirection::AForB,
            Amount::new(10),
            Amount::new(401),
            Amount::ZERO,
        );
        assert!(matches!(r, Err(PoolError::Underflow(_))));
    }

    #[test]
    fn full_withdrawal_empties_pool() {
        let Ok(s) = seeded().with_withdrawal(Amount::new(100), Amount::new(400), Claims::new(200))
        else {
            panic!("withdraw");
        };
        assert!(s.is_empty());
        assert!(s.validate().is_ok());
    }

    #[test]
    fn withdrawal_cannot_burn_more_than_supply() {
        let r = seeded().with_withdrawal(Amount::ZERO, Amount::ZERO, Claims::new(201));
        assert!(matches!(r, Err(PoolError::Underflow(_))));
    }

    #[test]
    fn from_config_starts_empty() {
        let Ok(cfg) = PoolConfig::with_default_fee(AccountId::from_bytes([7u8; 32])) else {
            panic!("config");
        };
        let Ok(s) = PoolState::from_config(&cfg) else {
            panic!("state");
        };
        assert!(s.is_empty());
        assert_eq!(s.fee(), FeeRate::DEFAULT);
    }

    #[test]
    fn snapshot_restores_state() {
        let s = seeded();
        let snap = PoolSnapshot::capture(&s, vec![(AccountId::from_bytes([1u8; 32]), Claims::new(200))]);
        let Ok(back) = snap.state() else {
            panic!("restore");
        };
        assert_eq!(back, s);
    }

    #[test]
    fn snapshot_rejects_orphan_reserves() {
        let mut snap = PoolSnapshot::capture(&seeded(), Vec::new());
        snap.total_claims = Claims::ZERO;
        assert!(matches!(
            snap.state(),
            Err(PoolError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn snapshot_rejects_overlisted_claims() {
        let snap = PoolSnapshot::capture(
            &seeded(),
            vec![
                (AccountId::from_bytes([1u8; 32]), Claims::new(150)),
                (AccountId::from_bytes([2u8; 32]), Claims::new(51)),
            ],
        );
        assert!(snap.state().is_err());
    }
}
