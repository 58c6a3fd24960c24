//! Orchestration of ledger calls and state transitions.
//!
//! Every operation follows the same sequence:
//!
//! 1. compute the effect and the next [`PoolState`] from the current one;
//! 2. pre-validate every ledger leg (allowance and balance);
//! 3. run the inbound legs and confirm what actually landed;
//! 4. run the outbound legs, compensating completed legs on failure;
//! 5. commit the next state and record one [`PoolEvent`].
//!
//! Nothing is committed before step 5, so any error leaves the pool and
//! the ledgers as they were.

use tracing::{debug, error, info, warn};

use crate::config::PoolConfig;
use crate::domain::{AccountId, Amount, Claims, FeeRate, Reserves, Side, SwapDirection, SwapOutcome};
use crate::error::PoolError;
use crate::ledger::{AssetLedger, ClaimLedger, InMemoryLedger};
use crate::traits::{FromConfig, LiquidityPool, SwapPool};

use super::{LiquidityAccountant, PoolEvent, PoolSnapshot, PoolState, PricingEngine};

/// A two-asset constant-product pool bound to its three ledgers.
///
/// The service owns the ledgers for its whole lifetime and every mutating
/// operation takes `&mut self`, so no ledger can call back into the pool
/// while an operation is in flight.  Wrap it in a
/// [`SharedPool`](super::SharedPool) to share it across threads.
///
/// # Example
///
/// ```rust
/// use pair_pool::config::PoolConfig;
/// use pair_pool::domain::{AccountId, Amount};
/// use pair_pool::ledger::InMemoryLedger;
/// use pair_pool::pool::PoolService;
/// use pair_pool::traits::{LiquidityPool, SwapPool};
///
/// let pool_account = AccountId::from_bytes([9u8; 32]);
/// let alice = AccountId::from_bytes([1u8; 32]);
///
/// let mut asset_a = InMemoryLedger::new("AAA");
/// let mut asset_b = InMemoryLedger::new("BBB");
/// asset_a.credit(&alice, Amount::new(1_000)).expect("credit");
/// asset_b.credit(&alice, Amount::new(1_000)).expect("credit");
/// asset_a.approve(&alice, &pool_account, Amount::MAX);
/// asset_b.approve(&alice, &pool_account, Amount::MAX);
///
/// let cfg = PoolConfig::with_default_fee(pool_account).expect("config");
/// let mut pool = PoolService::new(&cfg, asset_a, asset_b, InMemoryLedger::new("LP"))
///     .expect("empty ledgers");
///
/// let minted = pool
///     .provide_liquidity(&alice, Amount::new(100), Amount::new(400))
///     .expect("deposit");
/// assert_eq!(minted.get(), 200);
///
/// let outcome = pool
///     .swap_a_for_b(&alice, Amount::new(10), Amount::new(36))
///     .expect("swap");
/// assert_eq!(outcome.amount_out(), Amount::new(36));
/// ```
#[derive(Debug)]
pub struct PoolService<L = InMemoryLedger, C = InMemoryLedger> {
    pool_account: AccountId,
    state: PoolState,
    pricing: PricingEngine,
    asset_a: L,
    asset_b: L,
    claims: C,
    events: Vec<PoolEvent>,
}

impl<L: AssetLedger, C: ClaimLedger> PoolService<L, C> {
    /// Creates an empty pool over the given ledgers.
    ///
    /// # Errors
    ///
    /// - Propagates any error from [`PoolConfig::validate`].
    /// - [`PoolError::ReserveMismatch`] if the pool account already holds
    ///   either asset, or the claim ledger already has a supply.
    pub fn new(config: &PoolConfig, asset_a: L, asset_b: L, claims: C) -> Result<Self, PoolError> {
        let state = PoolState::from_config(config)?;
        let service = Self::assemble(config.pool_account(), state, asset_a, asset_b, claims);
        service.verify_reserves()?;
        info!(
            pool = %service.pool_account,
            fee = %service.state.fee(),
            "pool created"
        );
        Ok(service)
    }

    /// Restores a pool from `snapshot` over ledgers that already hold its
    /// balances.
    ///
    /// # Errors
    ///
    /// - [`PoolError::InvalidConfiguration`] if the snapshot is
    ///   inconsistent or its fee is not equivalent to `config`'s.
    /// - [`PoolError::ReserveMismatch`] if the ledgers disagree with the
    ///   snapshot's reserves, supply, or listed claim balances.
    pub fn from_snapshot(
        config: &PoolConfig,
        snapshot: &PoolSnapshot,
        asset_a: L,
        asset_b: L,
        claims: C,
    ) -> Result<Self, PoolError> {
        config.validate()?;
        let state = snapshot.state()?;
        if !state.fee().is_equivalent(&config.fee()) {
            return Err(PoolError::InvalidConfiguration(
                "snapshot fee differs from configured fee",
            ));
        }

        let service = Self::assemble(config.pool_account(), state, asset_a, asset_b, claims);
        service.verify_reserves()?;
        for (holder, held) in &snapshot.claim_balances {
            let actual = service.claims.balance_of(holder);
            if actual != held.as_amount() {
                return Err(PoolError::ReserveMismatch {
                    expected: held.as_amount(),
                    actual,
                });
            }
        }

        info!(
            pool = %service.pool_account,
            reserves = %service.state.reserves(),
            total_claims = %service.state.total_claims(),
            "pool restored from snapshot"
        );
        Ok(service)
    }

    fn assemble(pool_account: AccountId, state: PoolState, asset_a: L, asset_b: L, claims: C) -> Self {
        Self {
            pool_account,
            pricing: PricingEngine::new(state.fee()),
            state,
            asset_a,
            asset_b,
            claims,
            events: Vec::new(),
        }
    }

    /// The ledger account holding the reserves.
    #[must_use]
    pub const fn pool_account(&self) -> AccountId {
        self.pool_account
    }

    /// Current pool state.
    #[must_use]
    pub const fn state(&self) -> &PoolState {
        &self.state
    }

    #[must_use]
    pub const fn pricing(&self) -> &PricingEngine {
        &self.pricing
    }

    /// Ledger of the given asset.
    #[must_use]
    pub const fn ledger(&self, side: Side) -> &L {
        match side {
            Side::A => &self.asset_a,
            Side::B => &self.asset_b,
        }
    }

    /// Mutable ledger of the given asset.
    ///
    /// Balances changed through this handle are not tracked by the pool;
    /// [`PoolService::verify_reserves`] reports any drift they cause.
    pub fn ledger_mut(&mut self, side: Side) -> &mut L {
        match side {
            Side::A => &mut self.asset_a,
            Side::B => &mut self.asset_b,
        }
    }

    #[must_use]
    pub const fn claim_ledger(&self) -> &C {
        &self.claims
    }

    /// Mutable claim ledger, with the same caveat as
    /// [`PoolService::ledger_mut`].
    pub fn claim_ledger_mut(&mut self) -> &mut C {
        &mut self.claims
    }

    /// Claims held by `account`.
    #[must_use]
    pub fn claim_balance_of(&self, account: &AccountId) -> Claims {
        Claims::from(self.claims.balance_of(account))
    }

    /// Quotes a swap of `amount_in` against the current reserves.
    ///
    /// # Errors
    ///
    /// Same as [`PricingEngine::quote_output`].
    pub fn quote_swap(&self, direction: SwapDirection, amount_in: Amount) -> Result<Amount, PoolError> {
        let (amount_out, _) = self.pricing.quote_swap(direction, amount_in, &self.state.reserves())?;
        debug!(%direction, %amount_in, %amount_out, "swap quoted");
        Ok(amount_out)
    }

    /// Input needed to receive exactly `amount_out` at the current
    /// reserves.
    ///
    /// # Errors
    ///
    /// Same as [`PricingEngine::quote_input`].
    pub fn quote_input(&self, direction: SwapDirection, amount_out: Amount) -> Result<Amount, PoolError> {
        let (reserve_in, reserve_out) = self.state.reserves().oriented(direction);
        let amount_in = self.pricing.quote_input(amount_out, reserve_in, reserve_out)?;
        debug!(%direction, %amount_in, %amount_out, "exact-out input quoted");
        Ok(amount_in)
    }

    /// Compares the tracked reserves and claim supply with the ledgers.
    ///
    /// # Errors
    ///
    /// [`PoolError::ReserveMismatch`] for the first figure that differs.
    pub fn verify_reserves(&self) -> Result<(), PoolError> {
        let observed = self.pool_balances();
        let checks = [
            (self.state.reserve_a(), observed.a),
            (self.state.reserve_b(), observed.b),
            (self.state.total_claims().as_amount(), self.claims.total_supply()),
        ];
        for (expected, actual) in checks {
            if expected != actual {
                warn!(pool = %self.pool_account, %expected, %actual, "ledger drift detected");
                return Err(PoolError::ReserveMismatch { expected, actual });
            }
        }
        Ok(())
    }

    /// Captures the pool state with the claim balances of `holders`.
    #[must_use]
    pub fn snapshot(&self, holders: &[AccountId]) -> PoolSnapshot {
        let balances = holders
            .iter()
            .map(|holder| (*holder, self.claim_balance_of(holder)))
            .collect();
        PoolSnapshot::capture(&self.state, balances)
    }

    /// Events recorded since the last drain.
    #[must_use]
    pub fn events(&self) -> &[PoolEvent] {
        &self.events
    }

    /// Takes all recorded events.
    pub fn drain_events(&mut self) -> Vec<PoolEvent> {
        std::mem::take(&mut self.events)
    }

    fn pool_balances(&self) -> Reserves {
        Reserves::new(
            self.asset_a.balance_of(&self.pool_account),
            self.asset_b.balance_of(&self.pool_account),
        )
    }

    /// Moves `amount` of `side` from `from` to `to` to undo a completed
    /// leg.  Failures are logged; the original error is what the caller
    /// reports.
    fn compensate(&mut self, side: Side, from: &AccountId, to: &AccountId, amount: Amount) {
        if amount.is_zero() {
            return;
        }
        let result = self.ledger_mut(side).transfer(from, to, amount);
        let ledger = self.ledger(side).symbol();
        match result {
            Ok(()) => warn!(%ledger, %from, %to, %amount, "compensating transfer applied"),
            Err(err) => error!(%ledger, %from, %to, %amount, error = %err, "compensating transfer failed"),
        }
    }

    fn remint(&mut self, to: &AccountId, claims: Claims) {
        match self.claims.mint(to, claims.as_amount()) {
            Ok(()) => warn!(%to, %claims, "burned claims re-minted"),
            Err(err) => error!(%to, %claims, error = %err, "claim re-mint failed"),
        }
    }

    /// Undoes a completed `transfer_from` of `pulled` on `side`: refunds
    /// whatever landed since `before` and re-grants the allowance the pull
    /// consumed.
    fn reverse_pull(&mut self, side: Side, owner: &AccountId, pulled: Amount, before: &Reserves) {
        let pool = self.pool_account;
        let landed = self
            .pool_balances()
            .get(side)
            .checked_sub(&before.get(side))
            .unwrap_or_default();
        self.compensate(side, &pool, owner, landed);

        let result = self.ledger_mut(side).increase_allowance(owner, &pool, pulled);
        let ledger = self.ledger(side).symbol();
        match result {
            Ok(()) => warn!(%ledger, %owner, amount = %pulled, "consumed allowance restored"),
            Err(err) => error!(%ledger, %owner, amount = %pulled, error = %err, "allowance restore failed"),
        }
    }

    fn reverse_deposit(&mut self, provider: &AccountId, amount_a: Amount, amount_b: Amount, before: &Reserves) {
        self.reverse_pull(Side::A, provider, amount_a, before);
        self.reverse_pull(Side::B, provider, amount_b, before);
    }

    fn execute_deposit(
        &mut self,
        provider: &AccountId,
        amount_a: Amount,
        amount_b: Amount,
    ) -> Result<Claims, PoolError> {
        let minted = LiquidityAccountant::claims_for_deposit(&self.state, amount_a, amount_b)?;
        let next = self.state.with_deposit(amount_a, amount_b, minted)?;
        debug!(%provider, %amount_a, %amount_b, %minted, "deposit validated");

        let pool = self.pool_account;
        self.asset_a.check_pull(&pool, provider, amount_a)?;
        self.asset_b.check_pull(&pool, provider, amount_b)?;

        let before = self.pool_balances();
        self.asset_a.transfer_from(&pool, provider, &pool, amount_a)?;
        if let Err(err) = self.asset_b.transfer_from(&pool, provider, &pool, amount_b) {
            self.reverse_pull(Side::A, provider, amount_a, &before);
            return Err(err.into());
        }

        let observed = self.pool_balances();
        if let Err(err) = LiquidityAccountant::confirm_deposit(&before, &observed, amount_a, amount_b) {
            self.reverse_deposit(provider, amount_a, amount_b, &before);
            return Err(err);
        }

        if let Err(err) = self.claims.mint(provider, minted.as_amount()) {
            self.reverse_deposit(provider, amount_a, amount_b, &before);
            return Err(err.into());
        }

        self.state = next;
        self.events.push(PoolEvent::LiquidityProvided {
            provider: *provider,
            amount_a,
            amount_b,
            claims_minted: minted,
            reserves: next.reserves(),
        });
        info!(
            %provider,
            %amount_a,
            %amount_b,
            asset_a = self.asset_a.symbol(),
            asset_b = self.asset_b.symbol(),
            %minted,
            reserves = %next.reserves(),
            total_claims = %next.total_claims(),
            "liquidity provided"
        );
        Ok(minted)
    }

    fn execute_withdrawal(
        &mut self,
        provider: &AccountId,
        claims: Claims,
    ) -> Result<(Amount, Amount), PoolError> {
        if claims.is_zero() {
            return Err(PoolError::ZeroAmount);
        }
        let held = self.claim_balance_of(provider);
        if held < claims {
            return Err(PoolError::InsufficientClaims {
                held,
                requested: claims,
            });
        }

        let (amount_a, amount_b) = LiquidityAccountant::amounts_for_withdrawal(&self.state, claims)?;
        if amount_a.is_zero() || amount_b.is_zero() {
            return Err(PoolError::InsufficientOutputAmount);
        }
        let next = self.state.with_withdrawal(amount_a, amount_b, claims)?;
        debug!(%provider, %claims, %amount_a, %amount_b, "withdrawal validated");

        let pool = self.pool_account;
        self.claims.check_push(provider, claims.as_amount())?;
        self.asset_a.check_push(&pool, amount_a)?;
        self.asset_b.check_push(&pool, amount_b)?;

        self.claims.burn(provider, claims.as_amount())?;
        if let Err(err) = self.asset_a.transfer(&pool, provider, amount_a) {
            self.remint(provider, claims);
            return Err(err.into());
        }
        if let Err(err) = self.asset_b.transfer(&pool, provider, amount_b) {
            self.compensate(Side::A, provider, &pool, amount_a);
            self.remint(provider, claims);
            return Err(err.into());
        }

        self.state = next;
        self.events.push(PoolEvent::LiquidityRemoved {
            provider: *provider,
            claims_burned: claims,
            amount_a,
            amount_b,
            reserves: next.reserves(),
        });
        info!(
            %provider,
            %claims,
            %amount_a,
            %amount_b,
            reserves = %next.reserves(),
            total_claims = %next.total_claims(),
            "liquidity removed"
        );
        Ok((amount_a, amount_b))
    }

    fn execute_swap(
        &mut self,
        trader: &AccountId,
        direction: SwapDirection,
        amount_in: Amount,
        min_amount_out: Amount,
    ) -> Result<SwapOutcome, PoolError> {
        let (amount_out, fee) = self
            .pricing
            .quote_swap(direction, amount_in, &self.state.reserves())?;
        if amount_out.is_zero() {
            return Err(PoolError::InsufficientOutputAmount);
        }
        if amount_out < min_amount_out {
            return Err(PoolError::SlippageExceeded {
                quoted: amount_out,
                minimum: min_amount_out,
            });
        }
        let outcome = SwapOutcome::new(direction, amount_in, amount_out, fee)?;
        let next = self.state.with_swap(direction, amount_in, amount_out, fee)?;
        debug!(%trader, %direction, %amount_in, %amount_out, %fee, "swap validated");

        let pool = self.pool_account;
        let (side_in, side_out) = (direction.input(), direction.output());
        self.ledger(side_in).check_pull(&pool, trader, amount_in)?;
        self.ledger(side_out).check_push(&pool, amount_out)?;

        let before = self.pool_balances();
        self.ledger_mut(side_in)
            .transfer_from(&pool, trader, &pool, amount_in)?;

        let inbound = match side_in {
            Side::A => (amount_in, Amount::ZERO),
            Side::B => (Amount::ZERO, amount_in),
        };
        let observed = self.pool_balances();
        if let Err(err) = LiquidityAccountant::confirm_deposit(&before, &observed, inbound.0, inbound.1) {
            self.reverse_pull(side_in, trader, amount_in, &before);
            return Err(err);
        }

        if let Err(err) = self.ledger_mut(side_out).transfer(&pool, trader, amount_out) {
            self.reverse_pull(side_in, trader, amount_in, &before);
            return Err(err.into());
        }

        self.state = next;
        self.events.push(PoolEvent::Swapped {
            trader: *trader,
            direction,
            amount_in,
            amount_out,
            fee,
            reserves: next.reserves(),
        });
        info!(
            %trader,
            %direction,
            %amount_in,
            %amount_out,
            %fee,
            sold = self.ledger(side_in).symbol(),
            bought = self.ledger(side_out).symbol(),
            reserves = %next.reserves(),
            "swap executed"
        );
        Ok(outcome)
    }
}

impl<L: AssetLedger, C: ClaimLedger> SwapPool for PoolService<L, C> {
    fn quote_output(
        &self,
        amount_in: Amount,
        reserve_in: Amount,
        reserve_out: Amount,
    ) -> Result<Amount, PoolError> {
        self.pricing.quote_output(amount_in, reserve_in, reserve_out)
    }

    /// Pulls `amount_in` from `trader` and pays out the quoted amount.
    ///
    /// # Errors
    ///
    /// - [`PoolError::ZeroAmount`] if `amount_in` is zero.
    /// - [`PoolError::InsufficientLiquidity`] if the pool is empty.
    /// - [`PoolError::InsufficientOutputAmount`] if the quote is zero.
    /// - [`PoolError::SlippageExceeded`] if the quote is below
    ///   `min_amount_out`.
    /// - [`PoolError::Ledger`] if the trader's allowance or balance is
    ///   short, or a transfer fails.
    /// - [`PoolError::ReserveMismatch`] if the input did not land in full.
    fn swap(
        &mut self,
        trader: &AccountId,
        direction: SwapDirection,
        amount_in: Amount,
        min_amount_out: Amount,
    ) -> Result<SwapOutcome, PoolError> {
        let result = self.execute_swap(trader, direction, amount_in, min_amount_out);
        if let Err(err) = &result {
            warn!(%trader, %direction, %amount_in, %min_amount_out, error = %err, "swap rejected");
        }
        result
    }

    fn reserves(&self) -> (Amount, Amount) {
        self.state.reserves().as_tuple()
    }

    fn fee(&self) -> FeeRate {
        self.state.fee()
    }
}

impl<L: AssetLedger, C: ClaimLedger> LiquidityPool for PoolService<L, C> {
    /// Pulls both assets from `provider` and mints claims to them.
    ///
    /// # Errors
    ///
    /// In addition to the trait-level errors:
    ///
    /// - [`PoolError::ReserveMismatch`] if a pulled amount did not land
    ///   in full; whatever did land is refunded.
    fn provide_liquidity(
        &mut self,
        provider: &AccountId,
        amount_a: Amount,
        amount_b: Amount,
    ) -> Result<Claims, PoolError> {
        let result = self.execute_deposit(provider, amount_a, amount_b);
        if let Err(err) = &result {
            warn!(%provider, %amount_a, %amount_b, error = %err, "deposit rejected");
        }
        result
    }

    /// Burns `claims` from `provider` and pays out both assets.
    ///
    /// # Errors
    ///
    /// In addition to the trait-level errors:
    ///
    /// - [`PoolError::InsufficientOutputAmount`] if either payout floors
    ///   to zero.
    fn remove_liquidity(
        &mut self,
        provider: &AccountId,
        claims: Claims,
    ) -> Result<(Amount, Amount), PoolError> {
        let result = self.execute_withdrawal(provider, claims);
        if let Err(err) = &result {
            warn!(%provider, %claims, error = %err, "withdrawal rejected");
        }
        result
    }

    fn total_claims(&self) -> Claims {
        self.state.total_claims()
    }
}
