//! Thread-safe handle to a [`PoolService`].

use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use super::PoolService;
use crate::domain::{AccountId, Amount, Claims, SwapDirection, SwapOutcome};
use crate::error::PoolError;
use crate::ledger::{AssetLedger, ClaimLedger, InMemoryLedger};
use crate::traits::{LiquidityPool, SwapPool};

/// Cloneable handle serializing every operation on one pool.
///
/// The lock is held for the whole operation, ledger calls included, so
/// operations from different threads never interleave.
#[derive(Debug)]
pub struct SharedPool<L = InMemoryLedger, C = InMemoryLedger> {
    inner: Arc<Mutex<PoolService<L, C>>>,
}

impl<L, C> Clone for SharedPool<L, C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<L: AssetLedger, C: ClaimLedger> SharedPool<L, C> {
    /// Moves `service` behind a lock; clones of the handle share it.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pair_pool::config::PoolConfig;
    /// use pair_pool::domain::{AccountId, Amount, Claims};
    /// use pair_pool::ledger::InMemoryLedger;
    /// use pair_pool::pool::{PoolService, SharedPool};
    ///
    /// let cfg = PoolConfig::with_default_fee(AccountId::from_bytes([9u8; 32])).expect("config");
    /// let service = PoolService::new(
    ///     &cfg,
    ///     InMemoryLedger::new("AAA"),
    ///     InMemoryLedger::new("BBB"),
    ///     InMemoryLedger::new("LP"),
    /// )
    /// .expect("empty ledgers");
    ///
    /// let shared = SharedPool::new(service);
    /// let other = shared.clone();
    /// assert_eq!(other.reserves(), (Amount::ZERO, Amount::ZERO));
    /// assert_eq!(shared.total_claims(), Claims::ZERO);
    /// ```
    pub fn new(service: PoolService<L, C>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(service)),
        }
    }

    /// Locks the pool for a sequence of calls that must not interleave
    /// with other handles.
    pub fn lock(&self) -> MutexGuard<'_, PoolService<L, C>> {
        self.inner.lock()
    }

    /// See [`LiquidityPool::provide_liquidity`].
    ///
    /// # Errors
    ///
    /// Same as the wrapped operation.
    pub fn provide_liquidity(
        &self,
        provider: &AccountId,
        amount_a: Amount,
        amount_b: Amount,
    ) -> Result<Claims, PoolError> {
        self.inner.lock().provide_liquidity(provider, amount_a, amount_b)
    }

    /// See [`LiquidityPool::remove_liquidity`].
    ///
    /// # Errors
    ///
    /// Same as the wrapped operation.
    pub fn remove_liquidity(
        &self,
        provider: &AccountId,
        claims: Claims,
    ) -> Result<(Amount, Amount), PoolError> {
        self.inner.lock().remove_liquidity(provider, claims)
    }

    /// See [`SwapPool::swap`].
    ///
    /// # Errors
    ///
    /// Same as the wrapped operation.
    pub fn swap(
        &self,
        trader: &AccountId,
        direction: SwapDirection,
        amount_in: Amount,
        min_amount_out: Amount,
    ) -> Result<SwapOutcome, PoolError> {
        self.inner
            .lock()
            .swap(trader, direction, amount_in, min_amount_out)
    }

    #[must_use]
    pub fn reserves(&self) -> (Amount, Amount) {
        self.inner.lock().reserves()
    }

    #[must_use]
    pub fn total_claims(&self) -> Claims {
        self.inner.lock().total_claims()
    }

    /// Runs `f` with shared access to the service.
    pub fn with<R>(&self, f: impl FnOnce(&PoolService<L, C>) -> R) -> R {
        f(&self.inner.lock())
    }
}

impl<L: AssetLedger, C: ClaimLedger> From<PoolService<L, C>> for SharedPool<L, C> {
    fn from(service: PoolService<L, C>) -> Self {
        Self::new(service)
    }
}
