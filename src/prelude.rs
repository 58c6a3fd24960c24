//! Convenience re-exports for common types and traits.
//!
//! ```rust
//! use pair_pool::prelude::*;
//! ```

pub use crate::domain::{
    AccountId, Amount, Claims, FeeRate, Reserves, Rounding, Side, SwapDirection, SwapOutcome,
};

pub use crate::traits::{FromConfig, LiquidityPool, SwapPool};

pub use crate::math::CheckedArithmetic;

pub use crate::config::PoolConfig;

pub use crate::ledger::{AssetLedger, ClaimLedger, LedgerError};

pub use crate::pool::{PoolEvent, PoolService, PoolSnapshot, PoolState, SharedPool};

pub use crate::error::{PoolError, Result};
