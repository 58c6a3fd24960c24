//! Pool events
//!
//! Every committed operation records exactly one event.  Hosts drain them
//! with [`PoolService::drain_events`](super::PoolService::drain_events) for
//! indexing.

use serde::{Deserialize, Serialize};

use crate::domain::{AccountId, Amount, Claims, Reserves, SwapDirection};

/// Pool state change
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PoolEvent {
    /// Paired deposit accepted
    LiquidityProvided {
        /// Depositor
        provider: AccountId,
        /// Asset A deposited
        amount_a: Amount,
        /// Asset B deposited
        amount_b: Amount,
        /// Claims minted to the depositor
        claims_minted: Claims,
        /// Reserves after the deposit
        reserves: Reserves,
    },

    /// Claims burned for a share of both reserves
    LiquidityRemoved {
        /// Withdrawer
        provider: AccountId,
        /// Claims burned
        claims_burned: Claims,
        /// Asset A paid out
        amount_a: Amount,
        /// Asset B paid out
        amount_b: Amount,
        /// Reserves after the withdrawal
        reserves: Reserves,
    },

    /// Swap executed
    Swapped {
        /// Trader
        trader: AccountId,
        /// Which asset was sold
        direction: SwapDirection,
        /// Input pulled from the trader, fee included
        amount_in: Amount,
        /// Output paid to the trader
        amount_out: Amount,
        /// Fee share of the input
        fee: Amount,
        /// Reserves after the swap
        reserves: Reserves,
    },
}

impl PoolEvent {
    /// Account that initiated the operation.
    #[must_use]
    pub const fn account(&self) -> AccountId {
        match self {
            Self::LiquidityProvided { provider, .. } | Self::LiquidityRemoved { provider, .. } => {
                *provider
            }
            Self::Swapped { trader, .. } => *trader,
        }
    }

    /// Reserves after the operation.
    #[must_use]
    pub const fn reserves(&self) -> Reserves {
        match self {
            Self::LiquidityProvided { reserves, .. }
            | Self::LiquidityRemoved { reserves, .. }
            | Self::Swapped { reserves, .. } => *reserves,
        }
    }
}
