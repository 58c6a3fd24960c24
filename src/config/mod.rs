//! Pool configuration.
//!
//! [`PoolConfig`] is the declarative blueprint for a pool: which ledger
//! account holds the reserves and which fee applies to swaps.  It is
//! validated on construction and on deserialization.

mod pool_config;

pub use pool_config::PoolConfig;
