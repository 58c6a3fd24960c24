//! The constant-product pool.
//!
//! - [`PoolState`]: reserves, claim supply, fee, fee counters.
//! - [`PricingEngine`]: pure swap quotes.
//! - [`LiquidityAccountant`]: claim minting and burning arithmetic.
//! - [`PoolService`]: sequences ledger calls and state transitions.
//! - [`SharedPool`]: thread-safe handle around a [`PoolService`].

mod accountant;
mod events;
mod pricing;
mod service;
mod shared;
mod state;

#[cfg(test)]
mod proptest_properties;

pub use accountant::LiquidityAccountant;
pub use events::PoolEvent;
pub use pricing::PricingEngine;
pub use service::PoolService;
pub use shared::SharedPool;
pub use state::{PoolSnapshot, PoolState};
