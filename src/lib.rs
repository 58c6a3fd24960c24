//! # Pair Pool
//!
//! Accounting and pricing engine for a two-asset constant-product pool.
//!
//! The pool holds reserves of two fungible assets, mints a proportional
//! claim token to liquidity providers, and prices swaps from the reserve
//! ratio with a fee retained on the input side.  All arithmetic is exact
//! integer arithmetic over `u128` with 256-bit intermediates.
//!
//! Balances never live in the pool itself.  Asset A, asset B, and the
//! claim token are held in ledgers the pool reaches through the
//! [`AssetLedger`](ledger::AssetLedger) and
//! [`ClaimLedger`](ledger::ClaimLedger) traits.
//!
//! # Quick Start
//!
//! ```rust
//! use pair_pool::prelude::*;
//! use pair_pool::ledger::InMemoryLedger;
//!
//! let pool_account = AccountId::from_bytes([9u8; 32]);
//! let lp = AccountId::from_bytes([1u8; 32]);
//! let trader = AccountId::from_bytes([2u8; 32]);
//!
//! // 1. Fund two asset ledgers and approve the pool as spender
//! let mut asset_a = InMemoryLedger::new("USDC");
//! let mut asset_b = InMemoryLedger::new("WETH");
//! for who in [lp, trader] {
//!     asset_a.credit(&who, Amount::new(10_000)).expect("credit");
//!     asset_b.credit(&who, Amount::new(10_000)).expect("credit");
//!     asset_a.approve(&who, &pool_account, Amount::MAX);
//!     asset_b.approve(&who, &pool_account, Amount::MAX);
//! }
//!
//! // 2. Create the pool with the default 0.3% fee
//! let config = PoolConfig::with_default_fee(pool_account).expect("valid config");
//! let mut pool = PoolService::new(&config, asset_a, asset_b, InMemoryLedger::new("LP"))
//!     .expect("empty ledgers");
//!
//! // 3. Seed it: the first deposit mints √(100 × 400) = 200 claims
//! let minted = pool
//!     .provide_liquidity(&lp, Amount::new(100), Amount::new(400))
//!     .expect("deposit");
//! assert_eq!(minted, Claims::new(200));
//!
//! // 4. Sell 10 A for at least 36 B
//! let outcome = pool
//!     .swap_a_for_b(&trader, Amount::new(10), Amount::new(36))
//!     .expect("swap");
//! assert_eq!(outcome.amount_out(), Amount::new(36));
//! assert_eq!(pool.reserves(), (Amount::new(110), Amount::new(364)));
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │    Caller     │  provide / remove / swap / quote
//! └──────┬───────┘
//!        ▼
//! ┌──────────────┐
//! │ PoolService  │  validates, sequences ledger legs, commits state
//! └──┬────────┬──┘
//!    │        │
//!    ▼        ▼
//! ┌───────┐ ┌────────────────────┐
//! │Ledgers│ │ PricingEngine       │  pure quotes
//! └───────┘ │ LiquidityAccountant │  claim arithmetic
//!           │ PoolState           │  reserves, claims, fee
//!           └────────────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Value types: [`Amount`](domain::Amount), [`Claims`](domain::Claims), [`FeeRate`](domain::FeeRate), etc. |
//! | [`traits`] | [`SwapPool`](traits::SwapPool), [`LiquidityPool`](traits::LiquidityPool), [`FromConfig`](traits::FromConfig) |
//! | [`config`] | [`PoolConfig`](config::PoolConfig) |
//! | [`ledger`] | Ledger capability traits and [`InMemoryLedger`](ledger::InMemoryLedger) |
//! | [`pool`]   | State, pricing, claim accounting, and the [`PoolService`](pool::PoolService) |
//! | [`math`]   | Checked and 256-bit arithmetic |
//! | [`error`]  | [`PoolError`](error::PoolError) unified error enum |
//! | [`prelude`] | Convenience re-exports |
//!
//! # Logging
//!
//! Operations emit [`tracing`] events: `debug` for quotes and validated
//! effects, `info` for committed operations, `warn` for rejections and
//! compensating transfers, `error` if a compensation itself fails.  The
//! crate never installs a subscriber.

pub mod config;
pub mod domain;
pub mod error;
pub mod ledger;
pub mod math;
pub mod pool;
pub mod prelude;
pub mod traits;
