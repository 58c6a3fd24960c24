//! Fundamental value types used throughout the pool.
//!
//! Amounts, claims, fees, accounts, and swap descriptors.  All are
//! `Copy` newtypes or small enums with validated constructors where an
//! invariant exists.

mod account_id;
mod amount;
mod claims;
mod fee_rate;
mod reserves;
mod rounding;
mod swap_direction;
mod swap_outcome;

pub use account_id::AccountId;
pub use amount::Amount;
pub use claims::Claims;
pub use fee_rate::FeeRate;
pub use reserves::Reserves;
pub use rounding::Rounding;
pub use swap_direction::{Side, SwapDirection};
pub use swap_outcome::SwapOutcome;
