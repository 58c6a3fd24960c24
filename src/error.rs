//! Unified error types for the pair pool.
//!
//! Every fallible pool operation returns [`PoolError`].  Ledger failures
//! are carried through unchanged in [`PoolError::Ledger`] so callers can
//! tell a rejected transfer apart from a rejected pool operation.
//!
//! No error is retried internally.  Each one aborts the operation before
//! any state change is committed.

use thiserror::Error;

use crate::domain::{Amount, Claims};
use crate::ledger::LedgerError;

/// All errors produced by pool accounting, pricing, and orchestration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PoolError {
    /// An amount argument was zero where a positive value is required.
    #[error("amount must be greater than zero")]
    ZeroAmount,

    /// Deposit amounts do not match the current reserve ratio exactly.
    #[error("deposit amounts do not match the current reserve ratio")]
    InvalidRatio,

    /// One or both reserves are zero.
    #[error("pool has insufficient liquidity")]
    InsufficientLiquidity,

    /// Computed output fell below the caller's minimum.
    #[error("slippage exceeded: quoted {quoted}, minimum {minimum}")]
    SlippageExceeded {
        /// Output the pool would pay.
        quoted: Amount,
        /// Minimum the caller accepts.
        minimum: Amount,
    },

    /// Withdrawal requests more claims than the caller holds.
    #[error("insufficient claims: held {held}, requested {requested}")]
    InsufficientClaims {
        /// Claims currently held by the caller.
        held: Claims,
        /// Claims the caller asked to burn.
        requested: Claims,
    },

    /// A deposit is too small to mint a single claim.
    #[error("deposit too small to mint any claims")]
    InsufficientClaimsMinted,

    /// A swap would pay out nothing.
    #[error("swap output rounds down to zero")]
    InsufficientOutputAmount,

    /// Tracked state disagrees with what the ledger reports.
    #[error("reserve mismatch: expected {expected}, ledger reports {actual}")]
    ReserveMismatch {
        /// Value the pool expected.
        expected: Amount,
        /// Value read from the ledger.
        actual: Amount,
    },

    /// Arithmetic overflow in an intermediate or narrowed result.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// Arithmetic underflow.
    #[error("arithmetic underflow: {0}")]
    Underflow(&'static str),

    /// Division by zero.
    #[error("division by zero")]
    DivisionByZero,

    /// Pool configuration is invalid.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),

    /// Propagated unchanged from an asset or claim ledger.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Convenience alias used across the crate.
pub type Result<T> = core::result::Result<T, PoolError>;
