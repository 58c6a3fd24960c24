//! Construction from a validated configuration.
//!
//! Implementations must validate all configuration invariants during
//! construction, so a successfully built value is in a valid initial
//! state.  There is no blanket implementation: each pairing is explicit.

use crate::error::PoolError;

/// Builds `Self` from configuration `C`.
pub trait FromConfig<C> {
    /// Creates a new instance from `config`.
    ///
    /// # Errors
    ///
    /// [`PoolError::InvalidConfiguration`] if `config` is invalid.
    fn from_config(config: &C) -> Result<Self, PoolError>
    where
        Self: Sized;
}
