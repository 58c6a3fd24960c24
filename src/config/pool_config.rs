//! Configuration for a two-asset constant-product pool.

use serde::{Deserialize, Serialize};

use crate::domain::{AccountId, FeeRate};
use crate::error::PoolError;

/// Immutable parameters of one pool.
///
/// - `pool_account`: the ledger account that holds the pool's reserves
///   in the asset ledgers and acts as spender when pulling deposits.
/// - `fee`: swap fee retained on the input side; defaults to 3/1000.
///
/// Deserializes from any serde format, validating on the way in; a
/// missing `fee` falls back to the default.
///
/// ```
/// use pair_pool::config::PoolConfig;
/// use pair_pool::domain::AccountId;
///
/// let cfg = PoolConfig::with_default_fee(AccountId::from_bytes([9u8; 32])).expect("valid");
/// assert_eq!(cfg.fee().numerator(), 3);
/// ```
///
/// # Validation
///
/// - `pool_account` must not be the all-zero account.
/// - The fee is validated at [`FeeRate`] construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPoolConfig")]
pub struct PoolConfig {
    pool_account: AccountId,
    fee: FeeRate,
}

#[derive(Deserialize)]
struct RawPoolConfig {
    pool_account: AccountId,
    #[serde(default)]
    fee: FeeRate,
}

impl TryFrom<RawPoolConfig> for PoolConfig {
    type Error = PoolError;

    fn try_from(raw: RawPoolConfig) -> Result<Self, Self::Error> {
        Self::new(raw.pool_account, raw.fee)
    }
}

impl PoolConfig {
    /// Creates a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidConfiguration`] if the pool account is
    /// the zero account.
    pub fn new(pool_account: AccountId, fee: FeeRate) -> Result<Self, PoolError> {
        let config = Self { pool_account, fee };
        config.validate()?;
        Ok(config)
    }

    /// Creates a configuration with the default 3/1000 fee.
    ///
    /// # Errors
    ///
    /// Same as [`PoolConfig::new`].
    pub fn with_default_fee(pool_account: AccountId) -> Result<Self, PoolError> {
        Self::new(pool_account, FeeRate::DEFAULT)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidConfiguration`] on the first violation.
    pub fn validate(&self) -> Result<(), PoolError> {
        if self.pool_account.is_zero() {
            return Err(PoolError::InvalidConfiguration(
                "pool account must not be the zero account",
            ));
        }
        FeeRate::new(self.fee.numerator(), self.fee.denominator())?;
        Ok(())
    }

    /// Returns the pool's ledger account.
    #[must_use]
    pub const fn pool_account(&self) -> AccountId {
        self.pool_account
    }

    /// Returns the swap fee.
    #[must_use]
    pub const fn fee(&self) -> FeeRate {
        self.fee
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn pool_account() -> AccountId {
        AccountId::from_bytes([9u8; 32])
    }

    #[test]
    fn valid_config() {
        let Ok(cfg) = PoolConfig::with_default_fee(pool_account()) else {
            panic!("expected Ok");
        };
        assert_eq!(cfg.pool_account(), pool_account());
        assert_eq!(cfg.fee(), FeeRate::DEFAULT);
    }

    #[test]
    fn zero_account_rejected() {
        let r = PoolConfig::with_default_fee(AccountId::from_bytes([0u8; 32]));
        assert!(matches!(r, Err(PoolError::InvalidConfiguration(_))));
    }

    #[test]
    fn deserialize_defaults_fee() {
        let json = format!(r#"{{"pool_account":{:?}}}"#, [9u8; 32]);
        let Ok(cfg) = serde_json::from_str::<PoolConfig>(&json) else {
            panic!("expected Ok");
        };
        assert_eq!(cfg.fee(), FeeRate::DEFAULT);
    }

    #[test]
    fn deserialize_explicit_fee() {
        let json = format!(
            r#"{{"pool_account":{:?},"fee":{{"numerator":25,"denominator":10000}}}}"#,
            [9u8; 32]
        );
        let Ok(cfg) = serde_json::from_str::<PoolConfig>(&json) else {
            panic!("expected Ok");
        };
        assert_eq!(cfg.fee().numerator(), 25);
    }

    #[test]
    fn deserialize_rejects_zero_account() {
        let json = format!(r#"{{"pool_account":{:?}}}"#, [0u8; 32]);
        assert!(serde_json::from_str::<PoolConfig>(&json).is_err());
    }

    #[test]
    fn serialize_round_trip() {
        let Ok(cfg) = PoolConfig::with_default_fee(pool_account()) else {
            panic!("expected Ok");
        };
        let Ok(json) = serde_json::to_string(&cfg) else {
            panic!("serialize");
        };
        let Ok(back) = serde_json::from_str::<PoolConfig>(&json) else {
            panic!("deserialize");
        };
        assert_eq!(back, cfg);
    }
}
