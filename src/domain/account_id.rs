//! Opaque ledger account identifier.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Identifies a balance holder in any ledger: a trader, a liquidity
/// provider, or the pool itself.
///
/// Wraps a fixed 32-byte value.  Every byte sequence is a valid account,
/// so construction is infallible.
///
/// # Examples
///
/// ```
/// use pair_pool::domain::AccountId;
///
/// let pool = AccountId::from_bytes([7u8; 32]);
/// assert_eq!(pool.as_bytes(), [7u8; 32]);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AccountId([u8; 32]);

impl AccountId {
    /// Creates an account from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// Returns `true` for the all-zero account.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }
}

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountId({self})")
    }
}

impl fmt::Display for AccountId {
    /// Short hex form: the first four bytes.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in self.0.iter().take(4) {
            write!(f, "{b:02x}")?;
        }
        write!(f, "…")
    }
}
