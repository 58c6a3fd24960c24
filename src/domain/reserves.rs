//! Snapshot of both pool reserves.

use core::fmt;

use ethnum::U256;
use serde::{Deserialize, Serialize};

use super::{Amount, Side, SwapDirection};

/// The pool's holdings of asset A and asset B at one instant.
///
/// # Examples
///
/// ```
/// use pair_pool::domain::{Amount, Reserves, SwapDirection};
///
/// let r = Reserves::new(Amount::new(100), Amount::new(400));
/// assert_eq!(r.oriented(SwapDirection::BForA), (Amount::new(400), Amount::new(100)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Reserves {
    /// Reserve of asset A.
    pub a: Amount,
    /// Reserve of asset B.
    pub b: Amount,
}

impl Reserves {
    /// Empty reserves.
    pub const ZERO: Self = Self {
        a: Amount::ZERO,
        b: Amount::ZERO,
    };

    /// Creates a reserve snapshot.
    pub const fn new(a: Amount, b: Amount) -> Self {
        Self { a, b }
    }

    /// Returns the reserve of one side.
    pub const fn get(&self, side: Side) -> Amount {
        match side {
            Side::A => self.a,
            Side::B => self.b,
        }
    }

    /// Returns `(reserve_in, reserve_out)` for a swap direction.
    #[must_use]
    pub const fn oriented(&self, direction: SwapDirection) -> (Amount, Amount) {
        (self.get(direction.input()), self.get(direction.output()))
    }

    /// Returns `true` if either side is empty.
    #[must_use]
    pub const fn has_empty_side(&self) -> bool {
        self.a.is_zero() || self.b.is_zero()
    }

    /// The constant product `a × b`, exact in 256 bits.
    #[must_use]
    pub fn product(&self) -> U256 {
        U256::new(self.a.get()) * U256::new(self.b.get())
    }

    /// Returns the pair as a tuple `(a, b)`.
    #[must_use]
    pub const fn as_tuple(&self) -> (Amount, Amount) {
        (self.a, self.b)
    }
}

impl fmt::Display for Reserves {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.a, self.b)
    }
}
