//! Which asset a swap sells and which it buys.

use core::fmt;

use serde::{Deserialize, Serialize};

/// One of the two traded assets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Asset A.
    A,
    /// Asset B.
    B,
}

impl Side {
    /// Returns the other asset.
    #[must_use]
    pub const fn other(&self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
        }
    }
}

/// Direction of a swap.
///
/// # Examples
///
/// ```
/// use pair_pool::domain::{Side, SwapDirection};
///
/// let dir = SwapDirection::AForB;
/// assert_eq!(dir.input(), Side::A);
/// assert_eq!(dir.output(), Side::B);
/// assert_eq!(dir.reverse(), SwapDirection::BForA);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SwapDirection {
    /// Sell asset A, receive asset B.
    AForB,
    /// Sell asset B, receive asset A.
    BForA,
}

impl SwapDirection {
    /// Asset the trader pays in.
    #[must_use]
    pub const fn input(&self) -> Side {
        match self {
            Self::AForB => Side::A,
            Self::BForA => Side::B,
        }
    }

    /// Asset the trader receives.
    #[must_use]
    pub const fn output(&self) -> Side {
        self.input().other()
    }

    /// The opposite trade.
    #[must_use]
    pub const fn reverse(&self) -> Self {
        match self {
            Self::AForB => Self::BForA,
            Self::BForA => Self::AForB,
        }
    }
}

impl fmt::Display for SwapDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.input(), self.output())
    }
}
