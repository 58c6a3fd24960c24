//! Explicit rounding direction for integer division.

/// Direction to round an inexact integer quotient.
///
/// Every division in the pool names its direction so that rounding always
/// favours the pool: outputs paid to callers round [`Down`](Self::Down),
/// inputs demanded from callers round [`Up`](Self::Up).
///
/// # Examples
///
/// ```
/// use pair_pool::domain::Rounding;
///
/// assert!(Rounding::Down.is_down());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rounding {
    /// Round towards positive infinity (ceiling).
    Up,
    /// Round towards zero (floor).
    Down,
}

impl Rounding {
    /// Returns `true` if this is [`Rounding::Up`].
    #[must_use]
    pub const fn is_up(&self) -> bool {
        matches!(self, Self::Up)
    }

    /// Returns `true` if this is [`Rounding::Down`].
    #[must_use]
    pub const fn is_down(&self) -> bool {
        matches!(self, Self::Down)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predicates() {
        assert!(Rounding::Up.is_up());
        assert!(!Rounding::Up.is_down());
        assert!(Rounding::Down.is_down());
    }
}
