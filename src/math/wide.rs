//! 256-bit intermediates for products of two 128-bit quantities.
//!
//! Reserve × supply and amount × reserve products routinely exceed 128
//! bits.  Every such product is formed exactly in a [`U256`] and only the
//! final quotient is narrowed back to `u128`, failing with
//! [`PoolError::Overflow`] if it does not fit.
//!
//! # Examples
//!
//! ```
//! use pair_pool::domain::Rounding;
//! use pair_pool::math::{integer_sqrt_product, mul_div};
//!
//! // 9970 * 400 / 109970, floored
//! assert_eq!(mul_div(9_970, 400, 109_970, Rounding::Down).ok(), Some(36));
//! assert_eq!(integer_sqrt_product(100, 400).ok(), Some(200));
//! ```

use ethnum::U256;

use crate::domain::Rounding;
use crate::error::PoolError;

const TWO: U256 = U256::new(2);

/// Narrows a 256-bit value to `u128`.
///
/// # Errors
///
/// Returns [`PoolError::Overflow`] with `context` if the value does not fit.
pub fn narrow(value: U256, context: &'static str) -> Result<u128, PoolError> {
    if value > U256::new(u128::MAX) {
        return Err(PoolError::Overflow(context));
    }
    Ok(value.as_u128())
}

/// Computes `a × b / d` with the product held in 256 bits.
///
/// # Errors
///
/// - [`PoolError::DivisionByZero`] if `d` is zero.
/// - [`PoolError::Overflow`] if the quotient does not fit in `u128`.
pub fn mul_div(a: u128, b: u128, d: u128, rounding: Rounding) -> Result<u128, PoolError> {
    if d == 0 {
        return Err(PoolError::DivisionByZero);
    }
    let product = U256::new(a) * U256::new(b);
    let divisor = U256::new(d);
    let mut quotient = product / divisor;
    if rounding.is_up() && product % divisor != U256::ZERO {
        quotient += U256::ONE;
    }
    narrow(quotient, "mul_div quotient exceeds 128 bits")
}

/// Returns `true` if `a × b == c × d`, compared exactly.
#[must_use]
pub fn products_equal(a: u128, b: u128, c: u128, d: u128) -> bool {
    U256::new(a) * U256::new(b) == U256::new(c) * U256::new(d)
}

/// Floor square root by the Babylonian method.
///
/// Starts from `y₀ = ⌈x / 2⌉`, iterates `yₙ₊₁ = (x / yₙ + yₙ) / 2`, and
/// stops as soon as the sequence stops decreasing, returning the last
/// `yₙ`.  No floating point is involved, so the result is deterministic.
#[must_use]
pub fn integer_sqrt(x: U256) -> U256 {
    if x == U256::ZERO {
        return U256::ZERO;
    }
    // ⌈x / 2⌉ without forming x + 1, which overflows at U256::MAX.
    let mut y = x / TWO + x % TWO;
    loop {
        let next = (x / y + y) / TWO;
        if next >= y {
            return y;
        }
        y = next;
    }
}

/// Floor square root of `a × b`.
///
/// The result always fits in `u128` since `a × b < 2²⁵⁶`.
///
/// # Errors
///
/// Returns [`PoolError::Overflow`] only if the narrowing invariant is
/// broken.
pub fn integer_sqrt_product(a: u128, b: u128) -> Result<u128, PoolError> {
    narrow(
        integer_sqrt(U256::new(a) * U256::new(b)),
        "square root exceeds 128 bits",
    )
}
