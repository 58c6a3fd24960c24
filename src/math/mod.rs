//! Exact integer arithmetic for pool calculations.
//!
//! - [`CheckedArithmetic`]: overflow-safe operations on domain newtypes.
//! - [`mul_div`], [`products_equal`], [`integer_sqrt`]: 256-bit
//!   intermediates for products of two 128-bit quantities.

mod checked;
mod wide;

pub use checked::CheckedArithmetic;
pub use wide::{integer_sqrt, integer_sqrt_product, mul_div, narrow, products_equal};
