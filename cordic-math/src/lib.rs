//! # cordic-math
//!
//! Deterministic fixed-point arithmetic for the CORDIC engine.
//!
//! This crate provides [`FixedPoint`]: a signed scaled integer carried together
//! with its [`FixedPointFormat`] (total word width `W`, fractional bits `F`).
//! The real value of a payload `p` is `p * 2^-F`; payloads always fit in `W`
//! signed bits.
//!
//! Unlike a saturating numeric type, every operation that could leave the
//! representable range reports a [`FixedPointError`] instead of clamping.
//! Mixing two formats in one operation is also an error.
//!
//! Rounding rules:
//! - [`FixedPoint::from_real`]: nearest, ties away from zero
//! - [`FixedPoint::shift_right`] and lossy [`FixedPoint::requantize`]: floor
//!   (toward negative infinity), the plain arithmetic shift

pub mod fixed_point;
pub mod ops;

pub use fixed_point::{FixedPoint, FixedPointError, FixedPointFormat};
pub use ops::Sign;
