use super::{FixedPoint, FixedPointError};
use std::cmp::Ordering;

/// Sign of a fixed-point value. The payload grid has an exact zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sign {
    Negative,
    Zero,
    Positive,
}

impl FixedPoint {
    fn check_format(&self, other: &Self) -> Result<(), FixedPointError> {
        if self.format() != other.format() {
            return Err(FixedPointError::FormatMismatch(self.format(), other.format()));
        }
        Ok(())
    }

    fn checked_result(
        &self,
        raw: Option<i64>,
        operation: &'static str,
    ) -> Result<Self, FixedPointError> {
        raw.and_then(|raw| Self::from_raw(raw, self.format()).ok())
            .ok_or(FixedPointError::Overflow {
                operation,
                format: self.format(),
            })
    }

    /// Exact addition. Both operands must share a format.
    pub fn add(&self, other: &Self) -> Result<Self, FixedPointError> {
        self.check_format(other)?;
        self.checked_result(self.raw().checked_add(other.raw()), "add")
    }

    /// Exact subtraction. Both operands must share a format.
    pub fn sub(&self, other: &Self) -> Result<Self, FixedPointError> {
        self.check_format(other)?;
        self.checked_result(self.raw().checked_sub(other.raw()), "sub")
    }

    pub fn neg(&self) -> Result<Self, FixedPointError> {
        self.checked_result(self.raw().checked_neg(), "neg")
    }

    /// Multiply by `2^-shift` with an arithmetic shift of the payload.
    ///
    /// Rounds toward negative infinity, so the error against the exact
    /// product lies in `(-2^-F, 0]`. Shifting past the word leaves `0` for
    /// non-negative values and `-1` ulp for negative ones.
    pub fn shift_right(&self, shift: u32) -> Self {
        let raw = self.raw() >> shift.min(i64::BITS - 1);
        // Magnitude never grows, so the payload stays inside the word
        Self::from_raw_in_range(raw, self.format())
    }

    pub fn sign(&self) -> Sign {
        match self.raw().cmp(&0) {
            Ordering::Less => Sign::Negative,
            Ordering::Equal => Sign::Zero,
            Ordering::Greater => Sign::Positive,
        }
    }

    pub fn is_negative(&self) -> bool {
        self.sign() == Sign::Negative
    }

    pub fn abs(&self) -> Result<Self, FixedPointError> {
        if self.is_negative() {
            self.neg()
        } else {
            Ok(*self)
        }
    }

    pub fn compare(&self, other: &Self) -> Result<Ordering, FixedPointError> {
        self.check_format(other)?;
        Ok(self.raw().cmp(&other.raw()))
    }
}

impl PartialOrd for FixedPoint {
    /// Values of different formats are unordered.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(other).ok()
    }
}
