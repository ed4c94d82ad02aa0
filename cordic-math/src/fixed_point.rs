use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Widest supported word: payloads live in an `i64`.
pub const MAX_WORD_BITS: u32 = 64;

/// Word width and fractional-bit count of a fixed-point value.
///
/// Displayed as `Q<integer bits>.<fractional bits>`, the sign bit excluded,
/// so `W = 32, F = 30` prints as `Q1.30`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "FormatRepr", into = "FormatRepr")]
pub struct FixedPointFormat {
    word_bits: u32,
    frac_bits: u32,
}

#[derive(Serialize, Deserialize)]
struct FormatRepr {
    word_bits: u32,
    frac_bits: u32,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FixedPointError {
    #[error("Invalid format: {word_bits} word bits, {frac_bits} fractional bits (need 2 <= W <= 64 and F < W)")]
    InvalidFormat { word_bits: u32, frac_bits: u32 },
    #[error("Value is not finite")]
    NotFinite,
    #[error("Value {value} out of range for {format}")]
    OutOfRange { value: f64, format: FixedPointFormat },
    #[error("Overflow in {operation} at {format}")]
    Overflow {
        operation: &'static str,
        format: FixedPointFormat,
    },
    #[error("Format mismatch: {0} vs {1}")]
    FormatMismatch(FixedPointFormat, FixedPointFormat),
}

impl FixedPointFormat {
    /// 32-bit word, 30 fractional bits: range [-2, 2), resolution ~9.3e-10.
    pub const Q1_30: Self = Self {
        word_bits: 32,
        frac_bits: 30,
    };

    pub fn new(word_bits: u32, frac_bits: u32) -> Result<Self, FixedPointError> {
        if !(2..=MAX_WORD_BITS).contains(&word_bits) || frac_bits >= word_bits {
            return Err(FixedPointError::InvalidFormat {
                word_bits,
                frac_bits,
            });
        }
        Ok(Self {
            word_bits,
            frac_bits,
        })
    }

    pub fn word_bits(&self) -> u32 {
        self.word_bits
    }

    pub fn frac_bits(&self) -> u32 {
        self.frac_bits
    }

    /// Smallest payload, `-2^(W-1)`
    pub fn min_raw(&self) -> i64 {
        i64::MIN >> (MAX_WORD_BITS - self.word_bits)
    }

    /// Largest payload, `2^(W-1) - 1`
    pub fn max_raw(&self) -> i64 {
        i64::MAX >> (MAX_WORD_BITS - self.word_bits)
    }

    pub fn contains_raw(&self, raw: i64) -> bool {
        (self.min_raw()..=self.max_raw()).contains(&raw)
    }

    /// `2^F`, exact in `f64` for every valid format.
    pub fn scale(&self) -> f64 {
        (1u64 << self.frac_bits) as f64
    }

    /// Value of one payload unit, `2^-F`.
    pub fn resolution(&self) -> f64 {
        1.0 / self.scale()
    }

    pub fn min_value(&self) -> f64 {
        self.min_raw() as f64 / self.scale()
    }

    pub fn max_value(&self) -> f64 {
        self.max_raw() as f64 / self.scale()
    }
}

impl Default for FixedPointFormat {
    fn default() -> Self {
        Self::Q1_30
    }
}

impl fmt::Display for FixedPointFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Q{}.{}",
            self.word_bits - self.frac_bits - 1,
            self.frac_bits
        )
    }
}

impl TryFrom<FormatRepr> for FixedPointFormat {
    type Error = FixedPointError;

    fn try_from(repr: FormatRepr) -> Result<Self, Self::Error> {
        Self::new(repr.word_bits, repr.frac_bits)
    }
}

impl From<FixedPointFormat> for FormatRepr {
    fn from(format: FixedPointFormat) -> Self {
        Self {
            word_bits: format.word_bits,
            frac_bits: format.frac_bits,
        }
    }
}

/// A real number stored as `raw * 2^-F` in a `W`-bit signed payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixedPoint {
    raw: i64,
    format: FixedPointFormat,
}

impl FixedPoint {
    pub fn zero(format: FixedPointFormat) -> Self {
        Self { raw: 0, format }
    }

    /// Caller guarantees `format.contains_raw(raw)`.
    pub(crate) fn from_raw_in_range(raw: i64, format: FixedPointFormat) -> Self {
        debug_assert!(format.contains_raw(raw));
        Self { raw, format }
    }

    /// Wrap an existing payload, rejecting payloads wider than `W` bits.
    pub fn from_raw(raw: i64, format: FixedPointFormat) -> Result<Self, FixedPointError> {
        if !format.contains_raw(raw) {
            return Err(FixedPointError::OutOfRange {
                value: raw as f64 / format.scale(),
                format,
            });
        }
        Ok(Self { raw, format })
    }

    /// Quantize a real value to the nearest payload (ties away from zero).
    ///
    /// Values outside `[-2^(W-F-1), 2^(W-F-1))` after rounding are rejected,
    /// never clamped.
    pub fn from_real(value: f64, format: FixedPointFormat) -> Result<Self, FixedPointError> {
        if !value.is_finite() {
            return Err(FixedPointError::NotFinite);
        }

        // Scaling by a power of two is exact, so the only rounding is here
        let scaled = (value * format.scale()).round();

        // 2^(W-1) is exact in f64 even for W = 64, unlike max_raw() as f64
        let limit = -(format.min_raw() as f64);
        if scaled < -limit || scaled >= limit {
            return Err(FixedPointError::OutOfRange { value, format });
        }

        Ok(Self {
            raw: scaled as i64,
            format,
        })
    }

    pub fn to_f64(&self) -> f64 {
        self.raw as f64 / self.format.scale()
    }

    pub fn raw(&self) -> i64 {
        self.raw
    }

    pub fn format(&self) -> FixedPointFormat {
        self.format
    }

    /// Re-express this value at another format.
    ///
    /// Gaining fractional bits is exact. Losing fractional bits floors, the
    /// same rule as [`FixedPoint::shift_right`]. Requantizing to the current
    /// format returns an identical payload.
    pub fn requantize(&self, target: FixedPointFormat) -> Result<Self, FixedPointError> {
        let wide = self.raw as i128;
        let wide = if target.frac_bits >= self.format.frac_bits {
            wide << (target.frac_bits - self.format.frac_bits)
        } else {
            wide >> (self.format.frac_bits - target.frac_bits)
        };

        match i64::try_from(wide) {
            Ok(raw) if target.contains_raw(raw) => Ok(Self { raw, format: target }),
            _ => Err(FixedPointError::OutOfRange {
                value: self.to_f64(),
                format: target,
            }),
        }
    }
}

impl fmt::Display for FixedPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_f64())
    }
}
