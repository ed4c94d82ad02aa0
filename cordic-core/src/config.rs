use crate::CordicError;
use cordic_math::FixedPointFormat;
use serde::{Deserialize, Serialize};

/// Parameters of one CORDIC run.
///
/// Defaults match the reference setup: 24 iterations in a 32-bit word with
/// 30 fractional bits, no step recording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CordicConfig {
    /// Number of micro-rotations N
    pub iterations: usize,
    /// Canonical precision shared by every value of the run
    pub format: FixedPointFormat,
    /// Keep a [`crate::CordicStep`] per iteration in the output
    #[serde(default)]
    pub record_steps: bool,
}

impl Default for CordicConfig {
    fn default() -> Self {
        Self {
            iterations: 24,
            format: FixedPointFormat::Q1_30,
            record_steps: false,
        }
    }
}

impl CordicConfig {
    pub fn new(iterations: usize, format: FixedPointFormat) -> Self {
        Self {
            iterations,
            format,
            record_steps: false,
        }
    }

    pub fn with_steps(mut self, record_steps: bool) -> Self {
        self.record_steps = record_steps;
        self
    }

    /// Past index `F` the table entries `atan(2^-i)` round to zero ulps, so
    /// the iteration count is capped at `F + 1`.
    pub fn validate(&self) -> Result<(), CordicError> {
        if self.iterations == 0 {
            return Err(CordicError::ZeroIterations);
        }
        if self.iterations > self.format.frac_bits() as usize + 1 {
            return Err(CordicError::TooManyIterations {
                iterations: self.iterations,
                frac_bits: self.format.frac_bits(),
            });
        }
        Ok(())
    }

    pub fn description(&self) -> String {
        format!(
            "{} iterations at {} ({} word bits){}",
            self.iterations,
            self.format,
            self.format.word_bits(),
            if self.record_steps { ", recording steps" } else { "" }
        )
    }
}
