use crate::{CordicConfig, CordicError};
use cordic_math::{FixedPoint, FixedPointFormat};

/// CORDIC gain correction for `iterations` micro-rotations:
/// `K_N = prod_{i<N} 1 / sqrt(1 + 2^-2i)`.
///
/// Computed once per run in `f64`; it only seeds the initial x component.
pub fn scale_factor(iterations: usize) -> f64 {
    (0..iterations)
        .map(|i| 1.0 / (1.0 + (-2.0 * i as f64).exp2()).sqrt())
        .product()
}

/// Micro-rotation angles `atan(2^-i)` for `i < N`, quantized to the run's
/// canonical format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AngleTable {
    entries: Vec<FixedPoint>,
    theta_max: FixedPoint,
}

impl AngleTable {
    pub fn new(iterations: usize, format: FixedPointFormat) -> Result<Self, CordicError> {
        CordicConfig::new(iterations, format).validate()?;

        let entries = (0..iterations)
            .map(|i| FixedPoint::from_real((-(i as f64)).exp2().atan(), format))
            .collect::<Result<Vec<_>, _>>()?;

        // Fails when the format cannot hold the whole convergence domain
        let theta_max = entries
            .iter()
            .try_fold(FixedPoint::zero(format), |sum, angle| sum.add(angle))?;

        Ok(Self { entries, theta_max })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: a table holds at least one entry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&FixedPoint> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[FixedPoint] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &FixedPoint> {
        self.entries.iter()
    }

    /// Smallest micro-rotation, `atan(2^-(N-1))`, which bounds the final residual.
    pub fn last(&self) -> &FixedPoint {
        &self.entries[self.entries.len() - 1]
    }

    /// Sum of all entries: the largest |angle| the run can drive to zero.
    pub fn theta_max(&self) -> &FixedPoint {
        &self.theta_max
    }

    pub fn format(&self) -> FixedPointFormat {
        self.theta_max.format()
    }
}
