use cordic_math::FixedPointError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CordicError {
    #[error("At least one iteration is required")]
    ZeroIterations,
    #[error("{iterations} iterations exceed what {frac_bits} fractional bits can resolve")]
    TooManyIterations { iterations: usize, frac_bits: u32 },
    #[error("Angle {angle} is not finite")]
    NonFiniteAngle { angle: f64 },
    #[error("Angle {angle} outside convergence domain |angle| <= {theta_max}")]
    AngleOutOfRange { angle: f64, theta_max: f64 },
    #[error("Math error: {0}")]
    MathError(#[from] FixedPointError),
}
