use crate::CordicError;
use cordic_math::{FixedPoint, FixedPointError, FixedPointFormat};
use serde::{Deserialize, Serialize};

/// Sense of one micro-rotation, picked from the sign of the residual angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Residual >= 0: rotate by `+atan(2^-i)`
    CounterClockwise,
    /// Residual < 0: rotate by `-atan(2^-i)`
    Clockwise,
}

impl Direction {
    /// Zero counts as non-negative, so an exact zero residual keeps rotating
    /// counter-clockwise.
    pub fn for_residual(theta: &FixedPoint) -> Self {
        if theta.is_negative() {
            Direction::Clockwise
        } else {
            Direction::CounterClockwise
        }
    }
}

/// Running vector and residual angle between two iterations:
/// (scaled cosine, scaled sine, angle still to rotate).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RotationState {
    pub x: FixedPoint,
    pub y: FixedPoint,
    pub theta: FixedPoint,
}

impl RotationState {
    pub fn new(x: FixedPoint, y: FixedPoint, theta: FixedPoint) -> Result<Self, CordicError> {
        for other in [&y, &theta] {
            if other.format() != x.format() {
                return Err(FixedPointError::FormatMismatch(x.format(), other.format()).into());
            }
        }
        Ok(Self { x, y, theta })
    }

    /// `(K_N, 0, angle)`: the vector is pre-shrunk by the gain so the
    /// un-normalized micro-rotations end on the unit circle.
    pub fn initial(scale: &FixedPoint, angle: &FixedPoint) -> Result<Self, CordicError> {
        Self::new(*scale, FixedPoint::zero(scale.format()), *angle)
    }

    pub fn format(&self) -> FixedPointFormat {
        self.x.format()
    }

    /// One iteration of the recurrence with micro-rotation `angle = atan(2^-shift)`:
    ///
    /// ```text
    /// theta >= 0:  x' = x - (y >> i)   y' = y + (x >> i)   theta' = theta - angle
    /// theta <  0:  x' = x + (y >> i)   y' = y - (x >> i)   theta' = theta + angle
    /// ```
    pub fn advance(&self, shift: u32, angle: &FixedPoint) -> Result<(Direction, Self), CordicError> {
        let dx = self.y.shift_right(shift);
        let dy = self.x.shift_right(shift);

        let direction = Direction::for_residual(&self.theta);
        let next = match direction {
            Direction::CounterClockwise => Self {
                x: self.x.sub(&dx)?,
                y: self.y.add(&dy)?,
                theta: self.theta.sub(angle)?,
            },
            Direction::Clockwise => Self {
                x: self.x.add(&dx)?,
                y: self.y.sub(&dy)?,
                theta: self.theta.add(angle)?,
            },
        };

        Ok((direction, next))
    }

    pub fn to_f64(&self) -> (f64, f64, f64) {
        (self.x.to_f64(), self.y.to_f64(), self.theta.to_f64())
    }
}

/// Snapshot of one iteration: the state before and after applying
/// micro-rotation `index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CordicStep {
    pub index: usize,
    pub direction: Direction,
    pub before: RotationState,
    pub after: RotationState,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fx(value: f64) -> FixedPoint {
        FixedPoint::from_real(value, FixedPointFormat::Q1_30).unwrap()
    }

    #[test]
    fn test_new_rejects_mixed_formats() {
        let other = FixedPoint::zero(FixedPointFormat::new(16, 8).unwrap());
        assert!(RotationState::new(fx(0.5), other, fx(0.0)).is_err());
        assert!(RotationState::new(fx(0.5), fx(0.0), other).is_err());
        assert!(RotationState::new(fx(0.5), fx(0.0), fx(0.1)).is_ok());
    }

    #[test]
    fn test_direction_for_residual() {
        assert_eq!(Direction::for_residual(&fx(0.0)), Direction::CounterClockwise);
        assert_eq!(Direction::for_residual(&fx(0.3)), Direction::CounterClockwise);
        assert_eq!(Direction::for_residual(&fx(-1e-9)), Direction::Clockwise);
    }

    #[test]
    fn test_advance_counter_clockwise() {
        let state = RotationState::new(fx(1.0), fx(0.5), fx(0.25)).unwrap();
        let (direction, next) = state.advance(1, &fx(0.125)).unwrap();

        assert_eq!(direction, Direction::CounterClockwise);
        assert_eq!(next.x, fx(0.75));
        assert_eq!(next.y, fx(1.0));
        assert_eq!(next.theta, fx(0.125));
    }

    #[test]
    fn test_advance_clockwise() {
        let state = RotationState::new(fx(1.0), fx(0.5), fx(-0.25)).unwrap();
        let (direction, next) = state.advance(2, &fx(0.125)).unwrap();

        assert_eq!(direction, Direction::Clockwise);
        assert_eq!(next.x, fx(1.125));
        assert_eq!(next.y, fx(0.25));
        assert_eq!(next.theta, fx(-0.125));
    }

    #[test]
    fn test_advance_reports_overflow() {
        let state = RotationState::new(fx(1.9), fx(-1.9), fx(0.5)).unwrap();
        assert!(matches!(
            state.advance(0, &fx(0.785)),
            Err(CordicError::MathError(FixedPointError::Overflow { .. }))
        ));
    }
}
