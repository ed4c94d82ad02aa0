use crate::{AngleTable, CordicError, CordicStep, Direction};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TraceError {
    #[error("Step at position {position} has index {found}")]
    IndexGap { position: usize, found: usize },
    #[error("Step {index} is beyond the {len}-entry angle table")]
    BeyondTable { index: usize, len: usize },
    #[error("Step {index} does not start where the previous step ended")]
    Discontinuity { index: usize },
    #[error("Step {index} recorded {recorded:?}, residual sign requires {expected:?}")]
    WrongDirection {
        index: usize,
        recorded: Direction,
        expected: Direction,
    },
    #[error("Step {index} does not follow from its starting state")]
    Mismatch { index: usize },
    #[error("Step {index} could not be replayed: {source}")]
    Replay { index: usize, source: CordicError },
}

/// Replay every step through the recurrence and require bit-exact agreement.
///
/// Fixed-point arithmetic is deterministic, so any difference means the
/// trace was not produced by this table (or was altered).
pub fn verify_steps(steps: &[CordicStep], table: &AngleTable) -> Result<(), TraceError> {
    for (position, step) in steps.iter().enumerate() {
        if step.index != position {
            return Err(TraceError::IndexGap {
                position,
                found: step.index,
            });
        }
        let angle = table.get(step.index).ok_or(TraceError::BeyondTable {
            index: step.index,
            len: table.len(),
        })?;

        if position > 0 && steps[position - 1].after != step.before {
            return Err(TraceError::Discontinuity { index: step.index });
        }

        let (direction, after) = step
            .before
            .advance(step.index as u32, angle)
            .map_err(|source| TraceError::Replay {
                index: step.index,
                source,
            })?;

        if direction != step.direction {
            return Err(TraceError::WrongDirection {
                index: step.index,
                recorded: step.direction,
                expected: direction,
            });
        }
        if after != step.after {
            return Err(TraceError::Mismatch { index: step.index });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CordicConfig, CordicEngine};
    use cordic_math::FixedPoint;

    fn recorded(angle: f64) -> (CordicEngine, Vec<CordicStep>) {
        let engine = CordicEngine::new(CordicConfig::default().with_steps(true)).unwrap();
        let steps = engine.rotate(angle).unwrap().steps;
        (engine, steps)
    }

    #[test]
    fn test_valid_trace() {
        let (engine, steps) = recorded(0.945);
        assert_eq!(verify_steps(&steps, engine.table()), Ok(()));
        assert_eq!(verify_steps(&[], engine.table()), Ok(()));
    }

    #[test]
    fn test_tampered_after() {
        let (engine, mut steps) = recorded(0.945);
        let y = steps[5].after.y;
        steps[5].after.y = FixedPoint::from_raw(y.raw() + 1, y.format()).unwrap();

        assert_eq!(
            verify_steps(&steps[..6], engine.table()),
            Err(TraceError::Mismatch { index: 5 })
        );
        // the next step no longer starts where this one ended
        assert_eq!(
            verify_steps(&steps, engine.table()),
            Err(TraceError::Mismatch { index: 5 })
        );
    }

    #[test]
    fn test_wrong_direction() {
        let (engine, mut steps) = recorded(0.3);
        steps[0].direction = Direction::Clockwise;
        assert!(matches!(
            verify_steps(&steps, engine.table()),
            Err(TraceError::WrongDirection { index: 0, .. })
        ));
    }

    #[test]
    fn test_gap_and_discontinuity() {
        let (engine, steps) = recorded(-0.5);

        let skipped: Vec<_> = steps.iter().copied().skip(1).collect();
        assert_eq!(
            verify_steps(&skipped, engine.table()),
            Err(TraceError::IndexGap { position: 0, found: 1 })
        );

        let mut spliced = steps.clone();
        spliced[3].before = spliced[1].before;
        assert_eq!(
            verify_steps(&spliced, engine.table()),
            Err(TraceError::Discontinuity { index: 3 })
        );
    }

    #[test]
    fn test_table_too_short() {
        let (_, steps) = recorded(0.1);
        let short = AngleTable::new(4, cordic_math::FixedPointFormat::Q1_30).unwrap();
        assert_eq!(
            verify_steps(&steps, &short),
            Err(TraceError::BeyondTable { index: 4, len: 4 })
        );
    }
}
