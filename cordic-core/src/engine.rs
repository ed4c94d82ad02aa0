use crate::{
    scale_factor, verify_steps, AngleTable, CordicConfig, CordicError, CordicStep,
    RotationState, TraceError,
};
use cordic_math::{FixedPoint, FixedPointError};
use log::{debug, trace};
use std::iter::FusedIterator;

/// Precomputed constants for one [`CordicConfig`].
///
/// Immutable after construction, so one engine can serve any number of
/// rotations, from any number of threads.
#[derive(Debug, Clone)]
pub struct CordicEngine {
    config: CordicConfig,
    table: AngleTable,
    scale: f64,
    x0: FixedPoint,
}

/// Final state of a run plus the recorded steps (empty unless requested).
#[derive(Debug, Clone, PartialEq)]
pub struct CordicOutput {
    pub state: RotationState,
    pub steps: Vec<CordicStep>,
}

impl CordicOutput {
    pub fn cos(&self) -> f64 {
        self.state.x.to_f64()
    }

    pub fn sin(&self) -> f64 {
        self.state.y.to_f64()
    }

    pub fn residual(&self) -> f64 {
        self.state.theta.to_f64()
    }
}

impl CordicEngine {
    pub fn new(config: CordicConfig) -> Result<Self, CordicError> {
        config.validate()?;

        let table = AngleTable::new(config.iterations, config.format)?;
        let scale = scale_factor(config.iterations);
        let x0 = FixedPoint::from_real(scale, config.format)?;

        debug!(
            "CORDIC engine: {}, K_N = {:.12}, theta_max = {}",
            config.description(),
            scale,
            table.theta_max()
        );

        Ok(Self {
            config,
            table,
            scale,
            x0,
        })
    }

    pub fn config(&self) -> &CordicConfig {
        &self.config
    }

    pub fn table(&self) -> &AngleTable {
        &self.table
    }

    /// `K_N` before quantization.
    pub fn scale_factor(&self) -> f64 {
        self.scale
    }

    pub fn theta_max(&self) -> &FixedPoint {
        self.table.theta_max()
    }

    /// Quantize `angle` and check it against the convergence domain
    /// `|angle| <= theta_max(N)`.
    pub fn initial_state(&self, angle: f64) -> Result<RotationState, CordicError> {
        if !angle.is_finite() {
            return Err(CordicError::NonFiniteAngle { angle });
        }

        let out_of_range = || CordicError::AngleOutOfRange {
            angle,
            theta_max: self.theta_max().to_f64(),
        };

        let theta = match FixedPoint::from_real(angle, self.config.format) {
            Ok(theta) => theta,
            Err(FixedPointError::OutOfRange { .. }) => return Err(out_of_range()),
            Err(e) => return Err(e.into()),
        };
        // -theta_max is always representable, so compare on that side
        let lower = self.theta_max().neg()?;
        if theta > *self.theta_max() || theta < lower {
            return Err(out_of_range());
        }

        RotationState::initial(&self.x0, &theta)
    }

    /// Lazy form of [`CordicEngine::rotate`]: yields one [`CordicStep`] per
    /// iteration and cannot be restarted.
    pub fn rotation(&self, angle: f64) -> Result<Rotation<'_>, CordicError> {
        let state = self.initial_state(angle)?;
        Ok(Rotation {
            table: &self.table,
            state,
            index: 0,
            failed: false,
        })
    }

    /// Run exactly N iterations from `(K_N, 0, angle)`.
    ///
    /// Steps are only kept when the config asks for them.
    pub fn rotate(&self, angle: f64) -> Result<CordicOutput, CordicError> {
        let mut rotation = self.rotation(angle)?;

        let mut steps = if self.config.record_steps {
            Vec::with_capacity(self.config.iterations)
        } else {
            Vec::new()
        };
        for step in rotation.by_ref() {
            let step = step?;
            if self.config.record_steps {
                steps.push(step);
            }
        }

        let state = *rotation.state();
        debug!(
            "rotate({}) -> x = {}, y = {}, theta = {}",
            angle, state.x, state.y, state.theta
        );

        Ok(CordicOutput { state, steps })
    }

    /// Replay recorded steps against this engine's angle table.
    pub fn verify(&self, steps: &[CordicStep]) -> Result<(), TraceError> {
        verify_steps(steps, &self.table)
    }
}

/// One-shot [`CordicEngine::rotate`] for callers that do not reuse the table.
pub fn rotate(angle: f64, config: &CordicConfig) -> Result<CordicOutput, CordicError> {
    CordicEngine::new(*config)?.rotate(angle)
}

/// In-progress rotation. Each `next()` applies one micro-rotation; after N
/// items (or the first error) it is exhausted.
#[derive(Debug)]
pub struct Rotation<'a> {
    table: &'a AngleTable,
    state: RotationState,
    index: usize,
    failed: bool,
}

impl Rotation<'_> {
    /// Current state: the initial state before the first step, the result
    /// once exhausted.
    pub fn state(&self) -> &RotationState {
        &self.state
    }

    pub fn is_finished(&self) -> bool {
        self.failed || self.index >= self.table.len()
    }

    /// Drive the remaining iterations and return the final state.
    pub fn finish(mut self) -> Result<RotationState, CordicError> {
        for step in self.by_ref() {
            step?;
        }
        Ok(self.state)
    }
}

impl Iterator for Rotation<'_> {
    type Item = Result<CordicStep, CordicError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.is_finished() {
            return None;
        }

        let index = self.index;
        let angle = &self.table.entries()[index];
        // index < N <= F + 1 <= 64
        let before = self.state;
        match before.advance(index as u32, angle) {
            Ok((direction, after)) => {
                trace!(
                    "step {}: {:?}, theta {} -> {}",
                    index,
                    direction,
                    before.theta,
                    after.theta
                );
                self.state = after;
                self.index += 1;
                Some(Ok(CordicStep {
                    index,
                    direction,
                    before,
                    after,
                }))
            }
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.failed {
            return (0, Some(0));
        }
        let remaining = self.table.len() - self.index;
        (0, Some(remaining))
    }
}

impl FusedIterator for Rotation<'_> {}
