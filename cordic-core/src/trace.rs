//! Serializable record of a run, for plotting and cross-run comparison.
//!
//! Every point carries both the real values and the raw payloads, so a
//! consumer can plot without knowing the format and a [`StepTrace::digest`]
//! can be recomputed from a deserialized trace.

use crate::{CordicConfig, CordicEngine, CordicOutput, CordicStep, Direction, RotationState};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TracePoint {
    pub x: f64,
    pub y: f64,
    pub theta: f64,
    /// Payloads of x, y, theta at the run's format
    pub raw: [i64; 3],
}

impl From<&RotationState> for TracePoint {
    fn from(state: &RotationState) -> Self {
        Self {
            x: state.x.to_f64(),
            y: state.y.to_f64(),
            theta: state.theta.to_f64(),
            raw: [state.x.raw(), state.y.raw(), state.theta.raw()],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraceStep {
    pub index: usize,
    pub direction: Direction,
    pub before: TracePoint,
    pub after: TracePoint,
}

impl From<&CordicStep> for TraceStep {
    fn from(step: &CordicStep) -> Self {
        Self {
            index: step.index,
            direction: step.direction,
            before: (&step.before).into(),
            after: (&step.after).into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepTrace {
    pub angle: f64,
    pub config: CordicConfig,
    pub scale_factor: f64,
    pub theta_max: f64,
    /// Quantized `atan(2^-i)` table
    pub angles: Vec<f64>,
    /// Where the vector should end: `(cos(angle), sin(angle), 0)`
    pub target: [f64; 3],
    pub steps: Vec<TraceStep>,
    pub result: TracePoint,
}

impl StepTrace {
    pub fn new(engine: &CordicEngine, angle: f64, output: &CordicOutput) -> Self {
        Self {
            angle,
            config: *engine.config(),
            scale_factor: engine.scale_factor(),
            theta_max: engine.theta_max().to_f64(),
            angles: engine.table().iter().map(|a| a.to_f64()).collect(),
            target: [angle.cos(), angle.sin(), 0.0],
            steps: output.steps.iter().map(TraceStep::from).collect(),
            result: (&output.state).into(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// SHA-256 over the little-endian payloads: every step's before then
    /// after point, then the result. Identical runs hash identically on any
    /// platform.
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        let points = self
            .steps
            .iter()
            .flat_map(|step| [&step.before, &step.after])
            .chain(std::iter::once(&self.result));
        for point in points {
            for raw in point.raw {
                hasher.update(raw.to_le_bytes());
            }
        }
        hex::encode(hasher.finalize())
    }
}
