//! # cordic-core
//!
//! Fixed-point CORDIC in circular rotation mode: sine and cosine from
//! additions, sign tests and arithmetic shifts only.
//!
//! - [`AngleTable`] / [`scale_factor`]: per-run constants (`atan(2^-i)`, `K_N`)
//! - [`CordicEngine`]: owns the constants for one [`CordicConfig`] and runs the
//!   recurrence, either to completion ([`CordicEngine::rotate`]) or lazily one
//!   [`CordicStep`] at a time ([`CordicEngine::rotation`])
//! - [`StepTrace`]: serializable trace of a run for plotting or cross-checking
//! - [`verify_steps`]: replays recorded steps through the recurrence
//!
//! ```
//! use cordic_core::{rotate, CordicConfig};
//!
//! let out = rotate(0.945, &CordicConfig::default()).unwrap();
//! assert!((out.cos() - 0.945f64.cos()).abs() < 1e-6);
//! assert!((out.sin() - 0.945f64.sin()).abs() < 1e-6);
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod state;
pub mod table;
pub mod trace;
pub mod verify;

pub use config::CordicConfig;
pub use engine::{rotate, CordicEngine, CordicOutput, Rotation};
pub use error::CordicError;
pub use state::{CordicStep, Direction, RotationState};
pub use table::{scale_factor, AngleTable};
pub use trace::{StepTrace, TracePoint, TraceStep};
pub use verify::{verify_steps, TraceError};

pub use cordic_math::{FixedPoint, FixedPointError, FixedPointFormat};
