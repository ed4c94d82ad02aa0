use cordic_core::{verify_steps, CordicConfig, CordicEngine, FixedPointFormat};
use proptest::prelude::*;

fn engine(iterations: usize, format: FixedPointFormat) -> CordicEngine {
    CordicEngine::new(CordicConfig::new(iterations, format).with_steps(true)).unwrap()
}

/// Any angle inside `theta_max - gamma_{N-1}`, as a fraction of that range
fn angle_in_domain(e: &CordicEngine, unit: f64) -> f64 {
    (e.theta_max().to_f64() - e.table().last().to_f64()) * unit
}

// Property 1: Convergence to (cos, sin) within gamma_{N-1} plus rounding
proptest! {
    #[test]
    fn prop_converges_q130(iterations in 8usize..=31, unit in -1.0f64..1.0f64) {
        let e = engine(iterations, FixedPointFormat::Q1_30);
        let angle = angle_in_domain(&e, unit);
        let out = e.rotate(angle).unwrap();

        let tol = e.table().last().to_f64()
            + 8.0 * iterations as f64 * FixedPointFormat::Q1_30.resolution();
        prop_assert!((out.cos() - angle.cos()).abs() <= tol,
            "N = {}, angle = {}: x = {} vs {}", iterations, angle, out.cos(), angle.cos());
        prop_assert!((out.sin() - angle.sin()).abs() <= tol,
            "N = {}, angle = {}: y = {} vs {}", iterations, angle, out.sin(), angle.sin());
    }
}

// Property 2: Same in a narrower word
proptest! {
    #[test]
    fn prop_converges_q3_20(iterations in 8usize..=21, unit in -1.0f64..1.0f64) {
        let format = FixedPointFormat::new(24, 20).unwrap();
        let e = engine(iterations, format);
        let angle = angle_in_domain(&e, unit);
        let out = e.rotate(angle).unwrap();

        let tol = e.table().last().to_f64() + 8.0 * iterations as f64 * format.resolution();
        prop_assert!((out.cos() - angle.cos()).abs() <= tol);
        prop_assert!((out.sin() - angle.sin()).abs() <= tol);
    }
}

// Property 3: Final residual never exceeds the last micro-rotation
proptest! {
    #[test]
    fn prop_residual_bound(iterations in 1usize..=31, unit in -1.0f64..=1.0f64) {
        let e = engine(iterations, FixedPointFormat::Q1_30);
        let angle = e.theta_max().to_f64() * unit;
        let out = e.rotate(angle).unwrap();
        prop_assert!(out.state.theta.raw().abs() <= e.table().last().raw());
    }
}

// Property 4: Every recorded step replays bit-exactly
proptest! {
    #[test]
    fn prop_trace_consistency(iterations in 1usize..=31, unit in -1.0f64..=1.0f64) {
        let e = engine(iterations, FixedPointFormat::Q1_30);
        let angle = e.theta_max().to_f64() * unit;
        let out = e.rotate(angle).unwrap();

        prop_assert_eq!(out.steps.len(), iterations);
        prop_assert_eq!(verify_steps(&out.steps, e.table()), Ok(()));
        prop_assert_eq!(out.steps[iterations - 1].after, out.state);
    }
}

// Property 5: Recording steps does not change the result
proptest! {
    #[test]
    fn prop_recording_is_transparent(unit in -1.0f64..1.0f64) {
        let recording = engine(24, FixedPointFormat::Q1_30);
        let plain = CordicEngine::new(CordicConfig::default()).unwrap();
        let angle = angle_in_domain(&plain, unit);

        let a = recording.rotate(angle).unwrap();
        let b = plain.rotate(angle).unwrap();
        prop_assert_eq!(a.state, b.state);
        prop_assert!(b.steps.is_empty());
    }
}
