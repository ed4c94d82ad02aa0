// Floating-point CORDIC with the same table, gain and branch rule as the
// fixed-point engine. Only used as an oracle.

#![allow(dead_code)]

pub fn reference_angles(iterations: usize) -> Vec<f64> {
    (0..iterations).map(|i| (-(i as f64)).exp2().atan()).collect()
}

pub fn reference_rotate(angle: f64, iterations: usize) -> (f64, f64, f64) {
    let mut x = cordic_core::scale_factor(iterations);
    let mut y = 0.0;
    let mut theta = angle;

    for (i, gamma) in reference_angles(iterations).into_iter().enumerate() {
        let p2i = (-(i as f64)).exp2();
        (x, y, theta) = if theta >= 0.0 {
            (x - y * p2i, y + x * p2i, theta - gamma)
        } else {
            (x + y * p2i, y - x * p2i, theta + gamma)
        };
    }

    (x, y, theta)
}
