//! Post-flight trajectory analysis.
//!
//! Builds interpolable coordinate functions over the sampled trajectory,
//! finds the ground-contact time by root finding and reduces the flight to
//! its summary metrics. Everything here is a read-only view over the
//! trajectory; the samples themselves are never modified.

use serde::Serialize;

use crate::constants::{
    MIN_DIVISION_THRESHOLD, ROOT_FINDING_DERIVATIVE_STEP, ROOT_FINDING_MAX_ITER,
    ROOT_FINDING_TOLERANCE,
};
use crate::error::FlightError;
use crate::solver::Trajectory;

/// Derived flight metrics, computed once per trajectory
#[derive(Debug, Clone, Serialize)]
pub struct FlightSummary {
    /// Downrange distance at the moment the ball returns to ground level (m)
    pub carry_distance: f64,
    /// Lateral offset at landing (m)
    pub lateral_deviation: f64,
    /// Maximum height over all samples (m)
    pub apex: f64,
    /// Distance traveled along the curved flight path (m)
    pub arc_length: f64,
    /// Time of flight, the root of `z(t) = 0` (s)
    pub flight_time: f64,
    /// Index of the sample closest to the landing point
    pub landing_index: usize,
}

/// Linearly interpolated time series over one trajectory axis
struct AxisSeries<'a> {
    times: &'a [f64],
    values: Vec<f64>,
}

impl<'a> AxisSeries<'a> {
    fn new(times: &'a [f64], values: Vec<f64>) -> Self {
        Self { times, values }
    }

    /// Evaluate at `t`; `None` outside the sampled range
    fn eval(&self, t: f64) -> Option<f64> {
        let n = self.times.len();
        if n == 0 || t < self.times[0] || t > self.times[n - 1] {
            return None;
        }
        let upper = self.times.partition_point(|&x| x < t).min(n - 1);
        if upper == 0 {
            return Some(self.values[0]);
        }
        let (t0, t1) = (self.times[upper - 1], self.times[upper]);
        let (y0, y1) = (self.values[upper - 1], self.values[upper]);
        if (t1 - t0).abs() < MIN_DIVISION_THRESHOLD {
            return Some(y0);
        }
        Some(y0 + (t - t0) / (t1 - t0) * (y1 - y0))
    }
}

/// Analyze a sampled trajectory into its flight summary.
///
/// The landing time is found with Newton iteration on `z(t) = 0`, seeded
/// one second before the end of the observation window. The search has no
/// bracketing fallback: a horizon that ends before the ball comes down, or
/// a seed too far from the root, surfaces as `FlightError::RootFinding`.
pub fn analyze_flight(trajectory: &Trajectory) -> Result<FlightSummary, FlightError> {
    if trajectory.len() < 2 {
        return Err(FlightError::RootFinding(
            "trajectory holds fewer than two samples".to_string(),
        ));
    }

    let times: Vec<f64> = trajectory.points.iter().map(|p| p.time).collect();
    let axis = |f: fn(&crate::solver::TrajectoryPoint) -> f64| -> Vec<f64> {
        trajectory.points.iter().map(f).collect()
    };

    let x = AxisSeries::new(&times, axis(|p| p.position.x));
    let y = AxisSeries::new(&times, axis(|p| p.position.y));
    let z = AxisSeries::new(&times, axis(|p| p.position.z));

    let seed = trajectory.horizon - 1.0;
    let flight_time = newton_root(&z, seed)?;

    // The interpolants cover [0, horizon], so these cannot miss
    let carry_distance = x.eval(flight_time).unwrap_or(0.0);
    let lateral_deviation = y.eval(flight_time).unwrap_or(0.0);

    // Discrete maximum over the samples, so resolution-dependent
    let apex = z
        .values
        .iter()
        .fold(f64::NEG_INFINITY, |acc, &v| acc.max(v));

    let vx = AxisSeries::new(&times, axis(|p| p.velocity.x));
    let vy = AxisSeries::new(&times, axis(|p| p.velocity.y));
    let vz = AxisSeries::new(&times, axis(|p| p.velocity.z));
    let arc_length = path_length(&vx, &vy, &vz, flight_time, trajectory.len());

    // Sample nearest to the landing point
    let landing_index = x
        .values
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| {
            (**a - carry_distance)
                .abs()
                .total_cmp(&(**b - carry_distance).abs())
        })
        .map(|(i, _)| i)
        .unwrap_or(0);

    Ok(FlightSummary {
        carry_distance,
        lateral_deviation,
        apex,
        arc_length,
        flight_time,
        landing_index,
    })
}

/// Newton iteration on `f(t) = 0` with a numerical derivative.
///
/// Iterates that leave the sampled range are treated as failure rather than
/// clamped; the advisory in the message mirrors the most common cause.
fn newton_root(f: &AxisSeries, seed: f64) -> Result<f64, FlightError> {
    let out_of_range = || {
        FlightError::RootFinding(
            "check the observation horizon, does the ball reach the ground?".to_string(),
        )
    };

    let mut t = seed;
    for _ in 0..ROOT_FINDING_MAX_ITER {
        let fx = f.eval(t).ok_or_else(out_of_range)?;
        if fx.abs() < ROOT_FINDING_TOLERANCE {
            return Ok(t);
        }

        let h = ROOT_FINDING_DERIVATIVE_STEP;
        let f_plus = f.eval(t + h).ok_or_else(out_of_range)?;
        let f_minus = f.eval(t - h).ok_or_else(out_of_range)?;
        let derivative = (f_plus - f_minus) / (2.0 * h);
        if derivative.abs() < MIN_DIVISION_THRESHOLD {
            return Err(FlightError::RootFinding(
                "derivative vanished during landing-time search".to_string(),
            ));
        }

        let next = t - fx / derivative;
        if !next.is_finite() {
            return Err(out_of_range());
        }
        t = next;
    }

    Err(FlightError::RootFinding(format!(
        "no convergence after {} iterations",
        ROOT_FINDING_MAX_ITER
    )))
}

/// Arc length of the flight path over `[0, flight_time]`.
///
/// Integrates the instantaneous speed with composite Simpson quadrature at
/// the trajectory's own sample count.
fn path_length(
    vx: &AxisSeries,
    vy: &AxisSeries,
    vz: &AxisSeries,
    flight_time: f64,
    samples: usize,
) -> f64 {
    if samples < 2 || flight_time <= 0.0 {
        return 0.0;
    }
    let dt = flight_time / (samples - 1) as f64;
    let speeds: Vec<f64> = (0..samples)
        .map(|i| {
            let t = (i as f64 * dt).min(flight_time);
            let sx = vx.eval(t).unwrap_or(0.0);
            let sy = vy.eval(t).unwrap_or(0.0);
            let sz = vz.eval(t).unwrap_or(0.0);
            (sx * sx + sy * sy + sz * sz).sqrt()
        })
        .collect();
    simpson(&speeds, dt)
}

/// Composite Simpson integration over equally spaced samples.
///
/// An even sample count leaves an odd number of intervals; the result is
/// then the average of applying Simpson to each end with a trapezoid on the
/// leftover interval, matching the common "avg" convention.
fn simpson(values: &[f64], dx: f64) -> f64 {
    let n = values.len();
    match n {
        0 | 1 => 0.0,
        2 => 0.5 * dx * (values[0] + values[1]),
        _ if n % 2 == 1 => simpson_odd(values, dx),
        _ => {
            let head = simpson_odd(&values[..n - 1], dx)
                + 0.5 * dx * (values[n - 2] + values[n - 1]);
            let tail = 0.5 * dx * (values[0] + values[1]) + simpson_odd(&values[1..], dx);
            0.5 * (head + tail)
        }
    }
}

/// Simpson's rule over an odd number of equally spaced samples
fn simpson_odd(values: &[f64], dx: f64) -> f64 {
    let n = values.len();
    let mut sum = values[0] + values[n - 1];
    for (i, &v) in values.iter().enumerate().take(n - 1).skip(1) {
        sum += if i % 2 == 1 { 4.0 * v } else { 2.0 * v };
    }
    sum * dx / 3.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::{FlightParameters, InitialCondition, TrajectorySolver};
    use crate::tables::DragCurve;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    fn drag_free_trajectory(horizon: f64) -> Trajectory {
        let params = FlightParameters {
            initial: InitialCondition::Custom {
                speed: 30.0,
                launch_angle_deg: 45.0,
                spin: Vector3::zeros(),
            },
            ..FlightParameters::default()
        };
        let mut solver = TrajectorySolver::new(params);
        solver.set_drag_curve(DragCurve::new(vec![0.0, 1e9], vec![0.0, 0.0]));
        solver.set_horizon(horizon);
        solver.solve().unwrap()
    }

    #[test]
    fn test_simpson_matches_polynomial_integral() {
        // ∫₀¹ t² dt = 1/3, exact for Simpson
        let n = 101;
        let dx = 1.0 / (n - 1) as f64;
        let values: Vec<f64> = (0..n).map(|i| (i as f64 * dx).powi(2)).collect();
        assert_relative_eq!(simpson(&values, dx), 1.0 / 3.0, max_relative = 1e-12);
    }

    #[test]
    fn test_simpson_even_sample_count() {
        let n = 100;
        let dx = 1.0 / (n - 1) as f64;
        let values: Vec<f64> = (0..n).map(|i| (i as f64 * dx).powi(2)).collect();
        assert_relative_eq!(simpson(&values, dx), 1.0 / 3.0, max_relative = 1e-6);
    }

    #[test]
    fn test_drag_free_flight_matches_closed_form() {
        let trajectory = drag_free_trajectory(8.0);
        let summary = analyze_flight(&trajectory).unwrap();

        let v0 = 30.0 * 45.0_f64.to_radians().cos();
        let w0 = 30.0 * 45.0_f64.to_radians().sin();
        let g = crate::constants::G_ACCEL_MPS2;
        let expected_time = 2.0 * w0 / g;

        assert_relative_eq!(summary.flight_time, expected_time, max_relative = 1e-4);
        assert_relative_eq!(summary.carry_distance, v0 * expected_time, max_relative = 1e-3);
        assert_relative_eq!(summary.apex, w0 * w0 / (2.0 * g), max_relative = 1e-2);
        assert_eq!(summary.lateral_deviation, 0.0);
    }

    #[test]
    fn test_arc_length_bounds() {
        let trajectory = drag_free_trajectory(8.0);
        let summary = analyze_flight(&trajectory).unwrap();
        // Longer than the straight carry, shorter than up-over-and-down
        assert!(summary.arc_length > summary.carry_distance);
        assert!(summary.arc_length < summary.carry_distance + 4.0 * summary.apex);
    }

    #[test]
    fn test_landing_index_points_at_landing() {
        let trajectory = drag_free_trajectory(8.0);
        let summary = analyze_flight(&trajectory).unwrap();
        let landing = &trajectory.points[summary.landing_index];
        assert!((landing.position.x - summary.carry_distance).abs() < 1.0);
    }

    #[test]
    fn test_short_horizon_fails_root_finding() {
        // Flight time is ≈ 4.3 s; a 3 s window never sees the landing
        let trajectory = drag_free_trajectory(3.0);
        match analyze_flight(&trajectory) {
            Err(FlightError::RootFinding(msg)) => {
                assert!(msg.contains("ground") || msg.contains("convergence"))
            }
            other => panic!("expected RootFinding error, got {:?}", other),
        }
    }

    #[test]
    fn test_apex_at_vertical_velocity_sign_change() {
        let trajectory = drag_free_trajectory(8.0);
        let summary = analyze_flight(&trajectory).unwrap();

        // Exactly one positive-to-negative v_z sign change, at the apex sample
        let mut changes = Vec::new();
        for (i, pair) in trajectory.points.windows(2).enumerate() {
            if pair[0].velocity.z > 0.0 && pair[1].velocity.z <= 0.0 {
                changes.push(i + 1);
            }
        }
        assert_eq!(changes.len(), 1);
        // The sign-change sample and the max sample may sit one step apart
        let apex_sample = trajectory.points[changes[0]].position.z;
        assert!((apex_sample - summary.apex).abs() < 0.01);
    }
}
