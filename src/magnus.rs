//! Magnus (spin-induced) force evaluation.
//!
//! The lateral force on a spinning ball is modeled as
//!
//! ```text
//! F = k · ρ · r₁² · r · π · (w × v)
//! ```
//!
//! where `r₁` is the radius of the inner disk whose area equals the
//! remaining annulus of the ball's cross section (`π r₁² = π r² − π r₁²`,
//! hence `r₁ = r/√2`), `w` the spin vector and `k` a calibration constant.
//! Spin, air density and radius are fixed for a given flight, so the scalar
//! prefactor is computed once when the evaluator is built; each integration
//! step then costs a single numeric cross product.

use nalgebra::Vector3;
use std::f64::consts::PI;

/// Frozen Magnus force evaluator for one flight
#[derive(Debug, Clone)]
pub struct MagnusForce {
    spin: Vector3<f64>,
    prefactor: f64,
}

impl MagnusForce {
    /// Freeze the Magnus law for a flight.
    ///
    /// # Arguments
    /// * `spin` - Spin vector in rad/s
    /// * `air_density` - Air density in kg/m³
    /// * `ball_radius` - Ball radius in meters
    /// * `calibration` - Dimensionless calibration constant `k`
    pub fn new(spin: Vector3<f64>, air_density: f64, ball_radius: f64, calibration: f64) -> Self {
        // r₁ = r/√2 from the equal-area identity, so r₁² = r²/2
        let inner_radius_sq = ball_radius * ball_radius / 2.0;
        let prefactor = calibration * air_density * inner_radius_sq * ball_radius * PI;
        Self { spin, prefactor }
    }

    /// Magnus force at the given velocity (N)
    pub fn evaluate(&self, velocity: &Vector3<f64>) -> Vector3<f64> {
        self.spin.cross(velocity) * self.prefactor
    }

    /// The spin vector this evaluator was frozen with
    pub fn spin(&self) -> &Vector3<f64> {
        &self.spin
    }
}
