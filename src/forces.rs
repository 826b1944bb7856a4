//! Per-flight force model.
//!
//! `FlightConstants` captures everything the equations of motion need that
//! does not change during a flight: air properties, projected area, the
//! static wind force, the frozen Magnus evaluator and the drag curve. It is
//! derived once from the flight parameters and passed by reference into
//! every force computation, so nothing here is module-level mutable state
//! and concurrent flights cannot alias each other's constants.

use nalgebra::Vector3;
use std::f64::consts::PI;

use crate::constants::G_ACCEL_MPS2;
use crate::magnus::MagnusForce;
use crate::solver::FlightParameters;
use crate::tables::DragCurve;

/// Immutable derived constants for one flight
#[derive(Debug, Clone)]
pub struct FlightConstants {
    /// Ball mass (kg)
    pub mass: f64,
    /// Ball diameter (m)
    pub diameter: f64,
    /// Projected frontal area (m²)
    pub area: f64,
    /// Air density (kg/m³)
    pub air_density: f64,
    /// Dynamic air viscosity (Pa·s)
    pub air_viscosity: f64,
    /// Gravity vector, `[0, 0, -g]`
    pub gravity: Vector3<f64>,
    wind_force: Vector3<f64>,
    magnus: MagnusForce,
    drag_curve: DragCurve,
}

impl FlightConstants {
    /// Derive the constants for a flight from its parameters, the resolved
    /// spin vector and the selected drag curve.
    pub fn derive(params: &FlightParameters, spin: Vector3<f64>, drag_curve: DragCurve) -> Self {
        let radius = params.ball_diameter / 2.0;
        let area = radius * radius * PI;
        let air_density = params.environment.air_density();
        let air_viscosity = params.environment.air_viscosity();

        // Wind does not change during the flight, so its force is resolved
        // here once. It is computed from the wind velocity alone rather than
        // the relative velocity (ball − wind); a known simplification of the
        // model, kept as-is.
        let wind = params.environment.wind_vector();
        let mut wind_force = Vector3::zeros();
        for i in 0..3 {
            wind_force[i] = wind[i].signum() * 0.5 * air_density * wind[i] * wind[i] * area;
        }

        let magnus = MagnusForce::new(spin, air_density, radius, params.magnus_calibration);

        Self {
            mass: params.ball_mass,
            diameter: params.ball_diameter,
            area,
            air_density,
            air_viscosity,
            gravity: Vector3::new(0.0, 0.0, -G_ACCEL_MPS2),
            wind_force,
            magnus,
            drag_curve,
        }
    }

    /// Reynolds number per axis, rounded to a whole number
    pub fn reynolds(&self, velocity: &Vector3<f64>) -> Vector3<f64> {
        velocity.map(|v| (self.air_density * v.abs() * self.diameter / self.air_viscosity).round())
    }

    /// Aerodynamic drag force at the given velocity (N).
    ///
    /// The drag coefficient is looked up independently per axis from the
    /// axis Reynolds number; `signum` restores the direction lost to
    /// squaring so drag always opposes motion.
    pub fn drag_force(&self, velocity: &Vector3<f64>) -> Vector3<f64> {
        let reynolds = self.reynolds(velocity);
        let mut force = Vector3::zeros();
        for i in 0..3 {
            let v = velocity[i];
            let cd = self.drag_curve.coefficient(reynolds[i]);
            force[i] = -0.5 * cd * self.air_density * self.area * v * v * v.signum();
        }
        force
    }

    /// The static wind force resolved at flight start (N)
    pub fn wind_force(&self) -> Vector3<f64> {
        self.wind_force
    }

    /// Magnus force at the given velocity (N)
    pub fn magnus_force(&self, velocity: &Vector3<f64>) -> Vector3<f64> {
        self.magnus.evaluate(velocity)
    }

    /// Acceleration of the ball at the given velocity (m/s²):
    /// `(F_wind + F_drag + F_magnus)/m + g`
    pub fn acceleration(&self, velocity: &Vector3<f64>) -> Vector3<f64> {
        (self.wind_force + self.drag_force(velocity) + self.magnus_force(velocity)) / self.mass
            + self.gravity
    }
}
