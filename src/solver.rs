//! Trajectory integration.
//!
//! A `TrajectorySolver` freezes the flight constants, integrates the
//! six-dimensional state (velocity, position) over a fixed observation
//! window and returns the dense sample series. The window is caller-tunable
//! and must comfortably exceed the actual flight time — the ball keeps
//! falling below `z = 0` until the horizon ends, and landing detection is
//! deferred to the analysis pass.

use nalgebra::Vector3;

use crate::error::FlightError;
use crate::forces::FlightConstants;
use crate::tables::{launch_velocity, ClubTable, DragCurve};
use crate::EnvironmentConditions;

/// Initial-condition source: a club preset or fully custom launch numbers.
///
/// Exactly one source is active per flight; the other's fields do not exist.
#[derive(Debug, Clone)]
pub enum InitialCondition {
    /// Launch speed, angle and spin from the club table
    Preset { club: String },
    /// User-supplied launch values
    Custom {
        /// Ball speed at launch (m/s)
        speed: f64,
        /// Launch angle above the horizon (degrees)
        launch_angle_deg: f64,
        /// Spin vector (rad/s); negative y-spin is backspin
        spin: Vector3<f64>,
    },
}

/// Immutable parameter set for one simulation run
#[derive(Debug, Clone)]
pub struct FlightParameters {
    /// Ball mass (kg)
    pub ball_mass: f64,
    /// Ball diameter (m)
    pub ball_diameter: f64,
    /// Ball brand selecting the drag curve
    pub ball_type: String,
    /// Launch source
    pub initial: InitialCondition,
    /// Ambient conditions
    pub environment: EnvironmentConditions,
    /// Magnus calibration constant `k` (dimensionless)
    pub magnus_calibration: f64,
}

impl Default for FlightParameters {
    fn default() -> Self {
        Self {
            ball_mass: crate::constants::GOLF_BALL_MASS_KG,
            ball_diameter: crate::constants::GOLF_BALL_DIAMETER_M,
            ball_type: "generic".to_string(),
            initial: InitialCondition::Preset {
                club: "driver".to_string(),
            },
            environment: EnvironmentConditions::default(),
            magnus_calibration: 1.0,
        }
    }
}

/// One time-stamped trajectory sample
#[derive(Debug, Clone)]
pub struct TrajectoryPoint {
    /// Time since launch (s)
    pub time: f64,
    /// Velocity (m/s)
    pub velocity: Vector3<f64>,
    /// Position (m)
    pub position: Vector3<f64>,
}

impl TrajectoryPoint {
    /// The sample as a 6-vector `[v_x, v_y, v_z, x, y, z]`
    pub fn state(&self) -> [f64; 6] {
        [
            self.velocity.x,
            self.velocity.y,
            self.velocity.z,
            self.position.x,
            self.position.y,
            self.position.z,
        ]
    }
}

/// Dense trajectory over the full observation window
#[derive(Debug, Clone)]
pub struct Trajectory {
    /// Samples at strictly increasing times, `t = 0` first
    pub points: Vec<TrajectoryPoint>,
    /// Observation window length the solver ran with (s)
    pub horizon: f64,
}

impl Trajectory {
    /// Number of samples
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when the trajectory holds no samples
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Integration method for the equations of motion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegrationMethod {
    Euler,
    RungeKutta4,
}

/// Trajectory solver for a single flight
pub struct TrajectorySolver {
    params: FlightParameters,
    club_table: Option<ClubTable>,
    drag_curve: Option<DragCurve>,
    horizon: f64,
    resolution: u32,
    method: IntegrationMethod,
}

impl TrajectorySolver {
    /// Create a solver with the default 15 s window at 50 samples/s,
    /// built-in tables and RK4 integration.
    pub fn new(params: FlightParameters) -> Self {
        Self {
            params,
            club_table: None,
            drag_curve: None,
            horizon: 15.0,
            resolution: 50,
            method: IntegrationMethod::RungeKutta4,
        }
    }

    /// Set the observation window (s). It must comfortably exceed the
    /// expected flight time or the landing search in the analysis pass
    /// will fail.
    pub fn set_horizon(&mut self, horizon: f64) {
        self.horizon = horizon;
    }

    /// Set the sample resolution in samples per second
    pub fn set_resolution(&mut self, resolution: u32) {
        self.resolution = resolution;
    }

    /// Select the integration method
    pub fn set_method(&mut self, method: IntegrationMethod) {
        self.method = method;
    }

    /// Use a club table other than the built-in presets
    pub fn set_club_table(&mut self, table: ClubTable) {
        self.club_table = Some(table);
    }

    /// Use a drag curve other than the built-in one for the ball type
    pub fn set_drag_curve(&mut self, curve: DragCurve) {
        self.drag_curve = Some(curve);
    }

    /// Resolve the launch velocity and spin from the configured source
    fn resolve_launch(&self) -> Result<(Vector3<f64>, Vector3<f64>), FlightError> {
        match &self.params.initial {
            InitialCondition::Preset { club } => {
                let table = self.club_table.as_ref().unwrap_or_else(|| ClubTable::builtin());
                let preset = table.preset(club)?;
                Ok((
                    launch_velocity(preset.speed, preset.launch_angle_deg),
                    preset.spin,
                ))
            }
            InitialCondition::Custom {
                speed,
                launch_angle_deg,
                spin,
            } => Ok((launch_velocity(*speed, *launch_angle_deg), *spin)),
        }
    }

    /// Run the simulation: freeze the flight constants, integrate the ODE
    /// over `[0, horizon]` and return the dense trajectory.
    ///
    /// The trajectory is not truncated at ground contact; whatever the
    /// integrator produces is returned as-is, including samples below
    /// `z = 0`. A stiff or diverging system is not detected or recovered.
    pub fn solve(&self) -> Result<Trajectory, FlightError> {
        let (initial_velocity, spin) = self.resolve_launch()?;
        let drag_curve = match &self.drag_curve {
            Some(curve) => curve.clone(),
            None => DragCurve::builtin(&self.params.ball_type)?,
        };
        let constants = FlightConstants::derive(&self.params, spin, drag_curve);

        let dt = 1.0 / f64::from(self.resolution);
        let steps = (self.horizon * f64::from(self.resolution)).round() as usize;

        let mut velocity = initial_velocity;
        let mut position = Vector3::zeros();
        let mut points = Vec::with_capacity(steps + 1);

        for step in 0..=steps {
            let time = step as f64 * dt;
            points.push(TrajectoryPoint {
                time,
                velocity,
                position,
            });
            if step == steps {
                break;
            }

            match self.method {
                IntegrationMethod::Euler => {
                    let acc = constants.acceleration(&velocity);
                    velocity += acc * dt;
                    position += velocity * dt;
                }
                IntegrationMethod::RungeKutta4 => {
                    // k1
                    let acc1 = constants.acceleration(&velocity);

                    // k2
                    let vel2 = velocity + acc1 * (dt * 0.5);
                    let acc2 = constants.acceleration(&vel2);

                    // k3
                    let vel3 = velocity + acc2 * (dt * 0.5);
                    let acc3 = constants.acceleration(&vel3);

                    // k4
                    let vel4 = velocity + acc3 * dt;
                    let acc4 = constants.acceleration(&vel4);

                    position += (velocity + vel2 * 2.0 + vel3 * 2.0 + vel4) * (dt / 6.0);
                    velocity += (acc1 + acc2 * 2.0 + acc3 * 2.0 + acc4) * (dt / 6.0);
                }
            }
        }

        Ok(Trajectory {
            points,
            horizon: self.horizon,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn no_drag_params() -> FlightParameters {
        FlightParameters {
            initial: InitialCondition::Custom {
                speed: 30.0,
                launch_angle_deg: 45.0,
                spin: Vector3::zeros(),
            },
            ..FlightParameters::default()
        }
    }

    #[test]
    fn test_sample_count_and_monotonic_time() {
        let solver = TrajectorySolver::new(FlightParameters::default());
        let trajectory = solver.solve().unwrap();
        assert_eq!(trajectory.len(), 15 * 50 + 1);
        for pair in trajectory.points.windows(2) {
            assert!(pair[1].time > pair[0].time);
        }
        assert_relative_eq!(trajectory.points.last().unwrap().time, 15.0, epsilon = 1e-9);
    }

    #[test]
    fn test_initial_state_is_launch_vector_at_origin() {
        let solver = TrajectorySolver::new(FlightParameters::default());
        let trajectory = solver.solve().unwrap();
        let first = &trajectory.points[0];
        assert_eq!(first.time, 0.0);
        assert_eq!(first.position, Vector3::zeros());
        // Driver preset: 72 m/s at 15°
        assert_relative_eq!(first.velocity.norm(), 72.0, max_relative = 1e-12);
        assert_eq!(first.velocity.y, 0.0);
    }

    #[test]
    fn test_vacuum_kinematics_with_drag_forced_to_zero() {
        // A flat zero drag curve and no spin/wind reduces the model to
        // plain projectile motion
        let params = no_drag_params();
        let mut solver = TrajectorySolver::new(params);
        solver.set_drag_curve(DragCurve::new(vec![0.0, 1e9], vec![0.0, 0.0]));
        solver.set_horizon(5.0);
        let trajectory = solver.solve().unwrap();

        let v0 = 30.0 * 45.0_f64.to_radians().cos();
        let w0 = 30.0 * 45.0_f64.to_radians().sin();
        for point in trajectory.points.iter() {
            let t = point.time;
            assert_relative_eq!(point.position.x, v0 * t, max_relative = 1e-6, epsilon = 1e-9);
            assert_relative_eq!(
                point.position.z,
                w0 * t - 0.5 * crate::constants::G_ACCEL_MPS2 * t * t,
                max_relative = 1e-6,
                epsilon = 1e-9
            );
            assert_eq!(point.position.y, 0.0);
        }
    }

    #[test]
    fn test_unknown_club_fails_lookup() {
        let params = FlightParameters {
            initial: InitialCondition::Preset {
                club: "putter".to_string(),
            },
            ..FlightParameters::default()
        };
        assert!(matches!(
            TrajectorySolver::new(params).solve(),
            Err(FlightError::DataNotFound { kind: "club", .. })
        ));
    }

    #[test]
    fn test_unknown_ball_fails_lookup() {
        let params = FlightParameters {
            ball_type: "NoSuchBall".to_string(),
            ..FlightParameters::default()
        };
        assert!(matches!(
            TrajectorySolver::new(params).solve(),
            Err(FlightError::DataNotFound { kind: "ball", .. })
        ));
    }

    #[test]
    fn test_euler_and_rk4_agree_roughly() {
        let mut rk4 = TrajectorySolver::new(FlightParameters::default());
        rk4.set_resolution(200);
        let mut euler = TrajectorySolver::new(FlightParameters::default());
        euler.set_resolution(200);
        euler.set_method(IntegrationMethod::Euler);

        let a = rk4.solve().unwrap();
        let b = euler.solve().unwrap();
        // Same sampling grid, slightly different numerics
        assert_eq!(a.len(), b.len());
        let idx = 300; // t = 1.5 s
        assert_relative_eq!(
            a.points[idx].position.x,
            b.points[idx].position.x,
            max_relative = 0.02
        );
    }

    #[test]
    fn test_identical_parameters_identical_trajectory() {
        let run = || {
            TrajectorySolver::new(FlightParameters::default())
                .solve()
                .unwrap()
        };
        let a = run();
        let b = run();
        for (pa, pb) in a.points.iter().zip(b.points.iter()) {
            assert_eq!(pa.position, pb.position);
            assert_eq!(pa.velocity, pb.velocity);
        }
    }
}
