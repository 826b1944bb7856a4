//! # Golf Flight Engine
//!
//! Trajectory engine for a struck golf ball under gravity, aerodynamic
//! drag, a spin-induced Magnus force and a constant crosswind.
//!
//! A flight runs in three stages: the flight constants are derived once
//! from the parameter set (air properties, wind force, frozen Magnus law,
//! drag curve), the six-dimensional state ODE is integrated over a fixed
//! observation window, and the sampled trajectory is reduced to its summary
//! metrics (carry, lateral deviation, apex, arc length, flight time).
//!
//! ```no_run
//! use golf_flight_engine::{analyze_flight, FlightParameters, TrajectorySolver};
//!
//! let solver = TrajectorySolver::new(FlightParameters::default());
//! let trajectory = solver.solve()?;
//! let summary = analyze_flight(&trajectory)?;
//! println!("carry: {:.1} m in {:.2} s", summary.carry_distance, summary.flight_time);
//! # Ok::<(), golf_flight_engine::FlightError>(())
//! ```

// Re-export the main types and functions
pub use analysis::{analyze_flight, FlightSummary};
pub use environment::EnvironmentConditions;
pub use error::FlightError;
pub use forces::FlightConstants;
pub use magnus::MagnusForce;
pub use solver::{
    FlightParameters, InitialCondition, IntegrationMethod, Trajectory, TrajectoryPoint,
    TrajectorySolver,
};
pub use tables::{launch_velocity, ClubPreset, ClubTable, DragCurve};

// Module declarations
pub mod analysis;
pub mod constants;
pub mod environment;
mod error;
pub mod forces;
pub mod magnus;
pub mod solver;
pub mod tables;
