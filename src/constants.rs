/// Physical constants used in flight calculations

/// Gravitational acceleration in m/s²
pub const G_ACCEL_MPS2: f64 = 9.81;

/// Specific gas constant for dry air (J/(kg·K))
pub const R_AIR: f64 = 287.0;

/// Celsius to Kelvin offset, also the Sutherland reference temperature (K)
pub const T_REF_K: f64 = 273.15;

/// Sutherland's constant for air (K)
///
/// Used with the reference viscosity below in the centipoise form of
/// Sutherland's law. The formula is inaccurate at low pressures.
pub const SUTHERLAND_CONSTANT: f64 = 120.0;

/// Reference dynamic viscosity of air at `T_REF_K`, in centipoise
pub const REFERENCE_VISCOSITY_CP: f64 = 0.01724;

/// Conversion factor: bar to Pascal
pub const BAR_TO_PA: f64 = 1e5;

/// Mass of a regulation golf ball (kg)
pub const GOLF_BALL_MASS_KG: f64 = 0.04593;

/// Diameter of a regulation golf ball (m)
pub const GOLF_BALL_DIAMETER_M: f64 = 0.0426;

// Numerical stability constants

/// Minimum threshold for preventing division by zero in general calculations
pub const MIN_DIVISION_THRESHOLD: f64 = 1e-12;

/// Tolerance for root finding algorithms
pub const ROOT_FINDING_TOLERANCE: f64 = 1e-9;

/// Maximum iterations for the landing-time search
pub const ROOT_FINDING_MAX_ITER: usize = 50;

/// Step used for numerical differentiation in the landing-time search
pub const ROOT_FINDING_DERIVATIVE_STEP: f64 = 1e-6;
