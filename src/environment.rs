//! Air property and wind calculations.
//!
//! Derives air density and dynamic viscosity from ambient temperature and
//! pressure, and resolves a constant surface wind into Cartesian components.
//! All functions are pure; a live weather source, when used, simply supplies
//! the raw numbers consumed here.

use nalgebra::Vector3;

use crate::constants::{BAR_TO_PA, R_AIR, REFERENCE_VISCOSITY_CP, SUTHERLAND_CONSTANT, T_REF_K};

/// Ambient conditions for a single flight
#[derive(Debug, Clone)]
pub struct EnvironmentConditions {
    /// Ambient temperature in Celsius
    pub temperature_c: f64,
    /// Ambient pressure in bar
    pub pressure_bar: f64,
    /// Wind speed in m/s
    pub wind_speed: f64,
    /// Wind direction in degrees, mathematical convention (0° = +x, CCW)
    pub wind_direction_deg: f64,
}

impl Default for EnvironmentConditions {
    fn default() -> Self {
        Self {
            temperature_c: 25.0,
            pressure_bar: 1.01,
            wind_speed: 0.0,
            wind_direction_deg: 0.0,
        }
    }
}

impl EnvironmentConditions {
    /// Air density from the ideal-gas law (kg/m³)
    pub fn air_density(&self) -> f64 {
        air_density(self.temperature_c, self.pressure_bar)
    }

    /// Dynamic viscosity of air from Sutherland's law (Pa·s)
    pub fn air_viscosity(&self) -> f64 {
        air_viscosity(self.temperature_c)
    }

    /// Wind resolved into Cartesian components (m/s)
    pub fn wind_vector(&self) -> Vector3<f64> {
        wind_vector(self.wind_speed, self.wind_direction_deg)
    }
}

/// Calculate dynamic viscosity of air using Sutherland's formula
///
/// Uses the centipoise form with reference viscosity 0.01724 cP at 273.15 K
/// and Sutherland constant 120 K, converting to Pa·s at the end. Valid in
/// the ordinary atmospheric range; inaccurate at low pressures.
///
/// # Arguments
/// * `temperature_c` - Temperature in Celsius
///
/// # Returns
/// Dynamic viscosity in Pa·s (kg/m·s)
pub fn air_viscosity(temperature_c: f64) -> f64 {
    let temp_k = temperature_c + T_REF_K;
    let viscosity_cp = REFERENCE_VISCOSITY_CP
        * (temp_k / T_REF_K).powf(1.5)
        * (0.555 * T_REF_K + SUTHERLAND_CONSTANT)
        / (0.555 * temp_k + SUTHERLAND_CONSTANT);
    // cP to Pa·s
    viscosity_cp / 1000.0
}

/// Calculate air density from the ideal-gas law
///
/// # Arguments
/// * `temperature_c` - Temperature in Celsius
/// * `pressure_bar` - Pressure in bar
///
/// # Returns
/// Air density in kg/m³
pub fn air_density(temperature_c: f64, pressure_bar: f64) -> f64 {
    let temp_k = temperature_c + T_REF_K;
    let pressure_pa = pressure_bar * BAR_TO_PA;
    pressure_pa / (R_AIR * temp_k)
}

/// Resolve a polar surface wind into Cartesian components
///
/// Direction follows the mathematical convention: 0° along +x, increasing
/// counter-clockwise. There is no vertical wind component.
pub fn wind_vector(speed: f64, direction_deg: f64) -> Vector3<f64> {
    let direction_rad = direction_deg.to_radians();
    Vector3::new(
        speed * direction_rad.cos(),
        speed * direction_rad.sin(),
        0.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_air_viscosity_at_reference() {
        // At 0°C the temperature ratio is 1, leaving just the unit conversion
        let mu = air_viscosity(0.0);
        assert_relative_eq!(mu, REFERENCE_VISCOSITY_CP / 1000.0, max_relative = 1e-12);
    }

    #[test]
    fn test_air_viscosity_increases_with_temperature() {
        assert!(air_viscosity(40.0) > air_viscosity(0.0));
    }

    #[test]
    fn test_air_density_standard_conditions() {
        // 25°C and 1.01 bar
        let rho = air_density(25.0, 1.01);
        assert_relative_eq!(rho, 1.1803, max_relative = 1e-3);
    }

    #[test]
    fn test_air_density_scales_with_pressure() {
        let rho_1 = air_density(25.0, 1.0);
        let rho_2 = air_density(25.0, 2.0);
        assert_relative_eq!(rho_2, 2.0 * rho_1, max_relative = 1e-12);
    }

    #[test]
    fn test_wind_vector_axes() {
        let east = wind_vector(5.0, 0.0);
        assert_relative_eq!(east.x, 5.0, epsilon = 1e-12);
        assert_relative_eq!(east.y, 0.0, epsilon = 1e-12);

        let north = wind_vector(5.0, 90.0);
        assert_relative_eq!(north.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(north.y, 5.0, epsilon = 1e-12);

        // Never any vertical wind
        assert_eq!(wind_vector(12.0, 37.0).z, 0.0);
    }

    #[test]
    fn test_wind_vector_magnitude() {
        let v = wind_vector(7.5, 123.0);
        assert_relative_eq!(v.norm(), 7.5, max_relative = 1e-12);
    }
}
