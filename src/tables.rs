//! Club launch presets and ball drag-coefficient tables.
//!
//! Built-in tables cover the stock club and ball selections; both can be
//! overridden from CSV files using the original column scheme: club files
//! carry a `spin_<club>` / `velocity_<club>` column pair per club, drag
//! files a `Re_<ball>` / `C_d_<ball>` pair per ball brand.

use std::collections::HashMap;
use std::path::Path;

use nalgebra::Vector3;
use once_cell::sync::Lazy;

use crate::error::FlightError;

/// Launch preset for a single club: spin vector plus launch speed and angle
#[derive(Debug, Clone)]
pub struct ClubPreset {
    /// Spin imparted at impact (rad/s); negative y-spin is backspin
    pub spin: Vector3<f64>,
    /// Ball speed at launch (m/s)
    pub speed: f64,
    /// Launch angle above the horizon (degrees)
    pub launch_angle_deg: f64,
}

/// Table of club launch presets keyed by club name
#[derive(Debug, Clone, Default)]
pub struct ClubTable {
    clubs: HashMap<String, ClubPreset>,
}

/// Drag coefficient curve over Reynolds number for one ball brand
#[derive(Debug, Clone)]
pub struct DragCurve {
    reynolds: Vec<f64>,
    cd_values: Vec<f64>,
}

/// Built-in club presets.
///
/// Spin is stored in the sign convention the force law consumes directly:
/// negative y-spin produces an upward Magnus force (backspin).
static BUILTIN_CLUBS: Lazy<ClubTable> = Lazy::new(|| {
    let presets = [
        ("driver", 0.0, -280.0, 0.0, 72.0, 15.0),
        ("3_wood", 0.0, -320.0, 0.0, 68.0, 17.0),
        ("5_wood", 0.0, -350.0, 0.0, 65.0, 19.0),
        ("3_iron", 0.0, -330.0, 0.0, 60.0, 18.0),
        ("4_iron", 0.0, -350.0, 0.0, 58.0, 19.0),
        ("5_iron", 0.0, -380.0, 0.0, 56.0, 21.0),
        ("6_iron", 0.0, -420.0, 0.0, 53.0, 23.0),
        ("7_iron", 0.0, -460.0, 0.0, 50.0, 25.0),
        ("8_iron", 0.0, -500.0, 0.0, 47.0, 27.0),
        ("9_iron", 0.0, -540.0, 0.0, 44.0, 30.0),
        ("PW", 0.0, -580.0, 0.0, 40.0, 34.0),
    ];

    let mut clubs = HashMap::new();
    for (name, sx, sy, sz, speed, angle) in presets {
        clubs.insert(
            name.to_string(),
            ClubPreset {
                spin: Vector3::new(sx, sy, sz),
                speed,
                launch_angle_deg: angle,
            },
        );
    }
    ClubTable { clubs }
});

/// Built-in drag curves per ball brand, from tabulated wind-tunnel style data
static BUILTIN_DRAG_CURVES: Lazy<HashMap<&'static str, DragCurve>> = Lazy::new(|| {
    let generic = [
        (20_000.0, 0.50),
        (40_000.0, 0.48),
        (60_000.0, 0.38),
        (80_000.0, 0.29),
        (100_000.0, 0.26),
        (140_000.0, 0.25),
        (180_000.0, 0.25),
        (220_000.0, 0.26),
    ];
    let titleist = [
        (20_000.0, 0.49),
        (40_000.0, 0.46),
        (60_000.0, 0.36),
        (80_000.0, 0.28),
        (100_000.0, 0.25),
        (140_000.0, 0.24),
        (180_000.0, 0.24),
        (220_000.0, 0.25),
    ];
    let calloway = [
        (20_000.0, 0.50),
        (40_000.0, 0.47),
        (60_000.0, 0.37),
        (80_000.0, 0.29),
        (100_000.0, 0.26),
        (140_000.0, 0.25),
        (180_000.0, 0.25),
        (220_000.0, 0.26),
    ];
    let taylormade = [
        (20_000.0, 0.51),
        (40_000.0, 0.49),
        (60_000.0, 0.39),
        (80_000.0, 0.30),
        (100_000.0, 0.27),
        (140_000.0, 0.26),
        (180_000.0, 0.26),
        (220_000.0, 0.27),
    ];

    let mut curves = HashMap::new();
    curves.insert("generic", DragCurve::from_pairs(&generic));
    curves.insert("Titleist", DragCurve::from_pairs(&titleist));
    curves.insert("Calloway", DragCurve::from_pairs(&calloway));
    curves.insert("TaylorMade", DragCurve::from_pairs(&taylormade));
    curves
});

impl ClubTable {
    /// The built-in club presets
    pub fn builtin() -> &'static ClubTable {
        &BUILTIN_CLUBS
    }

    /// Load a club table from a CSV file.
    ///
    /// Every `spin_<club>` column must be paired with a `velocity_<club>`
    /// column. The spin column carries three rows (x, y, z in rad/s); the
    /// velocity column carries launch speed (m/s) and launch angle (deg).
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<ClubTable, FlightError> {
        let mut reader = csv::Reader::from_path(path.as_ref())?;
        let headers = reader.headers()?.clone();

        let mut rows: Vec<csv::StringRecord> = Vec::new();
        for record in reader.records() {
            rows.push(record?);
        }
        if rows.len() < 3 {
            return Err(FlightError::TableLoad(format!(
                "club table needs 3 data rows, found {}",
                rows.len()
            )));
        }

        let column_index = |name: &str| headers.iter().position(|h| h == name);
        let cell = |row: usize, col: usize| -> Result<f64, FlightError> {
            rows[row]
                .get(col)
                .unwrap_or("")
                .trim()
                .parse::<f64>()
                .map_err(|e| FlightError::TableLoad(format!("bad numeric cell: {}", e)))
        };

        let mut clubs = HashMap::new();
        for header in headers.iter() {
            let Some(club) = header.strip_prefix("spin_") else {
                continue;
            };
            let spin_col = column_index(header).unwrap();
            let velocity_col = column_index(&format!("velocity_{}", club)).ok_or_else(|| {
                FlightError::TableLoad(format!("missing velocity_{} column", club))
            })?;

            let spin = Vector3::new(cell(0, spin_col)?, cell(1, spin_col)?, cell(2, spin_col)?);
            clubs.insert(
                club.to_string(),
                ClubPreset {
                    spin,
                    speed: cell(0, velocity_col)?,
                    launch_angle_deg: cell(1, velocity_col)?,
                },
            );
        }

        Ok(ClubTable { clubs })
    }

    /// Look up the launch preset for a club.
    ///
    /// Spaces in the club name are substituted with underscores before the
    /// lookup, matching the table column scheme.
    pub fn preset(&self, club: &str) -> Result<&ClubPreset, FlightError> {
        let key = club.replace(' ', "_");
        self.clubs.get(&key).ok_or(FlightError::DataNotFound {
            kind: "club",
            name: club.to_string(),
        })
    }

    /// Names of all clubs in the table, sorted
    pub fn club_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.clubs.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }
}

impl DragCurve {
    /// Create a drag curve from Reynolds-number and coefficient arrays
    pub fn new(reynolds: Vec<f64>, cd_values: Vec<f64>) -> Self {
        Self { reynolds, cd_values }
    }

    fn from_pairs(pairs: &[(f64, f64)]) -> Self {
        let reynolds = pairs.iter().map(|(re, _)| *re).collect();
        let cd_values = pairs.iter().map(|(_, cd)| *cd).collect();
        Self::new(reynolds, cd_values)
    }

    /// The built-in drag curve for a ball brand
    pub fn builtin(ball_type: &str) -> Result<DragCurve, FlightError> {
        BUILTIN_DRAG_CURVES
            .get(ball_type)
            .cloned()
            .ok_or(FlightError::DataNotFound {
                kind: "ball",
                name: ball_type.to_string(),
            })
    }

    /// Load a drag curve for one ball brand from a CSV file with
    /// `Re_<ball>` / `C_d_<ball>` column pairs.
    pub fn from_csv<P: AsRef<Path>>(path: P, ball_type: &str) -> Result<DragCurve, FlightError> {
        let mut reader = csv::Reader::from_path(path.as_ref())?;
        let headers = reader.headers()?.clone();

        let re_col = headers
            .iter()
            .position(|h| h == format!("Re_{}", ball_type))
            .ok_or(FlightError::DataNotFound {
                kind: "ball",
                name: ball_type.to_string(),
            })?;
        let cd_col = headers
            .iter()
            .position(|h| h == format!("C_d_{}", ball_type))
            .ok_or(FlightError::DataNotFound {
                kind: "ball",
                name: ball_type.to_string(),
            })?;

        let mut reynolds = Vec::new();
        let mut cd_values = Vec::new();
        for record in reader.records() {
            let record = record?;
            let re_cell = record.get(re_col).unwrap_or("").trim();
            let cd_cell = record.get(cd_col).unwrap_or("").trim();
            // Brand columns may have different lengths; skip trailing blanks
            if re_cell.is_empty() || cd_cell.is_empty() {
                continue;
            }
            let re = re_cell
                .parse::<f64>()
                .map_err(|e| FlightError::TableLoad(format!("bad Reynolds cell: {}", e)))?;
            let cd = cd_cell
                .parse::<f64>()
                .map_err(|e| FlightError::TableLoad(format!("bad C_d cell: {}", e)))?;
            reynolds.push(re);
            cd_values.push(cd);
        }

        if reynolds.is_empty() {
            return Err(FlightError::TableLoad(format!(
                "no data rows for ball '{}'",
                ball_type
            )));
        }

        Ok(DragCurve::new(reynolds, cd_values))
    }

    /// Interpolate the drag coefficient for a given Reynolds number.
    ///
    /// Uses Catmull-Rom cubic interpolation inside the tabulated range and
    /// linear extrapolation outside it. Flight Reynolds numbers are not
    /// bounded a priori, so extrapolated coefficients are returned rather
    /// than rejected; they carry no experimental backing.
    pub fn coefficient(&self, reynolds: f64) -> f64 {
        let n = self.reynolds.len();

        if n == 0 {
            return 0.5; // Fallback
        }

        if n == 1 {
            return self.cd_values[0];
        }

        // Handle out-of-bounds cases with extrapolation
        if reynolds <= self.reynolds[0] {
            let slope =
                (self.cd_values[1] - self.cd_values[0]) / (self.reynolds[1] - self.reynolds[0]);
            let extrapolated = self.cd_values[0] + slope * (reynolds - self.reynolds[0]);
            // Clamp to keep extrapolated coefficients physical
            return extrapolated.max(0.01);
        }

        if reynolds >= self.reynolds[n - 1] {
            let slope = (self.cd_values[n - 1] - self.cd_values[n - 2])
                / (self.reynolds[n - 1] - self.reynolds[n - 2]);
            let extrapolated = self.cd_values[n - 1] + slope * (reynolds - self.reynolds[n - 1]);
            return extrapolated.max(0.01);
        }

        // Find the segment containing the Reynolds number
        let mut idx = 0;
        for i in 0..n - 1 {
            if reynolds >= self.reynolds[i] && reynolds <= self.reynolds[i + 1] {
                idx = i;
                break;
            }
        }

        // Use cubic interpolation if we have enough points, otherwise linear
        if idx > 0 && idx < n - 2 {
            self.cubic_interpolate(reynolds, idx)
        } else {
            self.linear_interpolate(reynolds, idx)
        }
    }

    /// Linear interpolation between two points
    fn linear_interpolate(&self, reynolds: f64, idx: usize) -> f64 {
        let x0 = self.reynolds[idx];
        let x1 = self.reynolds[idx + 1];
        let y0 = self.cd_values[idx];
        let y1 = self.cd_values[idx + 1];

        if (x1 - x0).abs() < crate::constants::MIN_DIVISION_THRESHOLD {
            return y0;
        }

        let t = (reynolds - x0) / (x1 - x0);
        y0 + t * (y1 - y0)
    }

    /// Catmull-Rom cubic interpolation using the 4 points around the segment
    fn cubic_interpolate(&self, reynolds: f64, idx: usize) -> f64 {
        let x = [
            self.reynolds[idx - 1],
            self.reynolds[idx],
            self.reynolds[idx + 1],
            self.reynolds[idx + 2],
        ];
        let y = [
            self.cd_values[idx - 1],
            self.cd_values[idx],
            self.cd_values[idx + 1],
            self.cd_values[idx + 2],
        ];

        let denominator = x[2] - x[1];
        if denominator.abs() < crate::constants::MIN_DIVISION_THRESHOLD {
            return y[1];
        }
        let t = (reynolds - x[1]) / denominator;
        let t2 = t * t;
        let t3 = t2 * t;

        let a0 = -0.5 * y[0] + 1.5 * y[1] - 1.5 * y[2] + 0.5 * y[3];
        let a1 = y[0] - 2.5 * y[1] + 2.0 * y[2] - 0.5 * y[3];
        let a2 = -0.5 * y[0] + 0.5 * y[2];
        let a3 = y[1];

        a0 * t3 + a1 * t2 + a2 * t + a3
    }
}

/// Initial velocity vector from launch speed and angle.
///
/// The ball launches in the x-z plane with zero lateral velocity:
/// `(speed·cos θ, 0, speed·sin θ)`.
pub fn launch_velocity(speed: f64, launch_angle_deg: f64) -> Vector3<f64> {
    let angle_rad = launch_angle_deg.to_radians();
    Vector3::new(speed * angle_rad.cos(), 0.0, speed * angle_rad.sin())
}
