use clap::{Parser, Subcommand, ValueEnum};
use nalgebra::Vector3;
use serde_json::json;
use std::error::Error;
use std::path::PathBuf;

use golf_flight_engine::{
    analyze_flight, ClubTable, DragCurve, EnvironmentConditions, FlightParameters,
    InitialCondition, IntegrationMethod, Trajectory, TrajectorySolver,
};

#[derive(Parser)]
#[command(name = "golf-cli")]
#[command(version = "0.1.0")]
#[command(about = "Golf ball flight trajectory calculator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate a single ball flight
    #[command(allow_negative_numbers = true)]
    Simulate {
        /// Club preset (e.g. driver, 7_iron); overrides the custom launch values
        #[arg(short, long)]
        club: Option<String>,

        /// Custom launch speed (m/s)
        #[arg(short = 's', long, default_value = "72.0")]
        speed: f64,

        /// Custom launch angle (degrees)
        #[arg(short = 'a', long, default_value = "15.0")]
        angle: f64,

        /// Custom spin around the x axis (rad/s)
        #[arg(long, default_value = "0.0")]
        spin_x: f64,

        /// Custom spin around the y axis (rad/s, negative = backspin)
        #[arg(long, default_value = "0.0")]
        spin_y: f64,

        /// Custom spin around the z axis (rad/s)
        #[arg(long, default_value = "0.0")]
        spin_z: f64,

        /// Ball brand selecting the drag curve
        #[arg(short, long, default_value = "generic")]
        ball: String,

        /// Wind speed (m/s)
        #[arg(long, default_value = "0.0")]
        wind_speed: f64,

        /// Wind direction (degrees, 0 = downrange, counter-clockwise)
        #[arg(long, default_value = "0.0")]
        wind_direction: f64,

        /// Ambient temperature (Celsius)
        #[arg(short, long, default_value = "25.0")]
        temperature: f64,

        /// Ambient pressure (bar)
        #[arg(short, long, default_value = "1.01")]
        pressure: f64,

        /// Magnus calibration constant
        #[arg(long, default_value = "1.0")]
        magnus_calibration: f64,

        /// Observation window (seconds); must exceed the flight time
        #[arg(long, default_value = "15.0")]
        horizon: f64,

        /// Sample resolution (samples per second)
        #[arg(long, default_value = "50")]
        resolution: u32,

        /// Integrate with the Euler method instead of RK4
        #[arg(long)]
        euler: bool,

        /// CSV file overriding the built-in club table
        #[arg(long)]
        club_file: Option<PathBuf>,

        /// CSV file overriding the built-in drag table
        #[arg(long)]
        drag_file: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,

        /// Include the full trajectory in table/JSON output
        #[arg(long)]
        full: bool,
    },

    /// List the club presets
    Clubs {
        /// CSV file overriding the built-in club table
        #[arg(long)]
        club_file: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate {
            club,
            speed,
            angle,
            spin_x,
            spin_y,
            spin_z,
            ball,
            wind_speed,
            wind_direction,
            temperature,
            pressure,
            magnus_calibration,
            horizon,
            resolution,
            euler,
            club_file,
            drag_file,
            format,
            full,
        } => {
            let initial = match club {
                Some(club) => InitialCondition::Preset { club },
                None => InitialCondition::Custom {
                    speed,
                    launch_angle_deg: angle,
                    spin: Vector3::new(spin_x, spin_y, spin_z),
                },
            };

            let params = FlightParameters {
                ball_type: ball.clone(),
                initial,
                environment: EnvironmentConditions {
                    temperature_c: temperature,
                    pressure_bar: pressure,
                    wind_speed,
                    wind_direction_deg: wind_direction,
                },
                magnus_calibration,
                ..FlightParameters::default()
            };

            let mut solver = TrajectorySolver::new(params);
            solver.set_horizon(horizon);
            solver.set_resolution(resolution);
            if euler {
                solver.set_method(IntegrationMethod::Euler);
            }
            if let Some(path) = club_file {
                solver.set_club_table(ClubTable::from_csv(path)?);
            }
            if let Some(path) = drag_file {
                solver.set_drag_curve(DragCurve::from_csv(path, &ball)?);
            }

            let trajectory = solver.solve()?;
            let summary = analyze_flight(&trajectory)?;

            match format {
                OutputFormat::Table => {
                    println!("=== FLIGHT SUMMARY ===");
                    println!("Carry distance:    {:.2} m", summary.carry_distance);
                    println!("Lateral deviation: {:.2} m", summary.lateral_deviation);
                    println!("Apex height:       {:.2} m", summary.apex);
                    println!("Arc length:        {:.2} m", summary.arc_length);
                    println!("Flight time:       {:.2} s", summary.flight_time);

                    if full {
                        println!();
                        println!("Time (s) |    X (m) |    Y (m) |    Z (m) | Speed (m/s)");
                        println!("---------|----------|----------|----------|------------");
                        let step = (trajectory.len() / 30).max(1);
                        for point in trajectory
                            .points
                            .iter()
                            .take(summary.landing_index + 1)
                            .step_by(step)
                        {
                            println!(
                                "{:8.2} | {:8.2} | {:8.2} | {:8.2} | {:8.2}",
                                point.time,
                                point.position.x,
                                point.position.y,
                                point.position.z,
                                point.velocity.norm()
                            );
                        }
                    }
                }
                OutputFormat::Json => {
                    let mut output = json!({ "summary": summary });
                    if full {
                        output["trajectory"] = trajectory_rows(&trajectory);
                    }
                    println!("{}", serde_json::to_string_pretty(&output)?);
                }
                OutputFormat::Csv => {
                    println!("time,vx,vy,vz,x,y,z");
                    for point in &trajectory.points {
                        let state = point.state();
                        println!(
                            "{:.4},{:.4},{:.4},{:.4},{:.4},{:.4},{:.4}",
                            point.time, state[0], state[1], state[2], state[3], state[4], state[5]
                        );
                    }
                }
            }
        }

        Commands::Clubs { club_file } => {
            let table = match club_file {
                Some(path) => ClubTable::from_csv(path)?,
                None => ClubTable::builtin().clone(),
            };
            println!("Club     | Speed (m/s) | Angle (deg) | Spin (rad/s)");
            println!("---------|-------------|-------------|-------------------");
            for name in table.club_names() {
                let preset = table.preset(name)?;
                println!(
                    "{:8} | {:11.1} | {:11.1} | ({:.0}, {:.0}, {:.0})",
                    name,
                    preset.speed,
                    preset.launch_angle_deg,
                    preset.spin.x,
                    preset.spin.y,
                    preset.spin.z
                );
            }
        }
    }

    Ok(())
}

fn trajectory_rows(trajectory: &Trajectory) -> serde_json::Value {
    let rows: Vec<serde_json::Value> = trajectory
        .points
        .iter()
        .map(|point| {
            let state = point.state();
            json!([point.time, state[0], state[1], state[2], state[3], state[4], state[5]])
        })
        .collect();
    json!(rows)
}
