use std::error::Error;
use std::fmt;

/// Error type for flight simulation operations
#[derive(Debug, Clone)]
pub enum FlightError {
    /// A club or ball name has no matching table row or column
    DataNotFound { kind: &'static str, name: String },
    /// The landing-time search did not converge within the observation horizon
    RootFinding(String),
    /// A table file could not be read or parsed
    TableLoad(String),
}

impl fmt::Display for FlightError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FlightError::DataNotFound { kind, name } => {
                write!(f, "no {} data found for '{}'", kind, name)
            }
            FlightError::RootFinding(msg) => write!(f, "landing time not found: {}", msg),
            FlightError::TableLoad(msg) => write!(f, "failed to load table: {}", msg),
        }
    }
}

impl Error for FlightError {}

impl From<csv::Error> for FlightError {
    fn from(err: csv::Error) -> Self {
        FlightError::TableLoad(err.to_string())
    }
}

impl From<std::io::Error> for FlightError {
    fn from(err: std::io::Error) -> Self {
        FlightError::TableLoad(err.to_string())
    }
}
