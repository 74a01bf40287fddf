//! Error types for the sensor library.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when discovering or reading sensors.
#[derive(Error, Debug)]
pub enum Error {
    /// A sensor was constructed with an empty family or id.
    #[error("Sensor {field} must not be empty")]
    InvalidIdentity { field: &'static str },

    /// A sensor with the same path is already registered.
    #[error("Sensor already registered: {0}")]
    DuplicateSensor(String),

    /// No chip binding exists for a sensor path.
    #[error("No chip bound to sensor {0}")]
    UnboundSensor(String),

    /// The trailing component of a sensor path is not a feature number.
    #[error("Invalid sensor path (no feature number): {0}")]
    InvalidPath(String),

    /// Reading a sensor value failed.
    #[error("Error getting sensor value for sensor {path}: {message}")]
    Read { path: String, message: String },

    /// The chip has no sub-feature with this number.
    #[error("No sub-feature {number} on chip {chip}")]
    NoSuchSubfeature { chip: String, number: u32 },

    /// The hwmon class directory could not be scanned.
    #[error("Cannot scan hwmon directory {path}: {source}")]
    Scan {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A sysfs attribute file did not contain a number.
    #[error("Cannot parse {path} ({content:?})")]
    Parse { path: PathBuf, content: String },

    /// Sysfs I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid temperature scale name.
    #[error("Invalid temperature scale: {0}")]
    InvalidScale(String),
}

impl Error {
    /// Returns true if the error only concerns a single reading and polling
    /// may continue with the next sensor.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::Read { .. })
    }
}
