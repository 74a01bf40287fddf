//! Hardware-backed sensor types.
//!
//! Each type wraps a [`SensorCore`] with a label, alarm bounds and display
//! settings, and overrides `update` to fetch its reading from a
//! [`ReadingSource`].

mod fan;
mod generic;
mod temperature;

pub use fan::FanSensor;
pub use generic::GenericSensor;
pub use temperature::{TemperatureScale, TemperatureSensor};

use crate::sensor::{ReadingSource, SensorCore};
use crate::Result;
use tracing::debug;

/// Low and high alarm bounds. Either side may be infinite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub low: f64,
    pub high: f64,
}

impl Bounds {
    /// No bound in either direction.
    pub const UNBOUNDED: Bounds = Bounds {
        low: f64::NEG_INFINITY,
        high: f64::INFINITY,
    };

    /// Creates bounds from explicit values.
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::UNBOUNDED
    }
}

/// Reads the sensor's raw value from `source` and stores it after `convert`.
///
/// Read failures become an error event on the sensor; only lookup failures
/// are returned.
pub(crate) fn refresh<F>(core: &mut SensorCore, source: &dyn ReadingSource, convert: F) -> Result<()>
where
    F: FnOnce(f64) -> f64,
{
    let path = core.path();
    match source.read(&path) {
        Ok(raw) => {
            core.clear_error();
            core.set_value(convert(raw));
            Ok(())
        }
        Err(e) if e.is_recoverable() => {
            debug!("Read failed for {}: {}", path, e);
            core.emit_error(e.to_string());
            Ok(())
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
pub(crate) mod test_source {
    use crate::sensor::ReadingSource;
    use crate::{Error, Result};
    use std::collections::HashMap;

    /// Reading source answering from a fixed table.
    #[derive(Default)]
    pub struct TableSource {
        pub values: HashMap<String, std::result::Result<f64, String>>,
    }

    impl TableSource {
        pub fn with(path: &str, value: std::result::Result<f64, String>) -> Self {
            let mut source = Self::default();
            source.values.insert(path.to_string(), value);
            source
        }
    }

    impl ReadingSource for TableSource {
        fn read(&self, path: &str) -> Result<f64> {
            match self.values.get(path) {
                Some(Ok(value)) => Ok(*value),
                Some(Err(message)) => Err(Error::Read {
                    path: path.to_string(),
                    message: message.clone(),
                }),
                None => Err(Error::UnboundSensor(path.to_string())),
            }
        }
    }
}
