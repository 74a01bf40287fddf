//! Sensor collection.
//!
//! The manager owns every registered sensor and drives update passes. It is
//! single-threaded: `&mut self` guarantees at most one update per sensor is
//! in flight.

use crate::sensor::{ReadingSource, Sensor};
use crate::{Error, Result};
use tracing::{debug, trace};

/// Owns registered sensors, keyed by path.
#[derive(Default)]
pub struct Manager {
    sensors: Vec<Box<dyn Sensor>>,
}

impl Manager {
    /// Creates an empty manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a sensor. Paths must be unique.
    pub fn add_sensor(&mut self, sensor: Box<dyn Sensor>) -> Result<()> {
        let path = sensor.path();
        if self.contains(&path) {
            return Err(Error::DuplicateSensor(path));
        }
        debug!("Adding sensor {} ({})", path, sensor.label());
        self.sensors.push(sensor);
        Ok(())
    }

    /// Removes and returns the sensor registered under `path`.
    pub fn remove_sensor(&mut self, path: &str) -> Option<Box<dyn Sensor>> {
        let index = self.sensors.iter().position(|s| s.path() == path)?;
        debug!("Removing sensor {}", path);
        Some(self.sensors.remove(index))
    }

    /// Removes every sensor of a family. Returns how many were removed.
    pub fn remove_family(&mut self, family: &str) -> usize {
        let before = self.sensors.len();
        self.sensors.retain(|s| s.family() != family);
        before - self.sensors.len()
    }

    /// Returns true if a sensor is registered under `path`.
    pub fn contains(&self, path: &str) -> bool {
        self.sensors.iter().any(|s| s.path() == path)
    }

    /// Looks up a sensor by path.
    pub fn get(&self, path: &str) -> Option<&dyn Sensor> {
        self.sensors
            .iter()
            .find(|s| s.path() == path)
            .map(|s| s.as_ref() as &dyn Sensor)
    }

    /// Looks up a sensor by path for modification (e.g. to connect observers).
    pub fn get_mut(&mut self, path: &str) -> Option<&mut (dyn Sensor + 'static)> {
        for sensor in self.sensors.iter_mut() {
            if sensor.path() == path {
                return Some(sensor.as_mut());
            }
        }
        None
    }

    /// Iterates over sensors in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &(dyn Sensor + 'static)> + '_ {
        self.sensors.iter().map(|s| s.as_ref())
    }

    /// Iterates mutably over sensors in registration order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut (dyn Sensor + 'static)> + '_ {
        self.sensors.iter_mut().map(|s| s.as_mut())
    }

    /// Returns the number of registered sensors.
    pub fn len(&self) -> usize {
        self.sensors.len()
    }

    /// Returns true if no sensors are registered.
    pub fn is_empty(&self) -> bool {
        self.sensors.is_empty()
    }

    /// Updates every sensor once.
    ///
    /// Read failures are reported on the affected sensor and do not stop
    /// the pass. A lookup failure means a sensor has no binding in `source`,
    /// which is returned immediately.
    pub fn update_all(&mut self, source: &dyn ReadingSource) -> Result<()> {
        trace!("Updating {} sensors", self.sensors.len());
        for sensor in self.sensors.iter_mut() {
            sensor.update(source)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for Manager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.sensors.iter().map(|s| s.path()))
            .finish()
    }
}
