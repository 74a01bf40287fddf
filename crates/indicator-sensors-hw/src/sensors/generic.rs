//! Generic sensor with caller-supplied units and precision.

use super::{refresh, Bounds};
use crate::sensor::{ReadingSource, Sensor, SensorCore, SensorKind};
use crate::Result;

/// Sensor for quantities without a dedicated type (voltages).
#[derive(Debug)]
pub struct GenericSensor {
    core: SensorCore,
    label: String,
    bounds: Bounds,
    units: String,
    digits: usize,
}

impl GenericSensor {
    /// Creates a new generic sensor.
    pub fn new(
        family: impl Into<String>,
        id: impl Into<String>,
        label: impl Into<String>,
        bounds: Bounds,
        units: impl Into<String>,
        digits: usize,
    ) -> Result<Self> {
        Ok(Self {
            core: SensorCore::new(family, id)?,
            label: label.into(),
            bounds,
            units: units.into(),
            digits,
        })
    }
}

impl Sensor for GenericSensor {
    fn core(&self) -> &SensorCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut SensorCore {
        &mut self.core
    }

    fn kind(&self) -> SensorKind {
        SensorKind::Generic
    }

    fn update(&mut self, source: &dyn ReadingSource) -> Result<()> {
        refresh(&mut self.core, source, |value| value)
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn low(&self) -> f64 {
        self.bounds.low
    }

    fn high(&self) -> f64 {
        self.bounds.high
    }

    fn units(&self) -> &str {
        &self.units
    }

    fn digits(&self) -> usize {
        self.digits
    }
}
