//! Fan speed sensor.

use super::{refresh, Bounds};
use crate::sensor::{ReadingSource, Sensor, SensorCore, SensorKind};
use crate::Result;

/// Fan speed sensor in RPM.
#[derive(Debug)]
pub struct FanSensor {
    core: SensorCore,
    label: String,
    bounds: Bounds,
}

impl FanSensor {
    /// Bounds used when the hardware reports none. Fans never spin backwards.
    pub const DEFAULT_BOUNDS: Bounds = Bounds {
        low: 0.0,
        high: f64::INFINITY,
    };

    /// Creates a new fan sensor.
    pub fn new(
        family: impl Into<String>,
        id: impl Into<String>,
        label: impl Into<String>,
        bounds: Bounds,
    ) -> Result<Self> {
        Ok(Self {
            core: SensorCore::new(family, id)?,
            label: label.into(),
            bounds,
        })
    }
}

impl Sensor for FanSensor {
    fn core(&self) -> &SensorCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut SensorCore {
        &mut self.core
    }

    fn kind(&self) -> SensorKind {
        SensorKind::Fan
    }

    fn update(&mut self, source: &dyn ReadingSource) -> Result<()> {
        refresh(&mut self.core, source, |rpm| rpm)
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
        "RPM"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensors::test_source::TableSource;

    #[test]
    fn test_default_bounds() {
        let sensor =
            FanSensor::new("libsensors", "it8728-isa-0a30/4", "fan1", FanSensor::DEFAULT_BOUNDS)
                .unwrap();
        assert_eq!(sensor.low(), 0.0);
        assert_eq!(sensor.high(), f64::INFINITY);
        assert_eq!(sensor.kind(), SensorKind::Fan);
    }

    #[test]
    fn test_update() {
        let mut sensor =
            FanSensor::new("libsensors", "it8728-isa-0a30/4", "fan1", FanSensor::DEFAULT_BOUNDS)
                .unwrap();
        sensor
            .update(&TableSource::with("libsensors/it8728-isa-0a30/4", Ok(1250.0)))
            .unwrap();
        assert_eq!(sensor.value(), 1250.0);
        assert_eq!(sensor.display_value(), "1250 RPM");
    }
}
