//! Temperature sensor.

use super::{refresh, Bounds};
use crate::sensor::{ReadingSource, Sensor, SensorCore, SensorKind};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Temperature display scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureScale {
    /// Degrees Celsius, the unit hardware reports in.
    #[default]
    Celsius,
    /// Degrees Fahrenheit.
    Fahrenheit,
    /// Kelvin.
    Kelvin,
}

impl TemperatureScale {
    /// Returns the unit symbol.
    pub fn units(&self) -> &'static str {
        match self {
            TemperatureScale::Celsius => "°C",
            TemperatureScale::Fahrenheit => "°F",
            TemperatureScale::Kelvin => "K",
        }
    }

    /// Converts a Celsius value into this scale.
    pub fn from_celsius(&self, celsius: f64) -> f64 {
        match self {
            TemperatureScale::Celsius => celsius,
            TemperatureScale::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
            TemperatureScale::Kelvin => celsius + 273.15,
        }
    }

    /// Converts a value in this scale into Celsius.
    pub fn to_celsius(&self, value: f64) -> f64 {
        match self {
            TemperatureScale::Celsius => value,
            TemperatureScale::Fahrenheit => (value - 32.0) * 5.0 / 9.0,
            TemperatureScale::Kelvin => value - 273.15,
        }
    }

    /// Converts a value in this scale into `target`.
    pub fn convert(&self, value: f64, target: TemperatureScale) -> f64 {
        if *self == target {
            return value;
        }
        target.from_celsius(self.to_celsius(value))
    }
}

impl FromStr for TemperatureScale {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "celsius" | "c" => Ok(TemperatureScale::Celsius),
            "fahrenheit" | "f" => Ok(TemperatureScale::Fahrenheit),
            "kelvin" | "k" => Ok(TemperatureScale::Kelvin),
            _ => Err(Error::InvalidScale(s.to_string())),
        }
    }
}

impl std::fmt::Display for TemperatureScale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemperatureScale::Celsius => write!(f, "celsius"),
            TemperatureScale::Fahrenheit => write!(f, "fahrenheit"),
            TemperatureScale::Kelvin => write!(f, "kelvin"),
        }
    }
}

/// Temperature sensor. Value and bounds are kept in the display scale.
#[derive(Debug)]
pub struct TemperatureSensor {
    core: SensorCore,
    label: String,
    bounds: Bounds,
    scale: TemperatureScale,
}

impl TemperatureSensor {
    /// Creates a temperature sensor with bounds given in Celsius.
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
            scale: TemperatureScale::Celsius,
        })
    }

    /// Switches the display scale at construction time.
    pub fn with_scale(mut self, scale: TemperatureScale) -> Self {
        self.set_scale(scale);
        self
    }

    /// Returns the display scale.
    pub fn scale(&self) -> TemperatureScale {
        self.scale
    }

    /// Changes the display scale, converting the value and both bounds.
    pub fn set_scale(&mut self, scale: TemperatureScale) {
        if scale == self.scale {
            return;
        }
        let old = self.scale;
        self.bounds = Bounds::new(
            old.convert(self.bounds.low, scale),
            old.convert(self.bounds.high, scale),
        );
        self.scale = scale;
        let value = old.convert(self.core.value(), scale);
        self.core.set_value(value);
    }
}

impl Sensor for TemperatureSensor {
    fn core(&self) -> &SensorCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut SensorCore {
        &mut self.core
    }

    fn kind(&self) -> SensorKind {
        SensorKind::Temperature
    }

    fn update(&mut self, source: &dyn ReadingSource) -> Result<()> {
        let scale = self.scale;
        refresh(&mut self.core, source, |celsius| scale.from_celsius(celsius))
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
        self.scale.units()
    }

    fn digits(&self) -> usize {
        1
    }
}
