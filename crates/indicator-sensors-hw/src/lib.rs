//! Indicator Sensors Hardware Library
//!
//! Observable hardware sensors (temperature, fan, voltage) discovered
//! through an lm-sensors style chip/feature model, with a Linux hwmon
//! backend.
//!
//! ```no_run
//! use indicator_sensors_hw::{LibsensorsPlugin, Manager, Sensor, SysfsLibrary};
//!
//! let mut manager = Manager::new();
//! let mut plugin = LibsensorsPlugin::new(SysfsLibrary::new()?);
//! plugin.activate(&mut manager);
//! manager.update_all(&plugin)?;
//! for sensor in manager.iter() {
//!     println!("{}: {}", sensor.label(), sensor.display_value());
//! }
//! # Ok::<(), indicator_sensors_hw::Error>(())
//! ```

pub mod chip;
pub mod error;
pub mod hwmon;
pub mod manager;
pub mod plugin;
pub mod sensor;
pub mod sensors;

pub use chip::{BusType, ChipName, Feature, FeatureKind, SensorsLibrary, Subfeature, SubfeatureKind};
pub use error::{Error, Result};
pub use hwmon::SysfsLibrary;
pub use manager::Manager;
pub use plugin::LibsensorsPlugin;
pub use sensor::{BasicSensor, HandlerId, ReadingSource, Sensor, SensorCore, SensorEvent, SensorKind};
pub use sensors::{Bounds, FanSensor, GenericSensor, TemperatureScale, TemperatureSensor};
