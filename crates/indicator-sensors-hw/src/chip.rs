//! Chip, feature and sub-feature model of a hardware sensors library.
//!
//! Mirrors the lm-sensors object model: a detected *chip* exposes numbered
//! *features* (one measured quantity each), and each feature has typed
//! *sub-features* (input, limits, alarm flags) that can be read by number.

use crate::Result;
use std::fmt;
use std::path::PathBuf;

/// Bus a chip is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BusType {
    Isa,
    Pci,
    Spi,
    Virtual,
    Acpi,
    Hid,
    Mdio,
    Scsi,
    /// I2C adapter number.
    I2c(u16),
    /// Unrecognised bus; the chip name cannot be formatted.
    Unknown,
}

/// Detected chip. Used as an opaque handle into the library.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChipName {
    /// Driver name, e.g. `coretemp`.
    pub prefix: String,
    pub bus: BusType,
    pub addr: u32,
    /// Sysfs directory of the chip.
    pub path: PathBuf,
}

impl ChipName {
    /// Formats the chip name the way lm-sensors does
    /// (`coretemp-isa-0000`, `k10temp-pci-00c3`, `lm75-i2c-1-48`).
    ///
    /// Returns None if the prefix is empty or the bus is unknown.
    pub fn format(&self) -> Option<String> {
        if self.prefix.is_empty() {
            return None;
        }
        let name = match self.bus {
            BusType::Isa => format!("{}-isa-{:04x}", self.prefix, self.addr),
            BusType::Pci => format!("{}-pci-{:04x}", self.prefix, self.addr),
            BusType::I2c(adapter) => format!("{}-i2c-{}-{:02x}", self.prefix, adapter, self.addr),
            BusType::Spi => format!("{}-spi-0-{:x}", self.prefix, self.addr),
            BusType::Virtual => format!("{}-virtual-{:x}", self.prefix, self.addr),
            BusType::Acpi => format!("{}-acpi-{:x}", self.prefix, self.addr),
            BusType::Hid => format!("{}-hid-0-{:x}", self.prefix, self.addr),
            BusType::Mdio => format!("{}-mdio-{:x}", self.prefix, self.addr),
            BusType::Scsi => format!("{}-scsi-0-{:x}", self.prefix, self.addr),
            BusType::Unknown => return None,
        };
        Some(name)
    }
}

impl fmt::Display for ChipName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.format() {
            Some(name) => write!(f, "{}", name),
            None => write!(f, "{}", self.path.display()),
        }
    }
}

/// Category of a feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FeatureKind {
    In,
    Fan,
    Temp,
    Power,
    Energy,
    Curr,
    Vid,
    BeepEnable,
    Unknown,
}

/// Type of a sub-feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubfeatureKind {
    InInput,
    InMin,
    InMax,
    InAlarm,
    InMinAlarm,
    InMaxAlarm,
    FanInput,
    FanMin,
    FanMax,
    FanAlarm,
    TempInput,
    TempMin,
    TempMax,
    TempCrit,
    TempAlarm,
    TempMinAlarm,
    TempMaxAlarm,
    TempCritAlarm,
    PowerInput,
    PowerAverage,
    EnergyInput,
    CurrInput,
    Vid,
    BeepEnable,
}

/// One measured quantity of a chip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feature {
    /// Sysfs name stem, e.g. `temp1`.
    pub name: String,
    pub number: u32,
    pub kind: FeatureKind,
}

/// One readable value of a feature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subfeature {
    /// Sysfs attribute name, e.g. `temp1_input`.
    pub name: String,
    pub number: u32,
    pub kind: SubfeatureKind,
}

/// Interface to a hardware sensors library.
pub trait SensorsLibrary {
    /// Returns all detected chips.
    fn detected_chips(&self) -> Vec<ChipName>;

    /// Returns the features of a chip, ordered by number.
    fn features(&self, chip: &ChipName) -> Vec<Feature>;

    /// Looks up a sub-feature of the given type.
    fn subfeature(&self, chip: &ChipName, feature: &Feature, kind: SubfeatureKind)
        -> Option<Subfeature>;

    /// Returns the label of a feature, or None if it cannot be determined.
    fn label(&self, chip: &ChipName, feature: &Feature) -> Option<String>;

    /// Reads a sub-feature value by number.
    fn value(&self, chip: &ChipName, number: u32) -> Result<f64>;

    /// Formats a chip name; None if it cannot be resolved.
    fn chip_name_string(&self, chip: &ChipName) -> Option<String> {
        chip.format()
    }
}
