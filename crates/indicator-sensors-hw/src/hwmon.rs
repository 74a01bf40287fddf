//! Linux hwmon backend.
//!
//! Scans `/sys/class/hwmon` once and exposes every `hwmonN` directory as a
//! chip in the lm-sensors object model. Attribute files are named
//! `<type><N>_<item>` (e.g. `temp1_input`, `in0_max_alarm`, `fan2_input`);
//! `<type><N>_label` holds the feature label.
//!
//! Kernel hwmon sysfs ABI: https://www.kernel.org/doc/html/latest/hwmon/sysfs-interface.html

use crate::chip::{BusType, ChipName, Feature, FeatureKind, SensorsLibrary, Subfeature, SubfeatureKind};
use crate::chip::SubfeatureKind::*;
use crate::{Error, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Default hwmon class directory.
pub const HWMON_ROOT: &str = "/sys/class/hwmon";

const IN_ITEMS: &[(&str, SubfeatureKind)] = &[
    ("input", InInput),
    ("min", InMin),
    ("max", InMax),
    ("alarm", InAlarm),
    ("min_alarm", InMinAlarm),
    ("max_alarm", InMaxAlarm),
];

const FAN_ITEMS: &[(&str, SubfeatureKind)] = &[
    ("input", FanInput),
    ("min", FanMin),
    ("max", FanMax),
    ("alarm", FanAlarm),
];

const TEMP_ITEMS: &[(&str, SubfeatureKind)] = &[
    ("input", TempInput),
    ("max", TempMax),
    ("min", TempMin),
    ("crit", TempCrit),
    ("alarm", TempAlarm),
    ("min_alarm", TempMinAlarm),
    ("max_alarm", TempMaxAlarm),
    ("crit_alarm", TempCritAlarm),
];

const POWER_ITEMS: &[(&str, SubfeatureKind)] = &[("input", PowerInput), ("average", PowerAverage)];

const ENERGY_ITEMS: &[(&str, SubfeatureKind)] = &[("input", EnergyInput)];

const CURR_ITEMS: &[(&str, SubfeatureKind)] = &[("input", CurrInput)];

/// Attribute prefixes of numbered features, in feature order.
const PREFIXES: &[(&str, FeatureKind, &[(&str, SubfeatureKind)])] = &[
    ("in", FeatureKind::In, IN_ITEMS),
    ("fan", FeatureKind::Fan, FAN_ITEMS),
    ("temp", FeatureKind::Temp, TEMP_ITEMS),
    ("power", FeatureKind::Power, POWER_ITEMS),
    ("energy", FeatureKind::Energy, ENERGY_ITEMS),
    ("curr", FeatureKind::Curr, CURR_ITEMS),
];

/// Divisor turning a raw sysfs value into base units.
fn divisor(kind: SubfeatureKind) -> f64 {
    match kind {
        InInput | InMin | InMax | TempInput | TempMax | TempMin | TempCrit | CurrInput | Vid => {
            1000.0
        }
        PowerInput | PowerAverage | EnergyInput => 1_000_000.0,
        _ => 1.0,
    }
}

#[derive(Debug)]
struct SubfeatureEntry {
    subfeature: Subfeature,
    file: PathBuf,
}

#[derive(Debug)]
struct FeatureEntry {
    feature: Feature,
    subfeatures: Vec<SubfeatureEntry>,
    label_file: PathBuf,
}

#[derive(Debug)]
struct ChipEntry {
    chip: ChipName,
    features: Vec<FeatureEntry>,
}

/// Sensors library reading the hwmon sysfs tree.
#[derive(Debug)]
pub struct SysfsLibrary {
    root: PathBuf,
    chips: Vec<ChipEntry>,
}

impl SysfsLibrary {
    /// Scans the default hwmon directory.
    pub fn new() -> Result<Self> {
        Self::scan(HWMON_ROOT)
    }

    /// Scans every `hwmonN` directory below `root`.
    pub fn scan<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        let entries = fs::read_dir(&root).map_err(|source| Error::Scan {
            path: root.clone(),
            source,
        })?;

        let mut dirs: Vec<(u32, PathBuf)> = entries
            .flatten()
            .filter_map(|entry| {
                let name = entry.file_name();
                let index = name.to_str()?.strip_prefix("hwmon")?.parse().ok()?;
                Some((index, entry.path()))
            })
            .collect();
        dirs.sort();

        let mut chips = Vec::new();
        for (_, dir) in dirs {
            match scan_chip(&dir) {
                Some(chip) => {
                    debug!(
                        "Found chip {} with {} features at {}",
                        chip.chip,
                        chip.features.len(),
                        dir.display()
                    );
                    chips.push(chip);
                }
                None => debug!("Skipping {} (no name)", dir.display()),
            }
        }

        Ok(Self { root, chips })
    }

    /// Returns the scanned directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn chip(&self, chip: &ChipName) -> Option<&ChipEntry> {
        self.chips.iter().find(|entry| entry.chip == *chip)
    }

    fn feature(&self, chip: &ChipName, feature: &Feature) -> Option<&FeatureEntry> {
        self.chip(chip)?
            .features
            .iter()
            .find(|entry| entry.feature.number == feature.number)
    }
}

impl SensorsLibrary for SysfsLibrary {
    fn detected_chips(&self) -> Vec<ChipName> {
        self.chips.iter().map(|entry| entry.chip.clone()).collect()
    }

    fn features(&self, chip: &ChipName) -> Vec<Feature> {
        self.chip(chip)
            .map(|entry| entry.features.iter().map(|f| f.feature.clone()).collect())
            .unwrap_or_default()
    }

    fn subfeature(
        &self,
        chip: &ChipName,
        feature: &Feature,
        kind: SubfeatureKind,
    ) -> Option<Subfeature> {
        self.feature(chip, feature)?
            .subfeatures
            .iter()
            .find(|entry| entry.subfeature.kind == kind)
            .map(|entry| entry.subfeature.clone())
    }

    fn label(&self, chip: &ChipName, feature: &Feature) -> Option<String> {
        let entry = self.feature(chip, feature)?;
        if !entry.label_file.exists() {
            return Some(entry.feature.name.clone());
        }
        match read_attribute(&entry.label_file) {
            Ok(label) => Some(label),
            Err(e) => {
                warn!("Cannot read {}: {}", entry.label_file.display(), e);
                None
            }
        }
    }

    fn value(&self, chip: &ChipName, number: u32) -> Result<f64> {
        let entry = self
            .chip(chip)
            .into_iter()
            .flat_map(|c| c.features.iter())
            .flat_map(|f| f.subfeatures.iter())
            .find(|s| s.subfeature.number == number)
            .ok_or_else(|| Error::NoSuchSubfeature {
                chip: chip.to_string(),
                number,
            })?;

        let content = read_attribute(&entry.file)?;
        let raw: f64 = content.parse().map_err(|_| Error::Parse {
            path: entry.file.clone(),
            content: content.clone(),
        })?;
        Ok(raw / divisor(entry.subfeature.kind))
    }
}

/// Reads a sysfs attribute, trimming trailing whitespace.
fn read_attribute(path: &Path) -> Result<String> {
    let content = fs::read_to_string(path)?;
    Ok(content.trim().to_string())
}

fn scan_chip(dir: &Path) -> Option<ChipEntry> {
    let prefix = read_attribute(&dir.join("name")).ok()?;
    let (bus, addr) = bus_address(dir);
    let chip = ChipName {
        prefix,
        bus,
        addr,
        path: dir.to_path_buf(),
    };

    // (kind, index) -> (stem, [(table position, item)])
    let mut found: BTreeMap<(FeatureKind, u32), (String, BTreeMap<usize, (String, SubfeatureKind)>)> =
        BTreeMap::new();

    let entries = fs::read_dir(dir).ok()?;
    for entry in entries.flatten() {
        if !entry.file_type().is_ok_and(|t| !t.is_dir()) {
            continue;
        }
        let file_name = entry.file_name();
        let Some(file_name) = file_name.to_str() else {
            continue;
        };
        let Some((kind, index, stem, position, sub)) = parse_attribute(file_name) else {
            continue;
        };
        found
            .entry((kind, index))
            .or_insert_with(|| (stem, BTreeMap::new()))
            .1
            .insert(position, (file_name.to_string(), sub));
    }

    let mut features = Vec::new();
    let mut next_subfeature = 0;
    for (feature_number, ((kind, _), (stem, items))) in found.into_iter().enumerate() {
        let subfeatures = items
            .into_values()
            .map(|(name, sub)| {
                let entry = SubfeatureEntry {
                    file: dir.join(&name),
                    subfeature: Subfeature {
                        name,
                        number: next_subfeature,
                        kind: sub,
                    },
                };
                next_subfeature += 1;
                entry
            })
            .collect();
        features.push(FeatureEntry {
            label_file: dir.join(format!("{}_label", stem)),
            feature: Feature {
                name: stem,
                number: feature_number as u32,
                kind,
            },
            subfeatures,
        });
    }

    Some(ChipEntry { chip, features })
}

/// Parses an attribute file name into
/// (feature kind, feature index, stem, sub-feature order, sub-feature kind).
fn parse_attribute(file_name: &str) -> Option<(FeatureKind, u32, String, usize, SubfeatureKind)> {
    if file_name == "beep_enable" {
        return Some((FeatureKind::BeepEnable, 0, file_name.to_string(), 0, BeepEnable));
    }
    if let Some(index) = file_name
        .strip_prefix("cpu")
        .and_then(|rest| rest.strip_suffix("_vid"))
    {
        let index = index.parse().ok()?;
        let stem = format!("cpu{}", index);
        return Some((FeatureKind::Vid, index, stem, 0, Vid));
    }

    PREFIXES.iter().find_map(|(prefix, kind, items)| {
        let (index, item) = file_name.strip_prefix(*prefix)?.split_once('_')?;
        let index: u32 = index.parse().ok()?;
        let position = items.iter().position(|(name, _)| *name == item)?;
        Some((
            *kind,
            index,
            format!("{}{}", prefix, index),
            position,
            items[position].1,
        ))
    })
}

/// Determines bus type and address from the `device` link of a hwmon
/// directory, following lm-sensors' naming rules.
fn bus_address(dir: &Path) -> (BusType, u32) {
    let Ok(device) = fs::canonicalize(dir.join("device")) else {
        return (BusType::Virtual, 0);
    };
    let Some(device_name) = device.file_name().and_then(|n| n.to_str()) else {
        return (BusType::Unknown, 0);
    };
    let subsystem = fs::read_link(device.join("subsystem"))
        .ok()
        .and_then(|link| link.file_name().and_then(|n| n.to_str()).map(str::to_string))
        .unwrap_or_default();

    match subsystem.as_str() {
        "pci" => match parse_pci_address(device_name) {
            Some(addr) => (BusType::Pci, addr),
            None => (BusType::Unknown, 0),
        },
        "platform" | "of_platform" | "isa" => (BusType::Isa, trailing_number(device_name)),
        "i2c" => match parse_i2c_address(device_name) {
            Some((adapter, addr)) => (BusType::I2c(adapter), addr),
            None => (BusType::Unknown, 0),
        },
        "spi" => (BusType::Spi, trailing_number(device_name)),
        "acpi" => (BusType::Acpi, 0),
        "hid" => (BusType::Hid, 0),
        "mdio_bus" => (BusType::Mdio, 0),
        "scsi" => (BusType::Scsi, 0),
        "" => (BusType::Virtual, 0),
        other => {
            debug!("Unknown bus {} for {}", other, dir.display());
            (BusType::Unknown, 0)
        }
    }
}

/// `0000:00:18.3` -> (domain << 16) + (bus << 8) + (slot << 3) + function
fn parse_pci_address(name: &str) -> Option<u32> {
    let (domain, rest) = name.split_once(':')?;
    let (bus, rest) = rest.split_once(':')?;
    let (slot, function) = rest.split_once('.')?;
    let domain = u32::from_str_radix(domain, 16).ok()?;
    let bus = u32::from_str_radix(bus, 16).ok()?;
    let slot = u32::from_str_radix(slot, 16).ok()?;
    let function = u32::from_str_radix(function, 16).ok()?;
    Some((domain << 16) + (bus << 8) + (slot << 3) + function)
}

/// `1-0048` -> (1, 0x48)
fn parse_i2c_address(name: &str) -> Option<(u16, u32)> {
    let (adapter, addr) = name.split_once('-')?;
    Some((adapter.parse().ok()?, u32::from_str_radix(addr, 16).ok()?))
}

/// `it87.2608` -> 2608, anything unparsable -> 0
fn trailing_number(name: &str) -> u32 {
    name.rsplit_once('.')
        .and_then(|(_, n)| n.parse().ok())
        .unwrap_or(0)
}
