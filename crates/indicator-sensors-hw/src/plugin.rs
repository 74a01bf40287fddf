//! lm-sensors style discovery.
//!
//! Walks every detected chip and feature of a [`SensorsLibrary`], creates a
//! sensor for each usable temperature, fan and voltage feature and registers
//! it with a [`Manager`]. The plugin keeps the binding from sensor path to
//! chip handle and answers reads for its sensors.

use crate::chip::{ChipName, Feature, FeatureKind, SensorsLibrary, SubfeatureKind};
use crate::manager::Manager;
use crate::sensor::{ReadingSource, Sensor};
use crate::sensors::{Bounds, FanSensor, GenericSensor, TemperatureScale, TemperatureSensor};
use crate::{Error, Result};
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Family of every sensor created by the plugin.
pub const FAMILY: &str = "libsensors";

/// Which sub-features of a feature category are used as input and bounds.
///
/// Bounds are `(alarm, limit)` pairs in order of preference. The first pair
/// whose alarm the chip provides is selected and its limit is read as the
/// threshold; alarm files themselves only hold 0/1 flags.
struct Selection {
    input: SubfeatureKind,
    low: &'static [(SubfeatureKind, SubfeatureKind)],
    high: &'static [(SubfeatureKind, SubfeatureKind)],
    defaults: Bounds,
}

fn select_subfeatures(kind: FeatureKind) -> Option<Selection> {
    use crate::chip::SubfeatureKind::*;

    match kind {
        FeatureKind::In => Some(Selection {
            input: InInput,
            low: &[(InMinAlarm, InMin)],
            high: &[(InMaxAlarm, InMax)],
            defaults: Bounds::UNBOUNDED,
        }),
        FeatureKind::Fan => Some(Selection {
            input: FanInput,
            low: &[(FanAlarm, FanMin)],
            // no fan max feature
            high: &[],
            defaults: FanSensor::DEFAULT_BOUNDS,
        }),
        FeatureKind::Temp => Some(Selection {
            input: TempInput,
            low: &[(TempMinAlarm, TempMin)],
            high: &[(TempMaxAlarm, TempMax), (TempCritAlarm, TempCrit)],
            defaults: Bounds::UNBOUNDED,
        }),
        FeatureKind::Power
        | FeatureKind::Energy
        | FeatureKind::Curr
        | FeatureKind::Vid
        | FeatureKind::BeepEnable
        | FeatureKind::Unknown => None,
    }
}

/// Parses the feature number from the last component of a sensor path.
pub fn feature_number(path: &str) -> Result<u32> {
    path.rsplit_once('/')
        .and_then(|(_, number)| number.parse().ok())
        .ok_or_else(|| Error::InvalidPath(path.to_string()))
}

/// Sensor discovery and reading on top of a sensors library.
pub struct LibsensorsPlugin<L> {
    library: L,
    scale: TemperatureScale,
    bindings: HashMap<String, ChipName>,
}

impl<L: SensorsLibrary> LibsensorsPlugin<L> {
    /// Creates a plugin over `library`. Nothing is discovered until
    /// [`activate`](Self::activate).
    pub fn new(library: L) -> Self {
        Self {
            library,
            scale: TemperatureScale::Celsius,
            bindings: HashMap::new(),
        }
    }

    /// Sets the scale of temperature sensors created from now on.
    pub fn with_scale(mut self, scale: TemperatureScale) -> Self {
        self.scale = scale;
        self
    }

    /// Returns the underlying library.
    pub fn library(&self) -> &L {
        &self.library
    }

    /// Returns the chip bound to a sensor path.
    pub fn binding(&self, path: &str) -> Option<&ChipName> {
        self.bindings.get(path)
    }

    /// Returns the number of bound sensors.
    pub fn bound(&self) -> usize {
        self.bindings.len()
    }

    /// Discovers sensors on every detected chip and adds them to `manager`.
    /// Returns the number of sensors added.
    pub fn activate(&mut self, manager: &mut Manager) -> usize {
        debug!("Searching for sensors");
        let mut added = 0;
        for chip in self.library.detected_chips() {
            added += self.process_chip(&chip, manager);
        }
        info!("Discovered {} sensors", added);
        added
    }

    /// Removes every sensor this plugin registered and drops the bindings.
    /// Returns the number of sensors removed.
    pub fn deactivate(&mut self, manager: &mut Manager) -> usize {
        let mut removed = 0;
        for (path, _) in self.bindings.drain() {
            if manager.remove_sensor(&path).is_some() {
                removed += 1;
            }
        }
        info!("Removed {} sensors", removed);
        removed
    }

    fn process_chip(&mut self, chip: &ChipName, manager: &mut Manager) -> usize {
        let Some(chip_name) = self.library.chip_name_string(chip) else {
            warn!(
                "Error getting name string for chip at {}",
                chip.path.display()
            );
            return 0;
        };

        let mut added = 0;
        for feature in self.library.features(chip) {
            let Some(sensor) = self.create_sensor(chip, &chip_name, &feature) else {
                continue;
            };
            let path = sensor.path();
            match manager.add_sensor(sensor) {
                Ok(()) => {
                    self.bindings.insert(path, chip.clone());
                    added += 1;
                }
                Err(e) => warn!("Cannot register sensor: {}", e),
            }
        }
        added
    }

    /// Builds the sensor for one feature, or None if the feature is
    /// unsupported or incomplete.
    fn create_sensor(
        &self,
        chip: &ChipName,
        chip_name: &str,
        feature: &Feature,
    ) -> Option<Box<dyn Sensor>> {
        let Some(selection) = select_subfeatures(feature.kind) else {
            debug!(
                "Ignoring unimplemented sensor type {:?} ({} on {})",
                feature.kind, feature.name, chip_name
            );
            return None;
        };

        let Some(input) = self.library.subfeature(chip, feature, selection.input) else {
            warn!(
                "Could not get input subfeature for sensor '{}' ({})",
                chip_name, feature.name
            );
            return None;
        };

        // label can have leading / trailing whitespace
        let label = match self.library.label(chip, feature) {
            Some(label) if !label.trim().is_empty() => label.trim().to_string(),
            _ => {
                warn!(
                    "Could not get label for sensor '{}' ({})",
                    chip_name, feature.name
                );
                return None;
            }
        };

        let bounds = Bounds::new(
            self.read_bound(chip, feature, selection.low)
                .unwrap_or(selection.defaults.low),
            self.read_bound(chip, feature, selection.high)
                .unwrap_or(selection.defaults.high),
        );

        if let Err(e) = self.library.value(chip, input.number) {
            warn!(
                "Could not get value for input feature of sensor '{}' ({}): {}",
                chip_name, feature.name, e
            );
            return None;
        }

        let id = format!("{}/{}", chip_name, input.number);
        let sensor: Result<Box<dyn Sensor>> = match feature.kind {
            FeatureKind::Temp => TemperatureSensor::new(FAMILY, id, label, bounds)
                .map(|s| Box::new(s.with_scale(self.scale)) as Box<dyn Sensor>),
            FeatureKind::Fan => {
                FanSensor::new(FAMILY, id, label, bounds).map(|s| Box::new(s) as Box<dyn Sensor>)
            }
            _ => GenericSensor::new(FAMILY, id, label, bounds, "V", 2)
                .map(|s| Box::new(s) as Box<dyn Sensor>),
        };

        match sensor {
            Ok(sensor) => Some(sensor),
            Err(e) => {
                warn!("Cannot create sensor for '{}': {}", chip_name, e);
                None
            }
        }
    }

    /// Reads the limit paired with the first alarm the feature provides.
    fn read_bound(
        &self,
        chip: &ChipName,
        feature: &Feature,
        candidates: &[(SubfeatureKind, SubfeatureKind)],
    ) -> Option<f64> {
        let (_, limit) = candidates
            .iter()
            .find(|(alarm, _)| self.library.subfeature(chip, feature, *alarm).is_some())?;
        let limit = self.library.subfeature(chip, feature, *limit)?;
        self.library.value(chip, limit.number).ok()
    }
}

impl<L: SensorsLibrary> ReadingSource for LibsensorsPlugin<L> {
    fn read(&self, path: &str) -> Result<f64> {
        let chip = self
            .bindings
            .get(path)
            .ok_or_else(|| Error::UnboundSensor(path.to_string()))?;
        let number = feature_number(path)?;
        self.library
            .value(chip, number)
            .map_err(|e| Error::Read {
                path: path.to_string(),
                message: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chip::{BusType, Subfeature};
    use crate::sensor::{BasicSensor, SensorEvent, SensorKind};
    use std::cell::RefCell;
    use std::path::PathBuf;
    use crate::chip::SubfeatureKind::*;

    type Reading = std::result::Result<f64, String>;

    /// In-memory sensors library.
    #[derive(Default)]
    struct FakeLibrary {
        chips: Vec<ChipName>,
        features: Vec<(ChipName, Feature, Option<String>, Vec<Subfeature>)>,
        values: RefCell<HashMap<(PathBuf, u32), Reading>>,
        next_subfeature: u32,
    }

    impl FakeLibrary {
        fn add_chip(&mut self, prefix: &str, bus: BusType) -> ChipName {
            let chip = ChipName {
                prefix: prefix.to_string(),
                bus,
                addr: 0,
                path: PathBuf::from(format!("/fake/{}", self.chips.len())),
            };
            self.chips.push(chip.clone());
            chip
        }

        /// Adds a feature; returns the sub-feature numbers in order.
        fn add_feature(
            &mut self,
            chip: &ChipName,
            kind: FeatureKind,
            label: Option<&str>,
            subfeatures: &[(SubfeatureKind, Reading)],
        ) -> Vec<u32> {
            let number = self.features.iter().filter(|f| f.0 == *chip).count() as u32;
            let feature = Feature {
                name: format!("{:?}{}", kind, number).to_lowercase(),
                number,
                kind,
            };
            let mut subs = Vec::new();
            for (sub_kind, reading) in subfeatures {
                let number = self.next_subfeature;
                self.next_subfeature += 1;
                subs.push(Subfeature {
                    name: format!("{}_{:?}", feature.name, sub_kind),
                    number,
                    kind: *sub_kind,
                });
                self.set(chip, number, reading.clone());
            }
            let numbers = subs.iter().map(|s| s.number).collect();
            self.features
                .push((chip.clone(), feature, label.map(str::to_string), subs));
            numbers
        }

        fn set(&self, chip: &ChipName, number: u32, reading: Reading) {
            self.values
                .borrow_mut()
                .insert((chip.path.clone(), number), reading);
        }
    }

    impl SensorsLibrary for FakeLibrary {
        fn detected_chips(&self) -> Vec<ChipName> {
            self.chips.clone()
        }

        fn features(&self, chip: &ChipName) -> Vec<Feature> {
            self.features
                .iter()
                .filter(|f| f.0 == *chip)
                .map(|f| f.1.clone())
                .collect()
        }

        fn subfeature(
            &self,
            chip: &ChipName,
            feature: &Feature,
            kind: SubfeatureKind,
        ) -> Option<Subfeature> {
            self.features
                .iter()
                .find(|f| f.0 == *chip && f.1 == *feature)?
                .3
                .iter()
                .find(|s| s.kind == kind)
                .cloned()
        }

        fn label(&self, chip: &ChipName, feature: &Feature) -> Option<String> {
            self.features
                .iter()
                .find(|f| f.0 == *chip && f.1 == *feature)?
                .2
                .clone()
        }

        fn value(&self, chip: &ChipName, number: u32) -> Result<f64> {
            match self.values.borrow().get(&(chip.path.clone(), number)) {
                Some(Ok(value)) => Ok(*value),
                Some(Err(message)) => Err(Error::Io(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    message.clone(),
                ))),
                None => Err(Error::NoSuchSubfeature {
                    chip: chip.to_string(),
                    number,
                }),
            }
        }
    }

    fn activate(library: FakeLibrary) -> (LibsensorsPlugin<FakeLibrary>, Manager) {
        let mut plugin = LibsensorsPlugin::new(library);
        let mut manager = Manager::new();
        plugin.activate(&mut manager);
        (plugin, manager)
    }

    #[test]
    fn test_feature_number() {
        assert_eq!(feature_number("libsensors/coretemp-isa-0000/12").unwrap(), 12);
        assert!(matches!(
            feature_number("libsensors/coretemp-isa-0000/x"),
            Err(Error::InvalidPath(_))
        ));
        assert!(matches!(feature_number("nothing"), Err(Error::InvalidPath(_))));
    }

    #[test]
    fn test_temperature_without_alarms_is_unbounded() {
        let mut library = FakeLibrary::default();
        let chip = library.add_chip("coretemp", BusType::Isa);
        library.add_feature(
            &chip,
            FeatureKind::Temp,
            Some("  Core 0 "),
            &[(TempInput, Ok(45.0))],
        );
        let (plugin, manager) = activate(library);

        let sensor = manager.get("libsensors/coretemp-isa-0000/0").unwrap();
        assert_eq!(sensor.kind(), SensorKind::Temperature);
        assert_eq!(sensor.label(), "Core 0");
        assert_eq!(sensor.low(), f64::NEG_INFINITY);
        assert_eq!(sensor.high(), f64::INFINITY);
        assert_eq!(sensor.value(), 0.0);
        assert_eq!(
            plugin.binding("libsensors/coretemp-isa-0000/0"),
            Some(&chip)
        );
    }

    #[test]
    fn test_temperature_high_falls_back_to_crit() {
        let mut library = FakeLibrary::default();
        let chip = library.add_chip("coretemp", BusType::Isa);
        library.add_feature(
            &chip,
            FeatureKind::Temp,
            Some("max"),
            &[
                (TempInput, Ok(45.0)),
                (TempMaxAlarm, Ok(0.0)),
                (TempMax, Ok(80.0)),
                (TempCritAlarm, Ok(0.0)),
                (TempCrit, Ok(100.0)),
                (TempMinAlarm, Ok(0.0)),
                (TempMin, Ok(5.0)),
            ],
        );
        library.add_feature(
            &chip,
            FeatureKind::Temp,
            Some("crit"),
            &[
                (TempInput, Ok(45.0)),
                (TempCritAlarm, Ok(0.0)),
                (TempCrit, Ok(100.0)),
                (TempMax, Ok(70.0)),
            ],
        );
        let (plugin, mut manager) = activate(library);
        manager.update_all(&plugin).unwrap();

        let max = manager.get("libsensors/coretemp-isa-0000/0").unwrap();
        assert_eq!((max.low(), max.high()), (5.0, 80.0));
        assert!(!max.in_alarm());
        let crit = manager.get("libsensors/coretemp-isa-0000/7").unwrap();
        assert_eq!((crit.low(), crit.high()), (f64::NEG_INFINITY, 100.0));
        assert!(!crit.in_alarm());
    }

    #[test]
    fn test_alarm_without_limit_is_unbounded() {
        let mut library = FakeLibrary::default();
        let chip = library.add_chip("coretemp", BusType::Isa);
        library.add_feature(
            &chip,
            FeatureKind::Temp,
            Some("Core 0"),
            &[(TempInput, Ok(45.0)), (TempCritAlarm, Ok(0.0))],
        );
        let (plugin, mut manager) = activate(library);
        manager.update_all(&plugin).unwrap();

        let sensor = manager.iter().next().unwrap();
        assert_eq!(sensor.high(), f64::INFINITY);
        assert!(!sensor.in_alarm());
    }

    #[test]
    fn test_coretemp_hwmon_not_in_alarm() {
        use crate::hwmon::SysfsLibrary;
        use std::fs;

        let tmp = tempfile::TempDir::new().unwrap();
        let dir = tmp.path().join("hwmon0");
        fs::create_dir_all(&dir).unwrap();
        for (name, content) in [
            ("name", "coretemp\n"),
            ("temp1_label", "Core 0\n"),
            ("temp1_input", "45000\n"),
            ("temp1_max", "84000\n"),
            ("temp1_crit", "100000\n"),
            ("temp1_crit_alarm", "0\n"),
        ] {
            fs::write(dir.join(name), content).unwrap();
        }

        let mut plugin = LibsensorsPlugin::new(SysfsLibrary::scan(tmp.path()).unwrap());
        let mut manager = Manager::new();
        assert_eq!(plugin.activate(&mut manager), 1);
        manager.update_all(&plugin).unwrap();

        let sensor = manager.iter().next().unwrap();
        assert_eq!(sensor.label(), "Core 0");
        assert_eq!(sensor.value(), 45.0);
        assert_eq!(sensor.high(), 100.0);
        assert!(!sensor.in_alarm());
    }

    #[test]
    fn test_fan_bounds() {
        let mut library = FakeLibrary::default();
        let chip = library.add_chip("it8728", BusType::Isa);
        library.add_feature(&chip, FeatureKind::Fan, Some("fan1"), &[(FanInput, Ok(1200.0))]);
        library.add_feature(
            &chip,
            FeatureKind::Fan,
            Some("fan2"),
            &[
                (FanInput, Ok(800.0)),
                (FanAlarm, Ok(0.0)),
                (FanMin, Ok(300.0)),
                (FanMax, Ok(5000.0)),
            ],
        );
        let (_plugin, manager) = activate(library);

        let fan1 = manager.get("libsensors/it8728-isa-0000/0").unwrap();
        assert_eq!(fan1.kind(), SensorKind::Fan);
        assert_eq!((fan1.low(), fan1.high()), (0.0, f64::INFINITY));
        let fan2 = manager.get("libsensors/it8728-isa-0000/1").unwrap();
        assert_eq!((fan2.low(), fan2.high()), (300.0, f64::INFINITY));
    }

    #[test]
    fn test_voltage_is_generic() {
        let mut library = FakeLibrary::default();
        let chip = library.add_chip("nct6775", BusType::Isa);
        library.add_feature(
            &chip,
            FeatureKind::In,
            Some("Vcore"),
            &[
                (InInput, Ok(1.1)),
                (InMinAlarm, Ok(0.0)),
                (InMin, Ok(0.9)),
                (InMaxAlarm, Ok(0.0)),
                (InMax, Ok(1.5)),
            ],
        );
        let (_plugin, manager) = activate(library);

        let sensor = manager.iter().next().unwrap();
        assert_eq!(sensor.kind(), SensorKind::Generic);
        assert_eq!(sensor.units(), "V");
        assert_eq!(sensor.digits(), 2);
        assert_eq!((sensor.low(), sensor.high()), (0.9, 1.5));
    }

    #[test]
    fn test_unsupported_categories_skipped() {
        let mut library = FakeLibrary::default();
        let chip = library.add_chip("amdgpu", BusType::Pci);
        library.add_feature(&chip, FeatureKind::Power, Some("PPT"), &[(PowerInput, Ok(20.0))]);
        library.add_feature(&chip, FeatureKind::Curr, Some("curr"), &[(CurrInput, Ok(1.0))]);
        library.add_feature(&chip, FeatureKind::Vid, Some("vid"), &[(Vid, Ok(1.2))]);
        library.add_feature(&chip, FeatureKind::BeepEnable, Some("beep"), &[(BeepEnable, Ok(1.0))]);
        library.add_feature(&chip, FeatureKind::Unknown, Some("?"), &[]);
        library.add_feature(&chip, FeatureKind::Temp, Some("edge"), &[(TempInput, Ok(50.0))]);
        let (plugin, manager) = activate(library);

        assert_eq!(manager.len(), 1);
        assert_eq!(plugin.bound(), 1);
        assert_eq!(manager.iter().next().unwrap().label(), "edge");
    }

    #[test]
    fn test_bad_features_do_not_abort_discovery() {
        let mut library = FakeLibrary::default();
        let chip = library.add_chip("coretemp", BusType::Isa);
        library.add_feature(&chip, FeatureKind::Temp, None, &[(TempInput, Ok(40.0))]);
        library.add_feature(&chip, FeatureKind::Temp, Some("   "), &[(TempInput, Ok(40.0))]);
        library.add_feature(&chip, FeatureKind::Temp, Some("no input"), &[(TempMaxAlarm, Ok(1.0))]);
        library.add_feature(
            &chip,
            FeatureKind::Temp,
            Some("unreadable"),
            &[(TempInput, Err("Kernel interface error".into()))],
        );
        library.add_feature(&chip, FeatureKind::Temp, Some("Core 1"), &[(TempInput, Ok(41.0))]);
        let (_plugin, manager) = activate(library);

        assert_eq!(manager.len(), 1);
        assert_eq!(manager.iter().next().unwrap().label(), "Core 1");
    }

    #[test]
    fn test_unnamed_chip_skipped() {
        let mut library = FakeLibrary::default();
        let bad = library.add_chip("mystery", BusType::Unknown);
        library.add_feature(&bad, FeatureKind::Temp, Some("t"), &[(TempInput, Ok(1.0))]);
        let good = library.add_chip("acpitz", BusType::Acpi);
        library.add_feature(&good, FeatureKind::Temp, Some("t"), &[(TempInput, Ok(1.0))]);
        let (_plugin, manager) = activate(library);

        assert_eq!(manager.len(), 1);
        assert!(manager.contains("libsensors/acpitz-acpi-0/1"));
    }

    #[test]
    fn test_update_reads_through_binding() {
        let mut library = FakeLibrary::default();
        let chip = library.add_chip("coretemp", BusType::Isa);
        let numbers =
            library.add_feature(&chip, FeatureKind::Temp, Some("Core 0"), &[(TempInput, Ok(45.0))]);
        let (plugin, mut manager) = activate(library);
        let path = "libsensors/coretemp-isa-0000/0";
        let rx = manager.get_mut(path).unwrap().core_mut().subscribe();

        manager.update_all(&plugin).unwrap();
        assert_eq!(manager.get(path).unwrap().value(), 45.0);

        plugin.library().set(&chip, numbers[0], Ok(47.5));
        manager.update_all(&plugin).unwrap();
        assert_eq!(
            rx.try_iter().collect::<Vec<_>>(),
            vec![SensorEvent::ValueChanged(45.0), SensorEvent::ValueChanged(47.5)]
        );
    }

    #[test]
    fn test_read_failure_emits_one_error() {
        let mut library = FakeLibrary::default();
        let chip = library.add_chip("coretemp", BusType::Isa);
        let numbers =
            library.add_feature(&chip, FeatureKind::Temp, Some("Core 0"), &[(TempInput, Ok(45.0))]);
        library.add_feature(&chip, FeatureKind::Temp, Some("Core 1"), &[(TempInput, Ok(46.0))]);
        let (plugin, mut manager) = activate(library);
        manager.update_all(&plugin).unwrap();

        let path = "libsensors/coretemp-isa-0000/0";
        let rx = manager.get_mut(path).unwrap().core_mut().subscribe();
        plugin
            .library()
            .set(&chip, numbers[0], Err("Kernel interface error".into()));
        plugin.library().set(&chip, 1, Ok(48.0));
        manager.update_all(&plugin).unwrap();

        let events: Vec<_> = rx.try_iter().collect();
        assert_eq!(events.len(), 1);
        match &events[0] {
            SensorEvent::Error(message) => {
                assert!(!message.is_empty());
                assert!(message.contains(path));
                assert!(message.contains("Kernel interface error"));
            }
            other => panic!("unexpected event {:?}", other),
        }
        assert_eq!(manager.get(path).unwrap().value(), 45.0);
        assert_eq!(
            manager.get("libsensors/coretemp-isa-0000/1").unwrap().value(),
            48.0
        );
    }

    #[test]
    fn test_read_unbound() {
        let plugin = LibsensorsPlugin::new(FakeLibrary::default());
        assert!(matches!(
            plugin.read("libsensors/coretemp-isa-0000/0"),
            Err(Error::UnboundSensor(_))
        ));
    }

    #[test]
    fn test_fahrenheit_scale() {
        let mut library = FakeLibrary::default();
        let chip = library.add_chip("coretemp", BusType::Isa);
        library.add_feature(
            &chip,
            FeatureKind::Temp,
            Some("Core 0"),
            &[
                (TempInput, Ok(100.0)),
                (TempMaxAlarm, Ok(0.0)),
                (TempMax, Ok(100.0)),
            ],
        );
        let mut plugin = LibsensorsPlugin::new(library).with_scale(TemperatureScale::Fahrenheit);
        let mut manager = Manager::new();
        plugin.activate(&mut manager);
        manager.update_all(&plugin).unwrap();

        let sensor = manager.iter().next().unwrap();
        assert_eq!(sensor.units(), "°F");
        assert_eq!(sensor.high(), 212.0);
        assert_eq!(sensor.value(), 212.0);
        assert!(!sensor.in_alarm());
    }

    #[test]
    fn test_deactivate_removes_own_sensors() {
        let mut library = FakeLibrary::default();
        let chip = library.add_chip("coretemp", BusType::Isa);
        library.add_feature(&chip, FeatureKind::Temp, Some("Core 0"), &[(TempInput, Ok(45.0))]);
        library.add_feature(&chip, FeatureKind::Fan, Some("fan1"), &[(FanInput, Ok(900.0))]);
        let mut plugin = LibsensorsPlugin::new(library);
        let mut manager = Manager::new();
        manager
            .add_sensor(Box::new(BasicSensor::new("dummy", "a").unwrap()))
            .unwrap();
        assert_eq!(plugin.activate(&mut manager), 2);

        assert_eq!(plugin.deactivate(&mut manager), 2);
        assert_eq!(plugin.bound(), 0);
        assert_eq!(manager.len(), 1);
        assert!(manager.contains("dummy/a"));
    }
}
