//! Sensor polling.

use anyhow::{Context, Result};
use indicator_sensors_hw::{
    LibsensorsPlugin, Manager, Sensor, SensorEvent, SensorsLibrary, TemperatureScale,
};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Minimum interval between repeated read error logs for one sensor.
const ERROR_LOG_INTERVAL: Duration = Duration::from_secs(60);

/// Discovered sensors together with the plugin that reads them.
pub struct Monitor<L> {
    manager: Manager,
    plugin: LibsensorsPlugin<L>,
}

impl<L: SensorsLibrary> Monitor<L> {
    /// Discovers sensors on `library` and registers them.
    pub fn new(library: L, scale: TemperatureScale) -> Self {
        let mut manager = Manager::new();
        let mut plugin = LibsensorsPlugin::new(library).with_scale(scale);
        plugin.activate(&mut manager);
        Self { manager, plugin }
    }

    /// Logs value changes and read errors of every sensor.
    pub fn watch(&mut self) {
        for sensor in self.manager.iter_mut() {
            let path = sensor.path();
            let mut errors: u32 = 0;
            let mut last_error_log: Option<Instant> = None;
            sensor.core_mut().connect(move |event| match event {
                SensorEvent::ValueChanged(value) => {
                    if errors > 0 {
                        info!("{} recovered after {} errors", path, errors);
                        errors = 0;
                        last_error_log = None;
                    }
                    debug!("{} = {}", path, value);
                }
                SensorEvent::Error(message) => {
                    errors += 1;
                    if last_error_log.map_or(true, |at| at.elapsed() >= ERROR_LOG_INTERVAL) {
                        if errors > 1 {
                            warn!("{} (repeated {} times)", message, errors);
                        } else {
                            warn!("{}", message);
                        }
                        last_error_log = Some(Instant::now());
                    }
                }
            });
        }
    }

    /// Updates every sensor once.
    pub fn poll(&mut self) -> Result<()> {
        self.manager
            .update_all(&self.plugin)
            .context("Sensor update failed")
    }

    /// Polls every `interval` until `shutdown` resolves.
    pub async fn run<F>(&mut self, interval: Duration, shutdown: F) -> Result<()>
    where
        F: std::future::Future<Output = ()>,
    {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = ticker.tick() => self.poll()?,
                _ = &mut shutdown => return Ok(()),
            }
        }
    }

    /// Returns the registered sensors.
    pub fn manager(&self) -> &Manager {
        &self.manager
    }

    /// Deregisters every discovered sensor.
    pub fn shutdown(mut self) {
        self.plugin.deactivate(&mut self.manager);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indicator_sensors_hw::{SensorKind, SysfsLibrary};
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn chip(root: &Path) {
        let dir = root.join("hwmon0");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("name"), "acpitz\n").unwrap();
        fs::write(dir.join("temp1_input"), "45000\n").unwrap();
        fs::write(dir.join("fan1_input"), "1200\n").unwrap();
    }

    fn monitor(root: &Path) -> Monitor<SysfsLibrary> {
        Monitor::new(SysfsLibrary::scan(root).unwrap(), TemperatureScale::Celsius)
    }

    #[test]
    fn test_discovery_and_poll() {
        let dir = TempDir::new().unwrap();
        chip(dir.path());
        let mut monitor = monitor(dir.path());
        assert_eq!(monitor.manager().len(), 2);

        monitor.watch();
        monitor.poll().unwrap();
        let temperature = monitor
            .manager()
            .iter()
            .find(|s| s.kind() == SensorKind::Temperature)
            .unwrap();
        assert_eq!(temperature.value(), 45.0);
        assert!(temperature.path().starts_with("libsensors/acpitz-virtual-0/"));
    }

    #[test]
    fn test_read_failure_is_not_fatal() {
        let dir = TempDir::new().unwrap();
        chip(dir.path());
        let mut monitor = monitor(dir.path());
        fs::write(dir.path().join("hwmon0/fan1_input"), "garbage\n").unwrap();

        monitor.poll().unwrap();
        let fan = monitor
            .manager()
            .iter()
            .find(|s| s.kind() == SensorKind::Fan)
            .unwrap();
        assert_eq!(fan.value(), 0.0);
        assert!(fan.core().last_error().is_some());
    }

    #[test]
    fn test_shutdown_deregisters() {
        let dir = TempDir::new().unwrap();
        chip(dir.path());
        let mut monitor = monitor(dir.path());
        monitor.plugin.deactivate(&mut monitor.manager);
        assert!(monitor.manager().is_empty());
        assert_eq!(monitor.plugin.bound(), 0);
    }

    #[tokio::test]
    async fn test_run_stops_on_shutdown() {
        let dir = TempDir::new().unwrap();
        chip(dir.path());
        let mut monitor = monitor(dir.path());
        monitor
            .run(Duration::from_millis(10), async {
                tokio::time::sleep(Duration::from_millis(50)).await;
            })
            .await
            .unwrap();
        let temperature = monitor
            .manager()
            .iter()
            .find(|s| s.kind() == SensorKind::Temperature)
            .unwrap();
        assert_eq!(temperature.value(), 45.0);
    }
}
