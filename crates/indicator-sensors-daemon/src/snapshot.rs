//! Point-in-time sensor listing for the `list` command.

use indicator_sensors_hw::{Manager, Sensor, SensorKind};
use serde::Serialize;
use std::fmt::Write;

/// Serializable view of one sensor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorSnapshot {
    pub path: String,
    pub label: String,
    pub kind: SensorKind,
    pub value: f64,
    pub units: String,
    pub display: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high: Option<f64>,
    pub alarm: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SensorSnapshot {
    pub fn new(sensor: &dyn Sensor) -> Self {
        Self {
            path: sensor.path(),
            label: sensor.label().to_string(),
            kind: sensor.kind(),
            value: sensor.value(),
            units: sensor.units().to_string(),
            display: sensor.display_value(),
            // JSON has no infinities
            low: Some(sensor.low()).filter(|v| v.is_finite()),
            high: Some(sensor.high()).filter(|v| v.is_finite()),
            alarm: sensor.in_alarm(),
            error: sensor.core().last_error().map(str::to_string),
        }
    }
}

/// Snapshots every registered sensor in registration order.
pub fn collect(manager: &Manager) -> Vec<SensorSnapshot> {
    manager.iter().map(|s| SensorSnapshot::new(s)).collect()
}

/// Renders snapshots as an aligned text table.
pub fn table(snapshots: &[SensorSnapshot]) -> String {
    let label_width = snapshots
        .iter()
        .map(|s| s.label.chars().count())
        .max()
        .unwrap_or(0)
        .max("LABEL".len());
    let value_width = snapshots
        .iter()
        .map(|s| s.display.chars().count())
        .max()
        .unwrap_or(0)
        .max("VALUE".len());

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<label_width$}  {:>value_width$}  {:<11}  PATH",
        "LABEL", "VALUE", "TYPE"
    );
    for s in snapshots {
        let mut status = String::new();
        if s.alarm {
            status.push_str("  ALARM");
        }
        if let Some(error) = &s.error {
            let _ = write!(status, "  ({})", error);
        }
        let _ = writeln!(
            out,
            "{:<label_width$}  {:>value_width$}  {:<11}  {}{}",
            s.label,
            s.display,
            s.kind.to_string(),
            s.path,
            status
        );
    }
    out
}
