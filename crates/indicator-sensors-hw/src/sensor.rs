//! Base sensor abstraction.
//!
//! Every sensor has an immutable identity (`family` and `id`, joined into a
//! path such as `libsensors/coretemp-isa-0000/1`), a cached value and a list
//! of observers. Observers are called synchronously whenever the value
//! changes or a read fails.

use crate::{Error, Result};
use serde::Serialize;
use std::fmt;
use std::sync::mpsc::{channel, Receiver};

/// Value stored by sensors without a real backing device.
pub const PLACEHOLDER_VALUE: f64 = -1.0;

/// Notification delivered to sensor observers.
#[derive(Debug, Clone, PartialEq)]
pub enum SensorEvent {
    /// The cached value changed to the contained reading.
    ValueChanged(f64),
    /// Reading the sensor failed; the value was left unchanged.
    Error(String),
}

/// Handle returned by [`SensorCore::connect`], used to disconnect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

type Handler = Box<dyn FnMut(&SensorEvent) + Send>;

/// Category of a sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SensorKind {
    /// Voltage and anything else without a dedicated type.
    Generic,
    /// Temperature in a configurable scale.
    Temperature,
    /// Fan speed.
    Fan,
}

impl fmt::Display for SensorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensorKind::Generic => write!(f, "generic"),
            SensorKind::Temperature => write!(f, "temperature"),
            SensorKind::Fan => write!(f, "fan"),
        }
    }
}

/// Something that can produce a raw reading for a sensor path.
pub trait ReadingSource {
    /// Reads the current raw value for the sensor at `path`.
    fn read(&self, path: &str) -> Result<f64>;
}

/// Identity, value and observers shared by all sensor types.
pub struct SensorCore {
    family: String,
    id: String,
    value: f64,
    last_error: Option<String>,
    handlers: Vec<(HandlerId, Handler)>,
    next_handler: u64,
}

impl SensorCore {
    /// Creates a new sensor core with a value of 0.0.
    pub fn new(family: impl Into<String>, id: impl Into<String>) -> Result<Self> {
        let family = family.into();
        let id = id.into();
        if family.is_empty() {
            return Err(Error::InvalidIdentity { field: "family" });
        }
        if id.is_empty() {
            return Err(Error::InvalidIdentity { field: "id" });
        }
        Ok(Self {
            family,
            id,
            value: 0.0,
            last_error: None,
            handlers: Vec::new(),
            next_handler: 0,
        })
    }

    /// Returns the sensor family.
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Returns the sensor id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the identity path (`family/id`).
    pub fn path(&self) -> String {
        format!("{}/{}", self.family, self.id)
    }

    /// Returns the cached value.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Stores a new value, notifying observers only if it differs.
    pub fn set_value(&mut self, value: f64) {
        if self.value != value {
            self.value = value;
            self.emit(&SensorEvent::ValueChanged(value));
        }
    }

    /// Returns the message of the most recent failed read, if any.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Records a failed read and notifies observers.
    pub fn emit_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        self.last_error = Some(message.clone());
        self.emit(&SensorEvent::Error(message));
    }

    pub(crate) fn clear_error(&mut self) {
        self.last_error = None;
    }

    /// Registers an observer.
    pub fn connect<F>(&mut self, handler: F) -> HandlerId
    where
        F: FnMut(&SensorEvent) + Send + 'static,
    {
        let id = HandlerId(self.next_handler);
        self.next_handler += 1;
        self.handlers.push((id, Box::new(handler)));
        id
    }

    /// Removes an observer. Returns false if it was not connected.
    pub fn disconnect(&mut self, id: HandlerId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(handler_id, _)| *handler_id != id);
        self.handlers.len() != before
    }

    /// Returns a channel receiving every subsequent event.
    pub fn subscribe(&mut self) -> Receiver<SensorEvent> {
        let (tx, rx) = channel();
        self.connect(move |event| {
            // Receiver may have been dropped; nothing to do then.
            let _ = tx.send(event.clone());
        });
        rx
    }

    fn emit(&mut self, event: &SensorEvent) {
        for (_, handler) in self.handlers.iter_mut() {
            handler(event);
        }
    }
}

impl fmt::Debug for SensorCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SensorCore")
            .field("family", &self.family)
            .field("id", &self.id)
            .field("value", &self.value)
            .field("last_error", &self.last_error)
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

/// Trait for all sensors.
///
/// Implementors only provide access to their [`SensorCore`] and a kind;
/// everything else has a default. `update` defaults to storing
/// [`PLACEHOLDER_VALUE`] and must be overridden by sensors backed by real
/// hardware.
pub trait Sensor: Send {
    /// Returns the shared sensor state.
    fn core(&self) -> &SensorCore;

    /// Returns the shared sensor state mutably.
    fn core_mut(&mut self) -> &mut SensorCore;

    /// Returns the sensor category.
    fn kind(&self) -> SensorKind;

    /// Fetches a fresh reading.
    ///
    /// Emits at most one event: a value change, or an error. Only errors
    /// that are not [recoverable](Error::is_recoverable) are returned.
    fn update(&mut self, source: &dyn ReadingSource) -> Result<()> {
        let _ = source;
        self.core_mut().set_value(PLACEHOLDER_VALUE);
        Ok(())
    }

    /// Returns the source family, e.g. `libsensors`.
    fn family(&self) -> &str {
        self.core().family()
    }

    /// Returns the identifier within the family.
    fn id(&self) -> &str {
        self.core().id()
    }

    /// Returns `family/id`.
    fn path(&self) -> String {
        self.core().path()
    }

    /// Returns the current value.
    fn value(&self) -> f64 {
        self.core().value()
    }

    /// Stores a value, notifying observers if it changed.
    fn set_value(&mut self, value: f64) {
        self.core_mut().set_value(value);
    }

    /// Returns the display name.
    fn label(&self) -> &str {
        self.core().id()
    }

    /// Returns the lower alarm bound.
    fn low(&self) -> f64 {
        f64::NEG_INFINITY
    }

    /// Returns the upper alarm bound.
    fn high(&self) -> f64 {
        f64::INFINITY
    }

    /// Returns the unit of measurement.
    fn units(&self) -> &str {
        ""
    }

    /// Returns the number of decimal places used for display.
    fn digits(&self) -> usize {
        0
    }

    /// Returns true if the value lies outside the low/high bounds.
    fn in_alarm(&self) -> bool {
        let value = self.value();
        value < self.low() || value > self.high()
    }

    /// Formats the value with the sensor's precision and units.
    fn display_value(&self) -> String {
        let units = self.units();
        if units.is_empty() {
            format!("{:.*}", self.digits(), self.value())
        } else {
            format!("{:.*} {}", self.digits(), self.value(), units)
        }
    }
}

/// Sensor without any backing hardware.
#[derive(Debug)]
pub struct BasicSensor {
    core: SensorCore,
}

impl BasicSensor {
    /// Creates a new placeholder sensor.
    pub fn new(family: impl Into<String>, id: impl Into<String>) -> Result<Self> {
        Ok(Self {
            core: SensorCore::new(family, id)?,
        })
    }
}

impl Sensor for BasicSensor {
    fn core(&self) -> &SensorCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut SensorCore {
        &mut self.core
    }

    fn kind(&self) -> SensorKind {
        SensorKind::Generic
    }
}
