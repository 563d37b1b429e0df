//! Typed schema of the device status document.
//!
//! Only `data.all` is required. Everything below it falls back to a
//! default when missing or `null`: strings become `""`, lists become empty
//! and status codes become `0` (not connected).
//!
//! Sensor entries are decoded one by one, so a single garbled entry only
//! degrades itself. Fields holding an object or array are defaulted, and
//! entries that are not objects are dropped. Both are reported as
//! [`MappingDefect`]s on the owning [`DeviceBlock`].

use serde_derive::Deserialize;
use serde_json::{Map, Value};

use crate::error::{FetchError, MappingDefect};

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct DeviceSnapshot {
    pub data: SnapshotData,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct SnapshotData {
    pub all: Vec<DeviceBlock>,
}

/// One monitored appliance.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(from = "RawDeviceBlock")]
pub struct DeviceBlock {
    pub device: DeviceInfo,
    pub network: NetworkInfo,
    /// Internal sensors
    pub isens: Vec<SensorReading>,
    /// External sensors
    pub esens: Vec<SensorReading>,
    /// Digital inputs
    pub diginp: Vec<SensorReading>,
    /// Power supply channels
    pub power: Vec<PowerChannel>,
    /// Entries of this block that did not have the expected shape
    pub defects: Vec<MappingDefect>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeviceInfo {
    pub model: String,
    pub uptime: String,
    pub firmware: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NetworkInfo {
    pub addr: String,
}

/// Internal/external sensor or digital input entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SensorReading {
    pub desc: String,
    /// Raw reading, possibly with an embedded unit ("22.3 C", "Open")
    pub val: String,
    pub status: i64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PowerChannel {
    pub idx: String,
    pub desc: String,
    pub val: String,
    pub status: i64,
}

impl DeviceSnapshot {
    /// Decodes a response body into a snapshot.
    pub fn from_json(body: &str) -> Result<Self, FetchError> {
        serde_json::from_str(body).map_err(FetchError::malformed)
    }

    pub fn devices(&self) -> &[DeviceBlock] {
        &self.data.all
    }
}

/// Wire form of a device block, before per-entry decoding.
#[derive(Deserialize)]
struct RawDeviceBlock {
    #[serde(default)]
    device: Value,
    #[serde(default)]
    network: Value,
    #[serde(default)]
    isens: Value,
    #[serde(default)]
    esens: Value,
    #[serde(default)]
    diginp: Value,
    #[serde(default)]
    power: Value,
}

impl From<RawDeviceBlock> for DeviceBlock {
    fn from(raw: RawDeviceBlock) -> Self {
        let mut defects = Vec::new();

        let device = read_section("device", &raw.device, &mut defects, |fields| DeviceInfo {
            model: fields.text("model"),
            uptime: fields.text("uptime"),
            firmware: fields.text("firmware"),
        });
        let network = read_section("network", &raw.network, &mut defects, |fields| NetworkInfo {
            addr: fields.text("addr"),
        });
        let isens = read_category("isens", &raw.isens, &mut defects, read_sensor);
        let esens = read_category("esens", &raw.esens, &mut defects, read_sensor);
        let diginp = read_category("diginp", &raw.diginp, &mut defects, read_sensor);
        let power = read_category("power", &raw.power, &mut defects, |fields| PowerChannel {
            idx: fields.text("idx"),
            desc: fields.text("desc"),
            val: fields.text("val"),
            status: fields.status("status"),
        });

        Self {
            device,
            network,
            isens,
            esens,
            diginp,
            power,
            defects,
        }
    }
}

fn read_sensor(fields: &mut Fields<'_>) -> SensorReading {
    SensorReading {
        desc: fields.text("desc"),
        val: fields.text("val"),
        status: fields.status("status"),
    }
}

/// Scalar field access on one JSON object, remembering whether any field
/// had to be defaulted because it held an object or array.
struct Fields<'a> {
    object: &'a Map<String, Value>,
    garbled: bool,
}

impl<'a> Fields<'a> {
    fn new(object: &'a Map<String, Value>) -> Self {
        Self {
            object,
            garbled: false,
        }
    }

    /// Text form of a string, number or bool field.
    fn text(&mut self, key: &str) -> String {
        match self.object.get(key) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(text)) => text.clone(),
            Some(Value::Number(number)) => number.to_string(),
            Some(Value::Bool(flag)) => flag.to_string(),
            Some(Value::Array(_) | Value::Object(_)) => {
                self.garbled = true;
                String::new()
            }
        }
    }

    /// A numeric status code, or a string holding one. Other scalars are 0.
    fn status(&mut self, key: &str) -> i64 {
        match self.object.get(key) {
            Some(Value::Number(number)) => number
                .as_i64()
                .or_else(|| number.as_f64().map(|f| f.trunc() as i64))
                .unwrap_or(0),
            Some(Value::String(text)) => text.trim().parse().unwrap_or(0),
            Some(Value::Array(_) | Value::Object(_)) => {
                self.garbled = true;
                0
            }
            _ => 0,
        }
    }
}

/// Decodes a single-object section such as `device` or `network`.
fn read_section<T, F>(
    category: &'static str,
    value: &Value,
    defects: &mut Vec<MappingDefect>,
    read: F,
) -> T
where
    T: Default,
    F: Fn(&mut Fields<'_>) -> T,
{
    match value {
        Value::Null => T::default(),
        Value::Object(object) => read_entry(category, value, object, defects, &read),
        other => {
            defects.push(MappingDefect::MalformedEntry {
                category,
                raw: other.to_string(),
            });
            T::default()
        }
    }
}

/// Decodes a sensor list entry by entry.
fn read_category<T, F>(
    category: &'static str,
    value: &Value,
    defects: &mut Vec<MappingDefect>,
    read: F,
) -> Vec<T>
where
    F: Fn(&mut Fields<'_>) -> T,
{
    let entries = match value {
        Value::Null => return Vec::new(),
        Value::Array(entries) => entries,
        other => {
            defects.push(MappingDefect::SkippedEntry {
                category,
                raw: other.to_string(),
            });
            return Vec::new();
        }
    };

    let mut readings = Vec::with_capacity(entries.len());
    for entry in entries {
        match entry {
            Value::Object(object) => {
                readings.push(read_entry(category, entry, object, defects, &read));
            }
            other => defects.push(MappingDefect::SkippedEntry {
                category,
                raw: other.to_string(),
            }),
        }
    }
    readings
}

fn read_entry<T, F>(
    category: &'static str,
    entry: &Value,
    object: &Map<String, Value>,
    defects: &mut Vec<MappingDefect>,
    read: &F,
) -> T
where
    F: Fn(&mut Fields<'_>) -> T,
{
    let mut fields = Fields::new(object);
    let decoded = read(&mut fields);
    if fields.garbled {
        defects.push(MappingDefect::MalformedEntry {
            category,
            raw: entry.to_string(),
        });
    }
    decoded
}
