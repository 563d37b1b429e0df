//! Mapping from a device snapshot to the normalized metric set.
//!
//! Pure transformation: no I/O, no state carried between calls. Every
//! device block is visited, and all eight families are always produced,
//! even when a category list is empty.

use crate::enviromux::snapshot::{DeviceBlock, DeviceSnapshot, SensorReading};
use crate::error::MappingDefect;
use crate::model::{FamilyKind, MetricFamily, MetricRecord, MetricSet, ReadingKind, Unit};

/// Substring marking a digital input as open.
const OPEN_MARKER: &str = "Open";

/// Maps one snapshot into every metric family, in exposition order.
pub fn map_snapshot(snapshot: &DeviceSnapshot) -> MetricSet {
    let devices = snapshot.devices();
    let mut defects: Vec<MappingDefect> = devices
        .iter()
        .flat_map(|block| block.defects.iter().cloned())
        .collect();

    let families = FamilyKind::ALL
        .into_iter()
        .map(|kind| match kind {
            FamilyKind::HwInfo => hw_info(devices),
            FamilyKind::IsensValue => {
                sensor_values(kind, devices, |block| &block.isens, Unit::Empty, &mut defects)
            }
            FamilyKind::IsensStatus => sensor_statuses(kind, devices, |block| &block.isens),
            FamilyKind::EsensValue => {
                sensor_values(kind, devices, |block| &block.esens, Unit::Unknown, &mut defects)
            }
            FamilyKind::EsensStatus => sensor_statuses(kind, devices, |block| &block.esens),
            FamilyKind::DiginpValue => digital_input_values(devices),
            FamilyKind::DiginpStatus => sensor_statuses(kind, devices, |block| &block.diginp),
            FamilyKind::PowerStatus => power_statuses(devices),
        })
        .collect();

    for defect in &defects {
        tracing::warn!("{}", defect);
    }

    MetricSet { families, defects }
}

/// Keeps only ASCII digits and decimal points, then parses the rest.
///
/// Returns `None` when nothing numeric is left ("N/A") or the residue is
/// not a valid number ("1.2.3"). Signs are stripped too, so "-4V" reads as 4.
pub fn extract_numeric(raw: &str) -> Option<f64> {
    let digits: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse::<f64>().ok()
}

fn hw_info(devices: &[DeviceBlock]) -> MetricFamily {
    let mut family = MetricFamily::new(FamilyKind::HwInfo);
    for block in devices {
        family.records.push(
            MetricRecord::new(FamilyKind::HwInfo, 1.0)
                .label("model", &block.device.model)
                .label("uptime", &block.device.uptime)
                .label("firmware", &block.device.firmware)
                .label("ipaddr", &block.network.addr),
        );
    }
    family
}

fn sensor_values<F>(
    kind: FamilyKind,
    devices: &[DeviceBlock],
    select: F,
    fallback_unit: Unit,
    defects: &mut Vec<MappingDefect>,
) -> MetricFamily
where
    F: Fn(&DeviceBlock) -> &Vec<SensorReading>,
{
    let mut family = MetricFamily::new(kind);
    for sensor in devices.iter().flat_map(|block| select(block).iter()) {
        let value = match extract_numeric(&sensor.val) {
            Some(value) => value,
            None => {
                defects.push(MappingDefect::UnparsableValue {
                    family: kind.name(),
                    instance: sensor.desc.clone(),
                    raw: sensor.val.clone(),
                });
                0.0
            }
        };
        family.records.push(
            MetricRecord::new(kind, value)
                .label("instance", &sensor.desc)
                .label("unit", Unit::infer(&sensor.desc, fallback_unit))
                .label("metric_type", ReadingKind::Value),
        );
    }
    family
}

fn sensor_statuses<F>(kind: FamilyKind, devices: &[DeviceBlock], select: F) -> MetricFamily
where
    F: Fn(&DeviceBlock) -> &Vec<SensorReading>,
{
    let mut family = MetricFamily::new(kind);
    for sensor in devices.iter().flat_map(|block| select(block).iter()) {
        family.records.push(
            MetricRecord::new(kind, sensor.status as f64)
                .label("instance", &sensor.desc)
                .label("metric_type", ReadingKind::Status),
        );
    }
    family
}

fn digital_input_values(devices: &[DeviceBlock]) -> MetricFamily {
    let mut family = MetricFamily::new(FamilyKind::DiginpValue);
    for input in devices.iter().flat_map(|block| block.diginp.iter()) {
        let value = if input.val.contains(OPEN_MARKER) { 1.0 } else { 0.0 };
        family.records.push(
            MetricRecord::new(FamilyKind::DiginpValue, value)
                .label("instance", &input.desc)
                .label("metric_type", ReadingKind::Value),
        );
    }
    family
}

fn power_statuses(devices: &[DeviceBlock]) -> MetricFamily {
    let mut family = MetricFamily::new(FamilyKind::PowerStatus);
    for channel in devices.iter().flat_map(|block| block.power.iter()) {
        family.records.push(
            MetricRecord::new(FamilyKind::PowerStatus, channel.status as f64)
                .label("id", &channel.idx)
                .label("instance", &channel.desc)
                .label("output", &channel.val)
                .label("metric_type", ReadingKind::Status),
        );
    }
    family
}
