//! Test data builders for device snapshots.

use crate::enviromux::snapshot::{
    DeviceBlock, DeviceInfo, DeviceSnapshot, NetworkInfo, PowerChannel, SensorReading,
    SnapshotData,
};

/// Builder for a whole snapshot document.
#[derive(Debug, Default)]
pub struct SnapshotBuilder {
    devices: Vec<DeviceBlock>,
}

impl SnapshotBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a device block.
    pub fn device(mut self, device: DeviceBlockBuilder) -> Self {
        self.devices.push(device.build());
        self
    }

    pub fn build(self) -> DeviceSnapshot {
        DeviceSnapshot {
            data: SnapshotData { all: self.devices },
        }
    }
}

/// Builder for one device block and its sensor lists.
#[derive(Debug, Default)]
pub struct DeviceBlockBuilder {
    block: DeviceBlock,
}

fn reading(desc: &str, val: &str, status: i64) -> SensorReading {
    SensorReading {
        desc: desc.to_string(),
        val: val.to_string(),
        status,
    }
}

impl DeviceBlockBuilder {
    /// Creates a device with the given metadata and no sensors.
    pub fn new(model: &str, uptime: &str, firmware: &str, addr: &str) -> Self {
        Self {
            block: DeviceBlock {
                device: DeviceInfo {
                    model: model.to_string(),
                    uptime: uptime.to_string(),
                    firmware: firmware.to_string(),
                },
                network: NetworkInfo {
                    addr: addr.to_string(),
                },
                ..DeviceBlock::default()
            },
        }
    }

    pub fn internal_sensor(mut self, desc: &str, val: &str, status: i64) -> Self {
        self.block.isens.push(reading(desc, val, status));
        self
    }

    pub fn external_sensor(mut self, desc: &str, val: &str, status: i64) -> Self {
        self.block.esens.push(reading(desc, val, status));
        self
    }

    pub fn digital_input(mut self, desc: &str, val: &str, status: i64) -> Self {
        self.block.diginp.push(reading(desc, val, status));
        self
    }

    pub fn power_channel(mut self, idx: &str, desc: &str, val: &str, status: i64) -> Self {
        self.block.power.push(PowerChannel {
            idx: idx.to_string(),
            desc: desc.to_string(),
            val: val.to_string(),
            status,
        });
        self
    }

    pub fn build(self) -> DeviceBlock {
        self.block
    }
}
