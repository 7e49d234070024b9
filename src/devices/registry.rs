use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::Device;

const ID_LOW: u32 = 100_000;
const ID_HIGH: u32 = 999_999;
const ID_LEN: usize = 6;

/// Draws a six digit identifier from `[100000, 999999)`.
///
/// Each call is independent, so two devices can end up with the same id.
pub fn generate_device_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut id = rng.gen_range(ID_LOW..ID_HIGH).to_string();
    id.truncate(ID_LEN);
    id
}

/// `id-ID` short date with the separators stripped, e.g. `110925`.
pub fn format_install_date(date: NaiveDate) -> String {
    date.format("%d%m%y").to_string()
}

/// Paired devices in the order they were added.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct DeviceRegistry {
    devices: Vec<Device>,
}

impl DeviceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a device. Returns `None` when the trimmed name is empty.
    pub fn add(&mut self, name: &str, id: String, install_date: String) -> Option<Device> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        let device = Device {
            id,
            name: name.to_string(),
            install_date,
        };
        self.devices.push(device.clone());
        Some(device)
    }

    /// First device carrying `id`. Later duplicates are shadowed.
    pub fn find(&self, id: &str) -> Result<&Device> {
        self.devices
            .iter()
            .find(|device| device.id == id)
            .ok_or_else(|| anyhow!("no device with id '{id}'"))
    }

    pub fn all(&self) -> &[Device] {
        &self.devices
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    pub fn clear(&mut self) {
        self.devices.clear();
    }
}
