use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    composting::CompostingState,
    devices::DeviceRegistry,
    models::{Device, Location},
    navigation::{NavigationHistory, Page},
    waste::WasteData,
};

/// Everything the companion app knows. Owned by [`super::Store`] and only
/// changed through [`super::reduce`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub page: Page,
    #[serde(skip)]
    pub history: NavigationHistory,
    pub devices: DeviceRegistry,
    pub selected_device: Option<Device>,
    /// Text typed into the device name field.
    pub device_name: String,
    pub composting: CompostingState,
    pub waste: WasteData,
    pub selected_date: NaiveDate,
    pub calendar_open: bool,
    pub location: Location,
    pub location_permission: bool,
    pub wifi_permission: bool,
}

impl AppState {
    pub fn new(now: DateTime<Utc>, today: NaiveDate) -> Self {
        Self {
            page: Page::Home,
            history: NavigationHistory::default(),
            devices: DeviceRegistry::new(),
            selected_device: None,
            device_name: String::new(),
            composting: CompostingState::new(now),
            waste: WasteData::default(),
            selected_date: today,
            calendar_open: false,
            location: Location::default(),
            location_permission: false,
            wifi_permission: false,
        }
    }
}
