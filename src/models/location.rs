use serde::{Deserialize, Serialize};

pub const DEFAULT_ADDRESS: &str = "Sumber pucung";
pub const DEFAULT_LAT: f64 = -7.9666;
pub const DEFAULT_LNG: f64 = 112.6326;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub address: String,
    pub lat: f64,
    pub lng: f64,
}

impl Default for Location {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS.into(),
            lat: DEFAULT_LAT,
            lng: DEFAULT_LNG,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}
