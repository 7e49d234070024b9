use serde::{Deserialize, Serialize};

/// A paired W-Trash bin.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    /// Six ASCII digits. Not guaranteed unique across devices.
    pub id: String,
    pub name: String,
    /// Install day as `DDMMYY`.
    pub install_date: String,
}
