pub mod alert;
pub mod gauge;

pub use alert::{full_alert_link, ALERT_MESSAGE, ALERT_CONTACT};
pub use gauge::{WasteData, WasteGauge, FULL_THRESHOLD_PERCENT};
