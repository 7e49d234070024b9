pub mod registry;

pub use registry::{format_install_date, generate_device_id, DeviceRegistry};
