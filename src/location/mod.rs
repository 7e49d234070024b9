pub mod provider;

pub use provider::{
    locate, resolve_address, FixedPosition, Geocoder, OfflineGeocoder, PositionOptions,
    PositionProvider, FALLBACK_ADDRESSES,
};

pub const PERMISSION_DENIED_ALERT: &str =
    "Location permission denied. Please enable location access to continue.";
pub const LOCATION_UNAVAILABLE_ALERT: &str = "Unable to get current location";
