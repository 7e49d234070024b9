use std::{future::Future, time::Duration};

use anyhow::{anyhow, bail, Context, Result};
use rand::Rng;
use tokio::time;

use crate::models::{Coordinates, Location};

// Set to true to log geocoding fallbacks
const ENABLE_LOGS: bool = true;

use crate::{log_info, log_warn};

const POSITION_TIMEOUT: Duration = Duration::from_secs(10);
const POSITION_MAX_AGE: Duration = Duration::from_secs(60);

pub const FALLBACK_ADDRESSES: [&str; 4] = [
    "Jl. Kenangan Indah No. 3 Kec. Mantan",
    "Jl. Sumber Pucung No. 15",
    "Jl. Malang Raya No. 22",
    "Jl. Sawojajar No. 8",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionOptions {
    pub high_accuracy: bool,
    pub timeout: Duration,
    /// A cached fix younger than this may be returned instead of a new one.
    pub maximum_age: Duration,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout: POSITION_TIMEOUT,
            maximum_age: POSITION_MAX_AGE,
        }
    }
}

/// Source of the device's current position.
pub trait PositionProvider {
    fn current_position(
        &self,
        options: &PositionOptions,
    ) -> impl Future<Output = Result<Coordinates>> + Send;
}

/// Turns coordinates into a street address.
pub trait Geocoder {
    fn reverse_geocode(&self, coords: Coordinates) -> impl Future<Output = Result<String>> + Send;
}

/// Always reports the same position.
#[derive(Debug, Clone, Copy)]
pub struct FixedPosition(pub Coordinates);

impl PositionProvider for FixedPosition {
    async fn current_position(&self, _options: &PositionOptions) -> Result<Coordinates> {
        Ok(self.0)
    }
}

/// Geocoder for when no mapping service is configured. Every lookup fails,
/// which routes callers to the canned addresses.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineGeocoder;

impl Geocoder for OfflineGeocoder {
    async fn reverse_geocode(&self, _coords: Coordinates) -> Result<String> {
        bail!("no mapping service configured")
    }
}

/// Address for `coords`, or a random canned one when geocoding fails.
/// Failures are logged and never reach the caller.
pub async fn resolve_address<G: Geocoder>(geocoder: &G, coords: Coordinates) -> String {
    match geocoder.reverse_geocode(coords).await {
        Ok(address) if !address.trim().is_empty() => address,
        Ok(_) => {
            log_warn!("geocoder returned an empty address, using fallback");
            fallback_address()
        }
        Err(err) => {
            log_info!("geocoding failed, using fallback: {err:#}");
            fallback_address()
        }
    }
}

fn fallback_address() -> String {
    let index = rand::thread_rng().gen_range(0..FALLBACK_ADDRESSES.len());
    FALLBACK_ADDRESSES[index].to_string()
}

/// One position request bounded by `options.timeout`, then address lookup.
pub async fn locate<P, G>(provider: &P, geocoder: &G, options: &PositionOptions) -> Result<Location>
where
    P: PositionProvider,
    G: Geocoder,
{
    let coords = time::timeout(options.timeout, provider.current_position(options))
        .await
        .map_err(|_| anyhow!("position request timed out after {:?}", options.timeout))?
        .context("position request failed")?;

    let address = resolve_address(geocoder, coords).await;
    Ok(Location {
        address,
        lat: coords.lat,
        lng: coords.lng,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NeverAnswers;

    impl PositionProvider for NeverAnswers {
        async fn current_position(&self, _options: &PositionOptions) -> Result<Coordinates> {
            std::future::pending().await
        }
    }

    struct Denied;

    impl PositionProvider for Denied {
        async fn current_position(&self, _options: &PositionOptions) -> Result<Coordinates> {
            bail!("permission denied")
        }
    }

    struct NamedStreet;

    impl Geocoder for NamedStreet {
        async fn reverse_geocode(&self, _coords: Coordinates) -> Result<String> {
            Ok("Jl. Ijen No. 1".into())
        }
    }

    const MALANG: Coordinates = Coordinates {
        lat: -7.98,
        lng: 112.63,
    };

    #[tokio::test]
    async fn uses_geocoder_address_when_available() {
        let location = locate(&FixedPosition(MALANG), &NamedStreet, &PositionOptions::default())
            .await
            .unwrap();
        assert_eq!(location.address, "Jl. Ijen No. 1");
        assert_eq!(location.lat, -7.98);
    }

    #[tokio::test]
    async fn falls_back_to_canned_addresses() {
        let location = locate(&FixedPosition(MALANG), &OfflineGeocoder, &PositionOptions::default())
            .await
            .unwrap();
        assert!(FALLBACK_ADDRESSES.contains(&location.address.as_str()));
    }

    #[tokio::test]
    async fn denial_is_an_error() {
        let result = locate(&Denied, &OfflineGeocoder, &PositionOptions::default()).await;
        assert!(result.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn gives_up_after_the_timeout() {
        let result = locate(&NeverAnswers, &OfflineGeocoder, &PositionOptions::default()).await;
        let err = result.unwrap_err().to_string();
        assert!(err.contains("timed out"), "{err}");
    }
}
