//! Best-effort device location with a silent fallback.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

use crate::{catalog::LONDON, model::Coord};

/// Upper bound on how long the locator may take.
pub const LOCATE_TIMEOUT: Duration = Duration::from_secs(5);

/// Used whenever the device location cannot be obtained.
pub const FALLBACK_LOCATION: Coord = LONDON.coord;

/// Shown while the locator runs.
pub const LOCATING_MESSAGE: &str = "Trying to get your location...";

const DENIED_DELAY: Duration = Duration::from_millis(1000);
const UNAVAILABLE_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LocateError {
    #[error("location services are not available on this platform")]
    Unavailable,

    #[error("location access denied: {0}")]
    Denied(String),
}

/// Where the coordinates used for a locate-me lookup came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LocationFix {
    Device(Coord),
    Fallback(Coord),
}

impl LocationFix {
    pub fn coord(self) -> Coord {
        match self {
            LocationFix::Device(coord) | LocationFix::Fallback(coord) => coord,
        }
    }

    /// Progress text shown once the fix is known.
    pub fn message(self) -> &'static str {
        match self {
            LocationFix::Device(_) => "Found your location! Getting weather...",
            LocationFix::Fallback(_) => "Using demo location...",
        }
    }
}

#[async_trait]
pub trait Locator: Send + Sync {
    async fn locate(&self) -> Result<Coord, LocateError>;
}

/// Coordinates known up front, e.g. given on the command line.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocator(pub Coord);

#[async_trait]
impl Locator for FixedLocator {
    async fn locate(&self) -> Result<Coord, LocateError> {
        Ok(self.0)
    }
}

/// No location facility at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLocator;

#[async_trait]
impl Locator for NoLocator {
    async fn locate(&self) -> Result<Coord, LocateError> {
        Err(LocateError::Unavailable)
    }
}

/// Asks `locator` for the current position, falling back to London after a
/// short pause if it fails or takes longer than [`LOCATE_TIMEOUT`].
pub async fn resolve_location(locator: &dyn Locator) -> LocationFix {
    let delay = match tokio::time::timeout(LOCATE_TIMEOUT, locator.locate()).await {
        Ok(Ok(coord)) => return LocationFix::Device(coord),
        Ok(Err(LocateError::Unavailable)) => {
            info!("location services unavailable, using demo location (London)");
            UNAVAILABLE_DELAY
        }
        Ok(Err(err)) => {
            info!(error = %err, "location lookup failed, using demo location (London)");
            DENIED_DELAY
        }
        Err(_) => {
            info!(timeout = ?LOCATE_TIMEOUT, "location lookup timed out, using demo location (London)");
            DENIED_DELAY
        }
    };

    tokio::time::sleep(delay).await;
    LocationFix::Fallback(FALLBACK_LOCATION)
}
