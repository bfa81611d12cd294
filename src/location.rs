//! One-shot device location acquisition.
//!
//! A terminal has no platform permission prompt or GPS, so both halves of the
//! location capability sit behind [`LocationProvider`]: the permission answer
//! comes from configuration and the position comes from IP geolocation
//! ([`IpLocator`]) or fixed coordinates ([`ManualLocator`]). The flow in
//! [`acquire_location`] asks for permission once, reads once, and never retries.

use crate::config::{LocationConfig, LocationSource};
use crate::errors::LocationError;
use crate::models::LocationFix;
use async_trait::async_trait;
use ipgeolocate::{Locator, Service};
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
}

/// The host's location capability.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Asks for foreground location permission.
    async fn request_permission(&self) -> PermissionStatus;

    /// Reads the current position once.
    async fn current_position(&self) -> Result<LocationFix, LocationError>;
}

/// Resolves the user's approximate location via IP geolocation.
///
/// Uses the [IpApi](https://ip-api.com/) service. An empty `lookup_ip` asks
/// the service about the caller's own public address.
pub struct IpLocator {
    permission: PermissionStatus,
    lookup_ip: String,
}

impl IpLocator {
    pub fn new(permission: PermissionStatus, lookup_ip: impl Into<String>) -> Self {
        Self {
            permission,
            lookup_ip: lookup_ip.into(),
        }
    }
}

#[async_trait]
impl LocationProvider for IpLocator {
    async fn request_permission(&self) -> PermissionStatus {
        self.permission
    }

    async fn current_position(&self) -> Result<LocationFix, LocationError> {
        let loc = Locator::get(&self.lookup_ip, Service::IpApi)
            .await
            .map_err(|e| LocationError::Unavailable {
                reason: e.to_string(),
            })?;

        let lat = parse_coordinate(&loc.latitude)?;
        let lon = parse_coordinate(&loc.longitude)?;
        Ok(LocationFix::new(lat, lon))
    }
}

fn parse_coordinate(raw: &str) -> Result<f64, LocationError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|e| LocationError::Unavailable {
            reason: format!("bad coordinate {:?}: {}", raw, e),
        })
}

/// Returns a fixed, configured position.
pub struct ManualLocator {
    permission: PermissionStatus,
    fix: LocationFix,
}

impl ManualLocator {
    pub fn new(permission: PermissionStatus, fix: LocationFix) -> Self {
        Self { permission, fix }
    }
}

#[async_trait]
impl LocationProvider for ManualLocator {
    async fn request_permission(&self) -> PermissionStatus {
        self.permission
    }

    async fn current_position(&self) -> Result<LocationFix, LocationError> {
        Ok(self.fix)
    }
}

/// Builds the provider selected in the `[location]` config section.
pub fn provider_from_config(config: &LocationConfig) -> Box<dyn LocationProvider> {
    let permission = if config.permission_granted {
        PermissionStatus::Granted
    } else {
        PermissionStatus::Denied
    };

    match config.source {
        LocationSource::Ip => Box::new(IpLocator::new(permission, config.lookup_ip.clone())),
        LocationSource::Manual => Box::new(ManualLocator::new(
            permission,
            LocationFix::new(config.manual_lat, config.manual_lon),
        )),
    }
}

/// Requests permission once and, if granted, reads the position once.
pub async fn acquire_location(
    provider: &dyn LocationProvider,
) -> Result<LocationFix, LocationError> {
    if provider.request_permission().await == PermissionStatus::Denied {
        warn!("Location permission not granted.");
        return Err(LocationError::PermissionDenied);
    }

    match provider.current_position().await {
        Ok(fix) => {
            info!(
                "Location fix acquired - ({}, {})",
                fix.latitude, fix.longitude
            );
            Ok(fix)
        }
        Err(e) => {
            error!("Could not read current position: {}", e);
            Err(e)
        }
    }
}
