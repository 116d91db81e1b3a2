//! Reverse geocoding
//!
//! Lookups are best effort. `resolve_location` turns every failure (no match,
//! timeout, upstream error) into the `"Address Not Found"` sentinel so request
//! handlers never fail because the geocoder did.

use async_trait::async_trait;
use dashmap::DashMap;
use reqwest::{Client, Url};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Returned in place of a label whenever a lookup does not succeed.
pub const ADDRESS_NOT_FOUND: &str = "Address Not Found";

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeocodeError {
    #[error("No address at these coordinates")]
    NoMatch,

    #[error("Geocoder timed out")]
    Timeout,

    #[error("Geocoder error: {0}")]
    Upstream(String),
}

/// Coordinates to place name.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn reverse_geocode(&self, latitude: f64, longitude: f64) -> Result<String, GeocodeError>;
}

/// Look up a label, degrading any failure to [`ADDRESS_NOT_FOUND`].
pub async fn resolve_location(
    geocoder: &dyn Geocoder,
    latitude: f64,
    longitude: f64,
    timeout: Duration,
) -> String {
    let lookup = tokio::time::timeout(timeout, geocoder.reverse_geocode(latitude, longitude));
    match lookup.await {
        Ok(Ok(label)) => label,
        Ok(Err(GeocodeError::NoMatch)) => {
            tracing::debug!(latitude, longitude, "No address for coordinates");
            ADDRESS_NOT_FOUND.to_string()
        }
        Ok(Err(e)) => {
            tracing::warn!(latitude, longitude, error = %e, "Reverse geocoding failed");
            ADDRESS_NOT_FOUND.to_string()
        }
        Err(_) => {
            tracing::warn!(latitude, longitude, ?timeout, "Reverse geocoding timed out");
            ADDRESS_NOT_FOUND.to_string()
        }
    }
}

// ---------------------------------------------------------------------------
// Nominatim
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct NominatimReverse {
    display_name: Option<String>,
    error: Option<String>,
}

/// Nominatim `/reverse` client.
pub struct NominatimGeocoder {
    http_client: Client,
    base_url: String,
}

impl NominatimGeocoder {
    pub fn new(base_url: String, timeout: Duration, user_agent: &str) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn reverse_geocode(&self, latitude: f64, longitude: f64) -> Result<String, GeocodeError> {
        let url = Url::parse_with_params(
            &format!("{}/reverse", self.base_url),
            &[
                ("format", "jsonv2".to_string()),
                ("lat", latitude.to_string()),
                ("lon", longitude.to_string()),
                ("accept-language", "en".to_string()),
            ],
        )
        .map_err(|e| GeocodeError::Upstream(e.to_string()))?;

        let res = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(classify)?;

        if !res.status().is_success() {
            return Err(GeocodeError::Upstream(format!("HTTP {}", res.status())));
        }

        let body = res.json::<NominatimReverse>().await.map_err(classify)?;
        match body {
            NominatimReverse {
                display_name: Some(name),
                ..
            } if !name.is_empty() => Ok(name),
            NominatimReverse { error, .. } => {
                if let Some(reason) = error {
                    tracing::debug!(%reason, "Nominatim returned no match");
                }
                Err(GeocodeError::NoMatch)
            }
        }
    }
}

fn classify(err: reqwest::Error) -> GeocodeError {
    if err.is_timeout() {
        GeocodeError::Timeout
    } else {
        GeocodeError::Upstream(err.to_string())
    }
}

// ---------------------------------------------------------------------------
// Cache
// ---------------------------------------------------------------------------

/// Cache key: coordinates rounded to 1e-4 degrees (about 11 m).
type CellKey = (i64, i64);

fn cell(latitude: f64, longitude: f64) -> CellKey {
    ((latitude * 1e4).round() as i64, (longitude * 1e4).round() as i64)
}

/// Remembers successful lookups. Failures are never cached.
///
/// Holds at most `capacity` labels; reaching the cap empties the map before
/// the next insert.
pub struct CachedGeocoder<G> {
    inner: G,
    labels: DashMap<CellKey, String>,
    capacity: usize,
}

impl<G: Geocoder> CachedGeocoder<G> {
    pub fn new(inner: G, capacity: usize) -> Self {
        Self {
            inner,
            labels: DashMap::new(),
            capacity,
        }
    }

    pub fn cached_len(&self) -> usize {
        self.labels.len()
    }
}

#[async_trait]
impl<G: Geocoder> Geocoder for CachedGeocoder<G> {
    async fn reverse_geocode(&self, latitude: f64, longitude: f64) -> Result<String, GeocodeError> {
        let key = cell(latitude, longitude);
        if let Some(label) = self.labels.get(&key) {
            return Ok(label.clone());
        }

        let label = self.inner.reverse_geocode(latitude, longitude).await?;
        if self.labels.len() >= self.capacity {
            tracing::debug!(entries = self.labels.len(), "Geocode cache full, clearing");
            self.labels.clear();
        }
        if self.capacity > 0 {
            self.labels.insert(key, label.clone());
        }
        Ok(label)
    }
}
