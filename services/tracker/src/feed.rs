//! OEM feed loader
//!
//! Downloads the ISS ephemeris (CCSDS OEM wrapped in an `ndm` document) and
//! deserializes it into a [`Dataset`]. The schema is strict: a state vector
//! with a missing, non-numeric or non-finite component fails the whole load
//! rather than producing a partial record.

use async_trait::async_trait;
use orbit_types::dataset::Dataset;
use orbit_types::epoch::Epoch;
use orbit_types::errors::DatasetError;
use orbit_types::state_vector::StateVector;
use orbit_types::vector::Vector3;
use reqwest::Client;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Feed request failed: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("Feed returned HTTP {0}")]
    Status(u16),

    #[error("Malformed feed: {0}")]
    Parse(String),

    #[error("Invalid feed contents: {0}")]
    Dataset(#[from] DatasetError),
}

/// Anything that can produce a fresh dataset.
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch(&self) -> Result<Dataset, FeedError>;
}

/// Downloads the feed over HTTP.
pub struct HttpFeed {
    http_client: Client,
    url: String,
}

impl HttpFeed {
    pub fn new(url: String, timeout: Duration, user_agent: &str) -> Result<Self, FeedError> {
        let http_client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;
        Ok(Self { http_client, url })
    }
}

#[async_trait]
impl FeedSource for HttpFeed {
    async fn fetch(&self) -> Result<Dataset, FeedError> {
        tracing::info!(url = %self.url, "Downloading ISS OEM feed");

        let res = self.http_client.get(&self.url).send().await?;
        if !res.status().is_success() {
            return Err(FeedError::Status(res.status().as_u16()));
        }
        let body = res.bytes().await?;

        tracing::debug!(bytes = body.len(), "Parsing ISS OEM feed");
        let dataset = parse_feed(&body)?;
        tracing::info!(epochs = dataset.len(), "Loaded ISS OEM feed");
        Ok(dataset)
    }
}

// ---------------------------------------------------------------------------
// XML schema
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct NdmDocument {
    oem: OemDocument,
}

#[derive(Debug, Deserialize)]
struct OemDocument {
    #[serde(default)]
    header: BTreeMap<String, String>,
    body: OemBody,
}

#[derive(Debug, Deserialize)]
struct OemBody {
    segment: OemSegment,
}

#[derive(Debug, Deserialize)]
struct OemSegment {
    #[serde(default)]
    metadata: BTreeMap<String, String>,
    data: OemData,
}

#[derive(Debug, Deserialize)]
struct OemData {
    #[serde(rename = "COMMENT", default)]
    comments: Vec<String>,
    #[serde(rename = "stateVector", default)]
    state_vectors: Vec<StateVectorXml>,
}

#[derive(Debug, Deserialize)]
struct StateVectorXml {
    #[serde(rename = "EPOCH")]
    epoch: String,
    #[serde(rename = "X")]
    x: Measured,
    #[serde(rename = "Y")]
    y: Measured,
    #[serde(rename = "Z")]
    z: Measured,
    #[serde(rename = "X_DOT")]
    x_dot: Measured,
    #[serde(rename = "Y_DOT")]
    y_dot: Measured,
    #[serde(rename = "Z_DOT")]
    z_dot: Measured,
}

/// `<X units="km">100.0</X>`; the unit attribute is informational.
#[derive(Debug, Deserialize)]
struct Measured {
    #[serde(rename = "$text")]
    value: f64,
}

impl StateVectorXml {
    fn into_state_vector(self) -> Result<StateVector, DatasetError> {
        let epoch = Epoch::parse(self.epoch.trim())?;
        let position = Vector3::new(self.x.value, self.y.value, self.z.value);
        let velocity = Vector3::new(self.x_dot.value, self.y_dot.value, self.z_dot.value);

        // `f64::from_str` accepts "NaN" and "inf"
        for (field, vector) in [("position", &position), ("velocity", &velocity)] {
            if !vector.is_finite() {
                return Err(DatasetError::NonFiniteComponent {
                    epoch: epoch.to_string(),
                    field: field.to_string(),
                });
            }
        }

        Ok(StateVector::new(epoch, position, velocity))
    }
}

/// Parse raw feed bytes into a dataset.
///
/// Pure function of the input: the same bytes always give the same dataset.
pub fn parse_feed(bytes: &[u8]) -> Result<Dataset, FeedError> {
    let xml = std::str::from_utf8(bytes).map_err(|e| FeedError::Parse(e.to_string()))?;
    let doc: NdmDocument = quick_xml::de::from_str(xml).map_err(|e| FeedError::Parse(e.to_string()))?;

    let segment = doc.oem.body.segment;
    if segment.data.state_vectors.is_empty() {
        return Err(FeedError::Parse("feed contains no stateVector elements".to_string()));
    }

    let vectors = segment
        .data
        .state_vectors
        .into_iter()
        .map(StateVectorXml::into_state_vector)
        .collect::<Result<Vec<_>, _>>()?;

    let comments = segment
        .data
        .comments
        .into_iter()
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .collect();

    Ok(Dataset::new(
        vectors,
        doc.oem.header,
        segment.metadata,
        comments,
    )?)
}
