use serde::{Deserialize, Serialize};

/// `/epochs` query string. Kept as text so bad values surface as
/// `InvalidParameter` rather than an extractor rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EpochsQuery {
    pub limit: Option<String>,
    pub offset: Option<String>,
}

/// `/now` query string
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NowQuery {
    /// Reference time override; wall clock when absent
    pub at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeedResponse {
    pub speed: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationResponse {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
    pub geoposition: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NowResponse {
    pub closest_epoch: String,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
    pub geoposition: String,
    pub speed: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReloadResponse {
    pub epochs: usize,
}
