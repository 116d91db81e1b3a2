use crate::feed::{FeedError, FeedSource};
use crate::geocode::Geocoder;
use orbit_types::dataset::Dataset;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Shared handler state.
///
/// The dataset is an immutable snapshot behind a lock that is only held long
/// enough to clone or swap the `Arc`, so a reload never exposes a partially
/// built dataset and readers never wait on each other.
#[derive(Clone)]
pub struct AppState {
    dataset: Arc<RwLock<Arc<Dataset>>>,
    pub feed: Arc<dyn FeedSource>,
    pub geocoder: Arc<dyn Geocoder>,
    pub geocode_timeout: Duration,
}

impl AppState {
    pub fn new(
        dataset: Dataset,
        feed: Arc<dyn FeedSource>,
        geocoder: Arc<dyn Geocoder>,
        geocode_timeout: Duration,
    ) -> Self {
        Self {
            dataset: Arc::new(RwLock::new(Arc::new(dataset))),
            feed,
            geocoder,
            geocode_timeout,
        }
    }

    /// Current dataset snapshot
    pub async fn snapshot(&self) -> Arc<Dataset> {
        self.dataset.read().await.clone()
    }

    /// Fetch a fresh dataset and publish it.
    ///
    /// On failure the previous snapshot stays in place.
    pub async fn reload(&self) -> Result<usize, FeedError> {
        let fresh = match self.feed.fetch().await {
            Ok(dataset) => dataset,
            Err(e) => {
                tracing::warn!(error = %e, "Reload failed, keeping previous dataset");
                return Err(e);
            }
        };

        let epochs = fresh.len();
        *self.dataset.write().await = Arc::new(fresh);
        tracing::info!(epochs, "Published reloaded dataset");
        Ok(epochs)
    }
}
