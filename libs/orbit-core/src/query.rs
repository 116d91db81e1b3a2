//! Query layer: limit/offset pagination over the dataset

use orbit_types::dataset::Dataset;
use orbit_types::errors::QueryError;
use orbit_types::state_vector::StateVector;
use serde::{Deserialize, Serialize};

/// Validated pagination window.
///
/// `limit: None` means "everything from `offset` on".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PageParams {
    pub limit: Option<usize>,
    pub offset: usize,
}

/// Parse raw `limit`/`offset` query values.
///
/// Both must be non-negative integers when present.
pub fn parse_page_params(limit: Option<&str>, offset: Option<&str>) -> Result<PageParams, QueryError> {
    let limit = limit.map(|raw| parse_non_negative("limit", raw)).transpose()?;
    let offset = offset
        .map(|raw| parse_non_negative("offset", raw))
        .transpose()?
        .unwrap_or(0);
    Ok(PageParams { limit, offset })
}

fn parse_non_negative(name: &str, raw: &str) -> Result<usize, QueryError> {
    let value: i64 = raw.trim().parse().map_err(|_| QueryError::InvalidParameter {
        name: name.to_string(),
        reason: format!("expected an integer, got {:?}", raw),
    })?;
    usize::try_from(value).map_err(|_| QueryError::InvalidParameter {
        name: name.to_string(),
        reason: format!("must not be negative, got {}", value),
    })
}

/// Return `dataset[offset .. offset + limit]`, clipped to the available range.
pub fn paginate(dataset: &Dataset, params: PageParams) -> &[StateVector] {
    let vectors = dataset.vectors();
    let start = params.offset.min(vectors.len());
    let end = match params.limit {
        Some(limit) => start.saturating_add(limit).min(vectors.len()),
        None => vectors.len(),
    };
    &vectors[start..end]
}
