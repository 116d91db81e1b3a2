//! Epoch Index: nearest-time and exact-key lookup over a dataset
//!
//! The dataset is strictly ascending by epoch, so the time distance to any
//! reference instant is unimodal along the sequence. A binary search for the
//! insertion point leaves only two candidates: the last epoch before the
//! reference and the first epoch at or after it.

use chrono::{DateTime, Utc};
use orbit_types::dataset::Dataset;
use orbit_types::epoch::parse_oem_timestamp;
use orbit_types::errors::QueryError;
use orbit_types::state_vector::StateVector;

/// Find the state vector closest in time to `reference`.
///
/// When two epochs are equidistant the earlier one is returned.
pub fn find_closest(dataset: &Dataset, reference: DateTime<Utc>) -> Result<&StateVector, QueryError> {
    let vectors = dataset.vectors();
    if vectors.is_empty() {
        return Err(QueryError::EmptyDataset);
    }

    let idx = vectors.partition_point(|sv| sv.epoch.instant() < reference);
    if idx == 0 {
        return Ok(&vectors[0]);
    }
    if idx == vectors.len() {
        return Ok(&vectors[idx - 1]);
    }

    let before = &vectors[idx - 1];
    let after = &vectors[idx];
    if before.epoch.distance_to(reference) <= after.epoch.distance_to(reference) {
        Ok(before)
    } else {
        Ok(after)
    }
}

/// Same as [`find_closest`], with the reference given as text.
///
/// Accepts the feed's own `YYYY-DDDTHH:MM:SS[.fff][Z]` layout or RFC 3339.
pub fn find_closest_to_str<'a>(
    dataset: &'a Dataset,
    reference: &str,
) -> Result<&'a StateVector, QueryError> {
    let instant = parse_reference_time(reference)?;
    find_closest(dataset, instant)
}

/// Parse a caller-supplied reference time.
///
/// An unescaped `+hh:mm` offset arrives from query-string decoding as
/// ` hh:mm`; that form is read as a positive offset.
pub fn parse_reference_time(value: &str) -> Result<DateTime<Utc>, QueryError> {
    if let Some(instant) = parse_oem_timestamp(value) {
        return Ok(instant);
    }
    let trimmed = value.trim();
    parse_rfc3339(trimmed)
        .or_else(|| {
            let (stamp, offset) = trimmed.rsplit_once(' ')?;
            let is_offset = offset.len() == 5
                && offset.as_bytes()[2] == b':'
                && offset.chars().filter(char::is_ascii_digit).count() == 4;
            if is_offset {
                parse_rfc3339(&format!("{}+{}", stamp, offset))
            } else {
                None
            }
        })
        .ok_or_else(|| QueryError::InvalidTime {
            value: value.to_string(),
        })
}

fn parse_rfc3339(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Find the state vector whose epoch key equals `key` exactly.
pub fn find_by_key<'a>(dataset: &'a Dataset, key: &str) -> Result<&'a StateVector, QueryError> {
    dataset
        .vectors()
        .iter()
        .find(|sv| sv.epoch.as_str() == key)
        .ok_or_else(|| QueryError::NotFound {
            epoch: key.to_string(),
        })
}
