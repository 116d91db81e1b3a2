//! Time-ordered dataset of state vectors
//!
//! Built once from the feed and never mutated afterwards; a reload replaces
//! the whole value. Construction enforces the ordering invariant that the
//! nearest-epoch search depends on.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::errors::DatasetError;
use crate::state_vector::StateVector;

/// Loaded trajectory plus opaque descriptive fields from the feed.
///
/// Invariant: `vectors` is strictly ascending by epoch instant (no duplicates).
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Dataset {
    vectors: Vec<StateVector>,
    pub header: BTreeMap<String, String>,
    pub metadata: BTreeMap<String, String>,
    pub comments: Vec<String>,
}

impl Dataset {
    /// Validate ordering and assemble the dataset.
    pub fn new(
        vectors: Vec<StateVector>,
        header: BTreeMap<String, String>,
        metadata: BTreeMap<String, String>,
        comments: Vec<String>,
    ) -> Result<Self, DatasetError> {
        for pair in vectors.windows(2) {
            let (previous, current) = (&pair[0].epoch, &pair[1].epoch);
            if current.instant() == previous.instant() {
                return Err(DatasetError::DuplicateEpoch {
                    epoch: current.to_string(),
                });
            }
            if current.instant() < previous.instant() {
                return Err(DatasetError::OutOfOrder {
                    previous: previous.to_string(),
                    current: current.to_string(),
                });
            }
        }

        Ok(Self {
            vectors,
            header,
            metadata,
            comments,
        })
    }

    /// Dataset with only state vectors, no descriptive fields
    pub fn from_vectors(vectors: Vec<StateVector>) -> Result<Self, DatasetError> {
        Self::new(vectors, BTreeMap::new(), BTreeMap::new(), Vec::new())
    }

    pub fn vectors(&self) -> &[StateVector] {
        &self.vectors
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::epoch::Epoch;
    use crate::vector::Vector3;

    fn sv(key: &str) -> StateVector {
        StateVector::new(Epoch::parse(key).unwrap(), Vector3::ZERO, Vector3::ZERO)
    }

    #[test]
    fn test_accepts_ascending() {
        let dataset = Dataset::from_vectors(vec![
            sv("2024-045T12:00:00.000Z"),
            sv("2024-045T12:04:00.000Z"),
            sv("2024-045T12:08:00.000Z"),
        ])
        .unwrap();
        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.vectors()[0].epoch.as_str(), "2024-045T12:00:00.000Z");
        assert_eq!(dataset.vectors()[2].epoch.as_str(), "2024-045T12:08:00.000Z");
    }

    #[test]
    fn test_rejects_out_of_order() {
        let err = Dataset::from_vectors(vec![
            sv("2024-045T12:04:00.000Z"),
            sv("2024-045T12:00:00.000Z"),
        ])
        .unwrap_err();
        assert!(matches!(err, DatasetError::OutOfOrder { .. }));
    }

    #[test]
    fn test_rejects_duplicate_instant_with_different_key() {
        // Same instant, spelled with and without the fraction
        let err = Dataset::from_vectors(vec![
            sv("2024-045T12:04:00.000Z"),
            sv("2024-045T12:04:00Z"),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            DatasetError::DuplicateEpoch {
                epoch: "2024-045T12:04:00Z".to_string()
            }
        );
    }

    #[test]
    fn test_empty_is_valid() {
        let dataset = Dataset::default();
        assert!(dataset.is_empty());
        assert_eq!(dataset.len(), 0);
    }
}
