//! Error types for crater records and containment matching.
//!
//! [`CraterError`] covers the hard failures of the matching pipeline. Geometric
//! degeneracy (an arccos argument drifting outside [-1, 1]) is not an error:
//! the distance function clamps it. An empty match result is not an error
//! either; it is an empty [`OverlapMapping`](crate::OverlapMapping).
//!
//! | Variant | Use Case |
//! |---------|----------|
//! | [`InvalidCrater`](CraterError::InvalidCrater) | Non-finite coordinates, latitude out of range, non-positive diameter |
//! | [`MalformedRecord`](CraterError::MalformedRecord) | A catalog row with a missing or non-numeric field |
//! | [`DanglingParent`](CraterError::DanglingParent) | A mapping names a parent the parent catalog does not contain |
//! | [`DuplicateId`](CraterError::DuplicateId) | Two records in one catalog share an id, so a mapping entry is ambiguous |
//! | [`InvalidId`](CraterError::InvalidId) | An empty crater identifier |

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CraterError {
    /// A crater whose geometry cannot be used for matching.
    #[error("Invalid crater {id}: {message}")]
    InvalidCrater { id: String, message: String },

    /// A catalog row that could not be turned into a crater record.
    #[error("Malformed record in {catalog} at line {line}: {message}")]
    MalformedRecord {
        catalog: String,
        line: u64,
        message: String,
    },

    /// A parent id with no matching parent record.
    #[error("Parent crater {id} is not present in the parent catalog")]
    DanglingParent { id: String },

    /// An id that resolves to more than one record of a catalog.
    #[error("Crater id {id} appears more than once in the {catalog} catalog")]
    DuplicateId { catalog: String, id: String },

    #[error("Invalid crater id: {message}")]
    InvalidId { message: String },
}

pub type CraterResult<T> = Result<T, CraterError>;

impl CraterError {
    pub fn invalid_crater(id: impl ToString, reason: &str) -> Self {
        Self::InvalidCrater {
            id: id.to_string(),
            message: reason.to_string(),
        }
    }

    pub fn malformed_record(catalog: &str, line: u64, reason: &str) -> Self {
        Self::MalformedRecord {
            catalog: catalog.to_string(),
            line,
            message: reason.to_string(),
        }
    }

    pub fn dangling_parent(id: impl ToString) -> Self {
        Self::DanglingParent { id: id.to_string() }
    }

    pub fn duplicate_id(catalog: &str, id: impl ToString) -> Self {
        Self::DuplicateId {
            catalog: catalog.to_string(),
            id: id.to_string(),
        }
    }
}
