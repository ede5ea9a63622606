//! Row-level validation of uploaded records.

use crate::domain::model::NewMenuItem;
use crate::domain::upload::RawRecord;
use serde::Serialize;
use utoipa::ToSchema;

pub mod record;

pub use record::validate;

/// Every problem found in one source row.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RowValidationError {
    /// 1-based position of the record in the uploaded file.
    #[serde(rename = "row")]
    pub row_index: usize,
    pub errors: Vec<String>,
}

/// Records split into the ones that passed and the per-row failures.
#[derive(Debug, Default)]
pub struct Partition {
    pub valid: Vec<NewMenuItem>,
    pub errors: Vec<RowValidationError>,
}

/// Validates each record independently; no row stops the others from being checked.
pub fn validate_all(records: &[RawRecord]) -> Partition {
    let mut partition = Partition::default();
    for (idx, record) in records.iter().enumerate() {
        match validate(record) {
            Ok(item) => partition.valid.push(item),
            Err(errors) => partition.errors.push(RowValidationError {
                row_index: idx + 1,
                errors,
            }),
        }
    }
    partition
}
