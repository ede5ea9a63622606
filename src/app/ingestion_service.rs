//! Upload ingestion: validate every record, then write the menu atomically.
//!
//! A menu is either stored with all of its items or not at all. Any invalid
//! row aborts the whole upload before the store is touched, and failures inside
//! the store transaction roll it back.

use crate::domain::model::{NewMenu, UserId};
use crate::domain::upload::RawRecord;
use crate::domain::validation::{validate_all, RowValidationError};
use crate::storage::{MenuStore, StoreError};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};
use utoipa::ToSchema;

#[derive(Debug, thiserror::Error)]
pub enum IngestionError {
    #[error("Menu data must be a non-empty array")]
    EmptyPayload,
    #[error("{0}")]
    InvalidMenu(&'static str),
    #[error("Validation errors found in menu data")]
    ValidationFailed {
        row_errors: Vec<RowValidationError>,
        valid_items: usize,
    },
    #[error(transparent)]
    Persistence(#[from] StoreError),
}

/// Outcome of a successful ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IngestionReport {
    pub menu_id: i64,
    pub items_processed: usize,
}

#[derive(Clone)]
pub struct IngestionService {
    store: Arc<dyn MenuStore>,
    timeout: Duration,
}

impl IngestionService {
    pub fn new(store: Arc<dyn MenuStore>, timeout: Duration) -> Self {
        Self { store, timeout }
    }

    pub async fn ingest(
        &self,
        owner: UserId,
        title: &str,
        description: Option<&str>,
        records: &[RawRecord],
    ) -> Result<IngestionReport, IngestionError> {
        if records.is_empty() {
            return Err(IngestionError::EmptyPayload);
        }

        let partition = validate_all(records);
        if !partition.errors.is_empty() {
            warn!(
                owner = %owner,
                invalid_rows = partition.errors.len(),
                valid_items = partition.valid.len(),
                "menu upload rejected by row validation"
            );
            return Err(IngestionError::ValidationFailed {
                row_errors: partition.errors,
                valid_items: partition.valid.len(),
            });
        }

        let menu = NewMenu::new(title, description).map_err(IngestionError::InvalidMenu)?;

        // Dropping the store future on expiry drops its transaction, which rolls back.
        let write = self
            .store
            .create_menu_with_items(owner, &menu, &partition.valid);
        let menu_id = match tokio::time::timeout(self.timeout, write).await {
            Ok(Ok(menu_id)) => menu_id,
            Ok(Err(e)) => {
                error!(owner = %owner, error = %e, "menu transaction failed");
                return Err(e.into());
            }
            Err(_) => {
                error!(owner = %owner, timeout = ?self.timeout, "menu transaction timed out");
                return Err(StoreError::Timeout.into());
            }
        };

        info!(
            owner = %owner,
            menu_id,
            items = partition.valid.len(),
            title = %menu.title,
            "menu ingested"
        );
        Ok(IngestionReport {
            menu_id,
            items_processed: partition.valid.len(),
        })
    }
}
