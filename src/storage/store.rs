//! The persistence seam: everything the services need from a relational store.

use crate::domain::model::{Menu, MenuItem, MenuSummary, NewMenu, NewMenuItem, NewUser, UserId};
use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// Integrity rules the store can report, independent of the backing database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintKind {
    Duplicate,
    DanglingReference,
    MissingField,
    OutOfRange,
}

impl ConstraintKind {
    /// Maps a Postgres SQLSTATE to the constraint it reports.
    pub fn from_sqlstate(code: &str) -> Option<Self> {
        match code {
            "23505" => Some(Self::Duplicate),
            "23503" => Some(Self::DanglingReference),
            "23502" => Some(Self::MissingField),
            "22003" => Some(Self::OutOfRange),
            _ => None,
        }
    }

    /// User-facing description.
    pub fn message(&self) -> &'static str {
        match self {
            Self::Duplicate => "Duplicate entry detected",
            Self::DanglingReference => "Referenced record does not exist",
            Self::MissingField => "Required field is missing",
            Self::OutOfRange => "Value out of range",
        }
    }
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{}: {detail}", .kind.message())]
    Constraint { kind: ConstraintKind, detail: String },

    #[error("storage operation timed out")]
    Timeout,

    #[error("database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        let constraint = err.as_database_error().and_then(|db| {
            let kind = db.code().as_deref().and_then(ConstraintKind::from_sqlstate)?;
            Some((kind, db.message().to_string()))
        });
        if let Some((kind, detail)) = constraint {
            return StoreError::Constraint { kind, detail };
        }
        match err {
            sqlx::Error::PoolTimedOut => StoreError::Timeout,
            other => StoreError::Database(other),
        }
    }
}

/// Which items of a menu to return, and in what order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemOrder {
    /// Every item, by category then name.
    ByCategory,
    /// Available items only, best sellers first (ties by id).
    AvailableBySales,
}

#[async_trait]
pub trait MenuStore: Send + Sync {
    /// Creates the menu and all of its items atomically: either every row is
    /// written and visible, or none are.
    async fn create_menu_with_items(
        &self,
        owner: UserId,
        menu: &NewMenu,
        items: &[NewMenuItem],
    ) -> Result<i64, StoreError>;

    async fn find_menu(&self, owner: UserId, menu_id: i64) -> Result<Option<Menu>, StoreError>;

    async fn list_items(&self, menu_id: i64, order: ItemOrder) -> Result<Vec<MenuItem>, StoreError>;

    /// The owner's menus, newest first.
    async fn list_menus(&self, owner: UserId) -> Result<Vec<MenuSummary>, StoreError>;

    /// Deletes the menu and, by cascade, its items. Returns false if no such menu.
    async fn delete_menu(&self, owner: UserId, menu_id: i64) -> Result<bool, StoreError>;

    /// Inserts the account or refreshes its restaurant name when the email exists.
    async fn upsert_user(&self, user: &NewUser) -> Result<UserId, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}
