use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::UserId;

pub const TITLE_MAX_CHARS: usize = 255;
pub const DEFAULT_MENU_STATUS: &str = "active";

pub const TITLE_REQUIRED: &str = "Menu title is required";
pub const TITLE_TOO_LONG: &str = "Menu title too long";

/// Menu metadata supplied alongside an upload.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMenu {
    pub title: String,
    pub description: Option<String>,
    pub status: String,
}

impl NewMenu {
    /// Normalizes the title and description, rejecting titles that cannot be stored.
    pub fn new(title: &str, description: Option<&str>) -> Result<Self, &'static str> {
        let title = validate_title(title)?;
        let description = description
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string);
        Ok(Self {
            title,
            description,
            status: DEFAULT_MENU_STATUS.to_string(),
        })
    }
}

/// Trims `title` and checks it is present and at most 255 characters.
pub fn validate_title(title: &str) -> Result<String, &'static str> {
    let title = title.trim();
    if title.is_empty() {
        return Err(TITLE_REQUIRED);
    }
    if title.chars().count() > TITLE_MAX_CHARS {
        return Err(TITLE_TOO_LONG);
    }
    Ok(title.to_string())
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Menu {
    pub id: i64,
    #[schema(value_type = i64)]
    pub user_id: UserId,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One row of the owner's menu list, with aggregates over its items.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MenuSummary {
    #[serde(flatten)]
    pub menu: Menu,
    pub item_count: i64,
    /// `None` when the menu has no items.
    pub avg_price: Option<f64>,
    pub total_sales: i64,
}
