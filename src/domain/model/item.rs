use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Category assigned to items uploaded without one.
pub const DEFAULT_CATEGORY: &str = "Uncategorized";

/// Stored margins must stay below this magnitude (`NUMERIC(5,2)`).
pub const MARGIN_LIMIT: f64 = 1000.0;

/// Stored prices and costs must stay below this magnitude (`NUMERIC(10,2)`).
pub const AMOUNT_LIMIT: f64 = 100_000_000.0;

/// Profit margin in percent, rounded to two decimals.
///
/// This is the only place the margin is computed. Stores call it on every read
/// and write so the value can never drift from the current `price`/`cost`.
pub fn profit_margin(price: f64, cost: f64) -> f64 {
    if cost > 0.0 && price > 0.0 {
        round2((price - cost) / price * 100.0)
    } else {
        0.0
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Rounds a price or cost to whole cents, the precision of `NUMERIC(10,2)`.
pub fn round_amount(value: f64) -> f64 {
    round2(value)
}

/// A validated, normalized item ready to be written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NewMenuItem {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub cost: f64,
    pub category: String,
    pub tags: Vec<String>,
    pub sales_count: i32,
    pub is_available: bool,
}

impl NewMenuItem {
    pub fn profit_margin(&self) -> f64 {
        profit_margin(self.price, self.cost)
    }
}

/// A persisted menu item as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MenuItem {
    pub id: i64,
    pub menu_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub cost: f64,
    pub category: String,
    pub tags: Vec<String>,
    pub sales_count: i32,
    pub profit_margin: f64,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MenuItem {
    /// Builds the stored form of `item`, deriving the margin.
    pub fn from_new(
        id: i64,
        menu_id: i64,
        item: &NewMenuItem,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            menu_id,
            name: item.name.clone(),
            description: item.description.clone(),
            price: round_amount(item.price),
            cost: round_amount(item.cost),
            category: item.category.clone(),
            tags: item.tags.clone(),
            sales_count: item.sales_count,
            profit_margin: profit_margin(round_amount(item.price), round_amount(item.cost)),
            is_available: item.is_available,
            created_at,
            updated_at: created_at,
        }
    }
}
