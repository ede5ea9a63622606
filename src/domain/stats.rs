//! Summary metrics over a menu's items.

use crate::domain::model::MenuItem;
use serde::Serialize;
use std::collections::BTreeSet;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MenuStats {
    pub total_items: usize,
    pub avg_price: f64,
    pub avg_margin: f64,
    pub total_sales: i64,
    /// Distinct categories, sorted.
    pub categories: Vec<String>,
}

impl MenuStats {
    /// Stats for a menu without items: every metric is zero.
    pub fn empty() -> Self {
        Self {
            total_items: 0,
            avg_price: 0.0,
            avg_margin: 0.0,
            total_sales: 0,
            categories: Vec::new(),
        }
    }
}

pub fn summarize(items: &[MenuItem]) -> MenuStats {
    if items.is_empty() {
        return MenuStats::empty();
    }

    let count = items.len() as f64;
    let price_sum: f64 = items.iter().map(|i| i.price).sum();
    let margin_sum: f64 = items.iter().map(|i| i.profit_margin).sum();
    let categories: BTreeSet<&str> = items.iter().map(|i| i.category.as_str()).collect();

    MenuStats {
        total_items: items.len(),
        avg_price: price_sum / count,
        avg_margin: margin_sum / count,
        total_sales: items.iter().map(|i| i64::from(i.sales_count)).sum(),
        categories: categories.into_iter().map(str::to_string).collect(),
    }
}
