//! Menu insights: an overview, menu-wide recommendations and a per-item read-out.
//!
//! Callers only see the `InsightEngine` trait so the fixed threshold rules can be
//! swapped for a scoring model later without touching the services or handlers.

use crate::domain::model::MenuItem;
use serde::Serialize;
use utoipa::ToSchema;

pub mod rules;

pub use rules::ThresholdInsightEngine;

/// Produces insights for a set of menu items.
///
/// Implementations must be pure functions of `items`: no I/O, same input same output.
pub trait InsightEngine: Send + Sync {
    fn name(&self) -> &str;

    /// `items` are expected to be ordered by sales, best seller first.
    fn analyze(&self, items: &[MenuItem]) -> MenuInsights;
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MenuInsights {
    pub overview: InsightOverview,
    pub recommendations: Vec<Recommendation>,
    pub item_analysis: Vec<ItemInsight>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsightOverview {
    pub total_revenue: f64,
    pub avg_profit_margin: f64,
    pub top_performer: String,
    pub total_items: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    Pricing,
    MenuEngineering,
    Positioning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    pub priority: Priority,
    pub title: String,
    pub description: String,
    pub affected_items: usize,
    pub potential_impact: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Performance {
    Excellent,
    Good,
    Average,
    Poor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Profitability {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ItemInsight {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub performance: Performance,
    pub profitability: Profitability,
    pub recommendations: Vec<String>,
}
