use super::{
    InsightEngine, InsightOverview, ItemInsight, MenuInsights, Performance, Priority,
    Profitability, Recommendation, RecommendationKind,
};
use crate::domain::model::MenuItem;

const HIGH_MARGIN_PERCENT: f64 = 30.0;
const LOW_SALES: i32 = 10;
const HIGHLIGHT_LIMIT: usize = 5;

pub const NO_SALES_DATA: &str = "No sales data";

pub const ADVICE_RAISE_MARGIN: &str = "Consider reducing costs or increasing price";
pub const ADVICE_REPOSITION: &str = "Low sales - consider removing or repositioning";
pub const ADVICE_FEATURE: &str = "High performer - consider featuring prominently";
pub const ADVICE_STAR: &str = "Star item - excellent profit and popularity";

/// Fixed-threshold rules. Not learned and not configurable at runtime.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThresholdInsightEngine;

impl InsightEngine for ThresholdInsightEngine {
    fn name(&self) -> &str {
        "threshold-rules"
    }

    fn analyze(&self, items: &[MenuItem]) -> MenuInsights {
        MenuInsights {
            overview: overview(items),
            recommendations: recommendations(items),
            item_analysis: items.iter().map(analyze_item).collect(),
        }
    }
}

fn overview(items: &[MenuItem]) -> InsightOverview {
    let total_revenue = items
        .iter()
        .map(|i| i.price * f64::from(i.sales_count))
        .sum();
    let avg_profit_margin = if items.is_empty() {
        0.0
    } else {
        items.iter().map(|i| i.profit_margin).sum::<f64>() / items.len() as f64
    };

    InsightOverview {
        total_revenue,
        avg_profit_margin,
        top_performer: top_performer(items)
            .map(|i| i.name.clone())
            .unwrap_or_else(|| NO_SALES_DATA.to_string()),
        total_items: items.len(),
    }
}

/// Item with the most sales; the earliest one wins a tie, so a pre-sorted list yields its head.
fn top_performer(items: &[MenuItem]) -> Option<&MenuItem> {
    items.iter().fold(None, |best: Option<&MenuItem>, item| match best {
        Some(b) if b.sales_count >= item.sales_count => Some(b),
        _ => Some(item),
    })
}

fn recommendations(items: &[MenuItem]) -> Vec<Recommendation> {
    vec![
        Recommendation {
            kind: RecommendationKind::Pricing,
            priority: Priority::High,
            title: "Optimize High-Margin Items".to_string(),
            description: "Consider promoting items with profit margins above 30%".to_string(),
            affected_items: items
                .iter()
                .filter(|i| i.profit_margin > HIGH_MARGIN_PERCENT)
                .count(),
            potential_impact: "Revenue increase of 8-12%".to_string(),
        },
        Recommendation {
            kind: RecommendationKind::MenuEngineering,
            priority: Priority::Medium,
            title: "Remove Low Performers".to_string(),
            description: "Items with less than 10 sales may be candidates for removal".to_string(),
            affected_items: items.iter().filter(|i| i.sales_count < LOW_SALES).count(),
            potential_impact: "Cost reduction of 5-8%".to_string(),
        },
        Recommendation {
            kind: RecommendationKind::Positioning,
            priority: Priority::Medium,
            title: "Highlight Popular Items".to_string(),
            description: "Feature your top-selling items more prominently".to_string(),
            affected_items: items.len().min(HIGHLIGHT_LIMIT),
            potential_impact: "Sales increase of 10-15%".to_string(),
        },
    ]
}

pub fn performance(sales_count: i32) -> Performance {
    match sales_count {
        s if s > 50 => Performance::Excellent,
        s if s > 20 => Performance::Good,
        s if s > 5 => Performance::Average,
        _ => Performance::Poor,
    }
}

pub fn profitability(margin: f64) -> Profitability {
    if margin > 40.0 {
        Profitability::High
    } else if margin > 20.0 {
        Profitability::Medium
    } else {
        Profitability::Low
    }
}

pub fn item_advice(margin: f64, sales: i32) -> Vec<String> {
    let mut advice = Vec::new();
    if margin < 20.0 {
        advice.push(ADVICE_RAISE_MARGIN.to_string());
    }
    if sales < LOW_SALES {
        advice.push(ADVICE_REPOSITION.to_string());
    } else if sales > 100 {
        advice.push(ADVICE_FEATURE.to_string());
    }
    if margin > 40.0 && sales > 50 {
        advice.push(ADVICE_STAR.to_string());
    }
    advice
}

fn analyze_item(item: &MenuItem) -> ItemInsight {
    ItemInsight {
        id: item.id,
        name: item.name.clone(),
        category: item.category.clone(),
        performance: performance(item.sales_count),
        profitability: profitability(item.profit_margin),
        recommendations: item_advice(item.profit_margin, item.sales_count),
    }
}
