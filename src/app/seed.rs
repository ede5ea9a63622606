//! Demo account and sample menu, written through the regular ingestion path.

use super::ingestion_service::{IngestionError, IngestionService};
use crate::domain::model::{NewUser, UserId, DEFAULT_USER_ROLE};
use crate::domain::upload::RawRecord;
use crate::infra::auth::hash_password;
use crate::storage::MenuStore;
use serde_json::{json, Value as JsonValue};
use tracing::info;

pub const DEMO_EMAIL: &str = "demo@menuiq.com";
pub const DEMO_PASSWORD: &str = "password123";
pub const DEMO_RESTAURANT: &str = "The Golden Spoon";
pub const DEMO_MENU_TITLE: &str = "Main Menu";
const DEMO_MENU_DESCRIPTION: &str = "Our signature dining menu featuring seasonal favorites";

#[derive(Debug)]
pub struct SeedReport {
    pub owner: UserId,
    pub menu_id: i64,
    pub items: usize,
}

pub fn demo_items() -> Vec<RawRecord> {
    let items = json!([
        {
            "name": "Grilled Atlantic Salmon",
            "description": "Fresh salmon fillet with lemon herb butter, served with seasonal vegetables",
            "price": 28.99, "cost": 12.50, "category": "Main Course",
            "tags": ["seafood", "healthy", "gluten-free"], "sales_count": 89
        },
        {
            "name": "Caesar Salad",
            "description": "Crisp romaine lettuce with house-made croutons and parmesan",
            "price": 14.99, "cost": 4.25, "category": "Appetizer",
            "tags": ["vegetarian", "classic"], "sales_count": 127
        },
        {
            "name": "Beef Tenderloin",
            "description": "8oz premium beef tenderloin with red wine reduction",
            "price": 42.99, "cost": 18.75, "category": "Main Course",
            "tags": ["premium", "beef"], "sales_count": 67
        },
        {
            "name": "Mushroom Risotto",
            "description": "Creamy arborio rice with wild mushrooms and truffle oil",
            "price": 22.99, "cost": 8.50, "category": "Main Course",
            "tags": ["vegetarian", "italian"], "sales_count": 45
        },
        {
            "name": "Chocolate Lava Cake",
            "description": "Warm chocolate cake with molten center, served with vanilla ice cream",
            "price": 12.99, "cost": 3.75, "category": "Dessert",
            "tags": ["dessert", "chocolate"], "sales_count": 93
        },
        {
            "name": "Pan-Seared Duck Breast",
            "description": "Herb-crusted duck breast with cherry gastrique",
            "price": 36.99, "cost": 16.25, "category": "Main Course",
            "tags": ["poultry", "premium"], "sales_count": 34
        },
        {
            "name": "Caprese Salad",
            "description": "Fresh mozzarella, tomatoes, and basil with balsamic glaze",
            "price": 16.99, "cost": 5.50, "category": "Appetizer",
            "tags": ["vegetarian", "fresh"], "sales_count": 78
        },
        {
            "name": "Lobster Bisque",
            "description": "Rich and creamy lobster soup with cognac",
            "price": 18.99, "cost": 8.25, "category": "Appetizer",
            "tags": ["seafood", "soup"], "sales_count": 56
        },
        {
            "name": "Vegetarian Pasta",
            "description": "Penne pasta with roasted vegetables and pesto sauce",
            "price": 19.99, "cost": 6.75, "category": "Main Course",
            "tags": ["vegetarian", "pasta"], "sales_count": 41
        },
        {
            "name": "Tiramisu",
            "description": "Classic Italian dessert with coffee-soaked ladyfingers",
            "price": 10.99, "cost": 3.25, "category": "Dessert",
            "tags": ["dessert", "italian", "coffee"], "sales_count": 62
        }
    ]);

    match items {
        JsonValue::Array(rows) => rows
            .into_iter()
            .filter_map(|row| match row {
                JsonValue::Object(record) => Some(record),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Creates (or refreshes) the demo owner and ingests a fresh sample menu for it.
pub async fn seed_demo(
    store: &dyn MenuStore,
    ingestion: &IngestionService,
) -> anyhow::Result<SeedReport> {
    let owner = store
        .upsert_user(&NewUser {
            email: DEMO_EMAIL.to_string(),
            password_hash: hash_password(DEMO_PASSWORD)?,
            role: DEFAULT_USER_ROLE.to_string(),
            restaurant_name: Some(DEMO_RESTAURANT.to_string()),
        })
        .await?;
    info!(owner = %owner, email = DEMO_EMAIL, "demo user created/updated");

    let report = ingestion
        .ingest(
            owner,
            DEMO_MENU_TITLE,
            Some(DEMO_MENU_DESCRIPTION),
            &demo_items(),
        )
        .await
        .map_err(|e| match e {
            IngestionError::ValidationFailed { row_errors, .. } => {
                anyhow::anyhow!("demo menu failed validation: {row_errors:?}")
            }
            other => other.into(),
        })?;

    Ok(SeedReport {
        owner,
        menu_id: report.menu_id,
        items: report.items_processed,
    })
}
