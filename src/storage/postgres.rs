//! Menu store backed by PostgreSQL.

use super::store::{ItemOrder, MenuStore, StoreError};
use crate::domain::model::{
    profit_margin, Menu, MenuItem, MenuSummary, NewMenu, NewMenuItem, NewUser, UserId,
};
use crate::infra::config::DatabaseSettings;
use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Postgres, Row, Transaction};
use std::time::Duration;
use tracing::{debug, warn};

const MENU_COLUMNS: &str = "m.id, m.user_id, m.title, m.description, m.status, m.created_at, m.updated_at";

const ITEM_COLUMNS: &str = "id, menu_id, name, description, price::float8 AS price, \
    cost::float8 AS cost, category, tags, sales_count, is_available, created_at, updated_at";

#[derive(Clone)]
pub struct PgMenuStore {
    pool: PgPool,
}

impl PgMenuStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a pool to `url` using the configured limits.
    pub async fn connect(url: &str, settings: &DatabaseSettings) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .acquire_timeout(Duration::from_secs(settings.acquire_timeout_secs))
            .connect(url)
            .await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

async fn insert_menu_rows(
    tx: &mut Transaction<'_, Postgres>,
    owner: UserId,
    menu: &NewMenu,
    items: &[NewMenuItem],
) -> Result<i64, sqlx::Error> {
    let menu_id: i64 = sqlx::query_scalar(
        "INSERT INTO menus (user_id, title, description, status) VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(owner.0)
    .bind(&menu.title)
    .bind(&menu.description)
    .bind(&menu.status)
    .fetch_one(&mut **tx)
    .await?;

    for item in items {
        sqlx::query(
            "INSERT INTO menu_items
                (menu_id, name, description, price, cost, category, tags, sales_count, is_available)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(menu_id)
        .bind(&item.name)
        .bind(&item.description)
        .bind(item.price)
        .bind(item.cost)
        .bind(&item.category)
        .bind(&item.tags)
        .bind(item.sales_count)
        .bind(item.is_available)
        .execute(&mut **tx)
        .await?;
    }

    Ok(menu_id)
}

fn menu_from_row(row: &PgRow) -> Result<Menu, sqlx::Error> {
    Ok(Menu {
        id: row.try_get("id")?,
        user_id: UserId(row.try_get("user_id")?),
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        status: row.try_get("status")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn item_from_row(row: &PgRow) -> Result<MenuItem, sqlx::Error> {
    let price: f64 = row.try_get("price")?;
    let cost: f64 = row.try_get("cost")?;
    Ok(MenuItem {
        id: row.try_get("id")?,
        menu_id: row.try_get("menu_id")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        price,
        cost,
        category: row.try_get("category")?,
        tags: row.try_get("tags")?,
        sales_count: row.try_get("sales_count")?,
        profit_margin: profit_margin(price, cost),
        is_available: row.try_get("is_available")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

#[async_trait]
impl MenuStore for PgMenuStore {
    async fn create_menu_with_items(
        &self,
        owner: UserId,
        menu: &NewMenu,
        items: &[NewMenuItem],
    ) -> Result<i64, StoreError> {
        let mut tx = self.pool.begin().await?;

        match insert_menu_rows(&mut tx, owner, menu, items).await {
            Ok(menu_id) => {
                tx.commit().await?;
                debug!(menu_id, items = items.len(), "menu transaction committed");
                Ok(menu_id)
            }
            Err(e) => {
                if let Err(rollback_err) = tx.rollback().await {
                    warn!(error = %rollback_err, "menu transaction rollback failed");
                }
                Err(e.into())
            }
        }
    }

    async fn find_menu(&self, owner: UserId, menu_id: i64) -> Result<Option<Menu>, StoreError> {
        let sql = format!("SELECT {MENU_COLUMNS} FROM menus m WHERE m.id = $1 AND m.user_id = $2");
        let row = sqlx::query(&sql)
            .bind(menu_id)
            .bind(owner.0)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(menu_from_row).transpose()?)
    }

    async fn list_items(&self, menu_id: i64, order: ItemOrder) -> Result<Vec<MenuItem>, StoreError> {
        let sql = match order {
            ItemOrder::ByCategory => format!(
                "SELECT {ITEM_COLUMNS} FROM menu_items WHERE menu_id = $1 ORDER BY category, name, id"
            ),
            ItemOrder::AvailableBySales => format!(
                "SELECT {ITEM_COLUMNS} FROM menu_items
                 WHERE menu_id = $1 AND is_available = true
                 ORDER BY sales_count DESC, id"
            ),
        };
        let rows = sqlx::query(&sql).bind(menu_id).fetch_all(&self.pool).await?;
        let items = rows
            .iter()
            .map(item_from_row)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(items)
    }

    async fn list_menus(&self, owner: UserId) -> Result<Vec<MenuSummary>, StoreError> {
        let sql = format!(
            "SELECT {MENU_COLUMNS},
                    COUNT(mi.id) AS item_count,
                    AVG(mi.price)::float8 AS avg_price,
                    COALESCE(SUM(mi.sales_count), 0)::int8 AS total_sales
             FROM menus m
             LEFT JOIN menu_items mi ON m.id = mi.menu_id
             WHERE m.user_id = $1
             GROUP BY m.id
             ORDER BY m.created_at DESC, m.id DESC"
        );
        let rows = sqlx::query(&sql).bind(owner.0).fetch_all(&self.pool).await?;

        let mut summaries = Vec::with_capacity(rows.len());
        for row in &rows {
            summaries.push(MenuSummary {
                menu: menu_from_row(row)?,
                item_count: row.try_get("item_count")?,
                avg_price: row.try_get("avg_price")?,
                total_sales: row.try_get("total_sales")?,
            });
        }
        Ok(summaries)
    }

    async fn delete_menu(&self, owner: UserId, menu_id: i64) -> Result<bool, StoreError> {
        let deleted: Option<i64> =
            sqlx::query_scalar("DELETE FROM menus WHERE id = $1 AND user_id = $2 RETURNING id")
                .bind(menu_id)
                .bind(owner.0)
                .fetch_optional(&self.pool)
                .await?;
        Ok(deleted.is_some())
    }

    async fn upsert_user(&self, user: &NewUser) -> Result<UserId, StoreError> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO users (email, password, role, restaurant_name)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (email) DO UPDATE SET restaurant_name = EXCLUDED.restaurant_name
             RETURNING id",
        )
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.role)
        .bind(&user.restaurant_name)
        .fetch_one(&self.pool)
        .await?;
        Ok(UserId(id))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
