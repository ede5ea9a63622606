//! Volatile menu store for demos and tests.
//!
//! Applies the same integrity rules as the Postgres schema. A whole menu batch is
//! checked on staged rows under the write lock before anything is inserted, so
//! readers never observe a partial menu.

use super::store::{ConstraintKind, ItemOrder, MenuStore, StoreError};
use crate::domain::model::{
    Menu, MenuItem, MenuSummary, NewMenu, NewMenuItem, NewUser, UserId, AMOUNT_LIMIT,
    MARGIN_LIMIT,
};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<i64, NewUser>,
    menus: BTreeMap<i64, Menu>,
    items: BTreeMap<i64, MenuItem>,
    last_user_id: i64,
    last_menu_id: i64,
    last_item_id: i64,
}

#[derive(Debug, Default)]
pub struct MemoryMenuStore {
    tables: RwLock<Tables>,
}

impl MemoryMenuStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored menus and items.
    pub async fn row_counts(&self) -> (usize, usize) {
        let tables = self.tables.read().await;
        (tables.menus.len(), tables.items.len())
    }
}

fn constraint(kind: ConstraintKind, detail: impl Into<String>) -> StoreError {
    StoreError::Constraint {
        kind,
        detail: detail.into(),
    }
}

fn check_item(item: &NewMenuItem) -> Result<(), StoreError> {
    if item.name.trim().is_empty() {
        return Err(constraint(
            ConstraintKind::MissingField,
            "menu_items.name must not be empty",
        ));
    }
    if item.price.abs() >= AMOUNT_LIMIT || item.cost.abs() >= AMOUNT_LIMIT {
        return Err(constraint(
            ConstraintKind::OutOfRange,
            format!("price/cost of '{}' exceeds NUMERIC(10,2)", item.name),
        ));
    }
    if item.profit_margin().abs() >= MARGIN_LIMIT {
        return Err(constraint(
            ConstraintKind::OutOfRange,
            format!("profit margin of '{}' exceeds NUMERIC(5,2)", item.name),
        ));
    }
    Ok(())
}

#[async_trait]
impl MenuStore for MemoryMenuStore {
    async fn create_menu_with_items(
        &self,
        owner: UserId,
        menu: &NewMenu,
        items: &[NewMenuItem],
    ) -> Result<i64, StoreError> {
        let mut tables = self.tables.write().await;

        if !tables.users.contains_key(&owner.0) {
            return Err(constraint(
                ConstraintKind::DanglingReference,
                format!("user {} does not exist", owner),
            ));
        }
        if menu.title.trim().is_empty() {
            return Err(constraint(
                ConstraintKind::MissingField,
                "menus.title must not be empty",
            ));
        }

        let now = Utc::now();
        let menu_id = tables.last_menu_id + 1;
        let mut staged = Vec::with_capacity(items.len());
        for (offset, item) in items.iter().enumerate() {
            check_item(item)?;
            let item_id = tables.last_item_id + 1 + offset as i64;
            staged.push(MenuItem::from_new(item_id, menu_id, item, now));
        }

        // Nothing below can fail.
        tables.last_menu_id = menu_id;
        tables.last_item_id += staged.len() as i64;
        tables.menus.insert(
            menu_id,
            Menu {
                id: menu_id,
                user_id: owner,
                title: menu.title.clone(),
                description: menu.description.clone(),
                status: menu.status.clone(),
                created_at: now,
                updated_at: now,
            },
        );
        for item in staged {
            tables.items.insert(item.id, item);
        }
        Ok(menu_id)
    }

    async fn find_menu(&self, owner: UserId, menu_id: i64) -> Result<Option<Menu>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .menus
            .get(&menu_id)
            .filter(|m| m.user_id == owner)
            .cloned())
    }

    async fn list_items(
        &self,
        menu_id: i64,
        order: ItemOrder,
    ) -> Result<Vec<MenuItem>, StoreError> {
        let tables = self.tables.read().await;
        let mut items: Vec<MenuItem> = tables
            .items
            .values()
            .filter(|i| i.menu_id == menu_id)
            .cloned()
            .collect();

        match order {
            ItemOrder::ByCategory => items.sort_by(|a, b| {
                a.category
                    .cmp(&b.category)
                    .then_with(|| a.name.cmp(&b.name))
                    .then_with(|| a.id.cmp(&b.id))
            }),
            ItemOrder::AvailableBySales => {
                items.retain(|i| i.is_available);
                items.sort_by(|a, b| {
                    b.sales_count
                        .cmp(&a.sales_count)
                        .then_with(|| a.id.cmp(&b.id))
                });
            }
        }
        Ok(items)
    }

    async fn list_menus(&self, owner: UserId) -> Result<Vec<MenuSummary>, StoreError> {
        let tables = self.tables.read().await;
        let mut summaries: Vec<MenuSummary> = tables
            .menus
            .values()
            .filter(|m| m.user_id == owner)
            .map(|menu| {
                let items: Vec<&MenuItem> =
                    tables.items.values().filter(|i| i.menu_id == menu.id).collect();
                let avg_price = if items.is_empty() {
                    None
                } else {
                    Some(items.iter().map(|i| i.price).sum::<f64>() / items.len() as f64)
                };
                MenuSummary {
                    menu: menu.clone(),
                    item_count: items.len() as i64,
                    avg_price,
                    total_sales: items.iter().map(|i| i64::from(i.sales_count)).sum(),
                }
            })
            .collect();

        summaries.sort_by(|a, b| {
            b.menu
                .created_at
                .cmp(&a.menu.created_at)
                .then_with(|| b.menu.id.cmp(&a.menu.id))
        });
        Ok(summaries)
    }

    async fn delete_menu(&self, owner: UserId, menu_id: i64) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        let owned = tables
            .menus
            .get(&menu_id)
            .is_some_and(|m| m.user_id == owner);
        if !owned {
            return Ok(false);
        }
        tables.menus.remove(&menu_id);
        tables.items.retain(|_, item| item.menu_id != menu_id);
        Ok(true)
    }

    async fn upsert_user(&self, user: &NewUser) -> Result<UserId, StoreError> {
        let mut tables = self.tables.write().await;
        if let Some((id, existing)) = tables
            .users
            .iter_mut()
            .find(|(_, row)| row.email == user.email)
        {
            existing.restaurant_name = user.restaurant_name.clone();
            return Ok(UserId(*id));
        }

        tables.last_user_id += 1;
        let id = tables.last_user_id;
        tables.users.insert(id, user.clone());
        Ok(UserId(id))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
