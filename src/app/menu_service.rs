//! Reads and deletes for stored menus, always scoped to the requesting owner.

use crate::domain::insights::{InsightEngine, MenuInsights};
use crate::domain::model::{Menu, MenuItem, MenuSummary, UserId};
use crate::domain::stats::{summarize, MenuStats};
use crate::storage::{ItemOrder, MenuStore, StoreError};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};
use utoipa::ToSchema;

#[derive(Debug, thiserror::Error)]
pub enum MenuError {
    #[error("Menu not found")]
    NotFound,
    #[error("Menu not found or has no items")]
    NoAvailableItems,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Menu metadata with its stats attached.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MenuWithStats {
    #[serde(flatten)]
    pub menu: Menu,
    pub stats: MenuStats,
}

/// A menu and its items, ordered by category then name.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MenuDetail {
    pub menu: MenuWithStats,
    pub items: Vec<MenuItem>,
}

#[derive(Clone)]
pub struct MenuService {
    store: Arc<dyn MenuStore>,
    insights: Arc<dyn InsightEngine>,
}

impl MenuService {
    pub fn new(store: Arc<dyn MenuStore>, insights: Arc<dyn InsightEngine>) -> Self {
        Self { store, insights }
    }

    async fn owned_menu(&self, owner: UserId, menu_id: i64) -> Result<Menu, MenuError> {
        self.store
            .find_menu(owner, menu_id)
            .await?
            .ok_or(MenuError::NotFound)
    }

    pub async fn get_menu(&self, owner: UserId, menu_id: i64) -> Result<MenuDetail, MenuError> {
        let menu = self.owned_menu(owner, menu_id).await?;
        let items = self.store.list_items(menu_id, ItemOrder::ByCategory).await?;
        let stats = summarize(&items);
        Ok(MenuDetail {
            menu: MenuWithStats { menu, stats },
            items,
        })
    }

    pub async fn list_menus(&self, owner: UserId) -> Result<Vec<MenuSummary>, MenuError> {
        Ok(self.store.list_menus(owner).await?)
    }

    pub async fn delete_menu(&self, owner: UserId, menu_id: i64) -> Result<(), MenuError> {
        if !self.store.delete_menu(owner, menu_id).await? {
            return Err(MenuError::NotFound);
        }
        info!(owner = %owner, menu_id, "menu deleted");
        Ok(())
    }

    pub async fn insights(&self, owner: UserId, menu_id: i64) -> Result<MenuInsights, MenuError> {
        self.owned_menu(owner, menu_id).await?;
        let items = self
            .store
            .list_items(menu_id, ItemOrder::AvailableBySales)
            .await?;
        if items.is_empty() {
            return Err(MenuError::NoAvailableItems);
        }
        debug!(menu_id, engine = self.insights.name(), items = items.len(), "analyzing menu");
        Ok(self.insights.analyze(&items))
    }
}
