use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait};
use std::sync::Arc;

use super::ItemRecord;
use crate::entities::item;
use crate::errors::ServiceError;

/// Read-only lookup of catalog items by code.
#[async_trait]
pub trait ItemCatalog: Send + Sync {
    /// Returns `None` when the item does not exist; missing items are a
    /// skip condition for the pricing logic, not an error.
    async fn find_item(&self, item_code: &str) -> Result<Option<ItemRecord>, ServiceError>;
}

/// sea-orm backed item lookup.
#[derive(Clone)]
pub struct SeaOrmItemCatalog {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmItemCatalog {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ItemCatalog for SeaOrmItemCatalog {
    async fn find_item(&self, item_code: &str) -> Result<Option<ItemRecord>, ServiceError> {
        let found = item::Entity::find_by_id(item_code.to_string())
            .one(self.db.as_ref())
            .await
            .map_err(ServiceError::from)?;
        Ok(found.map(ItemRecord::from))
    }
}
