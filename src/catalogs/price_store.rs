use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::entities::item_price;
use crate::errors::ServiceError;

/// An existing price-list entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceRecord {
    pub id: Uuid,
    pub item_code: String,
    pub price_list: String,
    pub uom: String,
    pub price_list_rate: Decimal,
    pub currency: String,
    pub selling: bool,
}

impl From<item_price::Model> for PriceRecord {
    fn from(model: item_price::Model) -> Self {
        Self {
            id: model.id,
            item_code: model.item_code,
            price_list: model.price_list,
            uom: model.uom,
            price_list_rate: model.price_list_rate,
            currency: model.currency,
            selling: model.selling,
        }
    }
}

/// Fields for inserting a derived price entry.
#[derive(Debug, Clone)]
pub struct NewPriceRecord {
    pub item_code: String,
    pub item_name: Option<String>,
    pub item_description: Option<String>,
    pub price_list: String,
    pub uom: String,
    pub price_list_rate: Decimal,
    pub currency: String,
}

/// Price-list access with upsert semantics for the kg/PCS sync.
#[async_trait]
pub trait PriceStore: Send + Sync {
    /// First selling price for item + price list + unit, if any.
    async fn find_selling_price(
        &self,
        item_code: &str,
        price_list: &str,
        uom: &str,
    ) -> Result<Option<PriceRecord>, ServiceError>;

    /// All selling prices for an item, across price lists and units.
    async fn selling_prices(&self, item_code: &str) -> Result<Vec<PriceRecord>, ServiceError>;

    /// Inserts a new selling price entry.
    async fn insert(&self, price: NewPriceRecord) -> Result<(), ServiceError>;

    /// Overwrites the rate of an existing entry.
    async fn update_rate(&self, id: Uuid, rate: Decimal) -> Result<(), ServiceError>;
}

/// sea-orm backed price store.
#[derive(Clone)]
pub struct SeaOrmPriceStore {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmPriceStore {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PriceStore for SeaOrmPriceStore {
    async fn find_selling_price(
        &self,
        item_code: &str,
        price_list: &str,
        uom: &str,
    ) -> Result<Option<PriceRecord>, ServiceError> {
        let found = item_price::Entity::find()
            .filter(item_price::Column::ItemCode.eq(item_code))
            .filter(item_price::Column::PriceList.eq(price_list))
            .filter(item_price::Column::Uom.eq(uom))
            .filter(item_price::Column::Selling.eq(true))
            .one(self.db.as_ref())
            .await
            .map_err(ServiceError::from)?;
        Ok(found.map(PriceRecord::from))
    }

    async fn selling_prices(&self, item_code: &str) -> Result<Vec<PriceRecord>, ServiceError> {
        let prices = item_price::Entity::find()
            .filter(item_price::Column::ItemCode.eq(item_code))
            .filter(item_price::Column::Selling.eq(true))
            .all(self.db.as_ref())
            .await
            .map_err(ServiceError::from)?;
        Ok(prices.into_iter().map(PriceRecord::from).collect())
    }

    async fn insert(&self, price: NewPriceRecord) -> Result<(), ServiceError> {
        let now = Utc::now();
        let model = item_price::ActiveModel {
            id: Set(Uuid::new_v4()),
            item_code: Set(price.item_code),
            item_name: Set(price.item_name),
            item_description: Set(price.item_description),
            price_list: Set(price.price_list),
            uom: Set(price.uom),
            price_list_rate: Set(price.price_list_rate),
            currency: Set(price.currency),
            selling: Set(true),
            buying: Set(false),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };
        model.insert(self.db.as_ref()).await.map_err(ServiceError::from)?;
        Ok(())
    }

    async fn update_rate(&self, id: Uuid, rate: Decimal) -> Result<(), ServiceError> {
        let existing = item_price::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(ServiceError::from)?
            .ok_or_else(|| ServiceError::NotFound(format!("Item price {id} not found")))?;

        let mut active: item_price::ActiveModel = existing.into();
        active.price_list_rate = Set(rate);
        active.updated_at = Set(Utc::now().into());
        active.update(self.db.as_ref()).await.map_err(ServiceError::from)?;
        Ok(())
    }
}
