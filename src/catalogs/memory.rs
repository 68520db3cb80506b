//! In-memory catalog implementations backed by `tokio::sync::RwLock`.
//!
//! Used by the integration tests and by deployments that feed the
//! pricing preview endpoint from host-pushed snapshots instead of a
//! database.

use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{
    ItemCatalog, ItemRecord, NewPriceRecord, PriceRecord, PriceStore, TierCatalog, TierRecord,
};
use crate::errors::ServiceError;

#[derive(Default, Clone)]
pub struct InMemoryItemCatalog {
    items: Arc<RwLock<HashMap<String, ItemRecord>>>,
}

impl InMemoryItemCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn upsert_item(&self, item: ItemRecord) {
        self.items.write().await.insert(item.item_code.clone(), item);
    }
}

#[async_trait]
impl ItemCatalog for InMemoryItemCatalog {
    async fn find_item(&self, item_code: &str) -> Result<Option<ItemRecord>, ServiceError> {
        Ok(self.items.read().await.get(item_code).cloned())
    }
}

#[derive(Default, Clone)]
pub struct InMemoryTierCatalog {
    tiers: Arc<RwLock<Vec<TierRecord>>>,
}

impl InMemoryTierCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_tiers(&self, tiers: Vec<TierRecord>) {
        *self.tiers.write().await = tiers;
    }
}

#[async_trait]
impl TierCatalog for InMemoryTierCatalog {
    async fn active_tiers(&self) -> Result<Vec<TierRecord>, ServiceError> {
        let mut tiers: Vec<_> = self
            .tiers
            .read()
            .await
            .iter()
            .filter(|t| t.active)
            .cloned()
            .collect();
        tiers.sort_by(|a, b| a.from_metric_ton.cmp(&b.from_metric_ton));
        Ok(tiers)
    }

    async fn all_tiers(&self) -> Result<Vec<TierRecord>, ServiceError> {
        let mut tiers = self.tiers.read().await.clone();
        tiers.sort_by(|a, b| a.from_metric_ton.cmp(&b.from_metric_ton));
        Ok(tiers)
    }
}

#[derive(Default, Clone)]
pub struct InMemoryPriceStore {
    prices: Arc<RwLock<Vec<PriceRecord>>>,
}

impl InMemoryPriceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn seed(&self, price: PriceRecord) {
        self.prices.write().await.push(price);
    }

    pub async fn snapshot(&self) -> Vec<PriceRecord> {
        self.prices.read().await.clone()
    }
}

#[async_trait]
impl PriceStore for InMemoryPriceStore {
    async fn find_selling_price(
        &self,
        item_code: &str,
        price_list: &str,
        uom: &str,
    ) -> Result<Option<PriceRecord>, ServiceError> {
        Ok(self
            .prices
            .read()
            .await
            .iter()
            .find(|p| {
                p.selling && p.item_code == item_code && p.price_list == price_list && p.uom == uom
            })
            .cloned())
    }

    async fn selling_prices(&self, item_code: &str) -> Result<Vec<PriceRecord>, ServiceError> {
        Ok(self
            .prices
            .read()
            .await
            .iter()
            .filter(|p| p.selling && p.item_code == item_code)
            .cloned()
            .collect())
    }

    async fn insert(&self, price: NewPriceRecord) -> Result<(), ServiceError> {
        self.prices.write().await.push(PriceRecord {
            id: Uuid::new_v4(),
            item_code: price.item_code,
            price_list: price.price_list,
            uom: price.uom,
            price_list_rate: price.price_list_rate,
            currency: price.currency,
            selling: true,
        });
        Ok(())
    }

    async fn update_rate(&self, id: Uuid, rate: Decimal) -> Result<(), ServiceError> {
        let mut prices = self.prices.write().await;
        let entry = prices
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| ServiceError::NotFound(format!("Item price {id} not found")))?;
        entry.price_list_rate = rate;
        Ok(())
    }
}
