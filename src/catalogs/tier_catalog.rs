use async_trait::async_trait;
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::entities::discount_tier;
use crate::errors::ServiceError;

/// One weight band of the discount schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierRecord {
    pub from_metric_ton: Decimal,
    pub to_metric_ton: Decimal,
    pub discount_per_kg: Decimal,
    pub active: bool,
}

impl From<discount_tier::Model> for TierRecord {
    fn from(model: discount_tier::Model) -> Self {
        Self {
            from_metric_ton: model.from_metric_ton,
            to_metric_ton: model.to_metric_ton,
            discount_per_kg: model.discount_per_kg,
            active: model.active,
        }
    }
}

/// Read-only access to the discount tier table.
#[async_trait]
pub trait TierCatalog: Send + Sync {
    /// Active tiers, ascending by lower bound. Input to tier selection.
    async fn active_tiers(&self) -> Result<Vec<TierRecord>, ServiceError>;

    /// Every tier regardless of the active flag, ascending by lower
    /// bound. The admin listing wants inactive bands visible too.
    async fn all_tiers(&self) -> Result<Vec<TierRecord>, ServiceError>;
}

/// sea-orm backed tier table access.
#[derive(Clone)]
pub struct SeaOrmTierCatalog {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmTierCatalog {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TierCatalog for SeaOrmTierCatalog {
    async fn active_tiers(&self) -> Result<Vec<TierRecord>, ServiceError> {
        let tiers = discount_tier::Entity::find()
            .filter(discount_tier::Column::Active.eq(true))
            .order_by_asc(discount_tier::Column::FromMetricTon)
            .all(self.db.as_ref())
            .await
            .map_err(ServiceError::from)?;
        Ok(tiers.into_iter().map(TierRecord::from).collect())
    }

    async fn all_tiers(&self) -> Result<Vec<TierRecord>, ServiceError> {
        let tiers = discount_tier::Entity::find()
            .order_by_asc(discount_tier::Column::FromMetricTon)
            .all(self.db.as_ref())
            .await
            .map_err(ServiceError::from)?;
        Ok(tiers.into_iter().map(TierRecord::from).collect())
    }
}
