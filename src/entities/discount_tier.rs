use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Weight band with an associated per-kg discount. Bounds are inclusive
/// and expressed in metric tons; bands are administered externally and
/// expected to be non-overlapping over the active set.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "weight_discount_tiers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "Decimal(Some((19, 3)))")]
    pub from_metric_ton: Decimal,
    #[sea_orm(column_type = "Decimal(Some((19, 3)))")]
    pub to_metric_ton: Decimal,
    #[sea_orm(column_type = "Decimal(Some((19, 6)))")]
    pub discount_per_kg: Decimal,
    pub active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
