use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Catalog item. Weight fields drive both the kg/PCS price sync and
/// the shipment weight aggregation; both are optional on the schema.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub item_code: String,
    pub item_name: Option<String>,
    pub description: Option<String>,
    pub item_group: String,
    #[sea_orm(column_type = "Decimal(Some((19, 6)))", nullable)]
    pub weight_per_unit: Option<Decimal>,
    pub weight_uom: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::item_price::Entity")]
    ItemPrice,
}

impl Related<super::item_price::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ItemPrice.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
