//! Repository seams between the pricing core and the host's persistence.
//!
//! The original host exposed ambient record access; here each concern is
//! an injected trait: `ItemCatalog` for weight/group lookups, `TierCatalog`
//! for the discount band table, `PriceStore` for price-list upserts.
//! Production wiring uses the sea-orm implementations; tests and the
//! stateless preview path use the in-memory ones.

pub mod item_catalog;
pub mod memory;
pub mod price_store;
pub mod tier_catalog;

pub use item_catalog::{ItemCatalog, SeaOrmItemCatalog};
pub use price_store::{NewPriceRecord, PriceRecord, PriceStore, SeaOrmPriceStore};
pub use tier_catalog::{SeaOrmTierCatalog, TierCatalog, TierRecord};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Item fields the pricing logic reads. Weight fields mirror the item
/// schema: either may be absent, and absence means the item cannot
/// participate in weight-based pricing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemRecord {
    pub item_code: String,
    pub item_name: Option<String>,
    pub description: Option<String>,
    pub item_group: String,
    pub weight_per_unit: Option<Decimal>,
    pub weight_uom: Option<String>,
}

impl From<crate::entities::item::Model> for ItemRecord {
    fn from(model: crate::entities::item::Model) -> Self {
        Self {
            item_code: model.item_code,
            item_name: model.item_name,
            description: model.description,
            item_group: model.item_group,
            weight_per_unit: model.weight_per_unit,
            weight_uom: model.weight_uom,
        }
    }
}
