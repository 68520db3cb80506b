//! Document save hooks.
//!
//! The host's event system calls these before persisting a document.
//! Hooks run synchronously inside the save: sales documents are
//! repriced in place of the submitted value, item-price and item saves
//! trigger the kg/PCS sync. Per-record data problems degrade to
//! skipped lines inside the services; only infrastructure errors
//! propagate to the host.

use tracing::instrument;

use crate::catalogs::{ItemRecord, PriceRecord};
use crate::errors::ServiceError;
use crate::models::SalesDocument;
use crate::services::{PriceSyncService, WeightPricingService};

#[derive(Clone)]
pub struct DocumentHooks {
    pricing: WeightPricingService,
    price_sync: PriceSyncService,
}

impl DocumentHooks {
    pub fn new(pricing: WeightPricingService, price_sync: PriceSyncService) -> Self {
        Self {
            pricing,
            price_sync,
        }
    }

    /// Pre-save hook for quotations and sales orders. Returns the
    /// repriced document for the host to persist.
    #[instrument(skip(self, doc), fields(doc_name = %doc.name))]
    pub async fn before_sales_document_save(
        &self,
        doc: &SalesDocument,
    ) -> Result<SalesDocument, ServiceError> {
        self.pricing.reprice(doc).await
    }

    /// Post-save hook for item prices: keeps the PCS price in step with
    /// a saved per-kg selling price.
    pub async fn on_item_price_saved(&self, price: &PriceRecord) -> Result<(), ServiceError> {
        self.price_sync.sync_piece_price(price).await
    }

    /// Post-save hook for items: a weight change re-derives all piece
    /// prices from the item's per-kg selling prices.
    pub async fn on_item_saved(&self, item: &ItemRecord) -> Result<(), ServiceError> {
        self.price_sync.resync_item_prices(item).await
    }
}
