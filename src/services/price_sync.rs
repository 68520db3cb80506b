//! One-directional kg -> PCS selling price propagation for rebar items.
//!
//! A saved per-kg selling price produces a matching per-piece price in
//! the same price list (`rate_per_piece = rate_per_kg x weight_per_unit`).
//! Saving an item with a changed weight re-derives the piece price from
//! every existing per-kg selling price of that item.

use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::catalogs::{ItemCatalog, ItemRecord, NewPriceRecord, PriceRecord, PriceStore};
use crate::config::PricingConfig;
use crate::errors::ServiceError;
use crate::models::WeightUom;
use crate::notifications::Notifier;

#[derive(Clone)]
pub struct PriceSyncService {
    items: Arc<dyn ItemCatalog>,
    prices: Arc<dyn PriceStore>,
    notifier: Arc<dyn Notifier>,
    config: PricingConfig,
}

impl PriceSyncService {
    pub fn new(
        items: Arc<dyn ItemCatalog>,
        prices: Arc<dyn PriceStore>,
        notifier: Arc<dyn Notifier>,
        config: PricingConfig,
    ) -> Self {
        Self {
            items,
            prices,
            notifier,
            config,
        }
    }

    /// Hook body for an item-price save. Acts only on selling prices in
    /// kg for items of the configured rebar group; everything else is a
    /// silent no-op. An unset or non-positive item weight raises a
    /// transient warning and changes nothing.
    #[instrument(skip(self, price), fields(item_code = %price.item_code, price_list = %price.price_list))]
    pub async fn sync_piece_price(&self, price: &PriceRecord) -> Result<(), ServiceError> {
        if !price.selling {
            return Ok(());
        }

        let Some(item) = self.items.find_item(&price.item_code).await? else {
            debug!("item not found, price sync skipped");
            return Ok(());
        };
        if item.item_group != self.config.rebar_item_group {
            return Ok(());
        }

        let Some(weight_per_unit) = self.usable_weight(&item) else {
            return Ok(());
        };

        if !matches!(WeightUom::parse(&price.uom), Some(u) if u.is_kilogram()) {
            return Ok(());
        }

        let currency = if price.currency.is_empty() {
            self.config.default_currency.clone()
        } else {
            price.currency.clone()
        };
        let rate_per_piece = price.price_list_rate * weight_per_unit;

        self.upsert_piece_price(&item, &price.price_list, rate_per_piece, &currency)
            .await
    }

    /// Hook body for an item save: re-derives the piece price from every
    /// existing per-kg selling price of the item. Non-rebar items and
    /// items without a positive weight are skipped quietly.
    #[instrument(skip(self, item), fields(item_code = %item.item_code))]
    pub async fn resync_item_prices(&self, item: &ItemRecord) -> Result<(), ServiceError> {
        if item.item_group != self.config.rebar_item_group {
            return Ok(());
        }
        let Some(weight_per_unit) = item.weight_per_unit.filter(|w| *w > Decimal::ZERO) else {
            return Ok(());
        };

        let kg_prices = self.prices.selling_prices(&item.item_code).await?;
        for price in kg_prices {
            if !matches!(WeightUom::parse(&price.uom), Some(u) if u.is_kilogram()) {
                continue;
            }
            let currency = if price.currency.is_empty() {
                self.config.default_currency.clone()
            } else {
                price.currency.clone()
            };
            let rate_per_piece = price.price_list_rate * weight_per_unit;
            self.upsert_piece_price(item, &price.price_list, rate_per_piece, &currency)
                .await?;
        }
        Ok(())
    }

    fn usable_weight(&self, item: &ItemRecord) -> Option<Decimal> {
        match item.weight_per_unit.filter(|w| *w > Decimal::ZERO) {
            Some(weight) => Some(weight),
            None => {
                self.notifier
                    .warn(&format!("Weight per Unit not set for {}", item.item_code));
                None
            }
        }
    }

    async fn upsert_piece_price(
        &self,
        item: &ItemRecord,
        price_list: &str,
        rate_per_piece: Decimal,
        currency: &str,
    ) -> Result<(), ServiceError> {
        let piece_uom = self.config.piece_uom.as_str();
        let existing = self
            .prices
            .find_selling_price(&item.item_code, price_list, piece_uom)
            .await?;

        match existing {
            Some(current) => {
                self.prices.update_rate(current.id, rate_per_piece).await?;
                self.notifier.info(&format!(
                    "Updated {piece_uom} price for {}: {:.2} {currency}",
                    item.item_code, rate_per_piece
                ));
            }
            None => {
                self.prices
                    .insert(NewPriceRecord {
                        item_code: item.item_code.clone(),
                        item_name: item.item_name.clone(),
                        item_description: item.description.clone(),
                        price_list: price_list.to_string(),
                        uom: piece_uom.to_string(),
                        price_list_rate: rate_per_piece,
                        currency: currency.to_string(),
                    })
                    .await?;
                self.notifier.info(&format!(
                    "Created {piece_uom} price for {}: {:.2} {currency}",
                    item.item_code, rate_per_piece
                ));
            }
        }
        Ok(())
    }
}
