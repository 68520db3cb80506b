//! Weight-tiered pricing for quotations and sales orders.
//!
//! Three phases over a document: aggregate total shipment weight from
//! the items' declared per-unit weights, resolve the active per-kg
//! discount tier for that weight, then back-calculate every eligible
//! line's rate through kg terms and re-derive the per-piece rate and
//! amount. Lines whose item has no usable weight are left untouched.

use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::catalogs::{ItemCatalog, ItemRecord, TierCatalog, TierRecord};
use crate::errors::ServiceError;
use crate::models::{SalesDocument, SalesLine, WeightUom};
use crate::notifications::Notifier;

const KG_PER_METRIC_TON: Decimal = Decimal::ONE_THOUSAND;

/// Host seam for reconciling document totals after line mutation.
/// Invoked exactly once per repricing pass.
pub trait TotalsEngine: Send + Sync {
    fn recalculate(&self, doc: &mut SalesDocument);
}

/// Minimal totals reconciliation: grand total over line amounts.
/// Deployments with tax schedules plug the host routine in instead.
#[derive(Debug, Default, Clone)]
pub struct BasicTotals;

impl TotalsEngine for BasicTotals {
    fn recalculate(&self, doc: &mut SalesDocument) {
        doc.net_total = doc.items.iter().map(|line| line.amount).sum();
    }
}

/// Outcome of normalizing one item's declared weight to kilograms.
#[derive(Debug, Clone, PartialEq)]
pub enum LineWeight {
    /// Usable per-unit weight in kg.
    Kg(Decimal),
    /// No weight or no unit declared; the line is skipped silently.
    Missing,
    /// Unit string outside the supported table; skipped with a warning.
    UnsupportedUom(String),
}

/// Normalizes an item's declared weight to kg per unit.
pub fn line_weight_kg(item: &ItemRecord) -> LineWeight {
    let Some(weight_per_unit) = item.weight_per_unit else {
        return LineWeight::Missing;
    };
    if weight_per_unit <= Decimal::ZERO {
        return LineWeight::Missing;
    }
    let uom = item.weight_uom.as_deref().map(str::trim).unwrap_or("");
    if uom.is_empty() {
        return LineWeight::Missing;
    }
    match WeightUom::parse(uom) {
        Some(unit) => LineWeight::Kg(unit.to_kg(weight_per_unit)),
        None => LineWeight::UnsupportedUom(uom.to_string()),
    }
}

/// First active tier containing `total_weight_mt` (bounds inclusive)
/// wins; no match means no discount.
///
/// Tiers are re-sorted by lower bound here so first-match does not
/// depend on the catalog's ordering. Overlap is not validated; over a
/// non-overlapping schedule the result is unambiguous.
pub fn select_discount_per_kg(tiers: &[TierRecord], total_weight_mt: Decimal) -> Decimal {
    let mut ordered: Vec<&TierRecord> = tiers.iter().collect();
    ordered.sort_by(|a, b| a.from_metric_ton.cmp(&b.from_metric_ton));

    for tier in ordered {
        if tier.from_metric_ton <= total_weight_mt && total_weight_mt <= tier.to_metric_ton {
            return tier.discount_per_kg;
        }
    }
    Decimal::ZERO
}

/// Applies the discount to one eligible line and returns the line's
/// discount amount (original amount minus new amount, may be negative
/// when rounding nudges the rate up).
///
/// The per-piece rate is taken from the price list when positive, else
/// the current rate. It is converted to kg terms (6 dp), the discount
/// subtracted with a floor of zero, and the result converted back
/// (6 dp). Standard discount fields are zeroed so the host's own
/// discount mechanism does not double-apply.
fn recalculate_line(
    line: &mut SalesLine,
    weight_per_unit_kg: Decimal,
    discount_per_kg: Decimal,
) -> Decimal {
    let original_rate_per_piece = match line.price_list_rate {
        Some(rate) if rate > Decimal::ZERO => rate,
        _ => line.rate,
    };
    let original_amount = original_rate_per_piece * line.qty;

    // Zero weight cannot reach here through the skip logic, but the
    // division-by-zero contract is "rate 0", not a panic.
    let original_rate_per_kg = if weight_per_unit_kg.is_zero() {
        Decimal::ZERO
    } else {
        (original_rate_per_piece / weight_per_unit_kg).round_dp(6)
    };

    let new_rate_per_kg = (original_rate_per_kg - discount_per_kg).max(Decimal::ZERO);
    let new_rate_per_piece = (new_rate_per_kg * weight_per_unit_kg).round_dp(6);
    let new_amount = new_rate_per_piece * line.qty;

    line.original_rate_per_kg = Some(original_rate_per_kg);
    line.new_rate_per_kg = Some(new_rate_per_kg);
    line.rate = new_rate_per_piece;
    line.amount = new_amount;
    line.discount_amount = Decimal::ZERO;
    line.discount_percentage = Decimal::ZERO;

    original_amount - new_amount
}

/// Repricing service for sales documents.
#[derive(Clone)]
pub struct WeightPricingService {
    items: Arc<dyn ItemCatalog>,
    tiers: Arc<dyn TierCatalog>,
    notifier: Arc<dyn Notifier>,
    totals: Arc<dyn TotalsEngine>,
}

impl WeightPricingService {
    pub fn new(
        items: Arc<dyn ItemCatalog>,
        tiers: Arc<dyn TierCatalog>,
        notifier: Arc<dyn Notifier>,
        totals: Arc<dyn TotalsEngine>,
    ) -> Self {
        Self {
            items,
            tiers,
            notifier,
            totals,
        }
    }

    /// Reprices a document: weight aggregation, tier selection, per-line
    /// rate recalculation, totals reconciliation. Returns the updated
    /// document; the caller persists it. Missing or unusable item data
    /// degrades to "no change for that line" and never fails the pass.
    #[instrument(skip(self, doc), fields(doc_name = %doc.name))]
    pub async fn reprice(&self, doc: &SalesDocument) -> Result<SalesDocument, ServiceError> {
        let mut doc = doc.clone();
        let weights = self.resolve_item_weights(&doc).await?;

        let mut total_net_weight = Decimal::ZERO;
        for line in &doc.items {
            if let Some(weight_kg) = weights.get(line.item_code.as_str()).copied() {
                total_net_weight += line.qty * weight_kg;
            }
        }
        let total_weight_mt = (total_net_weight / KG_PER_METRIC_TON).round_dp(3);
        doc.total_net_weight = total_net_weight;
        doc.total_weight_mt = total_weight_mt;

        let tiers = self.tiers.active_tiers().await?;
        let discount_per_kg = select_discount_per_kg(&tiers, total_weight_mt);
        doc.discount_per_kg = discount_per_kg;
        debug!(
            %total_net_weight,
            %total_weight_mt,
            %discount_per_kg,
            "resolved shipment weight and discount tier"
        );

        let mut total_discount = Decimal::ZERO;
        for line in &mut doc.items {
            let Some(&weight_kg) = weights.get(line.item_code.as_str()) else {
                continue;
            };
            let line_discount = recalculate_line(line, weight_kg, discount_per_kg);
            if line_discount > Decimal::ZERO {
                total_discount += line_discount;
            }
        }
        doc.custom_total_discount = total_discount.round_dp(2);

        self.totals.recalculate(&mut doc);
        Ok(doc)
    }

    /// Resolves each distinct referenced item to its per-unit weight in
    /// kg. One lookup per item; both the aggregation and recalculation
    /// phases read from this map. Items that are absent or have no
    /// usable weight are simply not in the result.
    async fn resolve_item_weights(
        &self,
        doc: &SalesDocument,
    ) -> Result<HashMap<String, Decimal>, ServiceError> {
        let mut weights = HashMap::new();
        let mut seen = HashSet::new();
        for line in &doc.items {
            if !seen.insert(line.item_code.clone()) {
                continue;
            }
            let Some(item) = self.items.find_item(&line.item_code).await? else {
                debug!(item_code = %line.item_code, "item not found, line skipped");
                continue;
            };
            match line_weight_kg(&item) {
                LineWeight::Kg(weight_kg) => {
                    weights.insert(line.item_code.clone(), weight_kg);
                }
                LineWeight::Missing => {
                    debug!(item_code = %line.item_code, "no declared weight, line skipped");
                }
                LineWeight::UnsupportedUom(uom) => {
                    self.notifier
                        .warn(&format!("Unsupported UOM for {}: {}", line.item_code, uom));
                }
            }
        }
        Ok(weights)
    }
}
