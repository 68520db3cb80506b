use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Document types the weight-discount hook applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentKind {
    Quotation,
    SalesOrder,
}

/// A quotation or sales order as seen by the pricing core.
///
/// The host owns persistence; this model only carries what the
/// weight-discount computation reads and writes. Derived fields are
/// overwritten on every repricing pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesDocument {
    pub kind: DocumentKind,
    /// Host-assigned document name, e.g. "SAL-ORD-2026-00042".
    pub name: String,
    pub items: Vec<SalesLine>,

    /// Total shipment weight in kilograms.
    #[serde(default)]
    pub total_net_weight: Decimal,
    /// Total shipment weight in metric tons, rounded to 3 decimals.
    #[serde(default)]
    pub total_weight_mt: Decimal,
    /// Discount rate resolved from the active tier table.
    #[serde(default)]
    pub discount_per_kg: Decimal,
    /// Sum of positive per-line discounts, rounded to 2 decimals.
    #[serde(default)]
    pub custom_total_discount: Decimal,

    /// Grand total over line amounts, maintained by the totals engine.
    #[serde(default)]
    pub net_total: Decimal,
}

impl SalesDocument {
    pub fn new(kind: DocumentKind, name: impl Into<String>, items: Vec<SalesLine>) -> Self {
        Self {
            kind,
            name: name.into(),
            items,
            total_net_weight: Decimal::ZERO,
            total_weight_mt: Decimal::ZERO,
            discount_per_kg: Decimal::ZERO,
            custom_total_discount: Decimal::ZERO,
            net_total: Decimal::ZERO,
        }
    }
}

/// A single document line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesLine {
    pub item_code: String,
    pub qty: Decimal,
    /// Per-unit selling rate. Overwritten with the discounted rate.
    pub rate: Decimal,
    /// Line amount (= rate x qty). Overwritten alongside `rate`.
    pub amount: Decimal,
    /// Rate from the price list, when the host resolved one.
    #[serde(default)]
    pub price_list_rate: Option<Decimal>,
    /// Standard discount fields, zeroed so the host's own discount
    /// mechanism does not apply on top of the recomputed rate.
    #[serde(default)]
    pub discount_amount: Decimal,
    #[serde(default)]
    pub discount_percentage: Decimal,

    /// Trace field: implied per-kg rate before the discount.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_rate_per_kg: Option<Decimal>,
    /// Trace field: per-kg rate after the discount.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_rate_per_kg: Option<Decimal>,
}

impl SalesLine {
    pub fn new(item_code: impl Into<String>, qty: Decimal, rate: Decimal) -> Self {
        Self {
            item_code: item_code.into(),
            qty,
            rate,
            amount: rate * qty,
            price_list_rate: None,
            discount_amount: Decimal::ZERO,
            discount_percentage: Decimal::ZERO,
            original_rate_per_kg: None,
            new_rate_per_kg: None,
        }
    }

    pub fn with_price_list_rate(mut self, price_list_rate: Decimal) -> Self {
        self.price_list_rate = Some(price_list_rate);
        self
    }
}
