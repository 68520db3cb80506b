use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Weight units the pricing logic understands.
///
/// Anything outside this table is treated as unsupported and the
/// affected line is skipped with a transient warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeightUom {
    Kilogram,
    MetricTon,
}

impl WeightUom {
    /// Parses a raw unit string, trimmed and case-insensitive.
    /// `kg`/`kgs` and `metric ton`/`tonne`/`mt` are the only accepted spellings.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "kg" | "kgs" => Some(Self::Kilogram),
            "metric ton" | "tonne" | "mt" => Some(Self::MetricTon),
            _ => None,
        }
    }

    /// Conversion factor to kilograms.
    pub fn kg_factor(self) -> Decimal {
        match self {
            Self::Kilogram => Decimal::ONE,
            Self::MetricTon => Decimal::ONE_THOUSAND,
        }
    }

    /// Normalizes a per-unit weight declared in this unit to kilograms.
    pub fn to_kg(self, weight_per_unit: Decimal) -> Decimal {
        weight_per_unit * self.kg_factor()
    }

    pub fn is_kilogram(self) -> bool {
        matches!(self, Self::Kilogram)
    }
}
