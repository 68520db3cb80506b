// Pricing automation services
pub mod price_sync;
pub mod tiers;
pub mod weight_pricing;

pub use price_sync::PriceSyncService;
pub use tiers::TierService;
pub use weight_pricing::{BasicTotals, TotalsEngine, WeightPricingService};
