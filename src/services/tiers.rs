use std::sync::Arc;

use crate::catalogs::{TierCatalog, TierRecord};
use crate::errors::ServiceError;

/// Read-only tier listing for display surfaces. Unlike tier selection
/// this does not filter on the active flag: admin views want disabled
/// bands visible, and the record carries `active` so they can tell.
#[derive(Clone)]
pub struct TierService {
    tiers: Arc<dyn TierCatalog>,
}

impl TierService {
    pub fn new(tiers: Arc<dyn TierCatalog>) -> Self {
        Self { tiers }
    }

    /// All discount tiers, ascending by lower bound.
    pub async fn list_tiers(&self) -> Result<Vec<TierRecord>, ServiceError> {
        self.tiers.all_tiers().await
    }
}
