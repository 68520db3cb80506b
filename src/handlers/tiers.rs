use axum::{extract::State, response::Json};

use crate::catalogs::TierRecord;
use crate::errors::ServiceError;
use crate::{ApiResponse, AppState};

/// `GET /api/v1/discount-tiers`
///
/// Full discount schedule, ascending by lower bound, inactive bands
/// included (display surface; selection filters to active on its own).
pub async fn list_discount_tiers(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<TierRecord>>>, ServiceError> {
    let tiers = state.tier_service.list_tiers().await?;
    Ok(Json(ApiResponse::success(tiers)))
}
