use axum::{extract::State, response::Json};
use rust_decimal::Decimal;

use crate::errors::ServiceError;
use crate::models::SalesDocument;
use crate::{ApiResponse, AppState};

/// `POST /api/v1/pricing/preview`
///
/// Runs the weight-discount pass over a submitted document and returns
/// the repriced result without persisting anything. Lets the client UI
/// show the tier outcome before the actual save.
pub async fn preview_document(
    State(state): State<AppState>,
    Json(doc): Json<SalesDocument>,
) -> Result<Json<ApiResponse<SalesDocument>>, ServiceError> {
    for line in &doc.items {
        if line.qty < Decimal::ZERO {
            return Err(ServiceError::ValidationError(format!(
                "negative quantity on line for {}",
                line.item_code
            )));
        }
    }

    let repriced = state.pricing_service.reprice(&doc).await?;
    Ok(Json(ApiResponse::success(repriced)))
}
