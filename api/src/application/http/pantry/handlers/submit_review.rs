use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use smartpantry_core::domain::pantry::value_objects::{ReviewRow, ReviewSummary};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::application::{
    auth::RequiredIdentity,
    http::{
        pantry::validators::SubmitReviewValidator,
        server::{
            api_entities::{api_error::ApiError, response::Response},
            app_state::AppState,
        },
    },
};

#[derive(Debug, Serialize, ToSchema)]
pub struct ReviewSummaryResponse {
    pub added: usize,
    pub updated: usize,
    pub skipped: usize,
}

impl From<ReviewSummary> for ReviewSummaryResponse {
    fn from(summary: ReviewSummary) -> Self {
        Self {
            added: summary.added,
            updated: summary.updated,
            skipped: summary.skipped,
        }
    }
}

#[utoipa::path(
    post,
    path = "/pantry/review/{upload_id}",
    tag = "pantry",
    summary = "Apply reviewed extraction rows",
    description = "Merge the reviewed candidate rows of an upload into the pantry.",
    params(("upload_id" = Uuid, Path, description = "Pantry upload id")),
    request_body = SubmitReviewValidator,
    responses(
        (status = 200, body = ReviewSummaryResponse),
        (status = 400, description = "Invalid rows"),
        (status = 404, description = "Unknown upload")
    )
)]
pub async fn submit_review(
    Path(upload_id): Path<Uuid>,
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
    Json(payload): Json<SubmitReviewValidator>,
) -> Result<Response<ReviewSummaryResponse>, ApiError> {
    payload.validate().map_err(ApiError::from_validation)?;

    // Ownership check; rows only apply against the caller's own upload.
    state.extraction_service.get(&identity, upload_id).await?;

    let rows: Vec<ReviewRow> = payload
        .rows
        .into_iter()
        .map(|row| ReviewRow {
            name: row.name,
            quantity: row.quantity,
            unit: row.unit,
        })
        .collect();

    let summary = state.pantry_service.apply_review_rows(&identity, rows).await?;
    Ok(Response::OK(ReviewSummaryResponse::from(summary)))
}
