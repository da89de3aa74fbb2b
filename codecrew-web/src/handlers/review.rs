//! Review handler.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use tracing::info;

use codecrew_core::{run_code_review, ReviewOutcome, ReviewRequest};

use crate::error::Result;
use crate::state::AppState;
use crate::types::ReviewBody;

/// POST /api/review - Run the four reviewers over the submitted code.
///
/// Bad bodies and empty code are rejected before the review slot is claimed.
pub async fn review(
    State(state): State<AppState>,
    body: std::result::Result<Json<ReviewBody>, JsonRejection>,
) -> Result<Json<ReviewOutcome>> {
    let Json(body) = body?;
    let request = ReviewRequest::new(&body.code)?;
    let _permit = state.try_begin_review()?;

    info!(lines = request.line_count(), "Review requested");

    let outcome = run_code_review(&request, state.llm.clone(), state.options).await?;
    Ok(Json(outcome))
}
