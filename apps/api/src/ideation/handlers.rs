use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::ideation::ideator::{suggest_gig, GigIdea, GigIdeaRequest};
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GigIdeaResponse {
    /// False when the model call failed and `idea` is the placeholder.
    pub generated: bool,
    #[serde(flatten)]
    pub idea: GigIdea,
}

/// POST /api/v1/freelancers/:id/gig-idea
pub async fn handle_gig_idea(
    State(state): State<AppState>,
    Path(owner_id): Path<String>,
) -> Result<Json<GigIdeaResponse>, AppError> {
    let profile = state
        .store
        .get_profile(&owner_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Profile {owner_id} not found")))?;

    let suggestion = suggest_gig(state.ideator.as_ref(), &GigIdeaRequest::from(&profile)).await;

    Ok(Json(GigIdeaResponse {
        generated: suggestion.generated,
        idea: suggestion.idea,
    }))
}
