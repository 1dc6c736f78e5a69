//! Axum route handlers for proposal drafting.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::proposals::generator::{draft_proposal, ProposalDraft, ProposalRequest};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftProposalRequest {
    pub freelancer_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftProposalResponse {
    pub job_id: String,
    #[serde(flatten)]
    pub draft: ProposalDraft,
}

/// POST /api/v1/jobs/:id/proposal
///
/// A model failure still answers 200 with the placeholder proposal.
pub async fn handle_draft_proposal(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
    Json(request): Json<DraftProposalRequest>,
) -> Result<Json<DraftProposalResponse>, AppError> {
    if request.freelancer_id.trim().is_empty() {
        return Err(AppError::Validation("freelancerId cannot be empty".to_string()));
    }

    let job = state
        .store
        .get_job(&job_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;
    let profile = state
        .store
        .get_profile(&request.freelancer_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "Profile {} not found; complete onboarding before drafting proposals",
                request.freelancer_id
            ))
        })?;

    let draft = draft_proposal(
        state.proposals.as_ref(),
        &ProposalRequest::new(&profile, &job),
    )
    .await;

    Ok(Json(DraftProposalResponse { job_id, draft }))
}
