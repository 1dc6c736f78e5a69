//! Axum route handlers for freelancer profiles.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::models::profile::{FreelancerProfile, ProfileUpdate};
use crate::state::AppState;
use crate::store::writes::detach_write;

#[derive(Debug, Default, Deserialize)]
pub struct WriteOptions {
    /// Await the store write instead of detaching it.
    #[serde(default)]
    pub wait: bool,
}

/// GET /api/v1/freelancers/:id
///
/// 404 means onboarding has not been completed yet.
pub async fn handle_get_profile(
    State(state): State<AppState>,
    Path(owner_id): Path<String>,
) -> Result<Json<FreelancerProfile>, AppError> {
    let profile = state
        .store
        .get_profile(&owner_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Profile {owner_id} not found")))?;
    Ok(Json(profile))
}

/// PUT /api/v1/freelancers/:id
///
/// The store merges the update into the stored profile (or a fresh one at onboarding).
/// By default the write is detached and a preview of the merged profile is returned
/// with 202; `?wait=true` awaits the write and returns the stored result with 200.
pub async fn handle_upsert_profile(
    State(state): State<AppState>,
    Path(owner_id): Path<String>,
    Query(options): Query<WriteOptions>,
    Json(update): Json<ProfileUpdate>,
) -> Result<(StatusCode, Json<FreelancerProfile>), AppError> {
    if owner_id.trim().is_empty() {
        return Err(AppError::Validation("freelancer id cannot be empty".to_string()));
    }

    if options.wait {
        let profile = state.store.merge_profile(&owner_id, update).await?;
        info!(profile_id = %owner_id, "Profile saved");
        return Ok((StatusCode::OK, Json(profile)));
    }

    let mut preview = state
        .store
        .get_profile(&owner_id)
        .await?
        .unwrap_or_else(|| FreelancerProfile::new_onboarding(&owner_id));
    update.clone().apply(&mut preview);

    let store = state.store.clone();
    let pending_owner = owner_id.clone();
    detach_write(
        async move {
            store
                .merge_profile(&pending_owner, update)
                .await
                .map(|_| ())
        },
        state.write_errors.clone(),
    );
    info!(profile_id = %owner_id, "Profile write detached");

    Ok((StatusCode::ACCEPTED, Json(preview)))
}
