//! Axum route handlers for the job collection.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::models::job::JobPosting;
use crate::profiles::handlers::WriteOptions;
use crate::state::AppState;
use crate::store::seed::sample_jobs;
use crate::store::writes::detach_write;

#[derive(Debug, Serialize)]
pub struct SeedResponse {
    pub seeded: usize,
}

/// GET /api/v1/jobs
pub async fn handle_list_jobs(
    State(state): State<AppState>,
) -> Result<Json<Vec<JobPosting>>, AppError> {
    Ok(Json(state.store.list_jobs().await?))
}

/// GET /api/v1/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Result<Json<JobPosting>, AppError> {
    let job = state
        .store
        .get_job(&job_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;
    Ok(Json(job))
}

/// POST /api/v1/jobs/seed
///
/// Writes the demo postings, but only into an empty collection.
/// Writes are detached (202) unless `?wait=true`.
pub async fn handle_seed_jobs(
    State(state): State<AppState>,
    Query(options): Query<WriteOptions>,
) -> Result<(StatusCode, Json<SeedResponse>), AppError> {
    if !state.store.list_jobs().await?.is_empty() {
        return Ok((StatusCode::OK, Json(SeedResponse { seeded: 0 })));
    }

    let jobs = sample_jobs();
    let seeded = jobs.len();

    if options.wait {
        for job in jobs {
            state.store.upsert_job(job).await?;
        }
        info!(seeded, "Seeded sample jobs");
        return Ok((StatusCode::OK, Json(SeedResponse { seeded })));
    }

    for job in jobs {
        let store = state.store.clone();
        detach_write(
            async move { store.upsert_job(job).await },
            state.write_errors.clone(),
        );
    }
    info!(seeded, "Sample job writes detached");

    Ok((StatusCode::ACCEPTED, Json(SeedResponse { seeded })))
}
