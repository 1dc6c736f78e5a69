pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::ideation::handlers as ideation;
use crate::jobs::handlers as jobs;
use crate::matching::handlers as matching;
use crate::profiles::handlers as profiles;
use crate::proposals::handlers as proposals;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Profiles
        .route(
            "/api/v1/freelancers/:id",
            get(profiles::handle_get_profile).put(profiles::handle_upsert_profile),
        )
        // Jobs
        .route("/api/v1/jobs", get(jobs::handle_list_jobs))
        .route("/api/v1/jobs/seed", post(jobs::handle_seed_jobs))
        .route("/api/v1/jobs/:id", get(jobs::handle_get_job))
        // AI flows
        .route(
            "/api/v1/freelancers/:id/matches",
            get(matching::handle_list_matches),
        )
        .route(
            "/api/v1/jobs/:id/proposal",
            post(proposals::handle_draft_proposal),
        )
        .route(
            "/api/v1/freelancers/:id/gig-idea",
            post(ideation::handle_gig_idea),
        )
        .with_state(state)
}
