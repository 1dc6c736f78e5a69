//! Axum route handlers for the Matching API.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::errors::AppError;
use crate::matching::filter::filter_by_title;
use crate::matching::orchestrator::JobWithMatch;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct MatchQuery {
    /// Case-insensitive title filter applied after ranking.
    #[serde(default)]
    pub q: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchListResponse {
    pub profile_id: String,
    /// Jobs scored before the title filter.
    pub total_scored: usize,
    pub matches: Vec<JobWithMatch>,
}

/// GET /api/v1/freelancers/:id/matches
///
/// Scores every job for the freelancer and returns them best match first.
/// A missing profile is a 404 (the client shows onboarding instead).
pub async fn handle_list_matches(
    State(state): State<AppState>,
    Path(owner_id): Path<String>,
    Query(query): Query<MatchQuery>,
) -> Result<Json<MatchListResponse>, AppError> {
    let profile = state
        .store
        .get_profile(&owner_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Profile {owner_id} not found")))?;
    let jobs = state.store.list_jobs().await?;

    // Cancelled when this handler is dropped, e.g. the client disconnected.
    let cancel = CancellationToken::new();
    let _cancel_on_drop = cancel.clone().drop_guard();

    let ranked = state.matcher.rank(&profile, jobs, &cancel).await?;
    let total_scored = ranked.len();
    let matches = filter_by_title(ranked, query.q.as_deref().unwrap_or_default());

    Ok(Json(MatchListResponse {
        profile_id: profile.id,
        total_scored,
        matches,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use serde_json::json;

    use crate::ideation::ideator::{GigIdea, GigIdeaRequest, GigIdeator};
    use crate::llm_client::LlmError;
    use crate::matching::orchestrator::MatchOrchestrator;
    use crate::matching::scorer::{MatchScorer, ScoreRequest, ScoreResponse};
    use crate::proposals::generator::{ProposalDraft, ProposalRequest, ProposalWriter};
    use crate::store::seed::sample_jobs;
    use crate::store::writes::TracingErrorSink;
    use crate::store::{MarketplaceStore, MemoryStore};

    struct DropCounter(Arc<AtomicUsize>);

    impl Drop for DropCounter {
        fn drop(&mut self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    /// Never answers; counts calls started and call futures dropped.
    #[derive(Default)]
    struct HangingScorer {
        started: AtomicUsize,
        dropped: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl MatchScorer for HangingScorer {
        async fn score(&self, _request: &ScoreRequest) -> Result<ScoreResponse, LlmError> {
            let _counter = DropCounter(self.dropped.clone());
            self.started.fetch_add(1, Ordering::SeqCst);
            std::future::pending::<Result<ScoreResponse, LlmError>>().await
        }
    }

    struct UnusedWriter;

    #[async_trait]
    impl ProposalWriter for UnusedWriter {
        async fn write(&self, _request: &ProposalRequest) -> Result<ProposalDraft, LlmError> {
            Err(LlmError::EmptyContent)
        }
    }

    struct UnusedIdeator;

    #[async_trait]
    impl GigIdeator for UnusedIdeator {
        async fn ideate(&self, _request: &GigIdeaRequest) -> Result<GigIdea, LlmError> {
            Err(LlmError::EmptyContent)
        }
    }

    #[tokio::test]
    async fn test_dropped_request_cancels_in_flight_scoring() {
        let store = Arc::new(MemoryStore::new());
        for job in sample_jobs() {
            store.upsert_job(job).await.unwrap();
        }
        let update = serde_json::from_value(json!({ "skills": ["Rust"] })).unwrap();
        store.merge_profile("uid_1", update).await.unwrap();

        let scorer = Arc::new(HangingScorer::default());
        let state = AppState {
            store,
            matcher: Arc::new(MatchOrchestrator::new(
                scorer.clone(),
                4,
                Duration::from_secs(60),
            )),
            proposals: Arc::new(UnusedWriter),
            ideator: Arc::new(UnusedIdeator),
            write_errors: Arc::new(TracingErrorSink),
        };

        let request = tokio::spawn(handle_list_matches(
            State(state),
            Path("uid_1".to_string()),
            Query(MatchQuery::default()),
        ));

        tokio::time::timeout(Duration::from_secs(5), async {
            while scorer.started.load(Ordering::SeqCst) < 2 {
                tokio::task::yield_now().await;
            }
        })
        .await
        .unwrap();
        assert_eq!(scorer.dropped.load(Ordering::SeqCst), 0);

        // Axum drops the handler future when the client goes away.
        request.abort();
        assert!(request.await.unwrap_err().is_cancelled());

        assert_eq!(scorer.dropped.load(Ordering::SeqCst), 2);
    }
}
