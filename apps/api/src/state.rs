use std::sync::Arc;

use crate::ideation::ideator::GigIdeator;
use crate::matching::orchestrator::MatchOrchestrator;
use crate::proposals::generator::ProposalWriter;
use crate::store::writes::WriteErrorSink;
use crate::store::MarketplaceStore;

/// Shared application state injected into all route handlers via Axum extractors.
/// Every collaborator is a trait object so tests can swap in fakes.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn MarketplaceStore>,
    /// Owns the scorer plus the concurrency cap and per-call timeout.
    pub matcher: Arc<MatchOrchestrator>,
    pub proposals: Arc<dyn ProposalWriter>,
    pub ideator: Arc<dyn GigIdeator>,
    /// Where failures of detached writes end up.
    pub write_errors: Arc<dyn WriteErrorSink>,
}
