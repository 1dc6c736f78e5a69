use crate::matching::orchestrator::JobWithMatch;

/// Keeps jobs whose title contains `query`, ignoring case. Ranking order is preserved;
/// a blank query keeps everything.
pub fn filter_by_title(ranked: Vec<JobWithMatch>, query: &str) -> Vec<JobWithMatch> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return ranked;
    }
    ranked
        .into_iter()
        .filter(|r| r.job.title.to_lowercase().contains(&needle))
        .collect()
}
