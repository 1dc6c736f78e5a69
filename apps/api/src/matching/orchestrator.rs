//! Match ranking: scores every job for one profile and sorts the results.
//!
//! Flow: one `ScoreRequest` per job → bounded concurrent scorer calls (each with a
//! deadline) → wait for all → sort by score, ties by input order.
//!
//! A failed or timed-out call only affects its own job, which gets
//! [`MatchResult::fallback`]. The whole batch can be aborted through a
//! `CancellationToken`.

use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::fallback::try_or_fallback;
use crate::llm_client::LlmError;
use crate::matching::scorer::{MatchResult, MatchScorer, ScoreRequest};
use crate::models::job::JobPosting;
use crate::models::profile::FreelancerProfile;

/// A posting merged with its match result. Serializes as one flat object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobWithMatch {
    #[serde(flatten)]
    pub job: JobPosting,
    #[serde(flatten)]
    pub result: MatchResult,
}

#[derive(Debug, Error)]
pub enum MatchError {
    #[error("Match ranking was cancelled")]
    Cancelled,
}

/// Why a single scoring call produced no usable result.
#[derive(Debug, Error)]
pub enum ScoreFailure {
    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error("scorer did not answer within {0:?}")]
    TimedOut(Duration),
}

pub struct MatchOrchestrator {
    scorer: Arc<dyn MatchScorer>,
    concurrency: usize,
    timeout: Duration,
}

impl MatchOrchestrator {
    /// `concurrency` caps in-flight scorer calls per batch (minimum 1).
    /// `timeout` bounds each individual call.
    pub fn new(scorer: Arc<dyn MatchScorer>, concurrency: usize, timeout: Duration) -> Self {
        Self {
            scorer,
            concurrency: concurrency.max(1),
            timeout,
        }
    }

    /// Scores every job against `profile` and returns them best match first.
    ///
    /// Every input job appears exactly once in the output. Equal scores keep their
    /// input order. An empty `jobs` issues no scorer calls.
    pub async fn rank(
        &self,
        profile: &FreelancerProfile,
        jobs: Vec<JobPosting>,
        cancel: &CancellationToken,
    ) -> Result<Vec<JobWithMatch>, MatchError> {
        if jobs.is_empty() {
            return Ok(Vec::new());
        }
        if cancel.is_cancelled() {
            return Err(MatchError::Cancelled);
        }

        let total = jobs.len();
        let started = Instant::now();
        debug!(
            profile_id = %profile.id,
            jobs = total,
            concurrency = self.concurrency,
            "Scoring jobs"
        );

        let batch = stream::iter(jobs.into_iter().enumerate())
            .map(|(position, job)| async move {
                let request = ScoreRequest::new(profile, &job);
                let label = format!("match_score:{}", job.id);
                let (result, fell_back) =
                    try_or_fallback(&label, self.score_one(&request), MatchResult::fallback())
                        .await;
                (position, JobWithMatch { job, result }, fell_back)
            })
            .buffer_unordered(self.concurrency)
            .collect::<Vec<_>>();

        let scored = tokio::select! {
            _ = cancel.cancelled() => {
                warn!(profile_id = %profile.id, jobs = total, "Match ranking cancelled");
                return Err(MatchError::Cancelled);
            }
            scored = batch => scored,
        };

        let fallbacks = scored.iter().filter(|(_, _, fell_back)| *fell_back).count();
        let mut scored: Vec<(usize, JobWithMatch)> = scored
            .into_iter()
            .map(|(position, ranked, _)| (position, ranked))
            .collect();
        sort_ranked(&mut scored);

        info!(
            profile_id = %profile.id,
            jobs = total,
            fallbacks,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Ranked jobs"
        );

        Ok(scored.into_iter().map(|(_, ranked)| ranked).collect())
    }

    async fn score_one(&self, request: &ScoreRequest) -> Result<MatchResult, ScoreFailure> {
        let response = tokio::time::timeout(self.timeout, self.scorer.score(request))
            .await
            .map_err(|_| ScoreFailure::TimedOut(self.timeout))??;
        Ok(MatchResult::from_response(response))
    }
}

/// Descending score; equal scores fall back to input position.
fn sort_ranked(scored: &mut [(usize, JobWithMatch)]) {
    scored.sort_by(|(pos_a, a), (pos_b, b)| {
        b.result
            .match_score
            .cmp(&a.result.match_score)
            .then(pos_a.cmp(pos_b))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashMap, HashSet};
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use crate::matching::scorer::{ScoreResponse, FALLBACK_ASSESSMENT};
    use crate::models::job::ExperienceLevel;

    /// Scores jobs by title; titles in `failing` error out, titles in `slow` sleep first.
    #[derive(Default)]
    struct FakeScorer {
        scores: HashMap<String, f64>,
        failing: HashSet<String>,
        slow: HashMap<String, Duration>,
        calls: AtomicUsize,
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
    }

    impl FakeScorer {
        fn with_scores(scores: &[(&str, f64)]) -> Self {
            Self {
                scores: scores
                    .iter()
                    .map(|(title, score)| (title.to_string(), *score))
                    .collect(),
                ..Default::default()
            }
        }

        fn failing(mut self, title: &str) -> Self {
            self.failing.insert(title.to_string());
            self
        }

        fn slow(mut self, title: &str, delay: Duration) -> Self {
            self.slow.insert(title.to_string(), delay);
            self
        }
    }

    #[async_trait]
    impl MatchScorer for FakeScorer {
        async fn score(&self, request: &ScoreRequest) -> Result<ScoreResponse, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);

            let title = &request.job_posting.title;
            let delay = self
                .slow
                .get(title)
                .copied()
                .unwrap_or(Duration::from_millis(5));
            tokio::time::sleep(delay).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            if self.failing.contains(title) {
                return Err(LlmError::Api {
                    status: 500,
                    message: "upstream exploded".to_string(),
                });
            }
            Ok(ScoreResponse {
                match_score: self.scores.get(title).copied().unwrap_or(50.0),
                compatibility_assessment: format!("Assessment for {title}"),
            })
        }
    }

    fn job(id: &str, title: &str, required: &[&str]) -> JobPosting {
        JobPosting {
            id: id.to_string(),
            title: title.to_string(),
            company: "Acme".to_string(),
            description: format!("{title} work"),
            required_skills: required.iter().map(|s| s.to_string()).collect(),
            preferred_skills: None,
            experience_level: ExperienceLevel::Mid,
            location: "Remote".to_string(),
            salary_range: None,
            posted_at: "today".to_string(),
        }
    }

    fn profile() -> FreelancerProfile {
        FreelancerProfile {
            id: "uid_1".to_string(),
            skills: vec!["React".to_string(), "Node.js".to_string()],
            experience: "Full-stack developer.".to_string(),
            ..Default::default()
        }
    }

    fn orchestrator(scorer: Arc<FakeScorer>) -> MatchOrchestrator {
        MatchOrchestrator::new(scorer, 8, Duration::from_secs(30))
    }

    #[tokio::test]
    async fn test_single_job_scenario() {
        let scorer = Arc::new(FakeScorer::with_scores(&[("React Dev", 88.0)]));
        let ranked = orchestrator(scorer)
            .rank(
                &profile(),
                vec![job("job_1", "React Dev", &["React"])],
                &CancellationToken::new(),
            )
            .await
            .unwrap();

        assert_eq!(ranked.len(), 1);
        assert!(ranked[0].result.match_score <= 100);
        assert!(!ranked[0].result.compatibility_assessment.is_empty());
    }

    #[tokio::test]
    async fn test_output_sorted_descending_with_every_job_once() {
        let scorer = Arc::new(FakeScorer::with_scores(&[
            ("A", 20.0),
            ("B", 95.0),
            ("C", 60.0),
            ("D", 75.0),
        ]));
        let jobs = vec![
            job("job_a", "A", &[]),
            job("job_b", "B", &[]),
            job("job_c", "C", &[]),
            job("job_d", "D", &[]),
        ];

        let ranked = orchestrator(scorer)
            .rank(&profile(), jobs, &CancellationToken::new())
            .await
            .unwrap();

        let ids: Vec<&str> = ranked.iter().map(|r| r.job.id.as_str()).collect();
        assert_eq!(ids, vec!["job_b", "job_d", "job_c", "job_a"]);
        assert!(ranked
            .windows(2)
            .all(|pair| pair[0].result.match_score >= pair[1].result.match_score));
    }

    #[tokio::test]
    async fn test_failure_is_isolated_to_its_job() {
        let scorer = Arc::new(
            FakeScorer::with_scores(&[("One", 70.0), ("Two", 90.0), ("Three", 40.0)])
                .failing("Two"),
        );
        let jobs = vec![
            job("job_1", "One", &[]),
            job("job_2", "Two", &[]),
            job("job_3", "Three", &[]),
        ];

        let ranked = orchestrator(scorer)
            .rank(&profile(), jobs, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(ranked.len(), 3);
        let by_id: HashMap<&str, &MatchResult> = ranked
            .iter()
            .map(|r| (r.job.id.as_str(), &r.result))
            .collect();
        assert_eq!(*by_id["job_2"], MatchResult::fallback());
        assert_eq!(by_id["job_2"].compatibility_assessment, FALLBACK_ASSESSMENT);
        assert_eq!(by_id["job_1"].match_score, 70);
        assert_eq!(by_id["job_3"].match_score, 40);
        assert_ne!(*by_id["job_1"], MatchResult::fallback());
        assert_eq!(ranked.last().unwrap().job.id, "job_2");
    }

    #[tokio::test]
    async fn test_empty_job_list_issues_no_calls() {
        let scorer = Arc::new(FakeScorer::default());
        let ranked = orchestrator(scorer.clone())
            .rank(&profile(), vec![], &CancellationToken::new())
            .await
            .unwrap();

        assert!(ranked.is_empty());
        assert_eq!(scorer.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_ties_keep_input_order() {
        let scorer = Arc::new(FakeScorer::with_scores(&[
            ("First", 80.0),
            ("Second", 80.0),
            ("Third", 80.0),
        ])
        // the first job finishes last; its position must still win the tie
        .slow("First", Duration::from_millis(50)));
        let jobs = vec![
            job("job_1", "First", &[]),
            job("job_2", "Second", &[]),
            job("job_3", "Third", &[]),
        ];

        let ranked = orchestrator(scorer)
            .rank(&profile(), jobs, &CancellationToken::new())
            .await
            .unwrap();

        let ids: Vec<&str> = ranked.iter().map(|r| r.job.id.as_str()).collect();
        assert_eq!(ids, vec!["job_1", "job_2", "job_3"]);
    }

    #[tokio::test]
    async fn test_out_of_range_scores_are_clipped() {
        let scorer = Arc::new(FakeScorer::with_scores(&[("High", 250.0), ("Low", -5.0)]));
        let jobs = vec![job("job_h", "High", &[]), job("job_l", "Low", &[])];

        let ranked = orchestrator(scorer)
            .rank(&profile(), jobs, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(ranked[0].result.match_score, 100);
        assert_eq!(ranked[1].result.match_score, 0);
    }

    #[tokio::test]
    async fn test_concurrency_cap_is_respected() {
        let scorer = Arc::new(FakeScorer::default());
        let jobs: Vec<JobPosting> = (0..12)
            .map(|i| job(&format!("job_{i}"), &format!("Job {i}"), &[]))
            .collect();

        let ranked = MatchOrchestrator::new(scorer.clone(), 3, Duration::from_secs(30))
            .rank(&profile(), jobs, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(ranked.len(), 12);
        assert_eq!(scorer.calls.load(Ordering::SeqCst), 12);
        assert!(scorer.max_in_flight.load(Ordering::SeqCst) <= 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_scorer_times_out_to_fallback() {
        let scorer = Arc::new(
            FakeScorer::with_scores(&[("Fast", 65.0), ("Stuck", 99.0)])
                .slow("Stuck", Duration::from_secs(600)),
        );
        let jobs = vec![job("job_fast", "Fast", &[]), job("job_stuck", "Stuck", &[])];

        let ranked = MatchOrchestrator::new(scorer, 8, Duration::from_secs(30))
            .rank(&profile(), jobs, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(ranked[0].job.id, "job_fast");
        assert_eq!(ranked[0].result.match_score, 65);
        assert_eq!(ranked[1].result, MatchResult::fallback());
    }

    #[tokio::test]
    async fn test_cancelled_before_start_issues_no_calls() {
        let scorer = Arc::new(FakeScorer::default());
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result = orchestrator(scorer.clone())
            .rank(&profile(), vec![job("job_1", "One", &[])], &cancel)
            .await;

        assert!(matches!(result, Err(MatchError::Cancelled)));
        assert_eq!(scorer.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_mid_batch_aborts() {
        let scorer = Arc::new(
            FakeScorer::with_scores(&[("Slow", 10.0)]).slow("Slow", Duration::from_secs(600)),
        );
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(1)).await;
            trigger.cancel();
        });

        let result = MatchOrchestrator::new(scorer, 8, Duration::from_secs(3600))
            .rank(&profile(), vec![job("job_1", "Slow", &[])], &cancel)
            .await;

        assert!(matches!(result, Err(MatchError::Cancelled)));
    }

    #[tokio::test]
    async fn test_repeated_runs_keep_shape() {
        let scorer = Arc::new(FakeScorer::with_scores(&[("A", 30.0), ("B", 60.0)]));
        let orchestrator = orchestrator(scorer);
        for _ in 0..3 {
            let ranked = orchestrator
                .rank(
                    &profile(),
                    vec![job("job_a", "A", &[]), job("job_b", "B", &[])],
                    &CancellationToken::new(),
                )
                .await
                .unwrap();
            assert_eq!(ranked.len(), 2);
            assert!(ranked.iter().all(|r| r.result.match_score <= 100));
        }
    }

    #[test]
    fn test_job_with_match_serializes_flat() {
        let merged = JobWithMatch {
            job: job("job_1", "React Dev", &["React"]),
            result: MatchResult {
                match_score: 81,
                compatibility_assessment: "Good".to_string(),
            },
        };
        let value = serde_json::to_value(&merged).unwrap();
        assert_eq!(value["id"], "job_1");
        assert_eq!(value["requiredSkills"][0], "React");
        assert_eq!(value["matchScore"], 81);
        assert_eq!(value["compatibilityAssessment"], "Good");
    }
}
