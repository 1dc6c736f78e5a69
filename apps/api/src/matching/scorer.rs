//! Match scoring: the per-job request/response contract and the pluggable scorer.
//!
//! `AppState` holds an `Arc<dyn MatchScorer>`; production uses [`LlmMatchScorer`],
//! tests swap in fakes.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::llm_client::prompts::{fill_template, render_list, PROFILE_TRUST_INSTRUCTION};
use crate::llm_client::{LlmClient, LlmError};
use crate::matching::prompts::{MATCH_PROMPT_TEMPLATE, MATCH_SYSTEM};
use crate::models::job::JobPosting;
use crate::models::profile::FreelancerProfile;

pub const MAX_MATCH_SCORE: u8 = 100;
pub const FALLBACK_ASSESSMENT: &str = "Could not assess compatibility due to an error.";

// ────────────────────────────────────────────────────────────────────────────
// Request / response contract
// ────────────────────────────────────────────────────────────────────────────

/// The part of a profile the scorer sees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringProfile {
    pub skills: Vec<String>,
    pub experience: String,
}

/// The part of a posting the scorer sees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringJob {
    pub title: String,
    pub description: String,
    pub required_skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_skills: Option<Vec<String>>,
    pub experience_level: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRequest {
    pub freelancer_profile: ScoringProfile,
    pub job_posting: ScoringJob,
}

impl ScoreRequest {
    pub fn new(profile: &FreelancerProfile, job: &JobPosting) -> Self {
        Self {
            freelancer_profile: ScoringProfile {
                skills: profile.skills.clone(),
                experience: profile.experience.clone(),
            },
            job_posting: ScoringJob {
                title: job.title.clone(),
                description: job.description.clone(),
                required_skills: job.required_skills.clone(),
                preferred_skills: job.preferred_skills.clone(),
                experience_level: job.experience_level.to_string(),
            },
        }
    }
}

/// Scorer output as the model returns it. The score is untrusted: it may be
/// fractional or outside 0..=100.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResponse {
    pub match_score: f64,
    pub compatibility_assessment: String,
}

/// Derived score and explanation for one (profile, job) pair. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    /// Always within 0..=100.
    pub match_score: u8,
    pub compatibility_assessment: String,
}

impl MatchResult {
    /// Result attached to a job whose scoring call failed.
    pub fn fallback() -> Self {
        Self {
            match_score: 0,
            compatibility_assessment: FALLBACK_ASSESSMENT.to_string(),
        }
    }

    /// Rounds and clips the scorer's raw score into 0..=100.
    pub fn from_response(response: ScoreResponse) -> Self {
        let clipped = if response.match_score.is_finite() {
            response
                .match_score
                .round()
                .clamp(0.0, f64::from(MAX_MATCH_SCORE))
        } else {
            0.0
        };
        Self {
            match_score: clipped as u8,
            compatibility_assessment: response.compatibility_assessment,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Scores one job against one profile. Implementations are stateless; repeated
/// calls with the same request may legitimately return different scores.
#[async_trait]
pub trait MatchScorer: Send + Sync {
    async fn score(&self, request: &ScoreRequest) -> Result<ScoreResponse, LlmError>;
}

/// Scorer backed by the hosted model.
pub struct LlmMatchScorer(pub LlmClient);

#[async_trait]
impl MatchScorer for LlmMatchScorer {
    async fn score(&self, request: &ScoreRequest) -> Result<ScoreResponse, LlmError> {
        let prompt = build_match_prompt(request);
        self.0.call_json::<ScoreResponse>(&prompt, MATCH_SYSTEM).await
    }
}

fn build_match_prompt(request: &ScoreRequest) -> String {
    let profile = &request.freelancer_profile;
    let job = &request.job_posting;
    let skills = render_list(&profile.skills);
    let required = render_list(&job.required_skills);
    let preferred = render_list(job.preferred_skills.as_deref().unwrap_or_default());

    fill_template(
        MATCH_PROMPT_TEMPLATE,
        &[
            ("trust_instruction", PROFILE_TRUST_INSTRUCTION),
            ("skills", skills.as_str()),
            ("experience", profile.experience.as_str()),
            ("title", job.title.as_str()),
            ("description", job.description.as_str()),
            ("required_skills", required.as_str()),
            ("preferred_skills", preferred.as_str()),
            ("experience_level", job.experience_level.as_str()),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job::ExperienceLevel;

    fn job() -> JobPosting {
        JobPosting {
            id: "job_1".to_string(),
            title: "Frontend Engineer".to_string(),
            company: "Acme".to_string(),
            description: "Ship the dashboard.".to_string(),
            required_skills: vec!["React".to_string()],
            preferred_skills: Some(vec!["GraphQL".to_string()]),
            experience_level: ExperienceLevel::Senior,
            location: "Remote".to_string(),
            salary_range: None,
            posted_at: "today".to_string(),
        }
    }

    fn profile() -> FreelancerProfile {
        FreelancerProfile {
            id: "uid_1".to_string(),
            name: "Sam".to_string(),
            skills: vec!["React".to_string(), "Node.js".to_string()],
            experience: "Six years building web apps.".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_score_request_wire_shape() {
        let request = ScoreRequest::new(&profile(), &job());
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["freelancerProfile"]["skills"][1], "Node.js");
        assert_eq!(value["jobPosting"]["requiredSkills"][0], "React");
        assert_eq!(value["jobPosting"]["preferredSkills"][0], "GraphQL");
        assert_eq!(value["jobPosting"]["experienceLevel"], "Senior");
        assert!(value["jobPosting"].get("company").is_none());
    }

    #[test]
    fn test_score_response_parses_model_output() {
        let response: ScoreResponse = serde_json::from_str(
            r#"{"matchScore": 87, "compatibilityAssessment": "Strong React overlap."}"#,
        )
        .unwrap();
        assert_eq!(response.match_score, 87.0);
    }

    #[test]
    fn test_score_above_range_is_clipped() {
        let result = MatchResult::from_response(ScoreResponse {
            match_score: 140.0,
            compatibility_assessment: "Overflow".to_string(),
        });
        assert_eq!(result.match_score, 100);
    }

    #[test]
    fn test_negative_score_is_clipped_to_zero() {
        let result = MatchResult::from_response(ScoreResponse {
            match_score: -12.0,
            compatibility_assessment: "Underflow".to_string(),
        });
        assert_eq!(result.match_score, 0);
    }

    #[test]
    fn test_fractional_score_is_rounded() {
        let result = MatchResult::from_response(ScoreResponse {
            match_score: 72.6,
            compatibility_assessment: "Close".to_string(),
        });
        assert_eq!(result.match_score, 73);
    }

    #[test]
    fn test_fallback_result() {
        let result = MatchResult::fallback();
        assert_eq!(result.match_score, 0);
        assert_eq!(
            result.compatibility_assessment,
            "Could not assess compatibility due to an error."
        );
    }

    #[test]
    fn test_prompt_contains_profile_and_job() {
        let prompt = build_match_prompt(&ScoreRequest::new(&profile(), &job()));
        assert!(prompt.contains("Skills: React, Node.js"));
        assert!(prompt.contains("Required Skills: React"));
        assert!(prompt.contains("Preferred Skills: GraphQL"));
        assert!(prompt.contains("Experience Level: Senior"));
        assert!(prompt.contains(r#""matchScore": 78"#));
    }

    #[test]
    fn test_prompt_without_preferred_skills() {
        let mut job = job();
        job.preferred_skills = None;
        let prompt = build_match_prompt(&ScoreRequest::new(&profile(), &job));
        assert!(prompt.contains("Preferred Skills: None listed"));
    }
}
