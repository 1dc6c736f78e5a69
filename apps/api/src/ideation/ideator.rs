//! Gig Ideator: one model call, no retry.
//!
//! A failed call yields [`GigIdea::fallback`] rather than nothing, like the other AI
//! flows. [`GigSuggestion::generated`] tells the two apart.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::fallback::try_or_fallback;
use crate::ideation::prompts::{GIG_IDEA_PROMPT_TEMPLATE, GIG_IDEA_SYSTEM};
use crate::llm_client::prompts::{fill_template, render_list, PROFILE_TRUST_INSTRUCTION};
use crate::llm_client::{LlmClient, LlmError};
use crate::models::profile::FreelancerProfile;

pub const FALLBACK_GIG_TITLE: &str = "Failed to generate gig idea.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GigIdeaRequest {
    pub skills: Vec<String>,
    pub experience: String,
}

impl From<&FreelancerProfile> for GigIdeaRequest {
    fn from(profile: &FreelancerProfile) -> Self {
        Self {
            skills: profile.skills.clone(),
            experience: profile.experience.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GigIdea {
    pub title: String,
    pub description: String,
    pub market_value: String,
    pub why_now: String,
}

impl GigIdea {
    pub fn fallback() -> Self {
        Self {
            title: FALLBACK_GIG_TITLE.to_string(),
            description: String::new(),
            market_value: String::new(),
            why_now: String::new(),
        }
    }
}

#[async_trait]
pub trait GigIdeator: Send + Sync {
    async fn ideate(&self, request: &GigIdeaRequest) -> Result<GigIdea, LlmError>;
}

pub struct LlmGigIdeator(pub LlmClient);

#[async_trait]
impl GigIdeator for LlmGigIdeator {
    async fn ideate(&self, request: &GigIdeaRequest) -> Result<GigIdea, LlmError> {
        let skills = render_list(&request.skills);
        let prompt = fill_template(
            GIG_IDEA_PROMPT_TEMPLATE,
            &[
                ("trust_instruction", PROFILE_TRUST_INSTRUCTION),
                ("skills", skills.as_str()),
                ("experience", request.experience.as_str()),
            ],
        );
        self.0.call_json::<GigIdea>(&prompt, GIG_IDEA_SYSTEM).await
    }
}

/// A gig idea plus whether the model actually produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct GigSuggestion {
    pub idea: GigIdea,
    /// False when the call failed and `idea` is [`GigIdea::fallback`].
    pub generated: bool,
}

/// Suggests a gig idea; never fails.
pub async fn suggest_gig(ideator: &dyn GigIdeator, request: &GigIdeaRequest) -> GigSuggestion {
    let (idea, fell_back) =
        try_or_fallback("gig_idea", ideator.ideate(request), GigIdea::fallback()).await;
    GigSuggestion {
        idea,
        generated: !fell_back,
    }
}
