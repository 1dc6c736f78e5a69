//! Proposal Generator: drafts a tailored proposal for one job.
//!
//! Single call, no retry. A failed call yields [`ProposalDraft::fallback`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::fallback::try_or_default;
use crate::llm_client::prompts::{fill_template, render_list, PROFILE_TRUST_INSTRUCTION};
use crate::llm_client::{LlmClient, LlmError};
use crate::models::job::JobPosting;
use crate::models::profile::FreelancerProfile;
use crate::proposals::prompts::{PROPOSAL_PROMPT_TEMPLATE, PROPOSAL_SYSTEM};

pub const FALLBACK_PROPOSAL: &str = "Failed to generate proposal.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalProfile {
    pub name: String,
    pub skills: Vec<String>,
    pub experience: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalJob {
    pub title: String,
    pub company: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalRequest {
    pub freelancer_profile: ProposalProfile,
    pub job_posting: ProposalJob,
}

impl ProposalRequest {
    pub fn new(profile: &FreelancerProfile, job: &JobPosting) -> Self {
        Self {
            freelancer_profile: ProposalProfile {
                name: profile.name.clone(),
                skills: profile.skills.clone(),
                experience: profile.experience.clone(),
            },
            job_posting: ProposalJob {
                title: job.title.clone(),
                company: job.company.clone(),
                description: job.description.clone(),
            },
        }
    }
}

/// Ephemeral proposal text; regenerate by calling again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalDraft {
    pub proposal: String,
    #[serde(default)]
    pub key_selling_points: Vec<String>,
}

impl ProposalDraft {
    pub fn fallback() -> Self {
        Self {
            proposal: FALLBACK_PROPOSAL.to_string(),
            key_selling_points: Vec::new(),
        }
    }
}

#[async_trait]
pub trait ProposalWriter: Send + Sync {
    async fn write(&self, request: &ProposalRequest) -> Result<ProposalDraft, LlmError>;
}

pub struct LlmProposalWriter(pub LlmClient);

#[async_trait]
impl ProposalWriter for LlmProposalWriter {
    async fn write(&self, request: &ProposalRequest) -> Result<ProposalDraft, LlmError> {
        let prompt = build_proposal_prompt(request);
        self.0.call_json::<ProposalDraft>(&prompt, PROPOSAL_SYSTEM).await
    }
}

/// Drafts a proposal; never fails.
pub async fn draft_proposal(
    writer: &dyn ProposalWriter,
    request: &ProposalRequest,
) -> ProposalDraft {
    try_or_default("proposal", writer.write(request), ProposalDraft::fallback()).await
}

fn build_proposal_prompt(request: &ProposalRequest) -> String {
    let profile = &request.freelancer_profile;
    let job = &request.job_posting;
    let skills = render_list(&profile.skills);

    fill_template(
        PROPOSAL_PROMPT_TEMPLATE,
        &[
            ("trust_instruction", PROFILE_TRUST_INSTRUCTION),
            ("name", profile.name.as_str()),
            ("skills", skills.as_str()),
            ("experience", profile.experience.as_str()),
            ("title", job.title.as_str()),
            ("company", job.company.as_str()),
            ("description", job.description.as_str()),
        ],
    )
}
