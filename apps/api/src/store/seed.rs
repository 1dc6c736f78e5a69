//! Demo postings written when the job collection is empty.

use crate::models::job::{ExperienceLevel, JobPosting};

pub fn sample_jobs() -> Vec<JobPosting> {
    vec![
        JobPosting {
            id: "sample_1".to_string(),
            title: "Generative UI Architect".to_string(),
            company: "Neural Labs".to_string(),
            description: "Build adaptive interfaces that react to LLM state changes.".to_string(),
            required_skills: vec![
                "React".to_string(),
                "Next.js".to_string(),
                "Tailwind".to_string(),
            ],
            preferred_skills: None,
            experience_level: ExperienceLevel::Senior,
            location: "Remote".to_string(),
            salary_range: None,
            posted_at: "Just now".to_string(),
        },
        JobPosting {
            id: "sample_2".to_string(),
            title: "AI Prompt Engineer".to_string(),
            company: "OpenLogic".to_string(),
            description: "Optimize prompt chains for high-throughput enterprise applications."
                .to_string(),
            required_skills: vec![
                "Python".to_string(),
                "LLMs".to_string(),
                "Prompt Engineering".to_string(),
            ],
            preferred_skills: None,
            experience_level: ExperienceLevel::Mid,
            location: "Hybrid".to_string(),
            salary_range: None,
            posted_at: "1h ago".to_string(),
        },
    ]
}
