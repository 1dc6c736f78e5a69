// Gig ideation: suggests a high-value niche from a freelancer's skills.

pub mod handlers;
pub mod ideator;
pub mod prompts;
