// Proposal drafting: one model call turns a profile and a job into a pitch.

pub mod generator;
pub mod handlers;
pub mod prompts;
