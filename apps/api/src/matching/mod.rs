// Job-to-profile matching: per-job model scoring, fan-out/fan-in ranking, title filter.
// All model calls go through llm_client.

pub mod filter;
pub mod handlers;
pub mod orchestrator;
pub mod prompts;
pub mod scorer;
