/// System prompt for proposal drafting; enforces JSON-only output.
pub const PROPOSAL_SYSTEM: &str = "You are an expert career agent who writes persuasive, \
    professional job proposals for freelancers. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Replace: {trust_instruction}, {name}, {skills}, {experience}, {title}, {company}, {description}
pub const PROPOSAL_PROMPT_TEMPLATE: &str = r#"Write a job proposal on behalf of this freelancer.

{trust_instruction}

FREELANCER
Name: {name}
Skills: {skills}
Experience: {experience}

JOB
{title} at {company}
Description: {description}

The proposal must be concise, point to specific alignment between the freelancer's skills and the job, and keep a confident, professional tone.

Return a JSON object with this EXACT schema:
{
  "proposal": "Full proposal text, ready to send.",
  "keySellingPoints": ["Why this freelancer fits, one point per entry"]
}"#;
