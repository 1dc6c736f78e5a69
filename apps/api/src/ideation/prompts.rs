/// System prompt for gig ideation; enforces JSON-only output.
pub const GIG_IDEA_SYSTEM: &str = "You are a freelance market strategist. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Replace: {trust_instruction}, {skills}, {experience}
pub const GIG_IDEA_PROMPT_TEMPLATE: &str = r#"Based on the skills and experience below, suggest one "Perfect Gig": a niche specialization this freelancer should offer to maximize earnings and impact in the current AI-driven market.

{trust_instruction}

Skills: {skills}
Experience: {experience}

Be creative. Look for high-value niches that combine these technical skills with business value.

Return a JSON object with this EXACT schema:
{
  "title": "A catchy, high-value title for the gig",
  "description": "What the service or project delivers, in detail",
  "marketValue": "Estimated market rate, e.g. $150/hr",
  "whyNow": "Why this niche is in demand right now"
}"#;
