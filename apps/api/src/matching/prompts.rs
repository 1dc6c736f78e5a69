// Prompt constants for job-to-profile matching.

/// System prompt for the match scorer.
pub const MATCH_SYSTEM: &str = "You are an AI assistant specialized in matching freelancer \
    profiles to job postings. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Replace: {trust_instruction}, {skills}, {experience}, {title}, {description},
///          {required_skills}, {preferred_skills}, {experience_level}
pub const MATCH_PROMPT_TEMPLATE: &str = r#"Analyze the freelancer's skills and experience against the job's requirements and produce a match score and a compatibility assessment.

{trust_instruction}

FREELANCER PROFILE
Skills: {skills}
Experience Summary: {experience}

JOB POSTING
Title: {title}
Description: {description}
Required Skills: {required_skills}
Preferred Skills: {preferred_skills}
Experience Level: {experience_level}

Compare the profile against the posting:
- Consider every skill, required and preferred, and the overall experience described.
- `matchScore` is an integer from 0 to 100, where 100 is a perfect match.
- `compatibilityAssessment` is a concise but specific explanation: the skills and experience that align well, plus any significant gaps or signs of being over- or under-qualified.

Return a JSON object with this EXACT schema:
{"matchScore": 78, "compatibilityAssessment": "Strong React background covers the core requirement; no Next.js exposure mentioned."}"#;
