use crate::llm_client::prompts::RAW_JSON_OUTPUT_RULES;

/// Role used when the caller does not name a target job.
pub const DEFAULT_JOB_ROLE: &str = "General ATS Evaluation";

/// The exact object the model must return when it cannot analyze the résumé.
pub const MODEL_FALLBACK_JSON: &str = r#"{
  "ats_score": 0,
  "overall_summary": "Analysis unavailable",
  "strengths": [],
  "missing_or_weak_areas": [],
  "ats_keyword_gaps": [],
  "improvement_suggestions": [],
  "structure_feedback": [],
  "final_recommendation": "Please retry later"
}"#;

/// Returns the role a prompt is built for; blank roles fall back to the general evaluation.
pub fn effective_role(job_role: Option<&str>) -> &str {
    job_role
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .unwrap_or(DEFAULT_JOB_ROLE)
}

/// Builds the evaluation prompt. Deterministic: same inputs, same prompt.
pub fn build_resume_prompt(resume_text: &str, job_role: Option<&str>) -> String {
    let role = effective_role(job_role);
    format!(
        "\
You are an expert ATS resume evaluator.

Analyze the resume below for the role of: {role}

Return a detailed ATS evaluation as a single JSON object with these keys:
- ats_score (integer 0-100)
- overall_summary (string)
- strengths (array of strings)
- missing_or_weak_areas (array of strings)
- ats_keyword_gaps (array of strings)
- improvement_suggestions (array of strings)
- structure_feedback (array of strings)
- final_recommendation (string)

Resume:
{resume_text}

{RAW_JSON_OUTPUT_RULES}
- If analysis cannot be performed, return EXACTLY this JSON:

{MODEL_FALLBACK_JSON}
"
    )
}
