// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it.

/// Output rules appended to every prompt that expects a single JSON object back.
pub const RAW_JSON_OUTPUT_RULES: &str = "\
IMPORTANT OUTPUT RULES:
- Return ONLY valid JSON
- Do NOT include markdown
- Do NOT include explanations
- Do NOT include code fences
- Do NOT include text outside JSON";
