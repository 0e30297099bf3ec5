// Shared prompt constants and prompt-building utilities.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON value. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Proficiency and weight scale shared by extraction and requirement prompts.
pub const LEVEL_SCALE: &str = "1 = Beginner/Nice to have, 2 = Intermediate/Important, 3 = Expert/Mandatory.";
