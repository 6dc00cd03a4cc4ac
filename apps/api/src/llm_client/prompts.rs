// Shared prompt constants.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Instruction that keeps rewritten content anchored to the source résumé.
pub const FIDELITY_INSTRUCTION: &str = "\
    CRITICAL: Rewrite and reorder, but never invent. Every skill, role, metric, \
    and credential you output must be supported by the résumé text. \
    If a detail is not present in the résumé, leave it out.";
