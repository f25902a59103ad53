// Shared prompt fragments.
// Each feature module that calls the LLM defines its own prompts.rs alongside it;
// this file only holds the cross-cutting pieces.

/// Appended to every system prompt: the decode step expects a bare JSON object.
pub const JSON_ONLY_INSTRUCTION: &str = "Respond with valid JSON only. \
    Do NOT use markdown code fences. \
    Do NOT include any text outside the JSON object.";
