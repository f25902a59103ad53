//! Resume Parser: raw resume text → `ParsedResume` through one LLM call.
//!
//! The reply is read leniently: a non-JSON reply yields an empty resume, and
//! inside a JSON object each field that has the wrong type is simply empty.

use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::llm_client::{try_decode_object, LlmClient};
use crate::models::resume::ParsedResume;
use crate::resume::prompts::{RESUME_PARSE_SYSTEM, RESUME_PARSE_USER};

const PROMPT_CHAR_LIMIT: usize = 12_000;
const RAW_TEXT_CHAR_LIMIT: usize = 2_000;

pub async fn parse_resume(text: &str, llm: &LlmClient) -> Result<ParsedResume, AppError> {
    let system = format!("{RESUME_PARSE_SYSTEM}\n{JSON_ONLY_INSTRUCTION}");
    let user = RESUME_PARSE_USER.replace("{text}", &truncate_chars(text, PROMPT_CHAR_LIMIT));

    let raw = llm.chat(&system, &user).await?;

    let fields = match try_decode_object(&raw) {
        Ok(fields) => fields,
        Err(e) => {
            warn!("Resume reply could not be decoded ({e}); returning empty fields");
            Map::new()
        }
    };

    let parsed = ParsedResume {
        skills: string_list(&fields, "skills"),
        experience: string_list(&fields, "experience"),
        education: string_list(&fields, "education"),
        summary: fields
            .get("summary")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        raw_text: truncate_chars(text, RAW_TEXT_CHAR_LIMIT),
    };

    info!(
        "Parsed resume: {} skills, {} experience entries, {} education entries",
        parsed.skills.len(),
        parsed.experience.len(),
        parsed.education.len()
    );
    Ok(parsed)
}

/// String items of the array at `key`; non-string items are skipped.
fn string_list(fields: &Map<String, Value>, key: &str) -> Vec<String> {
    fields
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn truncate_chars(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}
