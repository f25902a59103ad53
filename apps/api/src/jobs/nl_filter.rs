//! Natural-language filter parsing: free text → `StructuredFilter` via the LLM.
//!
//! Decode problems never reach the caller: a reply that is not a JSON object turns
//! the whole input into a keyword search. Transport and configuration errors do.

use std::collections::HashSet;

use chrono::{NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::heuristics::keywords::parse_keywords;
use crate::jobs::filters::{days_before, experience_years, Seniority, StructuredFilter};
use crate::jobs::prompts::{FILTER_PARSE_SYSTEM, FILTER_PARSE_USER};
use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::llm_client::{try_decode_object, LlmClient};

const RECENT_WINDOW_DAYS: u32 = 14;

/// Phrases that always mean "posted in the last 14 days", whatever the model said.
static LAST_TWO_WEEKS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)last\s*2\s*weeks|past\s*2\s*weeks|2\s*weeks\s*ago|posted\s*in\s*last\s*2\s*weeks")
        .expect("two-weeks regex is valid")
});

/// Parses a natural-language filter sentence, evaluated today (UTC).
pub async fn parse_natural_language_filter(
    text: &str,
    llm: &LlmClient,
) -> Result<StructuredFilter, AppError> {
    parse_natural_language_filter_at(text, llm, Utc::now().date_naive()).await
}

pub async fn parse_natural_language_filter_at(
    text: &str,
    llm: &LlmClient,
    today: NaiveDate,
) -> Result<StructuredFilter, AppError> {
    let two_weeks_ago = days_before(today, RECENT_WINDOW_DAYS);
    let system = format!(
        "{}\n{}",
        FILTER_PARSE_SYSTEM
            .replace("{today}", &today.to_string())
            .replace("{two_weeks_ago}", &two_weeks_ago.to_string()),
        JSON_ONLY_INSTRUCTION
    );
    let user = FILTER_PARSE_USER.replace("{text}", text);

    let raw = llm.chat(&system, &user).await?;

    let mut filter = match try_decode_object(&raw) {
        Ok(fields) => filter_from_reply(&fields),
        Err(e) => {
            warn!("Filter reply could not be decoded ({e}); falling back to keyword search");
            StructuredFilter::keywords_only(text)
        }
    };

    if LAST_TWO_WEEKS.is_match(text) {
        filter.posted_after = Some(two_weeks_ago);
    }

    info!(
        "Parsed filter: keywords={:?}, posted_after={:?}, seniority={:?}",
        filter.keywords, filter.posted_after, filter.seniority
    );
    Ok(filter)
}

/// Reads each field independently; a field with the wrong type is left unset.
fn filter_from_reply(fields: &Map<String, Value>) -> StructuredFilter {
    StructuredFilter {
        keywords: parse_keywords(&string_terms(fields.get("keywords")).join(" ")),
        posted_after: fields
            .get("postedAfter")
            .and_then(Value::as_str)
            .and_then(|s| s.trim().get(..10))
            .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()),
        location_keywords: string_terms(fields.get("locationKeywords")),
        seniority: fields
            .get("seniority")
            .and_then(Value::as_str)
            .and_then(Seniority::parse),
        experience_min_years: fields
            .get("experienceMinYears")
            .and_then(Value::as_f64)
            .and_then(experience_years),
        experience_max_years: fields
            .get("experienceMaxYears")
            .and_then(Value::as_f64)
            .and_then(experience_years),
        compensation_min: None,
    }
}

/// Lowercased, trimmed, de-duplicated strings from a JSON array; other items are skipped.
fn string_terms(value: Option<&Value>) -> Vec<String> {
    let mut seen = HashSet::new();
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(|s| s.trim().to_lowercase())
                .filter(|s| !s.is_empty() && seen.insert(s.clone()))
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{mock_llm, unconfigured_llm};
    use serde_json::json;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 2, 20).unwrap()
    }

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_reply_fields_are_read() {
        let filter = filter_from_reply(&object(json!({
            "keywords": ["React", "node", "react", "Node.js  developer"],
            "postedAfter": "2025-02-06",
            "locationKeywords": ["Remote"],
            "seniority": "senior",
            "experienceMaxYears": 3
        })));
        assert_eq!(filter.keywords, vec!["react", "node", "node.js", "developer"]);
        assert_eq!(filter.posted_after, NaiveDate::from_ymd_opt(2025, 2, 6));
        assert_eq!(filter.location_keywords, vec!["remote"]);
        assert_eq!(filter.seniority, Some(Seniority::Senior));
        assert_eq!(filter.experience_max_years, Some(3));
        assert_eq!(filter.experience_min_years, None);
        assert_eq!(filter.compensation_min, None);
    }

    #[test]
    fn test_mistyped_fields_are_unset_individually() {
        let filter = filter_from_reply(&object(json!({
            "keywords": "react",
            "postedAfter": "yesterday",
            "locationKeywords": ["remote", 42, null],
            "seniority": "overlord",
            "experienceMaxYears": "three"
        })));
        assert!(filter.keywords.is_empty());
        assert_eq!(filter.posted_after, None);
        assert_eq!(filter.location_keywords, vec!["remote"]);
        assert_eq!(filter.seniority, None);
        assert_eq!(filter.experience_max_years, None);
    }

    #[test]
    fn test_out_of_range_years_are_dropped() {
        let filter = filter_from_reply(&object(json!({ "experienceMaxYears": 45 })));
        assert_eq!(filter.experience_max_years, None);
    }

    #[tokio::test]
    async fn test_structured_reply_in_fences() {
        let (_server, llm) = mock_llm(
            "```json\n{\"keywords\": [\"rust\"], \"postedAfter\": null, \"locationKeywords\": [], \"seniority\": \"junior\", \"experienceMaxYears\": 1}\n```",
        )
        .await;
        let filter = parse_natural_language_filter_at("junior rust jobs", &llm, today())
            .await
            .unwrap();
        assert_eq!(filter.keywords, vec!["rust"]);
        assert_eq!(filter.seniority, Some(Seniority::Junior));
        assert_eq!(filter.experience_max_years, Some(1));
        assert_eq!(filter.posted_after, None);
    }

    #[tokio::test]
    async fn test_non_json_reply_becomes_keyword_search() {
        let (_server, llm) = mock_llm("I think you want React jobs!").await;
        let filter = parse_natural_language_filter_at("React, remote", &llm, today())
            .await
            .unwrap();
        assert_eq!(filter.keywords, vec!["react", "remote"]);
        assert!(filter.location_keywords.is_empty());
        assert_eq!(filter.seniority, None);
        assert_eq!(filter.posted_after, None);
    }

    #[tokio::test]
    async fn test_last_two_weeks_overrides_model_date() {
        let (_server, llm) = mock_llm(
            r#"{"keywords": ["react"], "postedAfter": "2020-01-01", "locationKeywords": [], "seniority": null, "experienceMaxYears": null}"#,
        )
        .await;
        let filter = parse_natural_language_filter_at(
            "react jobs posted in the last 2 weeks",
            &llm,
            today(),
        )
        .await
        .unwrap();
        assert_eq!(filter.posted_after, NaiveDate::from_ymd_opt(2025, 2, 6));
    }

    #[tokio::test]
    async fn test_two_weeks_override_applies_to_fallback_too() {
        let (_server, llm) = mock_llm("not json").await;
        let filter = parse_natural_language_filter_at("Past 2 weeks", &llm, today())
            .await
            .unwrap();
        assert_eq!(filter.posted_after, NaiveDate::from_ymd_opt(2025, 2, 6));
    }

    #[tokio::test]
    async fn test_missing_key_propagates() {
        let result = parse_natural_language_filter_at("rust", &unconfigured_llm(), today()).await;
        assert!(matches!(result, Err(AppError::Config(_))));
    }
}
