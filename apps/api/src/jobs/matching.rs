//! Match Scorer: asks the LLM to score a page of listings against a resume profile
//! and joins the scores back by listing id.
//!
//! Scoring annotates, it never adds or drops listings: the output always has one
//! entry per input listing.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::errors::AppError;
use crate::jobs::prompts::{match_score_user, MATCH_SCORE_SYSTEM};
use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::llm_client::{try_decode_object, DecodeError, LlmClient};
use crate::models::job::{JobListing, ScoredJob};
use crate::models::resume::ResumeProfile;

const DESCRIPTION_CHAR_LIMIT: usize = 300;
const FALLBACK_SCORE: u32 = 50;
const UNDECODABLE_REASON: &str = "Unable to score.";
const MISSING_REASON: &str = "No score.";

/// The listing fields the model sees.
#[derive(Debug, Serialize)]
struct ListingForScoring<'a> {
    id: &'a str,
    title: &'a str,
    company: &'a str,
    skills: &'a [String],
    description: String,
}

#[derive(Debug, Clone, PartialEq)]
struct ScoreEntry {
    score: f64,
    reason: String,
}

/// Scores `listings` for `profile`, highest score first.
/// Empty input returns immediately without an LLM call.
pub async fn score_jobs(
    profile: &ResumeProfile,
    listings: Vec<JobListing>,
    llm: &LlmClient,
) -> Result<Vec<ScoredJob>, AppError> {
    if listings.is_empty() {
        return Ok(vec![]);
    }

    let system = format!("{MATCH_SCORE_SYSTEM}\n{JSON_ONLY_INSTRUCTION}");
    let user = build_scoring_prompt(profile, &listings)?;
    debug!("Scoring {} listings (prompt {} chars)", listings.len(), user.len());

    let raw = llm.chat(&system, &user).await?;
    let scored = merge_scores(listings, decode_scores(&raw));

    info!(
        "Scored {} listings, top score {}",
        scored.len(),
        scored.first().map(|s| s.score).unwrap_or_default()
    );
    Ok(scored)
}

fn build_scoring_prompt(profile: &ResumeProfile, listings: &[JobListing]) -> Result<String, AppError> {
    let trimmed: Vec<ListingForScoring<'_>> = listings
        .iter()
        .map(|job| ListingForScoring {
            id: &job.id,
            title: &job.title,
            company: &job.company,
            skills: &job.skills,
            description: job.description.chars().take(DESCRIPTION_CHAR_LIMIT).collect(),
        })
        .collect();
    let jobs_json = serde_json::to_string(&trimmed).map_err(anyhow::Error::from)?;

    Ok(match_score_user(
        &profile.skills.join(", "),
        &profile.experience.join("; "),
        &profile.summary,
        &jobs_json,
    ))
}

/// Reads `{scores: [{id, score, reason}]}`. Entries without a usable id or score
/// are skipped; a later entry for the same id replaces an earlier one.
fn decode_scores(raw: &str) -> Result<HashMap<String, ScoreEntry>, DecodeError> {
    let fields = try_decode_object(raw)?;
    let entries = fields
        .get("scores")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    let mut by_id = HashMap::new();
    for entry in entries {
        let id = match entry.get("id") {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => continue,
        };
        let score = match entry.get("score") {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        let Some(score) = score.filter(|s| s.is_finite()) else {
            continue;
        };
        let reason = entry
            .get("reason")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        by_id.insert(id, ScoreEntry { score, reason });
    }
    Ok(by_id)
}

/// Joins decoded scores onto the page, clamps to 0–100 and sorts (stable) by score.
fn merge_scores(
    listings: Vec<JobListing>,
    decoded: Result<HashMap<String, ScoreEntry>, DecodeError>,
) -> Vec<ScoredJob> {
    let mut scored: Vec<ScoredJob> = match decoded {
        Ok(mut by_id) => listings
            .into_iter()
            .map(|listing| match by_id.remove(&listing.id) {
                Some(entry) => ScoredJob {
                    score: clamp_score(entry.score),
                    reason: entry.reason,
                    listing,
                },
                None => ScoredJob {
                    listing,
                    score: FALLBACK_SCORE,
                    reason: MISSING_REASON.to_string(),
                },
            })
            .collect(),
        Err(e) => {
            warn!("Score reply could not be decoded ({e}); using fallback scores");
            listings
                .into_iter()
                .map(|listing| ScoredJob {
                    listing,
                    score: FALLBACK_SCORE,
                    reason: UNDECODABLE_REASON.to_string(),
                })
                .collect()
        }
    };

    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored
}

fn clamp_score(score: f64) -> u32 {
    score.round().clamp(0.0, 100.0) as u32
}
