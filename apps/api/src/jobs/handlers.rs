use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::heuristics::description::{parse_job_description, JobDetails};
use crate::heuristics::posted_ago::relative_age;
use crate::jobs::filters::{build_structured_filter, lenient_number, JobFilters, StructuredFilter};
use crate::jobs::matching::score_jobs;
use crate::jobs::nl_filter::parse_natural_language_filter;
use crate::models::job::{JobListing, JobPage, ScoredJob};
use crate::models::resume::ResumeProfile;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct JobsQuery {
    #[serde(flatten)]
    pub filters: JobFilters,
    #[serde(default, deserialize_with = "lenient_number")]
    pub page: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRequest {
    #[serde(flatten)]
    pub profile: ResumeProfile,
    #[serde(flatten)]
    pub filters: JobFilters,
    #[serde(default)]
    pub text_filter: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub page: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct ParseFilterRequest {
    #[serde(default)]
    pub text: String,
}

/// A listing (or scored listing) as the client sees it: its own fields plus
/// display-only enrichment.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobView<T> {
    #[serde(flatten)]
    pub job: T,
    pub posted_ago: Option<String>,
    pub details: JobDetails,
}

impl<T: AsRef<JobListing>> From<T> for JobView<T> {
    fn from(job: T) -> Self {
        let listing = job.as_ref();
        let posted_ago = listing.posted_at.as_deref().and_then(relative_age);
        let details = parse_job_description(&listing.description, Some(&listing.title));
        Self {
            job,
            posted_ago,
            details,
        }
    }
}

fn into_views<T: AsRef<JobListing>>(page: JobPage<T>) -> JobPage<JobView<T>> {
    JobPage {
        jobs: page.jobs.into_iter().map(JobView::from).collect(),
        total: page.total,
    }
}

/// 1-based page number; missing, fractional below 1 or garbage values become 1.
fn page_number(value: Option<f64>) -> u32 {
    match value {
        Some(p) if p >= 1.0 => p.min(f64::from(u32::MAX)) as u32,
        _ => 1,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/jobs
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    Query(query): Query<JobsQuery>,
) -> Result<Json<JobPage<JobView<JobListing>>>, AppError> {
    let filter = build_structured_filter(&query.filters);
    let page = page_number(query.page);

    let result = state.jobs.fetch_page(&filter, page).await?;
    info!(
        "Listed {} of {} jobs (page {page}, source {})",
        result.jobs.len(),
        result.total,
        state.jobs.name()
    );
    Ok(Json(into_views(result)))
}

/// POST /api/jobs/match
pub async fn handle_match_jobs(
    State(state): State<AppState>,
    Json(req): Json<MatchRequest>,
) -> Result<Json<JobPage<JobView<ScoredJob>>>, AppError> {
    let text_filter = req
        .text_filter
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty());
    let filter = match text_filter {
        Some(text) => parse_natural_language_filter(text, &state.llm).await?,
        None => build_structured_filter(&req.filters),
    };
    let page = page_number(req.page);

    let result = state.jobs.fetch_page(&filter, page).await?;
    let total = result.total;
    let scored = score_jobs(&req.profile, result.jobs, &state.llm).await?;
    info!(
        "Matched {} jobs (page {page}, total {total}, natural-language filter: {})",
        scored.len(),
        text_filter.is_some()
    );

    Ok(Json(into_views(JobPage { jobs: scored, total })))
}

/// POST /api/jobs/parse-filter
pub async fn handle_parse_filter(
    State(state): State<AppState>,
    Json(req): Json<ParseFilterRequest>,
) -> Result<Json<StructuredFilter>, AppError> {
    let text = req.text.trim();
    if text.is_empty() {
        return Err(AppError::Validation("text is required".to_string()));
    }
    let filter = parse_natural_language_filter(text, &state.llm).await?;
    Ok(Json(filter))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::listing;
    use chrono::Utc;
    use serde_json::json;

    #[test]
    fn test_page_number_clamps() {
        assert_eq!(page_number(None), 1);
        assert_eq!(page_number(Some(0.0)), 1);
        assert_eq!(page_number(Some(-4.0)), 1);
        assert_eq!(page_number(Some(3.0)), 3);
        assert_eq!(page_number(Some(2.7)), 2);
    }

    #[test]
    fn test_view_flattens_listing_and_adds_enrichment() {
        let mut job = listing("1", "Rust Engineer");
        job.posted_at = Some(Utc::now().to_rfc3339());
        let view = JobView::from(job);
        let value = serde_json::to_value(&view).unwrap();
        assert_eq!(value["id"], "1");
        assert_eq!(value["applyLink"], "https://example.com/apply/1");
        assert_eq!(value["postedAgo"], "Today");
        assert_eq!(
            value["details"]["remaining"],
            "Rust Engineer role building web services."
        );
    }

    #[test]
    fn test_scored_view_keeps_score_and_reason() {
        let scored = ScoredJob {
            listing: listing("2", "Go Engineer"),
            score: 64,
            reason: "Some overlap.".to_string(),
        };
        let value = serde_json::to_value(JobView::from(scored)).unwrap();
        assert_eq!(value["score"], 64);
        assert_eq!(value["reason"], "Some overlap.");
        assert_eq!(value["title"], "Go Engineer");
    }

    #[test]
    fn test_missing_date_has_null_age() {
        let mut job = listing("3", "Rust Engineer");
        job.posted_at = None;
        let value = serde_json::to_value(JobView::from(job)).unwrap();
        assert!(value["postedAgo"].is_null());
    }

    #[test]
    fn test_match_request_reads_profile_and_filters() {
        let req: MatchRequest = serde_json::from_value(json!({
            "skills": ["Rust"],
            "experience": ["4 years backend"],
            "summary": "Engineer",
            "keywords": "rust, tokio",
            "postedWithin": "7",
            "experienceMax": 5,
            "textFilter": "  ",
            "page": "2"
        }))
        .unwrap();
        assert_eq!(req.profile.skills, vec!["Rust"]);
        assert_eq!(req.profile.summary, "Engineer");
        assert_eq!(req.filters.keywords.as_deref(), Some("rust, tokio"));
        assert_eq!(req.filters.posted_within_days, Some(7.0));
        assert_eq!(req.filters.experience_max_years, Some(5.0));
        assert_eq!(req.text_filter.as_deref(), Some("  "));
        assert_eq!(page_number(req.page), 2);
    }

    #[test]
    fn test_match_request_tolerates_bad_numbers() {
        let req: MatchRequest = serde_json::from_value(json!({
            "compensationMin": "lots",
            "page": null
        }))
        .unwrap();
        assert!(req.profile.skills.is_empty());
        assert_eq!(req.filters.compensation_min, None);
        assert_eq!(page_number(req.page), 1);
    }
}
