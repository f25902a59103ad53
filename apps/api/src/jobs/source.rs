//! Job Source: pluggable, trait-based provider of one page of listings.
//!
//! `SampleJobSource` serves the built-in catalog; `AdzunaJobSource` queries the
//! Adzuna search API. `AppState` holds an `Arc<dyn JobSource>` chosen at startup:
//! external mode when both Adzuna credentials are configured, sample mode otherwise.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::config::{AdzunaConfig, Config};
use crate::errors::AppError;
use crate::jobs::catalog::SAMPLE_CATALOG;
use crate::jobs::filters::{apply_structured_filter, StructuredFilter};
use crate::models::job::{JobListing, JobPage};

pub const RESULTS_PER_PAGE: usize = 10;
const DEFAULT_QUERY: &str = "developer";

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Implement this to add a listing backend without touching handlers or scoring.
#[async_trait]
pub trait JobSource: Send + Sync {
    /// "sample" or "external", for logs.
    fn name(&self) -> &'static str;

    /// Fetches page `page` (1-based) of listings matching `filter`.
    async fn fetch_page(&self, filter: &StructuredFilter, page: u32) -> Result<JobPage, AppError>;
}

/// Picks the backend from configuration.
pub fn build_job_source(config: &Config) -> Arc<dyn JobSource> {
    match &config.adzuna {
        Some(adzuna) => Arc::new(AdzunaJobSource::new(adzuna.clone())),
        None => Arc::new(SampleJobSource),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// SampleJobSource
// ────────────────────────────────────────────────────────────────────────────

/// Filters and pages the in-memory catalog. Deterministic, no I/O.
pub struct SampleJobSource;

#[async_trait]
impl JobSource for SampleJobSource {
    fn name(&self) -> &'static str {
        "sample"
    }

    async fn fetch_page(&self, filter: &StructuredFilter, page: u32) -> Result<JobPage, AppError> {
        Ok(sample_page(&SAMPLE_CATALOG, filter, page))
    }
}

fn sample_page(catalog: &[JobListing], filter: &StructuredFilter, page: u32) -> JobPage {
    let keyword_hits: Vec<JobListing> = catalog
        .iter()
        .filter(|job| matches_any_keyword(job, &filter.keywords))
        .cloned()
        .collect();
    let filtered = apply_structured_filter(keyword_hits, filter);

    let total = filtered.len();
    let offset = (page.max(1) as usize - 1) * RESULTS_PER_PAGE;
    let jobs = filtered
        .into_iter()
        .skip(offset)
        .take(RESULTS_PER_PAGE)
        .collect();

    JobPage { jobs, total }
}

/// True when no keywords are set, or any keyword appears in title, company,
/// location, description or skills (case-insensitive).
fn matches_any_keyword(job: &JobListing, keywords: &[String]) -> bool {
    if keywords.is_empty() {
        return true;
    }
    let haystacks = [
        job.title.to_lowercase(),
        job.company.to_lowercase(),
        job.location.to_lowercase(),
        job.description.to_lowercase(),
        job.skills.join(" ").to_lowercase(),
    ];
    keywords.iter().any(|kw| {
        let kw = kw.to_lowercase();
        haystacks.iter().any(|h| h.contains(&kw))
    })
}

// ────────────────────────────────────────────────────────────────────────────
// AdzunaJobSource
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct AdzunaResponse {
    /// Adzuna sends `null` here on some empty searches.
    #[serde(default)]
    results: Option<Vec<AdzunaJob>>,
    count: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct AdzunaJob {
    #[serde(default)]
    id: Value,
    title: Option<String>,
    description: Option<String>,
    redirect_url: Option<String>,
    created: Option<String>,
    location: Option<AdzunaNamed>,
    company: Option<AdzunaNamed>,
    salary_min: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct AdzunaNamed {
    display_name: Option<String>,
}

impl From<AdzunaJob> for JobListing {
    fn from(job: AdzunaJob) -> Self {
        let id = match job.id {
            Value::String(s) => s,
            Value::Null => String::new(),
            other => other.to_string(),
        };
        JobListing {
            id,
            title: job.title.unwrap_or_else(|| "Job".to_string()),
            company: job
                .company
                .and_then(|c| c.display_name)
                .unwrap_or_else(|| "Company".to_string()),
            location: job
                .location
                .and_then(|l| l.display_name)
                .unwrap_or_else(|| "N/A".to_string()),
            description: job.description.unwrap_or_default(),
            skills: vec![],
            apply_link: job.redirect_url.unwrap_or_else(|| "#".to_string()),
            posted_at: job
                .created
                .map(|c| c.chars().take(10).collect::<String>()),
            experience_required: None,
            compensation_min: job.salary_min,
        }
    }
}

/// Queries the Adzuna search API one page at a time. No retries, no fallback.
pub struct AdzunaJobSource {
    client: Client,
    config: AdzunaConfig,
}

impl AdzunaJobSource {
    pub fn new(config: AdzunaConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    async fn search(&self, what: &str, page: u32) -> Result<(Vec<JobListing>, usize), AppError> {
        let url = format!(
            "{}/v1/api/jobs/{}/search/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.country,
            page
        );
        let per_page = RESULTS_PER_PAGE.to_string();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("app_id", self.config.app_id.as_str()),
                ("app_key", self.config.app_key.as_str()),
                ("results_per_page", per_page.as_str()),
                ("what", what),
                ("content-type", "application/json"),
            ])
            .send()
            .await
            .map_err(|e| AppError::JobSource(format!("Adzuna request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::JobSource(format!(
                "Adzuna API error: {}",
                status.as_u16()
            )));
        }

        let body: AdzunaResponse = response
            .json()
            .await
            .map_err(|e| AppError::JobSource(format!("Adzuna response unreadable: {e}")))?;

        let jobs: Vec<JobListing> = body
            .results
            .unwrap_or_default()
            .into_iter()
            .map(JobListing::from)
            .collect();
        let total = body
            .count
            .map(|c| c as usize)
            .unwrap_or_else(|| estimated_total(page, jobs.len()));

        debug!("Adzuna page {page}: {} results, reported total {total}", jobs.len());
        Ok((jobs, total))
    }
}

#[async_trait]
impl JobSource for AdzunaJobSource {
    fn name(&self) -> &'static str {
        "external"
    }

    async fn fetch_page(&self, filter: &StructuredFilter, page: u32) -> Result<JobPage, AppError> {
        let page = page.max(1);
        let what = if filter.keywords.is_empty() {
            DEFAULT_QUERY.to_string()
        } else {
            filter.keywords.join(" ")
        };

        let (fetched, raw_total) = self.search(&what, page).await?;
        let fetched_len = fetched.len();
        // Only this page is filtered; the remote catalog is never rescanned.
        let jobs = apply_structured_filter(fetched, filter);
        let total = corrected_total(raw_total, jobs.len());

        info!(
            "External page {page} for {what:?}: {fetched_len} fetched, {} kept, total {total}",
            jobs.len()
        );
        Ok(JobPage { jobs, total })
    }
}

/// Stand-in total when the API omits `count`.
fn estimated_total(page: u32, fetched: usize) -> usize {
    let page = page.max(1) as usize;
    if fetched < RESULTS_PER_PAGE {
        (page - 1) * RESULTS_PER_PAGE + fetched
    } else {
        page * RESULTS_PER_PAGE + 1
    }
}

/// A full page after filtering keeps at least one more page reachable;
/// a short page reports only what it holds.
fn corrected_total(raw_total: usize, kept: usize) -> usize {
    if kept >= RESULTS_PER_PAGE {
        raw_total.max(kept + 1)
    } else {
        kept
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::filters::Seniority;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn keywords(words: &[&str]) -> StructuredFilter {
        StructuredFilter {
            keywords: words.iter().map(|w| w.to_string()).collect(),
            ..StructuredFilter::default()
        }
    }

    fn adzuna_source(server: &MockServer) -> AdzunaJobSource {
        AdzunaJobSource::new(AdzunaConfig {
            app_id: "id-123".to_string(),
            app_key: "key-456".to_string(),
            country: "gb".to_string(),
            base_url: server.uri(),
        })
    }

    fn adzuna_job(id: u64, title: &str) -> Value {
        json!({
            "id": id.to_string(),
            "title": title,
            "description": format!("{title} working on services."),
            "redirect_url": format!("https://adzuna.example/{id}"),
            "created": "2025-02-03T10:00:00Z",
            "location": { "display_name": "London" },
            "company": { "display_name": "Globex" },
            "salary_min": 45000.0
        })
    }

    #[tokio::test]
    async fn test_sample_react_search_first_page() {
        let page = SampleJobSource
            .fetch_page(&keywords(&["react"]), 1)
            .await
            .unwrap();

        let expected: Vec<&str> = SAMPLE_CATALOG
            .iter()
            .filter(|j| matches_any_keyword(j, &["react".to_string()]))
            .map(|j| j.id.as_str())
            .collect();
        assert_eq!(page.total, expected.len());
        assert_eq!(page.total, 9);
        assert!(page.jobs.len() <= RESULTS_PER_PAGE);
        assert_eq!(
            page.jobs.iter().map(|j| j.id.as_str()).collect::<Vec<_>>(),
            expected
        );
    }

    #[tokio::test]
    async fn test_sample_second_page_offsets_by_ten() {
        let page = SampleJobSource
            .fetch_page(&StructuredFilter::default(), 2)
            .await
            .unwrap();
        assert_eq!(page.total, 12);
        assert_eq!(
            page.jobs.iter().map(|j| j.id.as_str()).collect::<Vec<_>>(),
            vec!["11", "12"]
        );
    }

    #[tokio::test]
    async fn test_sample_page_beyond_end_is_empty() {
        let page = SampleJobSource
            .fetch_page(&StructuredFilter::default(), 5)
            .await
            .unwrap();
        assert!(page.jobs.is_empty());
        assert_eq!(page.total, 12);
    }

    #[tokio::test]
    async fn test_sample_keywords_and_structured_filter_combine() {
        let filter = StructuredFilter {
            keywords: vec!["nestjs".to_string()],
            location_keywords: vec!["remote".to_string()],
            ..StructuredFilter::default()
        };
        let page = SampleJobSource.fetch_page(&filter, 1).await.unwrap();
        assert_eq!(
            page.jobs.iter().map(|j| j.id.as_str()).collect::<Vec<_>>(),
            vec!["8"]
        );
        assert_eq!(page.total, 1);
    }

    #[test]
    fn test_keyword_matches_skills() {
        let job = &SAMPLE_CATALOG[5];
        assert!(matches_any_keyword(job, &["kubernetes".to_string()]));
        assert!(matches_any_keyword(job, &["figma".to_string(), "docker".to_string()]));
        assert!(!matches_any_keyword(job, &["figma".to_string()]));
    }

    #[test]
    fn test_adzuna_record_placeholders() {
        let job: AdzunaJob = serde_json::from_value(json!({ "id": 987 })).unwrap();
        let listing = JobListing::from(job);
        assert_eq!(listing.id, "987");
        assert_eq!(listing.title, "Job");
        assert_eq!(listing.company, "Company");
        assert_eq!(listing.location, "N/A");
        assert_eq!(listing.description, "");
        assert_eq!(listing.apply_link, "#");
        assert_eq!(listing.posted_at, None);
        assert!(listing.skills.is_empty());
    }

    #[test]
    fn test_total_correction() {
        assert_eq!(corrected_total(500, 10), 500);
        assert_eq!(corrected_total(5, 10), 11);
        assert_eq!(corrected_total(500, 4), 4);
        assert_eq!(estimated_total(3, 4), 24);
        assert_eq!(estimated_total(3, 10), 31);
    }

    #[tokio::test]
    async fn test_adzuna_query_and_mapping() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/api/jobs/gb/search/2"))
            .and(query_param("app_id", "id-123"))
            .and(query_param("app_key", "key-456"))
            .and(query_param("results_per_page", "10"))
            .and(query_param("what", "rust tokio"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [adzuna_job(1, "Senior Rust Engineer"), adzuna_job(2, "Rust Developer")],
                "count": 250
            })))
            .expect(1)
            .mount(&server)
            .await;

        let page = adzuna_source(&server)
            .fetch_page(&keywords(&["rust", "tokio"]), 2)
            .await
            .unwrap();

        assert_eq!(page.jobs.len(), 2);
        assert_eq!(page.total, 2);
        let first = &page.jobs[0];
        assert_eq!(first.id, "1");
        assert_eq!(first.company, "Globex");
        assert_eq!(first.location, "London");
        assert_eq!(first.posted_at.as_deref(), Some("2025-02-03"));
        assert_eq!(first.compensation_min, Some(45000.0));
    }

    #[tokio::test]
    async fn test_adzuna_defaults_query_and_filters_page_only() {
        let server = MockServer::start().await;
        let results: Vec<Value> = (1..=10)
            .map(|i| adzuna_job(i, if i % 2 == 0 { "Senior Developer" } else { "Developer" }))
            .collect();
        Mock::given(method("GET"))
            .and(path("/v1/api/jobs/gb/search/1"))
            .and(query_param("what", "developer"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "results": results, "count": 400 })),
            )
            .mount(&server)
            .await;

        let filter = StructuredFilter {
            seniority: Some(Seniority::Senior),
            ..StructuredFilter::default()
        };
        let page = adzuna_source(&server).fetch_page(&filter, 1).await.unwrap();
        assert_eq!(page.jobs.len(), 5);
        assert!(page.jobs.iter().all(|j| j.title.starts_with("Senior")));
        assert_eq!(page.total, 5);
    }

    #[tokio::test]
    async fn test_adzuna_full_page_keeps_reported_total() {
        let server = MockServer::start().await;
        let results: Vec<Value> = (1..=10).map(|i| adzuna_job(i, "Developer")).collect();
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "results": results, "count": 400 })),
            )
            .mount(&server)
            .await;

        let page = adzuna_source(&server)
            .fetch_page(&StructuredFilter::default(), 1)
            .await
            .unwrap();
        assert_eq!(page.jobs.len(), 10);
        assert_eq!(page.total, 400);
    }

    #[tokio::test]
    async fn test_adzuna_null_results_is_empty_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "results": null, "count": 0 })),
            )
            .mount(&server)
            .await;

        let page = adzuna_source(&server)
            .fetch_page(&StructuredFilter::default(), 1)
            .await
            .unwrap();
        assert!(page.jobs.is_empty());
        assert_eq!(page.total, 0);
    }

    #[tokio::test]
    async fn test_adzuna_error_status_is_fatal() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&server)
            .await;

        let result = adzuna_source(&server)
            .fetch_page(&StructuredFilter::default(), 1)
            .await;
        match result {
            Err(AppError::JobSource(msg)) => assert!(msg.contains("503")),
            other => panic!("expected job source error, got {other:?}"),
        }
    }
}
