use serde::{Deserialize, Serialize};

/// One job posting in the common shape, whichever source produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobListing {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    #[serde(default)]
    pub skills: Vec<String>,
    pub apply_link: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posted_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience_required: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compensation_min: Option<f64>,
}

/// A listing annotated by the match scorer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredJob {
    #[serde(flatten)]
    pub listing: JobListing,
    /// 0 – 100
    pub score: u32,
    pub reason: String,
}

impl AsRef<JobListing> for JobListing {
    fn as_ref(&self) -> &JobListing {
        self
    }
}

impl AsRef<JobListing> for ScoredJob {
    fn as_ref(&self) -> &JobListing {
        &self.listing
    }
}

/// One page of listings plus the total used for pagination.
#[derive(Debug, Clone, Serialize)]
pub struct JobPage<T = JobListing> {
    pub jobs: Vec<T>,
    pub total: usize,
}
