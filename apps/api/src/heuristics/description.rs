//! Section splitter for job descriptions written in the
//! "Job Title - X  Location - Y  Job Requirements ...  Key Responsibilities ..." style
//! that aggregator feeds often produce. Best effort: anything it cannot place is
//! left to the caller to show as the raw description.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Structured display fields pulled out of a description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDetails {
    /// Role name found in the text; `None` means keep the listing's own title.
    pub job_title: Option<String>,
    pub experience: Option<String>,
    pub location: Option<String>,
    pub requirements: Vec<String>,
    pub responsibilities: Vec<String>,
    /// The original description when no section marker was recognised.
    pub remaining: String,
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("description regex is valid")
}

static GENERIC_TITLE: Lazy<Regex> =
    Lazy::new(|| compile(r"(?i)^(developer|engineer|software engineer|job|position)$"));
static JOB_TITLE: Lazy<Regex> = Lazy::new(|| {
    compile(
        r"(?im)Job Title\s*[-–]\s*(.+?)(?:\s+Location\s*[-–]|\s+Experience\s*[-–]|\s+Job Requirements|\s+Key Responsibilities|\s*$)",
    )
});
static TITLE_WITH_YEARS: Lazy<Regex> =
    Lazy::new(|| compile(r"(?i)^(.+?)\s*[-–]\s*([0-9]+\+?\s*years?)\s*$"));
static LEADING_CLAUSE: Lazy<Regex> = Lazy::new(|| {
    compile(r"(?is)^(.+?)(?:\s+Location\s*[-–]|\s+Job Requirements|\s+Experience\s*[-–]|$)")
});
static JOB_TITLE_PREFIX: Lazy<Regex> = Lazy::new(|| compile(r"(?i)^Job Title\s*[-–]\s*"));
static DASH_SEPARATOR: Lazy<Regex> = Lazy::new(|| compile(r"\s*[-–]\s*"));
static TRAILING_YEARS: Lazy<Regex> = Lazy::new(|| compile(r"(?i)([0-9]+\+?\s*years?)\s*$"));
static LOCATION: Lazy<Regex> = Lazy::new(|| {
    compile(r"(?im)Location\s*[-–]\s*(.+?)(?:\s*Job Requirements|\s*Key Responsibilities|\s*$)")
});
static REQUIREMENTS: Lazy<Regex> =
    Lazy::new(|| compile(r"(?is)Job Requirements\s*(.+?)(?:Key Responsibilities|$)"));
static REQUIREMENT_SEPARATOR: Lazy<Regex> = Lazy::new(|| compile(r"[,;]|\s+\.\s+"));
static RESPONSIBILITIES: Lazy<Regex> = Lazy::new(|| compile(r"(?is)Key Responsibilities\s*(.+)$"));
static SENTENCE_END: Lazy<Regex> = Lazy::new(|| compile(r"\.\s+"));
static CAPITALISED_WORD: Lazy<Regex> = Lazy::new(|| compile(r"\s+[A-Z][a-z][a-z]"));
static EXPERIENCE: Lazy<Regex> = Lazy::new(|| {
    compile(r"(?im)Experience\s*[-–]\s*([0-9]+\+?\s*years?|.+?)(?:\s+Location|\s*Job Requirements|\s*$)")
});

/// Splits `description` into display sections.
///
/// `fallback_title` is the listing's own title; when it is a generic placeholder
/// and the text has no "Job Title" marker, the description's leading clause is
/// used as the title instead.
pub fn parse_job_description(description: &str, fallback_title: Option<&str>) -> JobDetails {
    let mut details = JobDetails::default();
    let text = description.trim();
    if text.is_empty() {
        return details;
    }

    if let Some(caps) = JOB_TITLE.captures(text) {
        let raw = caps[1].trim();
        match TITLE_WITH_YEARS.captures(raw) {
            Some(parts) => {
                details.job_title = Some(parts[1].trim().to_string());
                details.experience = Some(parts[2].trim().to_string());
            }
            None => details.job_title = Some(raw.to_string()),
        }
    }

    let generic = fallback_title.is_some_and(|t| GENERIC_TITLE.is_match(t.trim()));
    if details.job_title.is_none() && generic {
        if let Some(caps) = LEADING_CLAUSE.captures(text) {
            let first = caps[1].trim();
            let without_prefix = JOB_TITLE_PREFIX.replace(first, "");
            let candidate = DASH_SEPARATOR
                .split(without_prefix.trim())
                .next()
                .unwrap_or("")
                .trim();
            let len = candidate.chars().count();
            if len > 3 && len < 120 {
                details.job_title = Some(candidate.to_string());
                if details.experience.is_none() {
                    details.experience = TRAILING_YEARS
                        .captures(first)
                        .map(|y| y[1].trim().to_string());
                }
            }
        }
    }

    if let Some(caps) = LOCATION.captures(text) {
        details.location = Some(caps[1].trim().to_string());
    }

    if let Some(caps) = REQUIREMENTS.captures(text) {
        details.requirements = REQUIREMENT_SEPARATOR
            .split(caps[1].trim())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
    }

    if let Some(caps) = RESPONSIBILITIES.captures(text) {
        details.responsibilities = split_responsibilities(caps[1].trim());
    }

    if details.experience.is_none() {
        details.experience = EXPERIENCE
            .captures(text)
            .map(|caps| caps[1].trim().to_string());
    }

    let matched_any = details.job_title.is_some()
        || details.experience.is_some()
        || details.location.is_some()
        || !details.requirements.is_empty()
        || !details.responsibilities.is_empty();
    if !matched_any {
        details.remaining = text.to_string();
    }

    details
}

/// Breaks a responsibilities block at sentence ends and before capitalised words,
/// dropping fragments of four characters or fewer.
fn split_responsibilities(block: &str) -> Vec<String> {
    let mut fragments = Vec::new();
    for sentence in SENTENCE_END.split(block) {
        let mut start = 0;
        for m in CAPITALISED_WORD.find_iter(sentence) {
            fragments.push(&sentence[start..m.start()]);
            // Keep the capitalised word with the fragment that follows.
            start = m.start() + (m.as_str().len() - m.as_str().trim_start().len());
        }
        fragments.push(&sentence[start..]);
    }
    fragments
        .into_iter()
        .map(|f| f.trim())
        .map(|f| f.strip_prefix('.').map(str::trim_start).unwrap_or(f))
        .filter(|f| f.chars().count() > 4)
        .map(str::to_string)
        .collect()
}
