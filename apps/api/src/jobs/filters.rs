//! Filter Engine: explicit filter input → `StructuredFilter`, and the single-pass
//! listing filter every job source applies.
//!
//! No LLM calls here; the natural-language path lives in `nl_filter`.

use std::fmt;

use chrono::{Duration, NaiveDate, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};

use crate::heuristics::experience::{max_required_years, min_required_years};
use crate::heuristics::keywords::parse_keywords;
use crate::models::job::JobListing;

pub const MAX_POSTED_WITHIN_DAYS: u32 = 365;
pub const MAX_EXPERIENCE_YEARS: u32 = 30;

// ────────────────────────────────────────────────────────────────────────────
// Input
// ────────────────────────────────────────────────────────────────────────────

/// Raw filter fields as the client sent them. Every field is optional and
/// numeric fields tolerate strings; anything unusable arrives here as `None`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobFilters {
    #[serde(default, alias = "q")]
    pub keywords: Option<String>,
    #[serde(
        default,
        rename = "postedWithin",
        alias = "postedWithinDays",
        deserialize_with = "lenient_number"
    )]
    pub posted_within_days: Option<f64>,
    #[serde(
        default,
        rename = "experienceMin",
        alias = "experienceMinYears",
        deserialize_with = "lenient_number"
    )]
    pub experience_min_years: Option<f64>,
    #[serde(
        default,
        rename = "experienceMax",
        alias = "experienceMaxYears",
        deserialize_with = "lenient_number"
    )]
    pub experience_max_years: Option<f64>,
    #[serde(
        default,
        rename = "compensationMin",
        deserialize_with = "lenient_number"
    )]
    pub compensation_min: Option<f64>,
}

/// Accepts a JSON number or a numeric string; everything else becomes `None`
/// instead of a deserialization error.
pub fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    struct LenientNumber;

    impl<'de> de::Visitor<'de> for LenientNumber {
        type Value = Option<f64>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a number, a numeric string or nothing")
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
            Ok(Some(v).filter(|n| n.is_finite()))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(Some(v as f64))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(Some(v as f64))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(v.trim().parse::<f64>().ok().filter(|n| n.is_finite()))
        }

        fn visit_bool<E: de::Error>(self, _: bool) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D2: Deserializer<'de>>(self, d: D2) -> Result<Self::Value, D2::Error> {
            d.deserialize_any(LenientNumber)
        }

        fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            while seq.next_element::<de::IgnoredAny>()?.is_some() {}
            Ok(None)
        }

        fn visit_map<A: de::MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            while map.next_entry::<de::IgnoredAny, de::IgnoredAny>()?.is_some() {}
            Ok(None)
        }
    }

    deserializer.deserialize_any(LenientNumber)
}

// ────────────────────────────────────────────────────────────────────────────
// Structured filter
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Seniority {
    Senior,
    Mid,
    Junior,
}

impl Seniority {
    /// Case-insensitive; unknown tiers are `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "senior" => Some(Seniority::Senior),
            "mid" => Some(Seniority::Mid),
            "junior" => Some(Seniority::Junior),
            _ => None,
        }
    }

    /// Title/description substrings that place a listing in this tier.
    fn markers(self) -> &'static [&'static str] {
        match self {
            Seniority::Senior => &["senior", "lead", "principal", "staff"],
            Seniority::Junior => &["junior", "entry-level", "entry level"],
            Seniority::Mid => &["mid-level", "mid level", "medium", "intermediate"],
        }
    }
}

/// Resolved, validated criteria applied during listing selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredFilter {
    pub keywords: Vec<String>,
    pub posted_after: Option<NaiveDate>,
    pub location_keywords: Vec<String>,
    pub seniority: Option<Seniority>,
    pub experience_min_years: Option<u32>,
    pub experience_max_years: Option<u32>,
    pub compensation_min: Option<f64>,
}

impl StructuredFilter {
    /// Plain keyword search with every other criterion unset.
    pub fn keywords_only(text: &str) -> Self {
        Self {
            keywords: parse_keywords(text),
            ..Self::default()
        }
    }
}

/// Builds a structured filter from the explicit form fields, evaluated today (UTC).
pub fn build_structured_filter(filters: &JobFilters) -> StructuredFilter {
    build_structured_filter_at(filters, Utc::now().date_naive())
}

/// Never fails: out-of-range or fractional bounds are dropped, not clamped.
pub fn build_structured_filter_at(filters: &JobFilters, today: NaiveDate) -> StructuredFilter {
    let posted_after = filters
        .posted_within_days
        .and_then(|days| whole_in_range(days, 1, MAX_POSTED_WITHIN_DAYS))
        .map(|days| days_before(today, days));

    StructuredFilter {
        keywords: filters
            .keywords
            .as_deref()
            .map(parse_keywords)
            .unwrap_or_default(),
        posted_after,
        location_keywords: vec![],
        seniority: None,
        experience_min_years: filters.experience_min_years.and_then(experience_years),
        experience_max_years: filters.experience_max_years.and_then(experience_years),
        compensation_min: filters.compensation_min.and_then(positive_amount),
    }
}

pub fn days_before(today: NaiveDate, days: u32) -> NaiveDate {
    today - Duration::days(i64::from(days))
}

/// Valid experience bound (whole years, 0 – 30).
pub fn experience_years(value: f64) -> Option<u32> {
    whole_in_range(value, 0, MAX_EXPERIENCE_YEARS)
}

pub fn positive_amount(value: f64) -> Option<f64> {
    Some(value).filter(|v| v.is_finite() && *v > 0.0)
}

fn whole_in_range(value: f64, min: u32, max: u32) -> Option<u32> {
    if !value.is_finite() || value.fract() != 0.0 {
        return None;
    }
    if value < f64::from(min) || value > f64::from(max) {
        return None;
    }
    Some(value as u32)
}

// ────────────────────────────────────────────────────────────────────────────
// Application
// ────────────────────────────────────────────────────────────────────────────

/// Keeps the listings that satisfy every set criterion, in their original order.
/// Keywords are not checked here; each job source handles them its own way.
pub fn apply_structured_filter(listings: Vec<JobListing>, filter: &StructuredFilter) -> Vec<JobListing> {
    listings
        .into_iter()
        .filter(|listing| matches_filter(listing, filter))
        .collect()
}

fn matches_filter(listing: &JobListing, filter: &StructuredFilter) -> bool {
    if let Some(cutoff) = filter.posted_after {
        // Listings without a usable date always pass.
        if let Some(posted) = listing.posted_at.as_deref().and_then(posted_date) {
            if posted < cutoff {
                return false;
            }
        }
    }

    if !filter.location_keywords.is_empty() {
        let location = listing.location.to_lowercase();
        let any = filter
            .location_keywords
            .iter()
            .any(|kw| location.contains(&kw.to_lowercase()));
        if !any {
            return false;
        }
    }

    if let Some(seniority) = filter.seniority {
        let text = format!("{} {}", listing.title, listing.description).to_lowercase();
        if !seniority.markers().iter().any(|m| text.contains(m)) {
            return false;
        }
    }

    if let Some(wanted_min) = filter.experience_min_years {
        if min_required_years(listing).is_some_and(|years| years < wanted_min) {
            return false;
        }
    }

    if let Some(wanted_max) = filter.experience_max_years {
        if max_required_years(listing).is_some_and(|years| years > wanted_max) {
            return false;
        }
    }

    if let Some(floor) = filter.compensation_min {
        if listing.compensation_min.unwrap_or(0.0) < floor {
            return false;
        }
    }

    true
}

/// Reads the leading `YYYY-MM-DD` of a date or timestamp string.
fn posted_date(value: &str) -> Option<NaiveDate> {
    let day = value.trim().get(..10)?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}
