//! Years-of-experience extraction from listing text.
//!
//! One alternation, first match wins:
//! 1. `N+ years`
//! 2. `N–M years` (min takes the lower bound, max the higher)
//! 3. `N years experience`
//! 4. `experience-N`
//!
//! `None` means the listing does not say; filters must let such listings through.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::models::job::JobListing;

static YEARS_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)([0-9]+)\+?\s*years?|([0-9]+)\s*[-–]\s*([0-9]+)\s*years?|([0-9]+)\s*years?\s*experience|experience\s*[-–]\s*([0-9]+)",
    )
    .expect("years regex is valid")
});

#[derive(Clone, Copy)]
enum Bound {
    Min,
    Max,
}

/// Lower bound of the experience a listing asks for, e.g. "3–5 years" → 3.
pub fn min_required_years(listing: &JobListing) -> Option<u32> {
    required_years(listing, Bound::Min)
}

/// Upper bound of the experience a listing asks for, e.g. "3–5 years" → 5.
pub fn max_required_years(listing: &JobListing) -> Option<u32> {
    required_years(listing, Bound::Max)
}

fn required_years(listing: &JobListing, bound: Bound) -> Option<u32> {
    let text = listing_text(listing);
    let caps = YEARS_PATTERN.captures(&text)?;

    if let Some(n) = group(&caps, 1) {
        return n;
    }
    if let (Some(low), Some(high)) = (group(&caps, 2), group(&caps, 3)) {
        let (low, high) = (low?, high?);
        return Some(match bound {
            Bound::Min => low.min(high),
            Bound::Max => low.max(high),
        });
    }
    group(&caps, 4).or_else(|| group(&caps, 5)).flatten()
}

/// Outer `None`: group did not participate. Inner `None`: number too large for u32.
fn group(caps: &Captures<'_>, index: usize) -> Option<Option<u32>> {
    caps.get(index).map(|m| m.as_str().parse().ok())
}

fn listing_text(listing: &JobListing) -> String {
    [
        listing.experience_required.as_deref(),
        Some(listing.description.as_str()),
        Some(listing.title.as_str()),
    ]
    .into_iter()
    .flatten()
    .filter(|part| !part.is_empty())
    .collect::<Vec<_>>()
    .join(" ")
    .to_lowercase()
}
