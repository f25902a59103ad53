use chrono::{DateTime, NaiveDate, Utc};

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Human-readable age of a posting date ("Today", "3 days ago", "2 weeks ago", ...).
/// Returns `None` for blank or unparseable input.
pub fn relative_age(date: &str) -> Option<String> {
    relative_age_at(date, Utc::now())
}

/// `relative_age` evaluated at a fixed instant.
pub fn relative_age_at(date: &str, now: DateTime<Utc>) -> Option<String> {
    let posted = parse_posted(date.trim())?;
    let days = (now - posted).num_milliseconds().div_euclid(MILLIS_PER_DAY);
    Some(age_label(days))
}

/// Accepts `YYYY-MM-DD` (taken as UTC midnight) or an RFC 3339 timestamp.
fn parse_posted(date: &str) -> Option<DateTime<Utc>> {
    if date.is_empty() {
        return None;
    }
    if let Ok(day) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        return Some(day.and_hms_opt(0, 0, 0)?.and_utc());
    }
    DateTime::parse_from_rfc3339(date)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn age_label(days: i64) -> String {
    if days <= 0 {
        return "Today".to_string();
    }
    if days < 7 {
        return plural(days, "day");
    }
    let weeks = days / 7;
    if weeks < 4 {
        return plural(weeks, "week");
    }
    let months = (days / 30).max(1);
    if months < 12 {
        return plural(months, "month");
    }
    plural(months / 12, "year")
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{n} {unit}s ago")
    }
}
