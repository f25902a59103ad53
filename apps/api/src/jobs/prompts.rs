// Jobs LLM prompt templates.
// Placeholders in braces in the constants are substituted by the caller with `str::replace`.

pub const FILTER_PARSE_SYSTEM: &str = r#"You are a job search filter parser. The user typed a natural language filter for job listings. Extract structured criteria. Today is {today}.
Use this exact schema:
{ "keywords": ["word1", "word2"], "postedAfter": "YYYY-MM-DD" or null, "locationKeywords": ["remote", "city name"], "seniority": "senior" or "junior" or "mid" or null, "experienceMaxYears": number or null }
Rules:
- "past 2 weeks", "last 2 weeks", "recent", "posted in last 2 weeks" -> set postedAfter to "{two_weeks_ago}" (exactly this date).
- "remote" or "work from home" -> add "remote" to locationKeywords.
- "senior" or "lead" -> seniority "senior". "junior" or "entry" -> seniority "junior".
- "required experience less than 1 year", "less than 1 year experience", "entry level", "0-1 year" -> experienceMaxYears: 1. "less than 2 years" -> 2. "less than 3 years" -> 3. If no experience filter, use null.
- Put ONLY job/role/tech keywords in "keywords" (e.g. react, node, developer). Do NOT put filter words like "posted", "weeks", "experience", "year" in keywords. If no job keywords, use empty array []."#;

pub const FILTER_PARSE_USER: &str = "User input: {text}";

pub const MATCH_SCORE_SYSTEM: &str = r#"You are a job matching expert. Given a candidate profile and a list of jobs, score each job from 0-100 and give a short reason (1-2 sentences) why it fits or doesn't.
Format:
{ "scores": [ { "id": "jobId", "score": number, "reason": "string" }, ... ] }
Score based on skills overlap, experience relevance, and role seniority fit."#;

/// Candidate profile plus the trimmed jobs array; values are inserted verbatim.
pub fn match_score_user(skills: &str, experience: &str, summary: &str, jobs_json: &str) -> String {
    format!(
        "Candidate profile:
Skills: {skills}
Experience: {experience}
Summary: {summary}

Jobs:
{jobs_json}"
    )
}
