// Resume extraction prompt. `{text}` is replaced with the (truncated) resume body.

pub const RESUME_PARSE_SYSTEM: &str = r#"You are a resume parser. Extract structured data from the resume text.
Use this exact structure:
{
  "skills": ["skill1", "skill2"],
  "experience": ["role at company - brief"],
  "education": ["degree, institution"],
  "summary": "2-3 sentence professional summary"
}"#;

pub const RESUME_PARSE_USER: &str = "Parse this resume:\n\n{text}";
