use serde::{Deserialize, Serialize};

/// The candidate fields the match scorer works from.
/// Either produced by the resume parser or supplied directly by the client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeProfile {
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub experience: Vec<String>,
    #[serde(default)]
    pub summary: String,
}

/// Full output of resume parsing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedResume {
    pub skills: Vec<String>,
    pub experience: Vec<String>,
    pub education: Vec<String>,
    pub summary: String,
    /// Head of the submitted text, kept for review and debugging.
    pub raw_text: String,
}
