// Text heuristics: pure, regex-based extractors over listing and filter text.
// No I/O and no LLM calls here.

pub mod description;
pub mod experience;
pub mod keywords;
pub mod posted_ago;
