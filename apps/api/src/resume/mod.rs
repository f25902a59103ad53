// Resume intake: file/text → plain text → ParsedResume via the LLM.

pub mod extract;
pub mod handlers;
pub mod parser;
pub mod prompts;
