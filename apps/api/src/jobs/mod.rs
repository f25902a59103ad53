pub mod catalog;
pub mod filters;
pub mod handlers;
pub mod matching;
pub mod nl_filter;
pub mod prompts;
pub mod source;
