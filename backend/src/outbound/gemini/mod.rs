//! Gemini outbound adapter.
//!
//! Provides a thin HTTP implementation of the `SkillSuggestionSource` port
//! backed by the Gemini `generateContent` endpoint.

mod dto;
mod http_source;

pub use http_source::{GeminiHttpSource, GeminiSourceBuildError, GeminiSourceConfig};
