//! DTOs for the Gemini `generateContent` request and response bodies.

use serde::{Deserialize, Serialize};

use crate::domain::SkillSuggestions;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct GenerateContentRequestDto {
    pub(super) contents: Vec<ContentDto>,
    pub(super) generation_config: GenerationConfigDto,
}

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct ContentDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(super) role: Option<String>,
    #[serde(default)]
    pub(super) parts: Vec<PartDto>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct PartDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(super) text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct GenerationConfigDto {
    pub(super) response_mime_type: &'static str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct GenerateContentResponseDto {
    #[serde(default)]
    pub(super) candidates: Vec<CandidateDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CandidateDto {
    pub(super) content: Option<ContentDto>,
    pub(super) finish_reason: Option<String>,
}

impl GenerateContentRequestDto {
    pub(super) fn for_prompt(prompt: String) -> Self {
        Self {
            contents: vec![ContentDto {
                role: Some("user".to_owned()),
                parts: vec![PartDto { text: Some(prompt) }],
            }],
            generation_config: GenerationConfigDto {
                response_mime_type: "application/json",
            },
        }
    }
}

/// Outcome of reading the first candidate's text.
#[derive(Debug, PartialEq, Eq)]
pub(super) enum CandidateText {
    Text(String),
    Missing { finish_reason: Option<String> },
}

impl GenerateContentResponseDto {
    pub(super) fn first_candidate_text(self) -> CandidateText {
        let Some(candidate) = self.candidates.into_iter().next() else {
            return CandidateText::Missing {
                finish_reason: None,
            };
        };
        let finish_reason = candidate.finish_reason;
        let text: String = candidate
            .content
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect()
            })
            .unwrap_or_default();
        if text.trim().is_empty() {
            CandidateText::Missing { finish_reason }
        } else {
            CandidateText::Text(text)
        }
    }
}

/// Decode model output text into suggestions.
///
/// Models occasionally wrap JSON in a Markdown code fence even when asked for
/// a JSON MIME type, so one surrounding fence is stripped first.
pub(super) fn decode_suggestions(text: &str) -> Result<SkillSuggestions, String> {
    serde_json::from_str(strip_code_fence(text))
        .map_err(|error| format!("model output is not a valid suggestion object: {error}"))
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
