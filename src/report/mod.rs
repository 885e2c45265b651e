// src/report/mod.rs

pub mod prompt;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Result, ScoutError};
use crate::merge::PlayerSeasonRecord;

const GEMINI_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<TextPart>,
}

#[derive(Deserialize)]
struct TextPart {
    #[serde(default)]
    text: String,
}

/// Client for the hosted model that writes the scouting reports.
#[derive(Clone)]
pub struct ReportClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

impl ReportClient {
    pub fn new(http: reqwest::Client, api_key: String) -> ReportClient {
        ReportClient {
            http,
            api_key,
            model: DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> ReportClient {
        self.model = model.into();
        self
    }

    /// Write a scouting report from a player's stored seasons.
    pub async fn scouting_report(
        &self,
        player_name: &str,
        seasons: &[PlayerSeasonRecord],
    ) -> Result<String> {
        let payload = prompt::seasons_payload(player_name, seasons);
        let text = self.generate(&prompt::build_scouting_prompt(&payload)).await?;
        info!(
            player = %player_name,
            seasons = seasons.len(),
            chars = text.len(),
            "generated scouting report"
        );
        Ok(text)
    }

    async fn generate(&self, prompt_text: &str) -> Result<String> {
        let url = format!("{GEMINI_BASE}/models/{}:generateContent", self.model);
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt_text.to_string(),
                }],
            }],
        };

        let response = self
            .http
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json::<GenerateResponse>()
            .await?;

        extract_text(response)
            .ok_or_else(|| ScoutError::Report("model response carried no text".into()))
    }
}

fn extract_text(response: GenerateResponse) -> Option<String> {
    let content = response.candidates.into_iter().next()?.content?;
    let text: String = content.parts.into_iter().map(|part| part.text).collect();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_text_is_joined_across_parts() {
        let raw = r#"{
            "candidates": [{
                "content": {
                    "parts": [{"text": "Overview\nSolid starter. "}, {"text": "Strengths\nShooting."}],
                    "role": "model"
                },
                "finishReason": "STOP"
            }]
        }"#;
        let response: GenerateResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(
            extract_text(response).unwrap(),
            "Overview\nSolid starter. Strengths\nShooting."
        );
    }

    #[test]
    fn empty_candidates_yield_no_text() {
        let response: GenerateResponse = serde_json::from_str(r#"{"candidates": []}"#).unwrap();
        assert!(extract_text(response).is_none());
        let response: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert!(extract_text(response).is_none());
    }

    #[test]
    fn request_body_matches_the_generate_content_shape() {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: "hello".into(),
                }],
            }],
        };
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["contents"][0]["parts"][0]["text"], "hello");
    }
}
