//! Thin proxy to the Gemini `generateContent` endpoint.
//!
//! The question is wrapped in a fixed tutoring prompt; generation settings
//! are deliberately conservative (temperature 0.4, topP 0.9, 800 tokens).

use serde::Deserialize;
use serde_json::json;

use crate::errors::ServiceError;

const SYSTEM_PROMPT: &str = "\
You are the EduConnect study assistant, a tutor for secondary-school and \
university students.

TASKS:
- Help with coursework, choosing a major and career orientation.
- Explain concepts clearly and logically, with examples.

ANSWER RULES:
- Keep answers short but complete.
- Prefer bullet points when there are several ideas.
- Ask a clarifying question when the question is ambiguous.
- Do not answer sensitive, political or violent topics.

STYLE:
- Friendly, like an older student tutoring a younger one.
- Avoid overly academic wording.
- Do not present yourself as an AI model; speak as the study assistant.";

#[derive(Clone)]
pub struct ChatbotClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    endpoint: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

/// First non-blank candidate text, the only part of the reply we forward.
fn first_text(resp: GenerateContentResponse) -> Option<String> {
    resp.candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().find_map(|p| p.text))
        .filter(|t| !t.trim().is_empty())
}

impl ChatbotClient {
    pub fn new(cfg: &configs::ChatbotConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: cfg.api_key.clone(),
            model: cfg.model.clone(),
            endpoint: cfg.endpoint.trim_end_matches('/').to_string(),
        }
    }

    pub async fn ask(&self, question: &str) -> Result<String, ServiceError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(ServiceError::Validation("question required".into()));
        }
        if self.api_key.is_empty() {
            return Err(ServiceError::Upstream("chatbot api key is not configured".into()));
        }

        let url = format!("{}/models/{}:generateContent", self.endpoint, self.model);
        let prompt = format!("{SYSTEM_PROMPT}\n\nQUESTION:\n{question}");
        let body = json!({
            "contents": [
                { "role": "user", "parts": [{ "text": prompt }] }
            ],
            "generationConfig": {
                "temperature": 0.4,
                "topP": 0.9,
                "maxOutputTokens": 800
            }
        });

        let resp = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ServiceError::Upstream(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let detail = resp.text().await.unwrap_or_default();
            return Err(ServiceError::Upstream(format!(
                "generate content failed with {status}: {detail}"
            )));
        }

        let parsed: GenerateContentResponse =
            resp.json().await.map_err(|e| ServiceError::Upstream(e.to_string()))?;
        first_text(parsed).ok_or_else(|| ServiceError::Upstream("empty chatbot response".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_first_candidate_text() {
        let resp: GenerateContentResponse = serde_json::from_str(
            r#"{
                "candidates": [
                    { "content": { "parts": [{ "text": "Pick a major you enjoy." }] } },
                    { "content": { "parts": [{ "text": "second" }] } }
                ]
            }"#,
        )
        .expect("parse");
        assert_eq!(first_text(resp).as_deref(), Some("Pick a major you enjoy."));
    }

    #[test]
    fn empty_candidates_yield_none() {
        let resp: GenerateContentResponse = serde_json::from_str(r#"{}"#).expect("parse");
        assert!(first_text(resp).is_none());

        let resp: GenerateContentResponse = serde_json::from_str(
            r#"{ "candidates": [ { "content": { "parts": [{ "text": "  " }] } } ] }"#,
        )
        .expect("parse");
        assert!(first_text(resp).is_none());
    }

    #[test]
    fn blank_question_is_rejected_before_any_request() {
        let client = ChatbotClient::new(&configs::ChatbotConfig::default());
        let err = tokio_block(client.ask("   "));
        assert!(matches!(err, Err(ServiceError::Validation(_))));
    }

    fn tokio_block<F: std::future::Future>(fut: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("runtime")
            .block_on(fut)
    }
}
