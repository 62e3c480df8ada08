//! Gemini `generateContent` backend
//!
//! Both the structured analysis call and the multi-turn chat call go through
//! the same endpoint. The analysis call requests machine-parseable JSON via
//! `generationConfig.responseSchema`; the chat call carries the assistant
//! persona as a system instruction plus the ordered turn history.

use serde_json::{Value, json};
use tokio::runtime::Handle;
use tracing::debug;

use super::{AnalysisBackend, AnalysisResult, BackendError, Role, Turn};
use crate::global::BackendConfig;

const CHAT_SYSTEM_PERSONA: &str = "You are PhishGuard Assistant. You help users understand \
     security threats. Be concise, professional, and helpful. Explain technical terms simply.";

#[derive(Debug, Clone)]
pub struct GeminiBackend {
    endpoint: String,
    model: String,
    api_key: String,
}

impl GeminiBackend {
    pub fn new(config: &BackendConfig, api_key: String) -> Self {
        Self {
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
        }
    }

    fn request_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }

    fn post(&self, payload: Value) -> Result<Value, BackendError> {
        let url = self.request_url();
        debug!(%url, "sending request to Gemini");

        block_on_runtime_aware(async {
            let client = reqwest::Client::new();
            let response = client
                .post(&url)
                .header("x-goog-api-key", &self.api_key)
                .json(&payload)
                .send()
                .await?;

            let response = response.error_for_status()?;
            Ok(response.json::<Value>().await?)
        })
    }
}

impl AnalysisBackend for GeminiBackend {
    fn generate_analysis(&self, prompt: &str) -> Result<AnalysisResult, BackendError> {
        let payload = json!({
            "contents": [{
                "role": "user",
                "parts": [{"text": prompt}]
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": analysis_response_schema(),
            }
        });

        let response = self.post(payload)?;
        let text = response_text(&response)?;
        let parsed = parse_structured_content(text)?;

        serde_json::from_value(parsed)
            .map_err(|error| BackendError::MalformedResponse(error.to_string()))
    }

    fn send_chat(&self, history: &[Turn], message: &str) -> Result<String, BackendError> {
        let mut contents: Vec<Value> = history.iter().map(turn_to_content).collect();
        contents.push(json!({
            "role": "user",
            "parts": [{"text": message}]
        }));

        let payload = json!({
            "systemInstruction": {
                "parts": [{"text": CHAT_SYSTEM_PERSONA}]
            },
            "contents": contents,
        });

        let response = self.post(payload)?;
        Ok(response_text(&response)?.to_string())
    }
}

fn turn_to_content(turn: &Turn) -> Value {
    let role = match turn.role {
        Role::User => "user",
        Role::Assistant => "model",
    };

    json!({
        "role": role,
        "parts": [{"text": turn.text}]
    })
}

fn analysis_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "riskScore": {"type": "INTEGER"},
            "riskLevel": {"type": "STRING", "enum": ["SAFE", "SUSPICIOUS", "MALICIOUS"]},
            "summary": {"type": "STRING"},
            "redFlags": {"type": "ARRAY", "items": {"type": "STRING"}},
            "recommendation": {"type": "STRING"},
        },
        "required": ["riskScore", "riskLevel", "summary", "redFlags", "recommendation"],
    })
}

fn response_text(response: &Value) -> Result<&str, BackendError> {
    response
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
        .filter(|text| !text.trim().is_empty())
        .ok_or_else(|| {
            BackendError::MalformedResponse(
                "response carries no candidate text".to_string(),
            )
        })
}

// Models occasionally wrap JSON in a markdown fence even when asked not to.
fn parse_structured_content(content: &str) -> Result<Value, BackendError> {
    if let Ok(parsed) = serde_json::from_str::<Value>(content) {
        return Ok(parsed);
    }

    let trimmed = content.trim();
    let fenced = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .map(str::trim);

    if let Some(fenced_content) = fenced {
        let fenced_content = fenced_content.strip_suffix("```").unwrap_or(fenced_content);
        if let Ok(parsed) = serde_json::from_str::<Value>(fenced_content.trim()) {
            return Ok(parsed);
        }
    }

    Err(BackendError::MalformedResponse(
        "response text is not valid JSON".to_string(),
    ))
}

fn block_on_runtime_aware<F, T>(future: F) -> Result<T, BackendError>
where
    F: std::future::Future<Output = Result<T, BackendError>>,
{
    match Handle::try_current() {
        Ok(handle) => tokio::task::block_in_place(|| handle.block_on(future)),
        Err(_) => {
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(future)
        }
    }
}
