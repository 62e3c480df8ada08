//! Analysis requestor
//!
//! All intelligence is delegated to an external generative AI backend. This
//! module owns the prompt construction, the backend contract, and the
//! degrade-to-default policy: a scan never surfaces a transport or parse
//! error to the caller, it yields a cautious fallback verdict instead.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::input::{ScanInput, ScanKind};

pub mod gemini;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Safe,
    Suspicious,
    Malicious,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Safe => write!(f, "SAFE"),
            Self::Suspicious => write!(f, "SUSPICIOUS"),
            Self::Malicious => write!(f, "MALICIOUS"),
        }
    }
}

/// Structured verdict returned by the backend for one scan.
///
/// `risk_score` and `risk_level` are expected to be consistent but this
/// layer trusts the backend and does not enforce it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub risk_score: u8,
    pub risk_level: RiskLevel,
    pub summary: String,
    pub red_flags: Vec<String>,
    pub recommendation: String,
}

impl AnalysisResult {
    /// The fixed result substituted whenever the analysis call fails.
    pub fn fallback() -> Self {
        Self {
            risk_score: 0,
            risk_level: RiskLevel::Suspicious,
            summary: "Analysis failed due to API error. Treat with caution.".to_string(),
            red_flags: vec!["System Error".to_string()],
            recommendation: "Do not interact until verified.".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

/// One message exchange unit in the chat history sent to the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct Turn {
    pub role: Role,
    pub text: String,
}

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("request to the AI backend failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("the AI backend returned an unexpected payload: {0}")]
    MalformedResponse(String),

    #[error("starting the async runtime failed: {0}")]
    Runtime(#[from] std::io::Error),
}

/// The external AI capability: one structured analysis call, one multi-turn
/// chat call. Implementations perform exactly one request per invocation.
pub trait AnalysisBackend {
    fn generate_analysis(&self, prompt: &str) -> Result<AnalysisResult, BackendError>;

    fn send_chat(&self, history: &[Turn], message: &str) -> Result<String, BackendError>;
}

/// Composes the analysis instruction: persona, task, normalized content
/// description, and an explicit restatement of the expected JSON schema.
pub fn analysis_prompt(kind: ScanKind, description: &str) -> String {
    format!(
        "You are PhishGuard, a world-class cybersecurity AI.\n\
         Analyze the following {kind} for potential phishing, malware, or scam threats.\n\
         \n\
         {description}\n\
         \n\
         Provide a strict JSON response.\n\
         - riskScore: 0 (Safe) to 100 (Extremely Dangerous).\n\
         - riskLevel: \"SAFE\", \"SUSPICIOUS\", or \"MALICIOUS\".\n\
         - summary: A short 1-sentence explanation.\n\
         - redFlags: An array of strings listing specific suspicious elements (e.g. \"Urgency\", \"Typosquatting\").\n\
         - recommendation: Actionable advice (e.g. \"Delete immediately\", \"Proceed with caution\")."
    )
}

/// Runs one scan against the backend. Never fails: any error is logged and
/// converted into [`AnalysisResult::fallback`], so an unreachable backend
/// degrades to a cautious verdict instead of crashing the scan.
pub fn analyze_content(backend: &dyn AnalysisBackend, input: &ScanInput) -> AnalysisResult {
    let description = input.normalize();
    let prompt = analysis_prompt(input.kind(), &description);

    match backend.generate_analysis(&prompt) {
        Ok(result) => result,
        Err(error) => {
            warn!(%error, "analysis request failed, substituting fallback result");
            AnalysisResult::fallback()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingBackend;

    impl AnalysisBackend for FailingBackend {
        fn generate_analysis(&self, _prompt: &str) -> Result<AnalysisResult, BackendError> {
            Err(BackendError::MalformedResponse("no response from AI".to_string()))
        }

        fn send_chat(&self, _history: &[Turn], _message: &str) -> Result<String, BackendError> {
            Err(BackendError::MalformedResponse("no response from AI".to_string()))
        }
    }

    struct ScriptedBackend {
        payload: &'static str,
    }

    impl AnalysisBackend for ScriptedBackend {
        fn generate_analysis(&self, _prompt: &str) -> Result<AnalysisResult, BackendError> {
            serde_json::from_str(self.payload)
                .map_err(|error| BackendError::MalformedResponse(error.to_string()))
        }

        fn send_chat(&self, _history: &[Turn], _message: &str) -> Result<String, BackendError> {
            Ok(String::new())
        }
    }

    #[test]
    fn prompt_embeds_the_normalized_description() {
        let input = ScanInput::Url("https://examp1e.com".to_string());
        let prompt = analysis_prompt(input.kind(), &input.normalize());

        assert!(prompt.contains("URL to analyze: \"https://examp1e.com\""));
        assert!(prompt.contains("riskScore"));
        assert!(prompt.contains("\"SAFE\", \"SUSPICIOUS\", or \"MALICIOUS\""));
    }

    #[test]
    fn backend_failure_yields_the_exact_fallback_result() {
        let input = ScanInput::Text("hello".to_string());
        let result = analyze_content(&FailingBackend, &input);

        assert_eq!(result, AnalysisResult::fallback());
        assert_eq!(result.risk_score, 0);
        assert_eq!(result.risk_level, RiskLevel::Suspicious);
        assert_eq!(result.red_flags, vec!["System Error".to_string()]);
    }

    #[test]
    fn well_formed_response_passes_through_unchanged() {
        let backend = ScriptedBackend {
            payload: r#"{
                "riskScore": 92,
                "riskLevel": "MALICIOUS",
                "summary": "Urgency and shortened link indicate phishing.",
                "redFlags": ["Urgency", "Shortened URL"],
                "recommendation": "Do not click; delete message."
            }"#,
        };
        let input = ScanInput::Text("URGENT: verify your account now http://bit.ly/xyz".to_string());

        let result = analyze_content(&backend, &input);

        assert_eq!(result.risk_score, 92);
        assert_eq!(result.risk_level, RiskLevel::Malicious);
        assert_eq!(result.summary, "Urgency and shortened link indicate phishing.");
        assert_eq!(result.red_flags, vec!["Urgency", "Shortened URL"]);
        assert_eq!(result.recommendation, "Do not click; delete message.");
    }

    #[test]
    fn schema_violating_response_yields_the_fallback() {
        // riskLevel outside the enumerated domain
        let backend = ScriptedBackend {
            payload: r#"{"riskScore": 10, "riskLevel": "FINE", "summary": "", "redFlags": [], "recommendation": ""}"#,
        };
        let input = ScanInput::Url("https://example.com".to_string());

        assert_eq!(analyze_content(&backend, &input), AnalysisResult::fallback());
    }

    #[test]
    fn risk_levels_serialize_to_their_wire_names() {
        let json = serde_json::to_string(&RiskLevel::Malicious).expect("serialize");
        assert_eq!(json, "\"MALICIOUS\"");
        assert_eq!(RiskLevel::Safe.to_string(), "SAFE");
    }
}
