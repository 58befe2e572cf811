#![deny(warnings)]

//! Advisory boundary: natural-language campaign diagnosis from an external
//! LLM provider.
//!
//! The projection core exposes its result to this crate and consumes
//! nothing back. One outbound `generateContent` request is issued per
//! analysis, with no retries; every failure is terminal and surfaces as a
//! single descriptive message. A superseded in-flight response is discarded
//! by comparing generation tokens at response time, never by relying on
//! caller lifecycle.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;
use tracing::info;
use ua_core::{SimulationInputs, SimulationResult};

const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const EMPTY_ANALYSIS: &str = "No analysis could be generated at this time.";

/// Terminal failures at the advisory boundary.
#[derive(Debug, Error)]
pub enum AdvisorError {
    /// No API key is configured in the environment.
    #[error("no advisory API key is configured; set GEMINI_API_KEY")]
    MissingCredential,
    /// The provider or the network failed; the request is not retried.
    #[error("advisory provider error: {0}")]
    Provider(String),
}

/// Credentials and routing for the advisory provider.
#[derive(Clone, Debug)]
pub struct AdvisorConfig {
    /// Provider API key.
    pub api_key: String,
    /// Model identifier, e.g. "gemini-2.5-flash".
    pub model: String,
    /// Base URL of the generateContent endpoint family.
    pub endpoint: String,
}

impl AdvisorConfig {
    /// Read configuration from the process environment.
    ///
    /// `GEMINI_API_KEY` is required; `GEMINI_MODEL` overrides the default
    /// model. Callers loading a `.env` file must do so before this runs.
    pub fn from_env() -> Result<Self, AdvisorError> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or(AdvisorError::MissingCredential)?;
        let model =
            std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Ok(Self {
            api_key,
            model,
            endpoint: DEFAULT_ENDPOINT.to_string(),
        })
    }
}

/// Generation counter for discarding superseded analysis responses.
///
/// `begin` starts a new request generation; a response is only accepted if
/// its token is still current when it arrives.
#[derive(Debug, Default)]
pub struct AnalysisSession {
    generation: AtomicU64,
}

impl AnalysisSession {
    /// Start a new request, invalidating any in-flight one.
    pub fn begin(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Whether the response for `token` should still be accepted.
    pub fn is_current(&self, token: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == token
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: CandidateContent,
}

#[derive(Debug, Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

impl GenerateContentResponse {
    fn text(&self) -> Option<String> {
        let joined: String = self
            .candidates
            .first()?
            .content
            .parts
            .iter()
            .map(|p| p.text.as_str())
            .collect();
        if joined.is_empty() {
            None
        } else {
            Some(joined)
        }
    }
}

/// Serialize the campaign inputs and projected result into the analysis
/// prompt sent to the provider.
pub fn build_prompt(inputs: &SimulationInputs, result: &SimulationResult) -> String {
    let break_even = match result.break_even_day {
        Some(day) => format!("Day {day}"),
        None => "Not reached within the 90-day window".to_string(),
    };
    format!(
        "Act as a senior User Acquisition (UA) and mobile monetization expert.\n\
         Review the following mobile game/app campaign data and give concrete\n\
         strategic recommendations.\n\
         \n\
         Campaign inputs:\n\
         - Ad spend: ${}\n\
         - Installs: {}\n\
         - CPI (cost per install): ${:.2}\n\
         - ARPDAU: ${:.2}\n\
         - Day-1 retention: {}%\n\
         - Day-7 retention: {}%\n\
         - Day-30 retention: {}%\n\
         \n\
         Projected results:\n\
         - Break-even point: {}\n\
         - ROAS D7: {:.1}%\n\
         - ROAS D30: {:.1}%\n\
         - Projected LTV at D90: ${:.2}\n\
         \n\
         Requested response format (markdown):\n\
         1. **Immediate Diagnosis**: is this campaign healthy or critical?\n\
         2. **Metric Analysis**:\n\
            - Is the CPI too high relative to the ARPDAU?\n\
            - Is the retention curve the problem?\n\
         3. **Action Plan**: 3 concrete actions to reach profitability faster\n\
            (e.g. creative optimization, retention features, pricing strategy).\n\
         \n\
         Be direct and professional, and use industry terms (LTV, churn, ROAS,\n\
         whale, etc.).",
        inputs.ad_spend,
        inputs.installs,
        result.cpi,
        inputs.arpdau,
        inputs.retention_d1,
        inputs.retention_d7,
        inputs.retention_d30,
        break_even,
        result.roas_d7,
        result.roas_d30,
        result.ltv_d90,
    )
}

/// Client for the advisory provider.
pub struct AdvisorClient {
    http: reqwest::Client,
    config: AdvisorConfig,
}

impl AdvisorClient {
    /// Build a client over the given configuration.
    pub fn new(config: AdvisorConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Request a profitability analysis for a projected campaign.
    ///
    /// Issues exactly one request. Transport failures, non-success statuses,
    /// and malformed bodies all map to `AdvisorError::Provider`; an empty
    /// candidate list yields a fixed placeholder string instead.
    pub async fn analyze(
        &self,
        inputs: &SimulationInputs,
        result: &SimulationResult,
    ) -> Result<String, AdvisorError> {
        let prompt = build_prompt(inputs, result);
        let url = format!(
            "{}/models/{}:generateContent",
            self.config.endpoint, self.config.model
        );
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        info!(model = %self.config.model, "requesting advisory analysis");
        let response = self
            .http
            .post(&url)
            .query(&[("key", self.config.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| AdvisorError::Provider(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AdvisorError::Provider(format!(
                "provider returned HTTP {status}"
            )));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| AdvisorError::Provider(e.to_string()))?;
        Ok(parsed.text().unwrap_or_else(|| EMPTY_ANALYSIS.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn projected() -> (SimulationInputs, SimulationResult) {
        let inputs = SimulationInputs {
            ad_spend: 5000.0,
            installs: 10_000.0,
            arpdau: 0.15,
            retention_d1: 40.0,
            retention_d7: 18.0,
            retention_d30: 5.0,
        };
        let result = SimulationResult {
            cpi: 0.5,
            break_even_day: Some(21),
            roas_d7: 43.3,
            roas_d30: 115.9,
            ltv_d90: 0.91,
            data_points: vec![],
        };
        (inputs, result)
    }

    #[test]
    fn prompt_embeds_inputs_and_kpis() {
        let (inputs, result) = projected();
        let prompt = build_prompt(&inputs, &result);
        assert!(prompt.contains("Ad spend: $5000"));
        assert!(prompt.contains("Installs: 10000"));
        assert!(prompt.contains("CPI (cost per install): $0.50"));
        assert!(prompt.contains("ARPDAU: $0.15"));
        assert!(prompt.contains("Day-7 retention: 18%"));
        assert!(prompt.contains("Break-even point: Day 21"));
        assert!(prompt.contains("ROAS D7: 43.3%"));
        assert!(prompt.contains("Projected LTV at D90: $0.91"));
    }

    #[test]
    fn prompt_reports_missed_break_even() {
        let (inputs, mut result) = projected();
        result.break_even_day = None;
        let prompt = build_prompt(&inputs, &result);
        assert!(prompt.contains("Not reached within the 90-day window"));
    }

    #[test]
    fn error_messages_are_descriptive() {
        assert_eq!(
            AdvisorError::MissingCredential.to_string(),
            "no advisory API key is configured; set GEMINI_API_KEY"
        );
        assert_eq!(
            AdvisorError::Provider("provider returned HTTP 503".to_string()).to_string(),
            "advisory provider error: provider returned HTTP 503"
        );
    }

    #[test]
    fn session_marks_superseded_tokens_stale() {
        let session = AnalysisSession::default();
        let first = session.begin();
        assert!(session.is_current(first));
        let second = session.begin();
        assert!(!session.is_current(first));
        assert!(session.is_current(second));
    }

    #[test]
    fn response_text_joins_candidate_parts() {
        let raw = r###"{
            "candidates": [
                {"content": {"parts": [{"text": "## Diagnosis\n"}, {"text": "Healthy."}]}}
            ]
        }"###;
        let parsed: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.text().unwrap(), "## Diagnosis\nHealthy.");
    }

    #[test]
    fn empty_response_has_no_text() {
        let parsed: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.text().is_none());
        let parsed: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates": [{"content": {"parts": []}}]}"#).unwrap();
        assert!(parsed.text().is_none());
    }
}
