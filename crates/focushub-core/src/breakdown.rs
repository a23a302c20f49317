//! Task breakdown: split an overwhelming task into small concrete steps.
//!
//! The Gemini client calls the Generative Language `generateContent`
//! endpoint and asks for a JSON array of strings. Any failure falls back to
//! a fixed list of generic first steps, so callers always get something to
//! show.

use std::future::Future;
use std::time::Duration;

use indoc::formatdoc;
use reqwest::Client;
use serde_json::{json, Value};

use crate::error::{ConfigError, CoreError, Result};
use crate::storage::config::BreakdownConfig;

/// Steps returned when the model cannot be reached or answers garbage.
pub const FALLBACK_STEPS: [&str; 4] = [
    "Take a deep breath.",
    "Gather the things you need.",
    "Do the first small part of the task.",
    "Give yourself credit for starting!",
];

pub fn fallback_steps() -> Vec<String> {
    FALLBACK_STEPS.iter().map(|s| s.to_string()).collect()
}

/// Something that can split a task into micro-steps.
pub trait TaskBreaker {
    /// Never fails: blank input yields no steps, errors yield
    /// [`FALLBACK_STEPS`].
    fn break_down(&self, task: &str) -> impl Future<Output = Vec<String>> + Send;
}

pub struct GeminiBreaker {
    client: Client,
    config: BreakdownConfig,
    api_key: Option<String>,
}

impl GeminiBreaker {
    /// Build a client, reading the API key from the environment variable
    /// named in `config.api_key_env`.
    pub fn from_config(config: BreakdownConfig) -> Result<Self> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty());
        Self::with_api_key(config, api_key)
    }

    pub fn with_api_key(config: BreakdownConfig, api_key: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.api_base.trim_end_matches('/'),
            self.config.model
        )
    }

    fn prompt(task: &str) -> String {
        formatdoc! {"
            You are an empathetic assistant for a person with ADHD.
            The user feels overwhelmed by this task: \"{task}\".

            Break it into very small, concrete, easy micro-steps.
            Avoid generalities. The first step should be trivially easy (e.g. \"Stand up from your chair\").
            Number of steps: 3 to 8.
            Tone: supportive, light, non-judgmental.

            Return the result as a plain JSON array of strings.
        ", task = task}
    }

    /// One round trip to the model, without the fallback.
    pub async fn request_steps(&self, task: &str) -> Result<Vec<String>> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            CoreError::Config(ConfigError::InvalidValue {
                key: self.config.api_key_env.clone(),
                message: "API key is not set".into(),
            })
        })?;

        let body = json!({
            "contents": [{ "parts": [{ "text": Self::prompt(task) }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": { "type": "ARRAY", "items": { "type": "STRING" } },
                "temperature": self.config.temperature,
            }
        });

        let resp = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;
        let data: Value = resp.json().await?;

        let text = data["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .unwrap_or_default();
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        parse_steps(text)
    }
}

impl TaskBreaker for GeminiBreaker {
    async fn break_down(&self, task: &str) -> Vec<String> {
        let task = task.trim();
        if task.is_empty() {
            return Vec::new();
        }
        match self.request_steps(task).await {
            Ok(steps) => steps,
            Err(e) => {
                tracing::warn!(error = %e, "task breakdown failed, using fallback steps");
                fallback_steps()
            }
        }
    }
}

/// Decode the model's JSON text. A JSON value that is not an array yields
/// no steps; non-string array items are skipped.
pub fn parse_steps(text: &str) -> Result<Vec<String>> {
    let value: Value = serde_json::from_str(text)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|v| v.as_str().map(|s| s.trim().to_string()))
            .filter(|s| !s.is_empty())
            .collect(),
        _ => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_string_arrays() {
        let steps = parse_steps(r#"["Stand up", " Open laptop ", 3, ""]"#).unwrap();
        assert_eq!(steps, vec!["Stand up", "Open laptop"]);
    }

    #[test]
    fn non_array_yields_nothing() {
        assert!(parse_steps(r#"{"steps": ["a"]}"#).unwrap().is_empty());
    }

    #[test]
    fn garbage_is_an_error() {
        assert!(parse_steps("Sure! Here are your steps:").is_err());
    }

    #[test]
    fn prompt_mentions_task() {
        let prompt = GeminiBreaker::prompt("clean the kitchen");
        assert!(prompt.contains("\"clean the kitchen\""));
        assert!(prompt.contains("JSON array"));
    }

    #[tokio::test]
    async fn blank_task_short_circuits() {
        let breaker = GeminiBreaker::with_api_key(BreakdownConfig::default(), None).unwrap();
        assert!(breaker.break_down("   ").await.is_empty());
    }

    #[tokio::test]
    async fn missing_key_falls_back() {
        let breaker = GeminiBreaker::with_api_key(BreakdownConfig::default(), None).unwrap();
        assert_eq!(breaker.break_down("do taxes").await, fallback_steps());
    }
}
