//! Best-effort goal advice from an external text-generation service.
//!
//! [`AdviceRequester::request_advice`] never fails: an empty collection,
//! an empty reply and a service error each map to a fixed message.

use crate::config::AdviceConfig;
use crate::errors::AdviceError;
use crate::models::Goal;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;

pub const NO_GOALS_MESSAGE: &str =
    "You have no goals yet. Add a few so I can give you personalized advice.";
pub const EMPTY_RESPONSE_MESSAGE: &str = "No advice could be generated right now.";
pub const FAILURE_MESSAGE: &str =
    "There was a problem reaching your smart advisor. Please try again later.";

/// A failable text-generation capability.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate_text(&self, prompt: &str) -> Result<String, AdviceError>;
}

#[derive(Clone)]
pub struct AdviceRequester {
    generator: Arc<dyn TextGenerator>,
}

impl AdviceRequester {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    pub async fn request_advice(&self, goals: &[Goal]) -> String {
        if goals.is_empty() {
            return NO_GOALS_MESSAGE.to_string();
        }

        let prompt = build_prompt(goals);
        match self.generator.generate_text(&prompt).await {
            Ok(text) if text.trim().is_empty() => EMPTY_RESPONSE_MESSAGE.to_string(),
            Ok(text) => text,
            Err(err) => {
                error!("failed to fetch advice: {err}");
                FAILURE_MESSAGE.to_string()
            }
        }
    }
}

/// One line per goal: name, saved, target, percentage and category.
pub fn summarize_goals(goals: &[Goal]) -> String {
    goals
        .iter()
        .map(|goal| {
            let percent = if goal.target_amount == 0.0 {
                0.0
            } else {
                goal.current_amount / goal.target_amount * 100.0
            };
            format!(
                "- {}: saved ${} of ${} ({:.1}%). Category: {}.",
                goal.name, goal.current_amount, goal.target_amount, percent, goal.category
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn build_prompt(goals: &[Goal]) -> String {
    format!(
        "Act as a friendly and motivating personal financial advisor.\n\
         Review the following wish list and savings goals of a user:\n\
         \n\
         {}\n\
         \n\
         Please provide:\n\
         1. A short analysis of the overall progress.\n\
         2. A specific recommendation to prioritize or speed up the goal closest to completion.\n\
         3. A short motivational line.\n\
         \n\
         Keep the tone positive and concise, answer in English, and use Markdown to highlight key points.",
        summarize_goals(goals)
    )
}

/// Calls Gemini's `generateContent` endpoint.
pub struct GeminiClient {
    client: Client,
    config: AdviceConfig,
}

impl GeminiClient {
    pub fn new(config: AdviceConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url, self.config.model
        )
    }
}

#[derive(Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
}

#[derive(Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
}

impl GeminiResponse {
    fn into_text(self) -> Result<String, AdviceError> {
        let candidate = self
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| AdviceError::Malformed("response has no candidates".into()))?;
        Ok(candidate
            .content
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .map(|part| part.text)
                    .collect::<String>()
            })
            .unwrap_or_default())
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate_text(&self, prompt: &str) -> Result<String, AdviceError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(AdviceError::MissingCredential)?;

        let request = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AdviceError::Service(format!("{status}: {body}")));
        }

        response.json::<GeminiResponse>().await?.into_text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubGenerator {
        calls: AtomicUsize,
        prompts: Mutex<Vec<String>>,
        reply: Result<String, String>,
    }

    impl StubGenerator {
        fn replying(reply: Result<&str, &str>) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                prompts: Mutex::new(Vec::new()),
                reply: reply.map(str::to_string).map_err(str::to_string),
            })
        }
    }

    #[async_trait]
    impl TextGenerator for StubGenerator {
        async fn generate_text(&self, prompt: &str) -> Result<String, AdviceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.reply.clone().map_err(AdviceError::Service)
        }
    }

    fn goal(name: &str, target: f64, current: f64, category: Category) -> Goal {
        Goal {
            id: name.to_lowercase(),
            name: name.to_string(),
            target_amount: target,
            current_amount: current,
            category,
            created_at: 0,
            notes: None,
        }
    }

    #[tokio::test]
    async fn empty_goals_skip_the_service() {
        let stub = StubGenerator::replying(Ok("unused"));
        let requester = AdviceRequester::new(stub.clone());

        assert_eq!(requester.request_advice(&[]).await, NO_GOALS_MESSAGE);
        assert_eq!(stub.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn service_reply_is_returned_verbatim() {
        let stub = StubGenerator::replying(Ok("**Great job!** Keep going."));
        let requester = AdviceRequester::new(stub.clone());
        let goals = vec![goal("Laptop", 1500.0, 300.0, Category::Technology)];

        let advice = requester.request_advice(&goals).await;
        assert_eq!(advice, "**Great job!** Keep going.");
        assert_eq!(stub.calls.load(Ordering::SeqCst), 1);

        let prompts = stub.prompts.lock().unwrap();
        assert!(prompts[0].contains("- Laptop: saved $300 of $1500 (20.0%). Category: Technology."));
        assert!(prompts[0].contains("financial advisor"));
    }

    #[tokio::test]
    async fn service_failure_returns_fallback() {
        let stub = StubGenerator::replying(Err("quota exceeded"));
        let requester = AdviceRequester::new(stub.clone());
        let goals = vec![goal("Trip", 800.0, 100.0, Category::Travel)];

        assert_eq!(requester.request_advice(&goals).await, FAILURE_MESSAGE);
        assert_eq!(stub.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn blank_reply_returns_empty_response_message() {
        let stub = StubGenerator::replying(Ok("  \n"));
        let requester = AdviceRequester::new(stub);
        let goals = vec![goal("Trip", 800.0, 100.0, Category::Travel)];

        assert_eq!(requester.request_advice(&goals).await, EMPTY_RESPONSE_MESSAGE);
    }

    #[tokio::test]
    async fn missing_credential_falls_back_without_network() {
        let client = GeminiClient::new(AdviceConfig {
            api_key: None,
            model: "test-model".into(),
            base_url: "http://127.0.0.1:1".into(),
        });
        let err = client.generate_text("hello").await.unwrap_err();
        assert!(matches!(err, AdviceError::MissingCredential));

        let requester = AdviceRequester::new(Arc::new(client));
        let goals = vec![goal("Sofa", 900.0, 0.0, Category::Home)];
        assert_eq!(requester.request_advice(&goals).await, FAILURE_MESSAGE);
    }

    #[test]
    fn summary_formats_one_line_per_goal() {
        let goals = vec![
            goal("Camera", 700.0, 233.33, Category::Technology),
            goal("Zero", 0.0, 10.0, Category::Other),
        ];
        let summary = summarize_goals(&goals);
        let lines: Vec<_> = summary.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "- Camera: saved $233.33 of $700 (33.3%). Category: Technology.");
        assert_eq!(lines[1], "- Zero: saved $10 of $0 (0.0%). Category: Other.");
    }

    #[test]
    fn gemini_response_concatenates_first_candidate_parts() {
        let response: GeminiResponse = serde_json::from_value(serde_json::json!({
            "candidates": [
                { "content": { "parts": [{ "text": "Hello " }, { "text": "saver" }] } },
                { "content": { "parts": [{ "text": "ignored" }] } }
            ]
        }))
        .unwrap();
        assert_eq!(response.into_text().unwrap(), "Hello saver");

        let empty: GeminiResponse = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(matches!(empty.into_text(), Err(AdviceError::Malformed(_))));
    }

    #[test]
    fn endpoint_targets_generate_content() {
        let client = GeminiClient::new(AdviceConfig {
            api_key: Some("k".into()),
            model: "gemini-2.5-flash".into(),
            base_url: "https://example.test/v1beta".into(),
        });
        assert_eq!(
            client.endpoint(),
            "https://example.test/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }
}
