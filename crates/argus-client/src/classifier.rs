use std::time::Duration;

use argus_core::error::AppError;
use argus_core::traits::Classifier;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Default endpoint: Gemini's OpenAI compatibility layer.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/openai";

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Most page content a single classification request will carry.
pub const MAX_CONTENT_CHARS: usize = 2000;

const DEFAULT_CLASSIFIER_TIMEOUT: Duration = Duration::from_secs(120);

const ELIGIBILITY_PROMPT: &str = "\
Analyze the following text and determine if the website belongs to an agency \
providing digital services such as website creation, branding, SEO, digital marketing, \
or similar offerings.\n\
\n\
Provide a professional and concise explanation for your decision, using a narrative \
style. Do not use bulleted lists. Focus on providing an overall assessment of \
why the website qualifies or does not qualify as an agency. Be sure to mention the type \
of services offered. Avoid being repetitive; focus on giving a clear rationale. Respond \
with either 'Eligible' or 'Not Eligible', followed by your professional explanation.";

/// Eligibility classifier speaking the OpenAI chat-completions protocol.
///
/// Works with any OpenAI-compatible API, including:
/// - Gemini via compatibility layer (`https://generativelanguage.googleapis.com/v1beta/openai`)
/// - OpenAI directly (`https://api.openai.com/v1`)
///
/// Makes exactly one request per classification; transport retries are the
/// fetch layer's concern, not this one's.
#[derive(Clone)]
pub struct GeminiClassifier {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    timeout_secs: u64,
}

impl GeminiClassifier {
    pub fn new(api_key: &str, model: &str) -> Result<Self, AppError> {
        Self::with_base_url(api_key, model, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: &str, model: &str, base_url: &str) -> Result<Self, AppError> {
        Self::build(api_key, model, base_url, DEFAULT_CLASSIFIER_TIMEOUT)
    }

    pub fn with_timeout(self, timeout: Duration) -> Result<Self, AppError> {
        Self::build(&self.api_key, &self.model, &self.base_url, timeout)
    }

    fn build(
        api_key: &str,
        model: &str,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::HttpError(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
            timeout_secs: timeout.as_secs(),
        })
    }
}

/// The full prompt for one classification, embedding at most
/// [`MAX_CONTENT_CHARS`] characters of page content.
fn build_prompt(content: &str) -> String {
    let bounded: String = content.chars().take(MAX_CONTENT_CHARS).collect();
    format!("{ELIGIBILITY_PROMPT}\n\nText:\n{bounded}")
}

// ---- OpenAI-compatible API types ----

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
}

#[derive(Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ApiError {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

impl Classifier for GeminiClassifier {
    async fn classify(&self, content: &str) -> Result<String, AppError> {
        let url = format!("{}/chat/completions", self.base_url);

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![Message {
                role: "user".to_string(),
                content: build_prompt(content),
            }],
        };

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AppError::Timeout(self.timeout_secs)
                } else if e.is_connect() {
                    AppError::NetworkError(format!("Connection failed: {}", e))
                } else {
                    AppError::HttpError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let status_code = status.as_u16();
            let body = response.text().await.unwrap_or_default();

            let message = serde_json::from_str::<ApiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or_else(|_| format!("HTTP {}: {}", status_code, body));

            return Err(AppError::ClassifierError {
                message,
                status_code,
            });
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| AppError::HttpError(format!("Failed to parse model response: {}", e)))?;

        let reply = chat_response
            .choices
            .first()
            .and_then(|c| c.message.content.as_ref())
            .ok_or_else(|| AppError::ClassifierError {
                message: "Empty response from model".into(),
                status_code: 200,
            })?;

        Ok(reply.trim().to_string())
    }
}
