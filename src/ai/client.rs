use crate::config::{Backend, Config};
use crate::core::request::GenerationSettings;
use crate::error::{AssistError, Result};
use serde::{Deserialize, Serialize};

/// Anything that can turn a system + user message pair into reply text.
pub trait CompletionBackend {
    fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        settings: GenerationSettings,
    ) -> impl Future<Output = Result<String>> + Send;
}

enum Auth {
    Bearer(String),
    AzureKey(String),
}

pub struct ChatClient {
    client: reqwest::Client,
    url: String,
    model: String,
    auth: Auth,
}

impl ChatClient {
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let auth = match config.backend {
            Backend::OpenAi { .. } => Auth::Bearer(config.api_key.clone()),
            Backend::Azure { .. } => Auth::AzureKey(config.api_key.clone()),
        };

        Ok(Self {
            client: builder.build()?,
            url: config.chat_url(),
            model: config.model().to_string(),
            auth,
        })
    }
}

impl CompletionBackend for ChatClient {
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        settings: GenerationSettings,
    ) -> Result<String> {
        let payload = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
            max_tokens: settings.max_tokens,
            temperature: settings.temperature,
        };

        let request = match &self.auth {
            Auth::Bearer(key) => self.client.post(&self.url).bearer_auth(key),
            Auth::AzureKey(key) => self.client.post(&self.url).header("api-key", key),
        };

        log::debug!("POST {} (max_tokens={})", self.url, settings.max_tokens);
        let res = request.json(&payload).send().await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            let message = api_error_message(&body);
            log::error!("API Error {status}: {message}");
            return Err(AssistError::Api {
                status: status.as_u16(),
                message,
            });
        }

        parse_completion(&body)
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Option<Vec<ChatChoice>>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<AssistantMessage>,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: Option<ErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Reads `choices[0].message.content`, reporting which level was missing.
fn parse_completion(body: &str) -> Result<String> {
    let parsed: ChatResponse = serde_json::from_str(body)
        .map_err(|e| AssistError::MalformedResponse(format!("undecodable body: {e}")))?;

    let choice = parsed
        .choices
        .and_then(|choices| choices.into_iter().next())
        .ok_or_else(|| AssistError::MalformedResponse("no choices returned".into()))?;

    let message = choice
        .message
        .ok_or_else(|| AssistError::MalformedResponse("choice has no message".into()))?;

    message
        .content
        .ok_or_else(|| AssistError::MalformedResponse("message has no content".into()))
}

fn api_error_message(body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .and_then(|env| env.error)
        .and_then(|err| err.message)
        .unwrap_or_else(|| body.trim().to_string())
}
