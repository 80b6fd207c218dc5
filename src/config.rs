use crate::error::{AssistError, Result};
use std::time::Duration;

const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";
const DEFAULT_AZURE_API_VERSION: &str = "2024-02-01";
const DEFAULT_AZURE_DEPLOYMENT: &str = "gptbot";

#[derive(Debug, Clone, PartialEq)]
pub enum Backend {
    OpenAi {
        base_url: String,
        model: String,
    },
    Azure {
        endpoint: String,
        api_version: String,
        deployment: String,
    },
}

/// Settings read once at startup and handed to the client.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub backend: Backend,
    pub timeout: Option<Duration>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // first non-empty value among the given names
        let first = |keys: &[&str]| {
            keys.iter()
                .filter_map(|k| lookup(*k))
                .map(|v| v.trim().to_string())
                .find(|v| !v.is_empty())
        };

        let api_key = first(&["OPENAI_API_KEY"])
            .ok_or_else(|| AssistError::Config("OPENAI_API_KEY must be set".into()))?;

        let backend = match first(&["AZURE_OPENAI_ENDPOINT", "azure_endpoint"]) {
            Some(endpoint) => Backend::Azure {
                endpoint: endpoint.trim_end_matches('/').to_string(),
                api_version: first(&["AZURE_OPENAI_API_VERSION", "api_version"])
                    .unwrap_or_else(|| DEFAULT_AZURE_API_VERSION.to_string()),
                deployment: first(&["AZURE_OPENAI_DEPLOYMENT", "deployment_name"])
                    .unwrap_or_else(|| DEFAULT_AZURE_DEPLOYMENT.to_string()),
            },
            None => Backend::OpenAi {
                base_url: first(&["OPENAI_BASE_URL"])
                    .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string())
                    .trim_end_matches('/')
                    .to_string(),
                model: first(&["OPENAI_MODEL"])
                    .unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
            },
        };

        let timeout = match first(&["REQUEST_TIMEOUT_SECS"]) {
            Some(raw) => {
                let secs: u64 = raw.parse().map_err(|_| {
                    AssistError::Config(format!(
                        "REQUEST_TIMEOUT_SECS must be a whole number, got '{raw}'"
                    ))
                })?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        Ok(Self { api_key, backend, timeout })
    }

    pub fn chat_url(&self) -> String {
        match &self.backend {
            Backend::OpenAi { base_url, .. } => format!("{base_url}/chat/completions"),
            Backend::Azure {
                endpoint,
                api_version,
                deployment,
            } => format!(
                "{endpoint}/openai/deployments/{deployment}/chat/completions\
                 ?api-version={api_version}"
            ),
        }
    }

    /// Value sent in the body's `model` field.
    pub fn model(&self) -> &str {
        match &self.backend {
            Backend::OpenAi { model, .. } => model,
            Backend::Azure { deployment, .. } => deployment,
        }
    }

    pub fn backend_name(&self) -> &'static str {
        match self.backend {
            Backend::OpenAi { .. } => "OpenAI",
            Backend::Azure { .. } => "Azure OpenAI",
        }
    }
}
