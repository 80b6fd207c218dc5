use super::client::CompletionBackend;
use super::extract::extract_payload;
use super::prompts;
use crate::core::request::{GenerationSettings, Request, ResponseKind};
use crate::error::Result;

/// Builds the prompt for a request, sends it, and extracts the payload.
pub struct PromptAdapter<B> {
    backend: B,
}

impl<B: CompletionBackend> PromptAdapter<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub async fn request_completion(&self, template: &str, kind: ResponseKind) -> Result<String> {
        let settings = GenerationSettings::for_kind(kind);
        self.backend
            .complete(prompts::SYSTEM_PROMPT, template, settings)
            .await
    }

    pub async fn generate(&self, request: &Request) -> Result<String> {
        let template = template_for(request);
        log::info!("[{}] requesting {} completion", request.id, request.kind);

        let completion = match self.request_completion(&template, request.kind).await {
            Ok(text) => text,
            Err(e) => {
                log::error!("[{}] upstream failure: {e}", request.id);
                return Err(e);
            }
        };
        log::debug!("[{}] completion: {}", request.id, truncate(&completion));

        let payload = extract_payload(&completion, request.kind).inspect_err(|e| {
            log::warn!("[{}] {e}", request.id);
        })?;
        log::info!("[{}] extracted {} chars", request.id, payload.len());
        Ok(payload)
    }
}

fn template_for(request: &Request) -> String {
    if request.kind.is_code() {
        prompts::build_template(&request.instruction, &request.data, request.kind)
    } else {
        prompts::freeform_prompt(&request.instruction, &request.data)
    }
}

fn truncate(s: &str) -> String {
    match s.char_indices().nth(300) {
        Some((idx, _)) => format!("{}... (len: {})", &s[..idx], s.len()),
        None => s.to_string(),
    }
}
