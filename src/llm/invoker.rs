use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use super::client::{ChatCompletionRequest, ChatGateway, ChatMessage, LlmResponse, MessageContent};
use crate::agent::prompt::Prompt;

pub const MAX_TOKENS: u32 = 1500;
pub const TEMPERATURE: f32 = 0.7;

/// A model call failure, classified from the provider's error message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelFailure {
    #[error("model unavailable: {0}")]
    ModelUnavailable(String),
    #[error("quota exceeded: {0}")]
    QuotaExceeded(String),
    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),
    #[error("unknown failure: {0}")]
    Unknown(String),
}

impl ModelFailure {
    pub fn classify(message: &str) -> Self {
        let lower = message.to_lowercase();
        let raw = message.to_string();
        if lower.contains("model") && lower.contains("not found") {
            ModelFailure::ModelUnavailable(raw)
        } else if lower.contains("quota") || lower.contains("rate") {
            ModelFailure::QuotaExceeded(raw)
        } else if lower.contains("invalid") && lower.contains("key") {
            ModelFailure::InvalidCredentials(raw)
        } else {
            ModelFailure::Unknown(raw)
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ModelFailure::ModelUnavailable(_) => "model_unavailable",
            ModelFailure::QuotaExceeded(_) => "quota_exceeded",
            ModelFailure::InvalidCredentials(_) => "invalid_credentials",
            ModelFailure::Unknown(_) => "unknown",
        }
    }

    /// Text shown in place of an analysis.
    pub fn user_message(&self, persona_name: &str) -> String {
        match self {
            ModelFailure::ModelUnavailable(_) => format!(
                "Model error with {}. Please check your OpenAI API access and model availability.",
                persona_name
            ),
            ModelFailure::QuotaExceeded(_) => {
                "API quota exceeded. Please try again later or check your OpenAI billing."
                    .to_string()
            }
            ModelFailure::InvalidCredentials(_) => {
                "Invalid API key. Please check your OPENAI_API_KEY in the .env file.".to_string()
            }
            ModelFailure::Unknown(raw) => format!("Error analyzing with {}: {}", persona_name, raw),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Completion {
    pub model: String,
    pub response: LlmResponse,
}

pub struct ModelInvoker {
    gateway: Arc<dyn ChatGateway>,
    vision_model: String,
    text_model: String,
}

impl ModelInvoker {
    pub fn new(gateway: Arc<dyn ChatGateway>, vision_model: String, text_model: String) -> Self {
        Self {
            gateway,
            vision_model,
            text_model,
        }
    }

    pub fn select_model(&self, has_image: bool) -> &str {
        if has_image {
            &self.vision_model
        } else {
            &self.text_model
        }
    }

    pub async fn invoke(
        &self,
        prompt: &Prompt,
        has_image: bool,
    ) -> Result<Completion, ModelFailure> {
        let model = self.select_model(has_image).to_string();
        let request = ChatCompletionRequest {
            model: model.clone(),
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: MessageContent::Text(prompt.system_text.clone()),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: MessageContent::Parts(prompt.user_turn.clone()),
                },
            ],
        };

        info!(model = %model, has_image, "invoking model");
        match self.gateway.complete(&request).await {
            Ok(response) => Ok(Completion { model, response }),
            Err(e) => {
                let failure = ModelFailure::classify(&format!("{:#}", e));
                warn!(model = %model, kind = failure.kind(), error = %e, "model call failed");
                Err(failure)
            }
        }
    }
}
