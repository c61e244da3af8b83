pub mod merger;
pub mod persona;
pub mod prompt;

use anyhow::Result;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

use crate::config::Config;
use crate::instrumentation::{AnalysisLog, AnalysisLogger};
use crate::llm::{LlmClient, ModelFailure, ModelInvoker};
use crate::skin::SkinType;
use crate::tools::{ResearchClient, Toolbox};

use merger::Merger;
pub use persona::Persona;
pub use prompt::ImageInput;

pub const EMPTY_INPUT_WARNING: &str = "Please either upload an image or enter a question/concern.";

#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub persona: Persona,
    pub skin_type: SkinType,
    pub question: String,
    pub image: Option<ImageInput>,
}

impl AnalysisRequest {
    pub fn has_input(&self) -> bool {
        !self.question.trim().is_empty() || self.image.as_ref().is_some_and(|i| !i.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub persona: Persona,
    pub skin_type: SkinType,
    pub question: String,
    pub merged_response: String,
    pub model: String,
}

#[derive(Debug, Clone)]
pub enum DispatchOutcome {
    Completed {
        result: AnalysisResult,
        log: AnalysisLog,
    },
    /// Input was empty; the model was not called.
    Rejected { warning: String },
    Failed {
        failure: ModelFailure,
        message: String,
    },
}

pub struct Agent {
    invoker: ModelInvoker,
    merger: Merger,
    logger: Option<AnalysisLogger>,
}

impl Agent {
    pub fn new(config: &Config) -> Result<Self> {
        let llm = LlmClient::new(&config.openai_api_key, &config.openai_base_url);
        let invoker = ModelInvoker::new(
            Arc::new(llm),
            config.vision_model.clone(),
            config.text_model.clone(),
        );
        let toolbox = Toolbox::new(ResearchClient::new(&config.research_base_url));
        let logger = AnalysisLogger::new(&config.log_dir)?;

        Ok(Self::with_parts(invoker, Merger::new(toolbox), Some(logger)))
    }

    pub fn with_parts(
        invoker: ModelInvoker,
        merger: Merger,
        logger: Option<AnalysisLogger>,
    ) -> Self {
        Self {
            invoker,
            merger,
            logger,
        }
    }

    pub async fn dispatch(&self, request: &AnalysisRequest) -> DispatchOutcome {
        if !request.has_input() {
            info!("rejecting empty request");
            return DispatchOutcome::Rejected {
                warning: EMPTY_INPUT_WARNING.to_string(),
            };
        }

        let run_start = Instant::now();
        let has_image = request.image.is_some();
        let prompt = prompt::build(
            request.persona,
            &request.question,
            request.image.as_ref(),
            request.skin_type,
        );

        let model_start = Instant::now();
        let invocation = self.invoker.invoke(&prompt, has_image).await;
        let model_latency = model_start.elapsed().as_millis() as u64;

        let mut log = AnalysisLog {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            persona: request.persona,
            skin_type: request.skin_type,
            model: self.invoker.select_model(has_image).to_string(),
            has_image,
            question: request.question.clone(),
            tools_fired: Vec::new(),
            outcome: String::new(),
            input_tokens: 0,
            output_tokens: 0,
            model_latency_ms: model_latency,
            total_latency_ms: 0,
        };

        let completion = match invocation {
            Ok(completion) => completion,
            Err(failure) => {
                log.outcome = failure.kind().to_string();
                log.total_latency_ms = run_start.elapsed().as_millis() as u64;
                self.record(&log);
                let message = failure.user_message(request.persona.display_name());
                return DispatchOutcome::Failed { failure, message };
            }
        };

        let merged = self
            .merger
            .merge(
                request.persona,
                &completion.response.text,
                &request.question,
                request.skin_type,
            )
            .await;

        log.tools_fired = merged.tools_fired;
        log.outcome = "completed".to_string();
        log.input_tokens = completion.response.input_tokens;
        log.output_tokens = completion.response.output_tokens;
        log.total_latency_ms = run_start.elapsed().as_millis() as u64;
        self.record(&log);

        let tools = log
            .tools_fired
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join(",");
        info!(
            persona = request.persona.label(),
            model = %completion.model,
            tools = %tools,
            "analysis complete"
        );

        DispatchOutcome::Completed {
            result: AnalysisResult {
                persona: request.persona,
                skin_type: request.skin_type,
                question: request.question.clone(),
                merged_response: merged.text,
                model: completion.model,
            },
            log,
        }
    }

    fn record(&self, log: &AnalysisLog) {
        if let Some(logger) = &self.logger {
            if let Err(e) = logger.write(log) {
                warn!(error = %e, "failed to write analysis log");
            }
        }
    }
}
