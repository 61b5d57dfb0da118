//! Lead analyzer: turns a submission into a `ScoringResult`.
//!
//! `analyze` never fails. Without a model it returns the disabled default; any
//! failure while calling the model or reading its answer yields the fallback
//! default with a diagnostic. Scores outside 0..=100 are clamped.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{LlmError, TextGenerator};
use crate::scoring::extract::extract_json_payload;
use crate::scoring::models::{LeadAssessment, ScoringResult};
use crate::scoring::prompts::build_scoring_prompt;

const MIN_SCORE: i32 = 0;
const MAX_SCORE: i32 = 100;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("model call failed: {0}")]
    Llm(#[from] LlmError),

    #[error("model call timed out after {0:?}")]
    Timeout(Duration),

    #[error("model response contained no JSON payload")]
    NoPayload,

    #[error("model response is not a valid lead assessment ({strategy}): {source}")]
    Parse {
        strategy: &'static str,
        source: serde_json::Error,
    },
}

pub struct LeadAnalyzer {
    generator: Option<Arc<dyn TextGenerator>>,
    timeout: Duration,
}

impl LeadAnalyzer {
    pub fn new(generator: Option<Arc<dyn TextGenerator>>, timeout: Duration) -> Self {
        Self { generator, timeout }
    }

    pub fn is_enabled(&self) -> bool {
        self.generator.is_some()
    }

    pub async fn analyze(
        &self,
        name: &str,
        email: &str,
        company: Option<&str>,
        message: &str,
    ) -> ScoringResult {
        let Some(generator) = self.generator.as_deref() else {
            debug!("AI scoring disabled; using default score");
            return ScoringResult::disabled();
        };

        let prompt = build_scoring_prompt(name, email, company, message);

        match self.run(generator, &prompt).await {
            Ok(assessment) => {
                info!(
                    "Lead scored by model: score={}, priority={}",
                    assessment.score, assessment.priority
                );
                ScoringResult::from_model(assessment)
            }
            Err(e) => {
                warn!("Lead analysis failed, using fallback score: {e}");
                ScoringResult::fallback(e.to_string())
            }
        }
    }

    async fn run(
        &self,
        generator: &dyn TextGenerator,
        prompt: &str,
    ) -> Result<LeadAssessment, AnalysisError> {
        let text = tokio::time::timeout(self.timeout, generator.generate(prompt, JSON_ONLY_SYSTEM))
            .await
            .map_err(|_| AnalysisError::Timeout(self.timeout))??;

        let mut assessment = parse_assessment(&text)?;

        let clamped = assessment.score.clamp(MIN_SCORE, MAX_SCORE);
        if clamped != assessment.score {
            warn!(
                "Model returned out-of-range score {}, clamping to {clamped}",
                assessment.score
            );
            assessment.score = clamped;
        }

        Ok(assessment)
    }
}

/// Extracts the JSON payload from raw model text and parses it.
pub fn parse_assessment(text: &str) -> Result<LeadAssessment, AnalysisError> {
    let extracted = extract_json_payload(text).ok_or(AnalysisError::NoPayload)?;
    serde_json::from_str(extracted.payload).map_err(|source| AnalysisError::Parse {
        strategy: extracted.strategy,
        source,
    })
}
