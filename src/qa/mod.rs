//! Question answering pipeline.
//!
//! [`QaModel`] is the boundary to the hosted extractive model; the
//! [`hf`] module implements it against the Hugging Face Inference API.
//! [`AnsweringEngine`] wraps a model with the policy around it:
//! context truncation before every call, score rescaling, and the
//! error-to-answer fallback so a failed inference never takes down the
//! session.

pub mod context;
pub mod hf;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::ModelError;

pub use context::{MAX_CONTEXT_CHARS, truncate_context};
pub use hf::HfQaModel;

/// Raw answer from the model: a span copied out of the context plus the
/// model's own relevance score.
#[derive(Debug, Clone)]
pub struct ModelAnswer {
    pub answer: String,
    /// Relevance score in [0, 1].
    pub score: f64,
}

/// An extractive question-answering model.
#[async_trait]
pub trait QaModel: Send + Sync {
    /// Answer `question` from `context`. Single attempt, no retry.
    async fn ask(&self, question: &str, context: &str) -> Result<ModelAnswer, ModelError>;

    /// Verify the model is ready to serve requests.
    ///
    /// Called once at startup, before the event loop; a failure here is
    /// fatal since the whole tool is useless without a working model.
    async fn ensure_ready(&self) -> Result<(), ModelError>;

    /// Identifier of the underlying model, for display.
    fn model_id(&self) -> &str;
}

/// Result of one answering request as shown to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct QaResult {
    pub answer: String,
    /// Confidence percentage in [0, 100], rounded to two decimals.
    pub confidence: f64,
}

/// The answering engine: truncation, inference, confidence reporting.
///
/// Holds the model behind an `Arc` so the expensive resource is built
/// once and shared by every request.
#[derive(Clone)]
pub struct AnsweringEngine {
    model: Arc<dyn QaModel>,
    context_limit: usize,
}

impl AnsweringEngine {
    pub fn new(model: Arc<dyn QaModel>) -> Self {
        Self {
            model,
            context_limit: MAX_CONTEXT_CHARS,
        }
    }

    /// Override the context character budget (tests, smaller models).
    pub fn with_context_limit(mut self, limit: usize) -> Self {
        self.context_limit = limit;
        self
    }

    pub fn model_id(&self) -> &str {
        self.model.model_id()
    }

    /// Answer `question` from the full document text.
    ///
    /// The text is truncated to the context budget before the call. Any
    /// model error is folded into a zero-confidence error answer rather
    /// than propagated: one failed inference must not end the session.
    pub async fn answer(&self, question: &str, full_text: &str) -> QaResult {
        let context = truncate_context(full_text, self.context_limit);
        tracing::debug!(
            question_chars = question.chars().count(),
            context_chars = context.chars().count(),
            "invoking QA model"
        );

        match self.model.ask(question, context).await {
            Ok(raw) => QaResult {
                answer: raw.answer,
                confidence: rescale_confidence(raw.score),
            },
            Err(e) => {
                tracing::warn!(error = %e, "model invocation failed");
                QaResult {
                    answer: format!("Error: {e}"),
                    confidence: 0.0,
                }
            }
        }
    }
}

/// Rescale a [0, 1] model score to a percentage with two decimals.
fn rescale_confidence(score: f64) -> f64 {
    let pct = (score * 100.0).clamp(0.0, 100.0);
    (pct * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    struct FixedModel {
        answer: &'static str,
        score: f64,
    }

    #[async_trait]
    impl QaModel for FixedModel {
        async fn ask(&self, _q: &str, _c: &str) -> Result<ModelAnswer, ModelError> {
            Ok(ModelAnswer {
                answer: self.answer.to_string(),
                score: self.score,
            })
        }

        async fn ensure_ready(&self) -> Result<(), ModelError> {
            Ok(())
        }

        fn model_id(&self) -> &str {
            "fixed"
        }
    }

    struct FailingModel;

    #[async_trait]
    impl QaModel for FailingModel {
        async fn ask(&self, _q: &str, _c: &str) -> Result<ModelAnswer, ModelError> {
            Err(ModelError::RequestFailed {
                reason: "connection refused".to_string(),
            })
        }

        async fn ensure_ready(&self) -> Result<(), ModelError> {
            Ok(())
        }

        fn model_id(&self) -> &str {
            "failing"
        }
    }

    #[test]
    fn test_rescale_rounds_to_two_decimals() {
        assert_eq!(rescale_confidence(0.987654), 98.77);
        assert_eq!(rescale_confidence(0.1), 10.0);
    }

    #[test]
    fn test_rescale_bounds() {
        assert_eq!(rescale_confidence(0.0), 0.0);
        assert_eq!(rescale_confidence(1.0), 100.0);
        // Scores slightly out of range still land in [0, 100].
        assert_eq!(rescale_confidence(1.2), 100.0);
        assert_eq!(rescale_confidence(-0.1), 0.0);
    }

    #[tokio::test]
    async fn test_engine_rescales_score() {
        let engine = AnsweringEngine::new(Arc::new(FixedModel {
            answer: "blue",
            score: 0.9731,
        }));
        let result = engine.answer("What color is the sky?", "The sky is blue.").await;
        assert_eq!(result.answer, "blue");
        assert_eq!(result.confidence, 97.31);
    }

    #[tokio::test]
    async fn test_engine_truncates_before_asking() {
        struct ContextLen(std::sync::Mutex<usize>);

        #[async_trait]
        impl QaModel for ContextLen {
            async fn ask(&self, _q: &str, c: &str) -> Result<ModelAnswer, ModelError> {
                *self.0.lock().unwrap() = c.chars().count();
                Ok(ModelAnswer {
                    answer: String::new(),
                    score: 0.0,
                })
            }

            async fn ensure_ready(&self) -> Result<(), ModelError> {
                Ok(())
            }

            fn model_id(&self) -> &str {
                "context-len"
            }
        }

        let model = Arc::new(ContextLen(std::sync::Mutex::new(0)));
        let engine = AnsweringEngine::new(model.clone()).with_context_limit(8);
        engine.answer("q", "0123456789abcdef").await;
        assert_eq!(*model.0.lock().unwrap(), 8);
    }

    #[tokio::test]
    async fn test_engine_folds_errors_into_answer() {
        let engine = AnsweringEngine::new(Arc::new(FailingModel));
        let result = engine.answer("anything", "context").await;
        assert!(result.answer.starts_with("Error: "));
        assert_eq!(result.confidence, 0.0);
    }
}
