//! Hugging Face Inference API model client.
//!
//! Talks to the hosted inference endpoint for extractive QA models
//! (`POST /models/{id}` with a `{question, context}` payload, answer span
//! plus score back). The API returns 503 while model weights are being
//! loaded onto a worker; [`HfQaModel::ensure_ready`] sends a warmup
//! request with `x-wait-for-model` so startup blocks until the model is
//! actually serving.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::ModelError;
use crate::qa::{ModelAnswer, QaModel};

/// Hosted extractive QA model on the Hugging Face Inference API.
pub struct HfQaModel {
    client: Client,
    model_id: String,
    base_url: String,
    api_token: Option<SecretString>,
}

impl HfQaModel {
    /// Build a client from configuration.
    pub fn new(config: &Config) -> Result<Self, ModelError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Ok(Self {
            client,
            model_id: config.model_id.clone(),
            base_url: config.api_base_url.clone(),
            api_token: config.api_token.clone(),
        })
    }

    fn api_url(&self) -> String {
        format!(
            "{}/models/{}",
            self.base_url.trim_end_matches('/'),
            self.model_id
        )
    }

    /// Send one inference request and decode the answer.
    async fn send_request(
        &self,
        body: &QuestionAnsweringRequest<'_>,
        wait_for_model: bool,
    ) -> Result<QuestionAnsweringResponse, ModelError> {
        let url = self.api_url();
        tracing::debug!("sending QA request to {}", url);

        let mut req = self
            .client
            .post(&url)
            .header("Content-Type", "application/json");

        if let Some(ref token) = self.api_token {
            req = req.header(
                "Authorization",
                format!("Bearer {}", token.expose_secret()),
            );
        }
        if wait_for_model {
            req = req.header("x-wait-for-model", "true");
        }

        let response = req.json(body).send().await.map_err(|e| {
            tracing::error!("inference request failed: {}", e);
            ModelError::RequestFailed {
                reason: e.to_string(),
            }
        })?;

        let status = response.status();
        let response_text = response.text().await.unwrap_or_default();
        tracing::debug!("inference response status: {}", status);

        if !status.is_success() {
            if status.as_u16() == 401 || status.as_u16() == 403 {
                return Err(ModelError::AuthFailed);
            }
            if status.as_u16() == 429 {
                return Err(ModelError::RateLimited);
            }
            if status.as_u16() == 503 {
                // The API reports an estimated load time while weights
                // are being fetched onto a worker.
                let estimated = serde_json::from_str::<LoadingResponse>(&response_text)
                    .map(|r| r.estimated_time)
                    .unwrap_or(0.0);
                return Err(ModelError::ModelLoading {
                    estimated_secs: estimated,
                });
            }
            return Err(ModelError::RequestFailed {
                reason: format!("HTTP {}: {}", status, response_text),
            });
        }

        serde_json::from_str(&response_text).map_err(|e| ModelError::InvalidResponse {
            reason: format!("JSON parse error: {}. Raw: {}", e, response_text),
        })
    }
}

#[async_trait]
impl QaModel for HfQaModel {
    async fn ask(&self, question: &str, context: &str) -> Result<ModelAnswer, ModelError> {
        let request = QuestionAnsweringRequest {
            inputs: QuestionAnsweringInputs { question, context },
        };
        let response = self.send_request(&request, false).await?;
        Ok(ModelAnswer {
            answer: response.answer,
            score: response.score,
        })
    }

    async fn ensure_ready(&self) -> Result<(), ModelError> {
        // Warmup request on the same code path as real questions,
        // blocking until the model is loaded on a worker.
        let request = QuestionAnsweringRequest {
            inputs: QuestionAnsweringInputs {
                question: "Is the model ready?",
                context: "The model is ready.",
            },
        };
        self.send_request(&request, true).await?;
        tracing::info!(model = %self.model_id, "QA model ready");
        Ok(())
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

// ── Inference API wire types ──────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct QuestionAnsweringRequest<'a> {
    inputs: QuestionAnsweringInputs<'a>,
}

#[derive(Debug, Serialize)]
struct QuestionAnsweringInputs<'a> {
    question: &'a str,
    context: &'a str,
}

#[derive(Debug, Deserialize)]
struct QuestionAnsweringResponse {
    answer: String,
    /// Span relevance score in [0, 1].
    score: f64,
    #[allow(dead_code)]
    #[serde(default)]
    start: usize,
    #[allow(dead_code)]
    #[serde(default)]
    end: usize,
}

#[derive(Debug, Deserialize)]
struct LoadingResponse {
    #[allow(dead_code)]
    error: String,
    #[serde(default)]
    estimated_time: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialization() {
        let request = QuestionAnsweringRequest {
            inputs: QuestionAnsweringInputs {
                question: "What color is the sky?",
                context: "The sky is blue.",
            },
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["inputs"]["question"], "What color is the sky?");
        assert_eq!(json["inputs"]["context"], "The sky is blue.");
    }

    #[test]
    fn test_response_deserialization() {
        let raw = r#"{"score":0.9731,"start":11,"end":15,"answer":"blue"}"#;
        let response: QuestionAnsweringResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.answer, "blue");
        assert!((response.score - 0.9731).abs() < 1e-9);
    }

    #[test]
    fn test_loading_response_deserialization() {
        let raw = r#"{"error":"Model is currently loading","estimated_time":20.0}"#;
        let response: LoadingResponse = serde_json::from_str(raw).unwrap();
        assert!((response.estimated_time - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_api_url_joins_cleanly() {
        let config = Config {
            api_base_url: "https://api-inference.huggingface.co/".to_string(),
            ..Config::default()
        };
        let model = HfQaModel::new(&config).unwrap();
        assert_eq!(
            model.api_url(),
            format!(
                "https://api-inference.huggingface.co/models/{}",
                config.model_id
            )
        );
    }
}
