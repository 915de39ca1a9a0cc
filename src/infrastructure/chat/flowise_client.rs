use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use serde::Serialize;

use crate::application::ports::{ChatClient, ChatClientError, ChatOptions, ChatReply};
use crate::application::services::answer_normalizer::extract_answer;
use crate::domain::{ChatRole, ChatTurn};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const IMAGE_TIMEOUT: Duration = Duration::from_secs(120);

/// Client for a Flowise-style prediction API.
pub struct FlowiseClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Serialize)]
struct PredictionRequest {
    question: String,
    history: Vec<HistoryTurn>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    uploads: Vec<Upload>,
}

#[derive(Serialize)]
struct HistoryTurn {
    role: &'static str,
    content: String,
}

#[derive(Serialize)]
struct Upload {
    data: String,
    r#type: &'static str,
    name: String,
    mime: String,
}

impl FlowiseClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    fn prediction_url(&self, flow_id: &str) -> String {
        format!("{}/api/v1/prediction/{}", self.base_url, flow_id)
    }

    async fn post_prediction(
        &self,
        url: &str,
        body: &PredictionRequest,
        timeout: Duration,
        fallback_answer: &str,
    ) -> Result<ChatReply, ChatClientError> {
        let response = self
            .client
            .post(url)
            .header("X-API-KEY", &self.api_key)
            .timeout(timeout)
            .json(body)
            .send()
            .await
            .map_err(|e| ChatClientError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body: serde_json::Value = response.json().await.unwrap_or_default();
            let message = body
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or("Failed to process request")
                .to_string();
            return Err(ChatClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let raw: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ChatClientError::Transport(format!("parse response: {}", e)))?;

        let answer = extract_answer(&raw).unwrap_or_else(|| fallback_answer.to_string());

        Ok(ChatReply { answer, raw })
    }
}

/// Provider-specific history role names.
fn provider_history(history: &[ChatTurn]) -> Vec<HistoryTurn> {
    history
        .iter()
        .map(|turn| HistoryTurn {
            role: match turn.role {
                ChatRole::User => "userMessage",
                ChatRole::Assistant => "apiMessage",
            },
            content: turn.content.clone(),
        })
        .collect()
}

#[async_trait]
impl ChatClient for FlowiseClient {
    async fn send_message(
        &self,
        message: &str,
        flow_id: &str,
        options: &ChatOptions,
    ) -> Result<ChatReply, ChatClientError> {
        let question = if options.is_translation() {
            let source = options.source_language.as_deref().unwrap_or("auto");
            let target = options.target_language.as_deref().unwrap_or("auto");
            format!(
                "You are a translator, translate from language {} to language {}\n\n\
                 Text to translate: \"{}\"",
                source, target, message
            )
        } else {
            message.to_string()
        };

        let body = PredictionRequest {
            question,
            history: provider_history(&options.history),
            uploads: Vec::new(),
        };

        tracing::debug!(flow_id = %flow_id, "Sending chat message to Flowise");
        self.post_prediction(
            &self.prediction_url(flow_id),
            &body,
            DEFAULT_TIMEOUT,
            "Translation completed",
        )
        .await
    }

    async fn send_image(
        &self,
        image: &[u8],
        mime_type: &str,
        flow_id: &str,
        prompt: &str,
    ) -> Result<ChatReply, ChatClientError> {
        let encoded = base64::engine::general_purpose::STANDARD.encode(image);
        let data_url = format!("data:{};base64,{}", mime_type, encoded);
        let extension = mime_type.split('/').next_back().unwrap_or("png");

        let body = PredictionRequest {
            question: prompt.to_string(),
            history: Vec::new(),
            uploads: vec![Upload {
                data: data_url,
                r#type: "file",
                name: format!("image.{}", extension),
                mime: mime_type.to_string(),
            }],
        };

        tracing::debug!(
            flow_id = %flow_id,
            image_bytes = image.len(),
            mime = %mime_type,
            "Sending image to Flowise"
        );
        self.post_prediction(
            &self.prediction_url(flow_id),
            &body,
            IMAGE_TIMEOUT,
            "Image analysis completed",
        )
        .await
    }

    async fn list_flows(&self) -> Result<serde_json::Value, ChatClientError> {
        let url = format!("{}/api/v1/chatflows", self.base_url);
        let response = self
            .client
            .get(&url)
            .header("X-API-KEY", &self.api_key)
            .timeout(DEFAULT_TIMEOUT)
            .send()
            .await
            .map_err(|e| ChatClientError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChatClientError::Api {
                status: status.as_u16(),
                message: "Failed to retrieve chatflows".to_string(),
            });
        }

        response
            .json()
            .await
            .map_err(|e| ChatClientError::Transport(format!("parse response: {}", e)))
    }

    async fn ping(&self) -> Result<(), ChatClientError> {
        let url = format!("{}/api/v1/ping", self.base_url);
        let response = self
            .client
            .get(&url)
            .header("X-API-KEY", &self.api_key)
            .timeout(DEFAULT_TIMEOUT)
            .send()
            .await
            .map_err(|e| ChatClientError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChatClientError::Api {
                status: status.as_u16(),
                message: "Flowise connection failed".to_string(),
            });
        }
        Ok(())
    }
}
