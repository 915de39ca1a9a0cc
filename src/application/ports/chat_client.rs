use async_trait::async_trait;

use crate::domain::ChatTurn;

/// Options for a conversational call.
///
/// When either language is set the adapter wraps the message in a translation
/// instruction before sending; otherwise the message goes out unmodified. The
/// unmodified branch is what recommendation and price-advice callers use.
#[derive(Debug, Clone, Default)]
pub struct ChatOptions {
    pub source_language: Option<String>,
    pub target_language: Option<String>,
    pub history: Vec<ChatTurn>,
}

impl ChatOptions {
    pub fn translation(source: Option<String>, target: Option<String>) -> Self {
        Self {
            source_language: source,
            target_language: target,
            history: Vec::new(),
        }
    }

    pub fn with_history(history: Vec<ChatTurn>) -> Self {
        Self {
            history,
            ..Self::default()
        }
    }

    pub fn is_translation(&self) -> bool {
        self.source_language.is_some() || self.target_language.is_some()
    }
}

/// Reply from the conversational-AI provider.
#[derive(Debug, Clone)]
pub struct ChatReply {
    /// Best-effort answer text extracted from the provider payload.
    pub answer: String,
    /// Untouched provider payload.
    pub raw: serde_json::Value,
}

#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Send one chat message to the given flow. Exactly one upstream call per
    /// invocation; no retry, no caching.
    async fn send_message(
        &self,
        message: &str,
        flow_id: &str,
        options: &ChatOptions,
    ) -> Result<ChatReply, ChatClientError>;

    /// Send an image with an analysis prompt as an upload attachment.
    async fn send_image(
        &self,
        image: &[u8],
        mime_type: &str,
        flow_id: &str,
        prompt: &str,
    ) -> Result<ChatReply, ChatClientError>;

    /// List the flows available on the provider.
    async fn list_flows(&self) -> Result<serde_json::Value, ChatClientError>;

    /// Cheap connectivity check against the provider.
    async fn ping(&self) -> Result<(), ChatClientError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ChatClientError {
    #[error("provider returned status {status}: {message}")]
    Api { status: u16, message: String },
    #[error("transport error: {0}")]
    Transport(String),
}

impl ChatClientError {
    /// Upstream status when the provider reported one, 500 otherwise.
    pub fn status_code(&self) -> u16 {
        match self {
            ChatClientError::Api { status, .. } => *status,
            ChatClientError::Transport(_) => 500,
        }
    }
}
