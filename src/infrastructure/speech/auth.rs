use std::sync::Arc;

use async_trait::async_trait;

/// Source of short-lived bearer tokens for the speech APIs.
///
/// The production service-account exchange lives behind this seam so the
/// clients can be tested with injected tokens.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn access_token(&self) -> Result<String, TokenError>;
}

#[derive(Debug, thiserror::Error)]
#[error("failed to obtain access token: {0}")]
pub struct TokenError(pub String);

/// Token provider backed by a pre-issued token from the environment.
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn access_token(&self) -> Result<String, TokenError> {
        Ok(self.token.clone())
    }
}

/// Credential mechanism for the speech APIs, selected once at configuration
/// time. Exactly one mechanism is used per client; the bearer path is
/// preferred when both credentials are present.
#[derive(Clone)]
pub enum SpeechAuth {
    Bearer(Arc<dyn TokenProvider>),
    ApiKey(String),
}

impl SpeechAuth {
    pub fn from_credentials(
        access_token: Option<String>,
        api_key: Option<String>,
    ) -> Option<Self> {
        if let Some(token) = access_token.filter(|t| !t.is_empty()) {
            return Some(SpeechAuth::Bearer(Arc::new(StaticTokenProvider::new(token))));
        }
        api_key.filter(|k| !k.is_empty()).map(SpeechAuth::ApiKey)
    }

    /// Attach the credential to an outgoing request.
    pub async fn authorize(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<reqwest::RequestBuilder, TokenError> {
        match self {
            SpeechAuth::Bearer(provider) => {
                let token = provider.access_token().await?;
                Ok(builder.bearer_auth(token))
            }
            SpeechAuth::ApiKey(key) => Ok(builder.query(&[("key", key.as_str())])),
        }
    }
}
