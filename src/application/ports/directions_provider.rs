use async_trait::async_trait;

use crate::domain::TravelMode;

/// Route data returned by the directions provider, consumed as-is.
#[derive(Debug, Clone)]
pub struct DirectionsSummary {
    pub origin: String,
    pub destination: String,
    pub routes: serde_json::Value,
    pub legs: serde_json::Value,
}

#[async_trait]
pub trait DirectionsProvider: Send + Sync {
    async fn directions(
        &self,
        origin: &str,
        destination: &str,
        mode: TravelMode,
    ) -> Result<DirectionsSummary, DirectionsError>;

    /// Provider status line for the transportation status endpoint.
    fn provider_name(&self) -> &'static str;
}

#[derive(Debug, thiserror::Error)]
pub enum DirectionsError {
    #[error("directions provider credentials not configured")]
    ServiceUnavailable,
    #[error("directions request failed: {0}")]
    ApiRequestFailed(String),
    #[error("no route found between {origin} and {destination}")]
    NoRoute { origin: String, destination: String },
}
