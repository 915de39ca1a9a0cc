use std::time::Duration;

use async_trait::async_trait;

use crate::application::ports::{DirectionsError, DirectionsProvider, DirectionsSummary};
use crate::domain::TravelMode;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the Google Directions REST API.
pub struct GoogleDirectionsClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl GoogleDirectionsClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: format!(
                "{}/maps/api/directions/json",
                base_url.into().trim_end_matches('/')
            ),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl DirectionsProvider for GoogleDirectionsClient {
    async fn directions(
        &self,
        origin: &str,
        destination: &str,
        mode: TravelMode,
    ) -> Result<DirectionsSummary, DirectionsError> {
        if self.api_key.is_empty() {
            return Err(DirectionsError::ServiceUnavailable);
        }

        tracing::debug!(origin = %origin, destination = %destination, mode = %mode, "Requesting directions");

        let response = self
            .client
            .get(&self.endpoint)
            .timeout(REQUEST_TIMEOUT)
            .query(&[
                ("origin", origin),
                ("destination", destination),
                ("mode", mode.as_str()),
                ("key", &self.api_key),
            ])
            .send()
            .await
            .map_err(|e| DirectionsError::ApiRequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DirectionsError::ApiRequestFailed(format!(
                "status {}",
                status
            )));
        }

        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| DirectionsError::ApiRequestFailed(format!("parse response: {}", e)))?;

        let routes = payload
            .get("routes")
            .cloned()
            .unwrap_or(serde_json::Value::Array(Vec::new()));

        if routes.as_array().map(|r| r.is_empty()).unwrap_or(true) {
            return Err(DirectionsError::NoRoute {
                origin: origin.to_string(),
                destination: destination.to_string(),
            });
        }

        let legs = routes
            .pointer("/0/legs")
            .cloned()
            .unwrap_or(serde_json::Value::Array(Vec::new()));

        Ok(DirectionsSummary {
            origin: origin.to_string(),
            destination: destination.to_string(),
            routes,
            legs,
        })
    }

    fn provider_name(&self) -> &'static str {
        "google-directions"
    }
}
