use async_trait::async_trait;
use serde_json::json;

use crate::application::ports::{DirectionsError, DirectionsProvider, DirectionsSummary};
use crate::domain::TravelMode;

/// Canned directions data for local development without a maps API key.
pub struct MockDirectionsProvider;

#[async_trait]
impl DirectionsProvider for MockDirectionsProvider {
    async fn directions(
        &self,
        origin: &str,
        destination: &str,
        mode: TravelMode,
    ) -> Result<DirectionsSummary, DirectionsError> {
        let legs = json!([
            {
                "duration": { "text": "25 mins", "value": 1500 },
                "distance": { "text": "8.2 km", "value": 8200 },
                "steps": [
                    {
                        "travel_mode": mode.as_str().to_uppercase(),
                        "html_instructions": format!("Go from {} to {}", origin, destination),
                    }
                ],
            }
        ]);
        let routes = json!([
            {
                "summary": format!("{} route", mode),
                "fare": { "currency": "USD", "text": "$3.50" },
                "legs": legs,
            }
        ]);

        Ok(DirectionsSummary {
            origin: origin.to_string(),
            destination: destination.to_string(),
            legs: routes.pointer("/0/legs").cloned().unwrap_or_default(),
            routes,
        })
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}
