use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;

use wayfarer::application::ports::{ChatClient, ChatClientError, ChatOptions, ChatReply};
use wayfarer::application::services::{RecommendationService, TripParams};

/// Records every prompt and fails any call routed to the configured flow id.
struct SelectiveChatClient {
    failing_flow: &'static str,
    prompts: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl ChatClient for SelectiveChatClient {
    async fn send_message(
        &self,
        message: &str,
        flow_id: &str,
        _options: &ChatOptions,
    ) -> Result<ChatReply, ChatClientError> {
        self.prompts.lock().unwrap().push(message.to_string());
        if flow_id == self.failing_flow {
            return Err(ChatClientError::Api {
                status: 503,
                message: "flow unavailable".to_string(),
            });
        }
        Ok(ChatReply {
            answer: format!("answer for {}", flow_id),
            raw: json!({}),
        })
    }

    async fn send_image(
        &self,
        _image: &[u8],
        _mime_type: &str,
        _flow_id: &str,
        _prompt: &str,
    ) -> Result<ChatReply, ChatClientError> {
        unreachable!("recommendations never send images")
    }

    async fn list_flows(&self) -> Result<serde_json::Value, ChatClientError> {
        Ok(json!([]))
    }

    async fn ping(&self) -> Result<(), ChatClientError> {
        Ok(())
    }
}

fn service(
    failing_flow: &'static str,
) -> (RecommendationService<SelectiveChatClient>, Arc<Mutex<Vec<String>>>) {
    let prompts = Arc::new(Mutex::new(Vec::new()));
    let client = Arc::new(SelectiveChatClient {
        failing_flow,
        prompts: Arc::clone(&prompts),
    });
    (RecommendationService::new(client), prompts)
}

fn trip() -> TripParams {
    TripParams {
        interests: vec!["food".to_string(), "history".to_string()],
        ..TripParams::for_location("Kyoto, Japan")
    }
}

#[tokio::test]
async fn given_trip_profile_when_requesting_then_prompt_carries_location_and_interests() {
    let (service, prompts) = service("none");

    service.for_trip(&trip(), "rec-flow").await.unwrap();

    let prompts = prompts.lock().unwrap();
    assert!(prompts[0].contains("Kyoto, Japan"));
    assert!(prompts[0].contains("Interests: food, history"));
    assert!(prompts[0].contains("Budget Level: medium"));
}

#[tokio::test]
async fn given_failing_etiquette_flow_when_comprehensive_then_recommendations_still_arrive() {
    let (service, _) = service("etiquette-flow");

    let advice = service
        .comprehensive(&trip(), "rec-flow", Some("etiquette-flow"))
        .await;

    assert_eq!(advice.recommendations.as_deref(), Some("answer for rec-flow"));
    assert!(advice.cultural_etiquette.is_none());
}

#[tokio::test]
async fn given_no_etiquette_flow_when_comprehensive_then_only_recommendations_are_requested() {
    let (service, prompts) = service("none");

    let advice = service.comprehensive(&trip(), "rec-flow", None).await;

    assert!(advice.recommendations.is_some());
    assert!(advice.cultural_etiquette.is_none());
    assert_eq!(prompts.lock().unwrap().len(), 1);
}
