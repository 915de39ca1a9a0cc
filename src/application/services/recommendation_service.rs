use std::sync::Arc;

use crate::application::ports::{ChatClient, ChatClientError, ChatOptions};
use crate::domain::ChatTurn;

/// Trip profile used to build the structured recommendations prompt.
#[derive(Debug, Clone)]
pub struct TripParams {
    pub location: String,
    pub interests: Vec<String>,
    pub budget: String,
    pub duration: String,
    pub travel_style: String,
    pub dietary_restrictions: Vec<String>,
}

impl TripParams {
    pub fn for_location(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            interests: Vec::new(),
            budget: "medium".to_string(),
            duration: "1 week".to_string(),
            travel_style: "tourist".to_string(),
            dietary_restrictions: Vec::new(),
        }
    }
}

/// Recommendations and etiquette advice bundled into one response. Either
/// side may be missing when its upstream call failed.
#[derive(Debug, Clone)]
pub struct ComprehensiveAdvice {
    pub recommendations: Option<String>,
    pub cultural_etiquette: Option<String>,
}

/// Travel recommendations and cultural-etiquette advice over the
/// conversational-AI provider. All calls use the raw-message branch, never the
/// translation instruction.
pub struct RecommendationService<C>
where
    C: ChatClient,
{
    chat_client: Arc<C>,
}

impl<C> RecommendationService<C>
where
    C: ChatClient,
{
    pub fn new(chat_client: Arc<C>) -> Self {
        Self { chat_client }
    }

    pub async fn personalized(
        &self,
        user_message: &str,
        flow_id: &str,
        history: Vec<ChatTurn>,
    ) -> Result<String, ChatClientError> {
        let options = ChatOptions::with_history(history);
        let reply = self
            .chat_client
            .send_message(user_message, flow_id, &options)
            .await?;
        Ok(reply.answer)
    }

    pub async fn cultural_etiquette(
        &self,
        location: &str,
        topics: &[String],
        flow_id: &str,
    ) -> Result<String, ChatClientError> {
        let focus = if topics.is_empty() {
            "general etiquette".to_string()
        } else {
            topics.join(", ")
        };
        let prompt = format!(
            "Provide cultural etiquette information for {}. Focus on: {}.",
            location, focus
        );

        let reply = self
            .chat_client
            .send_message(&prompt, flow_id, &ChatOptions::default())
            .await?;
        Ok(reply.answer)
    }

    /// Structured trip recommendations built from a trip profile rather than a
    /// free-form user message.
    pub async fn for_trip(
        &self,
        params: &TripParams,
        flow_id: &str,
    ) -> Result<String, ChatClientError> {
        let prompt = trip_prompt(params);
        let reply = self
            .chat_client
            .send_message(&prompt, flow_id, &ChatOptions::default())
            .await?;
        Ok(reply.answer)
    }

    /// Trip recommendations plus, when an etiquette flow is given, cultural
    /// etiquette for the same location. A failed side is dropped instead of
    /// failing the bundle.
    pub async fn comprehensive(
        &self,
        params: &TripParams,
        recommendations_flow: &str,
        etiquette_flow: Option<&str>,
    ) -> ComprehensiveAdvice {
        let recommendations = match self.for_trip(params, recommendations_flow).await {
            Ok(answer) => Some(answer),
            Err(e) => {
                tracing::warn!(error = %e, "Trip recommendations unavailable");
                None
            }
        };

        let mut cultural_etiquette = None;
        if let Some(flow_id) = etiquette_flow {
            cultural_etiquette = match self
                .cultural_etiquette(&params.location, &params.interests, flow_id)
                .await
            {
                Ok(answer) => Some(answer),
                Err(e) => {
                    tracing::warn!(error = %e, "Cultural etiquette unavailable");
                    None
                }
            };
        }

        ComprehensiveAdvice {
            recommendations,
            cultural_etiquette,
        }
    }
}

fn trip_prompt(params: &TripParams) -> String {
    let mut prompt = format!(
        "You are a professional travel advisor. Provide personalized recommendations \
         for a trip to {}.\n\n**Trip Details:**\n- Location: {}\n- Duration: {}\n\
         - Travel Style: {}\n- Budget Level: {}\n",
        params.location, params.location, params.duration, params.travel_style, params.budget,
    );
    if !params.interests.is_empty() {
        prompt.push_str(&format!("- Interests: {}\n", params.interests.join(", ")));
    }
    if !params.dietary_restrictions.is_empty() {
        prompt.push_str(&format!(
            "- Dietary Restrictions: {}\n",
            params.dietary_restrictions.join(", ")
        ));
    }
    prompt.push_str(
        "\nRespond in JSON with keys: attractions, restaurants, activities, itinerary \
         and tips. For each attraction, restaurant and activity include a name, a short \
         description, a budget level and why it fits the traveler.",
    );
    prompt
}
