use std::sync::Arc;

use crate::application::ports::{ChatClient, ChatClientError, ChatOptions};
use crate::domain::ChatTurn;

/// Common tourist scam warning signs served by the red-flags endpoint.
pub const RED_FLAGS: &[&str] = &[
    "Price is far below or above typical market rates",
    "Seller insists on immediate payment and refuses to let you think it over",
    "No written price anywhere, quoted price changes between visits",
    "You are approached unprompted with an unbeatable deal",
    "Payment requested by untraceable means only (wire, gift cards, crypto)",
    "The taxi meter is broken and the driver names a flat price",
    "A stranger offers free help and then demands payment",
    "Official-looking person asks for your passport or wallet",
];

/// Price advice, scam detection and safety advice prompts over the
/// conversational-AI provider.
pub struct ScamPreventionService<C>
where
    C: ChatClient,
{
    chat_client: Arc<C>,
}

impl<C> ScamPreventionService<C>
where
    C: ChatClient,
{
    pub fn new(chat_client: Arc<C>) -> Self {
        Self { chat_client }
    }

    pub async fn price_advice(
        &self,
        item: &str,
        price: f64,
        currency: &str,
        location: Option<&str>,
        flow_id: &str,
        history: Vec<ChatTurn>,
    ) -> Result<String, ChatClientError> {
        let prompt = format!(
            "I need price advice for an item. Here are the details:\n\
             Item: {}\nPrice: {} {}\nLocation: {}\n\n\
             Please provide advice on whether this price is fair, typical market \
             rates, negotiation tips, and any red flags to watch for.",
            item,
            price,
            currency,
            location.unwrap_or("Not specified"),
        );

        let options = ChatOptions::with_history(history);
        let reply = self
            .chat_client
            .send_message(&prompt, flow_id, &options)
            .await?;
        Ok(reply.answer)
    }

    pub async fn detect_scam(
        &self,
        situation: &str,
        location: Option<&str>,
        red_flags: &[String],
        urgency: &str,
        flow_id: &str,
    ) -> Result<String, ChatClientError> {
        let flags = if red_flags.is_empty() {
            "none reported".to_string()
        } else {
            red_flags.join("; ")
        };
        let prompt = format!(
            "Analyze this situation for signs of a tourist scam.\n\
             Situation: {}\nLocation: {}\nReported red flags: {}\nUrgency: {}\n\n\
             Explain whether this looks like a known scam, what the risks are, \
             and what the traveler should do next.",
            situation,
            location.unwrap_or("Not specified"),
            flags,
            urgency,
        );

        let reply = self
            .chat_client
            .send_message(&prompt, flow_id, &ChatOptions::default())
            .await?;
        Ok(reply.answer)
    }

    pub async fn safety_advice(
        &self,
        query: &str,
        location: Option<&str>,
        advice_type: &str,
        flow_id: &str,
    ) -> Result<String, ChatClientError> {
        let prompt = format!(
            "Provide {} advice for a traveler.\nQuestion: {}\nLocation: {}",
            advice_type,
            query,
            location.unwrap_or("Not specified"),
        );

        let reply = self
            .chat_client
            .send_message(&prompt, flow_id, &ChatOptions::default())
            .await?;
        Ok(reply.answer)
    }
}
