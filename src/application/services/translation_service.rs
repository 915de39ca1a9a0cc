use std::sync::Arc;

use crate::application::ports::{ChatClient, ChatClientError, ChatOptions};
use crate::application::services::answer_normalizer::normalize_image_translation;
use crate::domain::{ChatTurn, ImageTranslation, Translation};

/// Text and image translation over the conversational-AI provider.
pub struct TranslationService<C>
where
    C: ChatClient,
{
    chat_client: Arc<C>,
}

impl<C> TranslationService<C>
where
    C: ChatClient,
{
    pub fn new(chat_client: Arc<C>) -> Self {
        Self { chat_client }
    }

    pub async fn translate_text(
        &self,
        message: &str,
        flow_id: &str,
        source_language: Option<String>,
        target_language: Option<String>,
        history: Vec<ChatTurn>,
    ) -> Result<Translation, ChatClientError> {
        let source = source_language.unwrap_or_else(|| "auto".to_string());
        let target = target_language.unwrap_or_else(|| "auto".to_string());

        let options = ChatOptions {
            source_language: Some(source.clone()),
            target_language: Some(target.clone()),
            history,
        };

        let reply = self
            .chat_client
            .send_message(message, flow_id, &options)
            .await?;

        Ok(Translation {
            original_text: message.to_string(),
            translated_text: reply.answer,
            source_language: source,
            target_language: target,
        })
    }

    /// Analyze an image and translate any text found in it. The provider's
    /// free-form answer is normalized into structured fields; normalization
    /// never fails, only degrades to placeholders.
    pub async fn translate_image(
        &self,
        image: &[u8],
        mime_type: &str,
        flow_id: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<(ImageTranslation, String), ChatClientError> {
        let prompt = image_translation_prompt(source_language, target_language);

        let reply = self
            .chat_client
            .send_image(image, mime_type, flow_id, &prompt)
            .await?;

        let normalized = normalize_image_translation(&reply.answer, source_language);
        Ok((normalized, reply.answer))
    }
}

fn image_translation_prompt(source_language: &str, target_language: &str) -> String {
    format!(
        "Analyze this image and translate any text you find from {} to {}. \
         Respond with a JSON object containing originalText, translatedText, \
         detectedLanguage and description. If no text is found, describe what \
         you see in the description field.",
        source_language, target_language
    )
}
