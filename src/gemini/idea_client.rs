use super::gateway::Gateway;
use crate::{
    config::GeminiConfig,
    error::{GenerationError, Result},
    logger,
    models::{
        idea_prompt, idea_response_schema, parse_ideas, ContentIdea, ContentPlatform,
        GenerateContentRequest, GenerationConfig,
    },
};
use std::sync::Arc;

#[derive(Clone)]
pub struct IdeaClient {
    gateway: Arc<dyn Gateway>,
    config: Arc<GeminiConfig>,
}

impl IdeaClient {
    pub fn new(gateway: Arc<dyn Gateway>, config: Arc<GeminiConfig>) -> Self {
        Self { gateway, config }
    }

    pub async fn generate(
        &self,
        niche: &str,
        platform: ContentPlatform,
    ) -> Result<Vec<ContentIdea>> {
        let _timer = logger::timer("idea generation");
        let model = self.config.text_model.as_str();

        let request = GenerateContentRequest::prompt(idea_prompt(niche, platform))
            .with_generation_config(GenerationConfig {
                response_mime_type: Some("application/json".to_string()),
                response_schema: Some(idea_response_schema()),
                image_config: None,
            });

        log::info!("Requesting ideas for '{}' on {} with {}", niche, platform, model);

        let response = self
            .gateway
            .generate_content(model, &request)
            .await
            .map_err(|e| {
                log::error!("Error generating ideas: {}", e);
                e
            })?;

        let text = response.text().ok_or(GenerationError::EmptyResult)?;
        let ideas = parse_ideas(&text, platform).map_err(|e| {
            log::error!("Error generating ideas: {}", e);
            e
        })?;

        log::info!("Generated {} ideas", ideas.len());
        Ok(ideas)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gemini::testing::ScriptedGateway;
    use crate::models::GenerateContentResponse;

    const IDEAS: &str = r##"[
        {"title": "Budget phone shootout", "description": "Three phones, one winner", "platform": "YouTube", "estimatedEngagement": "High", "script": "Intro, tests, verdict", "hashtags": ["#tech", "#phones"]},
        {"title": "Desk setup tour", "description": "Minimal desk in 60s", "platform": "YouTube", "estimatedEngagement": "Medium"},
        {"title": "Myth busting chargers", "description": "Does fast charging hurt?", "platform": "YouTube", "estimatedEngagement": "Low"}
    ]"##;

    fn client(gateway: Arc<ScriptedGateway>) -> IdeaClient {
        IdeaClient::new(gateway, Arc::new(GeminiConfig::new().with_api_key("test")))
    }

    #[tokio::test]
    async fn test_generates_three_ideas() {
        let gateway = Arc::new(ScriptedGateway::new().with_text(IDEAS));
        let ideas = client(gateway.clone())
            .generate("Tech Reviews", ContentPlatform::YouTube)
            .await
            .unwrap();

        assert_eq!(ideas.len(), 3);
        assert!(ideas
            .iter()
            .all(|i| !i.title.is_empty() && !i.description.is_empty()));

        let requests = gateway.content_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].0, "gemini-2.5-flash");
        let config = requests[0].1.generation_config.as_ref().unwrap();
        assert_eq!(config.response_mime_type.as_deref(), Some("application/json"));
        assert!(requests[0].1.prompt_text().contains("Tech Reviews creator on YouTube"));
    }

    #[tokio::test]
    async fn test_empty_text_is_empty_result() {
        let gateway = Arc::new(
            ScriptedGateway::new().with_content(Ok(GenerateContentResponse::default())),
        );
        let err = client(gateway)
            .generate("Travel", ContentPlatform::Instagram)
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::EmptyResult));
    }

    #[tokio::test]
    async fn test_prose_is_parse_error() {
        let gateway = Arc::new(ScriptedGateway::new().with_text("I can't do that."));
        let err = client(gateway)
            .generate("Travel", ContentPlatform::Instagram)
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::Parse(_)));
    }

    #[tokio::test]
    async fn test_gateway_error_propagates() {
        let gateway = Arc::new(ScriptedGateway::new().with_content(Err(GenerationError::Http {
            status: 500,
            message: "internal".into(),
        })));
        let err = client(gateway)
            .generate("Travel", ContentPlatform::TikTok)
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::Http { status: 500, .. }));
    }
}
