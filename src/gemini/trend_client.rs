use super::gateway::Gateway;
use crate::{
    config::GeminiConfig,
    error::Result,
    logger,
    models::{GenerateContentRequest, Tool},
};
use std::sync::Arc;

pub const TRENDS_UNAVAILABLE: &str = "Unable to fetch trends.";
pub const TRENDS_FAILED: &str = "Error analyzing trends.";

#[derive(Clone)]
pub struct TrendClient {
    gateway: Arc<dyn Gateway>,
    config: Arc<GeminiConfig>,
}

impl TrendClient {
    pub fn new(gateway: Arc<dyn Gateway>, config: Arc<GeminiConfig>) -> Self {
        Self { gateway, config }
    }

    /// Search-grounded trend analysis. Never fails: errors collapse into
    /// [`TRENDS_FAILED`] and an empty answer into [`TRENDS_UNAVAILABLE`].
    pub async fn analyze(&self, niche: &str) -> String {
        match self.try_analyze(niche).await {
            Ok(Some(text)) => text,
            Ok(None) => TRENDS_UNAVAILABLE.to_string(),
            Err(e) => {
                log::error!("Trend analysis failed: {}", e);
                TRENDS_FAILED.to_string()
            }
        }
    }

    pub async fn try_analyze(&self, niche: &str) -> Result<Option<String>> {
        let _timer = logger::timer("trend analysis");
        let model = self.config.text_model.as_str();

        let request = GenerateContentRequest::prompt(format!(
            "What are the top 3 trending topics right now specifically for {} on social media? \
             Give a brief analysis of why they are trending.",
            niche
        ))
        .with_tool(Tool::google_search());

        log::info!("Analyzing trends for '{}'", niche);
        let response = self.gateway.generate_content(model, &request).await?;
        Ok(response.text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GenerationError;
    use crate::gemini::testing::ScriptedGateway;
    use crate::models::GenerateContentResponse;

    fn client(gateway: Arc<ScriptedGateway>) -> TrendClient {
        TrendClient::new(gateway, Arc::new(GeminiConfig::new().with_api_key("test")))
    }

    #[tokio::test]
    async fn test_returns_text_with_search_tool() {
        let gateway = Arc::new(ScriptedGateway::new().with_text("1. AI gadgets are everywhere"));
        let text = client(gateway.clone()).analyze("Technology").await;
        assert_eq!(text, "1. AI gadgets are everywhere");

        let requests = gateway.content_requests();
        let tools = requests[0].1.tools.as_ref().unwrap();
        assert!(tools[0].google_search.is_some());
        assert!(requests[0].1.prompt_text().contains("for Technology on social media"));
    }

    #[tokio::test]
    async fn test_failure_falls_back() {
        let gateway = Arc::new(
            ScriptedGateway::new().with_content(Err(GenerationError::Network("offline".into()))),
        );
        assert_eq!(client(gateway).analyze("Fitness").await, TRENDS_FAILED);
    }

    #[tokio::test]
    async fn test_empty_answer_falls_back() {
        let gateway = Arc::new(
            ScriptedGateway::new().with_content(Ok(GenerateContentResponse::default())),
        );
        assert_eq!(client(gateway).analyze("Fitness").await, TRENDS_UNAVAILABLE);
    }
}
