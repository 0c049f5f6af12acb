use super::state::RequestState;
use crate::gemini::GeminiClient;
use serde::{Deserialize, Serialize};

/// The trend watch screen. Failures arrive as fallback text, so the
/// analysis never enters the error state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendWatch {
    pub niche: String,
    pub analysis: RequestState<String>,
    mounted: bool,
}

impl Default for TrendWatch {
    fn default() -> Self {
        Self {
            niche: "Technology".to_string(),
            analysis: RequestState::Idle,
            mounted: false,
        }
    }
}

impl TrendWatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trigger_enabled(&self) -> bool {
        !self.analysis.is_loading()
    }

    pub fn begin(&mut self) -> Option<String> {
        self.analysis.begin().then(|| self.niche.clone())
    }

    pub fn complete(&mut self, text: String) -> bool {
        self.analysis.settle(Ok(text))
    }

    pub async fn refresh(&mut self, client: &GeminiClient) -> bool {
        let Some(niche) = self.begin() else {
            return false;
        };
        let text = client.request_trend_analysis(&niche).await;
        self.complete(text);
        true
    }

    /// Fetches once the first time the screen is shown.
    pub async fn on_mount(&mut self, client: &GeminiClient) -> bool {
        if self.mounted {
            return false;
        }
        self.mounted = true;
        self.refresh(client).await
    }
}
