use crate::error::{GenerationError, Result};
use crate::gemini::polling::PollPolicy;
use std::env;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";
pub const DEFAULT_VIDEO_MODEL: &str = "veo-3.1-fast-generate-preview";

/// Environment variables consulted for the gateway credential, in order.
pub const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub text_model: String,
    pub image_model: String,
    pub video_model: String,
    pub request_timeout: Option<Duration>,
    pub poll: PollPolicy,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        GeminiConfig {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            video_model: DEFAULT_VIDEO_MODEL.to_string(),
            request_timeout: None,
            poll: PollPolicy::default(),
        }
    }
}

impl GeminiConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads overrides from the environment. The API key is deliberately not
    /// captured here; it is resolved on every call.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(base_url) = env::var("GEMINI_BASE_URL") {
            config.base_url = base_url;
        }
        if let Ok(model) = env::var("SOCIALFLOW_TEXT_MODEL") {
            config.text_model = model;
        }
        if let Ok(model) = env::var("SOCIALFLOW_IMAGE_MODEL") {
            config.image_model = model;
        }
        if let Ok(model) = env::var("SOCIALFLOW_VIDEO_MODEL") {
            config.video_model = model;
        }
        if let Some(secs) = env::var("SOCIALFLOW_POLL_INTERVAL_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            config.poll.interval = Duration::from_secs(secs);
        }
        if let Some(attempts) = env::var("SOCIALFLOW_MAX_POLL_ATTEMPTS")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
        {
            config.poll.max_attempts = Some(attempts);
        }
        if let Some(secs) = env::var("SOCIALFLOW_POLL_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            config.poll.timeout = Some(Duration::from_secs(secs));
        }

        config
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_models(
        mut self,
        text: impl Into<String>,
        image: impl Into<String>,
        video: impl Into<String>,
    ) -> Self {
        self.text_model = text.into();
        self.image_model = image.into();
        self.video_model = video.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn with_poll_policy(mut self, poll: PollPolicy) -> Self {
        self.poll = poll;
        self
    }

    /// The explicit key wins; otherwise the process environment is read now.
    pub fn resolve_api_key(&self) -> Result<String> {
        if let Some(key) = self.api_key.as_ref().filter(|k| !k.is_empty()) {
            return Ok(key.clone());
        }

        for var in API_KEY_VARS {
            if let Ok(key) = env::var(var) {
                if !key.is_empty() {
                    return Ok(key);
                }
            }
        }

        log::warn!("API Key not found in environment.");
        Err(GenerationError::MissingApiKey)
    }

    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(GenerationError::Config("base URL must not be empty".into()));
        }
        if self.poll.interval.is_zero() {
            return Err(GenerationError::Config(
                "poll interval must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}
