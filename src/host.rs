//! Host-environment key selection used before video generation.

use crate::config::API_KEY_VARS;
use crate::error::{GenerationError, Result};
use async_trait::async_trait;

#[async_trait]
pub trait KeySelector: Send + Sync {
    /// Whether a billing-enabled key has already been selected.
    async fn has_selected_api_key(&self) -> Result<bool>;

    /// Asks the user to pick a key.
    async fn open_select_key(&self) -> Result<()>;
}

/// Treats any key present in the process environment as selected. There is
/// no interactive picker, so opening one only logs guidance.
#[derive(Debug, Clone, Default)]
pub struct EnvKeySelector;

#[async_trait]
impl KeySelector for EnvKeySelector {
    async fn has_selected_api_key(&self) -> Result<bool> {
        Ok(API_KEY_VARS
            .iter()
            .any(|var| std::env::var(var).map_or(false, |v| !v.is_empty())))
    }

    async fn open_select_key(&self) -> Result<()> {
        log::warn!(
            "Set {} to a billing-enabled key to generate video",
            API_KEY_VARS[0]
        );
        Ok(())
    }
}

/// Ensures a key is selected, prompting once if not.
pub async fn ensure_key_selected(selector: &dyn KeySelector) -> Result<()> {
    match selector.has_selected_api_key().await {
        Ok(true) => Ok(()),
        Ok(false) => selector.open_select_key().await,
        Err(e) => {
            log::error!("API Key selection failed: {}", e);
            Err(GenerationError::CapabilityMissing(e.to_string()))
        }
    }
}
