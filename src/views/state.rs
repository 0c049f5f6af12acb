use serde::{Deserialize, Serialize};

/// Lifecycle of one triggerable action on a screen.
///
/// Holding the outcome in a single enum means a screen can never show a
/// result and an error at the same time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "lowercase")]
pub enum RequestState<T> {
    Idle,
    Loading,
    Success(T),
    Error(String),
}

impl<T> Default for RequestState<T> {
    fn default() -> Self {
        RequestState::Idle
    }
}

impl<T> RequestState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading)
    }

    pub fn result(&self) -> Option<&T> {
        match self {
            RequestState::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            RequestState::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Enters `Loading`, discarding any previous outcome. Refused while a
    /// request is already outstanding.
    pub fn begin(&mut self) -> bool {
        if self.is_loading() {
            return false;
        }
        *self = RequestState::Loading;
        true
    }

    /// Records the outcome of the outstanding request. Ignored unless a
    /// request is outstanding, so a result that outlives its screen is
    /// dropped.
    pub fn settle(&mut self, outcome: std::result::Result<T, String>) -> bool {
        if !self.is_loading() {
            return false;
        }
        *self = match outcome {
            Ok(value) => RequestState::Success(value),
            Err(message) => RequestState::Error(message),
        };
        true
    }

    /// Fails without a request ever going out.
    pub fn refuse(&mut self, message: impl Into<String>) {
        *self = RequestState::Error(message.into());
    }

    pub fn reset(&mut self) {
        *self = RequestState::Idle;
    }
}
