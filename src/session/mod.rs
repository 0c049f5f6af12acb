//! Scripted login → onboarding → app flow.
//!
//! Nothing here authenticates anyone: the delays only imitate network
//! latency, and any code typed into the phone flow is accepted.

pub mod login;
pub mod onboarding;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use login::{LoginFlow, LoginMethod, PhoneStep};
pub use onboarding::{OnboardingFlow, SocialAccount};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    #[default]
    Login,
    Onboarding,
    Authenticated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionEvent {
    LoginSucceeded,
    OnboardingCompleted,
    OnboardingSkipped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidTransition {
    pub from: SessionState,
    pub event: SessionEvent,
}

impl fmt::Display for InvalidTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "event {:?} is not valid in state {:?}", self.event, self.from)
    }
}

impl std::error::Error for InvalidTransition {}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Login => "login",
            SessionState::Onboarding => "onboarding",
            SessionState::Authenticated => "authenticated",
        }
    }

    pub fn next(self, event: SessionEvent) -> Option<SessionState> {
        transition(self, event).ok()
    }
}

/// The whole transition table.
pub fn transition(
    from: SessionState,
    event: SessionEvent,
) -> Result<SessionState, InvalidTransition> {
    match (from, event) {
        (SessionState::Login, SessionEvent::LoginSucceeded) => Ok(SessionState::Onboarding),
        (SessionState::Onboarding, SessionEvent::OnboardingCompleted)
        | (SessionState::Onboarding, SessionEvent::OnboardingSkipped) => {
            Ok(SessionState::Authenticated)
        }
        _ => Err(InvalidTransition { from, event }),
    }
}
