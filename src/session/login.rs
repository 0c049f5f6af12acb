use super::SessionEvent;
use crate::clock::Clock;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

pub const GOOGLE_LOGIN_DELAY: Duration = Duration::from_millis(1500);
pub const PHONE_STEP_DELAY: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoginMethod {
    #[default]
    Selection,
    Phone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhoneStep {
    #[default]
    EnterPhone,
    EnterCode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhoneOutcome {
    CodeSent,
    LoggedIn(SessionEvent),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoginError {
    #[error("a login attempt is already in progress")]
    Busy,
    #[error("{0} is required")]
    MissingInput(&'static str),
    #[error("phone login has not been selected")]
    PhoneNotSelected,
}

/// The fake login screen.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoginFlow {
    pub method: LoginMethod,
    pub phone: String,
    pub code: String,
    pub step: PhoneStep,
    pub loading: bool,
}

impl LoginFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn choose_phone(&mut self) {
        self.method = LoginMethod::Phone;
    }

    pub fn back_to_options(&mut self) {
        *self = Self {
            loading: self.loading,
            ..Self::default()
        };
    }

    pub fn submit_label(&self) -> &'static str {
        match self.step {
            PhoneStep::EnterPhone => "Send Code",
            PhoneStep::EnterCode => "Verify & Login",
        }
    }

    pub async fn google_login(&mut self, clock: &dyn Clock) -> Result<SessionEvent, LoginError> {
        if self.loading {
            return Err(LoginError::Busy);
        }
        self.loading = true;
        clock.sleep(GOOGLE_LOGIN_DELAY).await;
        self.loading = false;
        log::info!("Signed in with Google (simulated)");
        Ok(SessionEvent::LoginSucceeded)
    }

    /// Advances the phone flow by one step. The number format and the code
    /// value are never checked; only emptiness is.
    pub async fn submit_phone(&mut self, clock: &dyn Clock) -> Result<PhoneOutcome, LoginError> {
        if self.method != LoginMethod::Phone {
            return Err(LoginError::PhoneNotSelected);
        }
        if self.loading {
            return Err(LoginError::Busy);
        }

        match self.step {
            PhoneStep::EnterPhone => {
                if self.phone.trim().is_empty() {
                    return Err(LoginError::MissingInput("phone number"));
                }
                self.loading = true;
                clock.sleep(PHONE_STEP_DELAY).await;
                self.loading = false;
                self.step = PhoneStep::EnterCode;
                log::info!("Verification code sent to {} (simulated)", self.phone);
                Ok(PhoneOutcome::CodeSent)
            }
            PhoneStep::EnterCode => {
                if self.code.trim().is_empty() {
                    return Err(LoginError::MissingInput("verification code"));
                }
                self.loading = true;
                clock.sleep(PHONE_STEP_DELAY).await;
                self.loading = false;
                log::info!("Phone login accepted (simulated)");
                Ok(PhoneOutcome::LoggedIn(SessionEvent::LoginSucceeded))
            }
        }
    }
}
