use super::SessionEvent;
use crate::clock::Clock;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const CONNECT_DELAY: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialAccount {
    Instagram,
    YouTube,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountLink {
    pub key: String,
    pub connected: bool,
}

/// The connect-accounts screen. Keys are never sent anywhere and nothing
/// survives a restart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnboardingFlow {
    pub instagram: AccountLink,
    pub youtube: AccountLink,
    pub connecting: Option<SocialAccount>,
}

impl OnboardingFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn link(&self, account: SocialAccount) -> &AccountLink {
        match account {
            SocialAccount::Instagram => &self.instagram,
            SocialAccount::YouTube => &self.youtube,
        }
    }

    fn link_mut(&mut self, account: SocialAccount) -> &mut AccountLink {
        match account {
            SocialAccount::Instagram => &mut self.instagram,
            SocialAccount::YouTube => &mut self.youtube,
        }
    }

    pub fn set_key(&mut self, account: SocialAccount, key: impl Into<String>) {
        self.link_mut(account).key = key.into();
    }

    pub fn is_connected(&self, account: SocialAccount) -> bool {
        self.link(account).connected
    }

    pub fn can_connect(&self, account: SocialAccount) -> bool {
        let link = self.link(account);
        !link.connected && !link.key.is_empty() && self.connecting != Some(account)
    }

    /// Simulates verifying the key, then marks the account connected.
    /// Returns `false` when the connect trigger is disabled.
    pub async fn connect(&mut self, account: SocialAccount, clock: &dyn Clock) -> bool {
        if !self.can_connect(account) {
            return false;
        }
        self.connecting = Some(account);
        clock.sleep(CONNECT_DELAY).await;
        self.link_mut(account).connected = true;
        self.connecting = None;
        log::info!("Connected {:?} (simulated)", account);
        true
    }

    pub fn finish(&self) -> SessionEvent {
        SessionEvent::OnboardingCompleted
    }

    pub fn skip(&self) -> SessionEvent {
        SessionEvent::OnboardingSkipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::session::{transition, SessionState};

    #[tokio::test]
    async fn test_connect_requires_key() {
        let clock = ManualClock::new();
        let mut flow = OnboardingFlow::new();
        assert!(!flow.connect(SocialAccount::Instagram, &clock).await);

        flow.set_key(SocialAccount::Instagram, "IGQV-token");
        assert!(flow.connect(SocialAccount::Instagram, &clock).await);
        assert!(flow.is_connected(SocialAccount::Instagram));
        assert!(!flow.is_connected(SocialAccount::YouTube));
        assert!(flow.connecting.is_none());
        assert_eq!(clock.sleeps(), vec![CONNECT_DELAY]);

        assert!(!flow.can_connect(SocialAccount::Instagram));
    }

    #[test]
    fn test_connect_disabled_while_connecting() {
        let mut flow = OnboardingFlow::new();
        flow.set_key(SocialAccount::YouTube, "AIza");
        flow.connecting = Some(SocialAccount::YouTube);
        assert!(!flow.can_connect(SocialAccount::YouTube));
    }

    #[test]
    fn test_skip_and_finish_reach_authenticated() {
        let flow = OnboardingFlow::new();
        for event in [flow.finish(), flow.skip()] {
            assert_eq!(
                transition(SessionState::Onboarding, event),
                Ok(SessionState::Authenticated)
            );
        }
    }
}
