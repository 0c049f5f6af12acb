use crate::{
    models::DashboardSnapshot,
    session::{transition, InvalidTransition, LoginFlow, OnboardingFlow, SessionEvent, SessionState},
    views::{IdeaBrainstorm, MediaStudio, TrendWatch},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum NavSection {
    #[default]
    Dashboard,
    Generator,
    MediaStudio,
    Trends,
    Settings,
}

impl NavSection {
    /// Sections listed in the main navigation, in display order. Settings is
    /// pinned separately.
    pub const PRIMARY: [NavSection; 4] = [
        NavSection::Dashboard,
        NavSection::Generator,
        NavSection::MediaStudio,
        NavSection::Trends,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            NavSection::Dashboard => "Overview",
            NavSection::Generator => "Idea Generator",
            NavSection::MediaStudio => "Media Studio",
            NavSection::Trends => "Trend Watch",
            NavSection::Settings => "Settings",
        }
    }
}

/// What the host should currently render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Onboarding,
    Section(NavSection),
}

/// Whole-application state. Serializable so a host can snapshot it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppShell {
    pub session: SessionState,
    pub login: LoginFlow,
    pub onboarding: OnboardingFlow,
    pub section: NavSection,
    pub ideas: IdeaBrainstorm,
    pub media: MediaStudio,
    pub trends: TrendWatch,
}

impl AppShell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn screen(&self) -> Screen {
        match self.session {
            SessionState::Login => Screen::Login,
            SessionState::Onboarding => Screen::Onboarding,
            SessionState::Authenticated => Screen::Section(self.section),
        }
    }

    pub fn dispatch(&mut self, event: SessionEvent) -> Result<SessionState, InvalidTransition> {
        let next = transition(self.session, event)?;
        log::info!("Session {} -> {}", self.session.as_str(), next.as_str());
        self.session = next;
        Ok(next)
    }

    /// Switches sections. The screen being left is torn down, so anything it
    /// held (including a late result) is discarded. Ignored before login
    /// completes.
    pub fn navigate(&mut self, section: NavSection) -> bool {
        if self.session != SessionState::Authenticated {
            return false;
        }
        if section != self.section {
            match self.section {
                NavSection::Generator => self.ideas = IdeaBrainstorm::default(),
                NavSection::MediaStudio => self.media = MediaStudio::default(),
                NavSection::Trends => self.trends = TrendWatch::default(),
                NavSection::Dashboard | NavSection::Settings => {}
            }
            self.section = section;
        }
        true
    }

    pub fn dashboard(&self) -> DashboardSnapshot {
        DashboardSnapshot::mock()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::session::login::PhoneOutcome;
    use crate::views::RequestState;

    fn authenticated() -> AppShell {
        let mut shell = AppShell::new();
        shell.dispatch(SessionEvent::LoginSucceeded).unwrap();
        shell.dispatch(SessionEvent::OnboardingSkipped).unwrap();
        shell
    }

    #[tokio::test]
    async fn test_phone_login_to_dashboard() {
        let clock = ManualClock::new();
        let mut shell = AppShell::new();
        assert_eq!(shell.screen(), Screen::Login);

        shell.login.choose_phone();
        shell.login.phone = "+1 (555) 000-0000".into();
        shell.login.submit_phone(&clock).await.unwrap();
        shell.login.code = "anything".into();
        let PhoneOutcome::LoggedIn(event) = shell.login.submit_phone(&clock).await.unwrap() else {
            panic!("expected login");
        };
        shell.dispatch(event).unwrap();
        assert_eq!(shell.screen(), Screen::Onboarding);

        let finish = shell.onboarding.finish();
        shell.dispatch(finish).unwrap();
        assert_eq!(shell.screen(), Screen::Section(NavSection::Dashboard));
    }

    #[test]
    fn test_navigation_requires_authentication() {
        let mut shell = AppShell::new();
        assert!(!shell.navigate(NavSection::Trends));
        assert_eq!(shell.section, NavSection::Dashboard);
    }

    #[test]
    fn test_leaving_a_screen_discards_its_state() {
        let mut shell = authenticated();
        shell.navigate(NavSection::Generator);
        shell.ideas.niche = "Cooking".into();
        shell.ideas.ideas = RequestState::Error("boom".into());

        shell.navigate(NavSection::Generator);
        assert_eq!(shell.ideas.niche, "Cooking");

        shell.navigate(NavSection::Settings);
        assert_eq!(shell.ideas, IdeaBrainstorm::default());
        assert_eq!(shell.screen(), Screen::Section(NavSection::Settings));
    }

    #[test]
    fn test_late_results_are_dropped_after_navigation() {
        let mut shell = authenticated();

        shell.navigate(NavSection::Generator);
        shell.ideas.begin().unwrap();
        shell.navigate(NavSection::Dashboard);
        assert!(!shell.ideas.complete(Err(crate::GenerationError::EmptyResult)));
        assert!(!shell.ideas.complete(Ok(Vec::new())));
        assert_eq!(shell.ideas.ideas, RequestState::Idle);

        shell.navigate(NavSection::MediaStudio);
        shell.media.prompt = "sunset".into();
        let request = shell.media.begin().unwrap();
        shell.navigate(NavSection::Trends);
        assert!(!shell.media.complete(&request, Err(crate::GenerationError::NoImageReturned)));
        assert_eq!(shell.media, MediaStudio::default());

        shell.trends.begin().unwrap();
        shell.navigate(NavSection::Settings);
        assert!(!shell.trends.complete("late analysis".into()));
        assert_eq!(shell.trends, TrendWatch::default());
    }

    #[test]
    fn test_state_round_trips_through_json() {
        let mut shell = authenticated();
        shell.navigate(NavSection::MediaStudio);
        shell.media.prompt = "city at dusk".into();

        let restored = AppShell::from_json(&shell.to_json().unwrap()).unwrap();
        assert_eq!(restored, shell);
    }

    #[test]
    fn test_labels() {
        let labels: Vec<_> = NavSection::PRIMARY.iter().map(|s| s.label()).collect();
        assert_eq!(
            labels,
            vec!["Overview", "Idea Generator", "Media Studio", "Trend Watch"]
        );
    }
}
