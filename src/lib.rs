pub mod clock;
pub mod config;
pub mod error;
pub mod gemini;
pub mod host;
pub mod logger;
pub mod models;
pub mod session;
pub mod shell;
pub mod views;

pub use clock::{Clock, ManualClock, TokioClock};
pub use config::GeminiConfig;
pub use error::{ErrorCategory, GenerationError, Result};
pub use gemini::{
    Gateway, GeminiClient, HttpGateway, IdeaClient, ImageClient, PollPolicy, TrendClient,
    VideoClient,
};
pub use host::{EnvKeySelector, KeySelector};
pub use models::{
    AspectRatio, ContentIdea, ContentPlatform, DashboardSnapshot, EngagementTier,
    GeneratedImage, GeneratedMedia, GeneratedVideo, MediaKind,
};
pub use session::{SessionEvent, SessionState};
pub use shell::{AppShell, NavSection, Screen};
pub use views::{IdeaBrainstorm, MediaStudio, RequestState, TrendWatch};
