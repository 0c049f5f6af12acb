//! Headless view-state controllers, one per feature screen.

pub mod ideas;
pub mod media;
pub mod state;
pub mod trends;

pub use ideas::IdeaBrainstorm;
pub use media::MediaStudio;
pub use state::RequestState;
pub use trends::TrendWatch;
