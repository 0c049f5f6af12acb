pub mod analytics;
pub mod common;
pub mod idea;
pub mod media;
pub mod wire;

pub use analytics::*;
pub use common::*;
pub use idea::*;
pub use media::*;
pub use wire::*;
