pub mod adapters;
pub mod config;
pub mod domain;
pub mod skill;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliArgs;

pub use adapters::CurrencyLayerClient;
pub use config::SkillConfig;
pub use skill::{RequestEnvelope, ResponseEnvelope, Skill};
pub use utils::error::{Result, SkillError};
