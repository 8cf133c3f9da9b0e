pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::CensusClient;
pub use config::TomlConfig;
pub use crate::core::{regions::RegionTable, scoring::Scaling, service::HomeScoreService, session::Session};
pub use utils::error::{HomeScoreError, Result};
