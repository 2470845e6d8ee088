pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, View};

pub use adapters::HttpGateway;
pub use config::AppConfig;
pub use app::engine::InsightsEngine;
pub use crate::core::filter::Selection;
pub use crate::core::views::ViewOptions;
pub use utils::error::{InsightsError, Result};
