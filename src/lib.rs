pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::{CliConfig, LocalStorage};

pub use adapters::http::HttpAnalysisClient;
pub use config::{OutputFormat, Settings};
pub use core::controller::{SubmitOutcome, UploadController};
pub use core::renderer::{render_dashboard, render_results, DashboardScreen, DashboardView};
pub use utils::error::{CopilotError, Result};
