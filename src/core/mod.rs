pub mod controller;
pub mod renderer;
pub mod selection;
pub mod state;

pub use crate::domain::model::{AnalysisReport, ResultSets, SelectedFile};
pub use crate::domain::ports::{AnalysisService, ConfigProvider, Storage};
pub use crate::utils::error::Result;
