pub mod api;
pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod storage;

pub use crate::api::{PhraseApi, PhraseClient};
pub use crate::config::{load_config, ValidatedConfig};
pub use crate::core::{DeletionReport, PruneSummary, Pruner};
pub use crate::error::{ApiError, PruneError, Result};
