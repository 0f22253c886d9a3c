pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::CliConfig;

pub use crate::adapters::memory::{InMemoryDocument, NodeId};
pub use crate::config::MarkupConfig;
pub use crate::core::controller::ModalController;
pub use crate::domain::directory::builtin_catalog;
pub use crate::domain::model::{BusinessRecord, Catalog, ModalState, ReviewRecord};
pub use crate::utils::error::{Result, ReviewBotError};
