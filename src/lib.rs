pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{Action, CliConfig};

pub use crate::adapters::http::HttpNotifier;
pub use crate::config::ClientConfig;
pub use crate::core::board::{PendingNotification, PostBoard};
pub use crate::domain::model::{FilterCriteria, FilterMode, Post, PostId, Reaction, Threshold};
pub use crate::utils::error::{ReactionError, Result};
