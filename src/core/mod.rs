pub mod board;
pub mod counter;
pub mod filter;
pub mod view;

pub use crate::domain::model::{FilterCriteria, FilterMode, Post, PostId, Reaction, Threshold};
pub use crate::domain::ports::{ConfigProvider, ReactionNotifier};
pub use crate::utils::error::Result;
