use crate::domain::model::{PostId, Reaction};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Tells the server about a reaction that was already applied locally.
#[async_trait]
pub trait ReactionNotifier: Send + Sync + 'static {
    async fn notify(&self, post_id: &PostId, reaction: Reaction) -> Result<()>;
}

pub trait ConfigProvider: Send + Sync {
    fn server_url(&self) -> &str;
    fn like_path(&self) -> &str;
    fn dislike_path(&self) -> &str;
    fn request_timeout(&self) -> Option<Duration>;
}
