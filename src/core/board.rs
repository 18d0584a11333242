use crate::core::counter::{element_id, format_count, parse_count};
use crate::core::filter::apply_filter;
use crate::core::view::RenderedPost;
use crate::domain::model::{FilterCriteria, Post, PostId, Reaction};
use crate::domain::ports::ReactionNotifier;
use crate::utils::error::{ReactionError, Result};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// In-memory list of posts. The rendered page is a projection of this state.
pub struct PostBoard<N: ReactionNotifier> {
    posts: Vec<Post>,
    notifier: Arc<N>,
}

impl<N: ReactionNotifier> PostBoard<N> {
    pub fn new(posts: Vec<Post>, notifier: N) -> Self {
        Self {
            posts,
            notifier: Arc::new(notifier),
        }
    }

    /// Builds a board from counters read off a rendered page.
    pub fn from_rendered(items: Vec<RenderedPost>, notifier: N) -> Result<Self> {
        let posts = items
            .into_iter()
            .map(|item| {
                Ok(Post {
                    likes: parse_count(&item.like_text)?,
                    dislikes: parse_count(&item.dislike_text)?,
                    id: item.id,
                    title: item.title,
                    content: item.content,
                    visible: item.visible,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::new(posts, notifier))
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn post(&self, id: &PostId) -> Option<&Post> {
        self.posts.iter().find(|p| &p.id == id)
    }

    pub fn visible_posts(&self) -> impl Iterator<Item = &Post> {
        self.posts.iter().filter(|p| p.visible)
    }

    /// Counter text as it is displayed, e.g. `"6 Likes"`.
    pub fn counter_text(&self, id: &PostId, reaction: Reaction) -> Result<String> {
        self.post(id)
            .map(|p| format_count(p.count(reaction), reaction))
            .ok_or_else(|| ReactionError::element_not_found(element_id(id, reaction)))
    }

    /// Adds a like and notifies the server in the background.
    ///
    /// Must be called from within a tokio runtime; without one this fails with
    /// `RuntimeUnavailable` and the counter is left unchanged.
    pub fn like_post(&mut self, id: &PostId) -> Result<PendingNotification> {
        self.react(id, Reaction::Like)
    }

    /// Adds a dislike; same runtime requirement as [`PostBoard::like_post`].
    pub fn dislike_post(&mut self, id: &PostId) -> Result<PendingNotification> {
        self.react(id, Reaction::Dislike)
    }

    pub fn filter_posts(&mut self, criteria: &FilterCriteria) -> usize {
        apply_filter(&mut self.posts, criteria)
    }

    /// Applies the reaction locally, then notifies the server in the background.
    ///
    /// The counter is updated before the request is spawned and stays updated
    /// whatever the request's outcome is.
    fn react(&mut self, id: &PostId, reaction: Reaction) -> Result<PendingNotification> {
        let runtime = Handle::try_current().map_err(|e| ReactionError::RuntimeUnavailable {
            message: e.to_string(),
        })?;

        let post = self
            .posts
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| ReactionError::element_not_found(element_id(id, reaction)))?;

        let count = post.count_mut(reaction);
        *count = count.saturating_add(1);
        tracing::info!(
            "Post {} now shows {}",
            id,
            format_count(*count, reaction)
        );

        let notifier = Arc::clone(&self.notifier);
        let post_id = id.clone();
        let handle = runtime.spawn(async move {
            let result = notifier.notify(&post_id, reaction).await;
            match &result {
                Ok(()) => tracing::debug!("Server acknowledged {} on post {}", reaction, post_id),
                Err(e) => tracing::warn!("Failed to record {} on post {}: {}", reaction, post_id, e),
            }
            result
        });

        Ok(PendingNotification {
            post_id: id.clone(),
            reaction,
            handle,
        })
    }
}

/// Handle to an in-flight server notification.
///
/// Dropping it does not cancel the request; use [`PendingNotification::detach`]
/// to make discarding the outcome explicit.
#[must_use = "await `outcome()` or call `detach()` to discard the result"]
#[derive(Debug)]
pub struct PendingNotification {
    post_id: PostId,
    reaction: Reaction,
    handle: JoinHandle<Result<()>>,
}

impl PendingNotification {
    pub fn post_id(&self) -> &PostId {
        &self.post_id
    }

    pub fn reaction(&self) -> Reaction {
        self.reaction
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    pub async fn outcome(self) -> Result<()> {
        match self.handle.await {
            Ok(result) => result,
            Err(e) => Err(ReactionError::NotificationAborted {
                message: e.to_string(),
            }),
        }
    }

    pub fn detach(self) {
        tracing::debug!(
            "Detached {} notification for post {}",
            self.reaction,
            self.post_id
        );
    }
}
