use crate::core::view::{parse_rendered_list, RenderedPost};
use crate::domain::model::Post;
use crate::utils::error::Result;
use std::path::Path;

/// Reads the initial post list from a JSON array of posts.
pub async fn load_posts<P: AsRef<Path>>(path: P) -> Result<Vec<Post>> {
    let data = tokio::fs::read(path.as_ref()).await?;
    let posts: Vec<Post> = serde_json::from_slice(&data)?;
    tracing::debug!(
        "Loaded {} posts from {}",
        posts.len(),
        path.as_ref().display()
    );
    Ok(posts)
}

/// Reads the post list from a server-rendered page.
pub async fn load_page<P: AsRef<Path>>(path: P) -> Result<Vec<RenderedPost>> {
    let html = tokio::fs::read_to_string(path.as_ref()).await?;
    parse_rendered_list(&html)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ReactionError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_load_posts_from_json() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(
            br#"[
                {"id": "1", "title": "Hello", "content": "First post", "likes": 5, "dislikes": 1},
                {"id": "2", "title": "Again"}
            ]"#,
        )
        .unwrap();

        let posts = load_posts(file.path()).await.unwrap();

        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].likes, 5);
        assert_eq!(posts[1].dislikes, 0);
        assert!(posts.iter().all(|p| p.visible));
    }

    #[tokio::test]
    async fn test_load_posts_reports_bad_json() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"{not json").unwrap();

        assert!(matches!(
            load_posts(file.path()).await,
            Err(ReactionError::SerializationError(_))
        ));
        assert!(matches!(
            load_posts("/definitely/not/here.json").await,
            Err(ReactionError::IoError(_))
        ));
    }

    #[tokio::test]
    async fn test_load_page() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(
            br#"<ul><li><span id="post_4_likes" class="like-count">3 Likes</span>
            <span id="post_4_dislikes" class="dislike-count">0 Dislikes</span></li></ul>"#,
        )
        .unwrap();

        let items = load_page(file.path()).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].like_text, "3 Likes");
    }
}
