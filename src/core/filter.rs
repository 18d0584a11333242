use crate::domain::model::{FilterCriteria, FilterMode, Post};

/// Visibility a post should get under `criteria`, or `None` when the mode is
/// not recognised and the post keeps its current visibility.
pub fn visibility(post: &Post, criteria: &FilterCriteria) -> Option<bool> {
    match &criteria.mode {
        FilterMode::All => Some(true),
        FilterMode::Liked => Some(criteria.threshold.is_exceeded_by(post.likes)),
        FilterMode::Disliked => Some(criteria.threshold.is_exceeded_by(post.dislikes)),
        FilterMode::Other(_) => None,
    }
}

/// Re-evaluates every post and returns how many are visible afterwards.
pub fn apply_filter(posts: &mut [Post], criteria: &FilterCriteria) -> usize {
    if let FilterMode::Other(mode) = &criteria.mode {
        tracing::debug!("Unknown filter mode '{}', leaving visibility unchanged", mode);
    }

    for post in posts.iter_mut() {
        if let Some(visible) = visibility(post, criteria) {
            post.visible = visible;
        }
    }

    let visible = posts.iter().filter(|p| p.visible).count();
    tracing::debug!(
        "Filter mode={} threshold={:?}: {}/{} posts visible",
        criteria.mode,
        criteria.threshold.value(),
        visible,
        posts.len()
    );
    visible
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Threshold;

    fn sample_posts() -> Vec<Post> {
        vec![
            Post::new("1", 5, 0),
            Post::new("2", 3, 7),
            Post::new("3", 0, 2),
        ]
    }

    fn visible_ids(posts: &[Post]) -> Vec<&str> {
        posts
            .iter()
            .filter(|p| p.visible)
            .map(|p| p.id.as_str())
            .collect()
    }

    #[test]
    fn test_all_shows_every_post() {
        let mut posts = sample_posts();
        for post in posts.iter_mut() {
            post.visible = false;
        }

        let criteria = FilterCriteria::from_inputs("all", "100");
        assert_eq!(apply_filter(&mut posts, &criteria), 3);
    }

    #[test]
    fn test_liked_uses_strict_comparison() {
        let mut posts = sample_posts();

        apply_filter(&mut posts, &FilterCriteria::from_inputs("liked", "3"));
        assert_eq!(visible_ids(&posts), vec!["1"]);

        apply_filter(&mut posts, &FilterCriteria::from_inputs("liked", "5"));
        assert!(visible_ids(&posts).is_empty());
    }

    #[test]
    fn test_disliked_filters_on_dislike_count() {
        let mut posts = sample_posts();

        let visible = apply_filter(&mut posts, &FilterCriteria::from_inputs("disliked", "1"));
        assert_eq!(visible, 2);
        assert_eq!(visible_ids(&posts), vec!["2", "3"]);
    }

    #[test]
    fn test_filter_is_reevaluated_each_run() {
        let mut posts = sample_posts();

        apply_filter(&mut posts, &FilterCriteria::from_inputs("liked", "10"));
        assert!(visible_ids(&posts).is_empty());

        apply_filter(&mut posts, &FilterCriteria::from_inputs("liked", "-1"));
        assert_eq!(visible_ids(&posts), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_empty_threshold_hides_everything() {
        let mut posts = sample_posts();

        assert_eq!(apply_filter(&mut posts, &FilterCriteria::from_inputs("liked", "")), 0);
        assert_eq!(
            apply_filter(&mut posts, &FilterCriteria::from_inputs("disliked", "abc")),
            0
        );
    }

    #[test]
    fn test_unknown_mode_changes_nothing() {
        let mut posts = sample_posts();
        posts[1].visible = false;

        let criteria = FilterCriteria::new(FilterMode::Other("top".into()), Threshold::new(0));
        assert_eq!(visibility(&posts[0], &criteria), None);
        assert_eq!(apply_filter(&mut posts, &criteria), 2);
        assert_eq!(visible_ids(&posts), vec!["1", "3"]);
    }
}
