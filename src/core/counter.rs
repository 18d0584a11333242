use crate::domain::model::{PostId, Reaction};
use crate::utils::error::{ReactionError, Result};

/// Reads the leading non-negative integer of a rendered counter, e.g. `"5 Likes"`.
pub fn parse_count(text: &str) -> Result<u64> {
    let trimmed = text.trim_start();
    let digits_len = trimmed.bytes().take_while(u8::is_ascii_digit).count();

    if digits_len == 0 {
        return Err(ReactionError::InvalidCount {
            text: text.to_string(),
        });
    }

    trimmed[..digits_len]
        .parse::<u64>()
        .map_err(|_| ReactionError::InvalidCount {
            text: text.to_string(),
        })
}

pub fn format_count(count: u64, reaction: Reaction) -> String {
    format!("{} {}", count, reaction.label())
}

/// Id of the element showing a post's counter: `post_<id>_likes` / `post_<id>_dislikes`.
pub fn element_id(post_id: &PostId, reaction: Reaction) -> String {
    format!("post_{}_{}", post_id, reaction.element_suffix())
}
