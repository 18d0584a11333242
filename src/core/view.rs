use crate::core::counter::{element_id, format_count};
use crate::domain::model::{FilterCriteria, FilterMode, Post, PostId, Reaction};
use crate::utils::error::{ReactionError, Result};
use regex::Regex;
use std::fmt::Write;
use std::sync::LazyLock;

static LIST_ITEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<li\b([^>]*)>(.*?)</li\s*>").expect("list item pattern")
});
static TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<(/?)([a-zA-Z][a-zA-Z0-9-]*)\b([^>]*?)(/?)>").expect("tag pattern")
});
static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?:^|\s)([a-zA-Z_:][-a-zA-Z0-9_:.]*)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+)))?"#,
    )
    .expect("attribute pattern")
});
static HIDDEN_STYLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"display\s*:\s*none").expect("style pattern"));

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// A list item as read from server-rendered markup, counters still as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPost {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub like_text: String,
    pub dislike_text: String,
    pub visible: bool,
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn unescape_html(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

fn display_style(visible: bool) -> &'static str {
    if visible {
        "display: block"
    } else {
        "display: none"
    }
}

pub fn render_post(post: &Post) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "  <li class=\"post\" style=\"{}\">",
        display_style(post.visible)
    );
    let _ = writeln!(
        out,
        "    <h3 class=\"post-title\">{}</h3>",
        escape_html(&post.title)
    );
    let _ = writeln!(
        out,
        "    <p class=\"post-content\">{}</p>",
        escape_html(&post.content)
    );
    for reaction in [Reaction::Like, Reaction::Dislike] {
        let _ = writeln!(
            out,
            "    <span id=\"{}\" class=\"{}\">{}</span>",
            escape_html(&element_id(&post.id, reaction)),
            reaction.css_class(),
            format_count(post.count(reaction), reaction)
        );
    }
    out.push_str("  </li>\n");
    out
}

/// Renders the whole post list from the board state.
pub fn render_list(posts: &[Post]) -> String {
    let mut out = String::from("<ul id=\"postList\">\n");
    for post in posts {
        out.push_str(&render_post(post));
    }
    out.push_str("</ul>\n");
    out
}

pub fn render_filter_controls(criteria: &FilterCriteria) -> String {
    let mut out = String::from("<select id=\"filterSelect\">\n");
    for mode in [FilterMode::All, FilterMode::Liked, FilterMode::Disliked] {
        let selected = if mode == criteria.mode { " selected" } else { "" };
        let _ = writeln!(
            out,
            "  <option value=\"{}\"{}>{}</option>",
            mode.as_str(),
            selected,
            mode.as_str()
        );
    }
    out.push_str("</select>\n");
    let _ = writeln!(
        out,
        "<input id=\"filterInput\" type=\"text\" value=\"{}\">",
        criteria.threshold
    );
    out
}

struct Element {
    id: Option<String>,
    text: String,
}

/// Attribute value by name; double-quoted, single-quoted and unquoted values are accepted.
fn attribute(attrs: &str, name: &str) -> Option<String> {
    ATTRIBUTE
        .captures_iter(attrs)
        .find(|caps| caps[1].eq_ignore_ascii_case(name))
        .map(|caps| {
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map_or("", |m| m.as_str());
            unescape_html(value)
        })
}

fn is_void(name: &str) -> bool {
    VOID_ELEMENTS.iter().any(|v| v.eq_ignore_ascii_case(name))
}

/// Concatenated text of every descendant of the element whose start tag
/// ends at `start`, the way `textContent` reads it.
fn text_content(body: &str, start: usize) -> String {
    let rest = &body[start..];
    let mut text = String::new();
    let mut depth = 0usize;
    let mut cursor = 0;

    for tag in TAG.captures_iter(rest) {
        let Some(whole) = tag.get(0) else { continue };
        text.push_str(&rest[cursor..whole.start()]);
        cursor = whole.end();

        if !tag[1].is_empty() {
            if depth == 0 {
                return unescape_html(&text);
            }
            depth -= 1;
        } else if tag[4].is_empty() && !is_void(&tag[2]) {
            depth += 1;
        }
    }

    text.push_str(&rest[cursor..]);
    unescape_html(&text)
}

fn find_by_class(body: &str, class: &str) -> Option<Element> {
    TAG.captures_iter(body).find_map(|tag| {
        if !tag[1].is_empty() {
            return None;
        }
        let attrs = tag.get(3)?.as_str();
        let classes = attribute(attrs, "class")?;
        if !classes.split_whitespace().any(|c| c == class) {
            return None;
        }

        let text = if tag[4].is_empty() && !is_void(&tag[2]) {
            text_content(body, tag.get(0)?.end())
        } else {
            String::new()
        };
        Some(Element {
            id: attribute(attrs, "id"),
            text,
        })
    })
}

fn post_id_from_element(element_id: &str, reaction: Reaction) -> Option<PostId> {
    let suffix = format!("_{}", reaction.element_suffix());
    element_id
        .strip_prefix("post_")?
        .strip_suffix(suffix.as_str())
        .filter(|id| !id.is_empty())
        .map(PostId::new)
}

/// Reads every `<li>` of a rendered page. Each item must carry one
/// `.like-count` and one `.dislike-count` element; the like counter's
/// `post_<id>_likes` id names the post.
pub fn parse_rendered_list(html: &str) -> Result<Vec<RenderedPost>> {
    let mut items = Vec::new();

    for (index, caps) in LIST_ITEM.captures_iter(html).enumerate() {
        let attrs = caps.get(1).map_or("", |m| m.as_str());
        let body = caps.get(2).map_or("", |m| m.as_str());

        let like = find_by_class(body, Reaction::Like.css_class()).ok_or_else(|| {
            ReactionError::element_not_found(format!(
                ".{} in list item {}",
                Reaction::Like.css_class(),
                index
            ))
        })?;
        let id = like
            .id
            .as_deref()
            .and_then(|id| post_id_from_element(id, Reaction::Like))
            .ok_or_else(|| {
                ReactionError::element_not_found(format!(
                    "post_<id>_likes in list item {}",
                    index
                ))
            })?;
        let dislike = find_by_class(body, Reaction::Dislike.css_class())
            .ok_or_else(|| ReactionError::element_not_found(element_id(&id, Reaction::Dislike)))?;

        let title = find_by_class(body, "post-title").map_or(String::new(), |e| e.text);
        let content = find_by_class(body, "post-content").map_or(String::new(), |e| e.text);
        let hidden = attribute(attrs, "style").is_some_and(|style| HIDDEN_STYLE.is_match(&style));

        items.push(RenderedPost {
            id,
            title,
            content,
            like_text: like.text.trim().to_string(),
            dislike_text: dislike.text.trim().to_string(),
            visible: !hidden,
        });
    }

    tracing::debug!("Parsed {} list items from rendered page", items.len());
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::counter::parse_count;

    const PAGE: &str = r#"
<ul>
  <li>
    <h3 class="post-title">First &amp; best</h3>
    <span id="post_1_likes" class="like-count">5 Likes</span>
    <span id="post_1_dislikes" class="dislike-count">2 Dislikes</span>
  </li>
  <li style="display: none">
    <span class="count like-count" id="post_abc_likes">0 Likes</span>
    <span class="dislike-count" id="post_abc_dislikes"> 9 Dislikes </span>
  </li>
</ul>
"#;

    #[test]
    fn test_parse_rendered_list() {
        let items = parse_rendered_list(PAGE).unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id.as_str(), "1");
        assert_eq!(items[0].title, "First & best");
        assert_eq!(items[0].like_text, "5 Likes");
        assert_eq!(items[0].dislike_text, "2 Dislikes");
        assert!(items[0].visible);

        assert_eq!(items[1].id.as_str(), "abc");
        assert_eq!(items[1].dislike_text, "9 Dislikes");
        assert!(!items[1].visible);
    }

    #[test]
    fn test_parse_does_not_confuse_like_and_dislike_classes() {
        let html = r#"<li><span id="post_3_dislikes" class="dislike-count">1 Dislikes</span>
            <span id="post_3_likes" class="like-count">4 Likes</span></li>"#;

        let items = parse_rendered_list(html).unwrap();
        assert_eq!(items[0].like_text, "4 Likes");
        assert_eq!(items[0].dislike_text, "1 Dislikes");
    }

    #[test]
    fn test_counter_text_spans_nested_tags() {
        let html = r#"<li>
            <span id="post_1_likes" class="like-count"><b>5</b> Likes</span>
            <span id="post_1_dislikes" class="dislike-count"><i>0</i><br> Dislikes</span>
        </li>"#;

        let items = parse_rendered_list(html).unwrap();
        assert_eq!(items[0].like_text, "5 Likes");
        assert_eq!(items[0].dislike_text, "0 Dislikes");
        assert_eq!(parse_count(&items[0].like_text).unwrap(), 5);
    }

    #[test]
    fn test_single_quoted_and_unquoted_attributes() {
        let html = r#"<LI STYLE='display:none'>
            <span id='post_2_likes' class=like-count>3 Likes</span>
            <span id=post_2_dislikes class='count dislike-count'>1 Dislikes</span>
        </LI>"#;

        let items = parse_rendered_list(html).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id.as_str(), "2");
        assert_eq!(items[0].like_text, "3 Likes");
        assert_eq!(items[0].dislike_text, "1 Dislikes");
        assert!(!items[0].visible);
    }

    #[test]
    fn test_missing_counter_is_element_not_found() {
        let html = r#"<li><span id="post_7_likes" class="like-count">1 Likes</span></li>"#;
        match parse_rendered_list(html) {
            Err(ReactionError::ElementNotFound { element }) => {
                assert_eq!(element, "post_7_dislikes")
            }
            other => panic!("expected ElementNotFound, got {:?}", other),
        }

        let html = r#"<li><span class="dislike-count">1 Dislikes</span></li>"#;
        assert!(matches!(
            parse_rendered_list(html),
            Err(ReactionError::ElementNotFound { .. })
        ));
    }

    #[test]
    fn test_render_list_projects_state() {
        let mut hidden = Post::new("2", 0, 1).with_text("<script>", "body");
        hidden.visible = false;
        let posts = vec![Post::new("1", 5, 0).with_text("Hello", "World"), hidden];

        let html = render_list(&posts);

        assert!(html.contains(r#"<span id="post_1_likes" class="like-count">5 Likes</span>"#));
        assert!(html.contains(r#"<span id="post_2_dislikes" class="dislike-count">1 Dislikes</span>"#));
        assert!(html.contains(r#"<li class="post" style="display: none">"#));
        assert!(html.contains("&lt;script&gt;"));

        let reparsed = parse_rendered_list(&html).unwrap();
        assert_eq!(reparsed.len(), 2);
        assert_eq!(reparsed[1].title, "<script>");
        assert_eq!(parse_count(&reparsed[0].like_text).unwrap(), 5);
        assert!(!reparsed[1].visible);
    }

    #[test]
    fn test_render_filter_controls() {
        let html = render_filter_controls(&FilterCriteria::from_inputs("liked", "3"));

        assert!(html.contains(r#"<option value="liked" selected>liked</option>"#));
        assert!(html.contains(r#"<option value="all">all</option>"#));
        assert!(html.contains(r#"id="filterInput" type="text" value="3""#));
    }
}
