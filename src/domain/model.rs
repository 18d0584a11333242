use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Opaque post identifier, as embedded in `post_<id>_likes` element ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(String);

impl PostId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PostId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<u64> for PostId {
    fn from(id: u64) -> Self {
        Self::new(id.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reaction {
    Like,
    Dislike,
}

impl Reaction {
    /// Label appended to the rendered counter.
    pub fn label(self) -> &'static str {
        match self {
            Reaction::Like => "Likes",
            Reaction::Dislike => "Dislikes",
        }
    }

    pub fn element_suffix(self) -> &'static str {
        match self {
            Reaction::Like => "likes",
            Reaction::Dislike => "dislikes",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Reaction::Like => "like-count",
            Reaction::Dislike => "dislike-count",
        }
    }

    pub fn default_path(self) -> &'static str {
        match self {
            Reaction::Like => "/like",
            Reaction::Dislike => "/dislike",
        }
    }
}

impl fmt::Display for Reaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reaction::Like => f.write_str("like"),
            Reaction::Dislike => f.write_str("dislike"),
        }
    }
}

fn default_visible() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub dislikes: u64,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

impl Post {
    pub fn new(id: impl Into<PostId>, likes: u64, dislikes: u64) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            content: String::new(),
            likes,
            dislikes,
            visible: true,
        }
    }

    pub fn with_text(mut self, title: impl Into<String>, content: impl Into<String>) -> Self {
        self.title = title.into();
        self.content = content.into();
        self
    }

    pub fn count(&self, reaction: Reaction) -> u64 {
        match reaction {
            Reaction::Like => self.likes,
            Reaction::Dislike => self.dislikes,
        }
    }

    pub(crate) fn count_mut(&mut self, reaction: Reaction) -> &mut u64 {
        match reaction {
            Reaction::Like => &mut self.likes,
            Reaction::Dislike => &mut self.dislikes,
        }
    }
}

/// Value of the `#filterSelect` control.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FilterMode {
    #[default]
    All,
    Liked,
    Disliked,
    /// Unrecognised select value; filtering leaves visibility untouched.
    Other(String),
}

impl FilterMode {
    pub fn from_value(value: &str) -> Self {
        match value {
            "all" => FilterMode::All,
            "liked" => FilterMode::Liked,
            "disliked" => FilterMode::Disliked,
            other => FilterMode::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            FilterMode::All => "all",
            FilterMode::Liked => "liked",
            FilterMode::Disliked => "disliked",
            FilterMode::Other(value) => value,
        }
    }
}

impl FromStr for FilterMode {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::from_value(s))
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Numeric threshold read from the `#filterInput` text field.
///
/// Parsing takes an optional sign and the leading run of digits, ignoring
/// anything after them. Text without a leading number yields a threshold
/// that is not a number, and every count compares as not greater than it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Threshold(Option<i64>);

impl Threshold {
    pub fn new(value: i64) -> Self {
        Self(Some(value))
    }

    pub fn not_a_number() -> Self {
        Self(None)
    }

    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim_start();
        let (negative, rest) = match trimmed.as_bytes().first() {
            Some(b'-') => (true, &trimmed[1..]),
            Some(b'+') => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };

        let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
        if digits_len == 0 {
            return Self(None);
        }

        let digits = &rest[..digits_len];
        let value = match digits.parse::<i64>() {
            Ok(v) if negative => -v,
            Ok(v) => v,
            Err(_) if negative => i64::MIN,
            Err(_) => i64::MAX,
        };
        Self(Some(value))
    }

    pub fn value(&self) -> Option<i64> {
        self.0
    }

    pub fn is_nan(&self) -> bool {
        self.0.is_none()
    }

    /// Strict `count > threshold`; always false when not a number.
    pub fn is_exceeded_by(&self, count: u64) -> bool {
        match self.0 {
            Some(t) => i128::from(count) > i128::from(t),
            None => false,
        }
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(v) => write!(f, "{}", v),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterCriteria {
    pub mode: FilterMode,
    pub threshold: Threshold,
}

impl FilterCriteria {
    pub fn new(mode: FilterMode, threshold: Threshold) -> Self {
        Self { mode, threshold }
    }

    /// Builds criteria from the raw values of the select control and the text input.
    pub fn from_inputs(select_value: &str, input_value: &str) -> Self {
        Self {
            mode: FilterMode::from_value(select_value),
            threshold: Threshold::parse(input_value),
        }
    }
}
