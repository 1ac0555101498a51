use serde::{Deserialize, Serialize};
use std::fmt;

/// Tags that mark content as obscured-by-default.
pub const HAZARD_TAGS: [&str; 2] = ["nsfw", "dark_arts"];

pub fn is_hazard_tag(tag: &str) -> bool {
    HAZARD_TAGS.contains(&tag)
}

pub fn has_hazard<S: AsRef<str>>(tags: &[S]) -> bool {
    tags.iter().any(|t| is_hazard_tag(t.as_ref()))
}

/// The local user's vote on a piece of content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub enum Vote {
    Down,
    #[default]
    None,
    Up,
}

impl Vote {
    pub fn delta(self) -> i64 {
        match self {
            Vote::Down => -1,
            Vote::None => 0,
            Vote::Up => 1,
        }
    }
}

impl From<Vote> for i8 {
    fn from(v: Vote) -> Self {
        v.delta() as i8
    }
}

impl TryFrom<i8> for Vote {
    type Error = String;

    fn try_from(v: i8) -> Result<Self, Self::Error> {
        match v {
            -1 => Ok(Vote::Down),
            0 => Ok(Vote::None),
            1 => Ok(Vote::Up),
            other => Err(format!("vote must be -1, 0 or 1 (got {})", other)),
        }
    }
}

impl fmt::Display for Vote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.delta())
    }
}

/// Content as it was before an edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditSnapshot {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub timestamp: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub author: String,
    pub text: String,
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub replies: Vec<Comment>,
    #[serde(default)]
    pub edit_history: Vec<EditSnapshot>,
}

impl Comment {
    pub fn is_hazard(&self) -> bool {
        has_hazard(&self.tags)
    }

    /// Depth-first search through this comment and its descendants.
    pub fn find(&self, id: &str) -> Option<&Comment> {
        if self.id == id {
            return Some(self);
        }
        self.replies.iter().find_map(|r| r.find(id))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostInteraction {
    pub votes: i64,
    pub user_vote: Vote,
    pub comments: Vec<Comment>,
    pub timestamp: i64,
}

impl PostInteraction {
    pub fn empty(timestamp: i64) -> Self {
        Self {
            votes: 0,
            user_vote: Vote::None,
            comments: Vec::new(),
            timestamp,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPost {
    pub id: String,
    pub title: String,
    pub body: String,
    pub category: String,
    pub author: String,
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub edit_history: Vec<EditSnapshot>,
}

impl UserPost {
    pub fn is_hazard(&self) -> bool {
        has_hazard(&self.tags)
    }
}

/// Input for creating or updating a post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDraft {
    pub title: String,
    pub body: String,
    pub category: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// What an interaction key points at, resolved once per lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentRef {
    StaticArticle {
        key: String,
        title: String,
        body: String,
    },
    UserPost(UserPost),
    ResourceItem {
        group: String,
        title: String,
        desc: String,
        link: String,
    },
}

impl ContentRef {
    /// The key this content's interaction record lives under.
    pub fn interaction_key(&self) -> &str {
        match self {
            ContentRef::StaticArticle { key, .. } => key,
            ContentRef::UserPost(p) => &p.id,
            ContentRef::ResourceItem { title, .. } => title,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            ContentRef::StaticArticle { title, .. } => title,
            ContentRef::UserPost(p) => &p.title,
            ContentRef::ResourceItem { title, .. } => title,
        }
    }

    pub fn tags(&self) -> &[String] {
        match self {
            ContentRef::UserPost(p) => &p.tags,
            _ => &[],
        }
    }
}
