use domain::{EditSnapshot, PostInteraction, Vote};

/// Arena record for one comment. Tree edges are ids, never owned children.
pub struct CommentNode {
    pub id: String,
    pub key: String,
    pub parent: Option<String>,
    pub author: String,
    pub text: String,
    pub timestamp: i64,
    pub image: Option<String>,
    pub tags: Vec<String>,
    pub replies: Vec<String>,
    pub edit_history: Vec<EditSnapshot>,
}

pub struct InteractionRecord {
    pub votes: i64,
    pub user_vote: Vote,
    /// Root comment ids, newest first.
    pub roots: Vec<String>,
    pub timestamp: i64,
}

impl InteractionRecord {
    pub fn new(timestamp: i64) -> Self {
        Self {
            votes: 0,
            user_vote: Vote::None,
            roots: Vec::new(),
            timestamp,
        }
    }

    // comments 由调用方从 arena 物化
    pub fn to_interaction(&self, comments: Vec<domain::Comment>) -> PostInteraction {
        PostInteraction {
            votes: self.votes,
            user_vote: self.user_vote,
            comments,
            timestamp: self.timestamp,
        }
    }
}
