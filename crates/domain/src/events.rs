use crate::commands::InterfaceMode;
use crate::models::{Comment, UserPost, Vote};
use serde::Serialize;

/// Broadcast after a command has been applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum StoreEvent {
    VoteCast {
        key: String,
        votes: i64,
        user_vote: Vote,
    },
    CommentAdded {
        key: String,
        parent_id: Option<String>,
        comment: Comment,
    },
    CommentEdited {
        key: String,
        comment: Comment,
    },
    PostCreated {
        post: UserPost,
    },
    PostUpdated {
        post: UserPost,
    },
    AttachmentReady {
        mime: String,
        bytes: usize,
    },
    ViewChanged {
        mode: InterfaceMode,
        theme: String,
        reader: Option<String>,
        spin_off: Option<(String, String)>,
        post_modal_open: bool,
    },
}
