mod commands;
pub mod diff;
mod events;
pub mod ids;
mod models;
pub mod protocol;
pub mod stats;

pub use commands::{AppCommand, InterfaceMode};
pub use events::StoreEvent;
pub use models::{
    has_hazard, is_hazard_tag, Comment, ContentRef, EditSnapshot, PostDraft, PostInteraction,
    UserPost, Vote, HAZARD_TAGS,
};
pub use stats::{post_stats, thread_stats, ThreadStats};
