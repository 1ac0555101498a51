use domain::ids::MonotonicClock;
use rand::{rngs::StdRng, SeedableRng};
use std::collections::HashMap;
use thiserror::Error;

pub mod catalog;
mod models;
mod repo;
mod seed;

pub use repo::comments::{EditOutcome, NewComment};
pub use repo::feed::{FeedEntry, FeedSort};
pub use repo::history::Revision;
pub use repo::threads::ThreadView;

use models::{CommentNode, InteractionRecord};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("comment {comment_id} not found under {key}")]
    CommentNotFound { key: String, comment_id: String },
    #[error("post {0} not found")]
    PostNotFound(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Author recorded on everything created through the store.
    pub local_user: String,
    /// Fixed seed for ids and mock data; entropy when unset.
    pub rng_seed: Option<u64>,
    /// Keys without a hand-authored thread get a stock comment when a draw
    /// in [0, 1) exceeds this.
    pub comment_threshold: f64,
    pub vote_floor: i64,
    pub vote_span: i64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            local_user: "guest_user".to_string(),
            rng_seed: None,
            comment_threshold: 0.8,
            vote_floor: 10,
            vote_span: 500,
        }
    }
}

/// All mutable session data: comments, interactions and user posts.
pub struct Store {
    pub(crate) local_user: String,
    pub(crate) nodes: HashMap<String, CommentNode>,
    pub(crate) interactions: HashMap<String, InteractionRecord>,
    pub(crate) posts: Vec<domain::UserPost>,
    pub(crate) clock: MonotonicClock,
    pub(crate) rng: StdRng,
}

impl Store {
    /// An empty store with no catalog entries.
    pub fn new(config: &StoreConfig) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            local_user: config.local_user.clone(),
            nodes: HashMap::new(),
            interactions: HashMap::new(),
            posts: Vec::new(),
            clock: MonotonicClock::new(),
            rng,
        }
    }

    /// A store populated with the startup catalog and mock threads.
    pub fn seeded(config: &StoreConfig) -> Self {
        let mut store = Self::new(config);
        seed::populate(&mut store, config);
        store
    }

    pub fn local_user(&self) -> &str {
        &self.local_user
    }
}
