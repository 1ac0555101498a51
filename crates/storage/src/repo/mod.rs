pub mod comments;
pub mod feed;
pub mod history;
pub mod interactions;
pub mod posts;
pub mod threads;
