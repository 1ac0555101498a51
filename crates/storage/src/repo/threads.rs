use crate::Store;
use domain::{thread_stats, Comment, ThreadStats};
use serde::Serialize;

/// A comment promoted to the root of its own thread. Its replies are shown as
/// a root list under a header built from the comment itself.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThreadView {
    pub post_id: String,
    pub title: String,
    pub root: Comment,
    pub stats: ThreadStats,
}

impl ThreadView {
    pub fn replies(&self) -> &[Comment] {
        &self.root.replies
    }
}

impl Store {
    /// Points at the live comment; nothing is copied into the store.
    pub fn thread(&self, post_id: &str, comment_id: &str) -> Option<ThreadView> {
        let root = self.find_comment(post_id, comment_id)?;
        Some(ThreadView {
            post_id: post_id.to_string(),
            title: format!("Thread by @{}", root.author),
            stats: thread_stats(&root),
            root,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::{NewComment, Store, StoreConfig};

    #[test]
    fn test_thread_tracks_live_replies() {
        let mut s = Store::new(&StoreConfig::default());
        let root = s
            .add_comment("Arts", NewComment { text: "root".to_string(), ..Default::default() })
            .unwrap();
        assert!(s.thread("Arts", &root.id).unwrap().replies().is_empty());

        s.add_comment(
            "Arts",
            NewComment {
                text: "reply".to_string(),
                parent_id: Some(root.id.clone()),
                ..Default::default()
            },
        )
        .unwrap();

        let view = s.thread("Arts", &root.id).unwrap();
        assert_eq!(view.title, "Thread by @guest_user");
        assert_eq!(view.replies().len(), 1);
        assert_eq!(view.stats.count, 1);
        assert!(s.thread("Club", &root.id).is_none());
    }
}
