use crate::models::Comment;
use serde::Serialize;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ThreadStats {
    pub count: usize,
    pub contributors: usize,
    pub depth: usize,
    pub has_hazard: bool,
}

#[derive(Default)]
struct Walker<'a> {
    count: usize,
    authors: HashSet<&'a str>,
    depth: usize,
    has_hazard: bool,
}

impl<'a> Walker<'a> {
    fn visit(&mut self, c: &'a Comment, depth: usize) {
        self.count += 1;
        self.authors.insert(c.author.as_str());
        self.depth = self.depth.max(depth);
        self.has_hazard |= c.is_hazard();
        for r in &c.replies {
            self.visit(r, depth + 1);
        }
    }

    fn finish(self) -> ThreadStats {
        ThreadStats {
            count: self.count,
            contributors: self.authors.len(),
            depth: self.depth,
            has_hazard: self.has_hazard,
        }
    }
}

/// Aggregates over the descendants of `comment`. Only the hazard flag also
/// looks at `comment` itself.
pub fn thread_stats(comment: &Comment) -> ThreadStats {
    let mut w = Walker {
        has_hazard: comment.is_hazard(),
        ..Default::default()
    };
    for r in &comment.replies {
        w.visit(r, 1);
    }
    w.finish()
}

/// Aggregates over a whole root list; root comments sit at depth 1.
pub fn post_stats(comments: &[Comment]) -> ThreadStats {
    let mut w = Walker::default();
    for c in comments {
        w.visit(c, 1);
    }
    w.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(id: &str, author: &str, tags: &[&str], replies: Vec<Comment>) -> Comment {
        Comment {
            id: id.to_string(),
            author: author.to_string(),
            text: format!("text of {}", id),
            timestamp: 0,
            image: None,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            replies,
            edit_history: vec![],
        }
    }

    #[test]
    fn test_thread_stats_example() {
        let root = c(
            "root",
            "op",
            &[],
            vec![
                c("r1", "alice", &[], vec![c("r1a", "bob", &["nsfw"], vec![])]),
                c("r2", "alice", &[], vec![]),
            ],
        );
        let s = thread_stats(&root);
        assert_eq!(s.count, 3);
        assert_eq!(s.depth, 2);
        assert!(s.has_hazard);
        assert_eq!(s.contributors, 2);
    }

    #[test]
    fn test_thread_stats_leaf_and_self_hazard() {
        let s = thread_stats(&c("x", "op", &["dark_arts"], vec![]));
        assert_eq!(s, ThreadStats { count: 0, contributors: 0, depth: 0, has_hazard: true });
    }

    #[test]
    fn test_post_stats_counts_roots() {
        let list = vec![
            c("a", "op", &[], vec![c("a1", "zed", &[], vec![])]),
            c("b", "op", &[], vec![]),
        ];
        let s = post_stats(&list);
        assert_eq!(s.count, 3);
        assert_eq!(s.contributors, 2);
        assert_eq!(s.depth, 2);
        assert!(!s.has_hazard);

        assert_eq!(post_stats(&[]), ThreadStats::default());
    }
}
