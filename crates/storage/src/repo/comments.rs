use crate::{models::CommentNode, Result, Store, StoreError};
use domain::{ids, post_stats, thread_stats, Comment, EditSnapshot, ThreadStats};
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct NewComment {
    pub text: String,
    pub image: Option<String>,
    pub parent_id: Option<String>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    Edited(Comment),
    /// The new text matched the current text; history was left alone.
    Unchanged,
}

impl Store {
    /// Adds a root comment (newest first) or appends a reply to `parent_id`.
    ///
    /// The parent must live under the same key. When it does not, nothing in
    /// the tree changes and `CommentNotFound` is returned.
    pub fn add_comment(&mut self, key: &str, new: NewComment) -> Result<Comment> {
        self.ensure_interaction(key);

        if let Some(pid) = new.parent_id.as_deref() {
            if self.node_in(key, pid).is_none() {
                return Err(StoreError::CommentNotFound {
                    key: key.to_string(),
                    comment_id: pid.to_string(),
                });
            }
        }

        let timestamp = self.clock.tick();
        let id = self.mint_comment_id(timestamp);
        let node = CommentNode {
            id: id.clone(),
            key: key.to_string(),
            parent: new.parent_id,
            author: self.local_user.clone(),
            text: new.text,
            timestamp,
            image: new.image,
            tags: new.tags,
            replies: Vec::new(),
            edit_history: Vec::new(),
        };
        self.insert_node(node);
        debug!(key, id = %id, "comment added");

        self.materialize(&id).ok_or(StoreError::CommentNotFound {
            key: key.to_string(),
            comment_id: id,
        })
    }

    pub fn edit_comment(&mut self, key: &str, comment_id: &str, new_text: &str) -> Result<EditOutcome> {
        let timestamp = self.clock.tick();
        let node = self
            .nodes
            .get_mut(comment_id)
            .filter(|n| n.key == key)
            .ok_or_else(|| StoreError::CommentNotFound {
                key: key.to_string(),
                comment_id: comment_id.to_string(),
            })?;

        if node.text == new_text {
            return Ok(EditOutcome::Unchanged);
        }

        let previous = std::mem::replace(&mut node.text, new_text.to_string());
        node.edit_history.insert(
            0,
            EditSnapshot {
                text: previous,
                image: node.image.clone(),
                timestamp,
            },
        );
        debug!(key, comment_id, revisions = node.edit_history.len(), "comment edited");

        Ok(self
            .materialize(comment_id)
            .map(EditOutcome::Edited)
            .unwrap_or(EditOutcome::Unchanged))
    }

    pub fn find_comment(&self, key: &str, comment_id: &str) -> Option<Comment> {
        self.node_in(key, comment_id)?;
        self.materialize(comment_id)
    }

    /// Root comments for `key`, newest first.
    pub fn comments(&self, key: &str) -> Vec<Comment> {
        self.interactions
            .get(key)
            .map(|r| r.roots.iter().filter_map(|id| self.materialize(id)).collect())
            .unwrap_or_default()
    }

    pub fn thread_stats(&self, key: &str, comment_id: &str) -> Option<ThreadStats> {
        self.find_comment(key, comment_id).map(|c| thread_stats(&c))
    }

    pub fn post_stats(&self, key: &str) -> ThreadStats {
        post_stats(&self.comments(key))
    }

    pub(crate) fn node_in(&self, key: &str, comment_id: &str) -> Option<&CommentNode> {
        self.nodes.get(comment_id).filter(|n| n.key == key)
    }

    /// Links `node` under its parent (appended) or at the head of its key's
    /// root list. The caller guarantees the parent exists.
    pub(crate) fn insert_node(&mut self, node: CommentNode) {
        match node.parent.as_deref() {
            Some(pid) => {
                if let Some(parent) = self.nodes.get_mut(pid) {
                    parent.replies.push(node.id.clone());
                }
            }
            None => {
                let ts = node.timestamp;
                let record = self.ensure_interaction_at(&node.key, ts);
                record.roots.insert(0, node.id.clone());
            }
        }
        self.nodes.insert(node.id.clone(), node);
    }

    pub(crate) fn materialize(&self, comment_id: &str) -> Option<Comment> {
        let n = self.nodes.get(comment_id)?;
        Some(Comment {
            id: n.id.clone(),
            author: n.author.clone(),
            text: n.text.clone(),
            timestamp: n.timestamp,
            image: n.image.clone(),
            tags: n.tags.clone(),
            replies: n.replies.iter().filter_map(|r| self.materialize(r)).collect(),
            edit_history: n.edit_history.clone(),
        })
    }

    pub(crate) fn mint_comment_id(&mut self, timestamp: i64) -> String {
        loop {
            let id = ids::comment_id(timestamp, &mut self.rng);
            if !self.nodes.contains_key(&id) {
                return id;
            }
        }
    }
}
