use crate::{catalog, models::InteractionRecord, Result, Store, StoreError};
use domain::{ids, ContentRef, EditSnapshot, PostDraft, UserPost, Vote};
use tracing::debug;

impl Store {
    /// Publishes a post from the local user and self-upvotes it.
    pub fn create_post(&mut self, draft: PostDraft) -> UserPost {
        let timestamp = self.clock.tick();
        let post = UserPost {
            id: ids::post_id(timestamp),
            title: draft.title,
            body: draft.body,
            category: draft.category,
            author: self.local_user.clone(),
            timestamp,
            image: draft.image,
            tags: draft.tags,
            edit_history: Vec::new(),
        };

        let mut record = InteractionRecord::new(timestamp);
        record.votes = 1;
        record.user_vote = Vote::Up;
        self.interactions.insert(post.id.clone(), record);
        self.posts.insert(0, post.clone());

        debug!(id = %post.id, category = %post.category, "post created");
        post
    }

    /// Replaces title, body, image and tags. The category given in `draft` is
    /// ignored; a post keeps the category it was created with.
    pub fn update_post(&mut self, id: &str, draft: PostDraft) -> Result<UserPost> {
        let timestamp = self.clock.tick();
        let post = self
            .posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::PostNotFound(id.to_string()))?;

        if post.body != draft.body || post.image != draft.image {
            post.edit_history.insert(
                0,
                EditSnapshot {
                    text: post.body.clone(),
                    image: post.image.clone(),
                    timestamp,
                },
            );
        }
        post.title = draft.title;
        post.body = draft.body;
        post.image = draft.image;
        post.tags = draft.tags;

        debug!(id, revisions = post.edit_history.len(), "post updated");
        Ok(post.clone())
    }

    /// User posts, newest first.
    pub fn posts(&self) -> &[UserPost] {
        &self.posts
    }

    /// Posts written by `author`, newest first; backs the profile view.
    pub fn posts_by<'a>(&'a self, author: &'a str) -> impl Iterator<Item = &'a UserPost> + 'a {
        self.posts.iter().filter(move |p| p.author == author)
    }

    pub fn post(&self, id: &str) -> Option<&UserPost> {
        self.posts.iter().find(|p| p.id == id)
    }

    /// Resolves a reader key: user posts (by id, then title) win over static
    /// articles, which win over resource items.
    pub fn resolve(&self, key: &str) -> Option<ContentRef> {
        if let Some(p) = self.posts.iter().find(|p| p.id == key || p.title == key) {
            return Some(ContentRef::UserPost(p.clone()));
        }
        if let Some(a) = catalog::article(key) {
            return Some(ContentRef::StaticArticle {
                key: a.key.to_string(),
                title: a.title.to_string(),
                body: a.body.to_string(),
            });
        }
        catalog::resource(key).map(|(group, r)| ContentRef::ResourceItem {
            group: group.to_string(),
            title: r.title.to_string(),
            desc: r.desc.to_string(),
            link: r.link.to_string(),
        })
    }
}
