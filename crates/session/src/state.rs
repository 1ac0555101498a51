use crate::{attachments::PendingInput, navigation::Navigation, view::RevealGate};
use domain::{Comment, ContentRef, Vote};
use storage::Store;

/// Everything the event loop owns: committed data, view state and
/// uncommitted input.
pub struct Session {
    pub store: Store,
    pub nav: Navigation,
    pub pending: PendingInput,
}

/// What the reader modal shows right now.
#[derive(Debug, Clone)]
pub struct ReaderView {
    pub interaction_key: String,
    pub title: String,
    pub author: Option<String>,
    pub body: String,
    pub image: Option<String>,
    pub comments: Vec<Comment>,
    pub votes: i64,
    pub user_vote: Vote,
    /// Spin-off thread rather than a post.
    pub is_thread: bool,
    pub gate: RevealGate,
}

impl Session {
    pub fn new(store: Store) -> Self {
        Self {
            store,
            nav: Navigation::new(),
            pending: PendingInput::default(),
        }
    }

    /// Where a comment typed into the reader goes: the interaction key, and
    /// the spun-off comment as parent when a thread is showing.
    pub fn comment_target(&self) -> Option<(String, Option<String>)> {
        if let Some(t) = self.nav.spin_off() {
            return Some((t.post_id.clone(), Some(t.comment_id.clone())));
        }
        let key = self.nav.reader()?;
        let key = self
            .store
            .resolve(key)
            .map(|c| c.interaction_key().to_string())
            .unwrap_or_else(|| key.to_string());
        Some((key, None))
    }

    pub fn reader_view(&self) -> Option<ReaderView> {
        if let Some(t) = self.nav.spin_off() {
            let (votes, user_vote) = self.tally(&t.post_id);
            let view = match self.store.thread(&t.post_id, &t.comment_id) {
                Some(thread) => ReaderView {
                    interaction_key: t.post_id.clone(),
                    title: thread.title.clone(),
                    author: Some(thread.root.author.clone()),
                    body: thread.root.text.clone(),
                    image: thread.root.image.clone(),
                    gate: RevealGate::for_tags(&thread.root.tags),
                    comments: thread.root.replies,
                    votes,
                    user_vote,
                    is_thread: true,
                },
                None => not_found(&t.post_id, "Comment not found.", true),
            };
            return Some(view);
        }

        let key = self.nav.reader()?;
        let Some(content) = self.store.resolve(key) else {
            return Some(not_found(key, "Content not found.", false));
        };
        let interaction_key = content.interaction_key().to_string();
        let (votes, user_vote) = self.tally(&interaction_key);
        let comments = self.store.comments(&interaction_key);
        let gate = RevealGate::for_tags(content.tags());

        let (title, author, body, image) = match content {
            ContentRef::UserPost(p) => (p.title, Some(p.author), p.body, p.image),
            ContentRef::StaticArticle { title, body, .. } => (title, None, body, None),
            ContentRef::ResourceItem { title, desc, .. } => (title, None, desc, None),
        };
        Some(ReaderView {
            interaction_key,
            title,
            author,
            body,
            image,
            comments,
            votes,
            user_vote,
            is_thread: false,
            gate,
        })
    }

    fn tally(&self, key: &str) -> (i64, Vote) {
        self.store
            .interaction(key)
            .map(|i| (i.votes, i.user_vote))
            .unwrap_or((0, Vote::None))
    }
}

fn not_found(key: &str, body: &str, is_thread: bool) -> ReaderView {
    ReaderView {
        interaction_key: key.to_string(),
        title: String::new(),
        author: None,
        body: body.to_string(),
        image: None,
        comments: Vec::new(),
        votes: 0,
        user_vote: Vote::None,
        is_thread,
        gate: RevealGate::for_tags::<&str>(&[]),
    }
}
