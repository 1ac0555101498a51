use crate::Store;
use domain::{
    diff::{diff_words, DiffSegment},
    EditSnapshot,
};
use serde::Serialize;

/// One version of a comment or post body, newest first. `changes` is the word
/// diff from this version to the next newer one and is empty for the live
/// version.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Revision {
    pub text: String,
    pub image: Option<String>,
    pub timestamp: Option<i64>,
    pub current: bool,
    pub changes: Vec<DiffSegment>,
}

fn revisions(text: &str, image: Option<&String>, history: &[EditSnapshot]) -> Vec<Revision> {
    let mut out = vec![Revision {
        text: text.to_string(),
        image: image.cloned(),
        timestamp: None,
        current: true,
        changes: Vec::new(),
    }];
    let mut newer = text;
    for snap in history {
        out.push(Revision {
            text: snap.text.clone(),
            image: snap.image.clone(),
            timestamp: Some(snap.timestamp),
            current: false,
            changes: diff_words(&snap.text, newer),
        });
        newer = &snap.text;
    }
    out
}

impl Store {
    pub fn comment_revisions(&self, key: &str, comment_id: &str) -> Option<Vec<Revision>> {
        let n = self.node_in(key, comment_id)?;
        Some(revisions(&n.text, n.image.as_ref(), &n.edit_history))
    }

    pub fn post_revisions(&self, post_id: &str) -> Option<Vec<Revision>> {
        let p = self.post(post_id)?;
        Some(revisions(&p.body, p.image.as_ref(), &p.edit_history))
    }
}
