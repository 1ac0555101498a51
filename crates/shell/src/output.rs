use domain::{ids::time_ago, post_stats, protocol::Attachment, Comment};
use serde_json::{json, Value};
use session::{ReaderView, Session};

const MASK: &str = "[sensitive content]";

fn comment_json(c: &Comment, now: i64) -> Value {
    let gate = session::view::RevealGate::for_tags(&c.tags);
    let text = if gate.obscured() { MASK } else { c.text.as_str() };
    let attachment = c.image.as_deref().and_then(|raw| Attachment::parse(raw).ok()).map(|a| {
        json!({
            "kind": a.kind(),
            "label": a.kind().label(),
            "subtype": a.subtype_label(),
            "inline": a.kind().is_inline(),
        })
    });
    json!({
        "id": c.id,
        "author": c.author,
        "text": text,
        "age": time_ago(c.timestamp, now),
        "edited": !c.edit_history.is_empty(),
        "attachment": attachment,
        "replies": c.replies.iter().map(|r| comment_json(r, now)).collect::<Vec<_>>(),
    })
}

fn reader_json(view: &ReaderView, now: i64) -> Value {
    let body = if view.gate.obscured() { MASK } else { view.body.as_str() };
    json!({
        "key": view.interaction_key,
        "thread": view.is_thread,
        "title": view.title,
        "author": view.author,
        "body": body,
        "votes": view.votes,
        "user_vote": view.user_vote,
        "stats": post_stats(&view.comments),
        "comments": view.comments.iter().map(|c| comment_json(c, now)).collect::<Vec<_>>(),
    })
}

/// Final state printed once the input is exhausted.
pub fn summary(session: &Session, now: i64) -> Value {
    json!({
        "summary": {
            "mode": session.nav.mode,
            "theme": session.nav.theme(),
            "classic_theme": session.nav.classic_theme(),
            "posts": session.store.posts().len(),
            "my_posts": session.store.posts_by(session.store.local_user()).count(),
            "reader": session.reader_view().map(|v| reader_json(&v, now)),
        }
    })
}
