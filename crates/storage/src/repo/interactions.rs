use crate::{models::InteractionRecord, Store};
use domain::{PostInteraction, Vote};
use tracing::debug;

impl Store {
    /// Applies the local user's vote. Repeating the current direction
    /// retracts it; any other direction replaces it. `Vote::None` clears.
    ///
    /// Returns the new `(votes, user_vote)` pair.
    pub fn vote(&mut self, key: &str, direction: Vote) -> (i64, Vote) {
        let record = self.ensure_interaction(key);
        if record.user_vote == direction {
            record.votes -= direction.delta();
            record.user_vote = Vote::None;
        } else {
            record.votes = record.votes - record.user_vote.delta() + direction.delta();
            record.user_vote = direction;
        }
        debug!(key, votes = record.votes, user_vote = %record.user_vote, "vote applied");
        (record.votes, record.user_vote)
    }

    pub fn interaction(&self, key: &str) -> Option<PostInteraction> {
        self.interactions
            .get(key)
            .map(|r| r.to_interaction(self.comments(key)))
    }

    pub fn interaction_keys(&self) -> impl Iterator<Item = &str> {
        self.interactions.keys().map(String::as_str)
    }

    pub(crate) fn ensure_interaction(&mut self, key: &str) -> &mut InteractionRecord {
        let now = self.clock.tick();
        self.ensure_interaction_at(key, now)
    }

    pub(crate) fn ensure_interaction_at(&mut self, key: &str, timestamp: i64) -> &mut InteractionRecord {
        self.interactions
            .entry(key.to_string())
            .or_insert_with(|| InteractionRecord::new(timestamp))
    }
}
