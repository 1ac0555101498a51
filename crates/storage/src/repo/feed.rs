use crate::{catalog, catalog::Section, Store};
use domain::{ids, ContentRef, Vote};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedSort {
    #[default]
    Hot,
    New,
    Top,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedEntry {
    pub content: ContentRef,
    pub author: String,
    pub votes: i64,
    pub user_vote: Vote,
    pub comment_count: usize,
    pub timestamp: i64,
}

impl FeedEntry {
    /// `(votes + 1) / (hours + 2)^1.5`
    pub fn hot_score(&self, now: i64) -> f64 {
        let hours = (now - self.timestamp) as f64 / 3_600_000.0;
        (self.votes + 1) as f64 / (hours + 2.0).powf(1.5)
    }
}

impl Store {
    pub fn feed(&self, section: &str, sort: FeedSort) -> Vec<FeedEntry> {
        self.feed_at(section, sort, ids::now_millis())
    }

    /// Entries for one navigation section followed by the user posts filed
    /// under it, ordered by `sort`. Unknown sections yield only user posts.
    pub fn feed_at(&self, section: &str, sort: FeedSort, now: i64) -> Vec<FeedEntry> {
        let mut entries = Vec::new();
        match catalog::section(section) {
            Some(Section::Single(key)) => entries.extend(self.static_entry(key, now)),
            Some(Section::List(keys)) => {
                entries.extend(keys.iter().filter_map(|k| self.static_entry(k, now)))
            }
            Some(Section::Grouped) => {
                // 资源条目与同名文章共用 key，这里不走 resolve
                for (group, items) in catalog::RESOURCE_GROUPS {
                    for r in items.iter() {
                        let content = ContentRef::ResourceItem {
                            group: group.to_string(),
                            title: r.title.to_string(),
                            desc: r.desc.to_string(),
                            link: r.link.to_string(),
                        };
                        entries.push(self.entry(content, "mod".to_string(), now));
                    }
                }
            }
            None => {}
        }

        for p in self.posts.iter().filter(|p| p.category == section) {
            entries.push(self.entry(ContentRef::UserPost(p.clone()), p.author.clone(), p.timestamp));
        }

        match sort {
            FeedSort::New => entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp)),
            FeedSort::Top => entries.sort_by(|a, b| b.votes.cmp(&a.votes)),
            FeedSort::Hot => {
                entries.sort_by(|a, b| b.hot_score(now).total_cmp(&a.hot_score(now)))
            }
        }
        entries
    }

    fn static_entry(&self, key: &str, now: i64) -> Option<FeedEntry> {
        let a = catalog::article(key)?;
        let content = ContentRef::StaticArticle {
            key: a.key.to_string(),
            title: a.title.to_string(),
            body: a.body.to_string(),
        };
        Some(self.entry(content, "admin".to_string(), now))
    }

    fn entry(&self, content: ContentRef, author: String, fallback_ts: i64) -> FeedEntry {
        let key = content.interaction_key().to_string();
        let (votes, user_vote, timestamp) = self
            .interactions
            .get(&key)
            .map(|r| (r.votes, r.user_vote, r.timestamp))
            .unwrap_or((0, Vote::None, fallback_ts));
        FeedEntry {
            comment_count: self.post_stats(&key).count,
            content,
            author,
            votes,
            user_vote,
            timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StoreConfig;
    use domain::PostDraft;

    fn store() -> Store {
        let mut s = Store::new(&StoreConfig::default());
        for (key, votes, ts) in [("Charter", 50, 1_000), ("Rules", 5, 9_000), ("FAQ", 20, 5_000)] {
            let r = s.ensure_interaction_at(key, ts);
            r.votes = votes;
        }
        s
    }

    fn titles(entries: &[FeedEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.content.interaction_key()).collect()
    }

    #[test]
    fn test_sorts() {
        let s = store();
        let now = 10_000;
        let new = s.feed_at("Information", FeedSort::New, now);
        assert_eq!(titles(&new), vec!["Contact", "Rules", "FAQ", "Charter"]);

        let top = s.feed_at("Information", FeedSort::Top, now);
        assert_eq!(titles(&top)[0], "Charter");
        assert_eq!(top.last().map(|e| e.votes), Some(0));
    }

    #[test]
    fn test_hot_prefers_fresh_over_stale() {
        let now = 100 * 3_600_000;
        let mut s = Store::new(&StoreConfig::default());
        s.ensure_interaction_at("Charter", 0).votes = 100;
        s.ensure_interaction_at("Rules", now).votes = 10;
        let hot = s.feed_at("Information", FeedSort::Hot, now);
        assert_eq!(hot[0].content.interaction_key(), "Rules");
    }

    #[test]
    fn test_user_posts_join_their_section() {
        let mut s = store();
        let p = s.create_post(PostDraft {
            title: "LoRA tips".to_string(),
            body: "tune the LR".to_string(),
            category: "Forums".to_string(),
            ..Default::default()
        });
        let forums = s.feed_at("Forums", FeedSort::New, 0);
        assert_eq!(forums.len(), 2);
        assert!(forums.iter().any(|e| e.content.interaction_key() == p.id && e.votes == 1));

        let resources = s.feed_at("Resources", FeedSort::Top, 0);
        assert_eq!(resources.len(), 6);
        assert!(resources.iter().all(|e| e.author == "mod"));
    }
}
