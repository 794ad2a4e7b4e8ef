use crate::core::RemovalNotifier;
use crate::models::Candidate;
use tokio::sync::watch;

/// Upstream candidate source for a deck session
///
/// Holds the last fetched feed and publishes every change to subscribers.
/// `None` means the feed has not been loaded yet, `Some(vec![])` that the
/// backend had no one left to show.
pub struct FeedStore {
    tx: watch::Sender<Option<Vec<Candidate>>>,
}

impl FeedStore {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx }
    }

    /// Replace the feed with a freshly fetched list
    pub fn set_feed(&self, candidates: Vec<Candidate>) {
        tracing::debug!("Feed replaced with {} candidates", candidates.len());
        self.tx.send_replace(Some(candidates));
    }

    /// Drop a candidate from the feed. Returns whether it was present.
    pub fn remove(&self, candidate_id: &str) -> bool {
        self.tx.send_if_modified(|feed| match feed {
            Some(candidates) => {
                let before = candidates.len();
                candidates.retain(|c| c.id != candidate_id);
                candidates.len() != before
            }
            None => false,
        })
    }

    /// Put a candidate back on top of the feed if it is missing
    pub fn restore(&self, candidate: &Candidate) -> bool {
        self.tx.send_if_modified(|feed| {
            let candidates = feed.get_or_insert_with(Vec::new);
            if candidates.iter().any(|c| c.id == candidate.id) {
                return false;
            }
            candidates.push(candidate.clone());
            true
        })
    }

    pub fn is_loaded(&self) -> bool {
        self.tx.borrow().is_some()
    }

    pub fn current(&self) -> Option<Vec<Candidate>> {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Vec<Candidate>>> {
        self.tx.subscribe()
    }
}

impl Default for FeedStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RemovalNotifier for FeedStore {
    fn candidate_resolved(&self, candidate_id: &str) {
        if self.remove(candidate_id) {
            tracing::debug!("Removed {} from feed", candidate_id);
        }
    }

    fn candidate_restored(&self, candidate: &Candidate) {
        if self.restore(candidate) {
            tracing::debug!("Restored {} to feed", candidate.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(id: &str) -> Candidate {
        Candidate {
            id: id.to_string(),
            first_name: id.to_string(),
            last_name: String::new(),
            photo_url: None,
            age: None,
            gender: None,
            about: None,
            skills: vec![],
        }
    }

    #[test]
    fn test_unloaded_feed() {
        let feed = FeedStore::new();
        assert!(!feed.is_loaded());
        assert!(!feed.remove("a"));
    }

    #[test]
    fn test_remove_and_restore() {
        let feed = FeedStore::new();
        feed.set_feed(vec![candidate("a"), candidate("b"), candidate("c")]);

        assert!(feed.remove("a"));
        assert!(!feed.remove("a"));

        assert!(feed.restore(&candidate("a")));
        assert!(!feed.restore(&candidate("a")));

        let ids: Vec<String> = feed.current().unwrap().into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_subscribers_skip_noop_updates() {
        let feed = FeedStore::new();
        let mut rx = feed.subscribe();
        feed.set_feed(vec![candidate("a")]);
        rx.borrow_and_update();

        feed.remove("missing");
        assert!(!rx.has_changed().unwrap());

        feed.candidate_resolved("a");
        assert!(rx.has_changed().unwrap());
    }
}
