use crate::models::Candidate;
use std::collections::HashSet;

/// Ordered candidate stack plus the ids whose removal is pending
///
/// The last element is the front card. Every mutation that changes what a
/// reader would observe bumps `revision`; no-op calls leave it untouched.
#[derive(Debug, Default)]
pub struct CandidateQueue {
    cards: Vec<Candidate>,
    removed: HashSet<String>,
    revision: u64,
    /// Set by the first `initialize`, even with an empty list
    loaded: bool,
}

impl CandidateQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stack with `candidates`, skipping ids pending removal.
    /// Returns whether the visible stack changed. The first call always
    /// counts as a change since it ends the loading state.
    pub fn initialize(&mut self, candidates: &[Candidate]) -> bool {
        let next: Vec<Candidate> = candidates
            .iter()
            .filter(|c| !self.removed.contains(&c.id))
            .cloned()
            .collect();

        let first_load = !std::mem::replace(&mut self.loaded, true);
        if next == self.cards && !first_load {
            return false;
        }

        tracing::debug!(
            "Queue initialized with {} candidates ({} filtered as pending)",
            next.len(),
            candidates.len() - next.len()
        );
        self.cards = next;
        self.revision += 1;
        true
    }

    /// Remove `id` from the stack; no-op if absent
    pub fn evict(&mut self, id: &str) -> Option<Candidate> {
        let index = self.cards.iter().position(|c| c.id == id)?;
        self.revision += 1;
        Some(self.cards.remove(index))
    }

    /// Put a previously evicted candidate back on top
    pub fn restore(&mut self, candidate: Candidate) -> bool {
        if self.contains(&candidate.id) {
            return false;
        }
        self.cards.push(candidate);
        self.revision += 1;
        true
    }

    /// Record `id` as evicted pending confirmation
    pub fn mark_pending(&mut self, id: &str) -> bool {
        self.removed.insert(id.to_string())
    }

    pub fn clear_pending(&mut self, id: &str) -> bool {
        self.removed.remove(id)
    }

    pub fn is_pending(&self, id: &str) -> bool {
        self.removed.contains(id)
    }

    pub fn pending_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.removed.iter().cloned().collect();
        ids.sort();
        ids
    }

    pub fn contains(&self, id: &str) -> bool {
        self.cards.iter().any(|c| c.id == id)
    }

    pub fn front(&self) -> Option<&Candidate> {
        self.cards.last()
    }

    pub fn is_front(&self, id: &str) -> bool {
        self.front().is_some_and(|c| c.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Cards from the bottom of the stack to the front
    pub fn iter(&self) -> impl Iterator<Item = &Candidate> {
        self.cards.iter()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.cards.iter().map(|c| c.id.as_str()).collect()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Whether any candidate list has arrived yet
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }
}
