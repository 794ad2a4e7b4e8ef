//! Swipe Deck - card queue controller for the DevTinder matching client
//!
//! This library provides the swipeable candidate deck: drag tracking,
//! threshold classification, optimistic eviction with rollback, and the
//! visual signals a host UI binds to.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{classify, DeckController, DeckError, DispatchOutcome, Confirmation, ActionEndpoint, RemovalNotifier};
pub use models::{Action, Candidate, CardPhase, Decision, DeckTuning, DeckResponse};
pub use services::{ApiClient, FeedStore};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        assert_eq!(classify(150.0, DeckTuning::default().threshold), Decision::Accept);
    }
}
