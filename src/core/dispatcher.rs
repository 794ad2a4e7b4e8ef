use crate::core::queue::CandidateQueue;
use crate::models::{Action, Candidate};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::{Arc, Weak};
use thiserror::Error;
use tokio::task::JoinHandle;
use uuid::Uuid;

/// Queue shared between the controller and in-flight dispatch tasks
pub type SharedQueue = Arc<RwLock<CandidateQueue>>;

/// Errors reported by an action endpoint
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Rejected by server: {0}")]
    Rejected(String),
}

/// Network side of a decision: tells the backend about an accept or reject
#[async_trait]
pub trait ActionEndpoint: Send + Sync {
    async fn send(&self, action: Action, candidate_id: &str) -> Result<(), DispatchError>;
}

/// Upstream candidate source that must learn about local removals
pub trait RemovalNotifier: Send + Sync {
    /// The candidate was evicted locally; drop it from the source of truth
    fn candidate_resolved(&self, candidate_id: &str);

    /// The dispatch for a resolved candidate failed and it is back in the deck
    fn candidate_restored(&self, candidate: &Candidate);
}

/// How an in-flight dispatch finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    RolledBack,
    /// The call failed after the owning deck was dropped
    Abandoned,
}

/// Handle to a dispatch whose network call is still running.
/// Dropping it leaves the call running in the background.
#[derive(Debug)]
pub struct PendingDispatch {
    pub id: Uuid,
    pub action: Action,
    pub candidate_id: String,
    handle: JoinHandle<Confirmation>,
}

impl PendingDispatch {
    /// Wait for the network call and any compensating restore
    pub async fn confirmation(self) -> Confirmation {
        match self.handle.await {
            Ok(confirmation) => confirmation,
            Err(e) => {
                tracing::warn!("Dispatch {} task did not complete: {}", self.id, e);
                Confirmation::Abandoned
            }
        }
    }
}

#[derive(Debug)]
pub enum DispatchOutcome {
    Dispatched(PendingDispatch),
    /// Candidate was not in the deck (duplicate gesture or stale render)
    Ignored,
}

impl DispatchOutcome {
    pub fn is_dispatched(&self) -> bool {
        matches!(self, DispatchOutcome::Dispatched(_))
    }

    pub fn pending(self) -> Option<PendingDispatch> {
        match self {
            DispatchOutcome::Dispatched(pending) => Some(pending),
            DispatchOutcome::Ignored => None,
        }
    }
}

/// Optimistic two-phase dispatcher
///
/// Phase one runs synchronously: the candidate is evicted and marked pending
/// under a single write lock, then the upstream source is told. Phase two
/// runs on a spawned task: the endpoint is called, and on failure the
/// retained candidate record is put back on top of the deck.
///
/// Must be called from within a Tokio runtime.
#[derive(Clone)]
pub struct ActionDispatcher {
    endpoint: Arc<dyn ActionEndpoint>,
    notifier: Arc<dyn RemovalNotifier>,
}

impl ActionDispatcher {
    pub fn new(endpoint: Arc<dyn ActionEndpoint>, notifier: Arc<dyn RemovalNotifier>) -> Self {
        Self { endpoint, notifier }
    }

    pub fn dispatch(&self, queue: &SharedQueue, action: Action, candidate_id: &str) -> DispatchOutcome {
        let evicted = {
            let mut guard = queue.write();
            match guard.evict(candidate_id) {
                Some(candidate) => {
                    guard.mark_pending(candidate_id);
                    candidate
                }
                None => {
                    tracing::debug!("Ignoring {:?} for {}: not in deck", action, candidate_id);
                    return DispatchOutcome::Ignored;
                }
            }
        };

        self.notifier.candidate_resolved(candidate_id);

        let id = Uuid::new_v4();
        tracing::debug!("Dispatch {}: {:?} {}", id, action, candidate_id);

        let endpoint = Arc::clone(&self.endpoint);
        let notifier = Arc::clone(&self.notifier);
        let weak = Arc::downgrade(queue);

        let handle = tokio::spawn(async move {
            let result = endpoint.send(action, &evicted.id).await;
            match result {
                Ok(()) => {
                    tracing::debug!("Dispatch {} confirmed for {}", id, evicted.id);
                    Confirmation::Confirmed
                }
                Err(e) => {
                    tracing::warn!("Dispatch {} failed for {}, restoring card: {}", id, evicted.id, e);
                    roll_back(&weak, notifier.as_ref(), evicted)
                }
            }
        });

        DispatchOutcome::Dispatched(PendingDispatch {
            id,
            action,
            candidate_id: candidate_id.to_string(),
            handle,
        })
    }
}

fn roll_back(queue: &Weak<RwLock<CandidateQueue>>, notifier: &dyn RemovalNotifier, candidate: Candidate) -> Confirmation {
    let Some(queue) = queue.upgrade() else {
        tracing::debug!("Deck dropped before rollback of {}", candidate.id);
        return Confirmation::Abandoned;
    };

    {
        let mut guard = queue.write();
        guard.clear_pending(&candidate.id);
        guard.restore(candidate.clone());
    }

    notifier.candidate_restored(&candidate);
    Confirmation::RolledBack
}
