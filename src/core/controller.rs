use crate::core::classifier::Classifier;
use crate::core::dispatcher::{ActionDispatcher, ActionEndpoint, DispatchOutcome, RemovalNotifier, SharedQueue};
use crate::core::gesture::GestureTracker;
use crate::core::presentation::{LiveBinding, LiveSignals, PresentationBinder};
use crate::core::queue::CandidateQueue;
use crate::models::{Action, Candidate, CardPhase, Decision, DeckResponse, DeckTuning, DragState};
use parking_lot::RwLock;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Guard failures for deck interactions
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeckError {
    #[error("Deck is empty")]
    Empty,

    #[error("Candidate {0} is not the front card")]
    NotFront(String),

    #[error("Deck is in preview mode")]
    Preview,

    #[error("No drag in progress")]
    NoActiveGesture,
}

/// Result of releasing a drag
#[derive(Debug)]
pub struct DragOutcome {
    pub candidate_id: String,
    pub offset: f64,
    pub decision: Decision,
    /// Present only for a decisive release
    pub dispatch: Option<DispatchOutcome>,
}

impl DragOutcome {
    pub fn dispatched(&self) -> bool {
        self.dispatch.as_ref().is_some_and(DispatchOutcome::is_dispatched)
    }
}

/// Card queue controller for one deck session
///
/// Owns the queue and the gesture tracker. Pointer events go in through
/// [`begin_drag`](Self::begin_drag), [`drag_to`](Self::drag_to) and
/// [`end_drag`](Self::end_drag); a decisive release evicts the front card
/// and hands the network call to the [`ActionDispatcher`].
pub struct DeckController {
    queue: SharedQueue,
    gesture: GestureTracker,
    classifier: Classifier,
    binder: PresentationBinder,
    dispatcher: ActionDispatcher,
    preview: bool,
}

impl DeckController {
    pub fn new(
        tuning: DeckTuning,
        endpoint: Arc<dyn ActionEndpoint>,
        notifier: Arc<dyn RemovalNotifier>,
    ) -> Self {
        Self {
            queue: Arc::new(RwLock::new(CandidateQueue::new())),
            gesture: GestureTracker::new(),
            classifier: Classifier::new(tuning.threshold),
            binder: PresentationBinder::new(tuning),
            dispatcher: ActionDispatcher::new(endpoint, notifier),
            preview: false,
        }
    }

    /// Read-only deck: cards render but cannot be dragged or decided
    pub fn with_preview(mut self, preview: bool) -> Self {
        self.preview = preview;
        self
    }

    pub fn is_preview(&self) -> bool {
        self.preview
    }

    /// Replace the deck with a fresh upstream list
    pub fn initialize(&self, candidates: &[Candidate]) -> bool {
        let changed = self.queue.write().initialize(candidates);
        if changed {
            tracing::debug!("Deck refreshed from {} upstream candidates", candidates.len());
        }
        changed
    }

    /// Keep the deck in sync with an upstream candidate stream.
    ///
    /// `None` on the stream means the source has not loaded yet. The task
    /// ends when the stream closes or the controller is dropped.
    pub fn follow(self: &Arc<Self>, mut source: watch::Receiver<Option<Vec<Candidate>>>) -> JoinHandle<()> {
        let weak = Arc::downgrade(self);

        tokio::spawn(async move {
            loop {
                let latest = source.borrow_and_update().clone();
                let Some(controller) = weak.upgrade() else {
                    break;
                };
                if let Some(candidates) = latest {
                    controller.initialize(&candidates);
                }
                drop(controller);

                if source.changed().await.is_err() {
                    break;
                }
            }
            tracing::debug!("Stopped following candidate source");
        })
    }

    pub fn begin_drag(&self, candidate_id: &str) -> Result<(), DeckError> {
        if self.preview {
            return Err(DeckError::Preview);
        }

        {
            let queue = self.queue.read();
            if queue.is_empty() {
                return Err(DeckError::Empty);
            }
            if !queue.is_front(candidate_id) {
                return Err(DeckError::NotFront(candidate_id.to_string()));
            }
        }

        self.gesture.begin(candidate_id);
        tracing::debug!("Drag started on {}", candidate_id);
        Ok(())
    }

    pub fn drag_to(&self, offset: f64) -> Result<(), DeckError> {
        if self.gesture.update(offset) {
            Ok(())
        } else {
            Err(DeckError::NoActiveGesture)
        }
    }

    /// Release the drag: classify once and dispatch if decisive
    ///
    /// A drag whose card is no longer the front (a refresh or a rollback put
    /// another card on top) releases as `Decision::None`.
    pub fn end_drag(&self) -> Result<DragOutcome, DeckError> {
        let DragState { candidate_id, offset } = self.gesture.end().ok_or(DeckError::NoActiveGesture)?;

        if !self.queue.read().is_front(&candidate_id) {
            tracing::debug!("Drag on {} released after it left the front, ignoring", candidate_id);
            return Ok(DragOutcome {
                candidate_id,
                offset,
                decision: Decision::None,
                dispatch: None,
            });
        }

        let decision = self.classifier.classify(offset);

        let dispatch = decision
            .action()
            .map(|action| self.dispatcher.dispatch(&self.queue, action, &candidate_id));

        tracing::info!("Drag on {} released at {:.1}: {:?}", candidate_id, offset, decision);

        Ok(DragOutcome {
            candidate_id,
            offset,
            decision,
            dispatch,
        })
    }

    /// Abandon the drag without classifying it
    pub fn cancel_drag(&self) -> bool {
        self.gesture.end().is_some()
    }

    /// Decide on the front card without a swipe (the card's buttons)
    pub fn decide(&self, candidate_id: &str, action: Action) -> Result<DispatchOutcome, DeckError> {
        if self.preview {
            return Err(DeckError::Preview);
        }

        {
            let queue = self.queue.read();
            if queue.is_empty() {
                return Err(DeckError::Empty);
            }
            if queue.contains(candidate_id) && !queue.is_front(candidate_id) {
                return Err(DeckError::NotFront(candidate_id.to_string()));
            }
        }

        if self.gesture.current().is_some_and(|d| d.candidate_id == candidate_id) {
            self.gesture.end();
        }

        tracing::info!("Button {:?} on {}", action, candidate_id);
        Ok(self.dispatcher.dispatch(&self.queue, action, candidate_id))
    }

    /// Where a card sits in its IDLE → DRAGGING → DECIDED lifecycle
    pub fn phase(&self, candidate_id: &str) -> Option<CardPhase> {
        let queue = self.queue.read();
        if queue.contains(candidate_id) {
            let dragging = queue.is_front(candidate_id)
                && self.gesture.current().is_some_and(|d| d.candidate_id == candidate_id);
            Some(if dragging { CardPhase::Dragging } else { CardPhase::Idle })
        } else if queue.is_pending(candidate_id) {
            Some(CardPhase::Decided)
        } else {
            None
        }
    }

    pub fn is_empty(&self) -> bool {
        self.queue.read().is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.read().len()
    }

    pub fn front(&self) -> Option<Candidate> {
        self.queue.read().front().cloned()
    }

    /// Ids from the bottom of the deck to the front
    pub fn ids(&self) -> Vec<String> {
        self.queue.read().iter().map(|c| c.id.clone()).collect()
    }

    pub fn pending_ids(&self) -> Vec<String> {
        self.queue.read().pending_ids()
    }

    pub fn revision(&self) -> u64 {
        self.queue.read().revision()
    }

    pub fn drag_offset(&self) -> f64 {
        self.gesture.offset()
    }

    /// Visual signals for the current offset
    pub fn signals(&self) -> LiveSignals {
        self.binder.signals(self.gesture.offset())
    }

    pub fn subscribe_drag(&self) -> watch::Receiver<Option<DragState>> {
        self.gesture.subscribe()
    }

    /// Live visual signals for the front card
    pub fn live_binding(&self) -> LiveBinding {
        self.binder.bind(self.gesture.subscribe())
    }

    /// Consistent render snapshot taken under one read lock
    pub fn snapshot(&self) -> DeckResponse {
        let drag = self.gesture.current();
        let queue = self.queue.read();

        DeckResponse {
            cards: self.binder.card_views(&queue, drag.as_ref(), self.preview),
            loaded: queue.is_loaded(),
            exhausted: queue.is_loaded() && queue.is_empty(),
            pending: queue.pending_ids(),
            revision: queue.revision(),
        }
    }
}
