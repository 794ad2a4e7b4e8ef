use crate::models::DragState;
use tokio::sync::watch;

/// Live drag offset of the front card
///
/// Single writer (the pointer event handler), any number of readers via
/// [`GestureTracker::subscribe`]. The published value is `None` whenever no
/// drag is in progress, and every gesture starts from a zero offset.
pub struct GestureTracker {
    tx: watch::Sender<Option<DragState>>,
}

impl GestureTracker {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx }
    }

    /// Start tracking a drag on `candidate_id`, replacing any stale gesture
    pub fn begin(&self, candidate_id: &str) {
        let previous = self.tx.send_replace(Some(DragState {
            candidate_id: candidate_id.to_string(),
            offset: 0.0,
        }));

        if let Some(stale) = previous {
            tracing::debug!("Discarding unfinished drag on {}", stale.candidate_id);
        }
    }

    /// Record a pointer move. Returns false if no drag is active.
    pub fn update(&self, offset: f64) -> bool {
        let mut active = false;
        self.tx.send_if_modified(|state| match state {
            Some(drag) => {
                active = true;
                if drag.offset == offset {
                    return false;
                }
                drag.offset = offset;
                true
            }
            None => false,
        });

        if active {
            tracing::trace!("Drag offset: {}", offset);
        }
        active
    }

    /// Finish the gesture, returning its final state and resetting to neutral
    pub fn end(&self) -> Option<DragState> {
        self.tx.send_replace(None)
    }

    /// Current offset, zero when idle
    pub fn offset(&self) -> f64 {
        self.tx.borrow().as_ref().map_or(0.0, |drag| drag.offset)
    }

    pub fn current(&self) -> Option<DragState> {
        self.tx.borrow().clone()
    }

    pub fn is_active(&self) -> bool {
        self.tx.borrow().is_some()
    }

    /// Reader handle that observes every offset change
    pub fn subscribe(&self) -> watch::Receiver<Option<DragState>> {
        self.tx.subscribe()
    }
}

impl Default for GestureTracker {
    fn default() -> Self {
        Self::new()
    }
}
