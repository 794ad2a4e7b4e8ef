// Deck core exports
pub mod classifier;
pub mod controller;
pub mod dispatcher;
pub mod gesture;
pub mod presentation;
pub mod queue;

pub use classifier::{classify, Classifier};
pub use controller::{DeckController, DeckError, DragOutcome};
pub use dispatcher::{ActionDispatcher, ActionEndpoint, Confirmation, DispatchError, DispatchOutcome, PendingDispatch, RemovalNotifier};
pub use gesture::GestureTracker;
pub use presentation::{interpolate, LiveBinding, LiveSignals, PresentationBinder};
pub use queue::CandidateQueue;
