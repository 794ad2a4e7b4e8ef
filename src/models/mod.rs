// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Action, Candidate, CardPhase, Decision, DeckTuning, DragState};
pub use requests::{DecideRequest, DragMoveRequest, DragStartRequest};
pub use responses::{CardView, DeckResponse, DecisionResponse, ErrorResponse, HealthResponse, RefreshResponse};
