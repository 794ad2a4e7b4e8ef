use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to start dragging the front card
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DragStartRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "candidate_id", rename = "candidateId")]
    pub candidate_id: String,
}

/// Pointer-move update for the active drag
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DragMoveRequest {
    pub offset: f64,
}

/// Button press on the front card
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DecideRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "candidate_id", rename = "candidateId")]
    pub candidate_id: String,
    #[validate(length(min = 1))]
    pub action: String,
}
