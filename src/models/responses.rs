use serde::{Deserialize, Serialize};
use crate::models::domain::{Candidate, CardPhase, Decision};

/// Visual state of one card in the stack
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardView {
    pub candidate: Candidate,
    pub phase: CardPhase,
    #[serde(rename = "isFront")]
    pub is_front: bool,
    pub draggable: bool,
    #[serde(rename = "offsetX")]
    pub offset_x: f64,
    #[serde(rename = "rotationDeg")]
    pub rotation_deg: f64,
    pub opacity: f64,
    pub scale: f64,
    #[serde(rename = "rejectIndicatorOpacity")]
    pub reject_indicator_opacity: Option<f64>,
    #[serde(rename = "acceptIndicatorOpacity")]
    pub accept_indicator_opacity: Option<f64>,
}

/// Full render snapshot of the deck, bottom card first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeckResponse {
    pub cards: Vec<CardView>,
    /// False until the first candidate list arrives
    pub loaded: bool,
    /// Loaded and out of cards
    pub exhausted: bool,
    pub pending: Vec<String>,
    pub revision: u64,
}

/// Result of releasing a drag or pressing a decision button
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionResponse {
    pub decision: Decision,
    pub dispatched: bool,
    #[serde(rename = "dispatchId")]
    pub dispatch_id: Option<String>,
}

/// Feed refresh response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub fetched: usize,
    pub queued: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
