use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::core::{DeckController, DeckError, DispatchOutcome};
use crate::models::{Action, DecideRequest, Decision, DecisionResponse, DragMoveRequest, DragStartRequest, ErrorResponse, HealthResponse, RefreshResponse};
use crate::services::{ApiClient, FeedStore};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<DeckController>,
    pub feed: Arc<FeedStore>,
    pub api: Arc<ApiClient>,
}

/// Configure all deck routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/deck", web::get().to(get_deck))
        .route("/deck/drag/start", web::post().to(drag_start))
        .route("/deck/drag/move", web::post().to(drag_move))
        .route("/deck/drag/end", web::post().to(drag_end))
        .route("/deck/decide", web::post().to(decide))
        .route("/deck/refresh", web::post().to(refresh));
}

fn deck_error(e: DeckError) -> HttpResponse {
    HttpResponse::Conflict().json(ErrorResponse {
        error: "Deck interaction rejected".to_string(),
        message: e.to_string(),
        status_code: 409,
    })
}

fn bad_request(error: &str, message: String) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: error.to_string(),
        message,
        status_code: 400,
    })
}

fn decision_response(decision: Decision, outcome: Option<&DispatchOutcome>) -> DecisionResponse {
    let dispatch_id = match outcome {
        Some(DispatchOutcome::Dispatched(pending)) => Some(pending.id.to_string()),
        _ => None,
    };

    DecisionResponse {
        decision,
        dispatched: dispatch_id.is_some(),
        dispatch_id,
    }
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let status = if state.feed.is_loaded() { "healthy" } else { "loading" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Render snapshot
///
/// GET /api/v1/deck
async fn get_deck(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.controller.snapshot())
}

/// Start dragging the front card
///
/// POST /api/v1/deck/drag/start
///
/// Request body:
/// ```json
/// { "candidateId": "string" }
/// ```
async fn drag_start(
    state: web::Data<AppState>,
    req: web::Json<DragStartRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return bad_request("Validation failed", errors.to_string());
    }

    match state.controller.begin_drag(&req.candidate_id) {
        Ok(()) => HttpResponse::Ok().json(state.controller.signals()),
        Err(e) => deck_error(e),
    }
}

/// Pointer move during a drag
///
/// POST /api/v1/deck/drag/move
///
/// Request body:
/// ```json
/// { "offset": 42.0 }
/// ```
async fn drag_move(
    state: web::Data<AppState>,
    req: web::Json<DragMoveRequest>,
) -> impl Responder {
    if !req.offset.is_finite() {
        return bad_request("Validation failed", "offset must be finite".to_string());
    }

    match state.controller.drag_to(req.offset) {
        Ok(()) => HttpResponse::Ok().json(state.controller.signals()),
        Err(e) => deck_error(e),
    }
}

/// Release the drag
///
/// POST /api/v1/deck/drag/end
async fn drag_end(state: web::Data<AppState>) -> impl Responder {
    match state.controller.end_drag() {
        Ok(outcome) => {
            HttpResponse::Ok().json(decision_response(outcome.decision, outcome.dispatch.as_ref()))
        }
        Err(e) => deck_error(e),
    }
}

/// Decision button on the front card
///
/// POST /api/v1/deck/decide
///
/// Request body:
/// ```json
/// { "candidateId": "string", "action": "interested|ignored" }
/// ```
async fn decide(
    state: web::Data<AppState>,
    req: web::Json<DecideRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return bad_request("Validation failed", errors.to_string());
    }

    let action = match Action::parse(&req.action) {
        Some(action) => action,
        None => {
            return bad_request(
                "Invalid action",
                "Action must be one of: accept, interested, reject, ignored".to_string(),
            );
        }
    };

    match state.controller.decide(&req.candidate_id, action) {
        Ok(outcome) => HttpResponse::Ok().json(decision_response(action.into(), Some(&outcome))),
        Err(e) => deck_error(e),
    }
}

/// Refetch the feed
///
/// POST /api/v1/deck/refresh
async fn refresh(state: web::Data<AppState>) -> impl Responder {
    match state.api.refresh_feed(&state.feed).await {
        Ok(fetched) => {
            // The follow task would get there too; initialize now so the reply is current
            if let Some(candidates) = state.feed.current() {
                state.controller.initialize(&candidates);
            }

            tracing::info!("Feed refreshed: {} fetched, {} in deck", fetched, state.controller.len());
            HttpResponse::Ok().json(RefreshResponse {
                fetched,
                queued: state.controller.len(),
            })
        }
        Err(e) => {
            tracing::error!("Failed to refresh feed: {}", e);
            HttpResponse::BadGateway().json(ErrorResponse {
                error: "Failed to refresh feed".to_string(),
                message: e.to_string(),
                status_code: 502,
            })
        }
    }
}
