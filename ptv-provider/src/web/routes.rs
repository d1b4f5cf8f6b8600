//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::domain::Point;
use crate::ptv::{PtvError, TransportError};

use super::dto::*;
use super::state::AppState;

/// Departures returned when the caller does not say.
const DEFAULT_DEPARTURES: u32 = 10;

/// Upper bound on departures per request.
const MAX_DEPARTURES: u32 = 100;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/nearby", get(nearby))
        .route("/api/departures/:station_id", get(departures))
        .route("/api/suggest", get(suggest))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
///
/// Reports on this server only; PTV's own health is checked per query.
async fn health() -> &'static str {
    "ok"
}

/// Stops near a coordinate.
async fn nearby(
    State(state): State<AppState>,
    Query(req): Query<NearbyRequest>,
) -> Result<Json<NearbyResponse>, AppError> {
    if !(-90.0..=90.0).contains(&req.lat) || !(-180.0..=180.0).contains(&req.lon) {
        return Err(AppError::BadRequest {
            message: format!("Coordinate out of range: {},{}", req.lat, req.lon),
        });
    }

    let point = Point::from_degrees(req.lat, req.lon);
    let result = state
        .ptv
        .nearby_locations(
            point,
            req.max_distance.unwrap_or(0),
            req.max_locations.unwrap_or(0),
        )
        .await?;

    Ok(Json(NearbyResponse::from_result(&result)))
}

/// Departure board for a stop.
async fn departures(
    State(state): State<AppState>,
    Path(station_id): Path<String>,
    Query(req): Query<DeparturesRequest>,
) -> Result<Json<DeparturesResponse>, AppError> {
    let station_id = station_id.trim();
    if station_id.is_empty() || !station_id.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::BadRequest {
            message: format!("Invalid station id: {station_id:?}"),
        });
    }

    let limit = req.limit.unwrap_or(DEFAULT_DEPARTURES).clamp(1, MAX_DEPARTURES);
    let result = state.ptv.query_departures(station_id, limit).await?;

    Ok(Json(DeparturesResponse::from_result(&result)))
}

/// Free-text location search.
async fn suggest(
    State(state): State<AppState>,
    Query(req): Query<SuggestRequest>,
) -> Result<Json<SuggestResponse>, AppError> {
    let query = req.q.trim();
    if query.is_empty() {
        return Err(AppError::BadRequest {
            message: "Search text must not be empty".to_string(),
        });
    }

    let result = state.ptv.suggest_locations(query).await?;

    Ok(Json(SuggestResponse::from_result(&result)))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    /// PTV reported itself unhealthy or asked us to back off
    Unavailable { message: String, retryable: bool },
    /// PTV answered with something we could not use
    BadGateway { message: String, retryable: bool },
    Internal { message: String },
}

impl From<PtvError> for AppError {
    fn from(e: PtvError) -> Self {
        let retryable = e.is_retryable();
        let message = e.to_string();
        match e {
            PtvError::Configuration(_) => AppError::Internal { message },
            PtvError::InvalidInput(_) => AppError::BadRequest { message },
            PtvError::HealthCheck(_) | PtvError::Transport(TransportError::RateLimited) => {
                AppError::Unavailable { message, retryable }
            }
            PtvError::Transport(_)
            | PtvError::MalformedResponse { .. }
            | PtvError::UnknownTransportType(_) => AppError::BadGateway { message, retryable },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message, retryable) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message, false),
            AppError::Unavailable { message, retryable } => {
                (StatusCode::SERVICE_UNAVAILABLE, message, retryable)
            }
            AppError::BadGateway { message, retryable } => {
                (StatusCode::BAD_GATEWAY, message, retryable)
            }
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message, false),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "rejected request");
        }

        let body = Json(ErrorResponse {
            error: message,
            retryable,
        });
        (status, body).into_response()
    }
}
