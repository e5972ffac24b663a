//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use tracing::{error, info, warn};

use crate::backend::{BackendError, BusLine, Origin};
use crate::resolve::{CancelReason, ItineraryBackend, ResolveError};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router<B>(state: AppState<B>) -> Router
where
    B: ItineraryBackend + 'static,
{
    Router::new()
        .route("/health", get(health))
        .route("/api/itinerary", get(itinerary::<B>))
        .route("/api/line-details", get(line_details::<B>))
        .route("/api/line-stops", get(line_stops::<B>))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Resolve, normalize and summarize itineraries for a trip.
async fn itinerary<B: ItineraryBackend>(
    State(state): State<AppState<B>>,
    Query(query): Query<ItineraryQuery>,
) -> Result<Json<ItineraryPayload>, AppError> {
    let request = query
        .to_request()
        .map_err(|message| AppError::BadRequest { message })?;

    info!(
        destination = %request.destination_address,
        city_id = request.city_id,
        "itinerary request"
    );

    let response = state.resolver.resolve_itinerary(&request).await?;
    let itineraries = state.normalizer.normalize(&response);

    let origin = match request.origin {
        Origin::Coordinates(c) => Some(c),
        Origin::Address(_) => None,
    };

    Ok(Json(ItineraryPayload::new(response, itineraries, origin)))
}

/// Look up one transit line.
async fn line_details<B: ItineraryBackend>(
    State(state): State<AppState<B>>,
    Query(query): Query<LineDetailsQuery>,
) -> Result<Json<BusLine>, AppError> {
    let line_id = query
        .line_id()
        .map_err(|message| AppError::BadRequest { message })?;

    let line = state
        .resolver
        .backend()
        .find_line(line_id)
        .await
        .map_err(AppError::from)?;

    line.map(Json).ok_or_else(|| AppError::NotFound {
        message: "Line not found".to_string(),
    })
}

/// Stops along one transit line.
async fn line_stops<B: ItineraryBackend>(
    State(state): State<AppState<B>>,
    Query(query): Query<LineDetailsQuery>,
) -> Result<Json<LineStopsPayload>, AppError> {
    let line_id = query
        .line_id()
        .map_err(|message| AppError::BadRequest { message })?;

    let stops = state
        .resolver
        .backend()
        .stops_by_line(line_id)
        .await
        .map_err(|e| AppError::BadGateway {
            message: "Failed to fetch line stops".to_string(),
            details: e.to_string(),
        })?;

    Ok(Json(LineStopsPayload::new(line_id, stops)))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    BadGateway { message: String, details: String },
    GatewayTimeout { message: String },
    Internal { message: String },
}

impl From<BackendError> for AppError {
    fn from(e: BackendError) -> Self {
        AppError::BadGateway {
            message: "Failed to fetch line details".to_string(),
            details: e.to_string(),
        }
    }
}

impl From<ResolveError> for AppError {
    fn from(e: ResolveError) -> Self {
        match e {
            ResolveError::InvalidRequest(message) => AppError::BadRequest { message },
            ResolveError::NoItineraries => AppError::NotFound {
                message: "No itineraries found".to_string(),
            },
            ResolveError::Backend { .. } => AppError::BadGateway {
                message: "Failed to fetch itinerary".to_string(),
                details: e.to_string(),
            },
            ResolveError::Cancelled(CancelReason::Deadline) => AppError::GatewayTimeout {
                message: e.to_string(),
            },
            ResolveError::Cancelled(CancelReason::Caller) => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, error, details) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message, None),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message, None),
            AppError::BadGateway { message, details } => {
                (StatusCode::BAD_GATEWAY, message, Some(details))
            }
            AppError::GatewayTimeout { message } => (StatusCode::GATEWAY_TIMEOUT, message, None),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message, None),
        };

        if status.is_server_error() {
            error!(%status, %error, ?details, "request failed");
        } else {
            warn!(%status, %error, "request rejected");
        }

        let body = Json(ErrorResponse { error, details });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MockBackend;
    use crate::domain::StepMode;
    use crate::normalize::Normalizer;
    use crate::resolve::{Resolver, ResolverConfig};

    fn state() -> AppState<MockBackend> {
        let backend = MockBackend::new("data/mock_itineraries").unwrap();
        AppState::new(
            Resolver::new(backend, ResolverConfig::default()),
            Normalizer::default(),
        )
    }

    fn itinerary_query(start_add: Option<&str>) -> ItineraryQuery {
        ItineraryQuery {
            dest_add: Some("Ain Diab".into()),
            city_id: Some("1".into()),
            start_add: start_add.map(str::to_string),
            start_lat: None,
            start_lon: None,
        }
    }

    #[tokio::test]
    async fn itinerary_from_legacy_mock() {
        let Json(payload) = itinerary(State(state()), Query(itinerary_query(Some("Maarif"))))
            .await
            .unwrap();

        assert_eq!(payload.v2_itin.len(), 2);
        assert_eq!(payload.summaries.len(), 2);
        assert_eq!(
            payload.v2_itin[0].modes(),
            vec![StepMode::Walk, StepMode::Transit, StepMode::Walk]
        );
        assert_eq!(payload.v2_itin[1].modes(), vec![StepMode::Transit]);
        assert_eq!(payload.start.as_ref().unwrap().name, "Maarif");
        assert!(payload.summaries[0].bounds.is_some());
    }

    #[tokio::test]
    async fn itinerary_missing_params_is_bad_request() {
        let err = itinerary(State(state()), Query(ItineraryQuery::default()))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::BadRequest { .. }));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn line_details_found_and_missing() {
        let Json(line) = line_details(
            State(state()),
            Query(LineDetailsQuery {
                line_id: Some("12".into()),
            }),
        )
        .await
        .unwrap();
        assert_eq!(line.id, 12);

        let err = line_details(
            State(state()),
            Query(LineDetailsQuery {
                line_id: Some("404".into()),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn line_stops_from_mock() {
        let Json(payload) = line_stops(
            State(state()),
            Query(LineDetailsQuery {
                line_id: Some("12".into()),
            }),
        )
        .await
        .unwrap();

        assert_eq!(payload.stops.len(), 3);
        assert!(payload.bounds.is_some());
    }

    #[test]
    fn resolve_errors_map_to_statuses() {
        let cases = [
            (ResolveError::InvalidRequest("x".into()), StatusCode::BAD_REQUEST),
            (ResolveError::NoItineraries, StatusCode::NOT_FOUND),
            (
                ResolveError::Backend {
                    attempt: "canonical",
                    fell_back_from: vec!["legacy"],
                    source: BackendError::Upstream {
                        status: 500,
                        body: String::new(),
                    },
                },
                StatusCode::BAD_GATEWAY,
            ),
            (
                ResolveError::Cancelled(CancelReason::Deadline),
                StatusCode::GATEWAY_TIMEOUT,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(AppError::from(err).into_response().status(), status);
        }
    }
}
