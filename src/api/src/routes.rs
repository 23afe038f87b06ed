//! API route handlers.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::storage::{CatalogError, EventRepository, RaceRepository};
use crate::types::{
    ErrorResponse, Event, GetEventRequest, HealthResponse, ListEventsRequest, ListEventsResponse,
    ListRacesRequest, ListRacesResponse,
};

/// Application state shared across handlers.
pub struct AppState {
    pub races: RaceRepository,
    pub events: EventRepository,
}

/// Error type for API handlers.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.into(),
        }
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.into(),
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.into(),
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match &err {
            CatalogError::Query(_) => ApiError::bad_request(err.to_string()),
            CatalogError::NotFound { .. } => ApiError::not_found(err.to_string()),
            _ => {
                tracing::error!(error = %err, "Catalog request failed");
                ApiError::internal("internal server error")
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.status.to_string(),
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

/// Build the router with all catalog endpoints.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/v1/list-races", post(list_races))
        .route("/v1/list-events", post(list_events))
        .route("/v1/get-event", post(get_event))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// List races, optionally filtered and ordered.
pub async fn list_races(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ListRacesRequest>, JsonRejection>,
) -> Result<Json<ListRacesResponse>, ApiError> {
    let Json(req) = payload?;
    let races = state.races.list(req.filter.as_ref())?;
    Ok(Json(ListRacesResponse { races }))
}

/// List sporting events, optionally filtered and ordered.
pub async fn list_events(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ListEventsRequest>, JsonRejection>,
) -> Result<Json<ListEventsResponse>, ApiError> {
    let Json(req) = payload?;
    let events = state.events.list(req.filter.as_ref())?;
    Ok(Json(ListEventsResponse { events }))
}

/// Get a single sporting event by id.
pub async fn get_event(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GetEventRequest>, JsonRejection>,
) -> Result<Json<Event>, ApiError> {
    let Json(req) = payload?;
    let event = state.events.get(req.id)?;
    Ok(Json(event))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request};
    use chrono::{TimeZone, Utc};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::query::Status;
    use crate::storage::Database;
    use crate::types::Race;

    fn test_state() -> Arc<AppState> {
        let races = RaceRepository::new(Database::in_memory().unwrap());
        races.init(0).unwrap();
        for (id, meeting_id, visible) in [(1, 7, true), (2, 8, false), (3, 9, true)] {
            races
                .insert(&Race {
                    id,
                    meeting_id,
                    name: format!("Race {}", id),
                    number: id,
                    visible,
                    advertised_start_time: Utc.with_ymd_and_hms(2030, 1, 1, id as u32, 0, 0).unwrap(),
                    status: Status::Open,
                })
                .unwrap();
        }

        let events = EventRepository::new(Database::in_memory().unwrap());
        events.init(3).unwrap();

        Arc::new(AppState { races, events })
    }

    async fn post_json(uri: &str, body: &str) -> (StatusCode, serde_json::Value) {
        let response = router(test_state())
            .oneshot(
                Request::post(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let response = router(test_state())
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_list_races_visible_only() {
        let (status, body) =
            post_json("/v1/list-races", r#"{"filter": {"visible_races_only": true}}"#).await;
        assert_eq!(status, StatusCode::OK);

        let races = body["races"].as_array().unwrap();
        let ids: Vec<i64> = races.iter().map(|r| r["id"].as_i64().unwrap()).collect();
        assert_eq!(ids, vec![3, 1]);
        assert_eq!(races[0]["status"], "OPEN");
    }

    #[tokio::test]
    async fn test_list_races_without_filter() {
        let (status, body) = post_json("/v1/list-races", "{}").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["races"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_list_races_meeting_ids_ordered() {
        let (status, body) = post_json(
            "/v1/list-races",
            r#"{"filter": {"meeting_ids": [8, 9], "order_by": "meeting_id desc"}}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let ids: Vec<i64> = body["races"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![3, 2]);
    }

    #[tokio::test]
    async fn test_list_races_invalid_order_by() {
        let (status, body) =
            post_json("/v1/list-races", r#"{"filter": {"order_by": "some-order-junk"}}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "invalid order by field");
    }

    #[tokio::test]
    async fn test_list_events() {
        let (status, body) = post_json("/v1/list-events", r#"{"filter": {"order_by": "id"}}"#).await;
        assert_eq!(status, StatusCode::OK);

        let ids: Vec<i64> = body["events"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_get_event() {
        let (status, body) = post_json("/v1/get-event", r#"{"id": 2}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], 2);
    }

    #[tokio::test]
    async fn test_get_event_not_found() {
        let (status, body) = post_json("/v1/get-event", r#"{"id": 404}"#).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "event 404 not found");
    }

    #[tokio::test]
    async fn test_malformed_body_returns_error_envelope() {
        let (status, body) = post_json("/v1/list-races", r#"{"filter": "#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "400 Bad Request");
        assert!(body["message"].as_str().unwrap().contains("JSON"));
    }

    #[tokio::test]
    async fn test_missing_id_returns_error_envelope() {
        let (status, body) = post_json("/v1/get-event", "{}").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["message"].as_str().unwrap().contains("id"));
    }
}
