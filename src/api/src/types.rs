//! Request and response types for the catalog API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::query::Status;

/// A race, as returned by the racing service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Race {
    pub id: i64,
    pub meeting_id: i64,
    pub name: String,
    pub number: i64,
    pub visible: bool,
    pub advertised_start_time: DateTime<Utc>,
    /// Derived from `advertised_start_time` at read time
    pub status: Status,
}

/// A sporting event, as returned by the sports service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub name: String,
    pub visible: bool,
    pub advertised_start_time: DateTime<Utc>,
    /// Derived from `advertised_start_time` at read time
    pub status: Status,
}

/// Filter for race listings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListRacesRequestFilter {
    #[serde(default)]
    pub meeting_ids: Vec<i64>,
    #[serde(default)]
    pub visible_races_only: bool,
    /// e.g. "meeting_id desc, id"
    #[serde(default)]
    pub order_by: String,
}

/// Filter for event listings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListEventsRequestFilter {
    #[serde(default)]
    pub visible_events_only: bool,
    #[serde(default)]
    pub order_by: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListRacesRequest {
    #[serde(default)]
    pub filter: Option<ListRacesRequestFilter>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListRacesResponse {
    pub races: Vec<Race>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListEventsRequest {
    #[serde(default)]
    pub filter: Option<ListEventsRequestFilter>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListEventsResponse {
    pub events: Vec<Event>,
}

#[derive(Debug, Deserialize)]
pub struct GetEventRequest {
    pub id: i64,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}
