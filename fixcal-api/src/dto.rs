//! DTOs for API requests and responses.

use serde::{Deserialize, Serialize};

/// Query string of the calendar endpoints.
#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    /// MRHA team id, validated by the handler
    #[serde(rename = "teamId")]
    pub team_id: Option<String>,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    /// Teams with an entry in the cache, computing or ready
    pub cached_teams: usize,
    /// Of those, teams whose calendar has been published
    pub ready_teams: usize,
    pub ttl_seconds: u64,
}
