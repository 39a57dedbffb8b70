//! API route handlers.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use tracing::{debug, info, warn};

use fixcal_core::types::TeamId;

use crate::dto::*;
use crate::error::ApiError;
use crate::state::AppState;

type Result<T> = std::result::Result<T, ApiError>;

const CALENDAR_CONTENT_TYPE: &str = "text/calendar; charset=utf-8";

fn team_from(query: CalendarQuery) -> Result<TeamId> {
    let raw = query
        .team_id
        .ok_or_else(|| ApiError::bad_request("missing teamId query parameter"))?;
    Ok(TeamId::new(raw)?)
}

/// GET /calendar/mrha/?teamId=<id>
pub async fn get_calendar(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CalendarQuery>,
) -> Result<impl IntoResponse> {
    let team = team_from(query)?;
    let start = Instant::now();

    let calendar = state.cache.get(&team).await?;

    debug!(
        %team,
        events = calendar.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Serving calendar"
    );

    Ok((
        [(header::CONTENT_TYPE, CALENDAR_CONTENT_TYPE)],
        calendar.to_string(),
    ))
}

/// DELETE /calendar/mrha/?teamId=<id>
///
/// Drops the team's cached calendar so the next request scrapes again.
/// Requires `Authorization: Bearer <ADMIN_TOKEN>`; without a configured token
/// the endpoint does not exist.
pub async fn invalidate_calendar(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<CalendarQuery>,
) -> Result<StatusCode> {
    let expected = state
        .config
        .admin_token
        .as_ref()
        .ok_or_else(|| ApiError::not_found("invalidation is disabled"))?;

    let presented = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));
    if !presented.map_or(false, |token| expected.matches(token)) {
        warn!("Rejected unauthorized invalidation");
        return Err(ApiError::unauthorized("missing or invalid admin token"));
    }

    let team = team_from(query)?;
    let removed = state.cache.invalidate(&team);

    info!(%team, removed, "Invalidated cached calendar");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /health
pub async fn health_check(
    State(state): State<Arc<AppState>>,
) -> Json<HealthResponse> {
    let stats = state.cache.stats();

    Json(HealthResponse {
        status: "ok".into(),
        version: env!("CARGO_PKG_VERSION").into(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
        cached_teams: stats.total_entries,
        ready_teams: stats.ready_entries,
        ttl_seconds: state.config.cache.ttl_seconds,
    })
}
