//! Constants for fixcal.

// ═══════════════════════════════════════════════════════════════════════════════
// UPSTREAM
// ═══════════════════════════════════════════════════════════════════════════════

/// Team page on the MRHA league site. The team id is passed as `teamid`.
pub const MRHA_TEAM_URL: &str = "http://www.mrha.co.uk/mwTeam.asp";

/// Query parameter carrying the team id on the upstream page.
pub const MRHA_TEAM_QUERY_PARAM: &str = "teamid";

/// Value of the `name` attribute on the table holding the fixtures.
pub const FIXTURES_TABLE_NAME: &str = "fixturestable";

/// Number of `<td>` cells in a fixture row:
/// date, home, score, away, time, venue.
pub const FIXTURE_ROW_CELLS: usize = 6;

/// Upstream request timeout in seconds.
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 30;

// ═══════════════════════════════════════════════════════════════════════════════
// CALENDAR
// ═══════════════════════════════════════════════════════════════════════════════

/// Time zone every fixture time is expressed in.
pub const CALENDAR_TZID: &str = "Europe/London";

/// Product identifier written into every calendar.
pub const CALENDAR_PRODID: &str = "-//fixcal//MRHA fixtures//EN";

/// Prefix for calendar names; the team id is appended.
pub const CALENDAR_NAME_PREFIX: &str = "MRHA Fixtures";

/// Prefix for event UIDs; the fixture index is appended.
pub const EVENT_UID_PREFIX: &str = "fixture";

/// Length of a fixture in minutes.
pub const EVENT_DURATION_MINUTES: i64 = 120;

/// `DTSTART`/`DTEND`/`DTSTAMP` layout (local time, no offset).
pub const ICAL_DATETIME_FORMAT: &str = "%Y%m%dT%H%M%S";

// ═══════════════════════════════════════════════════════════════════════════════
// CACHE & SERVER
// ═══════════════════════════════════════════════════════════════════════════════

/// How long a computed calendar stays cached: 12 hours.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 12 * 60 * 60;

/// Port the feed server listens on by default.
pub const DEFAULT_PORT: u16 = 59463;

/// Longest team id accepted from clients.
pub const MAX_TEAM_ID_LEN: usize = 32;
