//! Fixture list to calendar conversion.

use chrono::{DateTime, Utc};
use tracing::warn;

use fixcal_core::constants::EVENT_UID_PREFIX;
use fixcal_core::types::{Calendar, Event, Fixture, TeamId};

/// Builds `team`'s calendar, one event per fixture.
///
/// Event UIDs follow the fixture's position in the table, so a fixture whose
/// date cannot be read is skipped without renumbering the rest.
pub fn build_calendar(team: &TeamId, fixtures: &[Fixture], created: DateTime<Utc>) -> Calendar {
    let mut calendar = Calendar::for_team(team);

    for (index, fixture) in fixtures.iter().enumerate() {
        let Some(start) = fixture.kickoff() else {
            warn!(%team, date = %fixture.date, time = %fixture.time, "Skipping fixture with unreadable date");
            continue;
        };

        calendar.add(
            Event::new(format!("{}{}", EVENT_UID_PREFIX, index), fixture.summary(), start, created)
                .with_location(&fixture.venue)
                .with_description(&fixture.score),
        );
    }

    calendar
}
