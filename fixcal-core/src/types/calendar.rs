//! iCalendar feed types.
//!
//! Rendering goes through [`std::fmt::Display`]. Output is RFC 5545 shaped:
//! CRLF line endings, escaped text values, local times tagged with
//! `TZID=Europe/London`.

use std::fmt;

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use chrono_tz::Europe::London;
use serde::{Deserialize, Serialize};

use crate::constants::{
    CALENDAR_NAME_PREFIX, CALENDAR_PRODID, CALENDAR_TZID, EVENT_DURATION_MINUTES,
    ICAL_DATETIME_FORMAT,
};

/// A single calendar entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Unique id within the calendar
    pub uid: String,
    /// Title
    pub summary: String,
    /// When the event was generated
    pub created: DateTime<Utc>,
    /// Local start time (Europe/London)
    pub start: NaiveDateTime,
    /// Local end time (Europe/London)
    pub end: NaiveDateTime,
    /// Venue
    pub location: String,
    /// Free text; carries the score for played fixtures
    pub description: String,
}

impl Event {
    /// Creates an event lasting the standard fixture length.
    pub fn new(
        uid: impl Into<String>,
        summary: impl Into<String>,
        start: NaiveDateTime,
        created: DateTime<Utc>,
    ) -> Self {
        Self {
            uid: uid.into(),
            summary: summary.into(),
            created,
            start,
            end: start + Duration::minutes(EVENT_DURATION_MINUTES),
            location: String::new(),
            description: String::new(),
        }
    }

    /// Sets the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stamp = self.created.with_timezone(&London);

        write!(f, "BEGIN:VEVENT\r\n")?;
        write!(f, "UID:{}\r\n", Escaped(&self.uid))?;
        write!(f, "DTSTAMP;TZID={}:{}\r\n", CALENDAR_TZID, stamp.format(ICAL_DATETIME_FORMAT))?;
        write!(f, "DTSTART;TZID={}:{}\r\n", CALENDAR_TZID, self.start.format(ICAL_DATETIME_FORMAT))?;
        write!(f, "DTEND;TZID={}:{}\r\n", CALENDAR_TZID, self.end.format(ICAL_DATETIME_FORMAT))?;
        write!(f, "SUMMARY:{}\r\n", Escaped(&self.summary))?;
        write!(f, "LOCATION:{}\r\n", Escaped(&self.location))?;
        write!(f, "DESCRIPTION:{}\r\n", Escaped(&self.description))?;
        write!(f, "END:VEVENT\r\n")
    }
}

/// A named list of events.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Calendar {
    /// Display name
    pub name: String,
    /// Events in table order
    pub events: Vec<Event>,
}

impl Calendar {
    /// Creates an empty calendar.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            events: Vec::new(),
        }
    }

    /// Creates the empty calendar for a team, `"MRHA Fixtures <team>"`.
    pub fn for_team(team: impl fmt::Display) -> Self {
        Self::new(format!("{} {}", CALENDAR_NAME_PREFIX, team))
    }

    /// Appends an event.
    pub fn add(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Number of events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns true if there are no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl fmt::Display for Calendar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BEGIN:VCALENDAR\r\n")?;
        write!(f, "VERSION:2.0\r\n")?;
        write!(f, "PRODID:{}\r\n", CALENDAR_PRODID)?;
        write!(f, "NAME:{}\r\n", Escaped(&self.name))?;
        write!(f, "X-WR-CALNAME:{}\r\n", Escaped(&self.name))?;
        for event in &self.events {
            write!(f, "{}", event)?;
        }
        write!(f, "END:VCALENDAR\r\n")
    }
}

/// TEXT value escaping (RFC 5545 §3.3.11).
struct Escaped<'a>(&'a str);

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.0.chars() {
            match c {
                '\\' => f.write_str("\\\\")?,
                ';' => f.write_str("\\;")?,
                ',' => f.write_str("\\,")?,
                '\n' => f.write_str("\\n")?,
                '\r' => {}
                c => write!(f, "{}", c)?,
            }
        }
        Ok(())
    }
}
