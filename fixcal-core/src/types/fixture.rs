//! Fixture rows scraped from the league table.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::constants::FIXTURE_ROW_CELLS;

/// Layouts tried, in order, against `"<date> <time>"`.
const KICKOFF_FORMATS: [&str; 4] = [
    "%d %b %Y %I:%M%p",
    "%d %b %Y %I.%M%p",
    "%d %b %Y %H.%M",
    "%d %b %Y %H:%M",
];

/// Layout for the date cell alone.
const DATE_FORMAT: &str = "%d %b %Y";

/// One fixture as it appears in the upstream table. All cells are kept as text.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fixture {
    /// e.g. `14 Sep 2024`
    pub date: String,
    /// e.g. `2:30pm`, `14.30`, or empty
    pub time: String,
    /// Home team
    pub home: String,
    /// Away team
    pub away: String,
    /// Score, empty until played
    pub score: String,
    /// Venue
    pub venue: String,
}

impl Fixture {
    /// Builds a fixture from a table row.
    ///
    /// Cells are ordered date, home, score, away, time, venue. Rows with any
    /// other number of cells (headers, section titles) return `None`.
    pub fn from_row<S: AsRef<str>>(cells: &[S]) -> Option<Self> {
        if cells.len() != FIXTURE_ROW_CELLS {
            return None;
        }
        let cell = |i: usize| cells[i].as_ref().to_string();

        Some(Self {
            date: cell(0),
            home: cell(1),
            score: cell(2),
            away: cell(3),
            time: cell(4),
            venue: cell(5),
        })
    }

    /// Local kick-off time.
    ///
    /// Falls back to midnight when only the date parses, and returns `None`
    /// when the date itself is unreadable.
    pub fn kickoff(&self) -> Option<NaiveDateTime> {
        let date = self.date.trim();
        let combined = format!("{} {}", date, self.time.trim());

        KICKOFF_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(&combined, fmt).ok())
            .or_else(|| {
                NaiveDate::parse_from_str(date, DATE_FORMAT)
                    .ok()
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
            })
    }

    /// Event title, `"<home> vs <away>"`.
    pub fn summary(&self) -> String {
        format!("{} vs {}", self.home, self.away)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn fixture(date: &str, time: &str) -> Fixture {
        Fixture {
            date: date.into(),
            time: time.into(),
            ..Default::default()
        }
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_from_row_column_order() {
        let row = ["14 Sep 2024", "Ramblers", "2-1", "Wanderers", "2:30pm", "Park Lane"];
        let f = Fixture::from_row(&row).unwrap();
        assert_eq!(f.date, "14 Sep 2024");
        assert_eq!(f.home, "Ramblers");
        assert_eq!(f.score, "2-1");
        assert_eq!(f.away, "Wanderers");
        assert_eq!(f.time, "2:30pm");
        assert_eq!(f.venue, "Park Lane");
        assert_eq!(f.summary(), "Ramblers vs Wanderers");
    }

    #[test]
    fn test_from_row_rejects_wrong_width() {
        assert!(Fixture::from_row(&["Date", "Home", "Away"]).is_none());
        assert!(Fixture::from_row::<&str>(&[]).is_none());
    }

    #[test_case("2:30pm", 14, 30 ; "colon pm")]
    #[test_case("11:00am", 11, 0 ; "colon am")]
    #[test_case("1.15pm", 13, 15 ; "dot pm")]
    #[test_case("12:00pm", 12, 0 ; "noon")]
    #[test_case("19.45", 19, 45 ; "dot 24h")]
    #[test_case("09:30", 9, 30 ; "colon 24h")]
    fn test_kickoff_formats(time: &str, hour: u32, minute: u32) {
        let f = fixture("7 Sep 2024", time);
        assert_eq!(f.kickoff(), Some(at(2024, 9, 7, hour, minute)));
    }

    #[test_case("" ; "empty")]
    #[test_case("TBA" ; "placeholder")]
    fn test_kickoff_date_only(time: &str) {
        let f = fixture("21 Dec 2024", time);
        assert_eq!(f.kickoff(), Some(at(2024, 12, 21, 0, 0)));
    }

    #[test]
    fn test_kickoff_unreadable_date() {
        assert!(fixture("Postponed", "2:30pm").kickoff().is_none());
    }
}
