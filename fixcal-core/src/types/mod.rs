//! Domain types for fixcal.
//!
//! - [`TeamId`]: validated upstream team identifier, the cache key
//! - [`Fixture`]: one row of the league fixtures table
//! - [`Event`]: one calendar entry built from a fixture
//! - [`Calendar`]: a team's iCalendar feed

mod team;
mod fixture;
mod calendar;

pub use team::*;
pub use fixture::*;
pub use calendar::*;
