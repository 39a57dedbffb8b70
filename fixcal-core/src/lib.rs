//! # fixcal Core
//!
//! Core types, errors, and traits shared by every fixcal crate.
//!
//! - **Types**: fixtures scraped from a league table, calendar events, calendars
//! - **Errors**: [`FixtureError`], cloneable so one failed computation can be
//!   handed to every caller waiting on it
//! - **Constants**: upstream URL, time zone, event duration, cache TTL
//! - **Traits**: [`Compute`], the seam between the cache and the scraper
//!
//! ## Example
//!
//! ```rust
//! use fixcal_core::{Calendar, Event};
//! use chrono::{NaiveDate, Utc};
//!
//! let start = NaiveDate::from_ymd_opt(2024, 9, 14)
//!     .unwrap()
//!     .and_hms_opt(14, 0, 0)
//!     .unwrap();
//! let mut cal = Calendar::new("MRHA Fixtures 42");
//! cal.add(Event::new("fixture0", "Home vs Away", start, Utc::now()));
//! assert!(cal.to_string().starts_with("BEGIN:VCALENDAR"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use constants::*;
pub use error::{FixtureError, Result};
pub use traits::*;
pub use types::*;
