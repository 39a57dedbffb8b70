//! # fixcal MRHA scraper
//!
//! Fetches a team page from the MRHA league site, pulls the fixtures table out
//! of the HTML, and turns it into a [`Calendar`](fixcal_core::Calendar).
//! [`MrhaScraper`] implements [`Compute`](fixcal_core::Compute) so it can sit
//! directly behind the cache.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod calendar;
mod client;
mod source;
mod table;

pub use calendar::build_calendar;
pub use client::{MrhaClient, ScraperConfig};
pub use source::{extract_calendar, MrhaScraper};
pub use table::{find_fixtures_table, parse_fixtures, parse_table};
