//! End-to-end scraping: team page in, calendar out.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use scraper::Html;
use tracing::{info, instrument};

use fixcal_core::error::{FixtureError, Result};
use fixcal_core::traits::Compute;
use fixcal_core::types::{Calendar, TeamId};

use crate::calendar::build_calendar;
use crate::client::{MrhaClient, ScraperConfig};
use crate::table::{find_fixtures_table, parse_fixtures, parse_table};

/// Parses a downloaded team page into `team`'s calendar.
///
/// Kept synchronous: the parsed document is not `Send` and must not live
/// across an await point.
pub fn extract_calendar(team: &TeamId, html: &str, created: DateTime<Utc>) -> Result<Calendar> {
    let doc = Html::parse_document(html);
    let table = find_fixtures_table(&doc)?;
    let rows = parse_table(table)?;
    let fixtures = parse_fixtures(&rows);
    Ok(build_calendar(team, &fixtures, created))
}

/// Fetches and converts MRHA fixture lists.
#[derive(Clone, Debug)]
pub struct MrhaScraper {
    client: MrhaClient,
}

impl MrhaScraper {
    /// Creates a scraper for the public MRHA site.
    pub fn new() -> Result<Self> {
        Self::with_config(&ScraperConfig::default())
    }

    /// Creates a scraper with custom configuration.
    pub fn with_config(config: &ScraperConfig) -> Result<Self> {
        Ok(Self {
            client: MrhaClient::with_config(config)?,
        })
    }

    /// Downloads `team`'s page and builds its calendar.
    #[instrument(skip_all, fields(team = %team))]
    pub async fn scrape(&self, team: &TeamId) -> Result<Calendar> {
        let html = self.client.fetch_page(team).await?;
        let calendar = extract_calendar(team, &html, Utc::now())?;
        info!(events = calendar.len(), "Built calendar");
        Ok(calendar)
    }
}

#[async_trait]
impl Compute for MrhaScraper {
    type Key = TeamId;
    type Value = Arc<Calendar>;
    type Error = FixtureError;

    async fn compute(&self, key: &TeamId) -> Result<Arc<Calendar>> {
        self.scrape(key).await.map(Arc::new)
    }
}
