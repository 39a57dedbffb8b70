//! App state: fixture cache and config.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use subtle::ConstantTimeEq;
use tokio::time::Instant;
use tracing::warn;

use fixcal_cache::{CacheConfig, MemoCache};
use fixcal_core::error::Result;
use fixcal_scraper::{MrhaScraper, ScraperConfig};

/// Default per-request deadline, upstream fetch included.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Default time a client gets to send its request headers.
pub const DEFAULT_HEADER_READ_TIMEOUT_SECS: u64 = 5;

/// Default directory for ACME account keys and certificates.
pub const DEFAULT_ACME_CACHE_DIR: &str = "secrets";

#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub scraper: ScraperConfig,
    pub cache: CacheConfig,
    pub request_timeout_seconds: u64,
    pub header_read_timeout_seconds: u64,
    /// Required by `DELETE /calendar/mrha/`; the route answers 404 without it
    pub admin_token: Option<AdminToken>,
    /// Serve HTTPS with an ACME certificate instead of plain HTTP
    pub tls: Option<TlsConfig>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            scraper: ScraperConfig::default(),
            cache: CacheConfig::default(),
            request_timeout_seconds: DEFAULT_REQUEST_TIMEOUT_SECS,
            header_read_timeout_seconds: DEFAULT_HEADER_READ_TIMEOUT_SECS,
            admin_token: None,
            tls: None,
        }
    }
}

impl ApiConfig {
    /// Reads the server settings from the environment, loading `.env` first.
    ///
    /// | Variable | Setting |
    /// |----------|---------|
    /// | `MRHA_BASE_URL` | team page URL |
    /// | `CACHE_TTL_HOURS` | cache TTL |
    /// | `UPSTREAM_TIMEOUT_SECS` | upstream fetch timeout |
    /// | `REQUEST_TIMEOUT_SECS` | per-request deadline |
    /// | `HEADER_READ_TIMEOUT_SECS` | request header deadline |
    /// | `ADMIN_TOKEN` | bearer token for invalidation |
    /// | `TLS_DOMAIN` | enables ACME TLS for this domain |
    /// | `ACME_CACHE_DIR`, `ACME_EMAIL`, `ACME_STAGING` | ACME account settings |
    ///
    /// Unset or unparsable values keep their defaults.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        Self::from_vars(|name| std::env::var(name).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let number = |name: &str| var(name).and_then(|v| v.trim().parse::<u64>().ok());
        let non_empty = |name: &str| var(name).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let cache = match number("CACHE_TTL_HOURS") {
            Some(hours) => CacheConfig::from_hours(hours).unwrap_or_else(|| {
                warn!(hours, "CACHE_TTL_HOURS out of range, using default TTL");
                CacheConfig::default()
            }),
            None => CacheConfig::default(),
        };

        let tls = non_empty("TLS_DOMAIN").map(|domain| TlsConfig {
            domain: domain.trim().to_string(),
            cache_dir: non_empty("ACME_CACHE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_ACME_CACHE_DIR)),
            contact: non_empty("ACME_EMAIL"),
            production: !var("ACME_STAGING").map_or(false, |v| v == "1" || v == "true"),
        });

        Self {
            scraper: ScraperConfig {
                base_url: var("MRHA_BASE_URL").unwrap_or(defaults.scraper.base_url),
                timeout_seconds: number("UPSTREAM_TIMEOUT_SECS")
                    .unwrap_or(defaults.scraper.timeout_seconds),
            },
            cache,
            request_timeout_seconds: number("REQUEST_TIMEOUT_SECS")
                .unwrap_or(defaults.request_timeout_seconds),
            header_read_timeout_seconds: number("HEADER_READ_TIMEOUT_SECS")
                .unwrap_or(defaults.header_read_timeout_seconds),
            admin_token: non_empty("ADMIN_TOKEN").map(AdminToken::new),
            tls,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    pub fn header_read_timeout(&self) -> Duration {
        Duration::from_secs(self.header_read_timeout_seconds)
    }
}

/// ACME (Let's Encrypt) certificate settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TlsConfig {
    /// The only host name a certificate is requested for
    pub domain: String,
    /// Account key and certificate cache
    pub cache_dir: PathBuf,
    /// Contact email registered with the ACME account
    pub contact: Option<String>,
    /// Let's Encrypt production directory; staging otherwise
    pub production: bool,
}

impl TlsConfig {
    /// Production ACME settings for `domain`, cached in `secrets/`.
    pub fn for_domain(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            cache_dir: PathBuf::from(DEFAULT_ACME_CACHE_DIR),
            contact: None,
            production: true,
        }
    }
}

/// Shared secret for admin endpoints. Never printed.
#[derive(Clone)]
pub struct AdminToken(String);

impl AdminToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Constant-time comparison against a presented token.
    pub fn matches(&self, presented: &str) -> bool {
        self.0.as_bytes().ct_eq(presented.as_bytes()).into()
    }
}

impl fmt::Debug for AdminToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AdminToken(<redacted>)")
    }
}

pub struct AppState {
    pub config: ApiConfig,
    pub cache: MemoCache<MrhaScraper>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(config: ApiConfig) -> Result<Self> {
        let scraper = MrhaScraper::with_config(&config.scraper)?;
        let cache = MemoCache::with_config(scraper, config.cache.clone());

        Ok(Self {
            config,
            cache,
            started_at: Instant::now(),
        })
    }
}
