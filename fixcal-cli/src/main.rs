//! fixcal CLI
//!
//! Serves MRHA hockey fixtures as subscribable iCalendar feeds, or prints a
//! single team's calendar.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use fixcal_api::{ApiConfig, ApiServer, TlsConfig, DEFAULT_ACME_CACHE_DIR};
use fixcal_cache::CacheConfig;
use fixcal_core::constants::DEFAULT_PORT;
use fixcal_core::types::TeamId;
use fixcal_scraper::{MrhaScraper, ScraperConfig};

/// fixcal - MRHA fixtures as calendar feeds
#[derive(Parser)]
#[command(name = "fixcal")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the calendar server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value_t = DEFAULT_PORT)]
        port: u16,
        /// Bind address
        #[arg(short, long, default_value = "0.0.0.0")]
        bind: String,
        /// Hours a scraped calendar stays cached
        #[arg(long, env = "CACHE_TTL_HOURS")]
        ttl_hours: Option<u64>,
        /// Serve HTTPS with a Let's Encrypt certificate for this domain only
        #[arg(long, env = "TLS_DOMAIN")]
        domain: Option<String>,
        /// Directory caching the ACME account and certificates
        #[arg(long, default_value = DEFAULT_ACME_CACHE_DIR, requires = "domain")]
        acme_cache_dir: PathBuf,
        /// Contact email for the ACME account
        #[arg(long, env = "ACME_EMAIL", requires = "domain")]
        acme_email: Option<String>,
        /// Use the Let's Encrypt staging directory
        #[arg(long, requires = "domain")]
        acme_staging: bool,
    },

    /// Scrape one team and print its calendar
    Fetch {
        /// MRHA team id
        team_id: String,
        /// Write the calendar to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Team page URL
        #[arg(long, env = "MRHA_BASE_URL")]
        base_url: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "fixcal=debug,info"
    } else {
        "fixcal=info,warn"
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into());
    if cli.json_logs {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    match cli.command {
        Commands::Serve {
            port,
            bind,
            ttl_hours,
            domain,
            acme_cache_dir,
            acme_email,
            acme_staging,
        } => {
            let tls = domain.map(|domain| TlsConfig {
                domain,
                cache_dir: acme_cache_dir,
                contact: acme_email,
                production: !acme_staging,
            });
            cmd_serve(port, &bind, ttl_hours, tls).await
        }
        Commands::Fetch { team_id, output, base_url } => cmd_fetch(&team_id, output, base_url).await,
    }
}

/// Run calendar server
async fn cmd_serve(port: u16, bind: &str, ttl_hours: Option<u64>, tls: Option<TlsConfig>) -> Result<()> {
    let mut config = ApiConfig::from_env();
    if let Some(hours) = ttl_hours {
        config.cache = match CacheConfig::from_hours(hours) {
            Some(cache) => cache,
            None => bail!("--ttl-hours {} is too large", hours),
        };
    }
    if tls.is_some() {
        config.tls = tls;
    }
    debug!(?config, "Loaded configuration");

    let (scheme, host) = match &config.tls {
        Some(tls) => ("https", tls.domain.clone()),
        None => ("http", bind.to_string()),
    };
    println!("{}", "🏑 Starting fixcal server...".cyan().bold());
    println!("   {} {}://{}:{}/calendar/mrha/?teamId=<id>", "Calendars:".green(), scheme, host, port);
    println!("   {} {}://{}:{}/health", "Health check:".dimmed(), scheme, host, port);
    if config.admin_token.is_none() {
        println!("   {} set ADMIN_TOKEN to enable invalidation", "Note:".dimmed());
    }
    println!("   {} {}h", "Cache TTL:".dimmed(), config.cache.ttl_seconds / 3600);
    println!("\n   Press Ctrl+C to stop.\n");

    let server = ApiServer::new(config).context("Invalid server configuration")?;

    let addr: SocketAddr = format!("{}:{}", bind, port)
        .parse()
        .context("Invalid bind address")?;
    server.run(addr).await.context("Server failed")?;

    println!("{}", "👋 Server stopped.".dimmed());
    Ok(())
}

/// Scrape and print one team's calendar
async fn cmd_fetch(team_id: &str, output: Option<PathBuf>, base_url: Option<String>) -> Result<()> {
    let team = TeamId::new(team_id).context("Invalid team id")?;

    let config = match base_url {
        Some(url) => ScraperConfig::with_base_url(url),
        None => ScraperConfig::default(),
    };
    let scraper = MrhaScraper::with_config(&config).context("Invalid scraper configuration")?;

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message(format!("Fetching fixtures for team {}", team));
    pb.enable_steady_tick(Duration::from_millis(100));

    let result = scraper.scrape(&team).await;
    pb.finish_and_clear();

    let calendar = result.with_context(|| format!("Failed to fetch fixtures for team {}", team))?;

    if let Some(path) = output {
        std::fs::write(&path, calendar.to_string())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        eprintln!(
            "{} {} events saved to {}",
            "✅".green(),
            calendar.len(),
            path.display()
        );
    } else {
        print!("{}", calendar);
        eprintln!("{} {} events", "✅".green(), calendar.len());
    }

    Ok(())
}
