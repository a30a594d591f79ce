use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use vct_scraper::{store, CircuitCollector, ScrapeConfig, VlrClient};

/// Scrape a VCT circuit year from vlr.gg into CSV tables.
#[derive(Parser, Debug)]
#[command(name = "vct-scrape", version, about, long_about = None)]
struct Cli {
    /// TOML file with scrape settings
    #[arg(short, long, env = "VCT_SCRAPE_CONFIG")]
    config: Option<PathBuf>,

    /// Circuit year (defaults to the current year)
    #[arg(short, long)]
    year: Option<i32>,

    /// Directory the per-year output directory is created in
    #[arg(short, long, env = "VCT_SCRAPE_OUT")]
    out: Option<PathBuf>,

    /// Pause after every tournament and match page, in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    fn into_config(self) -> vct_scraper::Result<ScrapeConfig> {
        let mut config = match &self.config {
            Some(path) => ScrapeConfig::load(path)?,
            None => ScrapeConfig::default(),
        };
        if let Some(year) = self.year {
            config.year = year;
        }
        if let Some(out) = self.out {
            config.output_root = out;
        }
        if let Some(delay_ms) = self.delay_ms {
            config.request_delay_ms = delay_ms;
        }
        Ok(config)
    }
}

fn setup_logging(verbose: u8, quiet: bool) {
    let default = if quiet {
        "error"
    } else {
        match verbose {
            0 => "vct_scraper=info,warn",
            1 => "vct_scraper=debug,info",
            _ => "trace",
        }
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    setup_logging(cli.verbose, cli.quiet);
    let config = cli.into_config()?;

    tracing::info!(year = config.year, base_url = %config.base_url, "scraping circuit");
    let client = VlrClient::new(&config)?;
    let collector = CircuitCollector::new(client, config.request_delay());
    let data = collector.collect(&config.circuit_path()).await?;

    let dir = config.output_dir();
    store::write_tables(&data, &dir)?;

    for item in &data.skipped {
        tracing::warn!(kind = %item.kind, id = %item.id, reason = %item.reason, "skipped");
    }
    tracing::info!(
        tournaments = data.tournaments.len(),
        matches = data.matches.len(),
        teams = data.teams.len(),
        players = data.players.len(),
        skipped = data.skipped.len(),
        dir = %dir.display(),
        "done"
    );
    Ok(())
}
