use tracing::instrument;

use crate::config::ScrapeConfig;
use crate::error::{Result, VlrError};
use crate::model::{MatchDetail, MatchStub, TournamentLink};
use crate::scraper;

/// Fetches vlr.gg pages and runs the matching extractor over them.
///
/// Requests carry a fixed timeout and are never retried.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> vct_scraper::Result<()> {
/// use vct_scraper::{ScrapeConfig, VlrClient};
///
/// let config = ScrapeConfig::default();
/// let client = VlrClient::new(&config)?;
/// let tournaments = client.get_circuit(&config.circuit_path()).await?;
/// println!("Found {} tournaments", tournaments.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct VlrClient {
    http: reqwest::Client,
    base_url: String,
}

impl VlrClient {
    /// Build a client with the timeout and user agent from `config`.
    pub fn new(config: &ScrapeConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout())
            .build()
            .map_err(|e| VlrError::Http {
                url: config.base_url.clone(),
                source: e,
            })?;
        Ok(Self::with_client(http, &config.base_url))
    }

    /// Use the provided [`reqwest::Client`] against `base_url`.
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            http: client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET a site path such as `/vct-2024` and return the raw markup.
    pub async fn fetch(&self, path: &str) -> Result<String> {
        let url = format!("{}{path}", self.base_url);
        scraper::fetch_page(&self.http, &url).await
    }

    /// Tournaments of a circuit, in page order (newest first).
    #[instrument(skip(self))]
    pub async fn get_circuit(&self, circuit_path: &str) -> Result<Vec<TournamentLink>> {
        let markup = self.fetch(circuit_path).await?;
        scraper::circuit::parse_circuit(&markup)
    }

    /// Official matches of a tournament.
    #[instrument(skip(self))]
    pub async fn get_matchlist(&self, event_id: &str) -> Result<Vec<MatchStub>> {
        let markup = self.fetch(&format!("/event/matches/{event_id}")).await?;
        scraper::matchlist::parse_matchlist(&markup)
    }

    /// Teams, winner and per-map roster tables of a match.
    #[instrument(skip(self))]
    pub async fn get_match(&self, match_id: &str) -> Result<MatchDetail> {
        let markup = self.fetch(&format!("/{match_id}")).await?;
        scraper::match_detail::parse_match_detail(&markup)
    }
}
