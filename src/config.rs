use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::Datelike;
use serde::Deserialize;

use crate::error::{Result, VlrError};

pub const DEFAULT_BASE_URL: &str = "https://www.vlr.gg";

/// User-Agent string for scrape requests.
pub const DEFAULT_USER_AGENT: &str = concat!("vct-scraper/", env!("CARGO_PKG_VERSION"));

/// Settings for one circuit scrape.
///
/// Every key is optional in the TOML file:
///
/// ```toml
/// year = 2024
/// output-root = "out"
/// request-delay-ms = 3000
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct ScrapeConfig {
    /// Scheme and host every page path is appended to.
    pub base_url: String,
    /// Circuit year, `/vct-{year}` on the site.
    pub year: i32,
    /// Directory the per-circuit output directory is created under.
    pub output_root: PathBuf,
    /// Pause after every tournament and match page fetch.
    pub request_delay_ms: u64,
    /// Per-request timeout; a timeout is a fetch failure.
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        ScrapeConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            year: current_year(),
            output_root: PathBuf::from("out"),
            request_delay_ms: 3000,
            timeout_secs: 5,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ScrapeConfig {
    /// Load a config file; keys it leaves out keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| VlrError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| VlrError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn circuit_path(&self) -> String {
        format!("/vct-{}", self.year)
    }

    /// Output directory name relative to [`output_root`](Self::output_root).
    pub fn rel_path(&self) -> String {
        format!("vct_{}", self.year)
    }

    pub fn output_dir(&self) -> PathBuf {
        self.output_root.join(self.rel_path())
    }

    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn current_year() -> i32 {
    chrono::Local::now().year()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_defaults_target_current_year() {
        let config = ScrapeConfig::default();
        let year = chrono::Local::now().year();
        assert_eq!(config.circuit_path(), format!("/vct-{year}"));
        assert_eq!(config.output_dir(), PathBuf::from("out").join(format!("vct_{year}")));
        assert_eq!(config.request_delay(), Duration::from_secs(3));
        assert_eq!(config.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "year = 2023\nrequest-delay-ms = 0\noutput-root = \"data\"").unwrap();

        let config = ScrapeConfig::load(file.path()).unwrap();
        assert_eq!(config.year, 2023);
        assert_eq!(config.request_delay_ms, 0);
        assert_eq!(config.output_dir(), PathBuf::from("data/vct_2023"));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_load_rejects_unknown_keys() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "max-depth = 3").unwrap();
        assert!(matches!(
            ScrapeConfig::load(file.path()),
            Err(VlrError::Config { .. })
        ));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            ScrapeConfig::load(Path::new("/nonexistent/vct.toml")),
            Err(VlrError::Io { .. })
        ));
    }
}
