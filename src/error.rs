use std::path::PathBuf;

use ::scraper::error::SelectorErrorKind;

/// All errors that can occur while scraping and storing a circuit.
#[derive(thiserror::Error, Debug)]
pub enum VlrError {
    /// HTTP request failed (network, DNS, TLS, timeout, etc.).
    #[error("http request failed for {url}: {}", describe(.source))]
    Http {
        url: String,
        source: reqwest::Error,
    },

    /// Server returned a non-success HTTP status code.
    #[error("unexpected status {status} for {url}")]
    UnexpectedStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    /// Failed to read the response body as text.
    #[error("failed to read response body from {url}: {}", describe(.source))]
    ResponseBody {
        url: String,
        source: reqwest::Error,
    },

    /// A link did not have the `{prefix}{id}/...` shape ids are cut from.
    #[error("malformed link {href:?}, expected {prefix}<id>/...")]
    MalformedLink { href: String, prefix: &'static str },

    /// The site labelled an agent that is not in [`Agent`](crate::model::Agent).
    #[error("unknown agent {0:?}")]
    UnknownAgent(String),

    /// The site labelled a map that is not in [`Map`](crate::model::Map).
    #[error("unknown map {0:?}")]
    UnknownMap(String),

    /// A CSS selector string could not be parsed.
    #[error("invalid CSS selector: {0}")]
    Selector(String),

    /// An expected HTML element was not found on the page.
    #[error("expected element not found: {context}")]
    ElementNotFound { context: &'static str },

    /// Reading or writing a local file failed.
    #[error("io error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for [`ScrapeConfig`](crate::config::ScrapeConfig).
    #[error("invalid config {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl VlrError {
    /// Whether this error came from retrieving a page rather than reading it.
    pub fn is_fetch(&self) -> bool {
        matches!(
            self,
            VlrError::Http { .. } | VlrError::UnexpectedStatus { .. } | VlrError::ResponseBody { .. }
        )
    }
}

/// A reqwest error with its cause chain, which its own message leaves out.
fn describe(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut cause = std::error::Error::source(err);
    while let Some(c) = cause {
        message.push_str(": ");
        message.push_str(&c.to_string());
        cause = c.source();
    }
    if err.is_timeout() {
        message.push_str(" (timed out)");
    }
    message
}

impl<'a> From<SelectorErrorKind<'a>> for VlrError {
    fn from(err: SelectorErrorKind<'a>) -> Self {
        VlrError::Selector(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, VlrError>;
