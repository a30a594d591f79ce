//! Scrapes a VCT circuit year from vlr.gg into flat tables.
//!
//! [`CircuitCollector`] walks the circuit page, every tournament's match list
//! and every official match page, deduplicating tournaments, matches, teams
//! and players by their site id. [`store::write_tables`] writes the result as
//! CSV.

pub use client::VlrClient;
pub use collector::CircuitCollector;
pub use config::ScrapeConfig;
pub use error::{Result, VlrError};

pub mod client;
pub mod collector;
pub mod config;
pub mod error;
pub mod model;
pub(crate) mod scraper;
pub mod store;
