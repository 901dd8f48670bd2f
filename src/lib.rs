//! Round-by-round Valorant match statistics scraped from vlr.gg match
//! pages.
//!
//! The extraction pipeline turns one match page into a normalized
//! per-round, per-team, per-player model ([`MapStats`] and friends), then
//! [`flatten`] walks the nested structure into two flat tables ready for
//! CSV/JSON serialization by the caller.
//!
//! Pages can come from the network via [`RoundsClient`] or from documents
//! you already hold via [`parse_event_page`] and [`parse_match_page`].

pub use client::RoundsClient;
pub use error::{Result, ScrapeError};

pub mod flatten;

mod client;
mod error;
mod model;
mod scrape;

pub use model::*;

use scraper::Html;

/// Parse an already-fetched event page.
pub fn parse_event_page(html: &str) -> Result<Event> {
    scrape::event::parse_event(&Html::parse_document(html))
}

/// Parse an already-fetched match page into its maps' round timelines.
pub fn parse_match_page(html: &str) -> Result<Vec<MapStats>> {
    scrape::map_detail::parse_match(&Html::parse_document(html))
}
