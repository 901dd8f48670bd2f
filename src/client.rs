use std::time::Duration;

use tokio::time::sleep;
use tracing::instrument;

use crate::error::{Result, ScrapeError};
use crate::model::{Event, EventStats, MapStats, MatchStats};
use crate::scrape;

/// The main entry point for scraping round data from VLR.gg.
///
/// `RoundsClient` wraps a [`reqwest::Client`] and exposes methods to fetch
/// event pages and match pages. Match pages of an event are fetched
/// strictly one after another, with a fixed delay between requests to
/// respect the site's implicit rate limits.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> vlr_rounds::Result<()> {
/// use vlr_rounds::{flatten, RoundsClient};
///
/// let client = RoundsClient::new();
/// let stats = client.scrape_event_by_name("Champions Berlin").await?;
/// let tables = flatten::flatten_event(&stats);
/// println!("{} team rows", tables.team_rounds.len());
/// # Ok(())
/// # }
/// ```
pub struct RoundsClient {
    http: reqwest::Client,
    fetch_delay: Duration,
}

impl RoundsClient {
    const DEFAULT_FETCH_DELAY: Duration = Duration::from_secs(1);

    /// Create a new client with default settings.
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
            fetch_delay: Self::DEFAULT_FETCH_DELAY,
        }
    }

    /// Create a new client using the provided [`reqwest::Client`].
    ///
    /// Use this when you need to configure timeouts, proxies, headers, etc.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            http: client,
            fetch_delay: Self::DEFAULT_FETCH_DELAY,
        }
    }

    /// Override the pause inserted between successive match fetches.
    pub fn fetch_delay(mut self, delay: Duration) -> Self {
        self.fetch_delay = delay;
        self
    }

    /// Fetch an event page by path and extract its name and match links.
    #[instrument(skip(self))]
    pub async fn get_event(&self, path: &str) -> Result<Event> {
        scrape::event::get_event(&self.http, path).await
    }

    /// Locate an event by name on the listings page and fetch its page.
    ///
    /// Fails with [`crate::ScrapeError::EventNotFound`] when no listed
    /// event carries that name.
    #[instrument(skip(self))]
    pub async fn find_event(&self, name: &str) -> Result<Event> {
        scrape::event::find_event(&self.http, name).await
    }

    /// Fetch a match page by path and extract every map's round timeline.
    #[instrument(skip(self))]
    pub async fn get_match(&self, path: &str) -> Result<Vec<MapStats>> {
        scrape::map_detail::get_match(&self.http, path).await
    }

    /// Fetch one match of an event, selected by its normalized name
    /// (e.g. `"Alpha-Beta"`).
    #[instrument(skip(self))]
    pub async fn scrape_match(&self, event_path: &str, match_name: &str) -> Result<MatchStats> {
        let event = self.get_event(event_path).await?;
        let link = event
            .find_match(match_name)
            .ok_or_else(|| ScrapeError::MatchNotFound {
                name: match_name.to_string(),
            })?;
        let maps = self.get_match(&link.path).await?;
        Ok(MatchStats {
            name: link.name.clone(),
            maps,
        })
    }

    /// Fetch an event page, then every linked match page in order.
    ///
    /// Fail-fast: the first fetch or parse error aborts the whole scrape.
    #[instrument(skip(self))]
    pub async fn scrape_event(&self, path: &str) -> Result<EventStats> {
        let event = self.get_event(path).await?;
        self.scrape_matches(event).await
    }

    /// Like [`RoundsClient::scrape_event`], selecting the event by name.
    #[instrument(skip(self))]
    pub async fn scrape_event_by_name(&self, name: &str) -> Result<EventStats> {
        let event = self.find_event(name).await?;
        self.scrape_matches(event).await
    }

    async fn scrape_matches(&self, event: Event) -> Result<EventStats> {
        let mut matches = Vec::with_capacity(event.matches.len());
        for link in &event.matches {
            sleep(self.fetch_delay).await;
            let maps = self.get_match(&link.path).await?;
            matches.push(MatchStats {
                name: link.name.clone(),
                maps,
            });
        }
        Ok(EventStats {
            event_name: event.name,
            matches,
        })
    }
}

impl Default for RoundsClient {
    fn default() -> Self {
        Self::new()
    }
}
