use ::scraper::error::SelectorErrorKind;
use std::num::ParseIntError;

/// All errors that can occur while scraping round data.
#[derive(thiserror::Error, Debug)]
pub enum ScrapeError {
    /// HTTP request failed (network, DNS, TLS, timeout, etc.).
    #[error("http request failed for {url}: {source}")]
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
    #[error("failed to read response body from {url}: {source}")]
    ResponseBody {
        url: String,
        source: reqwest::Error,
    },

    /// No event with the given name on the listings page.
    #[error("event not found: {name}")]
    EventNotFound { name: String },

    /// No match with the given name among an event's match links.
    #[error("match not found: {name}")]
    MatchNotFound { name: String },

    /// A CSS selector string could not be parsed.
    #[error("invalid CSS selector: {0}")]
    Selector(String),

    /// Failed to parse an integer from scraped text.
    #[error("failed to parse integer: {0}")]
    IntParse(#[from] ParseIntError),

    /// An expected HTML element was not found on the page.
    #[error("expected element not found: {context}")]
    ElementNotFound { context: &'static str },

    /// A per-round stats grid did not have the expected cell count.
    #[error("malformed stats grid ({context}): expected {expected} cells, found {found}")]
    GridShape {
        context: &'static str,
        expected: usize,
        found: usize,
    },

    /// A side label was neither "attack" nor "defense".
    #[error("unrecognized side label: {0}")]
    SideParse(String),

    /// The half-time side declarations do not form an attack/defense pair.
    #[error("inconsistent side schedule: {context}")]
    InvalidSides { context: &'static str },

    /// Data for a single round contradicts itself (e.g. no winner, two
    /// winners, or an overtime round with no published side).
    #[error("inconsistent round {round}: {context}")]
    InconsistentRound { round: u32, context: &'static str },
}

impl<'a> From<SelectorErrorKind<'a>> for ScrapeError {
    fn from(err: SelectorErrorKind<'a>) -> Self {
        ScrapeError::Selector(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
