pub(crate) mod aliases;
pub(crate) mod deaths;
pub(crate) mod event;
pub(crate) mod map_detail;
pub(crate) mod outcome;
pub(crate) mod roster;
pub(crate) mod sides;
pub(crate) mod stats;

use ::scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::error::{Result, ScrapeError};

pub(crate) const BASE_URL: &str = "https://www.vlr.gg";

/// Fetch a URL and parse the response body as an HTML document.
pub(crate) async fn get_document(client: &reqwest::Client, url: &str) -> Result<Html> {
    debug!(url, "fetching page");

    let response = client.get(url).send().await.map_err(|e| ScrapeError::Http {
        url: url.to_owned(),
        source: e,
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(ScrapeError::UnexpectedStatus {
            url: url.to_owned(),
            status,
        });
    }

    let body = response.text().await.map_err(|e| ScrapeError::ResponseBody {
        url: url.to_owned(),
        source: e,
    })?;

    Ok(Html::parse_document(&body))
}

/// Find the first element matching `selector` inside `element`, or fail with
/// a structural-parse error naming the missing piece.
pub(crate) fn find_one<'a>(
    element: &ElementRef<'a>,
    selector: &Selector,
    context: &'static str,
) -> Result<ElementRef<'a>> {
    element
        .select(selector)
        .next()
        .ok_or(ScrapeError::ElementNotFound { context })
}

/// Extract trimmed text content from the first element matching `selector`
/// inside `element`. Returns an empty string if nothing matches.
pub(crate) fn select_text(element: &ElementRef, selector: &Selector) -> String {
    element
        .select(selector)
        .next()
        .and_then(|d| d.text().map(|t| t.trim()).find(|t| !t.is_empty()))
        .unwrap_or_default()
        .trim()
        .replace(['\n', '\t'], "")
        .to_string()
}

/// Like [`select_text`] but distinguishing "nothing there" from empty text.
pub(crate) fn select_text_opt(element: &ElementRef, selector: &Selector) -> Option<String> {
    let text = select_text(element, selector);
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
