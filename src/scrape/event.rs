use itertools::Itertools;
use scraper::{Html, Selector};
use tracing::{debug, warn};

use crate::error::{Result, ScrapeError};
use crate::model::{Event, MatchLink};
use crate::scrape::{self, select_text, select_text_opt, BASE_URL};

pub(crate) async fn get_event(client: &reqwest::Client, path: &str) -> Result<Event> {
    let url = absolute_url(path);
    let document = scrape::get_document(client, &url).await?;
    parse_event(&document)
}

/// Locate an event by name on the listings page, then fetch its page.
pub(crate) async fn find_event(client: &reqwest::Client, name: &str) -> Result<Event> {
    let url = format!("{BASE_URL}/events");
    let document = scrape::get_document(client, &url).await?;

    let item_selector = Selector::parse("a.event-item")?;
    let title_selector = Selector::parse("div.event-item-title")?;
    let root = document.root_element();
    let path = root
        .select(&item_selector)
        .find(|item| {
            select_text(item, &title_selector).eq_ignore_ascii_case(name.trim())
        })
        .and_then(|item| item.value().attr("href"))
        .map(str::to_string)
        .ok_or_else(|| ScrapeError::EventNotFound {
            name: name.to_string(),
        })?;

    get_event(client, &path).await
}

/// Extract the event name and its match links from an event page.
pub(crate) fn parse_event(document: &Html) -> Result<Event> {
    let root = document.root_element();

    let name_selector = Selector::parse("div.event-information h1")?;
    let name = select_text_opt(&root, &name_selector).ok_or(ScrapeError::ElementNotFound {
        context: "event name (div.event-information h1)",
    })?;

    let link_selector = Selector::parse("#match-overview a")?;
    let info_selector = Selector::parse("div.match-info-match")?;
    let matches = root
        .select(&link_selector)
        .filter_map(|link| {
            let Some(path) = link.value().attr("href") else {
                warn!("match link without href, skipping");
                return None;
            };
            let teams = select_text(&link, &info_selector);
            Some(MatchLink {
                name: normalize_match_name(&teams),
                path: path.to_string(),
            })
        })
        .collect_vec();

    debug!(%name, matches = matches.len(), "parsed event page");
    Ok(Event { name, matches })
}

/// `"Alpha vs Beta"` → `"Alpha-Beta"`.
fn normalize_match_name(text: &str) -> String {
    text.split("vs").map(str::trim).join("-")
}

pub(crate) fn absolute_url(path: &str) -> String {
    if path.starts_with("http") {
        path.to_string()
    } else {
        format!("{BASE_URL}{path}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
          <div class="event-information"><h1> Champions Berlin </h1></div>
          <div id="match-overview">
            <a href="/12345/alpha-vs-beta"><div class="match-info-match">Alpha vs Beta</div></a>
            <a href="/12346/gamma-vs-delta"><div class="match-info-match">Gamma vs Delta</div></a>
            <a><div class="match-info-match">No vs Link</div></a>
          </div>
        </body></html>
    "#;

    #[test]
    fn parses_name_and_match_links() {
        let document = Html::parse_document(PAGE);
        let event = parse_event(&document).unwrap();
        assert_eq!(event.name, "Champions Berlin");
        assert_eq!(event.matches.len(), 2);
        assert_eq!(event.matches[0].name, "Alpha-Beta");
        assert_eq!(event.matches[0].path, "/12345/alpha-vs-beta");
        assert_eq!(event.matches[1].name, "Gamma-Delta");
    }

    #[test]
    fn find_match_by_name() {
        let document = Html::parse_document(PAGE);
        let event = parse_event(&document).unwrap();
        assert!(event.find_match("Gamma-Delta").is_some());
        assert!(event.find_match("Alpha-Gamma").is_none());
    }

    #[test]
    fn missing_event_name_is_structural() {
        let document = Html::parse_document("<html><body></body></html>");
        assert!(matches!(
            parse_event(&document),
            Err(ScrapeError::ElementNotFound { .. })
        ));
    }

    #[test]
    fn match_names_are_normalized() {
        assert_eq!(normalize_match_name("Alpha vs Beta"), "Alpha-Beta");
        assert_eq!(normalize_match_name("  A  vs  B "), "A-B");
    }
}
