use serde::Serialize;

use crate::model::MapStats;

/// An event page: its name and the match pages it links to.
///
/// Built once per scrape session and immutable afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct Event {
    pub name: String,
    pub matches: Vec<MatchLink>,
}

impl Event {
    /// Look up a match link by its normalized name (e.g. `"Alpha-Beta"`).
    pub fn find_match(&self, name: &str) -> Option<&MatchLink> {
        self.matches.iter().find(|m| m.name == name)
    }
}

/// A link from an event page to one match page.
#[derive(Debug, Clone, Serialize)]
pub struct MatchLink {
    /// Team names joined with `-`, as derived from the link text.
    pub name: String,
    /// Site-relative path of the match page.
    pub path: String,
}

/// All maps of a single match, keyed by encounter order.
#[derive(Debug, Clone, Serialize)]
pub struct MatchStats {
    pub name: String,
    pub maps: Vec<MapStats>,
}

/// Every match of an event, fully extracted.
#[derive(Debug, Clone, Serialize)]
pub struct EventStats {
    pub event_name: String,
    pub matches: Vec<MatchStats>,
}
