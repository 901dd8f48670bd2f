use std::collections::HashSet;

use scraper::{ElementRef, Selector};
use tracing::{debug, warn};

use crate::error::Result;
use crate::model::TeamSlot;
use crate::scrape::aliases::TeamAliases;

/// The agents that died during one round, per team slot, lower-cased.
#[derive(Debug, Clone, Default)]
pub(crate) struct RoundDeaths {
    home: HashSet<String>,
    away: HashSet<String>,
}

impl RoundDeaths {
    /// Case-insensitive membership test for a player's resolved agent.
    pub(crate) fn contains(&self, slot: TeamSlot, agent: &str) -> bool {
        let set = match slot {
            TeamSlot::Home => &self.home,
            TeamSlot::Away => &self.away,
        };
        set.contains(&agent.to_lowercase())
    }

    fn insert(&mut self, slot: TeamSlot, agent: String) {
        match slot {
            TeamSlot::Home => self.home.insert(agent),
            TeamSlot::Away => self.away.insert(agent),
        };
    }
}

/// Collect each team's deaths from the round's kill-event icons.
///
/// A kill event carries at most one icon per team slot; a slot without an
/// icon is not a death for that team (the entry describes a killer or an
/// assist) and is skipped without comment. An icon whose path does not
/// match the agent filename pattern is also skipped, but logged, so a
/// site-side format change stays visible. Neither case fails the round.
pub(crate) fn parse_round_deaths(round_el: &ElementRef) -> Result<RoundDeaths> {
    let event_selector = Selector::parse("div.kill-events div.kill-event")?;
    let mut icon_selectors = Vec::with_capacity(TeamSlot::BOTH.len());
    for slot in TeamSlot::BOTH {
        let css = format!("div.{} img.agent-icon", TeamAliases::bundle(slot).role);
        icon_selectors.push(Selector::parse(&css)?);
    }
    let mut deaths = RoundDeaths::default();

    for event in round_el.select(&event_selector) {
        for (slot, icon_selector) in TeamSlot::BOTH.into_iter().zip(&icon_selectors) {
            let Some(icon) = event.select(icon_selector).next() else {
                // no death on this side of the kill event
                continue;
            };
            match icon.value().attr("src").and_then(agent_from_icon_src) {
                Some(agent) => deaths.insert(slot, agent),
                None => warn!(
                    src = icon.value().attr("src").unwrap_or_default(),
                    "agent icon path did not match the expected pattern, skipping"
                ),
            }
        }
    }

    debug!(
        home = deaths.home.len(),
        away = deaths.away.len(),
        "collected round deaths"
    );
    Ok(deaths)
}

/// Extract a lower-cased agent identifier from an icon's resource path.
///
/// The final path segment names the agent, optionally followed by a dash or
/// underscore suffix: `.../agents/Viper-icon.png` yields `viper`.
pub(crate) fn agent_from_icon_src(src: &str) -> Option<String> {
    let file = src.rsplit('/').next()?;
    let stem = file.split('.').next()?;
    let agent = stem.split(['-', '_']).next()?;
    if agent.is_empty() || !agent.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(agent.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn icon_paths_yield_lowercased_agents() {
        assert_eq!(
            agent_from_icon_src("/img/vlr/game/agents/Viper-icon.png"),
            Some("viper".to_string())
        );
        assert_eq!(
            agent_from_icon_src("//cdn.example/agents/kayo.png"),
            Some("kayo".to_string())
        );
        assert_eq!(
            agent_from_icon_src("/agents/Jett_2.png"),
            Some("jett".to_string())
        );
        assert_eq!(agent_from_icon_src("/agents/-icon.png"), None);
        assert_eq!(agent_from_icon_src(""), None);
    }

    #[test]
    fn deaths_are_collected_per_slot() {
        let html = Html::parse_fragment(
            r#"<div class="round-data"><div class="kill-events">
                 <div class="kill-event">
                   <div class="home-team"><img class="agent-icon" src="/agents/Jett-icon.png"></div>
                   <div class="away-team"><img class="agent-icon" src="/agents/Viper-icon.png"></div>
                 </div>
                 <div class="kill-event">
                   <div class="away-team"><img class="agent-icon" src="/agents/Raze-icon.png"></div>
                 </div>
               </div></div>"#,
        );
        let deaths = parse_round_deaths(&html.root_element()).unwrap();
        assert!(deaths.contains(TeamSlot::Home, "jett"));
        assert!(deaths.contains(TeamSlot::Home, "JETT"));
        assert!(!deaths.contains(TeamSlot::Home, "viper"));
        assert!(deaths.contains(TeamSlot::Away, "viper"));
        assert!(deaths.contains(TeamSlot::Away, "raze"));
    }

    #[test]
    fn malformed_icons_and_absent_slots_are_soft_skipped() {
        let html = Html::parse_fragment(
            r#"<div class="round-data"><div class="kill-events">
                 <div class="kill-event">
                   <div class="home-team"><img class="agent-icon" src="/agents/-icon.png"></div>
                 </div>
                 <div class="kill-event">
                   <div class="home-team"></div>
                 </div>
               </div></div>"#,
        );
        let deaths = parse_round_deaths(&html.root_element()).unwrap();
        assert!(!deaths.contains(TeamSlot::Home, "icon"));
        assert!(!deaths.contains(TeamSlot::Away, "icon"));
    }
}
