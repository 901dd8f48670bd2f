use scraper::{ElementRef, Selector};
use tracing::warn;

use crate::error::{Result, ScrapeError};
use crate::model::TeamSlot;
use crate::scrape::aliases::TeamAliases;
use crate::scrape::{find_one, select_text_opt};

/// Player → agent assignments for one map, captured once from the overview
/// section and treated as static: agents do not change mid-map.
///
/// Agent identifiers are stored lower-cased so they compare directly
/// against the identifiers derived from death-icon paths.
#[derive(Debug, Clone)]
pub(crate) struct MapRoster {
    home: Vec<(String, String)>,
    away: Vec<(String, String)>,
}

impl MapRoster {
    pub(crate) fn parse(map_el: &ElementRef) -> Result<Self> {
        let roster_selector = Selector::parse("div.map-overview div.team-roster")?;
        let player_selector = Selector::parse("div.player")?;
        let name_selector = Selector::parse("span.player-name")?;
        let icon_selector = Selector::parse("img.agent-icon")?;

        let mut home = None;
        let mut away = None;
        for block in map_el.select(&roster_selector) {
            let Some(slot) = block
                .value()
                .classes()
                .find_map(TeamAliases::resolve_alias)
            else {
                warn!("roster block without a team label, skipping");
                continue;
            };

            let mut players = Vec::new();
            for entry in block.select(&player_selector) {
                let name = select_text_opt(&entry, &name_selector).ok_or(
                    ScrapeError::ElementNotFound {
                        context: "player name in roster entry",
                    },
                )?;
                let icon = find_one(&entry, &icon_selector, "agent icon in roster entry")?;
                let agent = icon
                    .value()
                    .attr("title")
                    .map(|t| t.trim().to_lowercase())
                    .filter(|t| !t.is_empty())
                    .ok_or(ScrapeError::ElementNotFound {
                        context: "agent title on roster icon",
                    })?;
                players.push((name, agent));
            }
            if players.len() != 5 {
                warn!(slot = ?slot, players = players.len(), "roster does not list five players");
            }
            match slot {
                TeamSlot::Home => home = Some(players),
                TeamSlot::Away => away = Some(players),
            }
        }

        match (home, away) {
            (Some(home), Some(away)) => Ok(Self { home, away }),
            _ => Err(ScrapeError::ElementNotFound {
                context: "team roster (div.map-overview div.team-roster)",
            }),
        }
    }

    /// Look up the agent a player locked for this map.
    pub(crate) fn agent_of(&self, slot: TeamSlot, player: &str) -> Option<&str> {
        let players = match slot {
            TeamSlot::Home => &self.home,
            TeamSlot::Away => &self.away,
        };
        players
            .iter()
            .find(|(name, _)| name == player)
            .map(|(_, agent)| agent.as_str())
    }
}
