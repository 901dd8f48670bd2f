use itertools::Itertools;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

use crate::error::{Result, ScrapeError};
use crate::model::{MapStats, RoundRecord, TeamRound, TeamSlot};
use crate::scrape::aliases::TeamAliases;
use crate::scrape::deaths::{parse_round_deaths, RoundDeaths};
use crate::scrape::outcome::{parse_round_outcome, RoundOutcome};
use crate::scrape::roster::MapRoster;
use crate::scrape::sides::SideSchedule;
use crate::scrape::stats::parse_stat_grid;
use crate::scrape::{self, event::absolute_url, find_one, select_text_opt};

pub(crate) async fn get_match(client: &reqwest::Client, path: &str) -> Result<Vec<MapStats>> {
    let url = absolute_url(path);
    let document = scrape::get_document(client, &url).await?;
    parse_match(&document)
}

/// Extract every map of a match page.
pub(crate) fn parse_match(document: &Html) -> Result<Vec<MapStats>> {
    let wrapper_selector = Selector::parse("div.map-wrapper")?;
    let maps = document
        .root_element()
        .select(&wrapper_selector)
        .filter(|w| w.value().classes().any(|c| c.starts_with("map_")))
        .collect_vec();
    if maps.is_empty() {
        return Err(ScrapeError::ElementNotFound {
            context: "map wrappers (div.map-wrapper.map_<n>)",
        });
    }
    maps.iter().map(parse_map).collect()
}

/// Extract one map: resolve the per-map lookups once, then assemble each
/// round of the timeline independently, in order.
fn parse_map(map_el: &ElementRef) -> Result<MapStats> {
    let name_selector = Selector::parse("div.map-header div.map-name")?;
    let name = select_text_opt(map_el, &name_selector).ok_or(ScrapeError::ElementNotFound {
        context: "map name (div.map-header div.map-name)",
    })?;

    let aliases = TeamAliases::parse(map_el)?;
    let roster = MapRoster::parse(map_el)?;
    let schedule = SideSchedule::parse(map_el)?;

    let timeline_selector = Selector::parse("div.stat-wrap.timeline-wrapper")?;
    let timeline = find_one(
        map_el,
        &timeline_selector,
        "round timeline (div.stat-wrap.timeline-wrapper)",
    )?;
    let round_selector = Selector::parse("div.round-data")?;
    let round_elements = timeline.select(&round_selector).collect_vec();
    if round_elements.is_empty() {
        return Err(ScrapeError::ElementNotFound {
            context: "round data (div.round-data)",
        });
    }

    let number_selector = Selector::parse("div.round-header div.round-num")?;
    let mut rounds = Vec::with_capacity(round_elements.len());
    for (index, round_el) in round_elements.iter().enumerate() {
        let number: u32 = select_text_opt(round_el, &number_selector)
            .ok_or(ScrapeError::ElementNotFound {
                context: "round number (div.round-num)",
            })?
            .parse()?;
        if number != index as u32 + 1 {
            return Err(ScrapeError::InconsistentRound {
                round: number,
                context: "round numbers are not contiguous from 1",
            });
        }
        rounds.push(parse_round(round_el, number, &aliases, &roster, &schedule)?);
    }

    debug!(map = %name, rounds = rounds.len(), "assembled map timeline");
    Ok(MapStats {
        name,
        home_team: aliases.name(TeamSlot::Home).to_string(),
        away_team: aliases.name(TeamSlot::Away).to_string(),
        rounds,
    })
}

fn parse_round(
    round_el: &ElementRef,
    number: u32,
    aliases: &TeamAliases,
    roster: &MapRoster,
    schedule: &SideSchedule,
) -> Result<RoundRecord> {
    let deaths = parse_round_deaths(round_el)?;
    let outcome = parse_round_outcome(round_el, number)?;

    let home = parse_team_round(
        round_el, number, TeamSlot::Home, aliases, roster, schedule, &deaths, &outcome,
    )?;
    let away = parse_team_round(
        round_el, number, TeamSlot::Away, aliases, roster, schedule, &deaths, &outcome,
    )?;
    Ok(RoundRecord { number, home, away })
}

#[allow(clippy::too_many_arguments)]
fn parse_team_round(
    round_el: &ElementRef,
    number: u32,
    slot: TeamSlot,
    aliases: &TeamAliases,
    roster: &MapRoster,
    schedule: &SideSchedule,
    deaths: &RoundDeaths,
    outcome: &RoundOutcome,
) -> Result<TeamRound> {
    let grid_context = match slot {
        TeamSlot::Home => "home-team stats grid",
        TeamSlot::Away => "away-team stats grid",
    };
    let grid_css = format!("div.round-stats div.{}", TeamAliases::bundle(slot).role);
    let grid_selector = Selector::parse(&grid_css)?;
    let grid = find_one(round_el, &grid_selector, grid_context)?;

    let mut players = parse_stat_grid(&grid, grid_context)?;
    for player in &mut players {
        match roster.agent_of(slot, &player.player_name) {
            Some(agent) => {
                player.died = deaths.contains(slot, agent);
                player.agent = Some(agent.to_string());
            }
            None => warn!(
                round = number,
                player = %player.player_name,
                "player not in the map roster, agent and death flag unknown"
            ),
        }
    }

    let econ = outcome.econ(slot);
    Ok(TeamRound {
        team: aliases.name(slot).to_string(),
        side: schedule.side_for(number, slot)?,
        victory: outcome.winner == slot,
        victory_type: outcome.victory_type.clone(),
        bank: econ.bank.clone(),
        loadout: econ.loadout.clone(),
        players,
    })
}
