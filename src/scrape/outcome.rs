use itertools::Itertools;
use scraper::{ElementRef, Selector};
use tracing::warn;

use crate::error::{Result, ScrapeError};
use crate::model::TeamSlot;
use crate::scrape::aliases::TeamAliases;
use crate::scrape::{find_one, select_text, select_text_opt};

/// A team's economy summary for one round, raw text. A missing sub-field
/// stays `None`; the banner frequently omits these for eco rounds.
#[derive(Debug, Clone, Default)]
pub(crate) struct TeamEconomy {
    pub bank: Option<String>,
    pub loadout: Option<String>,
}

/// The decoded round-outcome banner.
#[derive(Debug, Clone)]
pub(crate) struct RoundOutcome {
    pub winner: TeamSlot,
    /// How the round ended (e.g. "Elimination"). One label for the round,
    /// shared by both teams.
    pub victory_type: String,
    pub home_econ: TeamEconomy,
    pub away_econ: TeamEconomy,
}

impl RoundOutcome {
    pub(crate) fn econ(&self, slot: TeamSlot) -> &TeamEconomy {
        match slot {
            TeamSlot::Home => &self.home_econ,
            TeamSlot::Away => &self.away_econ,
        }
    }
}

/// Decode a round's outcome banner.
///
/// The winner is whichever team's accent-color alias appears on the banner
/// marker; a team with no matching alias simply lost. Exactly one team must
/// come out as the winner, anything else is an inconsistent round.
pub(crate) fn parse_round_outcome(round_el: &ElementRef, round: u32) -> Result<RoundOutcome> {
    let banner_selector = Selector::parse("div.round-info")?;
    let banner = find_one(
        round_el,
        &banner_selector,
        "round outcome banner (div.round-info)",
    )?;

    let marker_selector = Selector::parse("div.winner-marker")?;
    let marker = find_one(
        &banner,
        &marker_selector,
        "outcome marker (div.winner-marker)",
    )?;
    let winners = marker
        .value()
        .classes()
        .filter_map(TeamAliases::resolve_alias)
        .unique()
        .collect_vec();
    let winner = match winners.as_slice() {
        [slot] => *slot,
        [] => {
            return Err(ScrapeError::InconsistentRound {
                round,
                context: "outcome marker matches neither team's accent alias",
            })
        }
        _ => {
            return Err(ScrapeError::InconsistentRound {
                round,
                context: "outcome marker matches both teams' accent aliases",
            })
        }
    };

    let method_selector = Selector::parse("div.win-method")?;
    let victory_type = select_text(&banner, &method_selector);

    let econ_selector = Selector::parse("div.team-econ")?;
    let bank_selector = Selector::parse("span.bank")?;
    let loadout_selector = Selector::parse("span.loadout")?;
    let mut home_econ = TeamEconomy::default();
    let mut away_econ = TeamEconomy::default();
    for block in banner.select(&econ_selector) {
        let slot = block
            .value()
            .classes()
            .find_map(TeamAliases::resolve_alias);
        let Some(slot) = slot else {
            warn!(round, "economy block without a team accent class, skipping");
            continue;
        };
        let econ = TeamEconomy {
            bank: select_text_opt(&block, &bank_selector),
            loadout: select_text_opt(&block, &loadout_selector),
        };
        match slot {
            TeamSlot::Home => home_econ = econ,
            TeamSlot::Away => away_econ = econ,
        }
    }

    Ok(RoundOutcome {
        winner,
        victory_type,
        home_econ,
        away_econ,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn round(banner: &str) -> Html {
        Html::parse_fragment(&format!(r#"<div class="round-data">{banner}</div>"#))
    }

    #[test]
    fn accent_class_decides_the_winner() {
        let html = round(
            r#"<div class="round-info">
                 <div class="winner-marker mod-green"></div>
                 <div class="win-method">Elimination</div>
                 <div class="team-econ mod-green"><span class="bank">23400</span><span class="loadout">3900</span></div>
                 <div class="team-econ mod-red"><span class="bank">11200</span><span class="loadout">2100</span></div>
               </div>"#,
        );
        let outcome = parse_round_outcome(&html.root_element(), 13).unwrap();
        assert_eq!(outcome.winner, TeamSlot::Home);
        assert_eq!(outcome.victory_type, "Elimination");
        assert_eq!(outcome.econ(TeamSlot::Home).bank.as_deref(), Some("23400"));
        assert_eq!(outcome.econ(TeamSlot::Away).loadout.as_deref(), Some("2100"));
    }

    #[test]
    fn missing_economy_sub_field_stays_unknown() {
        let html = round(
            r#"<div class="round-info">
                 <div class="winner-marker mod-red"></div>
                 <div class="win-method">Defused</div>
                 <div class="team-econ mod-red"><span class="bank">8000</span></div>
               </div>"#,
        );
        let outcome = parse_round_outcome(&html.root_element(), 2).unwrap();
        assert_eq!(outcome.winner, TeamSlot::Away);
        assert_eq!(outcome.econ(TeamSlot::Away).bank.as_deref(), Some("8000"));
        assert_eq!(outcome.econ(TeamSlot::Away).loadout, None);
        assert_eq!(outcome.econ(TeamSlot::Home).bank, None);
    }

    #[test]
    fn marker_matching_no_team_is_inconsistent() {
        let html = round(
            r#"<div class="round-info">
                 <div class="winner-marker"></div>
                 <div class="win-method">Elimination</div>
               </div>"#,
        );
        let result = parse_round_outcome(&html.root_element(), 7);
        assert!(matches!(
            result,
            Err(ScrapeError::InconsistentRound { round: 7, .. })
        ));
    }

    #[test]
    fn marker_matching_both_teams_is_inconsistent() {
        let html = round(
            r#"<div class="round-info">
                 <div class="winner-marker mod-green mod-red"></div>
                 <div class="win-method">Elimination</div>
               </div>"#,
        );
        assert!(matches!(
            parse_round_outcome(&html.root_element(), 7),
            Err(ScrapeError::InconsistentRound { .. })
        ));
    }

    #[test]
    fn missing_banner_is_structural() {
        let html = round("");
        assert!(matches!(
            parse_round_outcome(&html.root_element(), 1),
            Err(ScrapeError::ElementNotFound { .. })
        ));
    }
}
