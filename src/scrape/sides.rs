use std::collections::BTreeMap;

use scraper::{ElementRef, Selector};
use tracing::debug;

use crate::error::{Result, ScrapeError};
use crate::model::{Side, TeamSlot};
use crate::scrape::aliases::TeamAliases;
use crate::scrape::{find_one, select_text_opt};

/// Rounds 1..=12 and 13..=24; anything later is overtime.
const REGULATION_HALF: u32 = 12;
const REGULATION_ROUNDS: u32 = 24;

/// Which side each team plays in every round of a map.
///
/// Regulation halves carry one explicit side pair each; the swap between
/// halves is read from the page, not assumed. Overtime rounds each publish
/// their own declarations, possibly for only one of the two teams.
#[derive(Debug, Clone)]
pub(crate) struct SideSchedule {
    first_half: (Side, Side),
    second_half: (Side, Side),
    overtime: BTreeMap<u32, (Option<Side>, Option<Side>)>,
}

impl SideSchedule {
    pub(crate) fn parse(map_el: &ElementRef) -> Result<Self> {
        let wrap_selector = Selector::parse("div.score-wrap")?;
        let wrap = find_one(map_el, &wrap_selector, "scoreboard (div.score-wrap)")?;

        let first_half = parse_half(&wrap, "div.first-half", "first-half side labels")?;
        let second_half = parse_half(&wrap, "div.second-half", "second-half side labels")?;

        let ot_selector = Selector::parse("div.overtime div.ot-round")?;
        let mut overtime = BTreeMap::new();
        for block in wrap.select(&ot_selector) {
            let round: u32 = block
                .value()
                .attr("data-round-num")
                .ok_or(ScrapeError::ElementNotFound {
                    context: "data-round-num on overtime round",
                })?
                .trim()
                .parse()?;
            let home = declared_side(&block, TeamSlot::Home)?;
            let away = declared_side(&block, TeamSlot::Away)?;
            overtime.insert(round, (home, away));
        }

        debug!(overtime_rounds = overtime.len(), "parsed side schedule");
        Ok(Self {
            first_half,
            second_half,
            overtime,
        })
    }

    /// The side `slot` plays in `round`.
    ///
    /// Overtime falls back on the other team's declaration when one side is
    /// missing: with exactly two teams and two sides, one published side
    /// pins down both.
    pub(crate) fn side_for(&self, round: u32, slot: TeamSlot) -> Result<Side> {
        if round == 0 {
            return Err(ScrapeError::InconsistentRound {
                round,
                context: "round numbers start at 1",
            });
        }
        if round <= REGULATION_HALF {
            return Ok(pick(self.first_half, slot));
        }
        if round <= REGULATION_ROUNDS {
            return Ok(pick(self.second_half, slot));
        }

        let &(home, away) = self
            .overtime
            .get(&round)
            .ok_or(ScrapeError::InconsistentRound {
                round,
                context: "no side declarations for overtime round",
            })?;
        let (own, other) = match slot {
            TeamSlot::Home => (home, away),
            TeamSlot::Away => (away, home),
        };
        match (own, other) {
            (Some(own), Some(other)) if own == other => Err(ScrapeError::InconsistentRound {
                round,
                context: "both teams declare the same overtime side",
            }),
            (Some(own), _) => Ok(own),
            (None, Some(other)) => Ok(other.opposite()),
            (None, None) => Err(ScrapeError::InconsistentRound {
                round,
                context: "neither team's overtime side is published",
            }),
        }
    }
}

fn pick(pair: (Side, Side), slot: TeamSlot) -> Side {
    match slot {
        TeamSlot::Home => pair.0,
        TeamSlot::Away => pair.1,
    }
}

/// Read one half's explicit per-team side labels. Both must be present and
/// form an attack/defense pair.
fn parse_half(
    wrap: &ElementRef,
    half_css: &str,
    context: &'static str,
) -> Result<(Side, Side)> {
    let half_selector =
        Selector::parse(half_css).map_err(|e| ScrapeError::Selector(e.to_string()))?;
    let half = find_one(wrap, &half_selector, context)?;

    let home = declared_side(&half, TeamSlot::Home)?.ok_or(ScrapeError::ElementNotFound {
        context: "home side label in half scoreboard",
    })?;
    let away = declared_side(&half, TeamSlot::Away)?.ok_or(ScrapeError::ElementNotFound {
        context: "away side label in half scoreboard",
    })?;
    if home == away {
        return Err(ScrapeError::InvalidSides {
            context: "half declares the same side for both teams",
        });
    }
    Ok((home, away))
}

/// A team's published side inside a half or overtime block, if any.
fn declared_side(block: &ElementRef, slot: TeamSlot) -> Result<Option<Side>> {
    let css = format!(
        "div.team.{} span.side",
        TeamAliases::bundle(slot).label
    );
    let selector = Selector::parse(&css)?;
    let Some(label) = select_text_opt(block, &selector) else {
        return Ok(None);
    };
    let side = label
        .parse::<Side>()
        .map_err(|_| ScrapeError::SideParse(label))?;
    Ok(Some(side))
}
