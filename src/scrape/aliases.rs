use scraper::{ElementRef, Selector};
use tracing::debug;

use crate::error::{Result, ScrapeError};
use crate::model::TeamSlot;
use crate::scrape::{find_one, select_text_opt};

/// The fixed structural aliases attached to one team slot.
///
/// The site refers to a team three ways besides its display name: the role
/// class on stat containers, the home/away modifier on roster and side
/// blocks, and the accent-color class on outcome markers. All three are
/// layout constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct AliasBundle {
    pub role: &'static str,
    pub label: &'static str,
    pub accent: &'static str,
}

impl AliasBundle {
    pub(crate) fn contains(&self, alias: &str) -> bool {
        alias == self.role || alias == self.label || alias == self.accent
    }
}

const HOME_ALIASES: AliasBundle = AliasBundle {
    role: "home-team",
    label: "mod-home",
    accent: "mod-green",
};

const AWAY_ALIASES: AliasBundle = AliasBundle {
    role: "away-team",
    label: "mod-away",
    accent: "mod-red",
};

/// Bidirectional lookup between team slots, structural aliases, and the
/// canonical team names of one map. Built once per map, read-only after.
#[derive(Debug, Clone)]
pub(crate) struct TeamAliases {
    home: String,
    away: String,
}

impl TeamAliases {
    /// Bind the two fixed alias bundles to the team names shown in the
    /// first-half scoreboard fragment. A missing team name makes the whole
    /// map unparseable.
    pub(crate) fn parse(map_el: &ElementRef) -> Result<Self> {
        let home_selector =
            Selector::parse("div.score-wrap div.first-half div.team.mod-home div.team-name")?;
        let away_selector =
            Selector::parse("div.score-wrap div.first-half div.team.mod-away div.team-name")?;

        let first_half_selector = Selector::parse("div.score-wrap div.first-half")?;
        find_one(map_el, &first_half_selector, "first-half scoreboard (div.first-half)")?;

        let home = select_text_opt(map_el, &home_selector).ok_or(
            ScrapeError::ElementNotFound {
                context: "home team name (first-half div.team-name)",
            },
        )?;
        let away = select_text_opt(map_el, &away_selector).ok_or(
            ScrapeError::ElementNotFound {
                context: "away team name (first-half div.team-name)",
            },
        )?;
        debug!(%home, %away, "resolved team aliases");

        Ok(Self { home, away })
    }

    pub(crate) fn name(&self, slot: TeamSlot) -> &str {
        match slot {
            TeamSlot::Home => &self.home,
            TeamSlot::Away => &self.away,
        }
    }

    pub(crate) fn bundle(slot: TeamSlot) -> &'static AliasBundle {
        match slot {
            TeamSlot::Home => &HOME_ALIASES,
            TeamSlot::Away => &AWAY_ALIASES,
        }
    }

    /// Resolve any structural alias (role, home/away label, accent class)
    /// to the slot it belongs to. The bundles are disjoint, so at most one
    /// slot can claim an alias.
    pub(crate) fn resolve_alias(alias: &str) -> Option<TeamSlot> {
        TeamSlot::BOTH
            .into_iter()
            .find(|&slot| Self::bundle(slot).contains(alias))
    }

    /// Resolve a canonical team name back to its slot.
    pub(crate) fn slot_of(&self, name: &str) -> Option<TeamSlot> {
        TeamSlot::BOTH
            .into_iter()
            .find(|&slot| self.name(slot) == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    const FRAGMENT: &str = r#"
        <div class="map-wrapper map_1">
          <div class="score-wrap">
            <div class="first-half">
              <div class="team mod-home"><div class="team-name">Alpha</div></div>
              <div class="team mod-away"><div class="team-name">Beta</div></div>
            </div>
          </div>
        </div>
    "#;

    #[test]
    fn binds_names_to_slots() {
        let html = Html::parse_fragment(FRAGMENT);
        let aliases = TeamAliases::parse(&html.root_element()).unwrap();
        assert_eq!(aliases.name(TeamSlot::Home), "Alpha");
        assert_eq!(aliases.name(TeamSlot::Away), "Beta");
    }

    #[test]
    fn alias_resolution_is_a_bijection() {
        let html = Html::parse_fragment(FRAGMENT);
        let aliases = TeamAliases::parse(&html.root_element()).unwrap();
        for slot in TeamSlot::BOTH {
            let bundle = TeamAliases::bundle(slot);
            for alias in [bundle.role, bundle.label, bundle.accent] {
                assert_eq!(TeamAliases::resolve_alias(alias), Some(slot));
            }
            // a canonical name resolves back to its own slot
            assert_eq!(aliases.slot_of(aliases.name(slot)), Some(slot));
        }
        assert_eq!(TeamAliases::resolve_alias("mod-win"), None);
        assert_eq!(aliases.slot_of("Gamma"), None);
    }

    #[test]
    fn missing_team_name_is_fatal() {
        let html = Html::parse_fragment(
            r#"<div class="score-wrap"><div class="first-half">
                 <div class="team mod-home"><div class="team-name">Alpha</div></div>
               </div></div>"#,
        );
        let result = TeamAliases::parse(&html.root_element());
        assert!(result.is_err());
    }
}
