use serde::Serialize;

/// The two fixed structural team slots on a match page.
///
/// Slot membership is a page-layout property, not a team property: the
/// same team occupies the same slot for a whole map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TeamSlot {
    Home,
    Away,
}

impl TeamSlot {
    pub const BOTH: [TeamSlot; 2] = [TeamSlot::Home, TeamSlot::Away];

    pub fn other(self) -> Self {
        match self {
            TeamSlot::Home => TeamSlot::Away,
            TeamSlot::Away => TeamSlot::Home,
        }
    }
}

/// The side a team plays during one round.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    strum_macros::Display,
    strum_macros::EnumString,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Attack,
    Defense,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Attack => Side::Defense,
            Side::Defense => Side::Attack,
        }
    }
}

/// One fully extracted map: both team names and every round in order.
#[derive(Debug, Clone, Serialize)]
pub struct MapStats {
    pub name: String,
    pub home_team: String,
    pub away_team: String,
    pub rounds: Vec<RoundRecord>,
}

/// One round of a map, with a sub-record per team.
///
/// Rounds are produced independently of each other; the only shared inputs
/// are the read-only per-map alias, roster, and side lookups.
#[derive(Debug, Clone, Serialize)]
pub struct RoundRecord {
    pub number: u32,
    pub home: TeamRound,
    pub away: TeamRound,
}

impl RoundRecord {
    pub fn team(&self, slot: TeamSlot) -> &TeamRound {
        match slot {
            TeamSlot::Home => &self.home,
            TeamSlot::Away => &self.away,
        }
    }
}

/// One team's view of one round.
#[derive(Debug, Clone, Serialize)]
pub struct TeamRound {
    pub team: String,
    pub side: Side,
    pub victory: bool,
    /// How the round ended (elimination, defusal, ...). The banner carries a
    /// single label for the round, recorded on both teams.
    pub victory_type: String,
    /// Team money total, raw text. `None` when the banner omits it.
    pub bank: Option<String>,
    /// Average loadout value, raw text. `None` when the banner omits it.
    pub loadout: Option<String>,
    pub players: Vec<PlayerStatRow>,
}

/// Per-player stats for one round.
///
/// Stat values stay raw strings; numeric coercion is a downstream concern.
/// `None` means the grid cell was empty ("unknown"), never zero.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerStatRow {
    pub player_name: String,
    /// Agent identifier from the per-map roster, lower-cased.
    pub agent: Option<String>,
    pub combat_score: Option<String>,
    pub kills: Option<String>,
    pub assists: Option<String>,
    pub money_start: Option<String>,
    pub money_remaining: Option<String>,
    pub gun: Option<String>,
    pub armor: Option<String>,
    /// Whether this player's agent appears among the round's death icons.
    pub died: bool,
}
