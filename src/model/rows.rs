use serde::Serialize;

use crate::model::Side;

/// The two flat output tables produced by [`crate::flatten`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct FlatTables {
    pub team_rounds: Vec<TeamRoundRow>,
    pub player_rounds: Vec<PlayerRoundRow>,
}

impl FlatTables {
    pub fn extend(&mut self, other: FlatTables) {
        self.team_rounds.extend(other.team_rounds);
        self.player_rounds.extend(other.player_rounds);
    }
}

/// One flat record per (map, round, team).
#[derive(Debug, Clone, Serialize)]
pub struct TeamRoundRow {
    pub match_name: String,
    pub map_name: String,
    pub round: u32,
    pub team: String,
    pub side: Side,
    pub victory: bool,
    pub victory_type: String,
    pub bank: Option<String>,
    pub loadout: Option<String>,
}

/// One flat record per (map, round, team, player).
#[derive(Debug, Clone, Serialize)]
pub struct PlayerRoundRow {
    pub match_name: String,
    pub map_name: String,
    pub round: u32,
    pub team: String,
    pub side: Side,
    pub victory: bool,
    pub victory_type: String,
    pub player_name: String,
    pub agent: Option<String>,
    pub combat_score: Option<String>,
    pub kills: Option<String>,
    pub assists: Option<String>,
    pub money_start: Option<String>,
    pub money_remaining: Option<String>,
    pub gun: Option<String>,
    pub armor: Option<String>,
    pub died: bool,
}
