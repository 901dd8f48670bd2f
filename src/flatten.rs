//! Pure nested→flat transformation of extracted match data.
//!
//! No parsing happens here: the walk copies identifying keys (match, map,
//! round, team) onto every emitted row and preserves encounter order —
//! map order, then round order, then home before away.

use crate::model::{
    EventStats, FlatTables, MapStats, PlayerRoundRow, TeamRoundRow, TeamSlot,
};

/// Flatten every match of an event into the two output tables.
pub fn flatten_event(event: &EventStats) -> FlatTables {
    let mut tables = FlatTables::default();
    for m in &event.matches {
        tables.extend(flatten_match(&m.name, &m.maps));
    }
    tables
}

/// Flatten one match's maps into team-round and player-round rows.
pub fn flatten_match(match_name: &str, maps: &[MapStats]) -> FlatTables {
    let mut tables = FlatTables::default();
    for map in maps {
        for round in &map.rounds {
            for slot in TeamSlot::BOTH {
                let team = round.team(slot);
                tables.team_rounds.push(TeamRoundRow {
                    match_name: match_name.to_string(),
                    map_name: map.name.clone(),
                    round: round.number,
                    team: team.team.clone(),
                    side: team.side,
                    victory: team.victory,
                    victory_type: team.victory_type.clone(),
                    bank: team.bank.clone(),
                    loadout: team.loadout.clone(),
                });
                for player in &team.players {
                    tables.player_rounds.push(PlayerRoundRow {
                        match_name: match_name.to_string(),
                        map_name: map.name.clone(),
                        round: round.number,
                        team: team.team.clone(),
                        side: team.side,
                        victory: team.victory,
                        victory_type: team.victory_type.clone(),
                        player_name: player.player_name.clone(),
                        agent: player.agent.clone(),
                        combat_score: player.combat_score.clone(),
                        kills: player.kills.clone(),
                        assists: player.assists.clone(),
                        money_start: player.money_start.clone(),
                        money_remaining: player.money_remaining.clone(),
                        gun: player.gun.clone(),
                        armor: player.armor.clone(),
                        died: player.died,
                    });
                }
            }
        }
    }
    tables
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PlayerStatRow, RoundRecord, Side, TeamRound};

    fn player(name: &str, agent: &str, died: bool) -> PlayerStatRow {
        PlayerStatRow {
            player_name: name.to_string(),
            agent: Some(agent.to_string()),
            combat_score: Some("200".to_string()),
            kills: Some("1".to_string()),
            assists: None,
            money_start: Some("800".to_string()),
            money_remaining: Some("100".to_string()),
            gun: Some("Vandal".to_string()),
            armor: Some("Heavy".to_string()),
            died,
        }
    }

    fn team_round(team: &str, side: Side, victory: bool, players: Vec<PlayerStatRow>) -> TeamRound {
        TeamRound {
            team: team.to_string(),
            side,
            victory,
            victory_type: "Elimination".to_string(),
            bank: Some("12000".to_string()),
            loadout: Some("3100".to_string()),
            players,
        }
    }

    fn sample_map(name: &str) -> MapStats {
        MapStats {
            name: name.to_string(),
            home_team: "Alpha".to_string(),
            away_team: "Beta".to_string(),
            rounds: vec![
                RoundRecord {
                    number: 1,
                    home: team_round("Alpha", Side::Attack, true, vec![player("p1", "jett", false)]),
                    away: team_round("Beta", Side::Defense, false, vec![player("q1", "viper", true)]),
                },
                RoundRecord {
                    number: 2,
                    home: team_round("Alpha", Side::Attack, false, vec![player("p1", "jett", true)]),
                    away: team_round("Beta", Side::Defense, true, vec![player("q1", "viper", false)]),
                },
            ],
        }
    }

    #[test]
    fn rows_preserve_encounter_order() {
        let maps = [sample_map("Ascent"), sample_map("Bind")];
        let tables = flatten_match("Alpha-Beta", &maps);
        assert_eq!(tables.team_rounds.len(), 8);
        assert_eq!(tables.player_rounds.len(), 8);

        let keys: Vec<_> = tables
            .team_rounds
            .iter()
            .map(|r| (r.map_name.as_str(), r.round, r.team.as_str()))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("Ascent", 1, "Alpha"),
                ("Ascent", 1, "Beta"),
                ("Ascent", 2, "Alpha"),
                ("Ascent", 2, "Beta"),
                ("Bind", 1, "Alpha"),
                ("Bind", 1, "Beta"),
                ("Bind", 2, "Alpha"),
                ("Bind", 2, "Beta"),
            ]
        );
    }

    #[test]
    fn every_round_keeps_exactly_one_winner() {
        let maps = [sample_map("Ascent")];
        let tables = flatten_match("Alpha-Beta", &maps);
        for round in [1, 2] {
            let winners = tables
                .team_rounds
                .iter()
                .filter(|r| r.round == round && r.victory)
                .count();
            assert_eq!(winners, 1);
        }
    }

    #[test]
    fn player_rows_copy_identifying_keys_and_stats() {
        let maps = [sample_map("Ascent")];
        let tables = flatten_match("Alpha-Beta", &maps);
        let row = &tables.player_rounds[1]; // Beta's q1, round 1
        assert_eq!(row.match_name, "Alpha-Beta");
        assert_eq!(row.map_name, "Ascent");
        assert_eq!(row.round, 1);
        assert_eq!(row.team, "Beta");
        assert_eq!(row.side, Side::Defense);
        assert!(!row.victory);
        assert_eq!(row.player_name, "q1");
        assert_eq!(row.agent.as_deref(), Some("viper"));
        assert!(row.died);
    }

    #[test]
    fn flatten_event_walks_all_matches() {
        let event = EventStats {
            event_name: "Champions".to_string(),
            matches: vec![
                crate::model::MatchStats {
                    name: "Alpha-Beta".to_string(),
                    maps: vec![sample_map("Ascent")],
                },
                crate::model::MatchStats {
                    name: "Gamma-Delta".to_string(),
                    maps: vec![sample_map("Bind")],
                },
            ],
        };
        let tables = flatten_event(&event);
        assert_eq!(tables.team_rounds.len(), 8);
        assert_eq!(tables.team_rounds[0].match_name, "Alpha-Beta");
        assert_eq!(tables.team_rounds[4].match_name, "Gamma-Delta");
    }
}
