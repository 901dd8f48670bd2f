use itertools::Itertools;
use scraper::{ElementRef, Selector};
use tracing::warn;

use crate::error::{Result, ScrapeError};
use crate::model::PlayerStatRow;

const GRID_COLUMNS: usize = 6;
const GRID_ROWS: usize = 7;
const GRID_CELLS: usize = GRID_COLUMNS * GRID_ROWS;
pub(crate) const PLAYERS_PER_TEAM: usize = GRID_COLUMNS - 1;

/// What a header label means for the data cells in its row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    PlayerName,
    /// The unlabeled icon column. Agent identity comes from the per-map
    /// roster instead, so these cells are never read.
    Agent,
    CombatScore,
    Kills,
    Assists,
    /// Splits into money start / money remaining.
    Econ,
    /// Splits into gun / armor.
    Equip,
    Unknown,
}

fn field_for_header(label: &str) -> Field {
    match label {
        "Player" => Field::PlayerName,
        "" => Field::Agent,
        "SCORE" => Field::CombatScore,
        "K" => Field::Kills,
        "A" => Field::Assists,
        "ECON" => Field::Econ,
        "EQUIP" => Field::Equip,
        other => {
            warn!(header = other, "unrecognized stats grid header");
            Field::Unknown
        }
    }
}

/// Non-empty trimmed lines of a cell's text. Line breaks come either from
/// newlines inside a text node or from markup splitting the text into
/// several nodes; both count.
fn clean_lines(cell: &ElementRef) -> Vec<String> {
    cell.text()
        .flat_map(str::lines)
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Default)]
struct RowDraft {
    player_name: Option<String>,
    combat_score: Option<String>,
    kills: Option<String>,
    assists: Option<String>,
    money_start: Option<String>,
    money_remaining: Option<String>,
    gun: Option<String>,
    armor: Option<String>,
}

/// Decode one team's 42-cell per-round stats grid into five player rows.
///
/// The grid is column-major in DOM order: the first column holds the seven
/// header labels, the remaining five columns one player each. A cell with
/// no cleaned text leaves its field `None` ("unknown"); only the player
/// name itself is mandatory. Values stay raw strings.
pub(crate) fn parse_stat_grid(
    grid_el: &ElementRef,
    context: &'static str,
) -> Result<Vec<PlayerStatRow>> {
    let cell_selector = Selector::parse("div.single-column, div.single-stat")?;
    let cells = grid_el.select(&cell_selector).collect_vec();
    if cells.len() != GRID_CELLS {
        return Err(ScrapeError::GridShape {
            context,
            expected: GRID_CELLS,
            found: cells.len(),
        });
    }

    let fields: Vec<Field> = cells[..GRID_ROWS]
        .iter()
        .map(|header| field_for_header(clean_lines(header).join(" ").as_str()))
        .collect();

    let mut rows = Vec::with_capacity(PLAYERS_PER_TEAM);
    for column in 1..GRID_COLUMNS {
        let mut draft = RowDraft::default();
        for (row, &field) in fields.iter().enumerate() {
            let cell = &cells[column * GRID_ROWS + row];
            let lines = clean_lines(cell);
            if lines.is_empty() {
                continue;
            }
            match field {
                Field::Agent | Field::Unknown => {}
                Field::PlayerName => draft.player_name = Some(lines.join(" ")),
                Field::CombatScore => draft.combat_score = Some(lines.join(" ")),
                Field::Kills => draft.kills = Some(lines.join(" ")),
                Field::Assists => draft.assists = Some(lines.join(" ")),
                Field::Econ | Field::Equip => {
                    if lines.len() != 2 {
                        warn!(
                            context,
                            column,
                            lines = lines.len(),
                            "composite stats cell did not split into two values, skipping"
                        );
                        continue;
                    }
                    if field == Field::Econ {
                        draft.money_start = Some(lines[0].clone());
                        draft.money_remaining = Some(lines[1].clone());
                    } else {
                        draft.gun = Some(lines[0].clone());
                        draft.armor = Some(lines[1].clone());
                    }
                }
            }
        }

        let player_name = draft.player_name.ok_or(ScrapeError::ElementNotFound {
            context: "player name cell in stats grid",
        })?;
        rows.push(PlayerStatRow {
            player_name,
            agent: None,
            combat_score: draft.combat_score,
            kills: draft.kills,
            assists: draft.assists,
            money_start: draft.money_start,
            money_remaining: draft.money_remaining,
            gun: draft.gun,
            armor: draft.armor,
            died: false,
        });
    }
    Ok(rows)
}
