//! Plain-text board rendering.
//!
//! Reads boards only; the simulation never sees anything drawn here.
//! Empty cells print as `.`, owned cells as `<player>x<atoms>`.

use chain_reaction_logic::board::{Board, Coord, PlayerId};
use chain_reaction_logic::config::MatchConfig;

const CELL_WIDTH: usize = 4;

/// Render `board` as a grid with row and column indices.
pub fn render_board(board: &Board) -> String {
    let mut out = String::from("    ");
    for col in 0..board.columns() {
        out.push_str(&format!("{:>width$}", col, width = CELL_WIDTH));
    }
    out.push('\n');

    for row in 0..board.rows() {
        out.push_str(&format!("{:>3} ", row));
        for col in 0..board.columns() {
            let text = match board.cell(Coord::new(row, col)) {
                Some(cell) => match cell.owner {
                    Some(owner) => format!("{}x{}", owner, cell.atoms),
                    None => ".".to_string(),
                },
                None => "?".to_string(),
            };
            out.push_str(&format!("{:>width$}", text, width = CELL_WIDTH));
        }
        out.push('\n');
    }
    out
}

/// One line per player: label, cells held and atoms held.
pub fn render_standings(board: &Board, config: &MatchConfig) -> String {
    (1..=config.player_count)
        .map(|p| {
            format!(
                "  {:<12} cells={:<3} atoms={}",
                config.identity(p).label,
                board.owned_cells(p),
                board.atoms_of(p)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Announcement shown when a match ends.
pub fn winner_banner(config: &MatchConfig, winner: PlayerId) -> String {
    format!("{} wins!", config.identity(winner).label)
}
