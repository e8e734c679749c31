//! Rectangular board of atom-holding cells.
//!
//! Each cell's capacity is fixed when the board is built and equals its
//! number of orthogonal neighbors: 2 in the corners, 3 along the edges and
//! 4 in the interior. A cell *overflows* once it holds at least that many
//! atoms.
//!
//! ```
//! use chain_reaction_logic::board::{Board, Coord};
//!
//! let board = Board::new(3, 4).unwrap();
//! assert_eq!(board.cell(Coord::new(0, 0)).unwrap().capacity, 2);
//! assert_eq!(board.cell(Coord::new(0, 1)).unwrap().capacity, 3);
//! assert_eq!(board.cell(Coord::new(1, 1)).unwrap().capacity, 4);
//! assert_eq!(board.neighbors_of(Coord::new(0, 0)).count(), 2);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{BoardError, EngineError};

/// Player identifier, `1..=player_count`. Unowned cells use `None`.
pub type PlayerId = u8;

/// Smallest legal extent in either direction.
pub const MIN_EXTENT: usize = 2;

/// Neighbor offsets in visiting order: up, down, right, left.
const DIRECTIONS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, 1), (0, -1)];

/// A (row, column) position on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// Atoms currently held.
    pub atoms: u32,
    /// Owning player, `None` exactly when `atoms == 0`.
    pub owner: Option<PlayerId>,
    /// Atoms at which the cell explodes.
    pub capacity: u32,
}

impl Cell {
    fn empty(capacity: u32) -> Self {
        Self {
            atoms: 0,
            owner: None,
            capacity,
        }
    }

    /// Whether the cell is at or above its capacity.
    pub fn overflows(&self) -> bool {
        self.atoms >= self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.atoms == 0
    }
}

/// Row-major grid of cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    rows: usize,
    columns: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Build an empty board. Both extents must be at least [`MIN_EXTENT`].
    pub fn new(rows: usize, columns: usize) -> Result<Self, BoardError> {
        if rows < MIN_EXTENT || columns < MIN_EXTENT {
            return Err(BoardError::InvalidDimensions { rows, columns });
        }

        let mut cells = Vec::with_capacity(rows * columns);
        for row in 0..rows {
            for col in 0..columns {
                cells.push(Cell::empty(capacity_at(rows, columns, row, col)));
            }
        }

        Ok(Self {
            rows,
            columns,
            cells,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Whether `at` lies on the board.
    pub fn contains(&self, at: Coord) -> bool {
        at.row < self.rows && at.col < self.columns
    }

    pub fn cell(&self, at: Coord) -> Option<&Cell> {
        if self.contains(at) {
            Some(&self.cells[self.index(at)])
        } else {
            None
        }
    }

    pub(crate) fn cell_mut(&mut self, at: Coord) -> Option<&mut Cell> {
        if self.contains(at) {
            let idx = self.index(at);
            Some(&mut self.cells[idx])
        } else {
            None
        }
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Every coordinate in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.columns).map(move |col| Coord::new(row, col)))
    }

    /// In-bounds orthogonal neighbors of `at`, visited up, down, right, left.
    ///
    /// Yields nothing for an off-board coordinate.
    pub fn neighbors_of(&self, at: Coord) -> impl Iterator<Item = Coord> + '_ {
        let on_board = self.contains(at);
        DIRECTIONS.iter().filter_map(move |&(dr, dc)| {
            if !on_board {
                return None;
            }
            let row = at.row.checked_add_signed(dr)?;
            let col = at.col.checked_add_signed(dc)?;
            let next = Coord::new(row, col);
            self.contains(next).then_some(next)
        })
    }

    pub fn total_atoms(&self) -> u64 {
        self.cells.iter().map(|c| c.atoms as u64).sum()
    }

    /// Sum of all capacities. Twice the number of orthogonal adjacencies.
    pub fn capacity_sum(&self) -> u64 {
        self.cells.iter().map(|c| c.capacity as u64).sum()
    }

    /// Number of cells owned by `player`.
    pub fn owned_cells(&self, player: PlayerId) -> usize {
        self.cells
            .iter()
            .filter(|c| c.owner == Some(player))
            .count()
    }

    /// Atoms held by `player` across the board.
    pub fn atoms_of(&self, player: PlayerId) -> u64 {
        self.cells
            .iter()
            .filter(|c| c.owner == Some(player))
            .map(|c| c.atoms as u64)
            .sum()
    }

    /// Coordinates of every cell at or above capacity.
    pub fn overflowing(&self) -> Vec<Coord> {
        self.coords()
            .filter(|&at| self.cells[self.index(at)].overflows())
            .collect()
    }

    pub fn is_quiescent(&self) -> bool {
        self.cells.iter().all(|c| !c.overflows())
    }

    /// Verify that every cell is unowned exactly when it is empty.
    pub fn check_invariants(&self) -> Result<(), EngineError> {
        for at in self.coords() {
            let cell = &self.cells[self.index(at)];
            if cell.owner.is_none() != cell.is_empty() {
                return Err(EngineError::OwnershipMismatch {
                    at,
                    atoms: cell.atoms,
                    owner: cell.owner,
                });
            }
        }
        Ok(())
    }

    fn index(&self, at: Coord) -> usize {
        at.row * self.columns + at.col
    }
}

/// Capacity from position: the number of in-bounds orthogonal neighbors.
fn capacity_at(rows: usize, columns: usize, row: usize, col: usize) -> u32 {
    let vertical_edge = row == 0 || row == rows - 1;
    let horizontal_edge = col == 0 || col == columns - 1;
    match (vertical_edge, horizontal_edge) {
        (true, true) => 2,
        (true, false) | (false, true) => 3,
        (false, false) => 4,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_narrow_boards() {
        assert_eq!(
            Board::new(1, 5),
            Err(BoardError::InvalidDimensions {
                rows: 1,
                columns: 5
            })
        );
        assert!(Board::new(5, 1).is_err());
        assert!(Board::new(0, 0).is_err());
        assert!(Board::new(2, 2).is_ok());
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new(5, 6).unwrap();
        assert_eq!(board.cells().len(), 30);
        assert_eq!(board.total_atoms(), 0);
        assert!(board.cells().iter().all(|c| c.owner.is_none()));
        assert!(board.is_quiescent());
    }

    #[test]
    fn test_capacity_by_position() {
        let board = Board::new(5, 6).unwrap();
        for corner in [
            Coord::new(0, 0),
            Coord::new(0, 5),
            Coord::new(4, 0),
            Coord::new(4, 5),
        ] {
            assert_eq!(board.cell(corner).unwrap().capacity, 2);
        }
        assert_eq!(board.cell(Coord::new(0, 3)).unwrap().capacity, 3);
        assert_eq!(board.cell(Coord::new(2, 0)).unwrap().capacity, 3);
        assert_eq!(board.cell(Coord::new(4, 2)).unwrap().capacity, 3);
        assert_eq!(board.cell(Coord::new(2, 3)).unwrap().capacity, 4);
    }

    #[test]
    fn test_capacity_equals_neighbor_count() {
        for (rows, columns) in [(2, 2), (2, 7), (3, 3), (5, 6), (8, 4)] {
            let board = Board::new(rows, columns).unwrap();
            for at in board.coords() {
                assert_eq!(
                    board.cell(at).unwrap().capacity as usize,
                    board.neighbors_of(at).count(),
                    "{}x{} at {}",
                    rows,
                    columns,
                    at
                );
            }
        }
    }

    #[test]
    fn test_neighbor_order() {
        let board = Board::new(3, 3).unwrap();
        let around: Vec<_> = board.neighbors_of(Coord::new(1, 1)).collect();
        assert_eq!(
            around,
            vec![
                Coord::new(0, 1),
                Coord::new(2, 1),
                Coord::new(1, 2),
                Coord::new(1, 0)
            ]
        );
        let corner: Vec<_> = board.neighbors_of(Coord::new(0, 0)).collect();
        assert_eq!(corner, vec![Coord::new(1, 0), Coord::new(0, 1)]);
    }

    #[test]
    fn test_off_board_has_no_neighbors() {
        let board = Board::new(3, 3).unwrap();
        assert_eq!(board.neighbors_of(Coord::new(3, 0)).count(), 0);
        assert!(board.cell(Coord::new(0, 3)).is_none());
    }

    #[test]
    fn test_capacity_sum_is_twice_adjacencies() {
        let board = Board::new(5, 6).unwrap();
        // 5 rows * 5 horizontal links + 4 * 6 vertical links
        assert_eq!(board.capacity_sum(), 2 * (5 * 5 + 4 * 6));
    }

    #[test]
    fn test_ownership_queries() {
        let mut board = Board::new(2, 3).unwrap();
        *board.cell_mut(Coord::new(0, 0)).unwrap() = Cell {
            atoms: 1,
            owner: Some(1),
            capacity: 2,
        };
        *board.cell_mut(Coord::new(1, 1)).unwrap() = Cell {
            atoms: 2,
            owner: Some(1),
            capacity: 3,
        };
        *board.cell_mut(Coord::new(1, 2)).unwrap() = Cell {
            atoms: 2,
            owner: Some(2),
            capacity: 2,
        };
        assert_eq!(board.owned_cells(1), 2);
        assert_eq!(board.atoms_of(1), 3);
        assert_eq!(board.owned_cells(2), 1);
        assert_eq!(board.total_atoms(), 5);
        assert_eq!(board.overflowing(), vec![Coord::new(1, 2)]);
        assert!(!board.is_quiescent());
        assert!(board.check_invariants().is_ok());
    }

    #[test]
    fn test_invariant_violation_detected() {
        let mut board = Board::new(2, 2).unwrap();
        board.cell_mut(Coord::new(1, 0)).unwrap().owner = Some(2);
        assert!(matches!(
            board.check_invariants(),
            Err(EngineError::OwnershipMismatch { at, .. }) if at == Coord::new(1, 0)
        ));
    }
}
