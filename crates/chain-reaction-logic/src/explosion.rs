//! Explosion waves.
//!
//! A wave walks its candidate list left to right. Each occurrence whose cell
//! is at or above capacity *at that moment* explodes: one atom goes to every
//! neighbor, the neighbor is captured by the exploding cell's owner, and the
//! neighbor is queued for the next wave. A cell emptied by its explosion
//! becomes unowned. Later occurrences in the same wave see the updated
//! counts, so a cell drained earlier is skipped and a cell filled earlier
//! fires.
//!
//! [`Cascade`] holds the queue between waves so callers can pull one wave at
//! a time and pace them however they like.
//!
//! ```
//! use chain_reaction_logic::board::{Board, Coord};
//! use chain_reaction_logic::explosion::{self, Cascade, CascadeStep};
//!
//! let mut board = Board::new(2, 2).unwrap();
//! let seed = Coord::new(0, 0);
//! explosion::place_atom(&mut board, seed, 1).unwrap();
//! explosion::place_atom(&mut board, seed, 1).unwrap();
//!
//! let mut cascade = Cascade::new(vec![seed]);
//! assert_eq!(cascade.advance(&mut board).unwrap(), CascadeStep::Wave(1));
//! assert_eq!(cascade.advance(&mut board).unwrap(), CascadeStep::Quiescent);
//! assert_eq!(board.cell(Coord::new(0, 1)).unwrap().owner, Some(1));
//! ```

use serde::{Deserialize, Serialize};

use crate::board::{Board, Coord, PlayerId};
use crate::error::EngineError;

/// Add one atom for `player` at `at`. Ownership is not checked here.
///
/// Returns the new atom count, or `None` if `at` is off the board.
pub fn place_atom(board: &mut Board, at: Coord, player: PlayerId) -> Option<u32> {
    let cell = board.cell_mut(at)?;
    cell.atoms += 1;
    cell.owner = Some(player);
    Some(cell.atoms)
}

/// Run one wave over `candidates`, returning the next wave's candidates.
///
/// Off-board coordinates are ignored. Returns an empty list when nothing
/// exploded, in which case the board is untouched.
pub fn step(board: &mut Board, candidates: &[Coord]) -> Result<Vec<Coord>, EngineError> {
    let mut next = Vec::new();

    for &at in candidates {
        let (owner, overflows) = match board.cell(at) {
            Some(cell) => (cell.owner, cell.overflows()),
            None => continue,
        };
        if !overflows {
            continue;
        }

        let mut around = [at; 4];
        let mut count = 0;
        for neighbor in board.neighbors_of(at) {
            around[count] = neighbor;
            count += 1;
        }

        for &neighbor in &around[..count] {
            if let Some(cell) = board.cell_mut(neighbor) {
                cell.atoms += 1;
                cell.owner = owner;
                next.push(neighbor);
            }
        }

        let source = board
            .cell_mut(at)
            .ok_or(EngineError::AtomUnderflow { at })?;
        source.atoms = source
            .atoms
            .checked_sub(count as u32)
            .ok_or(EngineError::AtomUnderflow { at })?;
        if source.atoms == 0 {
            source.owner = None;
        }
    }

    Ok(next)
}

/// Result of advancing a cascade by one wave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CascadeStep {
    /// Wave `n` exploded at least one cell and more candidates are queued.
    Wave(u32),
    /// Nothing left to explode.
    Quiescent,
    /// The board can never settle; the cascade stops here.
    Perpetual,
}

/// Board state captured after one wave.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaveSnapshot {
    pub wave: u32,
    pub board: Board,
    /// Candidates queued for the following wave.
    pub pending: Vec<Coord>,
}

/// Totals for a cascade run to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadeSummary {
    /// Waves in which at least one cell exploded.
    pub waves: u32,
    pub perpetual: bool,
}

/// Resumable wave sequence.
///
/// The only state carried between waves is the candidate queue, the wave
/// counter and a checkpoint used to notice when the sequence repeats itself.
#[derive(Debug, Clone)]
pub struct Cascade {
    queue: Vec<Coord>,
    waves: u32,
    perpetual: bool,
    cycle: CycleDetector,
}

impl Cascade {
    pub fn new(seeds: Vec<Coord>) -> Self {
        Self {
            queue: seeds,
            waves: 0,
            perpetual: false,
            cycle: CycleDetector::default(),
        }
    }

    /// Candidates for the next wave.
    pub fn pending(&self) -> &[Coord] {
        &self.queue
    }

    /// Explosion waves run so far.
    pub fn waves(&self) -> u32 {
        self.waves
    }

    pub fn is_finished(&self) -> bool {
        self.perpetual || self.queue.is_empty()
    }

    /// Run one wave against `board`.
    pub fn advance(&mut self, board: &mut Board) -> Result<CascadeStep, EngineError> {
        if self.perpetual {
            return Ok(CascadeStep::Perpetual);
        }
        if self.queue.is_empty() {
            return Ok(CascadeStep::Quiescent);
        }

        let next = step(board, &self.queue)?;
        if next.is_empty() {
            self.queue.clear();
            return Ok(CascadeStep::Quiescent);
        }

        self.queue = next;
        self.waves += 1;
        log::debug!(
            "Wave {}: {} candidates queued, {} atoms on board",
            self.waves,
            self.queue.len(),
            board.total_atoms()
        );

        if is_saturated_by_one_owner(board) || self.cycle.repeats(board, &self.queue) {
            self.perpetual = true;
            return Ok(CascadeStep::Perpetual);
        }

        Ok(CascadeStep::Wave(self.waves))
    }

    pub(crate) fn snapshot(&self, board: &Board) -> WaveSnapshot {
        WaveSnapshot {
            wave: self.waves,
            board: board.clone(),
            pending: self.queue.clone(),
        }
    }
}

/// Step from `seeds` until nothing overflows (or the cascade proves endless).
pub fn run_to_quiescence(
    board: &mut Board,
    seeds: &[Coord],
) -> Result<CascadeSummary, EngineError> {
    let mut cascade = Cascade::new(seeds.to_vec());
    loop {
        match cascade.advance(board)? {
            CascadeStep::Wave(_) => {}
            CascadeStep::Quiescent => {
                return Ok(CascadeSummary {
                    waves: cascade.waves(),
                    perpetual: false,
                })
            }
            CascadeStep::Perpetual => {
                return Ok(CascadeSummary {
                    waves: cascade.waves(),
                    perpetual: true,
                })
            }
        }
    }
}

/// Lazily yield a snapshot per wave. See [`Waves`].
pub fn waves(board: &mut Board, seeds: Vec<Coord>) -> Waves<'_> {
    Waves {
        board,
        cascade: Cascade::new(seeds),
        done: false,
    }
}

/// Iterator over explosion waves.
///
/// Every wave that exploded something yields its snapshot, including the
/// wave that revealed a perpetual cascade. An engine error is yielded once
/// and ends the iteration.
pub struct Waves<'a> {
    board: &'a mut Board,
    cascade: Cascade,
    done: bool,
}

impl Waves<'_> {
    /// Whether the cascade ended without settling.
    pub fn is_perpetual(&self) -> bool {
        self.cascade.perpetual
    }
}

impl Iterator for Waves<'_> {
    type Item = Result<WaveSnapshot, EngineError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.cascade.advance(self.board) {
            Ok(CascadeStep::Wave(_)) => Some(Ok(self.cascade.snapshot(self.board))),
            Ok(CascadeStep::Perpetual) => {
                self.done = true;
                Some(Ok(self.cascade.snapshot(self.board)))
            }
            Ok(CascadeStep::Quiescent) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// More atoms than the board can hold below capacity, all under one owner.
///
/// Such a board can never settle again and no further wave can change who
/// owns what.
fn is_saturated_by_one_owner(board: &Board) -> bool {
    let quiet_limit = board.capacity_sum() - board.cells().len() as u64;
    if board.total_atoms() <= quiet_limit {
        return false;
    }
    let mut owners = board.cells().iter().filter_map(|c| c.owner);
    match owners.next() {
        Some(first) => owners.all(|p| p == first),
        None => false,
    }
}

/// Brent-style repeat detection over (board, queue) states.
///
/// Keeps one checkpoint and moves it forward at power-of-two distances, so a
/// repeating wave sequence is caught within two cycle lengths of entering it.
#[derive(Debug, Clone, Default)]
struct CycleDetector {
    checkpoint: Option<(Board, Vec<Coord>)>,
    power: u32,
    since: u32,
}

impl CycleDetector {
    fn repeats(&mut self, board: &Board, queue: &[Coord]) -> bool {
        match &self.checkpoint {
            Some((seen_board, seen_queue)) => {
                if seen_board == board && seen_queue.as_slice() == queue {
                    return true;
                }
            }
            None => {
                self.remember(board, queue);
                self.power = 1;
                return false;
            }
        }

        self.since += 1;
        if self.since == self.power {
            self.remember(board, queue);
            self.power = self.power.saturating_mul(2);
        }
        false
    }

    fn remember(&mut self, board: &Board, queue: &[Coord]) {
        self.checkpoint = Some((board.clone(), queue.to_vec()));
        self.since = 0;
    }
}
