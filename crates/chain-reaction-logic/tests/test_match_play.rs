//! Integration tests for whole matches.
//!
//! Exercises: MatchConfig → Match → submit_move / place + advance_wave
//! → TurnTracker eliminations → winner.
//!
//! Random playouts use a fixed seed so failures reproduce.

use chain_reaction_logic::board::{Board, Coord};
use chain_reaction_logic::config::{validate_config, MatchConfig};
use chain_reaction_logic::error::MoveError;
use chain_reaction_logic::explosion;
use chain_reaction_logic::game::{Match, WaveOutcome};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

// ── Helpers ────────────────────────────────────────────────────────────

fn new_match(rows: usize, columns: usize, players: u8) -> Match {
    Match::new(MatchConfig::with_players(rows, columns, players)).unwrap()
}

fn cell(game: &Match, row: usize, col: usize) -> (u32, Option<u8>) {
    let c = game.board().cell(Coord::new(row, col)).unwrap();
    (c.atoms, c.owner)
}

/// The opening from the 2x2 walkthrough: P1 corner, P2 opposite corner,
/// P1 explodes its corner into both shared neighbors.
fn two_by_two_opening() -> Match {
    let mut game = new_match(2, 2, 2);
    game.submit_move(0, 0, 1).unwrap();
    game.submit_move(1, 1, 2).unwrap();
    game.submit_move(0, 0, 1).unwrap();
    game
}

// ── Scripted scenarios ─────────────────────────────────────────────────

#[test]
fn two_by_two_walkthrough() {
    let mut game = new_match(2, 2, 2);
    for at in game.board().coords().collect::<Vec<_>>() {
        assert_eq!(game.board().cell(at).unwrap().capacity, 2);
    }

    let result = game.submit_move(0, 0, 1).unwrap();
    assert_eq!(cell(&game, 0, 0), (1, Some(1)));
    assert_eq!(result.wave_count, 0);

    assert_eq!(
        game.submit_move(0, 0, 2),
        Err(MoveError::CellContested {
            at: Coord::new(0, 0),
            owner: 1
        })
    );
    game.submit_move(1, 1, 2).unwrap();
    assert_eq!(cell(&game, 1, 1), (1, Some(2)));

    let result = game.submit_move(0, 0, 1).unwrap();
    assert_eq!(result.wave_count, 1);
    assert_eq!(cell(&game, 0, 0), (0, None));
    assert_eq!(cell(&game, 0, 1), (1, Some(1)));
    assert_eq!(cell(&game, 1, 0), (1, Some(1)));
    assert_eq!(cell(&game, 1, 1), (1, Some(2)));
    assert_eq!(result.winner, None);
    assert_eq!(result.next_turn, Some(2));
    assert_eq!(result.snapshots.len(), 1);
    assert_eq!(result.snapshots[0].board, result.board);
}

#[test]
fn capturing_last_cell_eliminates() {
    let mut game = two_by_two_opening();
    game.submit_move(0, 0, 2).unwrap();
    // P1's blast from (0,1) lands on (1,1) and (0,0), P2's only cells.
    let result = game.submit_move(0, 1, 1).unwrap();
    assert_eq!(cell(&game, 1, 1), (2, Some(1)));
    assert!(game.tracker().is_eliminated(2));
    assert_eq!(game.tracker().find_winner(), Some(1));
    assert_eq!(result.winner, Some(1));
    assert_eq!(game.winner(), Some(1));
    assert!(matches!(
        game.submit_move(1, 0, 1),
        Err(MoveError::GameOver { winner: 1 })
    ));
}

#[test]
fn chain_waits_for_next_wave() {
    let mut game = new_match(2, 4, 2);
    game.submit_move(0, 0, 1).unwrap();
    game.submit_move(1, 3, 2).unwrap();
    game.submit_move(1, 0, 1).unwrap();
    game.submit_move(0, 3, 2).unwrap();

    game.place(0, 0, 1).unwrap();
    let first = match game.advance_wave().unwrap() {
        WaveOutcome::Pending(snapshot) => snapshot,
        other => panic!("expected a pending wave, got {:?}", other),
    };
    assert_eq!(first.wave, 1);
    // (1,0) is at capacity but only explodes in wave 2.
    let below = first.board.cell(Coord::new(1, 0)).unwrap();
    assert_eq!((below.atoms, below.owner), (2, Some(1)));
    assert!(first.pending.contains(&Coord::new(1, 0)));

    let second = match game.advance_wave().unwrap() {
        WaveOutcome::Pending(snapshot) => snapshot,
        other => panic!("expected a pending wave, got {:?}", other),
    };
    assert_eq!(second.wave, 2);
    assert_eq!(cell(&game, 1, 0), (0, None));
    assert_eq!(cell(&game, 0, 0), (1, Some(1)));
    assert_eq!(cell(&game, 1, 1), (1, Some(1)));

    let result = match game.advance_wave().unwrap() {
        WaveOutcome::Resolved(result) => result,
        other => panic!("expected resolution, got {:?}", other),
    };
    assert_eq!(result.wave_count, 2);
    assert_eq!(result.next_turn, Some(2));
    assert_eq!(game.board().total_atoms(), 5);
}

#[test]
fn eliminated_player_is_skipped() {
    let mut game = new_match(3, 3, 3);
    game.submit_move(0, 0, 1).unwrap();
    game.submit_move(0, 1, 2).unwrap();
    game.submit_move(2, 2, 3).unwrap();

    let result = game.submit_move(0, 0, 1).unwrap();
    assert_eq!(cell(&game, 0, 1), (2, Some(1)));
    assert!(game.tracker().is_eliminated(2));
    assert_eq!(result.winner, None);
    assert_eq!(result.next_turn, Some(3));
    assert_eq!(game.tracker().active_players(), vec![1, 3]);

    assert!(matches!(
        game.submit_move(1, 1, 2),
        Err(MoveError::NotYourTurn {
            expected: 3,
            found: 2
        })
    ));
    let result = game.submit_move(2, 2, 3).unwrap();
    assert_eq!(result.next_turn, Some(1));
}

#[test]
fn rejected_moves_leave_no_trace() {
    let mut game = two_by_two_opening();
    let board = game.board().clone();
    let tracker = game.tracker().clone();

    assert!(game.submit_move(5, 5, 2).is_err());
    assert!(game.submit_move(0, 1, 2).is_err());
    assert!(game.submit_move(0, 0, 1).is_err());

    assert_eq!(game.board(), &board);
    assert_eq!(game.tracker(), &tracker);
    assert_eq!(game.turn(), 2);
    assert!(game.can_act());
}

#[test]
fn restart_begins_a_fresh_match() {
    let mut game = two_by_two_opening();
    game.submit_move(0, 0, 2).unwrap();
    game.submit_move(0, 1, 1).unwrap();
    assert!(game.winner().is_some());

    game.restart();
    assert_eq!(game.winner(), None);
    assert_eq!(game.turn(), 1);
    assert!(game.submit_move(1, 1, 1).is_ok());
}

// ── Config ─────────────────────────────────────────────────────────────

#[test]
fn config_round_trips_through_json() {
    let json = r#"{
        "rows": 4,
        "columns": 7,
        "player_count": 3,
        "players": [
            { "label": "Red", "color": [255, 0, 0] },
            { "label": "Green", "color": [0, 255, 0] },
            { "label": "Blue", "color": [0, 0, 255] }
        ]
    }"#;
    let config: MatchConfig = serde_json::from_str(json).unwrap();
    assert_eq!(config.wave_delay_ms, 700);
    assert!(validate_config(&config).is_empty());
    assert_eq!(config.identity(3).label, "Blue");

    let game = Match::new(config).unwrap();
    assert_eq!(game.board().rows(), 4);
    assert_eq!(game.board().columns(), 7);
    assert_eq!(game.tracker().player_count(), 3);
}

#[test]
fn config_without_identities_uses_fallbacks() {
    let config: MatchConfig =
        serde_json::from_str(r#"{ "rows": 3, "columns": 3, "player_count": 4 }"#).unwrap();
    assert!(config.players.is_empty());
    assert!(validate_config(&config).is_empty());
    assert_eq!(config.identity(4).label, "Player 4");
}

// ── Random playouts ────────────────────────────────────────────────────

/// Play one seeded match wave by wave, checking invariants after each wave.
/// Returns the number of moves made.
fn play_random_match(rng: &mut StdRng) -> usize {
    let rows = rng.gen_range(2..=5);
    let columns = rng.gen_range(2..=5);
    let players = rng.gen_range(2..=4u8);
    let mut game = new_match(rows, columns, players);

    // Each move adds one atom; a board past its quiet limit ends the match
    // on the following move once everybody has played.
    let quiet_limit = (game.board().capacity_sum() - game.board().cells().len() as u64) as usize;
    let move_limit = quiet_limit + players as usize + 2;

    let mut moves = 0;
    while game.winner().is_none() {
        assert!(moves <= move_limit, "match did not end in {} moves", moves);

        let legal = game.legal_moves();
        let target = *legal.choose(rng).expect("current player has a legal move");
        game.place(target.row, target.col, game.turn()).unwrap();
        moves += 1;

        loop {
            let board = match game.advance_wave().unwrap() {
                WaveOutcome::Pending(snapshot) => snapshot.board,
                WaveOutcome::Resolved(result) => {
                    if let Some(next) = result.next_turn {
                        assert!(!game.tracker().is_eliminated(next));
                    }
                    result.board
                }
            };
            assert_eq!(board.total_atoms(), moves as u64);
            assert!(board.check_invariants().is_ok());
            if game.can_act() || game.winner().is_some() {
                break;
            }
        }
    }

    let winner = game.winner().unwrap();
    assert_eq!(game.tracker().active_players(), vec![winner]);
    assert!(game.board().owned_cells(winner) > 0);
    moves
}

#[test]
fn random_matches_conserve_atoms_and_terminate() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..60 {
        let moves = play_random_match(&mut rng);
        assert!(moves >= 2);
    }
}

#[test]
fn step_matches_run_to_quiescence() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..40 {
        let mut board = Board::new(4, 4).unwrap();
        let mut placed = 0u64;
        for _ in 0..12 {
            let at = Coord::new(rng.gen_range(0..4), rng.gen_range(0..4));
            let owner = board.cell(at).unwrap().owner.unwrap_or(rng.gen_range(1..=2));
            explosion::place_atom(&mut board, at, owner);
            placed += 1;

            let mut stepped = board.clone();
            let mut queue = vec![at];
            while !queue.is_empty() {
                queue = explosion::step(&mut stepped, &queue).unwrap();
            }
            let summary = explosion::run_to_quiescence(&mut board, &[at]).unwrap();
            assert!(!summary.perpetual);
            assert_eq!(board, stepped);
            assert_eq!(board.total_atoms(), placed);
        }
    }
}
