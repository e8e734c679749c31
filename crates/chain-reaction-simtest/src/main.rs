//! Chain Reaction Headless Match Harness
//!
//! Validates the rules engine, scripted scenarios and seeded random matches
//! without any rendering or input layer.
//!
//! Usage:
//!   cargo run -p chain-reaction-simtest
//!   cargo run -p chain-reaction-simtest -- --verbose
//!   cargo run -p chain-reaction-simtest -- --seed 9 --matches 500
//!   cargo run -p chain-reaction-simtest -- --config my_match.json --animate

mod logger;
mod render;

use std::time::Duration;

use chain_reaction_logic::board::{Board, Coord, PlayerId};
use chain_reaction_logic::config::{validate_config, MatchConfig};
use chain_reaction_logic::error::{BoardError, MoveError, SetupError};
use chain_reaction_logic::explosion;
use chain_reaction_logic::game::{Match, WaveOutcome};
use log::LevelFilter;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

// ── Match config (same JSON a front end would ship) ─────────────────────
const DEFAULT_MATCH_JSON: &str = include_str!("../../../data/default_match.json");

const DEFAULT_SEED: u64 = 42;
const DEFAULT_MATCHES: usize = 200;

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

struct Options {
    verbose: bool,
    trace: bool,
    animate: bool,
    seed: u64,
    matches: usize,
    config_path: Option<String>,
}

impl Options {
    fn parse() -> Result<Self, String> {
        let mut opts = Self {
            verbose: false,
            trace: false,
            animate: false,
            seed: DEFAULT_SEED,
            matches: DEFAULT_MATCHES,
            config_path: None,
        };
        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--verbose" => opts.verbose = true,
                "--trace" => opts.trace = true,
                "--animate" => opts.animate = true,
                "--seed" => opts.seed = parse_value(&arg, args.next())?,
                "--matches" => opts.matches = parse_value(&arg, args.next())?,
                "--config" => {
                    let path = args.next().ok_or_else(|| "--config needs a path".to_string())?;
                    opts.config_path = Some(path);
                }
                other => return Err(format!("unknown argument: {}", other)),
            }
        }
        Ok(opts)
    }

    fn log_level(&self) -> LevelFilter {
        if self.trace {
            LevelFilter::Debug
        } else if self.verbose {
            LevelFilter::Info
        } else {
            LevelFilter::Warn
        }
    }
}

fn parse_value<T: std::str::FromStr>(flag: &str, value: Option<String>) -> Result<T, String> {
    let value = value.ok_or_else(|| format!("{} needs a value", flag))?;
    value
        .parse()
        .map_err(|_| format!("invalid value for {}: {}", flag, value))
}

fn main() {
    let opts = match Options::parse() {
        Ok(opts) => opts,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!(
                "usage: chain-reaction-simtest [--verbose] [--trace] [--animate] \
                 [--seed N] [--matches N] [--config PATH]"
            );
            std::process::exit(2);
        }
    };
    logger::init(opts.log_level());
    let verbose = opts.verbose;
    println!("=== Chain Reaction Match Harness ===\n");

    let loaded = load_config(opts.config_path.as_deref());
    let mut results = Vec::new();

    // 1. Match config parsing and validation
    results.extend(validate_match_config(&loaded, verbose));

    // 2. Board model
    results.extend(validate_board_model(verbose));

    // 3. Explosion engine
    results.extend(validate_explosion_engine(opts.seed, verbose));

    // 4. Scripted matches
    results.extend(validate_scripted_matches(verbose));

    // 5. Seeded random playouts
    results.extend(validate_random_playouts(opts.seed, opts.matches, verbose));

    // 6. Configured match
    results.extend(play_configured_match(&loaded, &opts));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

fn load_config(path: Option<&str>) -> Result<MatchConfig, String> {
    let json = match path {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {}", path, e))?,
        None => DEFAULT_MATCH_JSON.to_string(),
    };
    serde_json::from_str(&json).map_err(|e| format!("JSON parse error: {}", e))
}

// ── 1. Match Config ─────────────────────────────────────────────────────

fn validate_match_config(loaded: &Result<MatchConfig, String>, verbose: bool) -> Vec<TestResult> {
    println!("--- Match Config ---");
    let mut results = Vec::new();

    // Shipped defaults agree with MatchConfig::default()
    match serde_json::from_str::<MatchConfig>(DEFAULT_MATCH_JSON) {
        Ok(shipped) => results.push(TestResult {
            name: "config_shipped_matches_default".into(),
            passed: shipped == MatchConfig::default(),
            detail: format!(
                "{}x{} board, {} players, {} ms waves",
                shipped.rows, shipped.columns, shipped.player_count, shipped.wave_delay_ms
            ),
        }),
        Err(e) => results.push(TestResult {
            name: "config_shipped_matches_default".into(),
            passed: false,
            detail: format!("JSON parse error: {}", e),
        }),
    }

    // The config this run plays with
    match loaded {
        Ok(config) => {
            let errors = validate_config(config);
            results.push(TestResult {
                name: "config_valid".into(),
                passed: errors.is_empty(),
                detail: if errors.is_empty() {
                    format!(
                        "{}x{} board, {} players",
                        config.rows, config.columns, config.player_count
                    )
                } else {
                    errors
                        .iter()
                        .map(|e| e.to_string())
                        .collect::<Vec<_>>()
                        .join("; ")
                },
            });
            if verbose {
                println!("  Players:");
                for p in 1..=config.player_count {
                    let identity = config.identity(p);
                    println!("    {}: {} {:?}", p, identity.label, identity.color);
                }
            }
        }
        Err(e) => results.push(TestResult {
            name: "config_valid".into(),
            passed: false,
            detail: e.clone(),
        }),
    }

    // Bad setups are refused before a board exists
    let mut bad = MatchConfig::with_players(1, 4, 1);
    bad.players.clear();
    let rejected = match Match::new(bad) {
        Err(SetupError::Config(errors)) => errors.len() == 2,
        _ => false,
    };
    results.push(TestResult {
        name: "config_rejects_bad_setup".into(),
        passed: rejected,
        detail: "1x4 board with 1 player reports both problems".into(),
    });

    // Identities are optional
    let bare: Result<MatchConfig, _> =
        serde_json::from_str(r#"{ "rows": 3, "columns": 3, "player_count": 3 }"#);
    let fallback_ok = bare.as_ref().is_ok_and(|c| {
        validate_config(c).is_empty() && c.identity(3).label == "Player 3" && c.wave_delay_ms == 700
    });
    results.push(TestResult {
        name: "config_identity_fallback".into(),
        passed: fallback_ok,
        detail: "missing identities fall back to \"Player N\"".into(),
    });

    results
}

// ── 2. Board Model ──────────────────────────────────────────────────────

fn validate_board_model(_verbose: bool) -> Vec<TestResult> {
    println!("--- Board Model ---");
    let mut results = Vec::new();

    // Capacity equals neighbor count everywhere
    let mut boards = 0;
    let mut mismatches = Vec::new();
    for rows in 2..=8 {
        for columns in 2..=8 {
            let Ok(board) = Board::new(rows, columns) else {
                mismatches.push(format!("{}x{} refused", rows, columns));
                continue;
            };
            boards += 1;
            for at in board.coords() {
                let capacity = board.cell(at).map_or(0, |c| c.capacity);
                if capacity as usize != board.neighbors_of(at).count() {
                    mismatches.push(format!("{}x{} at {}", rows, columns, at));
                }
            }
        }
    }
    results.push(TestResult {
        name: "board_capacity_is_neighbors".into(),
        passed: mismatches.is_empty(),
        detail: if mismatches.is_empty() {
            format!("{} boards checked", boards)
        } else {
            mismatches.join(", ")
        },
    });

    // Capacity total: 4rc - 2r - 2c
    let sums_ok = (2..=8).all(|r| {
        (2..=8).all(|c| {
            Board::new(r, c).is_ok_and(|b| b.capacity_sum() == (4 * r * c - 2 * r - 2 * c) as u64)
        })
    });
    results.push(TestResult {
        name: "board_capacity_sum".into(),
        passed: sums_ok,
        detail: "capacity sum is 4rc - 2r - 2c".into(),
    });

    // Too small in either direction
    let refused = [(1, 4), (4, 1), (0, 0)]
        .iter()
        .all(|&(r, c)| Board::new(r, c) == Err(BoardError::InvalidDimensions { rows: r, columns: c }));
    results.push(TestResult {
        name: "board_invalid_dimensions".into(),
        passed: refused,
        detail: "1x4, 4x1 and 0x0 refused".into(),
    });

    // New boards are empty and settled
    let fresh = Board::new(5, 6).is_ok_and(|b| {
        b.total_atoms() == 0 && b.is_quiescent() && b.cells().iter().all(|c| c.owner.is_none())
    });
    results.push(TestResult {
        name: "board_starts_empty".into(),
        passed: fresh,
        detail: "5x6 board has no atoms and no owners".into(),
    });

    results
}

// ── 3. Explosion Engine ─────────────────────────────────────────────────

fn validate_explosion_engine(seed: u64, verbose: bool) -> Vec<TestResult> {
    println!("--- Explosion Engine ---");
    let mut results = Vec::new();
    let mut rng = StdRng::seed_from_u64(seed);

    // Quiescent boards are left alone
    let mut disturbed = 0;
    for _ in 0..100 {
        let board = random_settled_board(&mut rng);
        let mut stepped = board.clone();
        let coords: Vec<Coord> = stepped.coords().collect();
        match explosion::step(&mut stepped, &coords) {
            Ok(next) if next.is_empty() && stepped == board => {}
            _ => disturbed += 1,
        }
    }
    results.push(TestResult {
        name: "engine_quiescent_idempotent".into(),
        passed: disturbed == 0,
        detail: format!("{} of 100 settled boards disturbed", disturbed),
    });

    // Cascades move atoms, never create or destroy them
    let mut leaks = Vec::new();
    let mut perpetual = 0;
    for _ in 0..100 {
        let mut board = random_settled_board(&mut rng);
        let at = Coord::new(
            rng.gen_range(0..board.rows()),
            rng.gen_range(0..board.columns()),
        );
        let owner = board
            .cell(at)
            .and_then(|c| c.owner)
            .unwrap_or_else(|| rng.gen_range(1..=3));
        explosion::place_atom(&mut board, at, owner);
        let before = board.total_atoms();
        match explosion::run_to_quiescence(&mut board, &[at]) {
            Ok(summary) => {
                if summary.perpetual {
                    perpetual += 1;
                }
                if board.total_atoms() != before || board.check_invariants().is_err() {
                    leaks.push(format!("{}x{} from {}", board.rows(), board.columns(), at));
                }
            }
            Err(e) => leaks.push(e.to_string()),
        }
    }
    results.push(TestResult {
        name: "engine_conservation".into(),
        passed: leaks.is_empty() && perpetual == 0,
        detail: if leaks.is_empty() {
            format!("100 cascades conserved atoms and settled ({} perpetual)", perpetual)
        } else {
            leaks.join(", ")
        },
    });

    // A cell filled by wave 1 explodes in wave 2, not earlier
    let mut board = Board::new(2, 4).unwrap();
    explosion::place_atom(&mut board, Coord::new(0, 0), 1);
    explosion::place_atom(&mut board, Coord::new(0, 0), 1);
    explosion::place_atom(&mut board, Coord::new(1, 0), 1);
    let snapshots: Vec<_> = explosion::waves(&mut board, vec![Coord::new(0, 0)])
        .filter_map(Result::ok)
        .collect();
    let chain_ok = snapshots.len() == 2
        && snapshots[0].pending == vec![Coord::new(1, 0), Coord::new(0, 1)]
        && snapshots[0]
            .board
            .cell(Coord::new(1, 0))
            .is_some_and(|c| c.atoms == 2)
        && board.cell(Coord::new(1, 0)).is_some_and(|c| c.is_empty())
        && board.total_atoms() == 3;
    results.push(TestResult {
        name: "engine_wave_by_wave_chain".into(),
        passed: chain_ok,
        detail: format!("{} waves, chained cell waits one wave", snapshots.len()),
    });
    if verbose {
        for snapshot in &snapshots {
            println!("  Wave {}:", snapshot.wave);
            print!("{}", render::render_board(&snapshot.board));
        }
    }

    // A board one player has flooded can never settle
    let mut flooded = Board::new(2, 2).unwrap();
    let coords: Vec<Coord> = flooded.coords().collect();
    for &at in &coords {
        explosion::place_atom(&mut flooded, at, 1);
        explosion::place_atom(&mut flooded, at, 1);
    }
    let stopped = explosion::run_to_quiescence(&mut flooded, &coords)
        .is_ok_and(|s| s.perpetual && flooded.total_atoms() == 8);
    results.push(TestResult {
        name: "engine_perpetual_detected".into(),
        passed: stopped,
        detail: "2x2 board holding 8 atoms of one player stops".into(),
    });

    results
}

/// Random board with every cell below capacity.
///
/// Holds fewer atoms than the grid has edges, even after one more is
/// placed, so any cascade started on it is guaranteed to settle.
fn random_settled_board(rng: &mut StdRng) -> Board {
    let rows = rng.gen_range(2..=6);
    let columns = rng.gen_range(2..=6);
    let mut board = Board::new(rows, columns).unwrap();
    let mut budget = board.capacity_sum() / 2 - 2;
    let coords: Vec<Coord> = board.coords().collect();
    for at in coords {
        let capacity = board.cell(at).map_or(0, |c| c.capacity);
        let atoms = (rng.gen_range(0..capacity) as u64).min(budget);
        budget -= atoms;
        let owner = rng.gen_range(1..=3);
        for _ in 0..atoms {
            explosion::place_atom(&mut board, at, owner);
        }
    }
    board
}

// ── 4. Scripted Matches ─────────────────────────────────────────────────

fn validate_scripted_matches(verbose: bool) -> Vec<TestResult> {
    println!("--- Scripted Matches ---");
    let mut results = Vec::new();

    // 2x2 walkthrough
    let outcome = (|| -> Result<bool, MoveError> {
        let mut game = new_match(2, 2, 2);
        game.submit_move(0, 0, 1)?;
        let contested = matches!(
            game.submit_move(0, 0, 2),
            Err(MoveError::CellContested { owner: 1, .. })
        );
        game.submit_move(1, 1, 2)?;
        let result = game.submit_move(0, 0, 1)?;
        if verbose {
            if let Ok(json) = serde_json::to_string_pretty(&result) {
                println!("  Walkthrough result:\n{}", json);
            }
        }
        let owners: Vec<_> = result.board.cells().iter().map(|c| (c.atoms, c.owner)).collect();
        Ok(contested
            && result.wave_count == 1
            && result.next_turn == Some(2)
            && owners == vec![(0, None), (1, Some(1)), (1, Some(1)), (1, Some(2))])
    })();
    results.push(scenario_result("scenario_two_by_two", outcome, "corner explodes into both neighbors"));

    // Capture of the last cell eliminates and ends the match
    let outcome = (|| -> Result<bool, MoveError> {
        let mut game = new_match(2, 2, 2);
        game.submit_move(0, 0, 1)?;
        game.submit_move(1, 1, 2)?;
        game.submit_move(0, 0, 1)?;
        game.submit_move(0, 0, 2)?;
        let result = game.submit_move(0, 1, 1)?;
        if let Some(winner) = result.winner {
            println!("  {}", render::winner_banner(game.config(), winner));
        }
        Ok(result.winner == Some(1)
            && game.tracker().is_eliminated(2)
            && matches!(game.submit_move(1, 0, 1), Err(MoveError::GameOver { winner: 1 })))
    })();
    results.push(scenario_result("scenario_elimination", outcome, "player 2 captured out, player 1 wins"));

    // Eliminated seats are skipped
    let outcome = (|| -> Result<bool, MoveError> {
        let mut game = new_match(3, 3, 3);
        game.submit_move(0, 0, 1)?;
        game.submit_move(0, 1, 2)?;
        game.submit_move(2, 2, 3)?;
        let result = game.submit_move(0, 0, 1)?;
        Ok(result.next_turn == Some(3) && game.tracker().active_players() == vec![1, 3])
    })();
    results.push(scenario_result("scenario_skip_eliminated", outcome, "turn passes 1 -> 3"));

    // Rejections never touch state
    let outcome = (|| -> Result<bool, MoveError> {
        let mut game = new_match(3, 3, 2);
        game.submit_move(1, 1, 1)?;
        let board = game.board().clone();
        let rejected = game.submit_move(9, 0, 2).is_err()
            && game.submit_move(1, 1, 2).is_err()
            && game.submit_move(0, 0, 1).is_err();
        game.place(0, 0, 2)?;
        let locked = matches!(game.submit_move(2, 2, 1), Err(MoveError::MoveInProgress));
        Ok(rejected && locked && board.total_atoms() == 1 && game.board().total_atoms() == 2)
    })();
    results.push(scenario_result("scenario_rejections", outcome, "bad moves leave the board alone"));

    results
}

fn new_match(rows: usize, columns: usize, players: u8) -> Match {
    Match::new(MatchConfig::with_players(rows, columns, players)).expect("scripted setup is valid")
}

fn scenario_result(name: &str, outcome: Result<bool, MoveError>, detail: &str) -> TestResult {
    match outcome {
        Ok(passed) => TestResult {
            name: name.into(),
            passed,
            detail: detail.into(),
        },
        Err(e) => TestResult {
            name: name.into(),
            passed: false,
            detail: format!("move rejected: {}", e),
        },
    }
}

// ── 5. Random Playouts ──────────────────────────────────────────────────

struct Playout {
    moves: usize,
    max_waves: u32,
    perpetual_finish: bool,
    winner: PlayerId,
    board: Board,
}

/// Play one match with uniformly random legal moves, checking invariants
/// after every wave. `observe` sees each intermediate and settled board.
fn play_random_match(
    config: MatchConfig,
    rng: &mut StdRng,
    observe: &mut dyn FnMut(&str, &Board),
) -> Result<Playout, String> {
    let mut game = Match::new(config).map_err(|e| e.to_string())?;
    let board = game.board();
    // Past this many atoms some cell must overflow on every move.
    let quiet_limit = (board.capacity_sum() - board.cells().len() as u64) as usize;
    let move_limit = quiet_limit + game.config().player_count as usize + 2;

    let mut moves = 0;
    let mut max_waves = 0;
    let mut perpetual_finish = false;
    let winner = loop {
        if let Some(winner) = game.winner() {
            break winner;
        }
        if moves >= move_limit {
            return Err(format!("no winner after {} moves", moves));
        }

        let player = game.turn();
        let target = *game
            .legal_moves()
            .choose(rng)
            .ok_or_else(|| format!("player {} has no legal move", player))?;
        game.place(target.row, target.col, player)
            .map_err(|e| e.to_string())?;
        moves += 1;

        loop {
            match game.advance_wave().map_err(|e| e.to_string())? {
                WaveOutcome::Pending(snapshot) => {
                    check_board(&snapshot.board, moves)?;
                    observe(&format!("wave {}", snapshot.wave), &snapshot.board);
                }
                WaveOutcome::Resolved(result) => {
                    check_board(&result.board, moves)?;
                    if result.winner.is_none() && !result.perpetual && !result.board.is_quiescent() {
                        return Err(format!("move {} left a cell overflowing", moves));
                    }
                    if let Some(next) = result.next_turn {
                        if game.tracker().is_eliminated(next) {
                            return Err(format!("turn passed to eliminated player {}", next));
                        }
                    }
                    max_waves = max_waves.max(result.wave_count);
                    perpetual_finish = result.perpetual;
                    observe(&format!("player {} at {}", player, target), &result.board);
                    break;
                }
            }
        }
    };

    if game.tracker().active_players() != vec![winner] {
        return Err(format!("winner {} is not the only player left", winner));
    }
    if game.board().owned_cells(winner) == 0 {
        return Err(format!("winner {} owns no cells", winner));
    }
    Ok(Playout {
        moves,
        max_waves,
        perpetual_finish,
        winner,
        board: game.board().clone(),
    })
}

fn check_board(board: &Board, moves: usize) -> Result<(), String> {
    if board.total_atoms() != moves as u64 {
        return Err(format!(
            "{} atoms on the board after {} moves",
            board.total_atoms(),
            moves
        ));
    }
    board.check_invariants().map_err(|e| e.to_string())?;
    for at in board.coords() {
        let capacity = board.cell(at).map_or(0, |c| c.capacity);
        if capacity as usize != board.neighbors_of(at).count() {
            return Err(format!("capacity drifted at {}", at));
        }
    }
    Ok(())
}

fn validate_random_playouts(seed: u64, matches: usize, verbose: bool) -> Vec<TestResult> {
    println!("--- Random Playouts ---");
    let mut results = Vec::new();
    let mut rng = StdRng::seed_from_u64(seed);

    let mut failures = Vec::new();
    let mut wins = [0usize; 5];
    let mut total_moves = 0;
    let mut longest_cascade = 0;
    let mut perpetual_finishes = 0;

    for i in 0..matches {
        let rows = rng.gen_range(2..=7);
        let columns = rng.gen_range(2..=7);
        let players = rng.gen_range(2..=4u8);
        let config = MatchConfig::with_players(rows, columns, players);
        match play_random_match(config, &mut rng, &mut |_: &str, _: &Board| {}) {
            Ok(playout) => {
                wins[playout.winner as usize] += 1;
                total_moves += playout.moves;
                longest_cascade = longest_cascade.max(playout.max_waves);
                if playout.perpetual_finish {
                    perpetual_finishes += 1;
                }
            }
            Err(e) => failures.push(format!(
                "match {} ({}x{}, {}p): {}",
                i, rows, columns, players, e
            )),
        }
    }

    results.push(TestResult {
        name: "playouts_invariants".into(),
        passed: failures.is_empty(),
        detail: if failures.is_empty() {
            format!("{} matches, seed {}", matches, seed)
        } else {
            failures.join("; ")
        },
    });

    let finished = matches - failures.len();
    let avg_moves = if finished > 0 {
        total_moves as f32 / finished as f32
    } else {
        0.0
    };
    results.push(TestResult {
        name: "playouts_stats".into(),
        passed: true,
        detail: format!(
            "avg {:.1} moves, longest cascade {} waves, {} perpetual finishes",
            avg_moves, longest_cascade, perpetual_finishes
        ),
    });

    if verbose {
        println!("  Wins by seat:");
        for (seat, count) in wins.iter().enumerate().skip(1) {
            println!("    player {}: {}", seat, count);
        }
    }

    results
}

// ── 6. Configured Match ─────────────────────────────────────────────────

fn play_configured_match(loaded: &Result<MatchConfig, String>, opts: &Options) -> Vec<TestResult> {
    println!("--- Configured Match ---");
    let mut results = Vec::new();

    let config = match loaded {
        Ok(config) if validate_config(config).is_empty() => config.clone(),
        _ => {
            results.push(TestResult {
                name: "configured_match".into(),
                passed: false,
                detail: "no valid config to play".into(),
            });
            return results;
        }
    };

    let delay = Duration::from_millis(config.wave_delay_ms);
    let animate = opts.animate;
    let mut observe = |heading: &str, board: &Board| {
        if animate {
            println!("  -- {} --", heading);
            print!("{}", render::render_board(board));
            std::thread::sleep(delay);
        }
    };

    let mut rng = StdRng::seed_from_u64(opts.seed);
    match play_random_match(config.clone(), &mut rng, &mut observe) {
        Ok(playout) => {
            if animate || opts.verbose {
                print!("{}", render::render_board(&playout.board));
                println!("{}", render::render_standings(&playout.board, &config));
            }
            println!("  {}", render::winner_banner(&config, playout.winner));
            if opts.verbose {
                if let Ok(json) = serde_json::to_string(&playout.board) {
                    println!("  Final board: {}", json);
                }
            }
            results.push(TestResult {
                name: "configured_match".into(),
                passed: true,
                detail: format!(
                    "{} won in {} moves on {}x{}",
                    config.identity(playout.winner).label,
                    playout.moves,
                    config.rows,
                    config.columns
                ),
            });
        }
        Err(e) => results.push(TestResult {
            name: "configured_match".into(),
            passed: false,
            detail: e,
        }),
    }

    results
}
