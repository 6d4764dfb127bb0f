//! lifetrail Headless Simulation Harness
//!
//! Validates the pure life logic and drives the engine at a fixed frame
//! rate. Runs entirely in-process without a window or input devices.
//!
//! Usage:
//!   cargo run -p lifetrail-simtest
//!   cargo run -p lifetrail-simtest -- --verbose --seconds 10
//!   cargo run -p lifetrail-simtest -- --config world.json --json

use lifetrail_core::prelude::*;
use lifetrail_logic::clock::{ClockState, SimulationClock};
use lifetrail_logic::constants::tiles;
use lifetrail_logic::overlay::{step_merged, AgingMap, HistoryOverlay, MergedCell, SnapshotRing};
use lifetrail_logic::rule::{step, Conway};
use lifetrail_logic::seed::seed;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

/// Host frame rate the engine is driven at.
const HOST_FPS: f64 = 30.0;

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

struct Options {
    verbose: bool,
    json: bool,
    seconds: f64,
    config_path: Option<String>,
}

impl Options {
    fn from_args() -> Self {
        let args: Vec<String> = std::env::args().skip(1).collect();
        let value_of = |flag: &str| {
            args.iter()
                .position(|a| a == flag)
                .and_then(|i| args.get(i + 1))
                .cloned()
        };
        Self {
            verbose: args.iter().any(|a| a == "--verbose"),
            json: args.iter().any(|a| a == "--json"),
            seconds: value_of("--seconds")
                .and_then(|s| s.parse().ok())
                .unwrap_or(5.0),
            config_path: value_of("--config"),
        }
    }
}

/// Summary of a headless engine run.
#[derive(Debug, Serialize)]
struct RunReport {
    config: SimConfig,
    frames: u64,
    generations: u64,
    population_start: usize,
    population_end: usize,
    final_grid: Vec<String>,
}

fn main() {
    env_logger::init();
    let options = Options::from_args();
    println!("=== lifetrail Simulation Harness ===\n");

    let mut results = Vec::new();

    // 1. Transition rule fixtures
    results.extend(validate_rule(options.verbose));

    // 2. Hard edges
    results.extend(validate_edges(options.verbose));

    // 3. Trail overlays
    results.extend(validate_overlays(options.verbose));

    // 4. Clock cadence
    results.extend(validate_clock(options.verbose));

    // 5. Seeding statistics
    results.extend(validate_seed(options.verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || options.verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    // 6. Headless engine run
    if let Err(e) = headless_run(&options) {
        eprintln!("headless run failed: {}", e);
        std::process::exit(1);
    }

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Transition Rule ──────────────────────────────────────────────────

fn validate_rule(verbose: bool) -> Vec<TestResult> {
    println!("--- Transition Rule ---");
    let mut results = Vec::new();

    let horizontal = alive_cells(10, 10, &[(5, 4), (5, 5), (5, 6)]);
    let vertical = alive_cells(10, 10, &[(4, 5), (5, 5), (6, 5)]);
    let once = step(&horizontal, &Conway);
    let twice = step(&once, &Conway);
    results.push(TestResult {
        name: "blinker_period_two".into(),
        passed: once == vertical && twice == horizontal,
        detail: format!(
            "after 1 step: {} alive, after 2 steps: {} alive",
            once.population(),
            twice.population()
        ),
    });

    let block = alive_cells(6, 6, &[(2, 2), (2, 3), (3, 2), (3, 3)]);
    results.push(TestResult {
        name: "block_still_life".into(),
        passed: step(&block, &Conway) == block,
        detail: "2x2 block unchanged".into(),
    });

    let glider = alive_cells(12, 12, &[(1, 2), (2, 3), (3, 1), (3, 2), (3, 3)]);
    let moved = alive_cells(12, 12, &[(2, 3), (3, 4), (4, 2), (4, 3), (4, 4)]);
    let after_four = (0..4).fold(glider, |g, _| step(&g, &Conway));
    results.push(TestResult {
        name: "glider_translation".into(),
        passed: after_four == moved,
        detail: "glider moved one cell diagonally in 4 generations".into(),
    });

    let random = seed(40, 60, 0.3, &mut StdRng::seed_from_u64(3)).unwrap_or_else(|e| fatal(e));
    results.push(TestResult {
        name: "step_deterministic".into(),
        passed: step(&random, &Conway) == step(&random, &Conway),
        detail: format!("{} alive input stepped twice", random.population()),
    });

    if verbose {
        println!("  blinker, block, glider, determinism checked");
    }
    results
}

// ── 2. Hard Edges ───────────────────────────────────────────────────────

fn validate_edges(verbose: bool) -> Vec<TestResult> {
    println!("--- Hard Edges ---");
    let mut results = Vec::new();

    let full = Grid::new(3, 3, Cell::Alive).unwrap_or_else(|e| fatal(e));
    let corner = full.neighbor_alive_count(0, 0, Cell::is_alive);
    results.push(TestResult {
        name: "corner_neighbor_count".into(),
        passed: corner == 3,
        detail: format!("corner of full 3x3 sees {} neighbors", corner),
    });

    let right_edge = alive_cells(5, 5, &[(1, 4), (2, 4), (3, 4)]);
    let left = right_edge.neighbor_alive_count(2, 0, Cell::is_alive);
    results.push(TestResult {
        name: "no_wraparound".into(),
        passed: left == 0,
        detail: format!("left edge sees {} cells from the right edge", left),
    });

    if verbose {
        println!("  corner = {}, wrapped = {}", corner, left);
    }
    results
}

// ── 3. Trail Overlays ───────────────────────────────────────────────────

fn validate_overlays(verbose: bool) -> Vec<TestResult> {
    println!("--- Trail Overlays ---");
    let mut results = Vec::new();

    let start = seed(40, 60, 0.3, &mut StdRng::seed_from_u64(17)).unwrap_or_else(|e| fatal(e));
    let grids: Vec<Grid<Cell>> = std::iter::successors(Some(start), |g| Some(step(g, &Conway)))
        .take(9)
        .collect();

    // Aging map: alive → 0, otherwise +1 up to the max
    let mut aging = AgingMap::new(40, 60, tiles::LONG_DEAD).unwrap_or_else(|e| fatal(e));
    let mut violations = 0;
    for pair in grids.windows(2) {
        let before = aging.ages().clone();
        aging.observe(&pair[0], &pair[1]);
        let cells = before.iter().zip(aging.ages().iter()).zip(pair[1].iter());
        for ((old, new), cell) in cells {
            let expected = if cell.is_alive() {
                tiles::ALIVE
            } else {
                (old + 1).min(tiles::LONG_DEAD)
            };
            if new != expected {
                violations += 1;
            }
        }
    }
    results.push(TestResult {
        name: "aging_monotone".into(),
        passed: violations == 0,
        detail: format!("{} aging violations over {} generations", violations, grids.len() - 1),
    });

    // Snapshot ring: layer i is the grid i+1 generations ago
    let mut ring = SnapshotRing::new(40, 60, 5).unwrap_or_else(|e| fatal(e));
    for pair in grids.windows(2).take(3) {
        ring.observe(&pair[0], &pair[1]);
    }
    let ordered = ring
        .snapshots()
        .take(3)
        .enumerate()
        .all(|(i, layer)| layer == &grids[2 - i]);
    results.push(TestResult {
        name: "ring_ordering".into(),
        passed: ordered,
        detail: format!("{} layers after 3 generations", ring.layer_count()),
    });

    // Merged aging: fused step agrees with Conway on the binary projection
    let merged = grids[0].map(MergedCell::from_cell);
    let fused = step_merged(&merged, &Conway, tiles::LONG_DEAD);
    results.push(TestResult {
        name: "merged_projection".into(),
        passed: fused.map(MergedCell::cell) == grids[1],
        detail: "fused step matches the pure rule".into(),
    });

    if verbose {
        println!("  aging, ring, merged checked on a 40x60 soup");
    }
    results
}

// ── 4. Clock ────────────────────────────────────────────────────────────

fn validate_clock(verbose: bool) -> Vec<TestResult> {
    println!("--- Simulation Clock ---");
    let mut results = Vec::new();

    for preset in StepPreset::ALL {
        let mut clock = SimulationClock::new(preset.seconds());
        let frames = (10.0 * HOST_FPS) as usize;
        let fired = (0..frames)
            .filter(|_| clock.tick(1.0 / HOST_FPS) == ClockState::Ready)
            .count();
        // Surplus is dropped, so each step takes a whole number of frames;
        // float accumulation can cost one extra frame per step
        let exact = preset.seconds() * HOST_FPS;
        let fastest = (exact - 1e-6).ceil().max(1.0) as usize;
        let (low, high) = (frames / (fastest + 1), frames / fastest);
        results.push(TestResult {
            name: format!("clock_preset_{}", preset.selector()),
            passed: (low..=high).contains(&fired),
            detail: format!(
                "{:.2}s steps: {} generations in 10s at {} fps (expected {}..={})",
                preset.seconds(),
                fired,
                HOST_FPS,
                low,
                high
            ),
        });
    }

    let mut paused = SimulationClock::new(0.0);
    let fired = (0..100)
        .filter(|_| paused.tick(1.0) == ClockState::Ready)
        .count();
    results.push(TestResult {
        name: "clock_paused".into(),
        passed: fired == 0,
        detail: format!("{} firings while paused", fired),
    });

    if verbose {
        println!("  {} presets checked", StepPreset::ALL.len());
    }
    results
}

// ── 5. Seeding ──────────────────────────────────────────────────────────

fn validate_seed(verbose: bool) -> Vec<TestResult> {
    println!("--- Seeding ---");
    let mut results = Vec::new();

    let grid = seed(1000, 1000, 0.15, &mut StdRng::seed_from_u64(99)).unwrap_or_else(|e| fatal(e));
    let fraction = grid.population() as f64 / 1_000_000.0;
    results.push(TestResult {
        name: "seed_fraction".into(),
        passed: (fraction - 0.15).abs() < 0.005,
        detail: format!("alive fraction {:.4} at p=0.15", fraction),
    });

    if verbose {
        println!("  1000x1000 seeded");
    }
    results
}

// ── 6. Headless Run ─────────────────────────────────────────────────────

fn headless_run(options: &Options) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &options.config_path {
        Some(path) => SimConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => SimConfig::default(),
    };
    let mut engine = SimulationEngine::new(config)?;
    let population_start = engine.population();

    let frames = (options.seconds * HOST_FPS).round() as u64;
    for frame in 0..frames {
        if engine.advance(1.0 / HOST_FPS) {
            log::debug!("frame {}: generation {}", frame, engine.generation());
        }
    }

    let report = RunReport {
        config: engine.config().clone(),
        frames,
        generations: engine.generation(),
        population_start,
        population_end: engine.population(),
        final_grid: render_text(&engine),
    };

    if options.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "\n--- Headless Run: {} frames, {} generations, population {} → {} ---",
            report.frames, report.generations, report.population_start, report.population_end
        );
        for line in &report.final_grid {
            println!("  |{}|", line);
        }
    }
    Ok(())
}

/// Text frame: `#` for live cells, fading marks for the trail.
fn render_text(engine: &SimulationEngine) -> Vec<String> {
    const FADE: [char; 4] = ['o', '+', '-', '.'];
    let max_age = match engine.overlay_kind() {
        OverlayKind::Aging { max_age } | OverlayKind::Merged { max_age } => max_age,
        // Only the previous generation is drawn
        OverlayKind::Snapshots { .. } => tiles::DEAD + 1,
    };
    let trail = engine.current_history_layer(0);
    let grid = engine.current_primary_grid();

    (0..grid.height())
        .map(|row| {
            (0..grid.width())
                .map(|col| {
                    if grid.get(row, col) == Ok(Cell::Alive) {
                        return '#';
                    }
                    let age = match trail {
                        Some(LayerView::Snapshot(previous)) => {
                            if previous.get(row, col) == Ok(Cell::Alive) {
                                tiles::DEAD
                            } else {
                                max_age
                            }
                        }
                        Some(view) => view.tile(row, col).unwrap_or(max_age),
                        None => max_age,
                    };
                    if age == tiles::ALIVE || age >= max_age {
                        ' '
                    } else {
                        FADE[((age - tiles::DEAD) as usize).min(FADE.len() - 1)]
                    }
                })
                .collect()
        })
        .collect()
}

// ── Helpers ─────────────────────────────────────────────────────────────

fn alive_cells(width: usize, height: usize, alive: &[(usize, usize)]) -> Grid<Cell> {
    Grid::with_alive(width, height, alive).unwrap_or_else(|e| fatal(e))
}

fn fatal(e: impl std::fmt::Display) -> ! {
    eprintln!("harness setup failed: {}", e);
    std::process::exit(2)
}
