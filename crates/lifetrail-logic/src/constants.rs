//! Simulation constants: world size, seeding odds, tile indices, presets.
//!
//! These are plain constants with no engine dependency. The core engine,
//! the harness, and any renderer read the same values from here.

/// Default world dimensions.
pub mod world {
    pub const COLS: usize = 40;
    pub const ROWS: usize = 60;
    /// Chance that a cell starts alive after a reset.
    pub const FIRST_GEN_ALIVE: f64 = 0.15;
}

/// Tile indices a renderer uses to pick a sprite.
///
/// Primary cells pack to `ALIVE`/`DEAD`. Trail cells run from `ALIVE`
/// (alive this generation) up to `LONG_DEAD` (blank).
pub mod tiles {
    pub const ALIVE: u8 = 0;
    pub const DEAD: u8 = 1;
    pub const LONG_DEAD: u8 = 5;
}

/// Step durations in seconds, one per selector key.
pub mod step_durations {
    pub const ONE_SECOND: f64 = 1.0;
    pub const HALF: f64 = 0.5;
    pub const QUARTER: f64 = 0.25;
    pub const TENTH: f64 = 0.1;
    pub const TWENTIETH: f64 = 0.05;
    /// Duration in effect before any selector is pressed.
    pub const DEFAULT: f64 = TENTH;
}

/// Conway neighbor thresholds.
pub mod conway {
    pub const BIRTH: u8 = 3;
    pub const SURVIVE_LOW: u8 = 2;
    pub const SURVIVE_HIGH: u8 = 3;
}
