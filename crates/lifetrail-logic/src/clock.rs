//! Simulation clock: decides once per host tick whether a generation is due.
//!
//! The clock accumulates host frame time. When the accumulated time reaches
//! the interval scheduled at the previous firing, it reports `Ready` and
//! starts counting from zero again; any surplus is dropped, so the next
//! boundary is always "fire time + duration".
//!
//! Changing the step duration does not move the pending boundary: the new
//! duration is scheduled the next time the clock fires. A duration of zero
//! or less pauses the clock.
//!
//! # Usage
//!
//! ```
//! use lifetrail_logic::clock::{ClockState, SimulationClock, StepPreset};
//!
//! let mut clock = SimulationClock::new(StepPreset::Half.seconds());
//! assert_eq!(clock.tick(0.3), ClockState::Idle);
//! assert_eq!(clock.tick(0.3), ClockState::Ready);
//! ```

use serde::{Deserialize, Serialize};

use crate::constants::step_durations;
use crate::error::ConfigError;

/// Operator-selectable step duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StepPreset {
    OneSecond,
    Half,
    Quarter,
    Tenth,
    Twentieth,
}

impl StepPreset {
    /// Presets in selector order (`'1'` through `'5'`).
    pub const ALL: [StepPreset; 5] = [
        StepPreset::OneSecond,
        StepPreset::Half,
        StepPreset::Quarter,
        StepPreset::Tenth,
        StepPreset::Twentieth,
    ];

    pub fn seconds(self) -> f64 {
        match self {
            StepPreset::OneSecond => step_durations::ONE_SECOND,
            StepPreset::Half => step_durations::HALF,
            StepPreset::Quarter => step_durations::QUARTER,
            StepPreset::Tenth => step_durations::TENTH,
            StepPreset::Twentieth => step_durations::TWENTIETH,
        }
    }

    /// Preset bound to a selector key, `'1'..='5'`.
    pub fn from_selector(key: char) -> Option<Self> {
        let index = key.to_digit(10)?.checked_sub(1)?;
        Self::ALL.get(index as usize).copied()
    }

    pub fn selector(self) -> char {
        match self {
            StepPreset::OneSecond => '1',
            StepPreset::Half => '2',
            StepPreset::Quarter => '3',
            StepPreset::Tenth => '4',
            StepPreset::Twentieth => '5',
        }
    }
}

/// Outcome of one clock tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockState {
    /// Waiting for the next boundary.
    Idle,
    /// A boundary was reached; advance exactly one generation.
    Ready,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationClock {
    /// Selected duration; applied at the next firing.
    step_duration: f64,
    /// Interval scheduled at the last firing.
    interval: f64,
    /// Time since the last firing.
    elapsed: f64,
}

impl SimulationClock {
    pub fn new(step_duration: f64) -> Self {
        Self {
            step_duration,
            interval: step_duration,
            elapsed: 0.0,
        }
    }

    /// Accumulate `elapsed_seconds` of host time and report whether a
    /// generation is due.
    pub fn tick(&mut self, elapsed_seconds: f64) -> ClockState {
        // NaN and negative frame times count as zero
        self.elapsed += elapsed_seconds.max(0.0);
        if self.step_duration > 0.0 && self.elapsed >= self.interval {
            self.elapsed = 0.0;
            self.interval = self.step_duration;
            ClockState::Ready
        } else {
            ClockState::Idle
        }
    }

    /// Select a new step duration. Zero or negative pauses the clock.
    pub fn set_step_duration(&mut self, seconds: f64) -> Result<(), ConfigError> {
        if !seconds.is_finite() {
            return Err(ConfigError::InvalidStepDuration(seconds));
        }
        self.step_duration = seconds;
        Ok(())
    }

    pub fn select_preset(&mut self, preset: StepPreset) {
        self.step_duration = preset.seconds();
    }

    pub fn pause(&mut self) {
        self.step_duration = 0.0;
    }

    pub fn is_paused(&self) -> bool {
        self.step_duration <= 0.0
    }

    pub fn step_duration(&self) -> f64 {
        self.step_duration
    }

    /// Time accumulated since the last firing.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new(step_durations::DEFAULT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tick `clock` `frames` times at `dt` and count firings.
    fn run(clock: &mut SimulationClock, frames: usize, dt: f64) -> usize {
        (0..frames)
            .filter(|_| clock.tick(dt) == ClockState::Ready)
            .count()
    }

    #[test]
    fn test_presets() {
        let seconds: Vec<f64> = StepPreset::ALL.iter().map(|p| p.seconds()).collect();
        assert_eq!(seconds, vec![1.0, 0.5, 0.25, 0.1, 0.05]);
        for preset in StepPreset::ALL {
            assert_eq!(StepPreset::from_selector(preset.selector()), Some(preset));
        }
        assert_eq!(StepPreset::from_selector('0'), None);
        assert_eq!(StepPreset::from_selector('6'), None);
        assert_eq!(StepPreset::from_selector('x'), None);
    }

    #[test]
    fn test_fires_on_boundary() {
        let mut clock = SimulationClock::new(0.5);
        assert_eq!(clock.tick(0.25), ClockState::Idle);
        assert_eq!(clock.tick(0.25), ClockState::Ready);
        assert_eq!(clock.elapsed(), 0.0);
    }

    #[test]
    fn test_surplus_is_dropped() {
        let mut clock = SimulationClock::new(1.0);
        // 1.9s overshoots the first boundary; the remainder does not carry
        assert_eq!(clock.tick(1.9), ClockState::Ready);
        assert_eq!(clock.tick(0.5), ClockState::Idle);
        assert_eq!(clock.tick(0.5), ClockState::Ready);
    }

    #[test]
    fn test_at_most_one_firing_per_tick() {
        let mut clock = SimulationClock::new(0.05);
        assert_eq!(run(&mut clock, 1, 10.0), 1);
    }

    #[test]
    fn test_cadence_at_32fps() {
        let mut clock = SimulationClock::new(0.25);
        // 0.25s at 1/32s frames is exactly 8 frames
        assert_eq!(run(&mut clock, 64, 1.0 / 32.0), 8);
    }

    #[test]
    fn test_zero_duration_never_fires() {
        let mut clock = SimulationClock::new(0.0);
        assert!(clock.is_paused());
        assert_eq!(run(&mut clock, 100, 1.0), 0);

        let mut clock = SimulationClock::new(0.1);
        clock.set_step_duration(-1.0).unwrap();
        assert_eq!(run(&mut clock, 100, 1.0), 0);
    }

    #[test]
    fn test_pause_then_resume_fires_immediately() {
        let mut clock = SimulationClock::new(1.0);
        clock.pause();
        assert_eq!(run(&mut clock, 3, 1.0), 0);
        clock.select_preset(StepPreset::OneSecond);
        assert_eq!(clock.tick(0.0), ClockState::Ready);
    }

    #[test]
    fn test_change_not_retroactive() {
        let mut clock = SimulationClock::new(1.0);
        assert_eq!(clock.tick(0.25), ClockState::Idle);
        clock.select_preset(StepPreset::Twentieth);
        // Pending boundary is still 1s away from the last firing
        assert_eq!(clock.tick(0.25), ClockState::Idle);
        assert_eq!(clock.tick(0.5), ClockState::Ready);
        // New cadence applies from here on
        assert_eq!(clock.tick(0.05), ClockState::Ready);
    }

    #[test]
    fn test_rejects_non_finite_duration() {
        let mut clock = SimulationClock::default();
        assert_eq!(
            clock.set_step_duration(f64::INFINITY),
            Err(ConfigError::InvalidStepDuration(f64::INFINITY))
        );
        assert!(clock.set_step_duration(f64::NAN).is_err());
        assert_eq!(clock.step_duration(), 0.1);
    }

    #[test]
    fn test_negative_frame_time_ignored() {
        let mut clock = SimulationClock::new(0.5);
        assert_eq!(clock.tick(-3.0), ClockState::Idle);
        assert_eq!(clock.elapsed(), 0.0);
    }
}
