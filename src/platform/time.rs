//! Fixed-rate tick pacing
//!
//! Turns variable frame times into a whole number of fixed ticks. Leftover
//! time carries over to the next frame.

use crate::consts::MAX_SUBSTEPS;

/// Longest frame delta accepted (seconds); longer gaps are treated as this
const MAX_FRAME_DT: f64 = 0.1;

/// Fixed timestep accumulator
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    step: f64,
    accumulator: f64,
    max_substeps: u32,
}

impl FixedTimestep {
    /// Accumulator for ticks `step` seconds long
    pub fn new(step: f64) -> Self {
        Self {
            step,
            accumulator: 0.0,
            max_substeps: MAX_SUBSTEPS,
        }
    }

    /// Seconds per tick
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Feed elapsed frame time and return how many ticks to run now
    pub fn advance(&mut self, frame_dt: f64) -> u32 {
        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);

        let mut ticks = 0;
        while self.accumulator >= self.step && ticks < self.max_substeps {
            self.accumulator -= self.step;
            ticks += 1;
        }
        // Drop the backlog instead of spiralling
        if ticks == self.max_substeps {
            self.accumulator = self.accumulator.min(self.step);
        }
        ticks
    }

    /// Fraction of a tick already accumulated (0.0 - 1.0)
    pub fn remainder(&self) -> f64 {
        (self.accumulator / self.step).clamp(0.0, 1.0)
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    #[test]
    fn test_one_tick_per_step() {
        let mut timestep = FixedTimestep::new(1.0 / 60.0);
        assert_eq!(timestep.advance(1.0 / 60.0 + 1e-9), 1);
        assert_eq!(timestep.advance(1.0 / 60.0), 1);
    }

    #[test]
    fn test_short_frames_accumulate() {
        let mut timestep = FixedTimestep::new(1.0 / 60.0);
        assert_eq!(timestep.advance(0.01), 0);
        assert!(timestep.remainder() > 0.5);
        assert_eq!(timestep.advance(0.01), 1);
    }

    #[test]
    fn test_long_frame_is_capped() {
        let mut timestep = FixedTimestep::new(1.0 / 45.0);
        // Clamped to 0.1 s, which holds 4.5 ticks at 45 Hz
        assert_eq!(timestep.advance(5.0), 4);

        let mut fast = FixedTimestep::new(0.001);
        assert_eq!(fast.advance(0.1), MAX_SUBSTEPS);
        assert!(fast.remainder() <= 1.0);
    }

    #[test]
    fn test_negative_delta_ignored() {
        let mut timestep = FixedTimestep::new(1.0 / 60.0);
        assert_eq!(timestep.advance(-1.0), 0);
        assert_eq!(timestep.remainder(), 0.0);
    }

    #[test]
    fn test_step_follows_config_tick_rate() {
        let config = GameConfig {
            tick_rate: 120,
            ..Default::default()
        };
        let mut timestep = FixedTimestep::new(config.tick_seconds());
        assert!((timestep.step() - 1.0 / 120.0).abs() < 1e-12);
        // 0.05 s holds six 120 Hz ticks
        assert_eq!(timestep.advance(0.05 + 1e-9), 6);
    }

    #[test]
    fn test_reset() {
        let mut timestep = FixedTimestep::new(1.0 / 60.0);
        timestep.advance(0.015);
        timestep.reset();
        assert_eq!(timestep.remainder(), 0.0);
    }
}
