//! Time utilities for the fixed-timestep simulation

use std::time::Duration;

use crate::error::StageError;

/// Tick rate configuration
pub const SIMULATION_TPS: u32 = 60; // 60 fixed ticks per second
pub const RENDER_FPS: u32 = 144;

/// Most fixed ticks a single host frame may run before the backlog is dropped
pub const MAX_TICKS_PER_FRAME: u32 = 5;

/// Duration of one fixed tick at the given rate
pub fn tick_duration(tick_rate: u32) -> Duration {
    Duration::from_micros(1_000_000 / tick_rate.max(1) as u64)
}

/// Monotonic simulation clock advanced once per fixed tick.
///
/// `time` only moves in whole `delta_time` steps. Wall time reported by the
/// host is collected in the accumulator, which also yields the render
/// interpolation fraction.
#[derive(Debug, Clone)]
pub struct FixedClock {
    delta_time: f64,
    time: f64,
    tick: u64,
    accumulator: f64,
}

impl FixedClock {
    pub fn new(tick_rate: u32) -> Result<Self, StageError> {
        if tick_rate == 0 {
            return Err(StageError::InvalidTickRate(tick_rate));
        }
        Ok(Self {
            delta_time: 1.0 / tick_rate as f64,
            time: 0.0,
            tick: 0,
            accumulator: 0.0,
        })
    }

    /// Fixed delta time in seconds
    pub fn delta_time(&self) -> f64 {
        self.delta_time
    }

    /// Simulation time of the latest fixed tick
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Number of fixed ticks run so far
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    /// Seconds of simulation time elapsed since `timestamp`
    pub fn time_since(&self, timestamp: f64) -> f64 {
        self.time - timestamp
    }

    /// Advance by exactly one fixed step
    pub fn tick(&mut self) {
        self.tick += 1;
        self.time = self.tick as f64 * self.delta_time;
    }

    /// Feed elapsed wall time and return how many fixed ticks are now due.
    /// Each due tick is removed from the accumulator.
    pub fn accumulate(&mut self, frame_dt: f64) -> u32 {
        self.accumulator += frame_dt.max(0.0);

        let mut due = 0;
        while self.accumulator >= self.delta_time {
            self.accumulator -= self.delta_time;
            due += 1;
            if due == MAX_TICKS_PER_FRAME {
                // Spiral of death guard: forget the rest of the backlog
                self.accumulator = self.accumulator.min(self.delta_time * 0.5);
                break;
            }
        }
        due
    }

    /// Progress through the current fixed step, in `[0, 1)`
    pub fn fraction(&self) -> f64 {
        (self.accumulator / self.delta_time).clamp(0.0, 1.0 - f64::EPSILON)
    }
}
