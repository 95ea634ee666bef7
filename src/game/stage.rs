//! Stage: owns the fighters and drives the fixed tick

use glam::Vec2;
use tracing::{debug, trace};

use crate::error::StageError;
use crate::util::time::FixedClock;

use super::arena::ArenaBounds;
use super::direction::Direction;
use super::fighter::Fighter;
use super::physics::{FighterStats, PhysicsSystem};
use super::snapshot::{SnapshotHistory, StageFrame};

/// The arena simulation. Fighters only collide with the arena bounds, never
/// with each other.
#[derive(Debug, Clone)]
pub struct Stage {
    fighters: Vec<Fighter>,
    /// One history per fighter, indexed by code
    histories: Vec<SnapshotHistory>,
    bounds: ArenaBounds,
    gravity: Vec2,
    stats: FighterStats,
    clock: FixedClock,
}

impl Stage {
    /// Create a stage with `fighter_count` idle fighters spread across the
    /// arena at mid height
    pub fn new(fighter_count: usize, bounds: ArenaBounds, tick_rate: u32) -> Result<Self, StageError> {
        let clock = FixedClock::new(tick_rate)?;

        let spacing = bounds.width() / (fighter_count + 1) as f32;
        let fighters = (0..fighter_count)
            .map(|code| {
                let mut fighter = Fighter::new(code);
                fighter.position = Vec2::new(
                    bounds.left() + spacing * (code + 1) as f32,
                    bounds.center().y,
                );
                fighter
            })
            .collect();

        Ok(Self {
            fighters,
            histories: vec![SnapshotHistory::default(); fighter_count],
            bounds,
            gravity: Vec2::NEG_Y,
            stats: FighterStats::default(),
            clock,
        })
    }

    /// Replace every history with one keeping `capacity` snapshots
    /// (`0` keeps all of them)
    pub fn with_history(mut self, capacity: usize) -> Self {
        self.histories = vec![SnapshotHistory::with_capacity(capacity); self.fighters.len()];
        self
    }

    pub fn with_stats(mut self, stats: FighterStats) -> Self {
        self.stats = stats;
        self
    }

    pub fn fighters(&self) -> &[Fighter] {
        &self.fighters
    }

    pub fn fighter(&self, code: usize) -> Result<&Fighter, StageError> {
        self.fighters.get(code).ok_or(StageError::UnknownFighter(code))
    }

    /// Direct access for kinematic drivers and spawn placement
    pub fn fighter_mut(&mut self, code: usize) -> Result<&mut Fighter, StageError> {
        self.fighters
            .get_mut(code)
            .ok_or(StageError::UnknownFighter(code))
    }

    pub fn history(&self, code: usize) -> Result<&SnapshotHistory, StageError> {
        self.histories.get(code).ok_or(StageError::UnknownFighter(code))
    }

    pub fn bounds(&self) -> &ArenaBounds {
        &self.bounds
    }

    pub fn gravity(&self) -> Vec2 {
        self.gravity
    }

    pub fn stats(&self) -> &FighterStats {
        &self.stats
    }

    pub fn clock(&self) -> &FixedClock {
        &self.clock
    }

    // Input writers. These run between ticks and are consumed by the next one.

    pub fn set_direction(&mut self, code: usize, direction: Direction) -> Result<(), StageError> {
        self.fighter_mut(code)?.direction = direction;
        Ok(())
    }

    /// Set the held direction from a continuous axis pair
    pub fn set_axes(&mut self, code: usize, h: f32, v: f32) -> Result<(), StageError> {
        self.set_direction(code, Direction::get(h, v))
    }

    /// Request a jump, stamped with the current simulation time
    pub fn press_jump(&mut self, code: usize) -> Result<(), StageError> {
        let now = self.clock.time();
        let fighter = self.fighter_mut(code)?;
        fighter.jumped = true;
        fighter.jump_time = now;
        Ok(())
    }

    pub fn release_jump(&mut self, code: usize) -> Result<(), StageError> {
        self.fighter_mut(code)?.jumped = false;
        Ok(())
    }

    /// Advance every fighter by one fixed tick and record a snapshot of each
    pub fn process(&mut self) {
        self.clock.tick();
        trace!(tick = self.clock.tick_count(), "Stage tick");

        // Histories pair with fighters by position, not by the editable `code`
        for (fighter, history) in self.fighters.iter_mut().zip(self.histories.iter_mut()) {
            Self::process_fighter(fighter, &self.bounds, self.gravity, &self.stats, &self.clock);
            history.push(fighter.snapshot());
        }
    }

    fn process_fighter(
        fighter: &mut Fighter,
        bounds: &ArenaBounds,
        gravity: Vec2,
        stats: &FighterStats,
        clock: &FixedClock,
    ) {
        let dt = clock.delta_time() as f32;

        // Kinematic fighters keep whatever velocity their driver gave them
        if fighter.is_dynamic() {
            PhysicsSystem::integrate_forces(fighter, gravity, stats, dt);
        }

        let contact = PhysicsSystem::resolve_bounds(fighter, bounds);

        let since_jump_request = clock.time_since(fighter.jump_time);
        if PhysicsSystem::should_jump(fighter, contact.grounded, since_jump_request, stats) {
            fighter.velocity.y += stats.jump_speed;
            fighter.jump_count += 1;
            debug!(code = fighter.code, jump_count = fighter.jump_count, "Fighter jumped");
        } else if contact.grounded {
            fighter.jump_count = 0;
        }
        fighter.jumped = false;

        if fighter.is_grounded && !contact.grounded {
            fighter.ground_time = clock.time();
            debug!(code = fighter.code, time = fighter.ground_time, "Fighter left the ground");
        } else if !fighter.is_grounded && contact.grounded {
            debug!(code = fighter.code, x = fighter.position.x, "Fighter landed");
        }
        if contact.on_wall && !fighter.on_wall {
            trace!(code = fighter.code, y = fighter.position.y, "Fighter hit a wall");
        }
        fighter.is_grounded = contact.grounded;
        fighter.on_wall = contact.on_wall;

        // TODO: assign Idle/Moving/Jumping/Falling from the contact and velocity once state transitions are designed

        fighter.position += fighter.velocity * dt;
    }

    /// Run the fixed ticks that `frame_dt` seconds of wall time make due.
    /// Returns the number of ticks run.
    pub fn advance(&mut self, frame_dt: f64) -> u32 {
        let due = self.clock.accumulate(frame_dt);
        for _ in 0..due {
            self.process();
        }
        due
    }

    /// Fraction of a fixed step elapsed since the last tick
    pub fn render_fraction(&self) -> f32 {
        self.clock.fraction() as f32
    }

    /// Render position blended between the last two snapshots.
    /// `None` until the fighter has two snapshots.
    pub fn interpolated_position(&self, code: usize, fraction: f32) -> Result<Option<Vec2>, StageError> {
        Ok(self.history(code)?.interpolate(fraction))
    }

    /// Latest snapshot of every fighter
    pub fn frame(&self) -> StageFrame {
        StageFrame {
            tick: self.clock.tick_count(),
            time: self.clock.time(),
            fighters: self.fighters.iter().map(Fighter::snapshot).collect(),
        }
    }
}
