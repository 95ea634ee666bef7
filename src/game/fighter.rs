//! Fighter simulation state

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::direction::Direction;
use super::snapshot::FighterSnapshot;

/// Discrete fighter state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum State {
    /// No inputs
    #[default]
    Idle,
    /// A direction is held
    Moving,
    /// Dash button held, barely controllable
    Dashing,
    /// Jump button held while rising
    Jumping,
    /// Airborne, controllable
    Falling,
    /// Caught by a grab; the attacker drives motion
    Grabbed,
    /// Light attack; the attack drives motion
    Light,
    /// Heavy attack; the attack drives motion
    Heavy,
    /// Grabbing; the grab drives motion
    Grab,
    /// Parrying; the parry drives motion
    Parry,
    /// Recovering from a hit or an attack, limited control
    Recovering,
}

impl State {
    /// Physically integrated by the stage
    pub fn is_dynamic(self) -> bool {
        matches!(
            self,
            State::Idle | State::Moving | State::Jumping | State::Falling
        )
    }

    /// Motion driven from outside the integrator
    pub fn is_kinematic(self) -> bool {
        !self.is_dynamic()
    }
}

/// Per-fighter mutable state. Owned by the [`Stage`](super::Stage) and
/// addressed by `code`.
#[derive(Debug, Clone, PartialEq)]
pub struct Fighter {
    pub code: usize,
    pub position: Vec2,
    pub velocity: Vec2,
    pub state: State,
    pub direction: Direction,
    pub is_grounded: bool,
    pub on_wall: bool,
    /// Jump requested this tick. Cleared by every tick that reads it.
    pub jumped: bool,
    pub jump_count: u32,
    /// Simulation time of the last jump request. Starts at negative infinity
    /// so a fighter placed on the floor never jumps before any request.
    pub jump_time: f64,
    /// Simulation time the fighter last left the ground
    pub ground_time: f64,
}

impl Fighter {
    pub fn new(code: usize) -> Self {
        Self {
            code,
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            state: State::Idle,
            direction: Direction::None,
            is_grounded: false,
            on_wall: false,
            jumped: false,
            jump_count: 0,
            jump_time: f64::NEG_INFINITY,
            ground_time: 0.0,
        }
    }

    pub fn can_jump(&self) -> bool {
        matches!(self.state, State::Idle | State::Moving)
    }

    pub fn is_dynamic(&self) -> bool {
        self.state.is_dynamic()
    }

    pub fn is_kinematic(&self) -> bool {
        self.state.is_kinematic()
    }

    pub fn snapshot(&self) -> FighterSnapshot {
        FighterSnapshot {
            position: self.position,
            velocity: self.velocity,
            state: self.state,
            direction: self.direction,
            is_grounded: self.is_grounded,
            jumped: self.jumped,
            jump_count: self.jump_count,
        }
    }
}
