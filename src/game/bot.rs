//! Seeded random input for headless matches

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::session::ControlMsg;

/// Chance per tick that a bot changes its stick position
const STEER_CHANCE: f64 = 0.05;
/// Chance per tick that a bot presses jump
const JUMP_CHANCE: f64 = 0.02;

/// Drives every fighter with reproducible pseudo-random inputs
pub struct BotInput {
    rng: ChaCha8Rng,
    fighter_count: usize,
    /// Fighters whose jump button is currently held
    holding_jump: Vec<bool>,
}

impl BotInput {
    pub fn new(seed: u64, fighter_count: usize) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            fighter_count,
            holding_jump: vec![false; fighter_count],
        }
    }

    /// Control messages for the next tick
    pub fn next_commands(&mut self) -> Vec<ControlMsg> {
        let mut commands = Vec::new();

        for code in 0..self.fighter_count {
            if self.rng.gen_bool(STEER_CHANCE) {
                // Digital-style stick: each axis snaps to -1, 0 or 1
                let h = self.rng.gen_range(-1..=1) as f32;
                let v = self.rng.gen_range(-1..=1) as f32;
                commands.push(ControlMsg::Axes { code, h, v });
            }

            if self.holding_jump[code] {
                self.holding_jump[code] = false;
                commands.push(ControlMsg::JumpReleased { code });
            } else if self.rng.gen_bool(JUMP_CHANCE) {
                self.holding_jump[code] = true;
                commands.push(ControlMsg::JumpPressed { code });
            }
        }

        commands
    }
}
