//! Punch Arena - deterministic fighter physics for a 2D arena
//!
//! The simulation core is [`game::Stage`]: it owns every fighter, advances
//! them one fixed tick at a time (gravity, drag, friction, jumping) and
//! resolves collisions against the arena bounds. A render step reads the
//! last two snapshots per fighter and interpolates between them.

pub mod config;
pub mod error;
pub mod game;
pub mod util;

pub use error::StageError;
