//! Simulation errors

/// Errors raised when building or driving a [`Stage`](crate::game::Stage)
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StageError {
    #[error("Arena bounds {width}x{height} must be finite and larger than a fighter (60x80)")]
    InvalidBounds { width: f32, height: f32 },

    #[error("No fighter with code {0} on this stage")]
    UnknownFighter(usize),

    #[error("Tick rate must be at least 1 tick per second, got {0}")]
    InvalidTickRate(u32),
}
