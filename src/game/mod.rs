//! Arena fighter simulation

pub mod arena;
pub mod bot;
pub mod direction;
pub mod fighter;
pub mod physics;
pub mod session;
pub mod snapshot;
pub mod stage;

pub use arena::ArenaBounds;
pub use direction::Direction;
pub use fighter::{Fighter, State};
pub use physics::{BoundsContact, FighterStats, PhysicsSystem};
pub use session::{ControlMsg, MatchHandle, MatchSession, MatchSummary};
pub use snapshot::{FighterSnapshot, SnapshotHistory, StageFrame};
pub use stage::Stage;
