//! Snapshot history and render interpolation

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::direction::Direction;
use super::fighter::State;

/// Render-relevant copy of a fighter taken at the end of a fixed tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FighterSnapshot {
    pub position: Vec2,
    pub velocity: Vec2,
    pub state: State,
    pub direction: Direction,
    pub is_grounded: bool,
    pub jumped: bool,
    pub jump_count: u32,
}

impl FighterSnapshot {
    /// Linear blend of positions; `fraction` is clamped to `[0, 1]`
    pub fn lerp_position(&self, next: &FighterSnapshot, fraction: f32) -> Vec2 {
        let t = fraction.clamp(0.0, 1.0);
        self.position + t * (next.position - self.position)
    }
}

/// Every fighter's snapshot for one tick, as broadcast by a match session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageFrame {
    pub tick: u64,
    pub time: f64,
    /// Indexed by fighter code
    pub fighters: Vec<FighterSnapshot>,
}

/// Append-only snapshot sequence for one fighter.
///
/// Bounded histories behave as a ring and evict the oldest entry; only the
/// latest two are needed for interpolation. Unbounded histories keep every
/// tick for replay.
#[derive(Debug, Clone)]
pub struct SnapshotHistory {
    entries: VecDeque<FighterSnapshot>,
    capacity: Option<usize>,
    recorded: u64,
}

impl SnapshotHistory {
    /// Keep the most recent `capacity` snapshots (at least 2)
    pub fn bounded(capacity: usize) -> Self {
        let capacity = capacity.max(2);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity: Some(capacity),
            recorded: 0,
        }
    }

    pub fn unbounded() -> Self {
        Self {
            entries: VecDeque::new(),
            capacity: None,
            recorded: 0,
        }
    }

    /// `0` selects an unbounded history
    pub fn with_capacity(capacity: usize) -> Self {
        if capacity == 0 {
            Self::unbounded()
        } else {
            Self::bounded(capacity)
        }
    }

    pub fn push(&mut self, snapshot: FighterSnapshot) {
        if let Some(capacity) = self.capacity {
            while self.entries.len() >= capacity {
                self.entries.pop_front();
            }
        }
        self.entries.push_back(snapshot);
        self.recorded += 1;
    }

    /// Snapshots currently retained
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Snapshots ever pushed, including evicted ones
    pub fn recorded(&self) -> u64 {
        self.recorded
    }

    pub fn latest(&self) -> Option<&FighterSnapshot> {
        self.entries.back()
    }

    pub fn previous(&self) -> Option<&FighterSnapshot> {
        self.entries.len().checked_sub(2).and_then(|i| self.entries.get(i))
    }

    pub fn iter(&self) -> impl Iterator<Item = &FighterSnapshot> {
        self.entries.iter()
    }

    /// Position between the last two snapshots, `None` until two exist
    pub fn interpolate(&self, fraction: f32) -> Option<Vec2> {
        let prev = self.previous()?;
        let latest = self.latest()?;
        Some(prev.lerp_position(latest, fraction))
    }
}

impl Default for SnapshotHistory {
    fn default() -> Self {
        Self::bounded(2)
    }
}
