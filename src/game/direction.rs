//! Eight-way compass direction derived from a continuous input pair

use serde::{Deserialize, Serialize};

/// Held input direction. `None` means no direction is held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    None,
    Up,
    Down,
    Left,
    Right,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl Direction {
    pub const ALL: [Direction; 9] = [
        Direction::None,
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
        Direction::UpLeft,
        Direction::UpRight,
        Direction::DownLeft,
        Direction::DownRight,
    ];

    /// Horizontal component: -1 (left), 0 or 1 (right)
    pub fn horizontal(self) -> f32 {
        match self {
            Direction::Right | Direction::UpRight | Direction::DownRight => 1.0,
            Direction::Left | Direction::UpLeft | Direction::DownLeft => -1.0,
            Direction::None | Direction::Up | Direction::Down => 0.0,
        }
    }

    /// Vertical component: -1 (down), 0 or 1 (up)
    pub fn vertical(self) -> f32 {
        match self {
            Direction::Up | Direction::UpLeft | Direction::UpRight => 1.0,
            Direction::Down | Direction::DownLeft | Direction::DownRight => -1.0,
            Direction::None | Direction::Left | Direction::Right => 0.0,
        }
    }

    /// Classify an axis pair by the signs of its components.
    /// NaN components count as zero.
    pub fn get(h: f32, v: f32) -> Direction {
        use std::cmp::Ordering::*;

        let sign = |x: f32| x.partial_cmp(&0.0).unwrap_or(Equal);
        match (sign(h), sign(v)) {
            (Equal, Equal) => Direction::None,
            (Equal, Greater) => Direction::Up,
            (Equal, Less) => Direction::Down,
            (Less, Equal) => Direction::Left,
            (Greater, Equal) => Direction::Right,
            (Less, Greater) => Direction::UpLeft,
            (Greater, Greater) => Direction::UpRight,
            (Less, Less) => Direction::DownLeft,
            (Greater, Less) => Direction::DownRight,
        }
    }
}
