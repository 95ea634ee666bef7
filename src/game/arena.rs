//! Arena bounds and fighter hitbox dimensions

use glam::Vec2;

use crate::error::StageError;

/// Fighter hitbox width
pub const FIGHTER_WIDTH: f32 = 60.0;
/// Fighter hitbox height
pub const FIGHTER_HEIGHT: f32 = 80.0;
pub const FIGHTER_SIZE: Vec2 = Vec2::new(FIGHTER_WIDTH, FIGHTER_HEIGHT);
pub const FIGHTER_HALF_SIZE: Vec2 = Vec2::new(FIGHTER_WIDTH / 2.0, FIGHTER_HEIGHT / 2.0);

/// Smallest room a fighter must have to move along each axis
pub const MIN_FREE_SPAN: f32 = 1.0;

/// Axis-aligned arena rectangle, y pointing up. Immutable once validated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArenaBounds {
    center: Vec2,
    size: Vec2,
}

impl ArenaBounds {
    /// Build bounds from a center point and extents. Rejects extents that
    /// leave no room for a fighter to move.
    pub fn new(center: Vec2, width: f32, height: f32) -> Result<Self, StageError> {
        let fits = |extent: f32, fighter: f32| extent.is_finite() && extent - fighter >= MIN_FREE_SPAN;
        if !center.is_finite() || !fits(width, FIGHTER_WIDTH) || !fits(height, FIGHTER_HEIGHT) {
            return Err(StageError::InvalidBounds { width, height });
        }
        Ok(Self {
            center,
            size: Vec2::new(width, height),
        })
    }

    /// Bounds with the bottom-left corner at the origin, like a window rect
    pub fn from_size(width: f32, height: f32) -> Result<Self, StageError> {
        Self::new(Vec2::new(width / 2.0, height / 2.0), width, height)
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn width(&self) -> f32 {
        self.size.x
    }

    pub fn height(&self) -> f32 {
        self.size.y
    }

    pub fn left(&self) -> f32 {
        self.center.x - self.size.x / 2.0
    }

    pub fn right(&self) -> f32 {
        self.center.x + self.size.x / 2.0
    }

    pub fn bottom(&self) -> f32 {
        self.center.y - self.size.y / 2.0
    }

    pub fn top(&self) -> f32 {
        self.center.y + self.size.y / 2.0
    }

    /// Half of the span a fighter's center can travel along each axis
    pub fn half_free_span(&self) -> Vec2 {
        (self.size - FIGHTER_SIZE) / 2.0
    }

    /// True when a fighter centered at `position` comes within `slop` of any
    /// edge or crosses it
    pub fn touches_edge(&self, position: Vec2, slop: f32) -> bool {
        let min = position - FIGHTER_HALF_SIZE;
        let max = position + FIGHTER_HALF_SIZE;
        max.x + slop >= self.right()
            || min.x - slop <= self.left()
            || max.y + slop >= self.top()
            || min.y - slop <= self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_from_size() {
        let bounds = ArenaBounds::from_size(1280.0, 720.0).unwrap();
        assert_eq!(bounds.left(), 0.0);
        assert_eq!(bounds.right(), 1280.0);
        assert_eq!(bounds.bottom(), 0.0);
        assert_eq!(bounds.top(), 720.0);
        assert_eq!(bounds.half_free_span(), Vec2::new(610.0, 320.0));
    }

    #[test]
    fn degenerate_bounds_rejected() {
        assert!(ArenaBounds::from_size(60.0, 720.0).is_err());
        assert!(ArenaBounds::from_size(1280.0, 80.0).is_err());
        assert!(ArenaBounds::from_size(30.0, 30.0).is_err());
        assert!(ArenaBounds::from_size(-100.0, 720.0).is_err());
        assert!(ArenaBounds::from_size(f32::INFINITY, 720.0).is_err());
        assert!(ArenaBounds::from_size(f32::NAN, 720.0).is_err());
        assert!(ArenaBounds::new(Vec2::new(f32::NAN, 0.0), 200.0, 200.0).is_err());
    }

    #[test]
    fn smallest_valid_bounds_accepted() {
        assert!(ArenaBounds::from_size(61.0, 81.0).is_ok());
        assert!(ArenaBounds::from_size(60.5, 81.0).is_err());
    }

    #[test]
    fn touching_counts_as_contact() {
        let bounds = ArenaBounds::from_size(1280.0, 720.0).unwrap();
        assert!(!bounds.touches_edge(Vec2::new(640.0, 360.0), 0.0));
        assert!(bounds.touches_edge(Vec2::new(640.0, 40.0), 0.0));
        assert!(bounds.touches_edge(Vec2::new(1250.0, 360.0), 0.0));
        assert!(bounds.touches_edge(Vec2::new(640.0, -10.0), 0.0));
        assert!(!bounds.touches_edge(Vec2::new(640.0, 40.5), 0.0));
        assert!(bounds.touches_edge(Vec2::new(640.0, 40.5), 1.0));
    }
}
