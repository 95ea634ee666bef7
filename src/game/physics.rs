//! Fighter physics: force integration and arena bounds resolution

use glam::Vec2;

use super::arena::ArenaBounds;
use super::fighter::{Fighter, State};

/// Bounds contact tolerance in world units. A fighter within this distance
/// of an edge counts as touching it.
pub const CONTACT_SLOP: f32 = 1e-3;

/// Fighter movement tuning. Fighters are treated as unit mass, so every
/// value is an acceleration or a dimensionless coefficient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FighterStats {
    /// Horizontal acceleration while grounded
    pub ground_speed: f32,
    /// Horizontal acceleration while airborne
    pub air_speed: f32,
    /// Upward velocity impulse of a jump
    pub jump_speed: f32,
    /// Gravity while falling
    pub jump_fall: f32,
    /// Gravity while rising without holding jump
    pub jump_release: f32,
    /// Gravity while rising and holding jump
    pub jump_hold: f32,
    /// Quadratic air drag coefficient
    pub drag: f32,
    /// Friction while moving in the held direction
    pub friction_hold: f32,
    /// Friction otherwise
    pub friction_release: f32,
    /// Window in seconds after a jump request during which landing still jumps
    pub coyote_time: f64,
}

impl Default for FighterStats {
    fn default() -> Self {
        Self {
            ground_speed: 2000.0,
            air_speed: 1200.0,
            jump_speed: 1000.0,
            jump_fall: 2000.0,
            jump_release: 1500.0,
            jump_hold: 1000.0,
            drag: 0.005,
            friction_hold: 0.04,
            friction_release: 0.9,
            coyote_time: 1.0 / 15.0, // ~4 ticks at 60 Hz
        }
    }
}

/// Edges touched during a bounds check
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoundsContact {
    /// Resting on (or pushed out of) the floor
    pub grounded: bool,
    /// Touching the left or right wall
    pub on_wall: bool,
}

/// Physics system for integrating fighter motion
pub struct PhysicsSystem;

impl PhysicsSystem {
    /// Apply gravity, horizontal drive, air drag and friction to a dynamic
    /// fighter's velocity. Position is left alone.
    pub fn integrate_forces(fighter: &mut Fighter, gravity: Vec2, stats: &FighterStats, dt: f32) {
        // Rising is lighter than falling, lightest while jump is held
        let fall_acceleration = if fighter.velocity.y >= 0.0 {
            if fighter.state == State::Jumping {
                stats.jump_hold
            } else {
                stats.jump_release
            }
        } else {
            stats.jump_fall
        };
        fighter.velocity += gravity * fall_acceleration * dt;

        let horizontal = fighter.direction.horizontal();
        let drive = if fighter.is_grounded {
            stats.ground_speed
        } else {
            stats.air_speed
        };
        fighter.velocity.x += horizontal * dt * drive;

        let speed_sq = fighter.velocity.length_squared();
        let heading = fighter.velocity.normalize_or_zero();

        fighter.velocity += 0.5 * speed_sq * stats.drag * dt * -heading;

        let friction = if Self::is_holding(horizontal, fighter.velocity.x) {
            stats.friction_hold
        } else {
            stats.friction_release
        };
        fighter.velocity.x += friction * stats.jump_fall * dt * -heading.x;
    }

    /// Input is held and the fighter is not moving against it
    fn is_holding(horizontal: f32, velocity_x: f32) -> bool {
        horizontal != 0.0 && (velocity_x == 0.0 || (velocity_x > 0.0) == (horizontal > 0.0))
    }

    /// Push a fighter back inside the arena.
    ///
    /// Vertical edges are resolved before horizontal ones. Only the velocity
    /// component heading out through an edge is removed; the fighter never
    /// bounces.
    pub fn resolve_bounds(fighter: &mut Fighter, bounds: &ArenaBounds) -> BoundsContact {
        let mut contact = BoundsContact::default();
        if !bounds.touches_edge(fighter.position, CONTACT_SLOP) {
            return contact;
        }

        let half_span = bounds.half_free_span();
        let offset = fighter.position - bounds.center();
        // +-1 exactly when the fighter's edge lies on the arena edge
        let reach = offset / half_span;
        let threshold = Vec2::ONE - CONTACT_SLOP / half_span;

        let vertical = if reach.y >= threshold.y {
            Vec2::NEG_Y
        } else if reach.y <= -threshold.y {
            contact.grounded = true;
            Vec2::Y
        } else {
            Vec2::ZERO
        };
        Self::apply_contact(fighter, vertical, offset.y.abs() - half_span.y);

        let horizontal = if reach.x >= threshold.x {
            Vec2::NEG_X
        } else if reach.x <= -threshold.x {
            Vec2::X
        } else {
            Vec2::ZERO
        };
        if horizontal != Vec2::ZERO {
            contact.on_wall = true;
        }
        Self::apply_contact(fighter, horizontal, offset.x.abs() - half_span.x);

        contact
    }

    /// Cancel velocity into the surface and move the fighter out by `depth`
    /// along the inward `normal`
    fn apply_contact(fighter: &mut Fighter, normal: Vec2, depth: f32) {
        if normal == Vec2::ZERO {
            return;
        }
        let impulse = -normal.dot(fighter.velocity);
        fighter.velocity += impulse.max(0.0) * normal;
        fighter.position += depth * normal;
    }

    /// Whether a jump impulse applies this tick
    pub fn should_jump(
        fighter: &Fighter,
        grounded: bool,
        since_jump_request: f64,
        stats: &FighterStats,
    ) -> bool {
        grounded
            && fighter.can_jump()
            && (fighter.jumped || since_jump_request < stats.coyote_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::arena::FIGHTER_HALF_SIZE;
    use crate::game::direction::Direction;

    const DT: f32 = 1.0 / 60.0;

    fn arena() -> ArenaBounds {
        ArenaBounds::from_size(1280.0, 720.0).unwrap()
    }

    fn fighter_at(x: f32, y: f32) -> Fighter {
        let mut f = Fighter::new(0);
        f.position = Vec2::new(x, y);
        f
    }

    #[test]
    fn gravity_depends_on_vertical_motion() {
        let stats = FighterStats {
            drag: 0.0,
            ..FighterStats::default()
        };

        let mut rising = fighter_at(640.0, 360.0);
        rising.velocity = Vec2::new(0.0, 100.0);
        PhysicsSystem::integrate_forces(&mut rising, Vec2::NEG_Y, &stats, DT);
        assert!((rising.velocity.y - (100.0 - stats.jump_release * DT)).abs() < 1e-3);

        let mut holding = fighter_at(640.0, 360.0);
        holding.state = State::Jumping;
        holding.velocity = Vec2::new(0.0, 100.0);
        PhysicsSystem::integrate_forces(&mut holding, Vec2::NEG_Y, &stats, DT);
        assert!((holding.velocity.y - (100.0 - stats.jump_hold * DT)).abs() < 1e-3);

        let mut falling = fighter_at(640.0, 360.0);
        falling.velocity = Vec2::new(0.0, -100.0);
        PhysicsSystem::integrate_forces(&mut falling, Vec2::NEG_Y, &stats, DT);
        assert!((falling.velocity.y - (-100.0 - stats.jump_fall * DT)).abs() < 1e-3);
    }

    #[test]
    fn zero_velocity_without_gravity_stays_zero() {
        let mut f = fighter_at(640.0, 360.0);
        PhysicsSystem::integrate_forces(&mut f, Vec2::ZERO, &FighterStats::default(), DT);
        assert_eq!(f.velocity, Vec2::ZERO);
        assert!(f.velocity.is_finite());
    }

    #[test]
    fn drag_opposes_velocity() {
        let stats = FighterStats::default();
        let mut f = fighter_at(640.0, 360.0);
        f.velocity = Vec2::new(0.0, 800.0);
        PhysicsSystem::integrate_forces(&mut f, Vec2::ZERO, &stats, DT);
        let expected = 800.0 - 0.5 * 800.0 * 800.0 * stats.drag * DT;
        assert!((f.velocity.y - expected).abs() < 1e-2);
    }

    #[test]
    fn ground_drive_stronger_than_air_drive() {
        let stats = FighterStats::default();
        let mut grounded = fighter_at(640.0, 360.0);
        grounded.is_grounded = true;
        grounded.direction = Direction::Right;
        let mut airborne = grounded.clone();
        airborne.is_grounded = false;

        PhysicsSystem::integrate_forces(&mut grounded, Vec2::ZERO, &stats, DT);
        PhysicsSystem::integrate_forces(&mut airborne, Vec2::ZERO, &stats, DT);
        assert!(grounded.velocity.x > airborne.velocity.x);
        assert!(airborne.velocity.x > 0.0);
    }

    #[test]
    fn release_friction_stronger_than_hold_friction() {
        let stats = FighterStats::default();
        let mut held = fighter_at(640.0, 360.0);
        held.velocity = Vec2::new(300.0, 0.0);
        held.direction = Direction::Right;
        let mut released = held.clone();
        released.direction = Direction::None;
        let mut reversed = held.clone();
        reversed.direction = Direction::Left;

        PhysicsSystem::integrate_forces(&mut held, Vec2::ZERO, &stats, DT);
        PhysicsSystem::integrate_forces(&mut released, Vec2::ZERO, &stats, DT);
        PhysicsSystem::integrate_forces(&mut reversed, Vec2::ZERO, &stats, DT);
        assert!(held.velocity.x > released.velocity.x);
        assert!(released.velocity.x > reversed.velocity.x);
    }

    #[test]
    fn holding_counts_zero_velocity() {
        assert!(PhysicsSystem::is_holding(1.0, 0.0));
        assert!(PhysicsSystem::is_holding(-1.0, 0.0));
        assert!(PhysicsSystem::is_holding(-1.0, -3.0));
        assert!(!PhysicsSystem::is_holding(1.0, -3.0));
        assert!(!PhysicsSystem::is_holding(0.0, 3.0));
    }

    #[test]
    fn inside_arena_untouched() {
        let mut f = fighter_at(640.0, 360.0);
        f.velocity = Vec2::new(50.0, -50.0);
        let contact = PhysicsSystem::resolve_bounds(&mut f, &arena());
        assert_eq!(contact, BoundsContact::default());
        assert_eq!(f.position, Vec2::new(640.0, 360.0));
        assert_eq!(f.velocity, Vec2::new(50.0, -50.0));
    }

    #[test]
    fn floor_penetration_grounds_and_clamps() {
        let mut f = fighter_at(640.0, 30.0);
        f.velocity = Vec2::new(12.0, -400.0);
        let contact = PhysicsSystem::resolve_bounds(&mut f, &arena());
        assert!(contact.grounded);
        assert!(!contact.on_wall);
        assert!((f.position.y - FIGHTER_HALF_SIZE.y).abs() < 1e-3);
        assert_eq!(f.velocity, Vec2::new(12.0, 0.0));
    }

    #[test]
    fn ceiling_clamps_without_grounding() {
        let mut f = fighter_at(640.0, 700.0);
        f.velocity = Vec2::new(0.0, 300.0);
        let contact = PhysicsSystem::resolve_bounds(&mut f, &arena());
        assert!(!contact.grounded);
        assert!((f.position.y + FIGHTER_HALF_SIZE.y - 720.0).abs() < 1e-3);
        assert_eq!(f.velocity.y, 0.0);
    }

    #[test]
    fn right_wall_removes_only_outward_velocity() {
        let mut outward = fighter_at(1260.0, 360.0);
        outward.velocity = Vec2::new(250.0, 40.0);
        let contact = PhysicsSystem::resolve_bounds(&mut outward, &arena());
        assert!(contact.on_wall);
        assert!((outward.position.x + FIGHTER_HALF_SIZE.x - 1280.0).abs() < 1e-3);
        assert_eq!(outward.velocity, Vec2::new(0.0, 40.0));

        let mut inward = fighter_at(1260.0, 360.0);
        inward.velocity = Vec2::new(-250.0, 40.0);
        PhysicsSystem::resolve_bounds(&mut inward, &arena());
        assert!((inward.position.x + FIGHTER_HALF_SIZE.x - 1280.0).abs() < 1e-3);
        assert_eq!(inward.velocity, Vec2::new(-250.0, 40.0));
    }

    #[test]
    fn left_wall_sets_on_wall() {
        let mut f = fighter_at(10.0, 360.0);
        f.velocity = Vec2::new(-90.0, 0.0);
        let contact = PhysicsSystem::resolve_bounds(&mut f, &arena());
        assert!(contact.on_wall);
        assert!((f.position.x - FIGHTER_HALF_SIZE.x).abs() < 1e-3);
        assert_eq!(f.velocity.x, 0.0);
    }

    #[test]
    fn corner_resolves_both_axes() {
        let mut f = fighter_at(-5.0, -5.0);
        f.velocity = Vec2::new(-10.0, -10.0);
        let contact = PhysicsSystem::resolve_bounds(&mut f, &arena());
        assert!(contact.grounded);
        assert!(contact.on_wall);
        assert!((f.position - FIGHTER_HALF_SIZE).length() < 1e-3);
        assert_eq!(f.velocity, Vec2::ZERO);
    }

    #[test]
    fn resting_on_floor_is_contact() {
        let mut f = fighter_at(640.0, FIGHTER_HALF_SIZE.y);
        let contact = PhysicsSystem::resolve_bounds(&mut f, &arena());
        assert!(contact.grounded);
        assert_eq!(f.position, Vec2::new(640.0, FIGHTER_HALF_SIZE.y));
    }

    #[test]
    fn jump_needs_ground_eligibility_and_request() {
        let stats = FighterStats::default();
        let mut f = fighter_at(640.0, 40.0);
        f.jumped = true;
        assert!(PhysicsSystem::should_jump(&f, true, f64::INFINITY, &stats));
        assert!(!PhysicsSystem::should_jump(&f, false, 0.0, &stats));

        f.state = State::Falling;
        assert!(!PhysicsSystem::should_jump(&f, true, 0.0, &stats));

        f.state = State::Moving;
        f.jumped = false;
        assert!(PhysicsSystem::should_jump(&f, true, 0.05, &stats));
        assert!(!PhysicsSystem::should_jump(&f, true, 0.1, &stats));
    }
}
