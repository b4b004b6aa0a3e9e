//! Collision response against the arena bounds
//!
//! Balls only ever collide with the two side walls, the ceiling and the
//! floor. Every contact clamps the ball back inside and reflects the
//! relevant velocity component with damping, so rebounds always lose speed.

use super::arena::Arena;
use super::state::{Ball, BallState};
use crate::tuning::Tuning;

/// Surfaces a ball touched this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionResult {
    pub wall: bool,
    pub ceiling: bool,
    /// Bounced off the floor and stayed in the air
    pub floor: bool,
    /// Floor contact that took the ball out of the air
    pub settled: bool,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self::default()
    }

    pub fn hit(&self) -> bool {
        self.wall || self.ceiling || self.floor || self.settled
    }
}

/// Clamp x into the walls; true if the ball was outside
fn clamp_to_walls(ball: &mut Ball, arena: &Arena) -> bool {
    if ball.pos.x < arena.wall_left || ball.pos.x > arena.wall_right {
        ball.pos.x = ball.pos.x.clamp(arena.wall_left, arena.wall_right);
        true
    } else {
        false
    }
}

/// Rolling ball hitting a wall turns around
pub fn resolve_rolling_walls(ball: &mut Ball, arena: &Arena, tuning: &Tuning) -> CollisionResult {
    if !clamp_to_walls(ball, arena) {
        return CollisionResult::miss();
    }
    ball.roll_direction = -ball.roll_direction;
    ball.vel.x *= -tuning.roll_bounce;
    CollisionResult {
        wall: true,
        ..CollisionResult::miss()
    }
}

/// Bounds response for a ball in flight, in wall/ceiling/floor order
pub fn resolve_airborne(ball: &mut Ball, arena: &Arena, tuning: &Tuning) -> CollisionResult {
    let mut result = CollisionResult::miss();

    if clamp_to_walls(ball, arena) {
        ball.vel.x *= -tuning.wall_bounce;
        result.wall = true;
    }

    if ball.pos.y < arena.ceiling {
        ball.pos.y = arena.ceiling;
        ball.vel.y *= -tuning.ceiling_bounce;
        result.ceiling = true;
    }

    if ball.pos.y > arena.ground {
        ball.pos.y = arena.ground;
        ball.vel.y *= -tuning.floor_bounce;
        ball.vel.x *= tuning.floor_friction;

        if ball.vel.y.abs() < tuning.rest_threshold {
            ball.state = BallState::Resting;
            ball.vel.y = 0.0;
            result.settled = true;
        } else {
            result.floor = true;
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn airborne(pos: Vec2, vel: Vec2) -> Ball {
        let mut ball = Ball::new(1, pos, 1.0);
        ball.state = BallState::Airborne;
        ball.vel = vel;
        ball
    }

    #[test]
    fn test_wall_bounce() {
        let arena = Arena::default();
        let tuning = Tuning::default();
        let mut ball = airborne(Vec2::new(-0.02, 0.5), Vec2::new(-0.05, 0.0));

        let result = resolve_airborne(&mut ball, &arena, &tuning);
        assert_eq!(
            result,
            CollisionResult {
                wall: true,
                ..CollisionResult::miss()
            }
        );
        assert_eq!(ball.pos.x, arena.wall_left);
        assert!(ball.vel.x > 0.0 && ball.vel.x < 0.05);
    }

    #[test]
    fn test_ceiling_bounce() {
        let arena = Arena::default();
        let tuning = Tuning::default();
        let mut ball = airborne(Vec2::new(0.5, 0.01), Vec2::new(0.0, -0.04));

        let result = resolve_airborne(&mut ball, &arena, &tuning);
        assert!(result.ceiling && !result.wall && !result.floor);
        assert_eq!(ball.pos.y, arena.ceiling);
        assert!((ball.vel.y - 0.02).abs() < 1e-6);
    }

    #[test]
    fn test_floor_bounce_and_settle() {
        let arena = Arena::default();
        let tuning = Tuning::default();

        let mut ball = airborne(Vec2::new(0.5, 0.9), Vec2::new(0.02, 0.05));
        let result = resolve_airborne(&mut ball, &arena, &tuning);
        assert!(result.floor && !result.settled);
        assert!(ball.thrown());
        assert!((ball.vel.y - -0.03).abs() < 1e-6);
        assert!((ball.vel.x - 0.016).abs() < 1e-6);

        // Soft landing comes to rest
        let mut ball = airborne(Vec2::new(0.5, 0.86), Vec2::new(0.02, 0.01));
        let result = resolve_airborne(&mut ball, &arena, &tuning);
        assert!(result.settled && !result.floor);
        assert!(ball.on_ground());
        assert_eq!(ball.vel.y, 0.0);
        assert_eq!(ball.pos.y, arena.ground);
    }

    #[test]
    fn test_rolling_wall_flips_direction() {
        let arena = Arena::default();
        let tuning = Tuning::default();
        let mut ball = Ball::new(1, Vec2::new(0.97, arena.ground), 1.0);
        ball.vel.x = 0.01;

        assert!(resolve_rolling_walls(&mut ball, &arena, &tuning).wall);
        assert_eq!(ball.roll_direction, -1.0);
        assert_eq!(ball.pos.x, arena.wall_right);
        assert!(ball.vel.x < 0.0 && ball.vel.x.abs() < 0.01);
    }

    #[test]
    fn test_inside_bounds_untouched() {
        let arena = Arena::default();
        let tuning = Tuning::default();
        let mut ball = airborne(Vec2::new(0.5, 0.5), Vec2::new(0.01, 0.01));
        assert!(!resolve_airborne(&mut ball, &arena, &tuning).hit());
        assert_eq!(ball.vel, Vec2::new(0.01, 0.01));
    }
}
