//! Arena layout: bounds, hoop and scoring zones

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::distance;

/// The scoring ring
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hoop {
    pub center: Vec2,
    pub radius: f32,
}

impl Hoop {
    pub fn contains(&self, pos: Vec2) -> bool {
        distance(pos, self.center) < self.radius
    }
}

/// Fixed geometry of one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub hoop: Hoop,
    /// x splitting the 2-point zone (left) from the 3-point zone (right)
    pub zone_divider: f32,
    /// Floor height (y grows downward)
    pub ground: f32,
    pub wall_left: f32,
    pub wall_right: f32,
    pub ceiling: f32,
    pub spawn_x: f32,
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            hoop: Hoop {
                center: Vec2::new(HOOP_X, HOOP_Y),
                radius: HOOP_RADIUS,
            },
            zone_divider: ZONE_DIVIDER,
            ground: GROUND,
            wall_left: WALL_LEFT,
            wall_right: WALL_RIGHT,
            ceiling: CEILING,
            spawn_x: SPAWN_X,
        }
    }
}

impl Arena {
    pub fn spawn_point(&self) -> Vec2 {
        Vec2::new(self.spawn_x, self.ground)
    }

    /// Points for a throw that started at `x`
    pub fn zone_points(&self, x: f32) -> u32 {
        if x >= self.zone_divider {
            POINTS_FAR
        } else {
            POINTS_NEAR
        }
    }
}
