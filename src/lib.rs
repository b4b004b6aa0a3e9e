//! Hand Hoop - A gesture-driven basketball shooting game
//!
//! Core modules:
//! - `sim`: Ball physics, hand interaction and scoring (time injected, no I/O)
//! - `tuning`: Versioned gameplay constants (classic / refined presets)
//! - `gesture`: Hand-landmark frames to grab/release signal
//! - `audio`: Engine events to sound cues
//! - `settings`: Player preferences persisted as JSON
//! - `replay`: Headless driver replaying recorded hand traces

pub mod audio;
pub mod gesture;
pub mod replay;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::Settings;
pub use tuning::{Tuning, TuningPreset};

use glam::Vec2;

/// Game configuration constants
///
/// All positions are normalized arena coordinates: (0, 0) is the top-left
/// corner, (1, 1) the bottom-right, y grows downward.
pub mod consts {
    /// Round length in seconds
    pub const ROUND_SECS: u32 = 60;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 0.03;

    /// Arena bounds
    pub const WALL_LEFT: f32 = 0.05;
    pub const WALL_RIGHT: f32 = 0.95;
    pub const CEILING: f32 = 0.05;
    pub const GROUND: f32 = 0.85;

    /// Hoop sits on the left, near the top
    pub const HOOP_X: f32 = 0.08;
    pub const HOOP_Y: f32 = 0.25;
    pub const HOOP_RADIUS: f32 = 0.055;

    /// Throws starting at or right of this line are worth 3
    pub const ZONE_DIVIDER: f32 = 0.5;

    /// Balls spawn at 70% of the arena width, on the ground
    pub const SPAWN_X: f32 = 0.7;

    /// Score values
    pub const POINTS_NEAR: u32 = 2;
    pub const POINTS_FAR: u32 = 3;
}

/// Euclidean distance between two arena points
#[inline]
pub fn distance(p1: Vec2, p2: Vec2) -> f32 {
    ((p1.x - p2.x).powi(2) + (p1.y - p2.y).powi(2)).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        assert_eq!(distance(Vec2::new(0.0, 0.0), Vec2::new(3.0, 4.0)), 5.0);
        assert_eq!(distance(Vec2::new(0.2, 0.2), Vec2::new(0.2, 0.2)), 0.0);
        let a = Vec2::new(0.1, 0.9);
        let b = Vec2::new(0.7, 0.3);
        assert!((distance(a, b) - distance(b, a)).abs() < 1e-6);
    }
}
