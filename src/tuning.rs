//! Gameplay tuning
//!
//! The update loop went through several revisions that differ only in their
//! constants (grab radius, smoothing, gravity, ball cap...). Each revision is a
//! preset here so the engine itself stays one code path.

use serde::{Deserialize, Serialize};

use crate::consts::ROUND_SECS;

/// Named tuning revisions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TuningPreset {
    /// First playable version: snappy hold, single ball, freeze on score
    Classic,
    /// Smoothed hold, release debounce, floatier arcs, up to 5 balls
    #[default]
    Refined,
}

impl TuningPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            TuningPreset::Classic => "Classic",
            TuningPreset::Refined => "Refined",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" | "v1" => Some(TuningPreset::Classic),
            "refined" | "v2" => Some(TuningPreset::Refined),
            _ => None,
        }
    }

    pub fn tuning(&self) -> Tuning {
        match self {
            TuningPreset::Classic => Tuning::classic(),
            TuningPreset::Refined => Tuning::refined(),
        }
    }
}

/// Every constant the engine reads
///
/// Velocities and accelerations are per tick, times are seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tuning {
    // === Hand interaction ===
    /// Fingertip must be closer than this to a ball to grab it
    pub grab_radius: f32,
    /// Minimum hold time before an open hand releases (0 = release at once)
    pub min_hold_secs: f64,
    /// Held-ball smoothing factor α (`None` = snap to fingertip)
    pub hold_smoothing: Option<f32>,
    /// Throw velocity = last held delta * gain
    pub throw_gain: f32,
    /// Upward bias added to every throw
    pub launch_boost: f32,

    // === Airborne ===
    pub gravity: f32,
    pub wall_bounce: f32,
    pub ceiling_bounce: f32,
    pub floor_bounce: f32,
    /// Horizontal damping applied on floor contact
    pub floor_friction: f32,
    /// |vy| below this after a floor bounce puts the ball to rest
    pub rest_threshold: f32,

    // === Rolling ===
    pub roll_accel: f32,
    pub roll_friction: f32,
    pub roll_bounce: f32,

    // === Spawning ===
    pub max_balls: usize,
    pub spawn_interval_secs: f64,

    // === Scoring / round ===
    pub score_cooldown_secs: f64,
    pub score_effect_secs: f64,
    /// Pause the simulation while the score effect plays
    pub freeze_on_score: bool,
    pub round_secs: u32,
    /// Target score is drawn from this inclusive range at start
    pub target_min: u32,
    pub target_max: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self::refined()
    }
}

impl Tuning {
    /// Values of the first playable revision
    pub fn classic() -> Self {
        Self {
            grab_radius: 0.1,
            min_hold_secs: 0.0,
            hold_smoothing: None,
            throw_gain: 3.0,
            launch_boost: 0.03,
            gravity: 0.002,
            max_balls: 1,
            freeze_on_score: true,
            ..Self::refined()
        }
    }

    /// Values of the latest revision
    pub fn refined() -> Self {
        Self {
            grab_radius: 0.15,
            min_hold_secs: 0.2,
            hold_smoothing: Some(0.3),
            throw_gain: 4.5,
            launch_boost: 0.04,

            gravity: 0.0018,
            wall_bounce: 0.6,
            ceiling_bounce: 0.5,
            floor_bounce: 0.6,
            floor_friction: 0.8,
            rest_threshold: 0.01,

            roll_accel: 0.0005,
            roll_friction: 0.98,
            roll_bounce: 0.7,

            max_balls: 5,
            spawn_interval_secs: 3.0,

            score_cooldown_secs: 0.3,
            score_effect_secs: 0.8,
            freeze_on_score: false,
            round_secs: ROUND_SECS,
            target_min: 10,
            target_max: 15,
        }
    }

    /// Target range with the bounds in order
    pub fn target_range(&self) -> std::ops::RangeInclusive<u32> {
        let lo = self.target_min.min(self.target_max);
        let hi = self.target_min.max(self.target_max);
        lo..=hi
    }
}
