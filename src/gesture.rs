//! Hand landmarks to game input
//!
//! The vision model reports 21 keypoints per hand (MediaPipe layout,
//! normalized image coordinates). The game only needs two things from them:
//! where the middle fingertip is, and whether the hand is a fist.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::HandSignal;

// ============================================================================
// HAND LANDMARK INDICES
// ============================================================================

pub const WRIST: usize = 0;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_PIP: usize = 6;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_TIP: usize = 12;
pub const RING_PIP: usize = 14;
pub const RING_TIP: usize = 16;
pub const PINKY_PIP: usize = 18;
pub const PINKY_TIP: usize = 20;

pub const LANDMARK_COUNT: usize = 21;

/// (tip, knuckle) per finger, thumb first
const FINGERS: [(usize, usize); 5] = [
    (THUMB_TIP, THUMB_IP),
    (INDEX_TIP, INDEX_PIP),
    (MIDDLE_TIP, MIDDLE_PIP),
    (RING_TIP, RING_PIP),
    (PINKY_TIP, PINKY_PIP),
];

/// A finger counts as curled when its tip is within this factor of the
/// knuckle's distance to the wrist
const CURL_TOLERANCE: f32 = 1.1;

/// Curled fingers needed for a fist
const FIST_MIN_CURLED: usize = 4;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HandLandmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl HandLandmark {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn xy(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// One detected hand
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandLandmarks {
    pub landmarks: [HandLandmark; LANDMARK_COUNT],
}

impl HandLandmarks {
    pub fn new(landmarks: [HandLandmark; LANDMARK_COUNT]) -> Self {
        Self { landmarks }
    }

    /// Number of fingers folded toward the palm (2-D distances only)
    pub fn curled_fingers(&self) -> usize {
        let wrist = self.landmarks[WRIST].xy();
        FINGERS
            .iter()
            .filter(|&&(tip, knuckle)| {
                let tip_dist = crate::distance(self.landmarks[tip].xy(), wrist);
                let knuckle_dist = crate::distance(self.landmarks[knuckle].xy(), wrist);
                tip_dist < knuckle_dist * CURL_TOLERANCE
            })
            .count()
    }

    pub fn is_closed(&self) -> bool {
        self.curled_fingers() >= FIST_MIN_CURLED
    }

    /// Grab point used by the game
    pub fn middle_fingertip(&self) -> Vec2 {
        self.landmarks[MIDDLE_TIP].xy()
    }
}

impl HandSignal {
    /// Build the per-tick signal; no hand means no fingertip and an open hand
    pub fn from_landmarks(hand: Option<&HandLandmarks>) -> Self {
        match hand {
            Some(hand) => Self {
                fingertip: Some(hand.middle_fingertip()),
                closed: hand.is_closed(),
            },
            None => Self::default(),
        }
    }
}
