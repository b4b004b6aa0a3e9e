//! Game state and core simulation types
//!
//! Everything the renderer reads lives here; the engine in `tick` is the
//! only writer.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::arena::Arena;
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Start screen, no round played yet
    #[default]
    Ready,
    /// Round in progress
    Playing,
    /// Timer ran out
    GameOver,
}

/// Which regime a ball is in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BallState {
    /// On the ground, rolling back and forth
    Resting,
    /// Following the player's hand
    Held,
    /// Thrown and in flight (including floor bounces)
    Airborne,
}

/// A basketball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub state: BallState,
    /// +1 rolls right, -1 rolls left
    pub roll_direction: f32,
    /// Position one tick earlier while held (throw velocity source)
    pub prev_pos: Option<Vec2>,
    /// Where the current throw was picked up (decides 2 vs 3 points)
    pub throw_start: Option<Vec2>,
    /// Ball was inside the ring last tick
    pub entered_hoop: bool,
    /// When the ball was grabbed (release debounce)
    pub grabbed_at: Option<f64>,
}

impl Ball {
    pub fn new(id: u32, pos: Vec2, roll_direction: f32) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::ZERO,
            radius: BALL_RADIUS,
            state: BallState::Resting,
            roll_direction,
            prev_pos: None,
            throw_start: None,
            entered_hoop: false,
            grabbed_at: None,
        }
    }

    #[inline]
    pub fn thrown(&self) -> bool {
        self.state == BallState::Airborne
    }

    #[inline]
    pub fn grabbed(&self) -> bool {
        self.state == BallState::Held
    }

    #[inline]
    pub fn on_ground(&self) -> bool {
        self.state == BallState::Resting
    }

    /// Pick the ball up at `now`; rolling speed is dropped
    pub fn grab(&mut self, now: f64) {
        self.state = BallState::Held;
        self.vel = Vec2::ZERO;
        self.throw_start = Some(self.pos);
        self.prev_pos = None;
        self.grabbed_at = Some(now);
    }

    /// Move toward the fingertip, remembering where we were
    pub fn follow(&mut self, target: Vec2, smoothing: Option<f32>) {
        self.prev_pos = Some(self.pos);
        self.pos = match smoothing {
            Some(alpha) => self.pos * alpha + target * (1.0 - alpha),
            None => target,
        };
    }

    /// Let go: velocity comes from the last held movement
    pub fn release(&mut self, gain: f32, launch_boost: f32) {
        if let Some(prev) = self.prev_pos {
            let delta = self.pos - prev;
            self.vel = Vec2::new(delta.x * gain, delta.y * gain - launch_boost);
        }
        self.state = BallState::Airborne;
        self.grabbed_at = None;
    }

    /// Points this ball is worth if it goes in now
    pub fn points(&self, arena: &Arena) -> u32 {
        self.throw_start
            .map_or(POINTS_NEAR, |start| arena.zone_points(start.x))
    }
}

/// Transient "+N POINTS" overlay written on every score
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreEffect {
    pub active: bool,
    pub start_time: f64,
    pub points: u32,
    pub position: Option<Vec2>,
}

impl ScoreEffect {
    pub fn trigger(&mut self, now: f64, points: u32, position: Vec2) {
        self.active = true;
        self.start_time = now;
        self.points = points;
        self.position = Some(position);
    }

    /// Seconds since the effect started, if it is showing
    pub fn elapsed(&self, now: f64) -> Option<f64> {
        self.active.then(|| now - self.start_time)
    }
}

/// Latest hand reading from the vision side
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HandSignal {
    /// Middle fingertip in arena coordinates (None = no hand seen)
    pub fingertip: Option<Vec2>,
    /// Fist closed
    pub closed: bool,
}

impl HandSignal {
    pub fn open(fingertip: Vec2) -> Self {
        Self {
            fingertip: Some(fingertip),
            closed: false,
        }
    }

    pub fn fist(fingertip: Vec2) -> Self {
        Self {
            fingertip: Some(fingertip),
            closed: true,
        }
    }
}

/// Something the engine wants the outside world to know about
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Spawned { ball_id: u32 },
    Grabbed { ball_id: u32 },
    Thrown { ball_id: u32, vel: Vec2 },
    Scored { ball_id: u32, points: u32, pos: Vec2 },
    GameOver { win: bool, score: u32 },
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    /// Fresh generator for the next draw (advances the stream)
    pub fn next_rng(&mut self) -> Pcg32 {
        let mixed = self
            .seed
            .wrapping_add(self.stream.wrapping_mul(0x9E37_79B9_7F4A_7C15));
        self.stream += 1;
        Pcg32::seed_from_u64(mixed)
    }

    pub fn reset(&mut self) {
        self.stream = 0;
    }
}

/// Complete session state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Seed for targets and roll directions
    pub seed: u64,
    pub rng_state: RngState,
    pub score: u32,
    /// Score needed to win
    pub target: u32,
    /// Whole seconds remaining in the round
    pub time_left: u32,
    pub phase: GamePhase,
    /// Outcome of the last finished round
    pub win: bool,
    /// Active balls in spawn order
    pub balls: Vec<Ball>,
    /// Id of the ball in the player's hand
    pub holding: Option<u32>,
    pub last_spawn_time: f64,
    pub game_start_time: Option<f64>,
    pub last_score_time: Option<f64>,
    /// Written by the caller before every update
    pub hand: HandSignal,
    pub arena: Arena,
    pub score_effect: ScoreEffect,
    pub tuning: Tuning,
    /// Pending events for audio/UI (drained by the driver)
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a session on the start screen
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            rng_state: RngState::new(seed),
            score: 0,
            target: tuning.target_max,
            time_left: tuning.round_secs,
            phase: GamePhase::Ready,
            win: false,
            balls: Vec::new(),
            holding: None,
            last_spawn_time: 0.0,
            game_start_time: None,
            last_score_time: None,
            hand: HandSignal::default(),
            arena: Arena::default(),
            score_effect: ScoreEffect::default(),
            tuning,
            events: Vec::new(),
            next_id: 1,
        }
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// "Game over" screen should be shown
    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub(crate) fn reset_entity_ids(&mut self) {
        self.next_id = 1;
    }

    /// Spawn a resting ball at the spawn point
    pub fn spawn_ball(&mut self) -> u32 {
        use rand::Rng;

        let id = self.next_entity_id();
        let roll_direction = if self.rng_state.next_rng().random_bool(0.5) {
            1.0
        } else {
            -1.0
        };
        self.balls
            .push(Ball::new(id, self.arena.spawn_point(), roll_direction));
        self.events.push(GameEvent::Spawned { ball_id: id });
        log::debug!("Spawned ball {} ({} active)", id, self.balls.len());
        id
    }

    pub fn ball(&self, id: u32) -> Option<&Ball> {
        self.balls.iter().find(|b| b.id == id)
    }

    pub fn ball_mut(&mut self, id: u32) -> Option<&mut Ball> {
        self.balls.iter_mut().find(|b| b.id == id)
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// `holding` points at the only held ball, and that ball exists
    pub fn holding_is_consistent(&self) -> bool {
        let held: Vec<u32> = self
            .balls
            .iter()
            .filter(|b| b.grabbed())
            .map(|b| b.id)
            .collect();
        match self.holding {
            Some(id) => held == [id],
            None => held.is_empty(),
        }
    }
}
