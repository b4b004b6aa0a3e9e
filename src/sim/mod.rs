//! Game simulation module
//!
//! All gameplay logic lives here. This module must stay free of I/O:
//! - Time is passed in, never read
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, audio or camera dependencies

pub mod arena;
pub mod collision;
pub mod lifecycle;
pub mod state;
pub mod tick;

pub use arena::{Arena, Hoop};
pub use collision::{CollisionResult, resolve_airborne, resolve_rolling_walls};
pub use lifecycle::{end, start};
pub use state::{
    Ball, BallState, GameEvent, GamePhase, GameState, HandSignal, RngState, ScoreEffect,
};
pub use tick::update;
