//! Property tests for the game engine

use glam::Vec2;
use proptest::prelude::*;

use hand_hoop::sim::{Arena, Ball, BallState, GameState, HandSignal, resolve_airborne, start, update};
use hand_hoop::{Tuning, TuningPreset};

fn hand_strategy() -> impl Strategy<Value = HandSignal> {
    (
        prop::option::of((0.0f32..1.0, 0.0f32..1.0)),
        any::<bool>(),
    )
        .prop_map(|(tip, closed)| HandSignal {
            fingertip: tip.map(|(x, y)| Vec2::new(x, y)),
            closed,
        })
}

/// Frame gaps between 1/120 s and 1/10 s
fn frames_strategy() -> impl Strategy<Value = Vec<(HandSignal, f64)>> {
    prop::collection::vec((hand_strategy(), 0.008f64..0.1), 1..400)
}

fn preset_strategy() -> impl Strategy<Value = TuningPreset> {
    prop_oneof![Just(TuningPreset::Classic), Just(TuningPreset::Refined)]
}

proptest! {
    #[test]
    fn regimes_stay_exclusive(
        seed in any::<u64>(),
        preset in preset_strategy(),
        frames in frames_strategy(),
    ) {
        let mut state = GameState::new(seed, preset.tuning());
        start(&mut state, 0.0);

        let mut now = 0.0;
        let mut last_score = 0;
        for (hand, dt) in frames {
            now += dt;
            state.hand = hand;
            update(&mut state, now);

            for ball in &state.balls {
                prop_assert!(!(ball.grabbed() && ball.thrown()));
                prop_assert_eq!(ball.on_ground(), !ball.grabbed() && !ball.thrown());
                // Held balls go wherever the hand is
                if !ball.grabbed() {
                    prop_assert!(ball.pos.x >= state.arena.wall_left && ball.pos.x <= state.arena.wall_right);
                    prop_assert!(ball.pos.y >= state.arena.ceiling && ball.pos.y <= state.arena.ground);
                }
            }
            prop_assert!(state.holding_is_consistent());
            prop_assert!(state.balls.len() <= state.tuning.max_balls.max(1));
            prop_assert!(state.score >= last_score);
            prop_assert!(state.time_left <= state.tuning.round_secs);
            last_score = state.score;
        }
    }

    #[test]
    fn open_hand_never_grabs(
        seed in any::<u64>(),
        tips in prop::collection::vec((0.0f32..1.0, 0.0f32..1.0), 1..100),
    ) {
        let mut state = GameState::new(seed, Tuning::default());
        start(&mut state, 0.0);
        for (i, (x, y)) in tips.into_iter().enumerate() {
            state.hand = HandSignal::open(Vec2::new(x, y));
            update(&mut state, (i + 1) as f64 * 0.016);
            prop_assert_eq!(state.holding, None);
        }
    }

    #[test]
    fn bounces_lose_speed(
        x in -0.2f32..1.2,
        y in -0.2f32..1.2,
        vx in -0.2f32..0.2,
        vy in -0.2f32..0.2,
    ) {
        let arena = Arena::default();
        let tuning = Tuning::default();
        let mut ball = Ball::new(1, Vec2::new(x, y), 1.0);
        ball.state = BallState::Airborne;
        ball.vel = Vec2::new(vx, vy);

        let hit_wall = x < arena.wall_left || x > arena.wall_right;
        let hit_vertical = y < arena.ceiling || y > arena.ground;
        resolve_airborne(&mut ball, &arena, &tuning);

        if hit_wall && vx.abs() > 1e-6 {
            prop_assert!(ball.vel.x.abs() < vx.abs());
        }
        if hit_vertical && vy.abs() > 1e-6 {
            prop_assert!(ball.vel.y.abs() < vy.abs());
        }
    }

    #[test]
    fn start_resets_any_session(
        seed in any::<u64>(),
        frames in frames_strategy(),
        restart_at in 0.0f64..100.0,
    ) {
        let mut state = GameState::new(seed, Tuning::default());
        start(&mut state, 0.0);
        let mut now = 0.0;
        for (hand, dt) in frames {
            now += dt;
            state.hand = hand;
            update(&mut state, now);
        }

        start(&mut state, restart_at);
        let first = state.clone();
        start(&mut state, restart_at);
        prop_assert_eq!(&state, &first);
        prop_assert_eq!(state.score, 0);
        prop_assert_eq!(state.balls.len(), 1);
        prop_assert_eq!(state.holding, None);
        prop_assert!(state.is_playing());
    }
}
