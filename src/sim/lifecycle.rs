//! Round start/end transitions

use rand::Rng;

use super::state::{GameEvent, GamePhase, GameState, ScoreEffect};

/// Reset the session and begin a round at `now`
///
/// Valid from the start screen and from game over. Calling it twice in a row
/// yields the same fresh state: the RNG restarts from the session seed.
pub fn start(state: &mut GameState, now: f64) {
    state.rng_state.reset();
    state.reset_entity_ids();

    state.score = 0;
    state.target = state
        .rng_state
        .next_rng()
        .random_range(state.tuning.target_range());
    state.time_left = state.tuning.round_secs;
    state.win = false;

    state.balls.clear();
    state.holding = None;
    state.events.clear();
    state.last_spawn_time = now;
    state.game_start_time = Some(now);

    state.last_score_time = None;
    state.score_effect = ScoreEffect::default();

    state.phase = GamePhase::Playing;
    state.spawn_ball();

    log::info!(
        "Round started: target {} points in {} seconds",
        state.target,
        state.time_left
    );
}

/// Stop the round and decide the outcome
pub fn end(state: &mut GameState) {
    state.phase = GamePhase::GameOver;
    state.win = state.score >= state.target;
    state.events.push(GameEvent::GameOver {
        win: state.win,
        score: state.score,
    });

    if state.win {
        log::info!("Round won! Final score: {}/{}", state.score, state.target);
    } else {
        log::info!("Round lost. Final score: {}/{}", state.score, state.target);
    }
}
