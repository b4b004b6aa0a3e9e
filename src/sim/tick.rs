//! Per-frame simulation step
//!
//! One call advances every ball by one tick. Physics constants are per tick,
//! so ball travel depends on how often the driver calls `update`; all timed
//! rules (spawning, cooldowns, the round clock) use the injected `now`.

use super::collision::{resolve_airborne, resolve_rolling_walls};
use super::lifecycle::end;
use super::state::{BallState, GameEvent, GameState};

/// Slack for comparing timestamp differences against intervals
const TIME_EPSILON: f64 = 1e-9;

/// At least `secs` have passed between `since` and `now`
#[inline]
fn has_elapsed(now: f64, since: f64, secs: f64) -> bool {
    now - since >= secs - TIME_EPSILON
}

/// Advance the session by one tick
///
/// Reads `state.hand` (set by the caller beforehand) and mutates everything
/// else in place. Does nothing unless a round is being played.
pub fn update(state: &mut GameState, now: f64) {
    if !state.is_playing() {
        return;
    }

    // Score overlay: expire, and optionally hold the simulation while it shows.
    // The round clock runs through a freeze.
    if let Some(elapsed) = state.score_effect.elapsed(now) {
        if elapsed >= state.tuning.score_effect_secs {
            state.score_effect.active = false;
        } else if state.tuning.freeze_on_score {
            update_timer(state, now);
            return;
        }
    }

    spawn(state, now);
    grab(state, now);
    carry(state);
    throw(state, now);
    step_balls(state, now);
    update_timer(state, now);

    debug_assert!(
        state.holding_is_consistent(),
        "holding {:?} does not match held balls",
        state.holding
    );
}

/// Add a ball on a timer, up to the cap
fn spawn(state: &mut GameState, now: f64) {
    if state.balls.len() < state.tuning.max_balls
        && has_elapsed(now, state.last_spawn_time, state.tuning.spawn_interval_secs)
    {
        state.spawn_ball();
        state.last_spawn_time = now;
    }
}

/// Closed fist near a loose ball picks it up (first match in order)
fn grab(state: &mut GameState, now: f64) {
    if !state.hand.closed || state.holding.is_some() {
        return;
    }
    let Some(tip) = state.hand.fingertip else {
        return;
    };

    let grab_radius = state.tuning.grab_radius;
    let Some(ball) = state
        .balls
        .iter_mut()
        .find(|b| b.on_ground() && crate::distance(tip, b.pos) < grab_radius)
    else {
        return;
    };

    ball.grab(now);
    state.holding = Some(ball.id);
    state.events.push(GameEvent::Grabbed { ball_id: ball.id });
    log::debug!("Grabbed ball {} at ({:.3}, {:.3})", ball.id, ball.pos.x, ball.pos.y);
}

/// Held ball follows the fingertip
fn carry(state: &mut GameState) {
    let Some(tip) = state.hand.fingertip else {
        return;
    };
    let Some(id) = state.holding else {
        return;
    };
    let smoothing = state.tuning.hold_smoothing;
    if let Some(ball) = state.balls.iter_mut().find(|b| b.id == id) {
        ball.follow(tip, smoothing);
    }
}

/// Open hand releases the held ball once the minimum hold time has passed
fn throw(state: &mut GameState, now: f64) {
    if state.hand.closed {
        return;
    }
    let Some(id) = state.holding else {
        return;
    };
    let tuning = &state.tuning;
    let Some(ball) = state.balls.iter_mut().find(|b| b.id == id) else {
        state.holding = None;
        return;
    };

    let held_for = ball.grabbed_at.map_or(f64::INFINITY, |t| now - t);
    if held_for < tuning.min_hold_secs {
        return;
    }

    ball.release(tuning.throw_gain, tuning.launch_boost);
    state.holding = None;
    state.events.push(GameEvent::Thrown {
        ball_id: id,
        vel: ball.vel,
    });
    log::debug!("Threw ball {} with velocity ({:.4}, {:.4})", id, ball.vel.x, ball.vel.y);
}

/// Rolling and flight physics for every ball, plus hoop detection
fn step_balls(state: &mut GameState, now: f64) {
    let tuning = &state.tuning;
    let arena = &state.arena;
    let mut scored = Vec::new();

    for ball in &mut state.balls {
        match ball.state {
            BallState::Held => {}

            BallState::Resting => {
                ball.vel.x += ball.roll_direction * tuning.roll_accel;
                ball.vel.x *= tuning.roll_friction;
                ball.pos.x += ball.vel.x;
                resolve_rolling_walls(ball, arena, tuning);
            }

            BallState::Airborne => {
                ball.vel.y += tuning.gravity;
                ball.pos += ball.vel;

                if resolve_airborne(ball, arena, tuning).settled {
                    log::debug!("Ball {} came to rest at x={:.3}", ball.id, ball.pos.x);
                }
            }
        }

        // Edge-detect ring entry; only balls in flight can score
        if ball.thrown() {
            let inside = arena.hoop.contains(ball.pos);
            if inside && !ball.entered_hoop {
                scored.push((ball.id, ball.points(arena), ball.pos));
            }
            ball.entered_hoop = inside;
        } else {
            ball.entered_hoop = false;
        }
    }

    // Scores resolve in ball order so the cooldown gates later entries
    for (ball_id, points, pos) in scored {
        let cooled_down = state
            .last_score_time
            .is_none_or(|t| has_elapsed(now, t, state.tuning.score_cooldown_secs));
        if !cooled_down {
            log::debug!("Ball {} entered the hoop during cooldown", ball_id);
            continue;
        }

        state.score += points;
        state.last_score_time = Some(now);
        state.score_effect.trigger(now, points, pos);
        state.events.push(GameEvent::Scored {
            ball_id,
            points,
            pos,
        });
        log::info!("SCORE! +{} points, total {}", points, state.score);
    }
}

/// Whole seconds left; ends the round at zero
fn update_timer(state: &mut GameState, now: f64) {
    let Some(start) = state.game_start_time else {
        return;
    };
    let elapsed = (now - start).max(0.0).floor() as u32;
    state.time_left = state.tuning.round_secs.saturating_sub(elapsed);

    if state.time_left == 0 {
        end(state);
    }
}
