//! Per-frame simulation step and the independent one-second countdown

use super::state::{GameState, Phase, TickInput};
use super::{balloon, collision, puppet, strings};
use crate::consts::MAX_FRAME_DT;

/// Advance the simulation by one frame.
///
/// `dt` is the elapsed wall time since the previous frame; it is clamped so a
/// stalled tab cannot produce a huge physics step. Fixed order while playing:
/// physics/pose, balloon spawn, balloon motion, collision/scoring, string
/// geometry. Once the round is over only the string geometry keeps updating.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    let dt = dt.min(MAX_FRAME_DT);
    state.world.elapsed += dt;

    if state.phase == Phase::Playing {
        puppet::integrate(&mut state.puppet, &state.world, input, dt);
        balloon::spawn_if_due(state, dt);
        balloon::update(state, dt);
        state.score += collision::pop_balloons(&state.puppet, &mut state.balloons);
    }

    state.strings = strings::string_set(&state.world, &state.puppet);
}

/// One tick of the countdown timer. Driven by a real one-second interval,
/// independent of the frame clock; a no-op once the round is over.
pub fn second_tick(state: &mut GameState) {
    if state.phase == Phase::Over {
        return;
    }
    state.time_left = state.time_left.saturating_sub(1);
    if state.time_left == 0 {
        state.phase = Phase::Over;
        log::info!("time up, final score {}", state.score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_big_frames_are_clamped() {
        let mut state = GameState::new(1, 1280.0, 800.0);
        tick(&mut state, &TickInput::default(), 2.5);
        assert!((state.world.elapsed - MAX_FRAME_DT).abs() < f32::EPSILON);
    }

    #[test]
    fn test_countdown_reaches_over() {
        let mut state = GameState::new(2, 1280.0, 800.0);
        for _ in 0..ROUND_SECONDS {
            assert_eq!(state.phase, Phase::Playing);
            second_tick(&mut state);
        }
        assert_eq!(state.time_left, 0);
        assert_eq!(state.phase, Phase::Over);

        // Further ticks are no-ops
        second_tick(&mut state);
        assert_eq!(state.time_left, 0);
        assert_eq!(state.phase, Phase::Over);
    }

    #[test]
    fn test_gameplay_freezes_when_over() {
        let mut state = GameState::new(3, 1280.0, 800.0);
        state.phase = Phase::Over;
        let puppet_pos = state.puppet.pos;
        let input = TickInput { right: true, jump: true, ..Default::default() };
        for _ in 0..120 {
            tick(&mut state, &input, DT);
        }
        assert_eq!(state.puppet.pos, puppet_pos);
        assert!(state.balloons.is_empty());
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_strings_update_while_over() {
        let mut state = GameState::new(4, 1280.0, 800.0);
        state.phase = Phase::Over;
        state.puppet.pos.x += 50.0;
        let before = state.strings.head.to;
        tick(&mut state, &TickInput::default(), DT);
        assert_ne!(state.strings.head.to, before);
    }

    #[test]
    fn test_spawner_populates_over_time() {
        let mut state = GameState::new(5, 1280.0, 800.0);
        // 10 simulated seconds; intervals are at most 1.8s apart
        for _ in 0..600 {
            tick(&mut state, &TickInput::default(), DT);
        }
        assert!(state.balloons.len() >= 4);
    }

    #[test]
    fn test_same_seed_same_round() {
        let run = |seed: u64| {
            let mut state = GameState::new(seed, 1280.0, 800.0);
            let input = TickInput { right: true, ..Default::default() };
            for _ in 0..600 {
                tick(&mut state, &input, DT);
            }
            (
                state.balloons.iter().map(|b| b.id).collect::<Vec<_>>(),
                state.puppet.pos,
            )
        };
        assert_eq!(run(99), run(99));
    }
}
