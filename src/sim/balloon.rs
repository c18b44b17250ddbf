//! Balloon spawning, motion and despawn

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{Balloon, BalloonColor, GameState, World};
use crate::consts::*;

/// Build one balloon with randomized attributes, launched from just below the
/// visible floor.
pub fn spawn(world: &World, rng: &mut Pcg32, id: u32) -> Balloon {
    // Degenerate viewports (pre-layout) collapse the spawn band to a point
    let max_x = (world.width - BALLOON_SPAWN_INSET).max(BALLOON_SPAWN_INSET + 1.0);
    let x = rng.random_range(BALLOON_SPAWN_INSET..max_x);
    let y = world.height + 40.0 + rng.random_range(0.0..120.0);

    // Two threshold comparisons, three equally likely bins
    let pick: f32 = rng.random();
    let color = if pick < 0.33 {
        BalloonColor::Color2
    } else if pick < 0.66 {
        BalloonColor::Color3
    } else {
        BalloonColor::Default
    };

    Balloon {
        id,
        pos: Vec2::new(x, y),
        vel: Vec2::new(
            rng.random_range(BALLOON_DRIFT_SPEED.0..BALLOON_DRIFT_SPEED.1),
            rng.random_range(BALLOON_RISE_SPEED.0..BALLOON_RISE_SPEED.1),
        ),
        rot_amplitude: rng.random_range(BALLOON_ROT_AMPLITUDE.0..BALLOON_ROT_AMPLITUDE.1),
        color,
        popped: false,
        pop_timer: 0.0,
    }
}

/// Tick the spawn timer; when it elapses, add one balloon and re-arm with a
/// random interval.
pub fn spawn_if_due(state: &mut GameState, dt: f32) {
    state.spawn_timer -= dt;
    if state.spawn_timer > 0.0 {
        return;
    }
    let id = state.next_balloon_id();
    let balloon = spawn(&state.world, &mut state.rng, id);
    state.balloons.push(balloon);
    state.spawn_timer = state
        .rng
        .random_range(BALLOON_SPAWN_INTERVAL.0..BALLOON_SPAWN_INTERVAL.1);
}

/// Advance every live balloon and drop the ones that are done.
///
/// The sway term samples a single shared oscillator at the balloon's current
/// x, so all balloons bob in loose unison rather than with per-balloon phase.
/// Removal happens for balloons past the top of the viewport (popped or not)
/// and for popped balloons whose pop-animation window has run out.
pub fn update(state: &mut GameState, dt: f32) {
    let t = state.world.elapsed;
    for balloon in &mut state.balloons {
        let sway = SWAY_AMPLITUDE * (t * OSC_FREQ + balloon.pos.x * SWAY_X_PHASE).sin();
        balloon.pos.x += (balloon.vel.x + sway * SWAY_DRIFT_FACTOR) * dt;
        balloon.pos.y += balloon.vel.y * dt;
        if balloon.popped {
            balloon.pop_timer -= dt;
        }
    }
    state
        .balloons
        .retain(|b| b.pos.y >= BALLOON_DESPAWN_Y && !(b.popped && b.pop_timer <= 0.0));
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_spawn_attributes_in_range() {
        let world = World::new(1280.0, 800.0);
        let mut rng = Pcg32::seed_from_u64(42);
        for id in 0..200 {
            let b = spawn(&world, &mut rng, id);
            assert!(b.pos.x >= BALLOON_SPAWN_INSET);
            assert!(b.pos.x <= world.width - BALLOON_SPAWN_INSET);
            assert!(b.pos.y >= world.height + 40.0);
            assert!(b.vel.y >= BALLOON_RISE_SPEED.0 && b.vel.y < BALLOON_RISE_SPEED.1);
            assert!(b.vel.x >= BALLOON_DRIFT_SPEED.0 && b.vel.x < BALLOON_DRIFT_SPEED.1);
            assert!(b.rot_amplitude.abs() <= 4.0);
            assert!(!b.popped);
        }
    }

    #[test]
    fn test_spawner_rearms_within_interval() {
        let mut state = GameState::new(1, 1280.0, 800.0);
        spawn_if_due(&mut state, 0.016);
        assert_eq!(state.balloons.len(), 1);
        assert!(state.spawn_timer >= BALLOON_SPAWN_INTERVAL.0);
        assert!(state.spawn_timer < BALLOON_SPAWN_INTERVAL.1);

        // Not due again until the timer runs down
        spawn_if_due(&mut state, 0.016);
        assert_eq!(state.balloons.len(), 1);
        spawn_if_due(&mut state, BALLOON_SPAWN_INTERVAL.1);
        assert_eq!(state.balloons.len(), 2);
    }

    #[test]
    fn test_balloons_rise_and_despawn_off_top() {
        let mut state = GameState::new(3, 1280.0, 800.0);
        let id = state.next_balloon_id();
        let mut b = spawn(&state.world, &mut state.rng, id);
        b.pos.y = BALLOON_DESPAWN_Y + 5.0;
        b.vel.y = -100.0;
        state.balloons.push(b);

        update(&mut state, 0.016);
        assert_eq!(state.balloons.len(), 1);
        assert!(state.balloons[0].pos.y < BALLOON_DESPAWN_Y + 5.0);

        // Enough frames to cross the despawn line
        for _ in 0..240 {
            update(&mut state, 0.016);
        }
        assert!(state.balloons.is_empty());
    }

    #[test]
    fn test_popped_balloon_removed_after_delay() {
        let mut state = GameState::new(4, 1280.0, 800.0);
        let id = state.next_balloon_id();
        let mut b = spawn(&state.world, &mut state.rng, id);
        b.pos.y = 300.0;
        b.popped = true;
        b.pop_timer = POP_DELAY;
        state.balloons.push(b);

        // Survives the animation window...
        for _ in 0..13 {
            update(&mut state, 0.016);
        }
        assert_eq!(state.balloons.len(), 1);
        // ...and is gone once it has elapsed
        for _ in 0..3 {
            update(&mut state, 0.016);
        }
        assert!(state.balloons.is_empty());
    }

    #[test]
    fn test_off_top_removal_ignores_popped_state() {
        let mut state = GameState::new(5, 1280.0, 800.0);
        let id = state.next_balloon_id();
        let mut b = spawn(&state.world, &mut state.rng, id);
        b.pos.y = BALLOON_DESPAWN_Y - 1.0;
        b.popped = true;
        b.pop_timer = POP_DELAY; // animation window still open
        state.balloons.push(b);

        update(&mut state, 0.016);
        assert!(state.balloons.is_empty());
    }
}
