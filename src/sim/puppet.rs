//! Puppet physics and pose integration
//!
//! One call per frame. Order matters within a frame: horizontal movement,
//! jump impulse, gravity + floor correction, then the limb pass (key-driven
//! swing before relaxation, relaxation before clamping).

use super::state::{Puppet, TickInput, World};
use crate::consts::*;

pub fn integrate(puppet: &mut Puppet, world: &World, input: &TickInput, dt: f32) {
    // Horizontal movement: accelerate while a key is held, otherwise bleed
    // speed off with per-frame friction.
    let mut ax = 0.0;
    if input.left {
        ax -= MOVE_ACCEL;
    }
    if input.right {
        ax += MOVE_ACCEL;
    }
    if ax == 0.0 {
        puppet.vel.x *= RUN_FRICTION;
    } else {
        puppet.vel.x = (puppet.vel.x + ax * dt).clamp(-MAX_RUN_SPEED, MAX_RUN_SPEED);
    }
    puppet.pos.x =
        (puppet.pos.x + puppet.vel.x * dt).clamp(world.left_bound, world.right_bound);

    // Jump fires on the key's rising edge only, and never mid-air
    if input.jump && !puppet.jumping {
        puppet.vel.y = -JUMP_IMPULSE;
        puppet.jumping = true;
    }

    // Gravity applies every frame, grounded or not; the floor correction
    // below cancels it out while standing.
    puppet.vel.y += world.gravity * dt;
    puppet.pos.y += puppet.vel.y * dt;

    let overshoot = puppet.bottom() - world.floor_y;
    if overshoot >= 0.0 {
        puppet.pos.y -= overshoot;
        puppet.vel.y = 0.0;
        puppet.jumping = false;
    }

    if input.reset_pose {
        puppet.reset_pose();
    }

    // Limb pass: swing, then settle (relax + clamp) in that order
    if input.arm_left {
        puppet.arm_l.swing(-ARM_SWING_RATE * dt);
    }
    if input.arm_right {
        puppet.arm_r.swing(ARM_SWING_RATE * dt);
    }
    if input.leg_left {
        puppet.leg_l.swing(-LEG_SWING_RATE * dt);
    }
    if input.leg_right {
        puppet.leg_r.swing(LEG_SWING_RATE * dt);
    }
    puppet.arm_l.settle(dt);
    puppet.arm_r.settle(dt);
    puppet.leg_l.settle(dt);
    puppet.leg_r.settle(dt);
}
