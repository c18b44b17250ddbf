//! Game state and core simulation types

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::Aabb;
use super::strings::StringSet;
use crate::consts::*;
use crate::swing_offset;

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Active gameplay, countdown running
    Playing,
    /// Countdown expired; gameplay frozen until restart
    Over,
}

/// Input snapshot for a single frame
///
/// Held flags mirror the keyboard state at the start of the frame; the
/// one-shot flags (`jump`, `reset_pose`) are set on key press and cleared by
/// the caller after the frame is processed, so they fire on the rising edge
/// only.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub arm_left: bool,
    pub arm_right: bool,
    pub leg_left: bool,
    pub leg_right: bool,
    /// Jump (one-shot)
    pub jump: bool,
    /// Snap limbs back to rest (one-shot)
    pub reset_pose: bool,
}

/// Static stage geometry plus the shared wall clock
#[derive(Debug, Clone)]
pub struct World {
    /// Downward acceleration on the puppet (px/s^2); fixed after creation
    pub gravity: f32,
    pub width: f32,
    pub height: f32,
    /// Top edge of the floor element; the puppet stands on this line
    pub floor_y: f32,
    pub left_bound: f32,
    pub right_bound: f32,
    /// Rig point the head string hangs from (stage coordinates)
    pub rig_anchor: Vec2,
    /// Seconds since world creation; drives the shared balloon oscillator
    pub elapsed: f32,
}

impl World {
    pub fn new(width: f32, height: f32) -> Self {
        let mut world = Self {
            gravity: GRAVITY,
            width: 0.0,
            height: 0.0,
            floor_y: 0.0,
            left_bound: 0.0,
            right_bound: 0.0,
            rig_anchor: Vec2::ZERO,
            elapsed: 0.0,
        };
        world.resize(width, height, height - 64.0, Vec2::new(width * 0.5, 70.0));
        world
    }

    /// Recompute bounds from new viewport measurements. Called on startup and
    /// whenever the viewport resizes; `elapsed` is untouched.
    pub fn resize(&mut self, width: f32, height: f32, floor_y: f32, rig_anchor: Vec2) {
        self.width = width;
        self.height = height;
        self.floor_y = floor_y;
        self.left_bound = BOUND_INSET;
        self.right_bound = width - BOUND_INSET;
        self.rig_anchor = rig_anchor;
    }
}

/// One limb angle with its rest pose and anatomical limit
#[derive(Debug, Clone, Copy)]
pub struct Limb {
    /// Current angle (degrees, relative to straight down)
    pub angle: f32,
    /// Angle the limb drifts back to when its key is released
    pub rest: f32,
    /// Symmetric clamp: angle stays within [-limit, limit]
    pub limit: f32,
}

impl Limb {
    pub fn new(rest: f32, limit: f32) -> Self {
        Self { angle: rest, rest, limit }
    }

    /// Key-driven swing for this frame
    pub fn swing(&mut self, degrees: f32) {
        self.angle += degrees;
    }

    /// Drift back toward the rest angle, then clamp. Must run after the
    /// key-driven swing: the relaxation is allowed to partially cancel input
    /// applied earlier in the same frame.
    pub fn settle(&mut self, dt: f32) {
        self.angle += (self.rest - self.angle) * LIMB_RELAX_RATE * dt;
        self.angle = self.angle.clamp(-self.limit, self.limit);
    }

    pub fn reset(&mut self) {
        self.angle = self.rest;
    }
}

/// The player-controlled marionette
///
/// `pos` is the top-left anchor of the bounding container; hit boxes and
/// string endpoints are derived from it plus the current limb angles.
#[derive(Debug, Clone)]
pub struct Puppet {
    pub pos: Vec2,
    pub vel: Vec2,
    pub jumping: bool,
    pub arm_l: Limb,
    pub arm_r: Limb,
    pub leg_l: Limb,
    pub leg_r: Limb,
}

impl Puppet {
    pub fn new(world: &World) -> Self {
        Self {
            pos: Vec2::new(world.width * 0.5, world.height * 0.38),
            vel: Vec2::ZERO,
            jumping: false,
            arm_l: Limb::new(ARM_L_REST, ARM_LIMIT),
            arm_r: Limb::new(ARM_R_REST, ARM_LIMIT),
            leg_l: Limb::new(LEG_L_REST, LEG_LIMIT),
            leg_r: Limb::new(LEG_R_REST, LEG_LIMIT),
        }
    }

    /// Snap all four limbs back to their rest pose
    pub fn reset_pose(&mut self) {
        self.arm_l.reset();
        self.arm_r.reset();
        self.leg_l.reset();
        self.leg_r.reset();
    }

    /// Bottom edge of the bounding container (floor contact line)
    pub fn bottom(&self) -> f32 {
        self.pos.y + PUPPET_HEIGHT
    }

    pub fn head_center(&self) -> Vec2 {
        Vec2::new(self.pos.x + PUPPET_WIDTH * 0.5, self.pos.y + HEAD_SIZE * 0.5)
    }

    fn shoulder(&self, spread: f32) -> Vec2 {
        Vec2::new(
            self.pos.x + PUPPET_WIDTH * 0.5 + spread,
            self.pos.y + SHOULDER_DROP,
        )
    }

    /// Left hand center, following the left arm swing
    pub fn hand_l_center(&self) -> Vec2 {
        self.shoulder(-SHOULDER_SPREAD) + swing_offset(self.arm_l.angle, ARM_LENGTH)
    }

    /// Right hand center, following the right arm swing
    pub fn hand_r_center(&self) -> Vec2 {
        self.shoulder(SHOULDER_SPREAD) + swing_offset(self.arm_r.angle, ARM_LENGTH)
    }

    pub fn head_box(&self) -> Aabb {
        Aabb::centered(self.head_center(), HEAD_SIZE, HEAD_SIZE)
    }

    pub fn hand_l_box(&self) -> Aabb {
        Aabb::centered(self.hand_l_center(), HAND_SIZE, HAND_SIZE)
    }

    pub fn hand_r_box(&self) -> Aabb {
        Aabb::centered(self.hand_r_center(), HAND_SIZE, HAND_SIZE)
    }
}

/// Balloon color variant; maps onto the stylesheet's balloon classes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalloonColor {
    Default,
    Color2,
    Color3,
}

impl BalloonColor {
    /// Extra CSS class for this variant, if any
    pub fn css_class(&self) -> Option<&'static str> {
        match self {
            BalloonColor::Default => None,
            BalloonColor::Color2 => Some("color2"),
            BalloonColor::Color3 => Some("color3"),
        }
    }
}

/// A balloon entity
#[derive(Debug, Clone)]
pub struct Balloon {
    pub id: u32,
    /// Center position
    pub pos: Vec2,
    pub vel: Vec2,
    /// Visual wobble amplitude (degrees)
    pub rot_amplitude: f32,
    pub color: BalloonColor,
    /// Set exactly once; a popped balloon can never score again
    pub popped: bool,
    /// Remaining pop-animation time once popped (seconds)
    pub pop_timer: f32,
}

impl Balloon {
    pub fn hit_box(&self) -> Aabb {
        Aabb::centered(self.pos, BALLOON_WIDTH, BALLOON_HEIGHT)
    }

    /// Visual rotation at wall time `t`: shared oscillator, per-balloon
    /// amplitude only
    pub fn rotation(&self, t: f32) -> f32 {
        self.rot_amplitude * (t * OSC_FREQ).sin()
    }
}

/// Complete game state (deterministic from seed + inputs)
#[derive(Debug, Clone)]
pub struct GameState {
    pub seed: u64,
    pub rng: Pcg32,
    pub world: World,
    pub puppet: Puppet,
    /// Live balloons, in spawn (= id) order
    pub balloons: Vec<Balloon>,
    pub score: u32,
    /// Whole seconds remaining in the round
    pub time_left: u32,
    pub phase: Phase,
    /// Seconds until the next balloon spawn
    pub spawn_timer: f32,
    /// String geometry recomputed every frame, also while `Over`
    pub strings: StringSet,
    next_id: u32,
}

impl GameState {
    pub fn new(seed: u64, width: f32, height: f32) -> Self {
        let world = World::new(width, height);
        let puppet = Puppet::new(&world);
        let strings = super::strings::string_set(&world, &puppet);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            world,
            puppet,
            balloons: Vec::new(),
            score: 0,
            time_left: ROUND_SECONDS,
            phase: Phase::Playing,
            spawn_timer: 0.0,
            strings,
            next_id: 1,
        }
    }

    /// Allocate a new balloon ID
    pub fn next_balloon_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Restart after game over: round-scoped fields only. The puppet keeps
    /// its position and the frame loop keeps running.
    pub fn restart(&mut self) {
        self.balloons.clear();
        self.spawn_timer = 0.0;
        self.score = 0;
        self.time_left = ROUND_SECONDS;
        self.phase = Phase::Playing;
        log::info!("round restarted");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limb_settle_clamps_to_limit() {
        let mut arm = Limb::new(ARM_L_REST, ARM_LIMIT);
        arm.angle = 500.0;
        arm.settle(0.016);
        assert!(arm.angle <= ARM_LIMIT);
        arm.angle = -500.0;
        arm.settle(0.016);
        assert!(arm.angle >= -ARM_LIMIT);
    }

    #[test]
    fn hands_follow_arm_swing() {
        let world = World::new(1280.0, 800.0);
        let mut puppet = Puppet::new(&world);
        let at_rest = puppet.hand_r_center();
        puppet.arm_r.angle = -90.0;
        let raised = puppet.hand_r_center();
        // Raising the right arm lifts the hand and moves it sideways
        assert!(raised.y < at_rest.y);
        assert!((raised.x - at_rest.x).abs() > 1.0);
    }

    #[test]
    fn restart_clears_round_state_only() {
        let mut state = GameState::new(7, 1280.0, 800.0);
        state.score = 12;
        state.time_left = 0;
        state.phase = Phase::Over;
        state.puppet.pos.x = 333.0;
        let id = state.next_balloon_id();
        state.balloons.push(Balloon {
            id,
            pos: Vec2::new(100.0, 100.0),
            vel: Vec2::new(0.0, -100.0),
            rot_amplitude: 2.0,
            color: BalloonColor::Default,
            popped: false,
            pop_timer: 0.0,
        });

        state.restart();

        assert_eq!(state.score, 0);
        assert_eq!(state.time_left, ROUND_SECONDS);
        assert_eq!(state.phase, Phase::Playing);
        assert!(state.balloons.is_empty());
        // Puppet position survives a restart
        assert_eq!(state.puppet.pos.x, 333.0);
    }
}
