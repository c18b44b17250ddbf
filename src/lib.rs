//! Puppet Pop - a marionette balloon-popping arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, pose, balloons, scoring)
//! - `render`: DOM renderer (syncs simulation state to the page)

#[cfg(target_arch = "wasm32")]
pub mod render;
pub mod sim;

/// Game configuration constants
pub mod consts {
    /// Largest frame step fed to the simulation (seconds). Bigger frames
    /// (tab switch, stall) are clamped so physics never explodes.
    pub const MAX_FRAME_DT: f32 = 0.033;

    /// Downward acceleration on the puppet (px/s^2)
    pub const GRAVITY: f32 = 1650.0;
    /// Horizontal acceleration per held movement key (px/s^2)
    pub const MOVE_ACCEL: f32 = 360.0;
    /// Horizontal speed clamp (px/s)
    pub const MAX_RUN_SPEED: f32 = 400.0;
    /// Per-frame velocity decay while no movement key is held
    pub const RUN_FRICTION: f32 = 0.85;
    /// Upward jump impulse (px/s)
    pub const JUMP_IMPULSE: f32 = 650.0;
    /// Inset of the horizontal movement bounds from the viewport edges
    pub const BOUND_INSET: f32 = 10.0;

    /// Arm swing rate while a limb key is held (degrees/s)
    pub const ARM_SWING_RATE: f32 = 150.0;
    /// Leg swing rate while a limb key is held (degrees/s)
    pub const LEG_SWING_RATE: f32 = 120.0;
    /// Return-to-rest factor for limb angles (fraction of the remaining
    /// distance per second)
    pub const LIMB_RELAX_RATE: f32 = 0.6;
    /// Arm angle limit (degrees, symmetric)
    pub const ARM_LIMIT: f32 = 110.0;
    /// Leg angle limit (degrees, symmetric)
    pub const LEG_LIMIT: f32 = 60.0;
    /// Rest angles (degrees, relative to straight down)
    pub const ARM_L_REST: f32 = 10.0;
    pub const ARM_R_REST: f32 = -10.0;
    pub const LEG_L_REST: f32 = 4.0;
    pub const LEG_R_REST: f32 = -4.0;

    /// Puppet bounding container
    pub const PUPPET_WIDTH: f32 = 120.0;
    pub const PUPPET_HEIGHT: f32 = 190.0;
    /// Head hit box (square, centered horizontally at the container top)
    pub const HEAD_SIZE: f32 = 56.0;
    /// Shoulder pivot: vertical offset from the container top
    pub const SHOULDER_DROP: f32 = 64.0;
    /// Shoulder pivot: horizontal offset from the container center
    pub const SHOULDER_SPREAD: f32 = 26.0;
    /// Shoulder-to-hand distance along the arm
    pub const ARM_LENGTH: f32 = 62.0;
    /// Hand hit box (square, centered on the hand)
    pub const HAND_SIZE: f32 = 22.0;

    /// Balloon hit box, centered on the balloon position
    pub const BALLOON_WIDTH: f32 = 52.0;
    pub const BALLOON_HEIGHT: f32 = 64.0;
    /// Horizontal spawn inset from the viewport edges
    pub const BALLOON_SPAWN_INSET: f32 = 60.0;
    /// Balloons above this y have left the viewport and get removed
    pub const BALLOON_DESPAWN_Y: f32 = -60.0;
    /// Upward launch speed range (px/s, negative is up)
    pub const BALLOON_RISE_SPEED: (f32, f32) = (-130.0, -80.0);
    /// Horizontal drift range (px/s)
    pub const BALLOON_DRIFT_SPEED: (f32, f32) = (-20.0, 20.0);
    /// Rotation amplitude range (degrees)
    pub const BALLOON_ROT_AMPLITUDE: (f32, f32) = (-4.0, 4.0);
    /// Spawn interval range (seconds)
    pub const BALLOON_SPAWN_INTERVAL: (f32, f32) = (0.9, 1.8);
    /// Shared bob/rotation oscillator frequency (rad/s of wall time)
    pub const OSC_FREQ: f32 = 2.0;
    /// Sway magnitude (px) before the drift factor
    pub const SWAY_AMPLITUDE: f32 = 10.0;
    /// Fraction of the sway fed into horizontal motion
    pub const SWAY_DRIFT_FACTOR: f32 = 0.4;
    /// Position-dependent phase: radians of oscillator phase per px of x
    pub const SWAY_X_PHASE: f32 = 0.01;
    /// Pop animation window before a popped balloon is removed (seconds)
    pub const POP_DELAY: f32 = 0.22;

    /// Round length (seconds)
    pub const ROUND_SECONDS: u32 = 60;

    /// Hand string anchors sit this far to either side of the rig anchor
    pub const STRING_SPREAD: f32 = 120.0;
    /// Head string targets this far above the head center
    pub const HEAD_STRING_LIFT: f32 = 28.0;
}

/// Degrees to radians
#[inline]
pub fn deg_to_rad(deg: f32) -> f32 {
    deg * std::f32::consts::PI / 180.0
}

/// Rotate the straight-down unit vector clockwise by `deg` degrees and scale
/// by `len`, in screen coordinates (y grows downward). This matches how a CSS
/// `rotate()` on a hanging limb moves its tip.
#[inline]
pub fn swing_offset(deg: f32, len: f32) -> glam::Vec2 {
    let rad = deg_to_rad(deg);
    glam::Vec2::new(-len * rad.sin(), len * rad.cos())
}
