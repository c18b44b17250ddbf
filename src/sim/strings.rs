//! Marionette string geometry
//!
//! Pure per-frame recomputation: three segments from the fixed rig anchors to
//! the current head/hand positions. Nothing here persists between frames, so
//! the result is always correct from the current pose alone.

use glam::Vec2;

use super::state::{Puppet, World};
use crate::consts::{HEAD_STRING_LIFT, STRING_SPREAD};

/// One string segment in stage coordinates
#[derive(Debug, Clone, Copy)]
pub struct StringLine {
    pub from: Vec2,
    pub to: Vec2,
}

/// The three strings of the rig
#[derive(Debug, Clone, Copy)]
pub struct StringSet {
    pub head: StringLine,
    pub left: StringLine,
    pub right: StringLine,
}

/// Compute all three strings. The head string hangs from the rig anchor and
/// targets the top of the head; the hand strings hang from points offset to
/// either side at the same height.
pub fn string_set(world: &World, puppet: &Puppet) -> StringSet {
    let rig = world.rig_anchor;
    let spread = Vec2::new(STRING_SPREAD, 0.0);

    StringSet {
        head: StringLine {
            from: rig,
            to: puppet.head_center() - Vec2::new(0.0, HEAD_STRING_LIFT),
        },
        left: StringLine {
            from: rig - spread,
            to: puppet.hand_l_center(),
        },
        right: StringLine {
            from: rig + spread,
            to: puppet.hand_r_center(),
        },
    }
}
