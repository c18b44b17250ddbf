//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame steps clamped to a fixed maximum
//! - Seeded RNG only
//! - Stable iteration order (by balloon ID)
//! - No rendering or platform dependencies

pub mod balloon;
pub mod collision;
pub mod puppet;
pub mod state;
pub mod strings;
pub mod tick;

pub use collision::{Aabb, pop_balloons};
pub use state::{
    Balloon, BalloonColor, GameState, Limb, Phase, Puppet, TickInput, World,
};
pub use strings::{StringLine, StringSet, string_set};
pub use tick::{second_tick, tick};
