//! Axis-aligned hit boxes and balloon popping

use glam::Vec2;

use super::state::{Balloon, Puppet};
use crate::consts::POP_DELAY;

/// Axis-aligned bounding box in stage coordinates
#[derive(Debug, Clone, Copy)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn centered(center: Vec2, width: f32, height: f32) -> Self {
        let half = Vec2::new(width * 0.5, height * 0.5);
        Self { min: center - half, max: center + half }
    }

    /// Closed-interval overlap on both axes; touching edges count as
    /// intersecting.
    pub fn intersects(&self, other: &Aabb) -> bool {
        !(self.max.x < other.min.x
            || self.min.x > other.max.x
            || self.max.y < other.min.y
            || self.min.y > other.max.y)
    }
}

/// Test every live, not-yet-popped balloon against the puppet's head and
/// hands. A first hit on any region pops the balloon exactly once and starts
/// its pop-animation timer. Returns the number of balloons popped this frame.
pub fn pop_balloons(puppet: &Puppet, balloons: &mut [Balloon]) -> u32 {
    let regions = [puppet.head_box(), puppet.hand_l_box(), puppet.hand_r_box()];

    let mut popped = 0;
    for balloon in balloons.iter_mut() {
        if balloon.popped {
            continue;
        }
        let hit_box = balloon.hit_box();
        if regions.iter().any(|region| hit_box.intersects(region)) {
            balloon.popped = true;
            balloon.pop_timer = POP_DELAY;
            popped += 1;
        }
    }
    popped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::state::{BalloonColor, World};

    fn balloon_at(pos: Vec2) -> Balloon {
        Balloon {
            id: 1,
            pos,
            vel: Vec2::new(0.0, -100.0),
            rot_amplitude: 0.0,
            color: BalloonColor::Default,
            popped: false,
            pop_timer: 0.0,
        }
    }

    #[test]
    fn test_overlap_and_separation() {
        let a = Aabb::centered(Vec2::new(0.0, 0.0), 10.0, 10.0);
        let b = Aabb::centered(Vec2::new(8.0, 0.0), 10.0, 10.0);
        let c = Aabb::centered(Vec2::new(20.0, 0.0), 8.0, 8.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_touching_edges_intersect() {
        let a = Aabb::centered(Vec2::new(0.0, 0.0), 10.0, 10.0);
        let b = Aabb::centered(Vec2::new(10.0, 0.0), 10.0, 10.0);
        assert!(a.intersects(&b));
    }

    #[test]
    fn test_pop_on_head_contact() {
        let world = World::new(1280.0, 800.0);
        let puppet = Puppet::new(&world);
        let mut balloons = vec![balloon_at(puppet.head_center())];

        let popped = pop_balloons(&puppet, &mut balloons);
        assert_eq!(popped, 1);
        assert!(balloons[0].popped);
        assert!((balloons[0].pop_timer - POP_DELAY).abs() < f32::EPSILON);
    }

    #[test]
    fn test_pop_is_idempotent() {
        let world = World::new(1280.0, 800.0);
        let puppet = Puppet::new(&world);
        let mut balloons = vec![balloon_at(puppet.hand_l_center())];

        assert_eq!(pop_balloons(&puppet, &mut balloons), 1);
        // Still overlapping on the next frame, but already popped
        assert_eq!(pop_balloons(&puppet, &mut balloons), 0);
        assert_eq!(pop_balloons(&puppet, &mut balloons), 0);
    }

    #[test]
    fn test_no_pop_when_clear_of_puppet() {
        let world = World::new(1280.0, 800.0);
        let puppet = Puppet::new(&world);
        let far = Vec2::new(
            puppet.pos.x + PUPPET_WIDTH + BALLOON_WIDTH + ARM_LENGTH + 50.0,
            puppet.pos.y,
        );
        let mut balloons = vec![balloon_at(far)];
        assert_eq!(pop_balloons(&puppet, &mut balloons), 0);
        assert!(!balloons[0].popped);
    }
}
