//! Collision targets and resolution outcomes.

use crate::components::bounds::Bounds;

/// Something an actor can be resolved against: one box or a group of boxes.
#[derive(Debug, Clone, Copy)]
pub enum CollisionTarget<'a> {
    Single(&'a Bounds),
    Group(&'a [Bounds]),
}

impl<'a> CollisionTarget<'a> {
    /// Every box in the target.
    pub fn members(&self) -> &'a [Bounds] {
        match *self {
            CollisionTarget::Single(bounds) => std::slice::from_ref(bounds),
            CollisionTarget::Group(group) => group,
        }
    }
}

impl<'a> From<&'a Bounds> for CollisionTarget<'a> {
    fn from(bounds: &'a Bounds) -> Self {
        CollisionTarget::Single(bounds)
    }
}

impl<'a> From<&'a [Bounds]> for CollisionTarget<'a> {
    fn from(group: &'a [Bounds]) -> Self {
        CollisionTarget::Group(group)
    }
}

/// How far a resolution moved the actor on each axis. Zero when nothing overlapped.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Displacement {
    pub x: f32,
    pub y: f32,
}

impl Displacement {
    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    pub fn collided(&self) -> Collided {
        Collided {
            x: self.x != 0.0,
            y: self.y != 0.0,
        }
    }
}

/// Axes on which a collision pass displaced the actor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Collided {
    pub x: bool,
    pub y: bool,
}

impl Collided {
    pub fn any(&self) -> bool {
        self.x || self.y
    }
}

impl std::ops::BitOrAssign for Collided {
    fn bitor_assign(&mut self, rhs: Self) {
        self.x |= rhs.x;
        self.y |= rhs.y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_and_group_members() {
        let a = Bounds::new(0.0, 0.0, 1.0, 1.0);
        let group = [a, Bounds::new(5.0, 5.0, 1.0, 1.0)];
        assert_eq!(CollisionTarget::from(&a).members().len(), 1);
        assert_eq!(CollisionTarget::from(&group[..]).members().len(), 2);
    }

    #[test]
    fn collided_flags_or_together() {
        let mut acc = Collided::default();
        acc |= Displacement { x: 0.0, y: -2.0 }.collided();
        acc |= Displacement { x: 1.0, y: 0.0 }.collided();
        assert_eq!(acc, Collided { x: true, y: true });
    }
}
