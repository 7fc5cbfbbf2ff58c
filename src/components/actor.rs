//! Actor behavior over borrowed components.
//!
//! An actor is any entity with [`Bounds`] and [`Kinematics`]; adding a
//! [`Gravity`] component turns it into a platformer body. [`ActorMut`] borrows
//! those components mutably and implements the per-step motion and collision
//! rules, so the same code runs on ECS query items and on plain locals in
//! tests.
//!
//! One physics step of an actor is:
//!
//! 1. [`ActorMut::update`]: record the previous position, follow the pointer
//!    when dragged, otherwise turn input into velocity, accrue gravity,
//!    integrate and clamp to the world, then damp.
//! 2. [`ActorMut::collide_solid`] against every solid: push out along the
//!    axis of least penetration, stop momentum on the hit side, and land
//!    when standing on a top edge.
//! 3. [`ActorMut::check_support`]: a grounded actor with nothing under it
//!    starts falling.

use crate::components::bounds::Bounds;
use crate::components::collision::{Collided, CollisionTarget, Displacement};
use crate::components::gravity::Gravity;
use crate::components::intent::Directions;
use crate::components::kinematics::{Facing, Kinematics};
use crate::resources::tuning::Tuning;
use crate::resources::worldsize::WorldSize;

/// Inputs shared by every actor during one physics step.
#[derive(Debug, Clone, Copy)]
pub struct StepContext {
    /// Sub-step length in seconds.
    pub delta: f32,
    /// Simulated time at this sub-step, in seconds.
    pub now: f32,
    pub world: WorldSize,
    pub tuning: Tuning,
}

/// Mutable view over the components that make up an actor.
pub struct ActorMut<'a> {
    pub bounds: &'a mut Bounds,
    pub motion: &'a mut Kinematics,
    pub gravity: Option<&'a mut Gravity>,
}

/// Bottom edge within `tolerance` of the top of `other`, allowing for the
/// rounding of a push that left exactly `tolerance` of gap.
fn rests_on(bounds: &Bounds, other: &Bounds, tolerance: f32) -> bool {
    let slack = f32::EPSILON * other.y.abs().max(1.0);
    bounds.overlaps_x(other) && (bounds.bottom() - other.y).abs() <= tolerance + slack
}

impl<'a> ActorMut<'a> {
    pub fn new(
        bounds: &'a mut Bounds,
        motion: &'a mut Kinematics,
        gravity: Option<&'a mut Gravity>,
    ) -> Self {
        Self {
            bounds,
            motion,
            gravity,
        }
    }

    /// Gravity policy: present and switched on.
    pub fn gravity_enabled(&self) -> bool {
        self.gravity.as_deref().is_some_and(|g| g.enabled)
    }

    pub fn in_air(&self) -> bool {
        self.gravity.as_deref().is_some_and(|g| g.enabled && g.in_air)
    }

    /// One physics step. `drag_to` is the top-left corner to jump to while
    /// the actor is carried by the pointer.
    pub fn update(&mut self, directions: Directions, drag_to: Option<(f32, f32)>, ctx: &StepContext) {
        self.motion.record_position(self.bounds);

        if let Some((x, y)) = drag_to {
            self.bounds.x = x;
            self.bounds.y = y;
            self.motion.x_velocity = 0.0;
            self.motion.y_velocity = 0.0;
            self.motion.x_acceleration = 0.0;
            self.motion.y_acceleration = 0.0;
            self.motion.moving = None;
            return;
        }

        self.process_input(directions, ctx.now);
        if self.in_air() {
            self.motion.y_acceleration += ctx.tuning.gravity;
        }
        self.move_step(ctx);

        self.motion.moving = Facing::of(self.motion.x_velocity);
        if self.motion.moving.is_some() {
            self.motion.facing = self.motion.moving;
        }
        let moving = self.motion.moving;
        if let Some(g) = self.gravity.as_deref_mut() {
            if !g.in_air {
                g.last_moved = moving;
            }
        }

        self.damp_velocity(ctx.delta);
    }

    /// Turn direction tokens into velocity changes and jumps.
    ///
    /// Without gravity every direction drives its axis at `move_speed`. Under
    /// gravity, UP and JUMP jump, and airborne horizontal speed blends the
    /// take-off momentum with steering by `air_control`.
    pub fn process_input(&mut self, directions: Directions, now: f32) {
        let speed = self.motion.move_speed;
        let horizontal = directions.horizontal();

        match self.gravity.as_deref_mut() {
            Some(g) if g.enabled => {
                let wants_jump = directions.wants_jump();
                if !wants_jump {
                    g.jump_key_held = false;
                }
                if wants_jump && g.can_jump(now) {
                    g.jump(
                        self.motion,
                        now,
                        directions.contains(Directions::LEFT),
                        directions.contains(Directions::RIGHT),
                    );
                }

                if g.in_air {
                    let momentum = g.momentum();
                    if momentum != 0.0 || horizontal != 0.0 {
                        self.motion.x_velocity = speed
                            * (momentum * (1.0 - g.air_control) + horizontal * g.air_control);
                    }
                } else if horizontal != 0.0 {
                    self.motion.x_velocity = horizontal * speed;
                }
            }
            _ => {
                let vertical = directions.vertical();
                if horizontal != 0.0 {
                    self.motion.x_velocity = horizontal * speed;
                }
                if vertical != 0.0 {
                    self.motion.y_velocity = vertical * speed;
                }
            }
        }
    }

    /// Midpoint integration followed by the world clamp.
    pub fn move_step(&mut self, ctx: &StepContext) {
        let gravity = self.gravity_enabled();
        self.motion.integrate(self.bounds, ctx.delta, gravity);
        if self.motion.stay_in_world {
            self.stay_in_world(ctx.world);
        }
    }

    /// Clamp into the world. Reaching the bottom edge lands a gravity actor.
    pub fn stay_in_world(&mut self, world: WorldSize) {
        let max_x = (world.width - self.bounds.width).max(0.0);
        let max_y = (world.height - self.bounds.height).max(0.0);
        self.bounds.x = self.bounds.x.clamp(0.0, max_x);

        if self.bounds.y < 0.0 {
            self.bounds.y = 0.0;
        } else if self.bounds.y >= max_y {
            self.bounds.y = max_y;
            if self.gravity_enabled() && self.motion.y_velocity >= 0.0 {
                self.stop_falling();
            }
        }
    }

    pub fn damp_velocity(&mut self, delta: f32) {
        let gravity = self.gravity_enabled();
        self.motion.damp(delta, gravity);
    }

    /// Bottom edge within `tolerance` of the world floor.
    pub fn on_floor(&self, world: WorldSize, tolerance: f32) -> bool {
        self.bounds.bottom() >= world.height - tolerance
    }

    /// Push the actor out of `other` along the axis of smaller penetration.
    ///
    /// Ties go to X. Returns a zero displacement and changes nothing when the
    /// boxes do not overlap.
    pub fn move_outside(&mut self, other: &Bounds, tuning: &Tuning) -> Displacement {
        if !self.bounds.overlaps(other) {
            return Displacement::default();
        }
        let (pen_x, pen_y) = self.bounds.penetration(other);
        let mut displacement = Displacement::default();
        if pen_x <= pen_y {
            displacement.x = self.move_outside_x(other, tuning.epsilon_x);
            displacement.y = self.move_outside_y(other, tuning.epsilon_y);
        } else {
            displacement.y = self.move_outside_y(other, tuning.epsilon_y);
            displacement.x = self.move_outside_x(other, tuning.epsilon_x);
        }
        displacement
    }

    /// Move to the near horizontal side of `other`, `epsilon` clear of it.
    pub fn move_outside_x(&mut self, other: &Bounds, epsilon: f32) -> f32 {
        if !self.bounds.overlaps(other) {
            return 0.0;
        }
        let target = if self.bounds.center_x() < other.center_x() {
            other.x - self.bounds.width - epsilon
        } else {
            other.right() + epsilon
        };
        let dx = target - self.bounds.x;
        self.bounds.x = target;
        dx
    }

    /// Move to the near vertical side of `other`, `epsilon` clear of it.
    pub fn move_outside_y(&mut self, other: &Bounds, epsilon: f32) -> f32 {
        if !self.bounds.overlaps(other) {
            return 0.0;
        }
        let target = if self.bounds.center_y() < other.center_y() {
            other.y - self.bounds.height - epsilon
        } else {
            other.bottom() + epsilon
        };
        let dy = target - self.bounds.y;
        self.bounds.y = target;
        dy
    }

    /// Horizontally over a member of `target` with the bottom edge on its top edge.
    pub fn standing_on(&self, target: CollisionTarget<'_>, tolerance: f32) -> bool {
        target
            .members()
            .iter()
            .any(|other| rests_on(self.bounds, other, tolerance))
    }

    /// Resolve against one solid and apply the side effects of the hit.
    ///
    /// A side hit stops horizontal motion, except for an airborne gravity
    /// actor, which keeps its momentum. A ceiling hit stops upward motion.
    pub fn resolve_solid(&mut self, other: &Bounds, tuning: &Tuning) -> Displacement {
        let displacement = self.move_outside(other, tuning);
        if displacement.x != 0.0 && !self.in_air() {
            self.motion.x_velocity = 0.0;
            self.motion.moving = None;
        }
        if displacement.y > 0.0 && self.motion.y_velocity < 0.0 {
            self.motion.y_velocity = 0.0;
        }
        displacement
    }

    /// Resolve against every member of `target` and land on any of them.
    pub fn collide_solid(&mut self, target: CollisionTarget<'_>, tuning: &Tuning) -> Collided {
        self.collide_solid_each(target, tuning, |_, _| {})
    }

    /// [`ActorMut::collide_solid`], reporting each member that displaced the actor.
    pub fn collide_solid_each(
        &mut self,
        target: CollisionTarget<'_>,
        tuning: &Tuning,
        mut on_hit: impl FnMut(usize, Displacement),
    ) -> Collided {
        let mut collided = Collided::default();
        for (index, other) in target.members().iter().enumerate() {
            let displacement = self.resolve_solid(other, tuning);
            if !displacement.is_zero() {
                collided |= displacement.collided();
                on_hit(index, displacement);
            }
        }

        // Landing is tested from the previous x so that clipping a platform
        // corner while rising past it does not count as standing on it.
        if self.gravity_enabled() && self.motion.y_velocity >= 0.0 {
            let before_move = Bounds {
                x: self.motion.last_x,
                ..*self.bounds
            };
            let landed = target
                .members()
                .iter()
                .any(|other| rests_on(&before_move, other, tuning.standing_tolerance));
            if landed {
                self.stop_falling();
            }
        }
        collided
    }

    /// Start falling if grounded with nothing underneath. Returns true if it did.
    pub fn check_support(&mut self, supports: &[Bounds], world: WorldSize, tuning: &Tuning) -> bool {
        let grounded = self
            .gravity
            .as_deref()
            .is_some_and(|g| g.enabled && !g.in_air);
        if !grounded
            || self.on_floor(world, tuning.standing_tolerance)
            || self.standing_on(CollisionTarget::Group(supports), tuning.standing_tolerance)
        {
            return false;
        }
        self.start_falling();
        true
    }

    /// Leave the ground without jumping.
    pub fn start_falling(&mut self) {
        if let Some(g) = self.gravity.as_deref_mut() {
            g.start_falling();
        }
    }

    /// Touch down: jumps reset, downward motion stops.
    pub fn stop_falling(&mut self) {
        if let Some(g) = self.gravity.as_deref_mut() {
            g.land(self.motion);
        }
    }

    /// Animation names to try, best match first.
    pub fn animation_candidates(&self, dragged: bool) -> &'static [&'static str] {
        if dragged {
            return &["drag", "stand"];
        }
        match (self.in_air(), self.motion.moving) {
            (true, Some(Facing::Right)) => &["jumpRight", "jump", "right", "stand"],
            (true, Some(Facing::Left)) => &["jumpLeft", "jump", "left", "stand"],
            (true, None) => &["jump", "stand"],
            (false, Some(Facing::Right)) => &["right", "stand"],
            (false, Some(Facing::Left)) => &["left", "stand"],
            (false, None) => match self.motion.facing {
                Some(Facing::Right) => &["lookRight", "stand"],
                Some(Facing::Left) => &["lookLeft", "stand"],
                None => &["stand"],
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::gravity::AirState;

    const EPSILON: f32 = 1e-3;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn ctx(delta: f32, now: f32) -> StepContext {
        StepContext {
            delta,
            now,
            world: WorldSize::new(1000.0, 600.0),
            tuning: Tuning::default(),
        }
    }

    #[test]
    fn free_actor_moves_and_clamps() {
        let mut bounds = Bounds::new(0.0, 0.0, 80.0, 80.0);
        let mut motion = Kinematics::new(0.0).with_velocity(400.0, 0.0);
        let mut actor = ActorMut::new(&mut bounds, &mut motion, None);
        actor.move_step(&ctx(0.1, 0.0));
        assert!(approx_eq(actor.bounds.x, 40.0));
        assert_eq!(actor.bounds.y, 0.0);

        actor.motion.x_velocity = 100_000.0;
        actor.move_step(&ctx(0.1, 0.1));
        assert_eq!(actor.bounds.x, 920.0);
    }

    #[test]
    fn free_roaming_actor_leaves_the_world() {
        let mut bounds = Bounds::new(0.0, 0.0, 80.0, 80.0);
        let mut motion = Kinematics::new(0.0)
            .with_velocity(-400.0, 0.0)
            .free_roaming();
        let mut actor = ActorMut::new(&mut bounds, &mut motion, None);
        actor.move_step(&ctx(0.1, 0.0));
        assert!(approx_eq(actor.bounds.x, -40.0));
    }

    #[test]
    fn update_records_previous_position_and_snaps_velocity() {
        let mut bounds = Bounds::new(100.0, 100.0, 20.0, 20.0);
        let mut motion = Kinematics::new(200.0);
        let mut actor = ActorMut::new(&mut bounds, &mut motion, None);
        actor.update(Directions::RIGHT | Directions::DOWN, None, &ctx(0.1, 0.0));
        assert_eq!((actor.motion.last_x, actor.motion.last_y), (100.0, 100.0));
        // diagonal input is capped to the axial speed
        let moved = (actor.bounds.x - 100.0).hypot(actor.bounds.y - 100.0);
        assert!(approx_eq(moved, 20.0));
        assert_eq!(actor.motion.x_velocity, 0.0);
        assert_eq!(actor.motion.facing, Some(Facing::Right));
    }

    #[test]
    fn dragging_bypasses_integration() {
        let mut bounds = Bounds::new(0.0, 0.0, 20.0, 20.0);
        let mut motion = Kinematics::new(0.0).with_velocity(500.0, 500.0);
        let mut actor = ActorMut::new(&mut bounds, &mut motion, None);
        actor.update(Directions::empty(), Some((300.0, 200.0)), &ctx(0.1, 0.0));
        assert_eq!((actor.bounds.x, actor.bounds.y), (300.0, 200.0));
        assert_eq!(actor.motion.speed(), 0.0);
        assert_eq!(actor.animation_candidates(true), &["drag", "stand"]);
    }

    #[test]
    fn move_outside_without_overlap_is_noop() {
        let mut bounds = Bounds::new(0.0, 0.0, 10.0, 10.0);
        let mut motion = Kinematics::default();
        let other = Bounds::new(10.0, 0.0, 10.0, 10.0);
        let mut actor = ActorMut::new(&mut bounds, &mut motion, None);
        let d = actor.move_outside(&other, &Tuning::default());
        assert!(d.is_zero());
        assert_eq!(*actor.bounds, Bounds::new(0.0, 0.0, 10.0, 10.0));
    }

    #[test]
    fn move_outside_resolves_shallow_axis_first() {
        let tuning = Tuning::default();
        let mut bounds = Bounds::new(0.0, 0.0, 10.0, 10.0);
        let mut motion = Kinematics::default();
        let wall = Bounds::new(8.0, 0.0, 10.0, 10.0);
        let mut actor = ActorMut::new(&mut bounds, &mut motion, None);
        let d = actor.move_outside(&wall, &tuning);
        assert!(approx_eq(d.x, -2.01));
        assert_eq!(d.y, 0.0);
        assert!(!actor.bounds.overlaps(&wall));

        let mut bounds = Bounds::new(0.0, 5.0, 10.0, 10.0);
        let mut motion = Kinematics::default();
        let floor = Bounds::new(-50.0, 12.0, 100.0, 10.0);
        let mut actor = ActorMut::new(&mut bounds, &mut motion, None);
        let d = actor.move_outside(&floor, &tuning);
        assert_eq!(d.x, 0.0);
        assert!(approx_eq(d.y, -4.0));
        assert_eq!(actor.bounds.bottom(), 12.0 - tuning.epsilon_y);
    }

    #[test]
    fn equal_penetration_resolves_x() {
        let mut bounds = Bounds::new(0.0, 0.0, 10.0, 10.0);
        let mut motion = Kinematics::default();
        let other = Bounds::new(8.0, 8.0, 10.0, 10.0);
        let mut actor = ActorMut::new(&mut bounds, &mut motion, None);
        let d = actor.move_outside(&other, &Tuning::default());
        assert!(d.x < 0.0);
        assert_eq!(d.y, 0.0);
    }

    #[test]
    fn ceiling_push_leaves_gap() {
        let mut bounds = Bounds::new(0.0, 8.0, 10.0, 10.0);
        let mut motion = Kinematics::default().with_velocity(0.0, -100.0);
        let ceiling = Bounds::new(-50.0, 0.0, 100.0, 10.0);
        let mut actor = ActorMut::new(&mut bounds, &mut motion, None);
        let d = actor.resolve_solid(&ceiling, &Tuning::default());
        assert!(approx_eq(d.y, 3.0));
        assert_eq!(actor.bounds.y, 11.0);
        assert_eq!(actor.motion.y_velocity, 0.0);
    }

    #[test]
    fn floor_push_leaves_gap_and_still_stands() {
        let tuning = Tuning::default();
        let floor = Bounds::new(-50.0, 312.7, 100.0, 10.0);
        let mut bounds = Bounds::new(0.0, 280.3, 10.0, 40.0);
        let mut motion = Kinematics::default();
        let mut actor = ActorMut::new(&mut bounds, &mut motion, None);
        actor.move_outside(&floor, &tuning);
        assert!(approx_eq(floor.y - actor.bounds.bottom(), tuning.epsilon_y));
        assert!(!actor.bounds.overlaps(&floor));
        assert!(actor.standing_on(CollisionTarget::Single(&floor), tuning.standing_tolerance));
    }

    #[test]
    fn standing_on_is_tolerant() {
        let platform = Bounds::new(0.0, 100.0, 200.0, 20.0);
        let mut motion = Kinematics::default();
        for (y, expected) in [(50.0, true), (50.9, true), (49.2, true), (48.5, false)] {
            let mut bounds = Bounds::new(10.0, y, 20.0, 50.0);
            let actor = ActorMut::new(&mut bounds, &mut motion, None);
            assert_eq!(
                actor.standing_on(CollisionTarget::Single(&platform), 1.0),
                expected,
                "y = {y}"
            );
        }
        let mut beside = Bounds::new(200.0, 50.0, 20.0, 50.0);
        let actor = ActorMut::new(&mut beside, &mut motion, None);
        assert!(!actor.standing_on(CollisionTarget::Single(&platform), 1.0));
    }

    #[test]
    fn grounding_resets_jump_count() {
        let tuning = Tuning::default();
        let platform = Bounds::new(0.0, 300.0, 400.0, 50.0);
        let mut bounds = Bounds::new(100.0, 200.0, 50.0, 50.0);
        let mut motion = Kinematics::new(100.0);
        let mut gravity = Gravity::new(300.0)
            .with_max_jumps(Some(2))
            .with_jump_release(false)
            .with_jump_delay(0.0);
        let mut actor = ActorMut::new(&mut bounds, &mut motion, Some(&mut gravity));
        actor.process_input(Directions::JUMP, 0.0);
        actor.process_input(Directions::JUMP, 0.1);
        assert_eq!(actor.gravity.as_deref().map(|g| g.num_jumps), Some(2));

        // falling into the platform
        actor.motion.record_position(actor.bounds);
        actor.bounds.y = 255.0;
        actor.motion.y_velocity = 400.0;
        let hit = actor.collide_solid(CollisionTarget::Single(&platform), &tuning);
        assert!(hit.y);
        assert!(actor.standing_on(CollisionTarget::Single(&platform), 1.0));
        let g = actor.gravity.as_deref().unwrap();
        assert_eq!(g.num_jumps, 0);
        assert!(!g.in_air);
        assert_eq!(actor.motion.y_velocity, 0.0);
    }

    #[test]
    fn landing_uses_previous_x() {
        let tuning = Tuning::default();
        let platform = Bounds::new(200.0, 300.0, 200.0, 50.0);
        let mut bounds = Bounds::new(155.0, 253.0, 50.0, 50.0);
        let mut motion = Kinematics::new(100.0).with_velocity(50.0, 10.0);
        motion.last_x = 140.0;
        let mut gravity = Gravity::default();
        gravity.in_air = true;
        let mut actor = ActorMut::new(&mut bounds, &mut motion, Some(&mut gravity));
        actor.collide_solid(CollisionTarget::Single(&platform), &tuning);
        assert_eq!(actor.bounds.bottom(), 300.0 - tuning.epsilon_y);
        assert!(actor.in_air());
    }

    #[test]
    fn side_hit_stops_grounded_but_not_airborne_momentum() {
        let tuning = Tuning::default();
        let wall = Bounds::new(100.0, 0.0, 20.0, 400.0);

        let mut bounds = Bounds::new(85.0, 100.0, 20.0, 50.0);
        let mut motion = Kinematics::new(100.0).with_velocity(100.0, 0.0);
        let mut gravity = Gravity::default();
        let mut actor = ActorMut::new(&mut bounds, &mut motion, Some(&mut gravity));
        let hit = actor.collide_solid(CollisionTarget::Single(&wall), &tuning);
        assert!(hit.x);
        assert_eq!(actor.motion.x_velocity, 0.0);

        let mut bounds = Bounds::new(85.0, 100.0, 20.0, 50.0);
        let mut motion = Kinematics::new(100.0).with_velocity(100.0, -50.0);
        let mut gravity = Gravity::default();
        gravity.in_air = true;
        let mut actor = ActorMut::new(&mut bounds, &mut motion, Some(&mut gravity));
        actor.collide_solid(CollisionTarget::Single(&wall), &tuning);
        assert_eq!(actor.motion.x_velocity, 100.0);
    }

    #[test]
    fn group_target_ors_collisions() {
        let tuning = Tuning::default();
        let solids = [
            Bounds::new(20.0, 0.0, 10.0, 100.0),
            Bounds::new(-100.0, 48.0, 300.0, 10.0),
        ];
        let mut bounds = Bounds::new(11.0, 0.0, 10.0, 50.0);
        let mut motion = Kinematics::default();
        let mut actor = ActorMut::new(&mut bounds, &mut motion, None);
        let mut hits = Vec::new();
        let collided =
            actor.collide_solid_each(CollisionTarget::Group(&solids), &tuning, |i, _| hits.push(i));
        assert_eq!(collided, Collided { x: true, y: true });
        assert_eq!(hits, vec![0, 1]);
    }

    #[test]
    fn walking_off_a_ledge_falls_towards_last_move() {
        let tuning = Tuning::default();
        let world = WorldSize::new(1000.0, 600.0);
        let ledge = [Bounds::new(0.0, 300.0, 100.0, 20.0)];
        let mut bounds = Bounds::new(85.0, 250.0, 30.0, 50.0);
        let mut motion = Kinematics::new(100.0);
        let mut gravity = Gravity::default();
        let mut actor = ActorMut::new(&mut bounds, &mut motion, Some(&mut gravity));

        let step = StepContext { world, ..ctx(0.1, 0.0) };
        actor.update(Directions::RIGHT, None, &step);
        assert!(!actor.check_support(&ledge, world, &tuning));
        actor.update(Directions::RIGHT, None, &step);
        assert!(actor.check_support(&ledge, world, &tuning));

        let g = actor.gravity.as_deref().unwrap();
        assert_eq!(g.state(), AirState::Falling);
        assert_eq!(g.fall_direction, Some(Facing::Right));
    }

    #[test]
    fn floor_lands_a_falling_actor() {
        let mut bounds = Bounds::new(10.0, 540.0, 20.0, 50.0);
        let mut motion = Kinematics::new(100.0);
        let mut gravity = Gravity::default();
        gravity.in_air = true;
        let mut actor = ActorMut::new(&mut bounds, &mut motion, Some(&mut gravity));
        for n in 0..30 {
            actor.update(Directions::empty(), None, &ctx(1.0 / 60.0, n as f32 / 60.0));
        }
        assert_eq!(actor.bounds.bottom(), 600.0);
        assert!(!actor.in_air());
        assert_eq!(actor.motion.y_acceleration, 0.0);
    }

    #[test]
    fn airborne_steering_blends_with_momentum() {
        let mut bounds = Bounds::new(100.0, 500.0, 20.0, 20.0);
        let mut motion = Kinematics::new(100.0);
        let mut gravity = Gravity::default().with_air_control(0.25);
        let mut actor = ActorMut::new(&mut bounds, &mut motion, Some(&mut gravity));

        actor.process_input(Directions::JUMP | Directions::RIGHT, 0.0);
        assert!(approx_eq(actor.motion.x_velocity, 100.0));

        actor.process_input(Directions::LEFT, 0.1);
        assert!(approx_eq(actor.motion.x_velocity, 50.0));
    }

    #[test]
    fn up_jumps_only_under_gravity() {
        let mut bounds = Bounds::new(100.0, 500.0, 20.0, 20.0);
        let mut motion = Kinematics::new(100.0);
        let mut gravity = Gravity::new(300.0);
        let mut actor = ActorMut::new(&mut bounds, &mut motion, Some(&mut gravity));
        actor.process_input(Directions::UP, 0.0);
        assert_eq!(actor.motion.y_velocity, -300.0);

        let mut motion = Kinematics::new(100.0);
        let mut actor = ActorMut::new(&mut bounds, &mut motion, None);
        actor.process_input(Directions::UP, 0.0);
        assert_eq!(actor.motion.y_velocity, -100.0);
    }

    #[test]
    fn candidates_follow_state() {
        let mut bounds = Bounds::new(0.0, 0.0, 10.0, 10.0);
        let mut motion = Kinematics::default();
        motion.moving = Some(Facing::Left);
        let mut gravity = Gravity::default();
        gravity.in_air = true;
        let actor = ActorMut::new(&mut bounds, &mut motion, Some(&mut gravity));
        assert_eq!(
            actor.animation_candidates(false),
            &["jumpLeft", "jump", "left", "stand"]
        );

        let mut idle = Kinematics::default();
        idle.facing = Some(Facing::Right);
        let actor = ActorMut::new(&mut bounds, &mut idle, None);
        assert_eq!(actor.animation_candidates(false), &["lookRight", "stand"]);
    }
}
