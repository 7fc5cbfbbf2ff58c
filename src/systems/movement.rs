//! Actor motion system.
//!
//! [`actor_update`] runs once per physics sub-step. Each actor (an entity
//! with [`Bounds`] and [`Kinematics`] that is not [`Solid`]) consumes its
//! [`MoveIntent`], is integrated by [`ActorMut::update`], and then picks an
//! animation matching its new state.
use bevy_ecs::prelude::*;

use crate::components::actor::{ActorMut, StepContext};
use crate::components::appearance::Appearance;
use crate::components::bounds::Bounds;
use crate::components::draggable::Draggable;
use crate::components::gravity::Gravity;
use crate::components::intent::MoveIntent;
use crate::components::kinematics::Kinematics;
use crate::components::solid::Solid;
use crate::resources::input::Pointer;
use crate::resources::tuning::Tuning;
use crate::resources::worldsize::WorldSize;
use crate::resources::worldtime::{DeltaSource, WorldTime};

/// Switch a sprite-map appearance to the best animation for the actor's state.
pub fn refresh_animation(actor: &ActorMut<'_>, appearance: &mut Appearance, dragged: bool) {
    if let Some(map) = appearance.sprite_map_mut() {
        map.use_first(actor.animation_candidates(dragged));
    }
}

/// Advance every actor by the current [`WorldTime`] delta.
pub fn actor_update(
    mut actors: Query<
        (
            &mut Bounds,
            &mut Kinematics,
            Option<&mut Gravity>,
            Option<&MoveIntent>,
            Option<&Draggable>,
            Option<&mut Appearance>,
        ),
        Without<Solid>,
    >,
    time: Res<WorldTime>,
    world_size: Res<WorldSize>,
    tuning: Res<Tuning>,
    pointer: Option<Res<Pointer>>,
) {
    if !time.is_running() {
        return;
    }
    let ctx = StepContext {
        delta: time.delta(),
        now: time.elapsed,
        world: *world_size,
        tuning: *tuning,
    };

    for (mut bounds, mut motion, mut gravity, intent, drag, appearance) in actors.iter_mut() {
        let dragged = drag.is_some_and(|d| d.dragging);
        let drag_to = match (drag, pointer.as_deref()) {
            (Some(d), Some(p)) if d.dragging => Some(d.target(p.x, p.y)),
            _ => None,
        };
        let directions = intent.map(MoveIntent::directions).unwrap_or_default();

        let mut actor = ActorMut::new(&mut bounds, &mut motion, gravity.as_deref_mut());
        actor.update(directions, drag_to, &ctx);

        if let Some(mut appearance) = appearance {
            refresh_animation(&actor, &mut appearance, dragged);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn physics_world() -> World {
        let mut world = World::new();
        world.insert_resource(WorldTime {
            delta: 0.1,
            elapsed: 0.1,
            ..Default::default()
        });
        world.insert_resource(WorldSize::new(1000.0, 1000.0));
        world.insert_resource(Tuning::default());
        world
    }

    #[test]
    fn actors_move_and_solids_do_not() {
        let mut world = physics_world();
        let actor = world
            .spawn((
                Bounds::new(0.0, 0.0, 80.0, 80.0),
                Kinematics::new(0.0)
                    .with_velocity(400.0, 0.0)
                    .with_damping(Some(0.0)),
            ))
            .id();
        let wall = world
            .spawn((
                Bounds::new(500.0, 0.0, 10.0, 10.0),
                Kinematics::new(0.0).with_velocity(400.0, 0.0),
                Solid,
            ))
            .id();

        let mut schedule = Schedule::default();
        schedule.add_systems(actor_update);
        schedule.run(&mut world);

        assert!((world.get::<Bounds>(actor).unwrap().x - 40.0).abs() < 1e-3);
        assert_eq!(world.get::<Bounds>(wall).unwrap().x, 500.0);
    }

    #[test]
    fn frozen_time_moves_nothing() {
        let mut world = physics_world();
        world.resource_mut::<WorldTime>().time_scale = 0.0;
        let actor = world
            .spawn((
                Bounds::new(0.0, 0.0, 80.0, 80.0),
                Kinematics::new(0.0).with_velocity(400.0, 0.0),
            ))
            .id();
        let mut schedule = Schedule::default();
        schedule.add_systems(actor_update);
        schedule.run(&mut world);
        assert_eq!(world.get::<Bounds>(actor).unwrap().x, 0.0);
    }

    #[test]
    fn dragged_actor_follows_pointer() {
        let mut world = physics_world();
        let mut pointer = Pointer::default();
        pointer.move_to(300.0, 200.0);
        world.insert_resource(pointer);
        let mut drag = Draggable::new();
        drag.grab(10.0, 10.0, 0.0, 0.0);
        let actor = world
            .spawn((
                Bounds::new(0.0, 0.0, 20.0, 20.0),
                Kinematics::new(100.0),
                drag,
            ))
            .id();

        let mut schedule = Schedule::default();
        schedule.add_systems(actor_update);
        schedule.run(&mut world);

        let bounds = world.get::<Bounds>(actor).unwrap();
        assert_eq!((bounds.x, bounds.y), (290.0, 190.0));
    }
}
