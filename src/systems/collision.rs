//! Solid collision system.
//!
//! [`solid_collision`] runs after [`actor_update`](crate::systems::movement::actor_update)
//! in every physics sub-step. Each actor is resolved against every
//! [`Solid`] in the world:
//!
//! - overlaps are pushed out along the axis of least penetration and a
//!   [`SolidCollisionEvent`] is triggered per displacing solid;
//! - a gravity actor whose bottom edge rests on a solid lands;
//! - a grounded gravity actor with nothing underneath, and not on the world
//!   floor, starts falling;
//! - sprite-map actors refresh their animation.
use bevy_ecs::prelude::*;

use crate::components::actor::ActorMut;
use crate::components::appearance::Appearance;
use crate::components::bounds::Bounds;
use crate::components::collision::CollisionTarget;
use crate::components::draggable::Draggable;
use crate::components::gravity::Gravity;
use crate::components::kinematics::Kinematics;
use crate::components::solid::Solid;
use crate::events::collision::SolidCollisionEvent;
use crate::resources::tuning::Tuning;
use crate::resources::worldsize::WorldSize;
use crate::systems::movement::refresh_animation;

pub fn solid_collision(
    mut actors: Query<
        (
            Entity,
            &mut Bounds,
            &mut Kinematics,
            Option<&mut Gravity>,
            Option<&Draggable>,
            Option<&mut Appearance>,
        ),
        Without<Solid>,
    >,
    solids: Query<(Entity, &Bounds), With<Solid>>,
    world_size: Res<WorldSize>,
    tuning: Res<Tuning>,
    mut commands: Commands,
) {
    let (solid_ids, solid_bounds): (Vec<Entity>, Vec<Bounds>) =
        solids.iter().map(|(entity, bounds)| (entity, *bounds)).unzip();

    for (entity, mut bounds, mut motion, mut gravity, drag, appearance) in actors.iter_mut() {
        let mut actor = ActorMut::new(&mut bounds, &mut motion, gravity.as_deref_mut());
        actor.collide_solid_each(
            CollisionTarget::Group(&solid_bounds),
            &tuning,
            |index, displacement| {
                commands.trigger(SolidCollisionEvent {
                    actor: entity,
                    solid: solid_ids[index],
                    x: displacement.x,
                    y: displacement.y,
                });
            },
        );
        actor.check_support(&solid_bounds, *world_size, &tuning);

        if let Some(mut appearance) = appearance {
            let dragged = drag.is_some_and(|d| d.dragging);
            refresh_animation(&actor, &mut appearance, dragged);
        }
    }
}
