//! Input systems.
//!
//! - [`player_input`] copies the directions held in
//!   [`InputState`](crate::resources::input::InputState) into the
//!   [`MoveIntent`] of every [`PlayerControlled`] entity.
//! - [`pointer_drag`] picks up and drops [`Draggable`] boxes with the pointer
//!   button.
//!
//! Both degrade to no-ops with a single warning when the host never inserted
//! the resource they read.
use bevy_ecs::prelude::*;
use log::{debug, warn};

use crate::components::bounds::Bounds;
use crate::components::draggable::Draggable;
use crate::components::intent::{Directions, MoveIntent, PlayerControlled};
use crate::resources::input::{InputState, Pointer};

/// Feed the shared input state to player-controlled entities.
///
/// Without an [`InputState`] resource players receive no directions.
pub fn player_input(
    input: Option<Res<InputState>>,
    mut players: Query<&mut MoveIntent, With<PlayerControlled>>,
    mut warned: Local<bool>,
) {
    let directions = match input {
        Some(input) => input.directions(),
        None => {
            if !*warned && !players.is_empty() {
                warn!("No InputState resource; player input is ignored");
                *warned = true;
            }
            Directions::empty()
        }
    };
    for mut intent in players.iter_mut() {
        intent.0 = directions;
    }
}

/// Grab a draggable box under the pointer on press and drop it on release.
pub fn pointer_drag(
    pointer: Option<Res<Pointer>>,
    mut query: Query<(Entity, &Bounds, &mut Draggable)>,
    mut warned: Local<bool>,
) {
    let Some(pointer) = pointer else {
        if !*warned && !query.is_empty() {
            warn!("No Pointer resource; dragging is disabled");
            *warned = true;
        }
        for (_, _, mut drag) in query.iter_mut() {
            if drag.dragging {
                drag.release();
            }
        }
        return;
    };

    if pointer.button.just_pressed {
        // only one box is picked up per press
        for (entity, bounds, mut drag) in query.iter_mut() {
            if bounds.contains_point(pointer.x, pointer.y) {
                drag.grab(pointer.x, pointer.y, bounds.x, bounds.y);
                debug!("Picked up {:?}", entity);
                break;
            }
        }
    }

    if pointer.button.just_released || !pointer.button.active {
        for (entity, _, mut drag) in query.iter_mut() {
            if drag.dragging {
                debug!("Dropped {:?}", entity);
                drag.release();
            }
        }
    }
}
