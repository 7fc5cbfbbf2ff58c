//! Physics integration tests: jumping, landing, walls, ledges and dragging,
//! driven through `Game::frame` with real schedules and observers.

use std::sync::{Arc, Mutex};

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;

use canvasengine::components::appearance::Appearance;
use canvasengine::components::bounds::Bounds;
use canvasengine::components::draggable::Draggable;
use canvasengine::components::gravity::{AirState, Gravity};
use canvasengine::components::intent::{Directions, MoveIntent};
use canvasengine::components::kinematics::{Facing, Kinematics};
use canvasengine::components::sprite::{Flip, SourceRect};
use canvasengine::events::collision::SolidCollisionEvent;
use canvasengine::game::Game;
use canvasengine::resources::gameconfig::GameConfig;
use canvasengine::resources::input::{InputState, Pointer};
use canvasengine::resources::renderer::{DrawRect, ImageRef, Renderer};
use canvasengine::resources::tuning::Tuning;

const FRAME_MS: f64 = 16.0;

fn approx_eq(a: f32, b: f32, tolerance: f32) -> bool {
    (a - b).abs() < tolerance
}

/// Bottom edge resting on a top edge at `top`: touching, or up to the push gap above it.
fn rests_at(bottom: f32, top: f32) -> bool {
    let gap = Tuning::default().epsilon_y;
    bottom <= top && bottom >= top - gap - 1e-3
}

struct NullRenderer;

impl Renderer for NullRenderer {
    fn fill_rect(&mut self, _color: &str, _dest: DrawRect, _rotation: f32) {}
    fn draw_image(&mut self, _i: ImageRef, _s: SourceRect, _d: DrawRect, _r: f32) {}
    fn flip_image(&mut self, image: ImageRef, _flip: Flip) -> ImageRef {
        image
    }
}

/// A started game with a floor solid along the bottom of an 800x600 world.
fn game_with_floor() -> (Game, Entity) {
    let mut game = Game::new(GameConfig::new());
    let floor = game.spawn_solid(
        Some((0.0, 560.0)),
        800.0,
        40.0,
        Appearance::color("gray"),
    );
    game.start(0.0);
    (game, floor)
}

fn collect_hits(game: &mut Game) -> Arc<Mutex<Vec<SolidCollisionEvent>>> {
    let hits: Arc<Mutex<Vec<SolidCollisionEvent>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = hits.clone();
    game.world
        .add_observer(move |trigger: On<SolidCollisionEvent>| {
            sink.lock().unwrap().push(*trigger.event());
        });
    game.world.flush();
    hits
}

#[test]
fn player_jumps_and_lands_back_on_the_floor() {
    let (mut game, floor) = game_with_floor();
    let hits = collect_hits(&mut game);
    let player = game.spawn_player(
        Some((100.0, 528.0)),
        32.0,
        32.0,
        Appearance::color("blue"),
        true,
    );

    game.world
        .resource_mut::<InputState>()
        .press(Directions::JUMP);

    let mut now = 0.0;
    let mut apex = f32::MAX;
    let mut left_ground = false;
    for frame in 1..=600 {
        if frame == 5 {
            game.world
                .resource_mut::<InputState>()
                .release(Directions::JUMP);
        }
        now += FRAME_MS;
        game.frame(now, &mut NullRenderer);

        let y = game.world.get::<Bounds>(player).unwrap().y;
        apex = apex.min(y);
        let state = game.world.get::<Gravity>(player).unwrap().state();
        if state == AirState::Jumping {
            left_ground = true;
        } else if left_ground && state == AirState::Grounded {
            break;
        }
    }

    assert!(left_ground);
    assert!(apex < 400.0, "apex was {apex}");
    let gravity = game.world.get::<Gravity>(player).unwrap();
    assert_eq!(gravity.state(), AirState::Grounded);
    assert_eq!(gravity.num_jumps, 0);
    let bottom = game.world.get::<Bounds>(player).unwrap().bottom();
    assert!(rests_at(bottom, 560.0), "bottom at {bottom}");

    let hits = hits.lock().unwrap();
    assert!(
        hits.iter()
            .any(|h| h.actor == player && h.solid == floor && h.is_landing())
    );
}

#[test]
fn held_jump_key_does_not_jump_again() {
    let (mut game, _) = game_with_floor();
    let player = game.spawn_player(
        Some((100.0, 528.0)),
        32.0,
        32.0,
        Appearance::color("blue"),
        true,
    );
    game.world
        .resource_mut::<InputState>()
        .press(Directions::UP);

    let mut now = 0.0;
    let mut jumps = 0;
    let mut was_grounded = true;
    for _ in 0..400 {
        now += FRAME_MS;
        game.frame(now, &mut NullRenderer);
        let grounded = game.world.get::<Gravity>(player).unwrap().state() == AirState::Grounded;
        if was_grounded && !grounded {
            jumps += 1;
        }
        was_grounded = grounded;
    }
    assert_eq!(jumps, 1);
}

#[test]
fn actor_walking_into_a_wall_stops_beside_it() {
    let (mut game, _) = game_with_floor();
    let hits = collect_hits(&mut game);
    let wall = game.spawn_solid(Some((200.0, 0.0)), 20.0, 560.0, Appearance::color("gray"));
    let walker = game.spawn_actor(
        Some((100.0, 100.0)),
        50.0,
        50.0,
        Appearance::color("red"),
        false,
    );
    game.world.get_mut::<MoveIntent>(walker).unwrap().0 = Directions::RIGHT;

    let mut now = 0.0;
    for _ in 0..30 {
        now += FRAME_MS;
        game.frame(now, &mut NullRenderer);
    }

    let bounds = *game.world.get::<Bounds>(walker).unwrap();
    assert!(approx_eq(bounds.right(), 200.0 - 0.01, 1e-3), "right edge at {}", bounds.right());
    assert_eq!(bounds.y, 100.0);

    let hits = hits.lock().unwrap();
    let wall_hits: Vec<_> = hits.iter().filter(|h| h.solid == wall).collect();
    assert!(!wall_hits.is_empty());
    assert!(wall_hits.iter().all(|h| h.x < 0.0 && h.y == 0.0));
}

#[test]
fn walking_off_a_ledge_falls_in_the_walking_direction() {
    let mut game = Game::new(GameConfig::new());
    game.spawn_solid(Some((0.0, 300.0)), 200.0, 20.0, Appearance::color("gray"));
    let player = game.spawn_player(
        Some((150.0, 268.0)),
        32.0,
        32.0,
        Appearance::color("blue"),
        true,
    );
    game.start(0.0);
    game.world
        .resource_mut::<InputState>()
        .press(Directions::RIGHT);

    let mut now = 0.0;
    let mut fell = None;
    for _ in 0..60 {
        now += FRAME_MS;
        game.frame(now, &mut NullRenderer);
        let gravity = game.world.get::<Gravity>(player).unwrap();
        if gravity.state() == AirState::Falling {
            fell = Some(gravity.fall_direction);
            break;
        }
    }

    assert_eq!(fell, Some(Some(Facing::Right)));
    assert!(game.world.get::<Bounds>(player).unwrap().x > 200.0 - 32.0);
}

#[test]
fn dragged_box_follows_the_pointer_and_drops_on_release() {
    let (mut game, _) = game_with_floor();
    let crate_box = game.spawn_actor(
        Some((400.0, 530.0)),
        30.0,
        30.0,
        Appearance::color("brown"),
        true,
    );
    game.world.entity_mut(crate_box).insert(Draggable::new());

    let mut now = FRAME_MS;
    game.frame(now, &mut NullRenderer);

    {
        let mut pointer = game.world.resource_mut::<Pointer>();
        pointer.move_to(410.0, 540.0);
        pointer.button.set(true);
    }
    now += FRAME_MS;
    game.frame(now, &mut NullRenderer);
    assert!(game.world.get::<Draggable>(crate_box).unwrap().dragging);

    game.world.resource_mut::<Pointer>().move_to(210.0, 240.0);
    now += FRAME_MS;
    game.frame(now, &mut NullRenderer);
    let bounds = *game.world.get::<Bounds>(crate_box).unwrap();
    assert_eq!((bounds.x, bounds.y), (200.0, 230.0));

    game.world.resource_mut::<Pointer>().button.set(false);
    for _ in 0..200 {
        now += FRAME_MS;
        game.frame(now, &mut NullRenderer);
    }
    assert!(!game.world.get::<Draggable>(crate_box).unwrap().dragging);
    let bounds = *game.world.get::<Bounds>(crate_box).unwrap();
    assert!(rests_at(bounds.bottom(), 560.0), "bottom at {}", bounds.bottom());
    assert_eq!(
        game.world.get::<Gravity>(crate_box).unwrap().state(),
        AirState::Grounded
    );
}

#[test]
fn free_actor_moves_diagonally_at_capped_speed() {
    let mut game = Game::new(GameConfig::new());
    let actor = game.spawn_actor(
        Some((100.0, 100.0)),
        10.0,
        10.0,
        Appearance::color("green"),
        false,
    );
    game.world.get_mut::<MoveIntent>(actor).unwrap().0 = Directions::RIGHT | Directions::DOWN;
    game.start(0.0);
    game.frame(FRAME_MS, &mut NullRenderer);

    let bounds = *game.world.get::<Bounds>(actor).unwrap();
    let moved = ((bounds.x - 100.0).powi(2) + (bounds.y - 100.0).powi(2)).sqrt();
    let speed = game.world.get::<Kinematics>(actor).unwrap().move_speed;
    assert!(approx_eq(moved, speed * 0.016, 1e-2), "moved {moved}");
}
