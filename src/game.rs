//! World ownership and the per-frame driver.
//!
//! [`Game`] owns the ECS [`World`] and its two schedules:
//!
//! - **physics**, run once per sub-step: pointer drag, player input, actor
//!   update, solid collision.
//! - **animation**, run once per host frame: sheet binding and
//!   timer-driven sprite loops.
//!
//! The host calls [`Game::frame`] from its own frame callback with a
//! millisecond timestamp and a [`Renderer`]. Everything else (image loading,
//! key handling) happens outside and reaches the engine through resources.
use bevy_ecs::prelude::*;
use log::info;

use crate::components::appearance::Appearance;
use crate::components::bounds::Bounds;
use crate::components::gravity::Gravity;
use crate::components::intent::{MoveIntent, PlayerControlled};
use crate::components::kinematics::Kinematics;
use crate::components::solid::Solid;
use crate::events::animation::observe_animation_finished;
use crate::events::collision::observe_solid_collision;
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::{InputState, Pointer};
use crate::resources::mainloop::{MainLoop, RealTime};
use crate::resources::renderer::Renderer;
use crate::resources::sheetstore::{FlipCache, SheetStore};
use crate::resources::worldsize::WorldSize;
use crate::resources::worldtime::WorldTime;
use crate::systems::animation::{bind_loaded_sheets, sprite_timers};
use crate::systems::collision::solid_collision;
use crate::systems::input::{player_input, pointer_drag};
use crate::systems::movement::actor_update;
use crate::systems::render::render_world;
use crate::systems::time::update_world_time;

pub struct Game {
    pub world: World,
    physics: Schedule,
    animation: Schedule,
    initialized: bool,
}

impl Game {
    /// Build a world holding every resource the systems read.
    pub fn new(config: GameConfig) -> Self {
        let mut world = World::new();
        world.insert_resource(WorldTime::default());
        world.insert_resource(config.world_size());
        world.insert_resource(config.tuning());
        world.insert_resource(MainLoop::new(config.max_step, config.min_fps));
        world.insert_resource(RealTime::default());
        world.insert_resource(SheetStore::new());
        world.insert_resource(FlipCache::new());
        world.insert_resource(InputState::default());
        world.insert_resource(Pointer::default());
        world.insert_resource(config);
        Self {
            world,
            physics: Schedule::default(),
            animation: Schedule::default(),
            initialized: false,
        }
    }

    /// Register observers and build the schedules. Calling it twice is a no-op.
    pub fn init(&mut self) {
        if self.initialized {
            return;
        }
        self.world.add_observer(observe_solid_collision);
        self.world.add_observer(observe_animation_finished);
        self.world.flush();

        self.physics.add_systems(
            (pointer_drag, player_input, actor_update, solid_collision).chain(),
        );
        self.animation
            .add_systems((bind_loaded_sheets, sprite_timers).chain());
        self.initialized = true;
        info!("Game initialized");
    }

    /// Despawn every box, drop loaded sheets and flipped copies, stop the loop.
    pub fn teardown(&mut self) {
        let boxes: Vec<Entity> = self
            .world
            .query_filtered::<Entity, With<Bounds>>()
            .iter(&self.world)
            .collect();
        let count = boxes.len();
        for entity in boxes {
            self.world.despawn(entity);
        }
        if let Some(mut sheets) = self.world.get_resource_mut::<SheetStore>() {
            sheets.clear();
        }
        if let Some(mut flips) = self.world.get_resource_mut::<FlipCache>() {
            flips.clear();
        }
        self.stop();
        info!("Game torn down ({} boxes despawned)", count);
    }

    pub fn start(&mut self, now_ms: f64) {
        self.init();
        self.world.resource_mut::<MainLoop>().start(now_ms);
    }

    pub fn stop(&mut self) {
        self.world.resource_mut::<MainLoop>().stop();
    }

    pub fn is_running(&self) -> bool {
        self.world.resource::<MainLoop>().is_running()
    }

    /// Advance and draw one host frame. Returns false while the loop is stopped.
    pub fn frame(&mut self, now_ms: f64, renderer: &mut dyn Renderer) -> bool {
        self.init();
        let Some(plan) = self.world.resource_mut::<MainLoop>().tick(now_ms) else {
            return false;
        };

        for step in &plan.steps {
            update_world_time(&mut self.world, *step);
            self.physics.run(&mut self.world);
        }

        let clock_ms = self.world.resource::<MainLoop>().clock_ms();
        self.world.insert_resource(RealTime {
            now_ms: clock_ms,
            elapsed_ms: plan.elapsed_ms,
        });
        self.animation.run(&mut self.world);
        render_world(&mut self.world, renderer);

        // edges survive frames that simulated nothing
        if !plan.steps.is_empty() {
            if let Some(mut input) = self.world.get_resource_mut::<InputState>() {
                input.begin_frame();
            }
            if let Some(mut pointer) = self.world.get_resource_mut::<Pointer>() {
                pointer.begin_frame();
            }
        }
        self.world.clear_trackers();
        true
    }

    fn place(&self, position: Option<(f32, f32)>, width: f32, height: f32) -> Bounds {
        let world = self
            .world
            .get_resource::<WorldSize>()
            .copied()
            .unwrap_or_default();
        match position {
            Some((x, y)) => Bounds::new(x, y, width, height),
            None => Bounds::centered(width, height, world.width, world.height),
        }
    }

    fn config(&self) -> GameConfig {
        self.world
            .get_resource::<GameConfig>()
            .cloned()
            .unwrap_or_default()
    }

    /// Spawn a drawn box that takes no part in physics.
    ///
    /// Without a position the box is centred in the world.
    pub fn spawn_box(
        &mut self,
        position: Option<(f32, f32)>,
        width: f32,
        height: f32,
        appearance: Appearance,
    ) -> Entity {
        let bounds = self.place(position, width, height);
        self.world.spawn((bounds, appearance)).id()
    }

    /// Spawn a box actors collide with.
    pub fn spawn_solid(
        &mut self,
        position: Option<(f32, f32)>,
        width: f32,
        height: f32,
        appearance: Appearance,
    ) -> Entity {
        let bounds = self.place(position, width, height);
        self.world.spawn((bounds, appearance, Solid)).id()
    }

    /// Spawn a moving box, optionally under gravity, using the configured physics.
    pub fn spawn_actor(
        &mut self,
        position: Option<(f32, f32)>,
        width: f32,
        height: f32,
        appearance: Appearance,
        gravity: bool,
    ) -> Entity {
        let config = self.config();
        let bounds = self.place(position, width, height);
        let kinematics = Kinematics::new(config.move_speed).with_damping(config.damping);
        let mut entity = self
            .world
            .spawn((bounds, kinematics, appearance, MoveIntent::default()));
        if gravity {
            entity.insert(
                Gravity::new(config.jump_velocity)
                    .with_jump_delay(config.jump_delay)
                    .with_max_jumps(config.max_jumps)
                    .with_air_control(config.air_control)
                    .with_jump_release(config.require_jump_release),
            );
        }
        entity.id()
    }

    /// Spawn an actor whose intent follows the shared [`InputState`].
    pub fn spawn_player(
        &mut self,
        position: Option<(f32, f32)>,
        width: f32,
        height: f32,
        appearance: Appearance,
        gravity: bool,
    ) -> Entity {
        let entity = self.spawn_actor(position, width, height, appearance, gravity);
        self.world.entity_mut(entity).insert(PlayerControlled);
        entity
    }
}
