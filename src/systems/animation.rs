//! Animation systems.
//!
//! - [`bind_loaded_sheets`] attaches sheets that finished loading to the
//!   sprites that reference them, and asks for the flipped copies every
//!   sequence of a sprite map will need.
//! - [`sprite_timers`] feeds real elapsed time to timer-driven sprite loops
//!   and triggers [`AnimationFinishedEvent`] when a run-once loop ends. It
//!   also times new draw-driven loops from the frame they start in.
//!
//! Both run in the animation schedule, once per host frame, independent of
//! how many physics sub-steps that frame took. Draw-driven loops advance in
//! [`render_world`](crate::systems::render::render_world) instead.
use bevy_ecs::prelude::*;

use crate::components::appearance::Appearance;
use crate::components::sprite::FrameStep;
use crate::events::animation::AnimationFinishedEvent;
use crate::resources::mainloop::RealTime;
use crate::resources::sheetstore::{FlipCache, SheetStore};

/// Bind sprites to sheets that have been registered since the last pass.
pub fn bind_loaded_sheets(
    mut query: Query<&mut Appearance>,
    sheets: Res<SheetStore>,
    mut flips: ResMut<FlipCache>,
) {
    for mut appearance in query.iter_mut() {
        let needs_binding = appearance
            .sprite()
            .is_some_and(|sprite| !sprite.is_loaded() && sheets.is_loaded(&sprite.tex_key));
        if !needs_binding {
            continue;
        }

        if let Some(map) = appearance.sprite_map_mut() {
            for (_, sequence) in map.sequences() {
                flips.request(&map.sprite.tex_key, sequence.flip);
            }
        }
        if let Some(sprite) = appearance.sprite_mut()
            && let Some(sheet) = sheets.get(&sprite.tex_key)
        {
            sprite.bind_sheet(sheet.width, sheet.height);
        }
    }
}

/// Advance timer-driven sprite loops by the real time of this host frame,
/// and start the clock of draw-driven loops begun since the last frame.
pub fn sprite_timers(
    mut query: Query<(Entity, &mut Appearance)>,
    time: Res<RealTime>,
    mut commands: Commands,
) {
    for (entity, mut appearance) in query.iter_mut() {
        let Some(sprite) = appearance.sprite_mut() else {
            continue;
        };
        sprite.start_draw_clock(time.now_ms);
        if sprite.tick(time.elapsed_ms) == Some(FrameStep::Finished) {
            commands.trigger(AnimationFinishedEvent { entity });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::sprite::{AdvanceMode, Flip, FrameRange, Sprite};
    use crate::components::spritemap::{AnimationSequence, SpriteMap};
    use crate::resources::renderer::ImageRef;

    #[test]
    fn sprites_bind_once_their_sheet_loads() {
        let mut world = World::new();
        world.insert_resource(SheetStore::new());
        world.insert_resource(FlipCache::new());
        let map = SpriteMap::new(Sprite::new("hero", 32.0, 32.0), 100.0, AdvanceMode::Timer)
            .unwrap()
            .with_sequence("stand", AnimationSequence::new(0, 0, 0, 0))
            .with_sequence(
                "left",
                AnimationSequence::new(0, 1, 0, 3).flipped(Flip::horizontal()),
            );
        let hero = world.spawn(Appearance::Map(map)).id();

        let mut schedule = Schedule::default();
        schedule.add_systems(bind_loaded_sheets);
        schedule.run(&mut world);
        let appearance = world.get::<Appearance>(hero).unwrap();
        assert!(!appearance.sprite().unwrap().is_loaded());

        world
            .resource_mut::<SheetStore>()
            .insert("hero", ImageRef(1), 128.0, 32.0);
        schedule.run(&mut world);
        let appearance = world.get::<Appearance>(hero).unwrap();
        assert_eq!(appearance.sprite().unwrap().total_cols(), 4);
        assert!(world.resource::<FlipCache>().has_pending());
    }

    #[test]
    fn timer_sprites_advance_with_real_time() {
        let mut world = World::new();
        world.insert_resource(RealTime {
            now_ms: 250.0,
            elapsed_ms: 250.0,
        });
        let mut sprite = Sprite::new("coin", 16.0, 16.0).with_range(FrameRange::row(0, 0, 4));
        sprite.bind_sheet(64.0, 16.0);
        let _handle = sprite.start_loop(100.0, AdvanceMode::Timer, false);
        let coin = world.spawn(Appearance::Sprite(sprite)).id();

        let mut schedule = Schedule::default();
        schedule.add_systems(sprite_timers);
        schedule.run(&mut world);

        let appearance = world.get::<Appearance>(coin).unwrap();
        assert_eq!(appearance.sprite().unwrap().frame(), Some(3));
    }

    #[test]
    fn draw_loops_are_timed_from_the_frame_they_start_in() {
        let mut world = World::new();
        world.insert_resource(RealTime {
            now_ms: 1000.0,
            elapsed_ms: 16.0,
        });
        let mut sprite = Sprite::new("torch", 16.0, 16.0).with_range(FrameRange::row(0, 0, 4));
        sprite.bind_sheet(64.0, 16.0);
        let _handle = sprite.start_loop(100.0, AdvanceMode::Draw, false);
        let torch = world.spawn(Appearance::Sprite(sprite)).id();

        let mut schedule = Schedule::default();
        schedule.add_systems(sprite_timers);
        schedule.run(&mut world);

        // first drawn well after the loop started
        let mut appearance = world.get_mut::<Appearance>(torch).unwrap();
        let sprite = appearance.sprite_mut().unwrap();
        assert_eq!(sprite.draw_tick(1300.0), Some(FrameStep::Advanced));
        assert_eq!(sprite.frame(), Some(2));
    }
}
