use bevy_ecs::prelude::*;
use log::warn;

use crate::components::appearance::Appearance;
use crate::components::bounds::Bounds;
use crate::components::sprite::{FrameStep, SourceRect};
use crate::components::zindex::ZIndex;
use crate::events::animation::AnimationFinishedEvent;
use crate::resources::mainloop::RealTime;
use crate::resources::renderer::{DrawRect, Renderer};
use crate::resources::sheetstore::{FlipCache, SheetStore};

/// Draw every box with an [`Appearance`] through the host renderer.
///
/// Runs once per host frame, outside the schedules, because the renderer is
/// borrowed from the host for the duration of the call. Pending flipped
/// sheets are realized first, then boxes are drawn sorted by [`ZIndex`].
/// Draw-driven sprite loops advance here; run-once loops that end trigger
/// [`AnimationFinishedEvent`] after drawing.
pub fn render_world(world: &mut World, renderer: &mut dyn Renderer) {
    let now_ms = world.get_resource::<RealTime>().map_or(0.0, |t| t.now_ms);

    // flips switched by the animation selector since the last pass
    let wanted: Vec<(String, _)> = {
        let mut q = world.query::<&Appearance>();
        q.iter(world)
            .filter_map(|a| a.sprite())
            .filter(|s| !s.flip.is_none())
            .map(|s| (s.tex_key.clone(), s.flip))
            .collect()
    };
    if let Some(mut flips) = world.get_resource_mut::<FlipCache>() {
        for (key, flip) in &wanted {
            flips.request(key, *flip);
        }
    }

    let Some(sheets) = world.remove_resource::<SheetStore>() else {
        warn!("No SheetStore resource; nothing is drawn");
        return;
    };
    let mut flips = world.remove_resource::<FlipCache>().unwrap_or_default();
    flips.resolve(renderer, &sheets);

    let mut order: Vec<(ZIndex, Entity)> = {
        let mut q = world.query_filtered::<(Entity, Option<&ZIndex>), With<Appearance>>();
        q.iter(world)
            .map(|(entity, z)| (z.copied().unwrap_or_default(), entity))
            .collect()
    };
    order.sort_unstable();

    let mut finished = Vec::new();
    for (_, entity) in order {
        let Some(bounds) = world.get::<Bounds>(entity).copied() else {
            continue;
        };
        let Some(mut appearance) = world.get_mut::<Appearance>(entity) else {
            continue;
        };
        let dest = DrawRect::new(bounds.x, bounds.y, bounds.width, bounds.height);
        match &mut *appearance {
            Appearance::Color(color) => renderer.fill_rect(color, dest, bounds.rotation),
            Appearance::Image(key) => {
                if let Some(sheet) = sheets.get(key) {
                    let src = SourceRect {
                        x: 0.0,
                        y: 0.0,
                        width: sheet.width,
                        height: sheet.height,
                    };
                    renderer.draw_image(sheet.image, src, dest, bounds.rotation);
                }
            }
            Appearance::Sprite(sprite) => {
                let step = sprite.draw(renderer, &sheets, &flips, dest, bounds.rotation, now_ms);
                if step == Some(FrameStep::Finished) {
                    finished.push(entity);
                }
            }
            Appearance::Map(map) => {
                let step =
                    map.sprite
                        .draw(renderer, &sheets, &flips, dest, bounds.rotation, now_ms);
                if step == Some(FrameStep::Finished) {
                    finished.push(entity);
                }
            }
        }
    }

    world.insert_resource(sheets);
    world.insert_resource(flips);

    for entity in finished {
        world.trigger(AnimationFinishedEvent { entity });
    }
}
