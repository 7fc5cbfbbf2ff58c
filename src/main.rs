//! Canvas Engine headless demo.
//!
//! Runs a small platform scene for a fixed number of frames without a window:
//! a player that walks right and jumps onto a platform, a wandering actor
//! steered by random direction tokens, and a few solids. Drawing goes to a
//! renderer that only logs what it would draw. Final positions are printed
//! when the run ends.
//!
//! # Running
//!
//! ```sh
//! RUST_LOG=debug cargo run -- --frames 300 --fps 60
//! ```

use std::path::PathBuf;

use clap::Parser;
use log::{debug, info, trace, warn};

use canvasengine::components::appearance::Appearance;
use canvasengine::components::bounds::Bounds;
use canvasengine::components::draggable::Draggable;
use canvasengine::components::intent::{Directions, MoveIntent};
use canvasengine::components::sprite::{AdvanceMode, Flip, SourceRect, Sprite};
use canvasengine::components::spritemap::SpriteMap;
use canvasengine::components::zindex::ZIndex;
use canvasengine::game::Game;
use canvasengine::resources::gameconfig::GameConfig;
use canvasengine::resources::input::{InputState, Pointer};
use canvasengine::resources::renderer::{DrawRect, ImageRef, Renderer};
use canvasengine::resources::sheetstore::SheetStore;

const HERO_SEQUENCES: &str = r#"{
    "stand":     { "start_row": 0, "start_col": 0, "end_row": 0, "end_col": 0 },
    "lookRight": { "start_row": 0, "start_col": 0, "end_row": 0, "end_col": 0 },
    "lookLeft":  { "start_row": 0, "start_col": 0, "end_row": 0, "end_col": 0,
                   "flip": { "horizontal": true } },
    "right":     { "start_row": 0, "start_col": 1, "end_row": 0, "end_col": 4 },
    "left":      { "start_row": 0, "start_col": 1, "end_row": 0, "end_col": 4,
                   "flip": { "horizontal": true } },
    "jump":      { "start_row": 1, "start_col": 0, "end_row": 1, "end_col": 1 },
    "jumpLeft":  { "start_row": 1, "start_col": 0, "end_row": 1, "end_col": 1,
                   "flip": { "horizontal": true } }
}"#;

/// Canvas Engine headless demo
#[derive(Parser)]
#[command(version, about = "Runs a headless Canvas Engine scene and prints where everything ended up.")]
struct Cli {
    /// INI file with [world], [loop], [physics] and [collision] sections.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Number of host frames to run.
    #[arg(long, default_value_t = 600)]
    frames: u32,

    /// Host frame rate the timestamps are generated at.
    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    /// Seed for the wandering actor.
    #[arg(long)]
    seed: Option<u64>,
}

/// Renderer that logs draw calls instead of producing pixels.
#[derive(Default)]
struct LoggingRenderer {
    fills: u64,
    images: u64,
    next_image: u64,
}

impl Renderer for LoggingRenderer {
    fn fill_rect(&mut self, color: &str, dest: DrawRect, _rotation: f32) {
        self.fills += 1;
        trace!("fill {} at ({:.1}, {:.1})", color, dest.x, dest.y);
    }

    fn draw_image(&mut self, image: ImageRef, src: SourceRect, dest: DrawRect, _rotation: f32) {
        self.images += 1;
        trace!(
            "image {:?} [{}, {}] at ({:.1}, {:.1})",
            image, src.x, src.y, dest.x, dest.y
        );
    }

    fn flip_image(&mut self, image: ImageRef, flip: Flip) -> ImageRef {
        self.next_image += 1;
        debug!("flipped copy {:?} of {:?}", flip, image);
        ImageRef(1000 + self.next_image)
    }
}

/// Scripted keys for the player: walk right, jump twice, then stop.
fn script_input(frame: u32, input: &mut InputState) {
    match frame {
        10 => input.press(Directions::RIGHT),
        40 | 90 => input.press(Directions::JUMP),
        45 | 95 => input.release(Directions::JUMP),
        150 => input.release(Directions::RIGHT),
        _ => {}
    }
}

fn wander(rng: &mut fastrand::Rng) -> Directions {
    const CHOICES: [Directions; 5] = [
        Directions::LEFT,
        Directions::RIGHT,
        Directions::UP,
        Directions::DOWN,
        Directions::empty(),
    ];
    CHOICES[rng.usize(..CHOICES.len())]
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => GameConfig::with_path(path),
        None => GameConfig::new(),
    };
    if let Err(e) = config.load_from_file() {
        warn!("{}; using defaults", e);
    }
    let (world_w, world_h) = (config.world_width, config.world_height);

    let mut game = Game::new(config);
    game.init();

    // scene
    game.world
        .resource_mut::<SheetStore>()
        .insert("hero", ImageRef(1), 160.0, 64.0);
    let hero = SpriteMap::new(Sprite::new("hero", 32.0, 32.0), 100.0, AdvanceMode::Timer)
        .and_then(|mut hero| hero.load_json(HERO_SEQUENCES).map(|_| hero));
    let hero = match hero {
        Ok(hero) => Appearance::Map(hero),
        Err(e) => {
            warn!("{}; drawing the player as a plain box", e);
            Appearance::color("blue")
        }
    };

    game.spawn_solid(
        Some((0.0, world_h - 20.0)),
        world_w,
        20.0,
        Appearance::color("#444"),
    );
    game.spawn_solid(
        Some((world_w * 0.4, world_h - 120.0)),
        200.0,
        20.0,
        Appearance::color("#666"),
    );
    let player = game.spawn_player(
        Some((40.0, world_h - 52.0)),
        32.0,
        32.0,
        hero,
        true,
    );
    let wanderer = game.spawn_actor(None, 24.0, 24.0, Appearance::color("orange"), false);
    let crate_box = game.spawn_actor(
        Some((world_w - 80.0, 40.0)),
        30.0,
        30.0,
        Appearance::color("brown"),
        true,
    );
    game.world
        .entity_mut(crate_box)
        .insert((Draggable::new(), ZIndex(1)));

    let mut rng = match cli.seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    };
    let mut renderer = LoggingRenderer::default();
    let frame_ms = 1000.0 / cli.fps.max(1.0);

    game.start(0.0);
    for frame in 1..=cli.frames {
        if let Some(mut input) = game.world.get_resource_mut::<InputState>() {
            script_input(frame, &mut input);
        }
        // pick the crate up and carry it left for a second
        if let Some(mut pointer) = game.world.get_resource_mut::<Pointer>() {
            match frame {
                200 => {
                    pointer.move_to(world_w - 65.0, world_h - 35.0);
                    pointer.button.set(true);
                }
                201..=260 => pointer.move_to(world_w - 65.0 - (frame - 200) as f32 * 4.0, 100.0),
                261 => pointer.button.set(false),
                _ => {}
            }
        }
        if frame % 30 == 1
            && let Some(mut intent) = game.world.get_mut::<MoveIntent>(wanderer)
        {
            intent.0 = wander(&mut rng);
        }
        game.frame(f64::from(frame) * frame_ms, &mut renderer);
    }
    game.stop();

    info!(
        "{} frames: {} fills, {} images drawn",
        cli.frames, renderer.fills, renderer.images
    );
    for (name, entity) in [("player", player), ("wanderer", wanderer), ("crate", crate_box)] {
        if let Some(bounds) = game.world.get::<Bounds>(entity) {
            println!("{:<8} x={:>7.1} y={:>7.1}", name, bounds.x, bounds.y);
        }
    }
    if let Some(map) = game
        .world
        .get::<Appearance>(player)
        .and_then(|a| match a {
            Appearance::Map(map) => map.active(),
            _ => None,
        })
    {
        println!("player animation: {}", map);
    }
}
