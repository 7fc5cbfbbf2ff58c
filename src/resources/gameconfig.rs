//! Game configuration resource.
//!
//! Manages engine settings loaded from an INI configuration file. Provides
//! defaults for safe startup and methods to load/save configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [world]
//! width = 800
//! height = 600
//!
//! [loop]
//! max_step = 0.016667
//! min_fps = 10
//!
//! [physics]
//! gravity = 21
//! move_speed = 800
//! jump_velocity = 646
//! jump_delay = 0.25
//! max_jumps = 0
//! air_control = 0.5
//! damping = 0
//! require_jump_release = true
//!
//! [collision]
//! standing_tolerance = 1
//! epsilon_x = 0.01
//! epsilon_y = 1
//! ```
//!
//! `max_jumps = -1` allows unlimited air jumps. `damping = 0` disables
//! damping: velocity snaps to zero at the end of every step.

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

use crate::error::EngineError;
use crate::resources::tuning::Tuning;
use crate::resources::worldsize::WorldSize;

/// Default safe values for startup
const DEFAULT_WORLD_WIDTH: f32 = 800.0;
const DEFAULT_WORLD_HEIGHT: f32 = 600.0;
const DEFAULT_MAX_STEP: f32 = 1.0 / 60.0;
const DEFAULT_MIN_FPS: f32 = 10.0;
const DEFAULT_GRAVITY: f32 = 21.0;
const DEFAULT_MOVE_SPEED: f32 = 800.0;
const DEFAULT_JUMP_VELOCITY: f32 = 646.0;
const DEFAULT_JUMP_DELAY: f32 = 0.25;
const DEFAULT_MAX_JUMPS: Option<u32> = Some(0);
const DEFAULT_AIR_CONTROL: f32 = 0.5;
const DEFAULT_REQUIRE_JUMP_RELEASE: bool = true;
const DEFAULT_STANDING_TOLERANCE: f32 = 1.0;
const DEFAULT_EPSILON_X: f32 = 0.01;
const DEFAULT_EPSILON_Y: f32 = 1.0;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Engine configuration resource.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub world_width: f32,
    pub world_height: f32,
    /// Longest physics sub-step in seconds.
    pub max_step: f32,
    /// Frame rate below which simulated time falls behind real time.
    pub min_fps: f32,
    /// Vertical acceleration added every step while airborne.
    pub gravity: f32,
    pub move_speed: f32,
    pub jump_velocity: f32,
    pub jump_delay: f32,
    /// Extra jumps allowed in the air; `None` is unlimited.
    pub max_jumps: Option<u32>,
    pub air_control: f32,
    /// Velocity decay factor per second; `None` snaps to zero.
    pub damping: Option<f32>,
    pub require_jump_release: bool,
    pub standing_tolerance: f32,
    pub epsilon_x: f32,
    pub epsilon_y: f32,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn get_float(
    config: &Ini,
    section: &'static str,
    key: &'static str,
) -> Result<Option<f32>, EngineError> {
    config
        .getfloat(section, key)
        .map(|v| v.map(|v| v as f32))
        .map_err(|reason| EngineError::ConfigValue {
            section,
            key,
            reason,
        })
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            world_width: DEFAULT_WORLD_WIDTH,
            world_height: DEFAULT_WORLD_HEIGHT,
            max_step: DEFAULT_MAX_STEP,
            min_fps: DEFAULT_MIN_FPS,
            gravity: DEFAULT_GRAVITY,
            move_speed: DEFAULT_MOVE_SPEED,
            jump_velocity: DEFAULT_JUMP_VELOCITY,
            jump_delay: DEFAULT_JUMP_DELAY,
            max_jumps: DEFAULT_MAX_JUMPS,
            air_control: DEFAULT_AIR_CONTROL,
            damping: None,
            require_jump_release: DEFAULT_REQUIRE_JUMP_RELEASE,
            standing_tolerance: DEFAULT_STANDING_TOLERANCE,
            epsilon_x: DEFAULT_EPSILON_X,
            epsilon_y: DEFAULT_EPSILON_Y,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    pub fn load_from_file(&mut self) -> Result<(), EngineError> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|reason| EngineError::ConfigLoad {
                path: self.config_path.clone(),
                reason,
            })?;
        self.apply(&config)?;

        info!(
            "Loaded config: world {}x{}, max_step={}, min_fps={}, gravity={}, max_jumps={:?}",
            self.world_width,
            self.world_height,
            self.max_step,
            self.min_fps,
            self.gravity,
            self.max_jumps
        );
        Ok(())
    }

    /// Load configuration from INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), EngineError> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|reason| EngineError::ConfigLoad {
                path: self.config_path.clone(),
                reason,
            })?;
        self.apply(&config)
    }

    fn apply(&mut self, config: &Ini) -> Result<(), EngineError> {
        // [world] section
        if let Some(width) = get_float(config, "world", "width")? {
            self.world_width = width;
        }
        if let Some(height) = get_float(config, "world", "height")? {
            self.world_height = height;
        }

        // [loop] section
        if let Some(max_step) = get_float(config, "loop", "max_step")? {
            if max_step <= 0.0 {
                return Err(EngineError::ConfigValue {
                    section: "loop",
                    key: "max_step",
                    reason: format!("must be positive, got {max_step}"),
                });
            }
            self.max_step = max_step;
        }
        if let Some(min_fps) = get_float(config, "loop", "min_fps")? {
            if min_fps <= 0.0 {
                return Err(EngineError::ConfigValue {
                    section: "loop",
                    key: "min_fps",
                    reason: format!("must be positive, got {min_fps}"),
                });
            }
            self.min_fps = min_fps;
        }

        // [physics] section
        if let Some(gravity) = get_float(config, "physics", "gravity")? {
            self.gravity = gravity;
        }
        if let Some(speed) = get_float(config, "physics", "move_speed")? {
            self.move_speed = speed;
        }
        if let Some(velocity) = get_float(config, "physics", "jump_velocity")? {
            self.jump_velocity = velocity;
        }
        if let Some(delay) = get_float(config, "physics", "jump_delay")? {
            self.jump_delay = delay;
        }
        let max_jumps = config
            .getint("physics", "max_jumps")
            .map_err(|reason| EngineError::ConfigValue {
                section: "physics",
                key: "max_jumps",
                reason,
            })?;
        if let Some(max_jumps) = max_jumps {
            self.max_jumps = u32::try_from(max_jumps).ok();
        }
        if let Some(air_control) = get_float(config, "physics", "air_control")? {
            self.air_control = air_control.clamp(0.0, 1.0);
        }
        if let Some(damping) = get_float(config, "physics", "damping")? {
            self.damping = (damping > 0.0).then_some(damping);
        }
        let require_release = config
            .getbool("physics", "require_jump_release")
            .map_err(|reason| EngineError::ConfigValue {
                section: "physics",
                key: "require_jump_release",
                reason,
            })?;
        if let Some(required) = require_release {
            self.require_jump_release = required;
        }

        // [collision] section
        if let Some(tolerance) = get_float(config, "collision", "standing_tolerance")? {
            self.standing_tolerance = tolerance;
        }
        if let Some(eps) = get_float(config, "collision", "epsilon_x")? {
            self.epsilon_x = eps;
        }
        if let Some(eps) = get_float(config, "collision", "epsilon_y")? {
            self.epsilon_y = eps;
        }
        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), EngineError> {
        let mut config = Ini::new();

        // [world] section
        config.set("world", "width", Some(self.world_width.to_string()));
        config.set("world", "height", Some(self.world_height.to_string()));

        // [loop] section
        config.set("loop", "max_step", Some(self.max_step.to_string()));
        config.set("loop", "min_fps", Some(self.min_fps.to_string()));

        // [physics] section
        config.set("physics", "gravity", Some(self.gravity.to_string()));
        config.set("physics", "move_speed", Some(self.move_speed.to_string()));
        config.set("physics", "jump_velocity", Some(self.jump_velocity.to_string()));
        config.set("physics", "jump_delay", Some(self.jump_delay.to_string()));
        let max_jumps = self.max_jumps.map_or(-1, i64::from);
        config.set("physics", "max_jumps", Some(max_jumps.to_string()));
        config.set("physics", "air_control", Some(self.air_control.to_string()));
        config.set(
            "physics",
            "damping",
            Some(self.damping.unwrap_or(0.0).to_string()),
        );
        config.set(
            "physics",
            "require_jump_release",
            Some(self.require_jump_release.to_string()),
        );

        // [collision] section
        config.set(
            "collision",
            "standing_tolerance",
            Some(self.standing_tolerance.to_string()),
        );
        config.set("collision", "epsilon_x", Some(self.epsilon_x.to_string()));
        config.set("collision", "epsilon_y", Some(self.epsilon_y.to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| EngineError::ConfigSave {
                path: self.config_path.clone(),
                reason: e.to_string(),
            })?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    pub fn world_size(&self) -> WorldSize {
        WorldSize::new(self.world_width, self.world_height)
    }

    pub fn tuning(&self) -> Tuning {
        Tuning {
            gravity: self.gravity,
            standing_tolerance: self.standing_tolerance,
            epsilon_x: self.epsilon_x,
            epsilon_y: self.epsilon_y,
        }
    }
}
