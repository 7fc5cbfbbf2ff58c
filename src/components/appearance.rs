//! What a box looks like when drawn.

use bevy_ecs::prelude::Component;

use crate::components::sprite::Sprite;
use crate::components::spritemap::SpriteMap;

/// Render reference of a box: a solid color, a still image, or an animation.
///
/// Entities without an `Appearance` are simulated but never drawn.
#[derive(Component, Debug)]
pub enum Appearance {
    /// Fill the box with a color string understood by the renderer.
    Color(String),
    /// Stretch a whole loaded sheet over the box.
    Image(String),
    /// A single animated sprite.
    Sprite(Sprite),
    /// An animation selector with named sequences.
    Map(SpriteMap),
}

impl Appearance {
    pub fn color(color: impl Into<String>) -> Self {
        Appearance::Color(color.into())
    }

    pub fn image(tex_key: impl Into<String>) -> Self {
        Appearance::Image(tex_key.into())
    }

    /// The animated sprite behind this appearance, if any.
    pub fn sprite(&self) -> Option<&Sprite> {
        match self {
            Appearance::Sprite(sprite) => Some(sprite),
            Appearance::Map(map) => Some(&map.sprite),
            _ => None,
        }
    }

    pub fn sprite_mut(&mut self) -> Option<&mut Sprite> {
        match self {
            Appearance::Sprite(sprite) => Some(sprite),
            Appearance::Map(map) => Some(&mut map.sprite),
            _ => None,
        }
    }

    pub fn sprite_map_mut(&mut self) -> Option<&mut SpriteMap> {
        match self {
            Appearance::Map(map) => Some(map),
            _ => None,
        }
    }
}
