//! Draw order for boxes.

use bevy_ecs::prelude::Component;

/// Painter's order: higher values are drawn later, on top.
///
/// Boxes without a `ZIndex` draw at 0. Equal values keep spawn order.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct ZIndex(pub i32);
