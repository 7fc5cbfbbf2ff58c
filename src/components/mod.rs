//! ECS components for entities.
//!
//! Every drawn object is a box ([`bounds`]) with an optional look
//! ([`appearance`]). Moving boxes add [`kinematics`], and optionally
//! [`gravity`], [`draggable`] and an [`intent`]. Boxes marked [`solid`]
//! are what actors collide with.
//!
//! Submodules overview:
//! - [`actor`] – mutable actor view: integration, input, collision resolution
//! - [`appearance`] – color, image, sprite or sprite map
//! - [`bounds`] – axis-aligned box geometry and overlap tests
//! - [`collision`] – collision targets and resolver outcomes
//! - [`draggable`] – pointer-follow behaviour
//! - [`gravity`] – jump and fall state machine
//! - [`intent`] – logical direction tokens and the player marker
//! - [`kinematics`] – velocities, accelerations, damping, facing
//! - [`solid`] – marker for collision targets
//! - [`sprite`] – frame indexing and loop scheduling over a sheet
//! - [`spritemap`] – named animation sequences
//! - [`zindex`] – draw order

pub mod actor;
pub mod appearance;
pub mod bounds;
pub mod collision;
pub mod draggable;
pub mod gravity;
pub mod intent;
pub mod kinematics;
pub mod solid;
pub mod sprite;
pub mod spritemap;
pub mod zindex;
